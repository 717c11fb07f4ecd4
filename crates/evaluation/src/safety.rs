//! Collision safety evaluation

use perception::{CollisionObject, Feed, Screen, ScreenModeController};
use serde::{Deserialize, Serialize};

/// Safety banner state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum SafetyState {
    #[default]
    None,
    Collisions(Vec<CollisionObject>),
}

/// Result of evaluating one collision batch
#[derive(Debug, Clone, PartialEq)]
pub struct SafetyAssessment {
    pub state: SafetyState,
    /// A critical pedestrian collision warrants an alert (before gating)
    pub alert: bool,
}

/// Maps collision batches to safety state
#[derive(Debug, Clone, Copy, Default)]
pub struct SafetyAlertEvaluator {
    screens: ScreenModeController,
}

impl SafetyAlertEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn evaluate(&self, screen: Screen, collisions: Vec<CollisionObject>) -> SafetyAssessment {
        if !self.screens.is_relevant(screen, Feed::Collisions) || collisions.is_empty() {
            return SafetyAssessment {
                state: SafetyState::None,
                alert: false,
            };
        }

        let alert = collisions.iter().any(CollisionObject::is_critical_person);
        SafetyAssessment {
            state: SafetyState::Collisions(collisions),
            alert,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use perception::{CollisionSeverity, ObjectClass};
    use proptest::prelude::*;

    fn critical_person() -> CollisionObject {
        CollisionObject::new(ObjectClass::Person, CollisionSeverity::Critical)
    }

    #[test]
    fn test_critical_person_alerts() {
        let assessment = SafetyAlertEvaluator::new()
            .evaluate(Screen::DistanceToObject, vec![critical_person()]);

        assert!(assessment.alert);
        assert_eq!(assessment.state, SafetyState::Collisions(vec![critical_person()]));
    }

    #[test]
    fn test_critical_car_does_not_alert() {
        let car = CollisionObject::new(ObjectClass::Car, CollisionSeverity::Critical);
        let person = CollisionObject::new(ObjectClass::Person, CollisionSeverity::Warning);
        let assessment = SafetyAlertEvaluator::new()
            .evaluate(Screen::DistanceToObject, vec![car, person]);

        assert!(!assessment.alert);
        assert!(matches!(assessment.state, SafetyState::Collisions(ref c) if c.len() == 2));
    }

    #[test]
    fn test_empty_batch_is_none() {
        let assessment = SafetyAlertEvaluator::new().evaluate(Screen::DistanceToObject, vec![]);
        assert_eq!(assessment.state, SafetyState::None);
        assert!(!assessment.alert);
    }

    #[test]
    fn test_menu_suppresses_everything() {
        let assessment = SafetyAlertEvaluator::new().evaluate(Screen::Menu, vec![critical_person()]);
        assert_eq!(assessment.state, SafetyState::None);
        assert!(!assessment.alert);
    }

    proptest! {
        #[test]
        fn prop_other_screens_never_alert(screen_idx in 0usize..8, count in 0usize..5) {
            let screen = Screen::ALL[screen_idx];
            prop_assume!(screen != Screen::DistanceToObject);
            let batch = vec![critical_person(); count];
            let assessment = SafetyAlertEvaluator::new().evaluate(screen, batch);
            prop_assert_eq!(assessment.state, SafetyState::None);
            prop_assert!(!assessment.alert);
        }
    }
}
