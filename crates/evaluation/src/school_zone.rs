//! School-zone status from one poll of tracked signs

use perception::Sign;

/// A school-zone warning sets the flag; an end-of-school-zone sign in the
/// same set clears it again.
pub fn is_school_zone(signs: &[Sign]) -> bool {
    signs.iter().any(Sign::is_school_zone_start) && !signs.iter().any(Sign::is_school_zone_end)
}
