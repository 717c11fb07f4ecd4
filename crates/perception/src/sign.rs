//! Traffic sign recognition results and icon resolution

use serde::{Deserialize, Serialize};

/// Country reported by the perception engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Country {
    #[default]
    Unknown,
    Usa,
    Uk,
    China,
    Other,
}

impl Country {
    /// Sign market used to pick icons
    pub fn market(&self) -> Market {
        match self {
            Country::China => Market::China,
            _ => Market::Us,
        }
    }
}

/// Sign appearance family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Market {
    Us,
    China,
}

/// Sign classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignKind {
    Unknown,
    Mass,
    SpeedLimit,
    SpeedLimitEnd,
    SpeedLimitMin,
    SpeedLimitNight,
    SpeedLimitTrucks,
    SpeedLimitExit,
    SpeedLimitRamp,
    WarningSchoolZone,
    WarningPedestriansCrossing,
    WarningTrafficSignals,
    WarningStopAhead,
    WarningYieldAhead,
    WarningSpeedBump,
    WarningRoundabout,
    WarningCurveLeft,
    WarningCurveRight,
    WarningTurnLeft,
    WarningTurnRight,
    WarningWindingRoad,
    WarningRailwayCrossing,
    RegulatoryEndOfSchoolZone,
    RegulatoryStop,
    RegulatoryYield,
    RegulatoryNoEntry,
    RegulatoryNoLeftTurn,
    RegulatoryNoRightTurn,
    RegulatoryNoUTurn,
    RegulatoryNoParking,
    RegulatoryDoNotPass,
    RegulatoryOneWayStraight,
    InformationParking,
    InformationBikeRoute,
}

impl SignKind {
    /// Asset name stem, without market or value suffix
    pub fn as_str(&self) -> &'static str {
        match self {
            SignKind::Unknown => "Unknown",
            SignKind::Mass => "Mass",
            SignKind::SpeedLimit => "Speed_Limit",
            SignKind::SpeedLimitEnd => "Speed_Limit_End",
            SignKind::SpeedLimitMin => "Speed_Limit_Min",
            SignKind::SpeedLimitNight => "Speed_Limit_Night",
            SignKind::SpeedLimitTrucks => "Speed_Limit_Trucks",
            SignKind::SpeedLimitExit => "Warning_Exit",
            SignKind::SpeedLimitRamp => "Warning_Ramp",
            SignKind::WarningSchoolZone => "Warning_School_Zone",
            SignKind::WarningPedestriansCrossing => "Warning_Pedestrians_Crossing",
            SignKind::WarningTrafficSignals => "Warning_Traffic_Signals",
            SignKind::WarningStopAhead => "Warning_Stop_Ahead",
            SignKind::WarningYieldAhead => "Warning_Yield_Ahead",
            SignKind::WarningSpeedBump => "Warning_Speed_Bump",
            SignKind::WarningRoundabout => "Warning_Roundabout",
            SignKind::WarningCurveLeft => "Warning_Curve_Left",
            SignKind::WarningCurveRight => "Warning_Curve_Right",
            SignKind::WarningTurnLeft => "Warning_Turn_Left",
            SignKind::WarningTurnRight => "Warning_Turn_Right",
            SignKind::WarningWindingRoad => "Warning_Winding_Road",
            SignKind::WarningRailwayCrossing => "Warning_Railway_Crossing",
            SignKind::RegulatoryEndOfSchoolZone => "Regulatory_End_Of_School_Zone",
            SignKind::RegulatoryStop => "Regulatory_Stop",
            SignKind::RegulatoryYield => "Regulatory_Yield",
            SignKind::RegulatoryNoEntry => "Regulatory_No_Entry",
            SignKind::RegulatoryNoLeftTurn => "Regulatory_No_Left_Turn",
            SignKind::RegulatoryNoRightTurn => "Regulatory_No_Right_Turn",
            SignKind::RegulatoryNoUTurn => "Regulatory_No_U_Turn",
            SignKind::RegulatoryNoParking => "Regulatory_No_Parking",
            SignKind::RegulatoryDoNotPass => "Regulatory_Do_Not_Pass",
            SignKind::RegulatoryOneWayStraight => "Regulatory_One_Way_Straight",
            SignKind::InformationParking => "Information_Parking",
            SignKind::InformationBikeRoute => "Information_Bike_Route",
        }
    }

    /// Kinds whose icon carries a speed value
    pub fn is_numbered(&self) -> bool {
        matches!(
            self,
            SignKind::SpeedLimit
                | SignKind::SpeedLimitEnd
                | SignKind::SpeedLimitMin
                | SignKind::SpeedLimitNight
                | SignKind::SpeedLimitTrucks
                | SignKind::SpeedLimitExit
                | SignKind::SpeedLimitRamp
        )
    }
}

/// Classified sign: kind plus the value printed on it (0 when none)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sign {
    pub kind: SignKind,
    #[serde(default)]
    pub number: u32,
}

/// Resolved icon for the UI collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignIcon {
    /// Asset name, e.g. `Speed_Limit_US_25_Over`
    pub asset: String,
    /// Drawn in the over-limit style
    pub over: bool,
}

impl Sign {
    pub fn new(kind: SignKind, number: u32) -> Self {
        Self { kind, number }
    }

    /// Resolve the icon for this sign, `None` when no asset exists.
    ///
    /// Only the US market ships icons. Numbered signs exist for multiples
    /// of 5 between 5 and 90; the over-limit style applies to them only.
    pub fn icon(&self, over: bool, market: Market) -> Option<SignIcon> {
        if market != Market::Us {
            return None;
        }

        match self.kind {
            SignKind::Unknown | SignKind::Mass => None,
            kind if kind.is_numbered() => {
                if self.number == 0 || self.number > 90 || self.number % 5 != 0 {
                    return None;
                }
                let mut asset = format!("{}_US_{}", kind.as_str(), self.number);
                if over {
                    asset.push_str("_Over");
                }
                Some(SignIcon { asset, over })
            }
            kind => Some(SignIcon {
                asset: format!("{}_US", kind.as_str()),
                over: false,
            }),
        }
    }

    pub fn is_school_zone_start(&self) -> bool {
        self.kind == SignKind::WarningSchoolZone
    }

    pub fn is_school_zone_end(&self) -> bool {
        self.kind == SignKind::RegulatoryEndOfSchoolZone
    }
}
