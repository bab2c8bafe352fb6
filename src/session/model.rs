//! Vehicle and satisfaction-survey data collected across phases.

use serde::{Deserialize, Serialize};

/// Two-letter codes for the state selector on the license-entry screen.
pub const US_STATES: [&str; 50] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", //
    "HI", "ID", "IL", "IN", "IA", "KS", "KY", "LA", "ME", "MD", //
    "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", //
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", //
    "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV", "WI", "WY",
];

/// Maximum length of a vehicle nickname.
pub const NICKNAME_MAX_LEN: usize = 50;
/// Maximum length of survey feedback text.
pub const FEEDBACK_MAX_LEN: usize = 500;
/// Length of a vehicle identification number.
pub const VIN_LEN: usize = 17;

/// Whether `code` is one of the fifty state codes.
pub fn is_us_state(code: &str) -> bool {
    US_STATES.contains(&code)
}

/// Display label for a 1–5 satisfaction rating.
pub fn rating_label(rating: u8) -> &'static str {
    match rating {
        1 => "Poor",
        2 => "Fair",
        3 => "Good",
        4 => "Very Good",
        5 => "Excellent",
        _ => "",
    }
}

/// Vehicle identification, built incrementally across the license screens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleData {
    /// Two-letter registration state code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_plate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
}

/// Partial update for [`VehicleData`]. Fields left `None` are untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehiclePatch {
    pub state: Option<String>,
    pub license_plate: Option<String>,
    pub nickname: Option<String>,
    pub vin: Option<String>,
}

impl VehicleData {
    /// Shallow-merge a patch into the record. Overlong fields are truncated
    /// to the screen input limits rather than rejected.
    pub fn apply(&mut self, patch: VehiclePatch) {
        if let Some(state) = patch.state {
            self.state = Some(state);
        }
        if let Some(plate) = patch.license_plate {
            self.license_plate = Some(plate);
        }
        if let Some(nickname) = patch.nickname {
            self.nickname = Some(truncated(nickname, NICKNAME_MAX_LEN));
        }
        if let Some(vin) = patch.vin {
            self.vin = Some(truncated(vin, VIN_LEN));
        }
    }

    /// Presence check backing the license screens' proceed gate: a state is
    /// selected and the plate is non-empty.
    pub fn is_complete(&self) -> bool {
        let has_state = self.state.as_deref().is_some_and(|s| !s.is_empty());
        let has_plate = self.license_plate.as_deref().is_some_and(|p| !p.is_empty());
        has_state && has_plate
    }
}

/// Satisfaction survey result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsatData {
    /// 1–5 star rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

/// Partial update for [`CsatData`]. Fields left `None` are untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CsatPatch {
    pub rating: Option<u8>,
    pub feedback: Option<String>,
}

impl CsatData {
    /// Shallow-merge a patch. Out-of-range ratings are ignored, so the
    /// proceed gate stays closed until a real star is picked.
    pub fn apply(&mut self, patch: CsatPatch) {
        if let Some(rating) = patch.rating {
            if (1..=5).contains(&rating) {
                self.rating = Some(rating);
            }
        }
        if let Some(feedback) = patch.feedback {
            self.feedback = Some(truncated(feedback, FEEDBACK_MAX_LEN));
        }
    }

    /// Whether a rating has been picked.
    pub fn is_complete(&self) -> bool {
        self.rating.is_some()
    }
}

/// Truncate to `max` characters on a char boundary.
fn truncated(s: String, max: usize) -> String {
    if s.chars().count() <= max {
        s
    } else {
        s.chars().take(max).collect()
    }
}
