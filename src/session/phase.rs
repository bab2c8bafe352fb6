//! The fixed onboarding phase sequence.

use serde::{Deserialize, Serialize};

/// One screen of the onboarding wizard.
///
/// Progresses linearly: Welcome → LicenseEntry → LicenseConfirm → Activate →
/// Locate → Apply → PhotoUpload → Csat → Complete. Navigation moves one step
/// at a time and clamps at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Welcome,
    LicenseEntry,
    LicenseConfirm,
    Activate,
    Locate,
    Apply,
    PhotoUpload,
    Csat,
    Complete,
}

/// The full ordered sequence, first to last.
pub const PHASE_SEQUENCE: [Phase; 9] = [
    Phase::Welcome,
    Phase::LicenseEntry,
    Phase::LicenseConfirm,
    Phase::Activate,
    Phase::Locate,
    Phase::Apply,
    Phase::PhotoUpload,
    Phase::Csat,
    Phase::Complete,
];

impl Phase {
    /// Position of this phase in the fixed sequence.
    pub fn index(self) -> usize {
        PHASE_SEQUENCE
            .iter()
            .position(|p| *p == self)
            .unwrap_or_default()
    }

    /// Get the next phase in the linear progression, if any.
    pub fn next(self) -> Option<Phase> {
        PHASE_SEQUENCE.get(self.index() + 1).copied()
    }

    /// Get the previous phase, if any.
    pub fn prev(self) -> Option<Phase> {
        self.index().checked_sub(1).and_then(|i| PHASE_SEQUENCE.get(i)).copied()
    }

    /// Whether this phase is terminal (the wizard is done).
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Which of the four progress-indicator steps this phase belongs to:
    /// 0 = vehicle identification, 1 = device installation, 2 = photo
    /// confirmation, 3 = wrap-up.
    pub fn step_group(self) -> u8 {
        match self {
            Self::Welcome | Self::LicenseEntry | Self::LicenseConfirm => 0,
            Self::Activate | Self::Locate | Self::Apply => 1,
            Self::PhotoUpload => 2,
            Self::Csat | Self::Complete => 3,
        }
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::Welcome
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Welcome => "welcome",
            Self::LicenseEntry => "license-entry",
            Self::LicenseConfirm => "license-confirm",
            Self::Activate => "activate",
            Self::Locate => "locate",
            Self::Apply => "apply",
            Self::PhotoUpload => "photo-upload",
            Self::Csat => "csat",
            Self::Complete => "complete",
        };
        write!(f, "{s}")
    }
}
