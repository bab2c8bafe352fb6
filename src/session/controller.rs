//! The phase controller — sole owner of one onboarding run's state.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::capture::ImagePayload;

use super::model::{CsatData, CsatPatch, VehicleData, VehiclePatch};
use super::phase::Phase;

/// In-memory aggregate of everything collected across one onboarding run.
///
/// Created at `welcome` with empty data when the wizard mounts, discarded on
/// completion or reload. Every operation is total: navigation clamps at both
/// ends of the sequence and mutators never fail. No I/O originates here —
/// outbound submissions belong to the gateway, sequenced by the route layer.
#[derive(Debug, Clone)]
pub struct OnboardingSession {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    current_phase: Phase,
    vehicle: VehicleData,
    installation_photo: Option<ImagePayload>,
    csat: CsatData,
}

impl OnboardingSession {
    /// Start a fresh run at the welcome screen.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            current_phase: Phase::Welcome,
            vehicle: VehicleData::default(),
            installation_photo: None,
            csat: CsatData::default(),
        }
    }

    pub fn current_phase(&self) -> Phase {
        self.current_phase
    }

    pub fn vehicle(&self) -> &VehicleData {
        &self.vehicle
    }

    pub fn csat(&self) -> &CsatData {
        &self.csat
    }

    pub fn installation_photo(&self) -> Option<&ImagePayload> {
        self.installation_photo.as_ref()
    }

    /// Shallow-merge vehicle fields; fields absent from the patch are untouched.
    pub fn update_vehicle(&mut self, patch: VehiclePatch) {
        self.vehicle.apply(patch);
    }

    /// Replace the installation photo unconditionally (retake path).
    pub fn update_installation_photo(&mut self, payload: ImagePayload) {
        self.installation_photo = Some(payload);
    }

    /// Shallow-merge survey fields.
    pub fn update_csat(&mut self, patch: CsatPatch) {
        self.csat.apply(patch);
    }

    /// Advance one step. At `complete` this is a no-op.
    /// Returns the (possibly unchanged) current phase.
    pub fn next_phase(&mut self) -> Phase {
        if let Some(next) = self.current_phase.next() {
            tracing::debug!(session = %self.id, from = %self.current_phase, to = %next, "Phase advance");
            self.current_phase = next;
        }
        self.current_phase
    }

    /// Retreat one step. At `welcome` this is a no-op.
    /// Returns the (possibly unchanged) current phase.
    pub fn prev_phase(&mut self) -> Phase {
        if let Some(prev) = self.current_phase.prev() {
            tracing::debug!(session = %self.id, from = %self.current_phase, to = %prev, "Phase retreat");
            self.current_phase = prev;
        }
        self.current_phase
    }

    /// Set the phase directly, bypassing sequence adjacency. Recovery and
    /// testing path only.
    pub fn jump_to(&mut self, phase: Phase) {
        self.current_phase = phase;
    }

    /// Whether the proceed action is enabled on the current screen.
    ///
    /// The license screens need a complete vehicle, the survey needs a
    /// rating, and the photo screen needs a stored photo; every other screen
    /// proceeds freely.
    pub fn can_proceed(&self) -> bool {
        match self.current_phase {
            Phase::LicenseEntry | Phase::LicenseConfirm => self.vehicle.is_complete(),
            Phase::PhotoUpload => self.installation_photo.is_some(),
            Phase::Csat => self.csat.is_complete(),
            _ => true,
        }
    }
}

impl Default for OnboardingSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::phase::PHASE_SEQUENCE;

    fn jpeg() -> ImagePayload {
        ImagePayload::new(vec![0xFF, 0xD8, 0xFF, 0xE0], "image/jpeg")
    }

    // ── Navigation ──────────────────────────────────────────────────

    #[test]
    fn starts_at_welcome_with_empty_data() {
        let session = OnboardingSession::new();
        assert_eq!(session.current_phase(), Phase::Welcome);
        assert_eq!(session.vehicle(), &VehicleData::default());
        assert_eq!(session.csat(), &CsatData::default());
        assert!(session.installation_photo().is_none());
    }

    #[test]
    fn eight_advances_reach_complete_and_the_ninth_is_a_noop() {
        let mut session = OnboardingSession::new();
        for _ in 0..8 {
            session.next_phase();
        }
        assert_eq!(session.current_phase(), Phase::Complete);

        let after = session.next_phase();
        assert_eq!(after, Phase::Complete);
        assert_eq!(session.current_phase(), Phase::Complete);
    }

    #[test]
    fn prev_at_welcome_is_a_noop() {
        let mut session = OnboardingSession::new();
        let after = session.prev_phase();
        assert_eq!(after, Phase::Welcome);
    }

    #[test]
    fn any_walk_stays_inside_the_sequence() {
        let mut session = OnboardingSession::new();
        // Alternate forward/backward more times than the sequence is long.
        for i in 0..40 {
            if i % 3 == 0 {
                session.prev_phase();
            } else {
                session.next_phase();
            }
            assert!(PHASE_SEQUENCE.contains(&session.current_phase()));
        }
    }

    #[test]
    fn back_and_forth_is_symmetric() {
        let mut session = OnboardingSession::new();
        session.next_phase();
        session.next_phase();
        assert_eq!(session.current_phase(), Phase::LicenseConfirm);
        session.prev_phase();
        assert_eq!(session.current_phase(), Phase::LicenseEntry);
    }

    #[test]
    fn jump_bypasses_adjacency() {
        let mut session = OnboardingSession::new();
        session.jump_to(Phase::PhotoUpload);
        assert_eq!(session.current_phase(), Phase::PhotoUpload);
        session.jump_to(Phase::Welcome);
        assert_eq!(session.current_phase(), Phase::Welcome);
    }

    // ── Mutators ────────────────────────────────────────────────────

    #[test]
    fn vehicle_updates_accumulate_across_phases() {
        let mut session = OnboardingSession::new();
        session.update_vehicle(VehiclePatch {
            license_plate: Some("ABC123".into()),
            ..Default::default()
        });
        session.next_phase();
        session.update_vehicle(VehiclePatch {
            state: Some("CA".into()),
            ..Default::default()
        });

        assert_eq!(session.vehicle().license_plate.as_deref(), Some("ABC123"));
        assert_eq!(session.vehicle().state.as_deref(), Some("CA"));
    }

    #[test]
    fn photo_is_replaced_unconditionally() {
        let mut session = OnboardingSession::new();
        session.update_installation_photo(jpeg());
        let retake = ImagePayload::new(vec![1, 2, 3], "image/png");
        session.update_installation_photo(retake.clone());
        assert_eq!(session.installation_photo(), Some(&retake));
    }

    // ── Proceed gates ───────────────────────────────────────────────

    #[test]
    fn license_entry_gate_requires_state_and_plate() {
        let mut session = OnboardingSession::new();
        session.jump_to(Phase::LicenseEntry);
        assert!(!session.can_proceed());

        session.update_vehicle(VehiclePatch {
            state: Some("CA".into()),
            ..Default::default()
        });
        assert!(!session.can_proceed());

        session.update_vehicle(VehiclePatch {
            license_plate: Some("ABC123".into()),
            ..Default::default()
        });
        assert!(session.can_proceed());
    }

    #[test]
    fn license_entry_gate_rejects_empty_strings() {
        let mut session = OnboardingSession::new();
        session.jump_to(Phase::LicenseEntry);
        session.update_vehicle(VehiclePatch {
            state: Some("".into()),
            license_plate: Some("".into()),
            ..Default::default()
        });
        assert!(!session.can_proceed());
    }

    #[test]
    fn photo_gate_requires_a_stored_photo() {
        let mut session = OnboardingSession::new();
        session.jump_to(Phase::PhotoUpload);
        assert!(!session.can_proceed());
        session.update_installation_photo(jpeg());
        assert!(session.can_proceed());
    }

    #[test]
    fn csat_gate_requires_a_rating() {
        let mut session = OnboardingSession::new();
        session.jump_to(Phase::Csat);
        assert!(!session.can_proceed());
        session.update_csat(CsatPatch {
            rating: Some(5),
            ..Default::default()
        });
        assert!(session.can_proceed());
    }

    #[test]
    fn instruction_screens_always_proceed() {
        let mut session = OnboardingSession::new();
        for phase in [Phase::Welcome, Phase::Activate, Phase::Locate, Phase::Apply] {
            session.jump_to(phase);
            assert!(session.can_proceed(), "{phase} should proceed freely");
        }
    }
}
