//! Onboarding session — phase sequencing and accumulated form state.
//!
//! The wizard is a fixed linear sequence of nine screens. One
//! [`OnboardingSession`] owns everything collected along the way; the
//! presentation layer reads it and calls its mutators, and the route layer
//! sequences outbound submissions around navigation.

pub mod controller;
pub mod model;
pub mod phase;
pub mod routes;
pub mod store;

pub use controller::OnboardingSession;
pub use model::{CsatData, CsatPatch, VehicleData, VehiclePatch, US_STATES};
pub use phase::{Phase, PHASE_SEQUENCE};
pub use routes::{onboarding_routes, OnboardingRouteState, SessionStatus};
pub use store::SessionStore;
