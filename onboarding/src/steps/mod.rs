//! View models for each onboarding step. They hold the step-local state and
//! the submit logic; rendering lives in the front ends.

pub mod register;
pub mod verify_code;

pub use register::{RegisterStep, SignUpOutcome};
pub use verify_code::{VerifyCodeStep, VerifyStart};
