//! Headless core of the KAZI account onboarding flow: the step state machine,
//! form validation, verification code entry and the auth collaborators.

pub mod actions;
pub mod client;
pub mod code;
pub mod config;
pub mod error;
pub mod flow;
pub mod forms;
pub mod mock;
pub mod state;
pub mod steps;
pub mod validation;

pub use actions::OnboardingAction;
pub use client::{AuthBackend, HttpAuthBackend, RegistrationReceipt, VerifyCodeRequest, VerifyCodeResponse};
pub use code::{CodeEdit, VerificationCode, BYPASS_CODE, CODE_LENGTH};
pub use config::Config;
pub use error::{OnboardingError, Result};
pub use flow::{ActiveStep, OnboardingFlow};
pub use forms::{AuthTab, RegistrationDraft, RegistrationRequest, SignInDraft, SignInRequest};
pub use mock::{connect, MockAuthBackend};
pub use state::{OnboardingSession, OnboardingStep};
pub use steps::{RegisterStep, SignUpOutcome, VerifyCodeStep, VerifyStart};
pub use validation::PasswordPolicy;
