//! In-process backend used for offline runs and tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::client::{
    simulate_latency, AuthBackend, HttpAuthBackend, RegistrationReceipt, VerifyCodeRequest, VerifyCodeResponse,
};
use crate::config::ApiConfig;
use crate::error::{OnboardingError, Result};
use crate::forms::{RegistrationRequest, SignInRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Register { email: String },
    VerifyCode { email: String, code: String },
    SignIn { email: String },
}

/// How the mock answers a registration.
#[derive(Debug, Clone)]
pub enum RegisterBehavior {
    Accept { user_id: Option<String> },
    Reject { message: Option<String> },
    /// Fails like an unreachable server would.
    Unreachable,
}

pub struct MockAuthBackend {
    accepted_code: String,
    register: RegisterBehavior,
    latency: Duration,
    calls: Mutex<Vec<MockCall>>,
}

impl Default for MockAuthBackend {
    fn default() -> Self {
        Self {
            accepted_code: "654321".to_string(),
            register: RegisterBehavior::Accept {
                user_id: Some("usr_mock_0001".to_string()),
            },
            latency: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl MockAuthBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accepted_code(mut self, code: impl Into<String>) -> Self {
        self.accepted_code = code.into();
        self
    }

    pub fn with_register(mut self, behavior: RegisterBehavior) -> Self {
        self.register = behavior;
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn accepted_code(&self) -> &str {
        &self.accepted_code
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: MockCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

/// Pick the collaborator for a run: the mock when `offline` is set, the HTTP
/// backend otherwise.
pub fn connect(config: &ApiConfig) -> Result<Arc<dyn AuthBackend>> {
    if config.offline {
        let mock = MockAuthBackend::new().with_latency(Duration::from_millis(config.sign_in_delay_ms));
        tracing::info!(code = %mock.accepted_code(), "offline mode, using the in-process backend");
        return Ok(Arc::new(mock));
    }
    let backend = HttpAuthBackend::new(config)?;
    tracing::info!(base_url = %backend.base_url(), "using the HTTP backend");
    Ok(Arc::new(backend))
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AuthBackend for MockAuthBackend {
    async fn register(&self, request: &RegistrationRequest) -> Result<RegistrationReceipt> {
        self.record(MockCall::Register {
            email: request.email.clone(),
        });
        simulate_latency(self.latency).await;

        match &self.register {
            RegisterBehavior::Accept { user_id } => Ok(RegistrationReceipt {
                user_id: user_id.clone(),
                message: Some("Registration successful".to_string()),
            }),
            RegisterBehavior::Reject { message } => Err(OnboardingError::Rejected {
                message: message.clone(),
            }),
            RegisterBehavior::Unreachable => Err(OnboardingError::Status {
                status: 503,
                message: None,
            }),
        }
    }

    async fn verify_code(&self, request: &VerifyCodeRequest) -> Result<VerifyCodeResponse> {
        self.record(MockCall::VerifyCode {
            email: request.email.clone(),
            code: request.code.clone(),
        });
        simulate_latency(self.latency).await;

        if request.code == self.accepted_code {
            Ok(VerifyCodeResponse {
                success: true,
                message: None,
            })
        } else {
            Ok(VerifyCodeResponse {
                success: false,
                message: Some("The code you entered is incorrect".to_string()),
            })
        }
    }

    async fn sign_in(&self, request: &SignInRequest) -> Result<()> {
        self.record(MockCall::SignIn {
            email: request.email.clone(),
        });
        simulate_latency(self.latency).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn offline_config_connects_to_the_mock() {
        let config = ApiConfig {
            offline: true,
            sign_in_delay_ms: 0,
            ..ApiConfig::default()
        };
        let backend = connect(&config).unwrap();

        let wrong = backend
            .verify_code(&VerifyCodeRequest {
                email: "amina@kazi.example".to_string(),
                code: "000000".to_string(),
            })
            .await
            .unwrap();
        assert!(!wrong.success);

        let right = backend
            .verify_code(&VerifyCodeRequest {
                email: "amina@kazi.example".to_string(),
                code: "654321".to_string(),
            })
            .await
            .unwrap();
        assert!(right.success);
    }

    #[tokio::test]
    async fn unreachable_register_is_a_network_failure() {
        let mock = MockAuthBackend::new().with_register(RegisterBehavior::Unreachable);
        let request = RegistrationRequest {
            first_name: "Amina".to_string(),
            last_name: "Otieno".to_string(),
            email: "amina@kazi.example".to_string(),
            password: "Str0ng!pass".to_string(),
        };

        let err = mock.register(&request).await.unwrap_err();
        assert!(err.is_network());
        assert!(matches!(err, OnboardingError::Status { status: 503, .. }));
        assert_eq!(
            mock.calls(),
            vec![MockCall::Register {
                email: "amina@kazi.example".to_string()
            }]
        );
    }
}
