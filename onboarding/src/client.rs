//! Collaborators the flow talks to: account registration, code verification
//! and sign-in.

use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::config::ApiConfig;
use crate::error::{OnboardingError, Result};
use crate::forms::{RegistrationRequest, SignInRequest};

pub const REGISTER_PATH: &str = "/api/auth/register";
pub const VERIFY_CODE_PATH: &str = "/api/auth/verify-code";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifyCodeRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifyCodeResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// What the flow keeps from an accepted registration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationReceipt {
    pub user_id: Option<String>,
    pub message: Option<String>,
}

/// Registration replies come in two shapes: `{success, message}` and
/// `{ok, data}`. Both are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterResponse {
    success: Option<bool>,
    ok: Option<bool>,
    message: Option<String>,
    user_id: Option<String>,
    data: Option<serde_json::Value>,
}

impl RegisterResponse {
    fn accepted(&self) -> bool {
        self.success != Some(false) && self.ok != Some(false)
    }

    fn user_id(&self) -> Option<String> {
        if let Some(id) = &self.user_id {
            return Some(id.clone());
        }
        let data = self.data.as_ref()?;
        ["userId", "id"].iter().find_map(|key| match data.get(*key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait AuthBackend: Send + Sync {
    async fn register(&self, request: &RegistrationRequest) -> Result<RegistrationReceipt>;

    async fn verify_code(&self, request: &VerifyCodeRequest) -> Result<VerifyCodeResponse>;

    async fn sign_in(&self, request: &SignInRequest) -> Result<()>;
}

pub(crate) async fn simulate_latency(delay: Duration) {
    if delay.is_zero() {
        return;
    }
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(delay).await;
    #[cfg(target_arch = "wasm32")]
    gloo::timers::future::sleep(delay).await;
}

/// Talks to the auth API over HTTP.
pub struct HttpAuthBackend {
    base_url: String,
    client: reqwest::Client,
    sign_in_delay: Duration,
}

impl HttpAuthBackend {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs));

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
            sign_in_delay: Duration::from_millis(config.sign_in_delay_ms),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_request<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: &T,
    ) -> Result<R> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(%url, "POST");

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body).ok().and_then(|b| b.message);
            tracing::warn!(%url, status = status.as_u16(), "request failed");
            return Err(OnboardingError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AuthBackend for HttpAuthBackend {
    async fn register(&self, request: &RegistrationRequest) -> Result<RegistrationReceipt> {
        let response: RegisterResponse = self.post_request(REGISTER_PATH, request).await?;
        if !response.accepted() {
            return Err(OnboardingError::Rejected {
                message: response.message,
            });
        }
        Ok(RegistrationReceipt {
            user_id: response.user_id(),
            message: response.message,
        })
    }

    async fn verify_code(&self, request: &VerifyCodeRequest) -> Result<VerifyCodeResponse> {
        self.post_request(VERIFY_CODE_PATH, request).await
    }

    // No sign-in endpoint exists yet; this only simulates the round trip.
    async fn sign_in(&self, request: &SignInRequest) -> Result<()> {
        tracing::info!(email = %request.email, "sign-in requested (stub)");
        simulate_latency(self.sign_in_delay).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> RegisterResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn both_reply_shapes_are_accepted() {
        assert!(parse(r#"{"success": true}"#).accepted());
        assert!(parse(r#"{"ok": true, "data": {"id": "u1"}}"#).accepted());
        assert!(parse("{}").accepted());
        assert!(!parse(r#"{"success": false, "message": "taken"}"#).accepted());
        assert!(!parse(r#"{"ok": false}"#).accepted());
    }

    #[test]
    fn user_id_is_found_in_either_shape() {
        assert_eq!(parse(r#"{"userId": "abc"}"#).user_id(), Some("abc".into()));
        assert_eq!(parse(r#"{"ok": true, "data": {"userId": "xyz"}}"#).user_id(), Some("xyz".into()));
        assert_eq!(parse(r#"{"ok": true, "data": {"id": 17}}"#).user_id(), Some("17".into()));
        assert_eq!(parse(r#"{"ok": true, "data": {}}"#).user_id(), None);
    }

    #[test]
    fn verify_response_message_is_optional() {
        let resp: VerifyCodeResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert_eq!(resp, VerifyCodeResponse { success: false, message: None });
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let config = ApiConfig {
            base_url: "http://localhost:3000/".into(),
            ..ApiConfig::default()
        };
        let backend = HttpAuthBackend::new(&config).unwrap();
        assert_eq!(backend.base_url(), "http://localhost:3000");
    }

    #[tokio::test]
    async fn sign_in_stub_always_succeeds() {
        let config = ApiConfig {
            sign_in_delay_ms: 0,
            ..ApiConfig::default()
        };
        let backend = HttpAuthBackend::new(&config).unwrap();
        let request = SignInRequest {
            email: "johndoe".into(),
            password: "12344".into(),
            remember_me: false,
        };
        assert!(backend.sign_in(&request).await.is_ok());
    }

    #[tokio::test]
    async fn sign_in_stub_waits_the_configured_delay() {
        let config = ApiConfig {
            sign_in_delay_ms: 50,
            ..ApiConfig::default()
        };
        let backend = HttpAuthBackend::new(&config).unwrap();
        let request = SignInRequest {
            email: "johndoe".into(),
            password: "12344".into(),
            remember_me: false,
        };

        let started = std::time::Instant::now();
        backend.sign_in(&request).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(50));
    }
}
