//! Runs collaborator calls off the UI thread and hands the results back.
//!
//! Each call writes its result into a shared slot; the app drains the slots at
//! the start of every frame and applies them to the flow.

use std::sync::{Arc, Mutex};

use onboarding::{
    AuthBackend, OnboardingFlow, RegistrationReceipt, RegistrationRequest, SignInRequest, VerifyCodeRequest,
    VerifyCodeResponse,
};

use crate::wasm_utils;

type Slot<T> = Arc<Mutex<Option<onboarding::Result<T>>>>;

#[derive(Default)]
pub struct AsyncBridge {
    registration: Slot<RegistrationReceipt>,
    sign_in: Slot<()>,
    verification: Slot<VerifyCodeResponse>,
}

fn deliver<T>(slot: &Slot<T>, result: onboarding::Result<T>) {
    match slot.lock() {
        Ok(mut guard) => *guard = Some(result),
        Err(_) => log::error!("result slot poisoned, dropping collaborator result"),
    }
}

fn take<T>(slot: &Slot<T>) -> Option<onboarding::Result<T>> {
    slot.lock().ok().and_then(|mut guard| guard.take())
}

impl AsyncBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn_registration(
        &self,
        backend: Arc<dyn AuthBackend>,
        request: RegistrationRequest,
        repaint: egui::Context,
    ) {
        let slot = Arc::clone(&self.registration);
        wasm_utils::spawn_async(async move {
            let result = backend.register(&request).await;
            deliver(&slot, result);
            repaint.request_repaint();
        });
    }

    pub fn spawn_sign_in(&self, backend: Arc<dyn AuthBackend>, request: SignInRequest, repaint: egui::Context) {
        let slot = Arc::clone(&self.sign_in);
        wasm_utils::spawn_async(async move {
            let result = backend.sign_in(&request).await;
            deliver(&slot, result);
            repaint.request_repaint();
        });
    }

    pub fn spawn_verification(
        &self,
        backend: Arc<dyn AuthBackend>,
        request: VerifyCodeRequest,
        repaint: egui::Context,
    ) {
        let slot = Arc::clone(&self.verification);
        wasm_utils::spawn_async(async move {
            let result = backend.verify_code(&request).await;
            deliver(&slot, result);
            repaint.request_repaint();
        });
    }

    /// Apply every finished call to the flow.
    pub fn poll(&self, flow: &mut OnboardingFlow<dyn AuthBackend>) {
        if let Some(result) = take(&self.registration) {
            flow.finish_registration(result);
        }
        if let Some(result) = take(&self.sign_in) {
            flow.finish_sign_in(result);
        }
        if let Some(result) = take(&self.verification) {
            flow.finish_verification(result);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onboarding::{ActiveStep, MockAuthBackend, OnboardingStep};
    use std::time::Duration;

    #[tokio::test]
    async fn spawned_verification_is_applied_on_poll() {
        let backend: Arc<dyn AuthBackend> = Arc::new(MockAuthBackend::new().with_accepted_code("777777"));
        let mut flow: OnboardingFlow<dyn AuthBackend> = OnboardingFlow::new(Arc::clone(&backend));
        flow.set_email("amina@kazi.example");
        flow.set_step(OnboardingStep::VerifyCode);
        if let ActiveStep::VerifyCode(step) = flow.active_mut() {
            step.paste(0, "777777");
        }

        let bridge = AsyncBridge::new();
        let request = flow.begin_verification().expect("remote check expected");
        bridge.spawn_verification(backend, request, egui::Context::default());

        for _ in 0..50 {
            bridge.poll(&mut flow);
            if flow.current_step() == OnboardingStep::Success {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(flow.current_step(), OnboardingStep::Success);
    }
}
