use std::sync::Arc;

use eframe::egui;
use onboarding::{ActiveStep, AuthBackend, Config, OnboardingFlow, OnboardingStep};

use crate::bridge::AsyncBridge;
use crate::ui::{self, UiIntent};
use crate::wasm_utils;

/// Windows at least this wide show the welcome panel beside the register form.
const WIDE_LAYOUT_MIN_WIDTH: f32 = 1024.0;
const FORM_MAX_WIDTH: f32 = 420.0;

/// KAZI onboarding window
pub struct OnboardingApp {
    flow: OnboardingFlow<dyn AuthBackend>,
    bridge: AsyncBridge,
    config: Config,
}

impl OnboardingApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: Config, backend: Arc<dyn AuthBackend>) -> Self {
        wasm_utils::set_panic_hook();
        log::info!("starting {} onboarding", config.application.name);

        Self {
            flow: OnboardingFlow::new(backend),
            bridge: AsyncBridge::new(),
            config,
        }
    }

    fn apply(&mut self, intent: UiIntent, ctx: &egui::Context) {
        log::debug!("ui intent: {:?}", intent);
        match intent {
            UiIntent::SubmitSignUp => {
                if let Some(request) = self.flow.begin_registration() {
                    self.bridge
                        .spawn_registration(Arc::clone(self.flow.backend()), request, ctx.clone());
                }
            }
            UiIntent::SubmitSignIn => {
                if let Some(request) = self.flow.begin_sign_in() {
                    self.bridge
                        .spawn_sign_in(Arc::clone(self.flow.backend()), request, ctx.clone());
                }
            }
            UiIntent::SubmitCode => {
                if let Some(request) = self.flow.begin_verification() {
                    self.bridge
                        .spawn_verification(Arc::clone(self.flow.backend()), request, ctx.clone());
                }
            }
            UiIntent::ResendCode => {
                self.flow.resend_code();
            }
            UiIntent::EnterCode => self.flow.set_step(OnboardingStep::VerifyCode),
            UiIntent::JumpTo(step) => self.flow.jump_to(step),
        }
    }

    fn progress_bar(&self, ui: &mut egui::Ui) {
        let step = self.flow.current_step();
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.strong(self.config.application.name.as_str());
            ui.separator();
            ui.add(
                egui::ProgressBar::new(step.progress_percentage() as f32 / 100.0)
                    .text(format!("{} ({}%)", step.label(), step.progress_percentage())),
            );
        });
        ui.add_space(6.0);
    }
}

impl eframe::App for OnboardingApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.bridge.poll(&mut self.flow);

        egui::TopBottomPanel::top("progress").show(ctx, |ui| self.progress_bar(ui));

        let width = ctx.screen_rect().width();
        if width >= WIDE_LAYOUT_MIN_WIDTH && self.flow.current_step() == OnboardingStep::Register {
            egui::SidePanel::left("hero")
                .resizable(false)
                .exact_width(width / 2.0)
                .show(ctx, ui::register::hero);
        }

        let email = self.flow.session().email().to_owned();
        let flow = &mut self.flow;
        let intent = egui::CentralPanel::default()
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .show(ui, |ui| {
                        ui.set_max_width(FORM_MAX_WIDTH);
                        match flow.active_mut() {
                            ActiveStep::Register(step) => ui::register::show(ui, step),
                            ActiveStep::VerifyEmail => ui::verify_email::show(ui, &email),
                            ActiveStep::VerifyCode(step) => ui::verify_code::show(ui, step, &email),
                            ActiveStep::Success => {
                                ui::success::show(ui, &email);
                                None
                            }
                        }
                    })
                    .inner
            })
            .inner;

        if let ActiveStep::Register(step) = self.flow.active_mut() {
            ui::register::show_alert(ctx, step);
        }

        let jump = if self.config.application.dev_tools {
            ui::step_tester::show(ctx, self.flow.current_step())
        } else {
            None
        };

        for intent in [intent, jump].into_iter().flatten() {
            self.apply(intent, ctx);
        }
    }
}
