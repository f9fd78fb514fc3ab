//! Line-oriented driver for the onboarding flow.

use std::fmt::Display;
use std::io::{BufRead, Write};

use anyhow::bail;
use onboarding::{ActiveStep, AuthBackend, AuthTab, OnboardingFlow, OnboardingStep, VerifyStart};

use crate::secret;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Verified { email: String, user_id: Option<String> },
    SignedIn { email: String },
}

pub struct Terminal<R, W> {
    input: R,
    output: W,
    hide_secrets: bool,
}

fn yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            hide_secrets: false,
        }
    }

    /// Read passwords straight from the console with echo off. Only
    /// meaningful when the input is an interactive terminal.
    pub fn hide_secrets(mut self, hide: bool) -> Self {
        self.hide_secrets = hide;
        self
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output
    }

    fn say(&mut self, line: impl Display) -> anyhow::Result<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    fn prompt(&mut self, label: &str) -> anyhow::Result<String> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("input closed before onboarding finished");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn prompt_secret(&mut self, label: &str) -> anyhow::Result<String> {
        if !self.hide_secrets {
            return self.prompt(label);
        }
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;
        secret::read_hidden(&mut self.output)
    }

    /// Drive the flow until the code is verified or the user signs in.
    pub async fn run<B>(&mut self, flow: &mut OnboardingFlow<B>) -> anyhow::Result<Outcome>
    where
        B: AuthBackend + ?Sized,
    {
        loop {
            let step = flow.current_step();
            self.say(format!("\n== {} ({}%) ==", step.label(), step.progress_percentage()))?;

            match step {
                OnboardingStep::Register => {
                    let choice = self.prompt("Sign up or sign in? [up/in]")?;
                    if matches!(choice.trim(), "in" | "sign in") {
                        if let Some(email) = self.sign_in(flow).await? {
                            return Ok(Outcome::SignedIn { email });
                        }
                    } else {
                        self.sign_up(flow).await?;
                    }
                }
                OnboardingStep::VerifyEmail => {
                    self.say(format!("A new code is on its way to {}.", flow.session().email()))?;
                    self.prompt("Press Enter to type the code")?;
                    flow.set_step(OnboardingStep::VerifyCode);
                }
                OnboardingStep::VerifyCode => self.enter_code(flow).await?,
                OnboardingStep::Success => {
                    let email = flow.session().email().to_string();
                    self.say(format!("Account created. {} has been verified.", email))?;
                    return Ok(Outcome::Verified {
                        email,
                        user_id: flow.session().user_id().map(str::to_string),
                    });
                }
            }
        }
    }

    async fn sign_up<B>(&mut self, flow: &mut OnboardingFlow<B>) -> anyhow::Result<()>
    where
        B: AuthBackend + ?Sized,
    {
        let ActiveStep::Register(step) = flow.active_mut() else {
            return Ok(());
        };
        step.select_tab(AuthTab::SignUp);

        step.draft.first_name = self.prompt("First name")?;
        step.draft.last_name = self.prompt("Last name")?;
        step.draft.email = self.prompt("Email")?;
        step.draft.password = self.prompt_secret("Password")?;
        step.touch_password();
        if step.shows_password_checks() {
            for (label, ok) in step.draft.password_policy().checks() {
                self.say(format!("  [{}] {}", if ok { "x" } else { " " }, label))?;
            }
        }
        step.draft.confirm_password = self.prompt_secret("Confirm password")?;
        if step.draft.shows_mismatch() {
            self.say("Passwords do not match")?;
        }
        step.draft.agree_to_terms = yes(&self.prompt("I agree to terms & conditions [y/N]")?);

        if !step.can_submit_sign_up() {
            self.say("The form is incomplete, please start again.")?;
            step.draft.clear();
            return Ok(());
        }

        self.say("Creating Account...")?;
        if flow.submit_registration().await == Some(true) {
            self.say(format!("We sent a 6-digit code to {}.", flow.session().email()))?;
            return Ok(());
        }

        if let ActiveStep::Register(step) = flow.active_mut() {
            if let Some(alert) = step.alert().map(str::to_owned) {
                step.dismiss_alert();
                self.say(format!("Registration failed: {}", alert))?;
            }
        }
        Ok(())
    }

    async fn sign_in<B>(&mut self, flow: &mut OnboardingFlow<B>) -> anyhow::Result<Option<String>>
    where
        B: AuthBackend + ?Sized,
    {
        let ActiveStep::Register(step) = flow.active_mut() else {
            return Ok(None);
        };
        step.select_tab(AuthTab::SignIn);

        step.sign_in.email = self.prompt("Email")?;
        step.sign_in.password = self.prompt_secret("Password")?;
        step.sign_in.remember_me = yes(&self.prompt("Remember me [y/N]")?);
        step.on_sign_in_changed();

        if !step.can_submit_sign_in() {
            self.say("Email and password are required.")?;
            return Ok(None);
        }
        let email = step.sign_in.email.clone();

        self.say("Signing In...")?;
        if flow.submit_sign_in().await == Some(true) {
            self.say(format!("Signed in as {}.", email))?;
            return Ok(Some(email));
        }

        if let ActiveStep::Register(step) = flow.active() {
            if let Some(error) = step.sign_in_error().map(str::to_owned) {
                self.say(error)?;
            }
        }
        Ok(None)
    }

    async fn enter_code<B>(&mut self, flow: &mut OnboardingFlow<B>) -> anyhow::Result<()>
    where
        B: AuthBackend + ?Sized,
    {
        let label = format!("Code sent to {} ('resend' or 'restart')", flow.session().email());
        let entry = self.prompt(&label)?;

        match entry.trim() {
            "resend" => {
                flow.resend_code();
            }
            "restart" => flow.reset_onboarding(),
            text => {
                let accepted = match flow.active_mut() {
                    ActiveStep::VerifyCode(step) => step.paste(0, text),
                    _ => false,
                };
                if !accepted {
                    self.say("Verification codes are digits only.")?;
                    return Ok(());
                }

                if flow.submit_code().await == Some(VerifyStart::Bypassed) {
                    self.say("Bypass code accepted.")?;
                }
                if let ActiveStep::VerifyCode(step) = flow.active() {
                    if let Some(error) = step.error().map(str::to_owned) {
                        self.say(error)?;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::Arc;

    use onboarding::mock::{MockCall, RegisterBehavior};
    use onboarding::MockAuthBackend;

    const SIGN_UP: &str = "up\nAmina\nOtieno\namina@kazi.example\nStr0ng!pass\nStr0ng!pass\ny\n";

    async fn drive(backend: MockAuthBackend, script: &str) -> (anyhow::Result<Outcome>, String, Arc<MockAuthBackend>) {
        let backend = Arc::new(backend);
        let mut flow = OnboardingFlow::new(Arc::clone(&backend));
        let mut terminal = Terminal::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        let outcome = terminal.run(&mut flow).await;
        let output = String::from_utf8(terminal.into_output()).unwrap();
        (outcome, output, backend)
    }

    #[tokio::test]
    async fn sign_up_then_wrong_then_right_code() {
        let script = format!("{}111111\n654321\n", SIGN_UP);
        let (outcome, output, backend) = drive(MockAuthBackend::new(), &script).await;

        assert_eq!(
            outcome.unwrap(),
            Outcome::Verified {
                email: "amina@kazi.example".to_string(),
                user_id: Some("usr_mock_0001".to_string()),
            }
        );
        assert!(output.contains("[x] Includes one uppercase"));
        assert!(output.contains("The code you entered is incorrect"));
        assert_eq!(backend.calls().len(), 3);
    }

    #[tokio::test]
    async fn bypass_code_skips_the_backend() {
        let script = format!("{}123456\n", SIGN_UP);
        let (outcome, output, backend) = drive(MockAuthBackend::new(), &script).await;

        assert!(matches!(outcome.unwrap(), Outcome::Verified { .. }));
        assert!(output.contains("Bypass code accepted."));
        assert!(!backend.calls().iter().any(|c| matches!(c, MockCall::VerifyCode { .. })));
    }

    #[tokio::test]
    async fn short_code_asks_for_all_digits() {
        let script = format!("{}123\n654321\n", SIGN_UP);
        let (outcome, output, _) = drive(MockAuthBackend::new(), &script).await;

        assert!(outcome.is_ok());
        assert!(output.contains("Please enter all 6 digits"));
    }

    #[tokio::test]
    async fn resend_goes_through_verify_email() {
        let script = format!("{}resend\n\n654321\n", SIGN_UP);
        let (outcome, output, _) = drive(MockAuthBackend::new(), &script).await;

        assert!(outcome.is_ok());
        assert!(output.contains("== Verify Email (50%) =="));
        assert!(output.contains("A new code is on its way to amina@kazi.example."));
    }

    #[tokio::test]
    async fn rejected_registration_reports_and_retries() {
        let backend = MockAuthBackend::new().with_register(RegisterBehavior::Reject {
            message: Some("Email already registered".to_string()),
        });
        let (outcome, output, _) = drive(backend, SIGN_UP).await;

        assert!(output.contains("Registration failed: Email already registered"));
        // The script runs out while back on the register step.
        assert!(outcome.is_err());
    }

    #[tokio::test]
    async fn weak_password_is_not_submitted() {
        let script = "up\nAmina\nOtieno\namina@kazi.example\nweak\nweak\ny\n";
        let (outcome, output, backend) = drive(MockAuthBackend::new(), script).await;

        assert!(outcome.is_err());
        assert!(output.contains("[ ] At least 8 characters"));
        assert!(output.contains("The form is incomplete"));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn sign_in_finishes_the_session() {
        let script = "in\nwanjiru@kazi.example\nsecret\ny\n";
        let (outcome, _, backend) = drive(MockAuthBackend::new(), script).await;

        assert_eq!(
            outcome.unwrap(),
            Outcome::SignedIn {
                email: "wanjiru@kazi.example".to_string()
            }
        );
        assert_eq!(
            backend.calls(),
            vec![MockCall::SignIn {
                email: "wanjiru@kazi.example".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn passwords_are_never_written_back() {
        let script = format!("{}654321\n", SIGN_UP);
        let (outcome, output, _) = drive(MockAuthBackend::new(), &script).await;

        assert!(outcome.is_ok());
        assert!(!output.contains("Str0ng!pass"));
    }
}
