use std::io::{self, IsTerminal};

use clap::{Parser, Subcommand};
use onboarding::{Config, OnboardingFlow, OnboardingStep, PasswordPolicy, VerifyStart};
use tracing_subscriber::EnvFilter;

mod secret;
mod terminal;

use terminal::{Outcome, Terminal};

#[derive(Parser)]
#[command(name = "kazi-onboarding", version, about = "KAZI account onboarding from the terminal")]
struct Cli {
    /// Base URL of the auth API (overrides config.toml and KAZI_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Use the in-process backend instead of the network
    #[arg(long)]
    offline: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Sign up or sign in, then verify the emailed code (default)
    Run,
    /// Show which password rules a candidate password meets
    CheckPassword { password: String },
    /// Verify a code for an already registered email
    Verify {
        #[arg(long)]
        email: String,
        code: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    config.api.offline |= cli.offline;

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            let backend = onboarding::connect(&config.api)?;
            let mut flow = OnboardingFlow::new(backend);
            let stdin = io::stdin();
            let hide = stdin.is_terminal();
            let mut terminal = Terminal::new(stdin.lock(), io::stdout()).hide_secrets(hide);
            match terminal.run(&mut flow).await? {
                Outcome::Verified { email, user_id } => {
                    tracing::info!(%email, user_id = ?user_id, "onboarding complete");
                }
                Outcome::SignedIn { email } => tracing::info!(%email, "signed in"),
            }
        }
        Command::CheckPassword { password } => {
            let policy = PasswordPolicy::evaluate(&password);
            for (label, ok) in policy.checks() {
                println!("[{}] {}", if ok { "x" } else { " " }, label);
            }
            if !policy.is_satisfied() {
                anyhow::bail!("password does not meet the requirements");
            }
        }
        Command::Verify { email, code } => {
            let backend = onboarding::connect(&config.api)?;
            let mut flow = OnboardingFlow::new(backend);
            flow.set_email(email);
            flow.set_step(OnboardingStep::VerifyCode);
            if let onboarding::ActiveStep::VerifyCode(step) = flow.active_mut() {
                if !step.paste(0, &code) {
                    anyhow::bail!("verification codes are digits only");
                }
            }

            let start = flow.submit_code().await;
            if flow.current_step() == OnboardingStep::Success {
                if matches!(start, Some(VerifyStart::Bypassed)) {
                    println!("Bypass code accepted.");
                }
                println!("{} verified.", flow.session().email());
            } else {
                let error = match flow.active() {
                    onboarding::ActiveStep::VerifyCode(step) => step.error().map(str::to_owned),
                    _ => None,
                };
                anyhow::bail!(error.unwrap_or_else(|| "verification failed".to_string()));
            }
        }
    }

    Ok(())
}
