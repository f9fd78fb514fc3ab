//! Reads a password from the terminal without echoing it.

use std::io::Write;

use anyhow::{bail, Context};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

/// Leaves raw mode when dropped, including on early returns.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> anyhow::Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

pub fn read_hidden<W: Write>(output: &mut W) -> anyhow::Result<String> {
    let mut secret = String::new();
    {
        let _raw = RawModeGuard::enable()?;
        loop {
            let Event::Key(KeyEvent { code, modifiers, kind, .. }) = event::read()? else {
                continue;
            };
            if kind != KeyEventKind::Press {
                continue;
            }
            let ctrl = modifiers.contains(KeyModifiers::CONTROL);
            match code {
                KeyCode::Enter => break,
                KeyCode::Char('c') | KeyCode::Char('d') if ctrl => bail!("password entry cancelled"),
                KeyCode::Esc => bail!("password entry cancelled"),
                KeyCode::Backspace => {
                    secret.pop();
                }
                KeyCode::Char(c) if !ctrl => secret.push(c),
                _ => {}
            }
        }
    }
    writeln!(output)?;
    Ok(secret)
}
