//! Line prompts on stdin.
//!
//! Passwords typed at a terminal are read in raw mode so nothing is echoed.
//! Piped input is read line by line in both cases.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

/// Reads one line from stdin, printing `label` first when interactive.
pub fn read_line(label: &str) -> Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        print!("{label}");
        io::stdout().flush()?;
    }

    let mut input = String::new();
    stdin
        .lock()
        .read_line(&mut input)
        .context("read from stdin")?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

/// Reads a secret, without echo when stdin is a terminal.
pub fn read_password(label: &str) -> Result<String> {
    if !io::stdin().is_terminal() {
        return read_line(label);
    }

    print!("{label}");
    io::stdout().flush()?;

    let input = {
        let _raw = RawModeGuard::enable()?;
        read_masked()?
    };
    println!();
    input.ok_or_else(|| anyhow::anyhow!("Password entry cancelled"))
}

/// Leaves raw mode on drop, including on error paths.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

fn read_masked() -> Result<Option<String>> {
    let mut input = String::new();
    loop {
        if let Event::Key(key) = event::read().context("read key")? {
            match apply_key(&mut input, key) {
                KeyOutcome::Pending => {}
                KeyOutcome::Submit => return Ok(Some(input)),
                KeyOutcome::Cancel => return Ok(None),
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum KeyOutcome {
    Pending,
    Submit,
    Cancel,
}

fn apply_key(input: &mut String, key: KeyEvent) -> KeyOutcome {
    if key.kind != KeyEventKind::Press {
        return KeyOutcome::Pending;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Enter => KeyOutcome::Submit,
        KeyCode::Esc => KeyOutcome::Cancel,
        KeyCode::Char('c' | 'd') if ctrl => KeyOutcome::Cancel,
        KeyCode::Char('u') if ctrl => {
            input.clear();
            KeyOutcome::Pending
        }
        KeyCode::Backspace => {
            input.pop();
            KeyOutcome::Pending
        }
        KeyCode::Char(c) if !ctrl => {
            input.push(c);
            KeyOutcome::Pending
        }
        _ => KeyOutcome::Pending,
    }
}
