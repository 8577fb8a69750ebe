//! Interactive prompts.
//!
//! Cancelling (Esc) and submitting nothing are ordinary outcomes here, not
//! errors: every prompt returns a [`Prompt`] and the caller decides what an
//! empty or cancelled answer means. When stdin is not a terminal, text and
//! passwords are read as one line from stdin so scripts can pipe them in.

use std::io::{self, BufRead, IsTerminal};

use dialoguer::{Confirm, Input, Password, Select};
use zeroize::Zeroizing;

use crate::error::Result;

/// Outcome of one prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt<T> {
    Value(T),
    Cancelled,
    Empty,
}

impl<T> Prompt<T> {
    /// The value, if one was given.
    pub fn value(self) -> Option<T> {
        match self {
            Prompt::Value(v) => Some(v),
            _ => None,
        }
    }
}

fn interactive() -> bool {
    io::stdin().is_terminal()
}

fn read_line() -> Result<Prompt<String>> {
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(Prompt::Cancelled);
    }
    let line = line.trim_end_matches(['\r', '\n']).to_string();
    Ok(if line.is_empty() {
        Prompt::Empty
    } else {
        Prompt::Value(line)
    })
}

/// One line of visible text.
pub fn text(prompt: &str) -> Result<Prompt<String>> {
    if !interactive() {
        return read_line();
    }
    let answer: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(if answer.trim().is_empty() {
        Prompt::Empty
    } else {
        Prompt::Value(answer)
    })
}

/// Hidden input.
pub fn password(prompt: &str) -> Result<Prompt<Zeroizing<String>>> {
    if !interactive() {
        return Ok(match read_line()? {
            Prompt::Value(v) => Prompt::Value(Zeroizing::new(v)),
            Prompt::Empty => Prompt::Empty,
            Prompt::Cancelled => Prompt::Cancelled,
        });
    }
    let answer = Zeroizing::new(
        Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()?,
    );
    Ok(if answer.is_empty() {
        Prompt::Empty
    } else {
        Prompt::Value(answer)
    })
}

/// Pick one of `items`. Esc cancels.
pub fn select<T: ToString>(prompt: &str, items: &[T]) -> Result<Prompt<usize>> {
    if items.is_empty() {
        return Ok(Prompt::Empty);
    }
    if !interactive() {
        return Ok(Prompt::Cancelled);
    }
    let choice = Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact_opt()?;
    Ok(match choice {
        Some(i) => Prompt::Value(i),
        None => Prompt::Cancelled,
    })
}

/// Yes/no, defaulting to no. Non-interactive runs answer no.
pub fn confirm(prompt: &str) -> Result<bool> {
    if !interactive() {
        return Ok(false);
    }
    let answer = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact_opt()?;
    Ok(answer.unwrap_or(false))
}
