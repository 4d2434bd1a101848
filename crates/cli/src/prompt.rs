//! The pre-execution confirmation prompt.
//!
//! Anything that changes files asks first unless `--yes` was given. When
//! stdin is not a terminal there is nobody to ask, so the answer is a
//! distinct refusal rather than a hang on a closed pipe.

use std::io::{self, BufRead, Write};

use is_terminal::IsTerminal;

/// Outcome of asking the operator whether to proceed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Confirmation {
    Proceed,
    Declined,
    /// Stdin is not a terminal and `--yes` was absent.
    NotInteractive,
}

pub(crate) fn confirm<Out>(stdout: &mut Out, assume_yes: bool) -> Confirmation
where
    Out: Write,
{
    if assume_yes {
        return Confirmation::Proceed;
    }
    if !io::stdin().is_terminal() {
        return Confirmation::NotInteractive;
    }

    if write!(stdout, "run? [y/N] ").is_err() || stdout.flush().is_err() {
        return Confirmation::Declined;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return Confirmation::Declined;
    }

    let answer = answer.trim();
    if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") {
        Confirmation::Proceed
    } else {
        Confirmation::Declined
    }
}
