//! Line-oriented driver feeding [`Command`]s into a [`ModeSet`].

use anyhow::{anyhow, Result};
use std::io::{BufRead, Write};
use tracing::warn;

use crate::command::{Command, HELP_TEXT};
use crate::config::Config;
use crate::modeset::{ModeSet, Outcome};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Print the configured prompt before reading each line
    pub interactive: bool,
    /// Stop at the first failing line instead of reporting and continuing
    pub strict: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub executed: usize,
    pub failed: usize,
}

/// Read commands line by line until EOF or `quit`.
///
/// Blank lines and lines starting with `#` are skipped.
pub fn run<R: BufRead, W: Write>(
    set: &mut ModeSet,
    config: &Config,
    input: R,
    output: &mut W,
    options: RunOptions,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();
    let mut lines = input.lines();

    loop {
        if options.interactive {
            write!(output, "{}", config.prompt)?;
            output.flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        summary.executed += 1;
        let result = trimmed
            .parse::<Command>()
            .map_err(|e| anyhow!(e))
            .and_then(|command| set.apply(&command).map_err(|e| anyhow!(e)));

        match result {
            Ok(Outcome::Quit) => break,
            Ok(outcome) => report(&outcome, config, output)?,
            Err(e) => {
                summary.failed += 1;
                warn!(line = %trimmed, "command failed: {}", e);
                if options.strict {
                    return Err(e.context(format!("line {}: {}", summary.executed, trimmed)));
                }
                writeln!(output, "error: {}", e)?;
            }
        }
    }

    Ok(summary)
}

fn report<W: Write>(outcome: &Outcome, config: &Config, output: &mut W) -> Result<()> {
    match outcome {
        Outcome::Changed { name, current } => {
            if config.report_changes {
                writeln!(output, "{} -> {}", name, current)?;
            }
        }
        Outcome::Defined { name, replaced } => {
            if *replaced {
                writeln!(output, "redefined {}", name)?;
            }
        }
        Outcome::Removed(name) => writeln!(output, "removed {}", name)?,
        Outcome::ResetAll(count) => {
            if config.report_changes {
                writeln!(output, "reset {} mode(s)", count)?;
            }
        }
        Outcome::Listing(lines) => {
            for line in lines {
                writeln!(output, "{}", line)?;
            }
        }
        Outcome::Help => writeln!(output, "{}", HELP_TEXT)?,
        Outcome::Described(_) | Outcome::Quit => {}
    }
    Ok(())
}
