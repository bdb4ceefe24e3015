//! Interactive collection of color groups
//!
//! Reads one comma-separated group per line until an empty line. Works with
//! any reader, so piped stdin behaves the same as a terminal. Prompt text and
//! error lines go to separate writers, so a caller can hide the prompts while
//! still reporting rejected input.

use std::io::{self, BufRead, Write};
use thiserror::Error;

use crate::group::{parse_group, ColorGroup};

/// Error type for interactive input
#[derive(Debug, Error)]
pub enum PromptError {
    /// Input ended before any group was entered
    #[error("input cancelled before any color group was entered")]
    Cancelled,
    /// Reading or writing the terminal failed
    #[error("prompt I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Ask for color groups until an empty line is entered.
///
/// - An empty line before the first group asks again.
/// - An invalid line prints the problem and asks for the same group again.
/// - End of input finishes if at least one group was entered.
pub fn collect_groups<R: BufRead, W: Write, E: Write>(
    mut reader: R,
    mut writer: W,
    mut errors: E,
) -> Result<Vec<ColorGroup>, PromptError> {
    let mut groups = Vec::new();
    let mut line = String::new();

    loop {
        write!(
            writer,
            "Enter comma-separated hex colors for cycle group {} (e.g. #FF0000,#00FF00,#0000FF).\n\
             Press Enter with no input to finish: ",
            groups.len() + 1
        )?;
        writer.flush()?;

        line.clear();
        if reader.read_line(&mut line)? == 0 {
            writeln!(writer)?;
            if groups.is_empty() {
                return Err(PromptError::Cancelled);
            }
            writeln!(writer, "Input ended, continuing with {} group(s).", groups.len())?;
            return Ok(groups);
        }

        let input = line.trim();
        if input.is_empty() {
            if groups.is_empty() {
                writeln!(errors, "Error: at least one color group must be provided.")?;
                continue;
            }
            return Ok(groups);
        }

        match parse_group(input) {
            Ok(group) => groups.push(group),
            Err(e) => {
                writeln!(errors, "Error: {}", e)?;
                writeln!(writer, "Please use #RRGGBB or RRGGBB format, at least 2 colors per group.")?;
            }
        }
    }
}
