//! Pure parsing of typed input lines. Prompts re-ask on any error here.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("please enter a number")]
    NotANumber,

    #[error("please choose between {min} and {max}")]
    OutOfRange { min: u32, max: u32 },

    #[error("please enter something")]
    Empty,

    #[error("please answer y or n")]
    NotYesNo,
}

/// A menu choice in `[min, max]`.
pub fn parse_choice(line: &str, min: u32, max: u32) -> Result<u32, InputError> {
    let value: u32 = line.trim().parse().map_err(|_| InputError::NotANumber)?;
    if value < min || value > max {
        return Err(InputError::OutOfRange { min, max });
    }
    Ok(value)
}

/// The first non-blank character of the line.
pub fn parse_char(line: &str) -> Result<char, InputError> {
    line.trim().chars().next().ok_or(InputError::Empty)
}

/// Trimmed text, cut to `max_len` characters.
pub fn parse_text(line: &str, max_len: usize) -> Result<String, InputError> {
    let text: String = line.trim().chars().take(max_len).collect();
    if text.is_empty() {
        return Err(InputError::Empty);
    }
    Ok(text)
}

pub fn parse_yes_no(line: &str) -> Result<bool, InputError> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        _ => Err(InputError::NotYesNo),
    }
}
