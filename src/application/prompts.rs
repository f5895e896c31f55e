//! Validation rules for what the user types at the prompts.

use crate::domain::entities::DEFAULT_PORT;
use std::num::{IntErrorKind, ParseIntError};
use thiserror::Error;

/// Why a menu answer was rejected. The messages are shown to the user as-is.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Invalid input. Please enter a number.")]
    NotANumber,
    #[error("Invalid number. Please try again.")]
    OutOfRange,
}

/// Turns a 1-based menu answer into a 0-based index into a list of `count` items.
pub fn parse_selection(input: &str, count: usize) -> Result<usize, SelectionError> {
    let choice: i64 = input.trim().parse().map_err(|e: ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => SelectionError::OutOfRange,
        _ => SelectionError::NotANumber,
    })?;
    if choice < 1 || choice as u64 > count as u64 {
        return Err(SelectionError::OutOfRange);
    }
    Ok(choice as usize - 1)
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Invalid port. Please enter a number between 1 and 65535.")]
pub struct InvalidPort;

/// Parses the port prompt. An empty answer means the default listener port.
pub fn parse_port(input: &str) -> Result<u16, InvalidPort> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(DEFAULT_PORT);
    }
    match trimmed.parse::<u16>() {
        Ok(0) | Err(_) => Err(InvalidPort),
        Ok(port) => Ok(port),
    }
}
