//! The file-backed counter.
//!
//! The file holds a single non-negative integer as plain decimal text, of
//! any size. Each update reads it, adds one and overwrites the file. A
//! missing file starts the count at 1; content that does not parse also
//! resets it to 1, so an empty file and a corrupt one behave the same.

use std::fs;
use std::io;
use std::path::Path;

pub use num_bigint::BigUint;
use tracing::{error, warn};

/// The value written when there is no usable previous value.
pub const START_VALUE: u32 = 1;

/// Error type for counter operations.
#[derive(Debug, thiserror::Error)]
pub enum CounterError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result alias for counter operations.
pub type Result<T> = std::result::Result<T, CounterError>;

/// Compute the next counter value from the file's current content.
///
/// `None` means the file does not exist. Surrounding whitespace is ignored.
/// Signed input (`-3`, `+3`) is treated as corrupt, as is anything else that
/// is not plain decimal digits.
pub fn next_value(content: Option<&str>) -> BigUint {
    let Some(content) = content else {
        return BigUint::from(START_VALUE);
    };

    let trimmed = content.trim();
    let digits = !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit());
    match trimmed.parse::<BigUint>() {
        Ok(current) if digits => current + 1u32,
        _ => {
            warn!("Invalid counter value in file: {trimmed:?}, resetting to {START_VALUE}");
            BigUint::from(START_VALUE)
        }
    }
}

/// Increment the counter stored at `path` and return the new value.
///
/// The file is overwritten in place with the new value and no trailing
/// newline.
///
/// # Errors
///
/// Returns [`CounterError::Io`] if the file exists but cannot be read, or
/// cannot be written.
pub fn update_counter(path: &Path) -> Result<BigUint> {
    let result = read_and_write(path);
    if let Err(e) = &result {
        error!("Failed to update counter: {e}");
    }
    result
}

fn read_and_write(path: &Path) -> Result<BigUint> {
    let content = match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(e.into()),
    };

    let next = next_value(content.as_deref());
    fs::write(path, next.to_string())?;
    Ok(next)
}
