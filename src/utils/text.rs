//! Text formatting utilities
//!
//! Capitalization, short number labels (`1.5K`, `2.5M`) and random ticket
//! codes for human-facing references.

use crate::constants::{DEFAULT_TICKET_LENGTH, MILLION, THOUSAND, TICKET_ALPHABET};
use rand::Rng;

/// Uppercase the first character of a string, leaving the rest untouched
pub fn format_uppercase(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Abbreviate a number with a `K` or `M` suffix
///
/// # Arguments
/// * `num` - The number to format
///
/// # Returns
/// * `String` - One decimal and a suffix from a thousand upwards, otherwise
///   the number itself. Negative numbers are never abbreviated.
pub fn format_number(num: f64) -> String {
    if num >= MILLION {
        format!("{:.1}M", round_to_tenth(num / MILLION))
    } else if num >= THOUSAND {
        format!("{:.1}K", round_to_tenth(num / THOUSAND))
    } else {
        num.to_string()
    }
}

/// Round to one decimal with halves going up, so `1.25` becomes `1.3`
fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

/// Abbreviate an integer count, see [`format_number`]
pub fn format_count(count: u64) -> String {
    format_number(count as f64)
}

/// Generate a random ticket code
///
/// Characters are drawn uniformly, with replacement, from `A-Z0-9`. `None`
/// and `Some(0)` both give the default length of 8. Not suitable for
/// secrets.
pub fn create_ticket(length: Option<usize>) -> String {
    create_ticket_with(&mut rand::rng(), length)
}

/// Generate a ticket code from a caller-supplied random source
pub fn create_ticket_with<R: Rng + ?Sized>(rng: &mut R, length: Option<usize>) -> String {
    let length = match length {
        Some(0) | None => DEFAULT_TICKET_LENGTH,
        Some(length) => length,
    };

    (0..length)
        .map(|_| char::from(TICKET_ALPHABET[rng.random_range(0..TICKET_ALPHABET.len())]))
        .collect()
}
