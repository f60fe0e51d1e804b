//! Admin PIN check. A plain comparison against the configured PIN.

pub const PIN_LENGTH: usize = 4;

pub fn is_valid_pin_format(pin: &str) -> bool {
    pin.len() == PIN_LENGTH && pin.chars().all(|c| c.is_ascii_digit())
}

/// Surrounding whitespace from form input is ignored.
pub fn pin_matches(candidate: &str, expected: &str) -> bool {
    let candidate = candidate.trim();
    is_valid_pin_format(candidate) && candidate == expected
}
