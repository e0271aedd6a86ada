// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! Canonicalization of raw listing text.
//!
//! Both functions are total: anything that cannot be normalized comes back as
//! the absent value (`0` or `""`), which callers use to reject the listing.

/// Lowest price accepted as a real listing, in whole currency units
pub const MIN_PRICE: u32 = 100;
/// Highest price accepted as a real listing, in whole currency units
pub const MAX_PRICE: u32 = 1_000_000;
/// Default title cap, in characters
pub const MAX_TITLE_CHARS: usize = 150;

/// Parse a displayed price such as `"₹1,23,456.00"` into whole units.
///
/// Keeps only digits and the decimal point, drops the fractional part and
/// returns `0` for anything outside [`MIN_PRICE`, `MAX_PRICE`].
///
/// # Examples
/// * `"₹1,23,456"` → `123456`
/// * `"$ 2,499.99"` → `2499`
/// * `"Free"` → `0`
pub fn normalize_price(text: &str) -> u32 {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let whole = cleaned.split('.').next().unwrap_or_default();
    if whole.is_empty() {
        return 0;
    }

    // Overlong digit runs overflow and fall out of range anyway.
    match whole.parse::<u64>() {
        Ok(value) if (MIN_PRICE as u64..=MAX_PRICE as u64).contains(&value) => value as u32,
        _ => 0,
    }
}

/// Trim, collapse whitespace runs and cap at [`MAX_TITLE_CHARS`].
pub fn normalize_title(text: &str) -> String {
    normalize_title_with_cap(text, MAX_TITLE_CHARS)
}

/// Same as [`normalize_title`] with an explicit character cap.
pub fn normalize_title_with_cap(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }

    let truncated: String = collapsed.chars().take(max_chars).collect();
    truncated.trim_end().to_string()
}
