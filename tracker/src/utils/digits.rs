//! Numeral locale normalization
//!
//! Free-text numeric inputs (phone, counts, receipt numbers, search
//! queries) arrive with Arabic-Indic numerals mixed in. Normalization to
//! ASCII happens at every input boundary, never inside the lifecycle
//! engine, so stored records always hold ASCII digits.

/// Map the Arabic-Indic digit block (U+0660..U+0669) to ASCII digits,
/// leaving every other character untouched.
pub fn to_ascii_digits(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            '\u{0660}'..='\u{0669}' => {
                char::from(b'0' + (c as u32 - 0x0660) as u8)
            }
            _ => c,
        })
        .collect()
}

/// Normalize and drop everything that is not an ASCII digit.
/// Used by phone/count/receipt input boxes.
pub fn digits_only(input: &str) -> String {
    to_ascii_digits(input)
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect()
}

/// Whether a normalized string is non-empty and all ASCII digits.
pub fn is_numeric(input: &str) -> bool {
    !input.is_empty() && input.chars().all(|c| c.is_ascii_digit())
}
