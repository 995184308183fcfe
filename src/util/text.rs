use std::{collections::HashSet, str::FromStr};

use anyhow::*;
use rust_decimal::Decimal;

const NUMBER_ESCAPE_CHAR: &[char] = &[',', ' ', '"', '\n'];

/// Splits a comma separated symbol list.
///
/// Each token is trimmed and empty tokens are dropped. Order and duplicates are
/// kept, so `"AAPL, GOOG,AAPL"` gives `["AAPL", "GOOG", "AAPL"]`.
pub fn split_symbols(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|symbol| !symbol.is_empty())
        .map(String::from)
        .collect()
}

/// Parses a decimal value from a given string.
///
/// This function accepts a string representation of a decimal number,
/// potentially containing commas as thousands separators and other escape characters,
/// and attempts to convert it into a `Decimal`. If the conversion fails, an error is returned.
///
/// # Arguments
///
/// * `s`: A string slice containing the representation of a decimal number
///         that may include commas as thousands separators and other escape characters.
/// * `escape_chars`: Optional characters to be escaped from the input string.
///
/// # Example
///
/// ```ignore
/// let s = "1,234.56";
/// let decimal_value = parse_decimal(s, None).unwrap();
/// ```
pub fn parse_decimal(s: &str, escape_chars: Option<Vec<char>>) -> Result<Decimal> {
    let cleaned = clean_escape_chars(s, escape_chars);
    Decimal::from_str(&cleaned)
        .map_err(|why| anyhow!("Failed to parse '{}' as Decimal because {:?}", cleaned, why))
}

/// Removes a set of escape characters from a given string.
///
/// The built-in set (thousands separator, blanks, quotes) is always removed;
/// `escape_chars` adds to it.
pub(crate) fn clean_escape_chars(s: &str, escape_chars: Option<Vec<char>>) -> String {
    let mut combined: Vec<char> = NUMBER_ESCAPE_CHAR.to_vec();
    if let Some(ec) = escape_chars {
        combined.extend(ec);
    }

    let filters = combined.iter().collect::<HashSet<_>>();
    s.chars().filter(|c| !filters.contains(c)).collect()
}
