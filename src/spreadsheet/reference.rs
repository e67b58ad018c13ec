//! A1-style cell references.
use regex::Regex;
use std::sync::LazyLock;

static REFERENCE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$?([A-Za-z]{1,3})\$?(\d+)$").expect("Hardcode regex pattern"));

/// Converts 0-based row and column indexes to a reference such as `B3`.
pub fn index_to_reference(row: usize, col: usize) -> String {
    let mut column = col + 1;
    let mut letters = Vec::new();
    while column > 0 {
        column -= 1;
        letters.push((b'A' + (column % 26) as u8) as char);
        column /= 26;
    }
    letters.iter().rev().collect::<String>() + &(row + 1).to_string()
}

/// Parses a reference such as `B3` (or `$B$3`) into 0-based `(row, col)` indexes.
pub fn reference_to_index(reference: &str) -> Option<(usize, usize)> {
    let captures = REFERENCE_PATTERN.captures(reference)?;
    let col = captures[1]
        .to_ascii_uppercase()
        .bytes()
        .fold(0usize, |index, letter| index * 26 + (letter - b'A') as usize + 1);
    let row = captures[2].parse::<usize>().ok().filter(|row| *row > 0)?;
    Some((row - 1, col - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_to_reference_letters() {
        assert_eq!(index_to_reference(0, 0), "A1");
        assert_eq!(index_to_reference(2, 1), "B3");
        assert_eq!(index_to_reference(9, 25), "Z10");
        assert_eq!(index_to_reference(0, 26), "AA1");
        assert_eq!(index_to_reference(0, 701), "ZZ1");
        assert_eq!(index_to_reference(0, 702), "AAA1");
    }

    #[test]
    fn reference_to_index_parses() {
        assert_eq!(reference_to_index("A1"), Some((0, 0)));
        assert_eq!(reference_to_index("b3"), Some((2, 1)));
        assert_eq!(reference_to_index("$AA$10"), Some((9, 26)));
        assert_eq!(reference_to_index("AAA1"), Some((0, 702)));
    }

    #[test]
    fn reference_to_index_rejects_garbage() {
        assert_eq!(reference_to_index(""), None);
        assert_eq!(reference_to_index("A0"), None);
        assert_eq!(reference_to_index("12"), None);
        assert_eq!(reference_to_index("A1:B2"), None);
    }
}
