use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::models::{QuickResult, TD3_LINE_LENGTH};
use crate::validation::checksum::CheckDigit;

lazy_static! {
    // TD3 second line: document number, nationality, birth date, sex, expiry
    // date, optional data and their check digits.
    static ref TD3_SECOND_LINE: Regex = Regex::new(
        r"^[A-Z0-9<]{9}[0-9][A-Z]{3}[0-9]{6}[0-9][MFX<][0-9]{6}[0-9][A-Z0-9<]{14}[0-9<][0-9]$"
    )
    .unwrap();
}

/// Fast path that reads passport number, birth date and expiry date straight
/// from the second line of a TD3 MRZ.
pub struct QuickMrzParser;

impl QuickMrzParser {
    pub fn parse(second_line: &str) -> Option<QuickResult> {
        if second_line.len() != TD3_LINE_LENGTH || !TD3_SECOND_LINE.is_match(second_line) {
            return None;
        }

        let passport_number = Self::checked_field(second_line, 0, 8)?.replace('<', "");
        let birth_date = Self::checked_field(second_line, 13, 18)?.to_string();
        let expiry_date = Self::checked_field(second_line, 21, 26)?.to_string();

        Some(QuickResult::new(passport_number, birth_date, expiry_date))
    }

    /// Scans candidate lines from the bottom up and stops at the first one
    /// that parses.
    pub fn find<S: AsRef<str>>(lines: &[S]) -> Option<QuickResult> {
        let found = lines.iter().rev().find_map(|line| Self::parse(line.as_ref()));
        if found.is_none() {
            debug!("No TD3 second line among {} candidates", lines.len());
        }
        found
    }

    /// Characters `start..=end`, if the digit right after them is their check digit.
    fn checked_field(line: &str, start: usize, end: usize) -> Option<&str> {
        let field = line.get(start..=end)?;
        let expected = (*line.as_bytes().get(end + 1)? as char).to_digit(10)?;

        if CheckDigit::verify(field, expected) {
            Some(field)
        } else {
            debug!("Check digit mismatch for field {:?} (expected {})", field, expected);
            None
        }
    }
}
