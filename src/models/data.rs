use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::validation::expiry::MrzDate;

/// Characters per MRZ line of a TD3 (passport) document.
pub const TD3_LINE_LENGTH: usize = 44;

/// OCR lines that survived sanitizing. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedLines {
    lines: Vec<String>,
}

impl SanitizedLines {
    pub(crate) fn new(lines: Vec<String>) -> Option<Self> {
        if lines.is_empty() {
            None
        } else {
            Some(SanitizedLines { lines })
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.lines.iter()
    }
}

impl<'a> IntoIterator for &'a SanitizedLines {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

/// Fields read from a TD3 second line whose check digits all matched.
///
/// Only the quick parser can build one, so holding a `QuickResult` means the
/// passport number, birth date and expiry date were validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickResult {
    passport_number: String,
    birth_date: String,
    expiry_date: String,
}

impl QuickResult {
    pub(crate) fn new(passport_number: String, birth_date: String, expiry_date: String) -> Self {
        QuickResult {
            passport_number,
            birth_date,
            expiry_date,
        }
    }

    /// Document number with `<` fillers removed.
    pub fn passport_number(&self) -> &str {
        &self.passport_number
    }

    /// Birth date as printed in the MRZ (YYMMDD).
    pub fn birth_date(&self) -> &str {
        &self.birth_date
    }

    /// Expiry date as printed in the MRZ (YYMMDD).
    pub fn expiry_date(&self) -> &str {
        &self.expiry_date
    }

    pub fn birth_date_naive(&self, today: NaiveDate) -> Option<NaiveDate> {
        MrzDate::parse_birth_date(&self.birth_date, today)
    }

    pub fn expiry_date_naive(&self) -> Option<NaiveDate> {
        MrzDate::parse_expiry_date(&self.expiry_date)
    }
}

/// Enhancement parameters handed to the image-processing step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExposureParams {
    /// Exposure value in stops; 0.5 EV is the default adjustment when the
    /// frame is neither too bright nor too dark.
    pub exposure_adjustment: f64,
    /// Luminance cut-off in [0, 1] for binarization.
    pub binarization_threshold: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_lines_reject_empty() {
        assert!(SanitizedLines::new(Vec::new()).is_none());
        let lines = SanitizedLines::new(vec!["P<UTO".to_string()]).unwrap();
        assert_eq!(lines.len(), 1);
        assert!(!lines.is_empty());
    }

    #[test]
    fn test_quick_result_serializes() {
        let result = QuickResult::new(
            "L898902C3".to_string(),
            "740812".to_string(),
            "120415".to_string(),
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["passport_number"], "L898902C3");
        assert_eq!(json["birth_date"], "740812");
        assert_eq!(json["expiry_date"], "120415");
    }
}
