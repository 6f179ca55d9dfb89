use chrono::{Datelike, Local, NaiveDate};

use crate::models::QuickResult;

/// Interpretation of the two-digit-year YYMMDD dates printed in an MRZ.
pub struct MrzDate;

impl MrzDate {
    fn split(yymmdd: &str) -> Option<(i32, u32, u32)> {
        if yymmdd.len() != 6 || !yymmdd.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        let year = yymmdd[0..2].parse::<i32>().ok()?;
        let month = yymmdd[2..4].parse::<u32>().ok()?;
        let day = yymmdd[4..6].parse::<u32>().ok()?;
        Some((year, month, day))
    }

    /// Birth dates are never in the future: take the latest century that
    /// keeps the date on or before `today`.
    pub fn parse_birth_date(yymmdd: &str, today: NaiveDate) -> Option<NaiveDate> {
        let (year, month, day) = Self::split(yymmdd)?;
        let century = today.year() - today.year().rem_euclid(100);

        let recent = NaiveDate::from_ymd_opt(century + year, month, day);
        match recent {
            Some(date) if date <= today => Some(date),
            _ => NaiveDate::from_ymd_opt(century - 100 + year, month, day),
        }
    }

    /// Expiry dates are read as 20YY.
    pub fn parse_expiry_date(yymmdd: &str) -> Option<NaiveDate> {
        let (year, month, day) = Self::split(yymmdd)?;
        NaiveDate::from_ymd_opt(2000 + year, month, day)
    }
}

pub struct ExpiryValidator;

impl ExpiryValidator {
    /// `None` when the expiry digits are not a calendar date.
    pub fn is_expired(result: &QuickResult, today: NaiveDate) -> Option<bool> {
        result.expiry_date_naive().map(|expiry| expiry < today)
    }

    pub fn is_expired_now(result: &QuickResult) -> Option<bool> {
        Self::is_expired(result, Local::now().naive_local().date())
    }
}
