/// ICAO Doc 9303 check digit computation.
pub struct CheckDigit;

const MRZ_WEIGHTS: [u32; 3] = [7, 3, 1];

impl CheckDigit {
    /// Numeric value of an MRZ character.
    ///
    /// Digits map to themselves, `<` to 0 and `A`..`Z` to 10..35. Anything
    /// else (lowercase, punctuation, OCR noise) counts as 0.
    pub fn char_value(c: char) -> u32 {
        match c {
            '0'..='9' => c as u32 - '0' as u32,
            'A'..='Z' => c as u32 - 'A' as u32 + 10,
            _ => 0,
        }
    }

    /// Weighted sum modulo 10; weights restart at the first character of `field`.
    pub fn compute(field: &str) -> u32 {
        let sum: u32 = field
            .chars()
            .enumerate()
            .map(|(index, c)| Self::char_value(c) * MRZ_WEIGHTS[index % 3])
            .sum();
        sum % 10
    }

    pub fn verify(field: &str, expected: u32) -> bool {
        Self::compute(field) == expected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_values() {
        assert_eq!(CheckDigit::char_value('0'), 0);
        assert_eq!(CheckDigit::char_value('9'), 9);
        assert_eq!(CheckDigit::char_value('<'), 0);
        assert_eq!(CheckDigit::char_value('A'), 10);
        assert_eq!(CheckDigit::char_value('Z'), 35);
        assert_eq!(CheckDigit::char_value('a'), 0);
        assert_eq!(CheckDigit::char_value('#'), 0);
        assert_eq!(CheckDigit::char_value('É'), 0);
    }

    #[test]
    fn test_weighted_sum() {
        // 10*7 + 11*3 + 2*1 = 105
        assert_eq!(CheckDigit::compute("AB2"), 5);
    }

    #[test]
    fn test_icao_specimen_fields() {
        assert_eq!(CheckDigit::compute("L898902C<"), 3);
        assert_eq!(CheckDigit::compute("L898902C3"), 6);
        assert_eq!(CheckDigit::compute("740812"), 2);
        assert_eq!(CheckDigit::compute("120415"), 9);
        assert_eq!(CheckDigit::compute("690806"), 1);
        assert_eq!(CheckDigit::compute("940623"), 6);
    }

    #[test]
    fn test_empty_field() {
        assert_eq!(CheckDigit::compute(""), 0);
    }

    #[test]
    fn test_verify() {
        assert!(CheckDigit::verify("L898902C<", 3));
        assert!(!CheckDigit::verify("L898902C<", 4));
    }
}
