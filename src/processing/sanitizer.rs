use log::debug;

use crate::models::SanitizedLines;

/// Reduces raw OCR output to the lines that can plausibly be MRZ lines.
///
/// MRZ lines are the longest and most uniform lines of the recognized text, so
/// anything shorter than the average line length is treated as noise.
pub struct LineSanitizer;

impl LineSanitizer {
    /// Sanitizes newline separated OCR text. Spaces are removed first.
    pub fn sanitize(raw_text: &str) -> Option<SanitizedLines> {
        let without_spaces = raw_text.replace(' ', "");
        let lines: Vec<String> = without_spaces
            .split('\n')
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        Self::filter_by_average_length(lines)
    }

    /// Sanitizes the per-line output of a text recognizer.
    pub fn sanitize_lines<S: AsRef<str>>(lines: &[S]) -> Option<SanitizedLines> {
        let joined = lines
            .iter()
            .map(|line| line.as_ref())
            .collect::<Vec<_>>()
            .join("\n");
        Self::sanitize(&joined)
    }

    fn filter_by_average_length(lines: Vec<String>) -> Option<SanitizedLines> {
        if lines.is_empty() {
            debug!("OCR output is empty");
            return None;
        }

        let total: usize = lines.iter().map(|line| line.chars().count()).sum();
        let average = total / lines.len();
        let before = lines.len();

        let kept: Vec<String> = lines
            .into_iter()
            .filter(|line| line.chars().count() >= average)
            .collect();

        debug!(
            "Kept {} of {} lines (average length {})",
            kept.len(),
            before,
            average
        );
        SanitizedLines::new(kept)
    }
}
