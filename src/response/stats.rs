//! Word statistics reported alongside generated text

/// Number of whitespace-separated tokens in `text`
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Summary length as a percentage of the original, e.g. `"12.5%"`
pub fn compression_ratio(original_words: usize, summary_words: usize) -> String {
    if original_words == 0 {
        return "N/A".to_string();
    }
    format!(
        "{:.1}%",
        summary_words as f64 / original_words as f64 * 100.0
    )
}
