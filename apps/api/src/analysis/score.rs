//! Pulls the match score out of the model's Markdown.

use std::sync::OnceLock;

use regex::Regex;

fn percentage_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(\d{1,3}(?:\.\d+)?)\s*%").expect("percentage pattern is a valid regex")
    })
}

/// First percentage in `text` that lies in 0–100, rounded to a whole number.
/// The prompt asks for the score first, so the first valid hit is taken.
pub fn extract_match_score(text: &str) -> Option<u8> {
    percentage_pattern()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<f32>().ok())
        .find(|value| (0.0..=100.0).contains(value))
        .map(|value| value.round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_bold_score_line() {
        let md = "### Match Score: **85%**\n\n- Python\n- Pandas\n- Scikit-Learn";
        assert_eq!(extract_match_score(md), Some(85));
    }

    #[test]
    fn test_extracts_spaced_and_decimal_scores() {
        assert_eq!(extract_match_score("Score: 72 %"), Some(72));
        assert_eq!(extract_match_score("Score: 67.6%"), Some(68));
    }

    #[test]
    fn test_skips_out_of_range_values() {
        assert_eq!(extract_match_score("Grew revenue 250%, fit 90%"), Some(90));
    }

    #[test]
    fn test_none_without_percentage() {
        assert_eq!(extract_match_score("Strong fit overall."), None);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert_eq!(extract_match_score("0%"), Some(0));
        assert_eq!(extract_match_score("100%"), Some(100));
    }
}
