//! Keyword-presence sentiment heuristic. Not NLP.
//!
//! Each lexicon word found anywhere in the text (case-sensitive substring
//! match) adds one to its side; repeated occurrences of the same word do not
//! count again. Positive wins only on a strict majority, likewise negative;
//! a tie, including 0-0, is neutral.

use crate::models::reflection::Sentiment;

pub const POSITIVE_WORDS: [&str; 8] = [
    "happy",
    "joy",
    "grateful",
    "excited",
    "love",
    "wonderful",
    "amazing",
    "great",
];

pub const NEGATIVE_WORDS: [&str; 8] = [
    "sad",
    "angry",
    "frustrated",
    "worried",
    "anxious",
    "terrible",
    "awful",
    "horrible",
];

fn lexicon_hits(text: &str, lexicon: &[&str]) -> usize {
    lexicon.iter().filter(|word| text.contains(*word)).count()
}

pub fn extract_sentiment(text: &str) -> Sentiment {
    let positive = lexicon_hits(text, &POSITIVE_WORDS);
    let negative = lexicon_hits(text, &NEGATIVE_WORDS);

    if positive > negative {
        Sentiment::Positive
    } else if negative > positive {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_sentences() {
        assert_eq!(
            extract_sentiment("I feel happy and grateful today"),
            Sentiment::Positive
        );
        assert_eq!(extract_sentiment("I am sad and anxious"), Sentiment::Negative);
        assert_eq!(extract_sentiment("The weather is cloudy"), Sentiment::Neutral);
    }

    #[test]
    fn test_tie_is_neutral() {
        assert_eq!(
            extract_sentiment("happy about the trip, worried about the cost"),
            Sentiment::Neutral
        );
        assert_eq!(extract_sentiment(""), Sentiment::Neutral);
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert_eq!(extract_sentiment("HAPPY GRATEFUL"), Sentiment::Neutral);
        assert_eq!(extract_sentiment("Happy and grateful"), Sentiment::Positive);
    }

    #[test]
    fn test_substring_matches_count_once_per_word() {
        // "sadness" contains "sad"; "great" three times still counts once.
        assert_eq!(
            extract_sentiment("great great great, but the sadness and anger linger, angry"),
            Sentiment::Negative
        );
    }

    #[test]
    fn test_words_at_text_boundaries_match() {
        assert_eq!(extract_sentiment("joy"), Sentiment::Positive);
        assert_eq!(extract_sentiment("feeling awful"), Sentiment::Negative);
        assert_eq!(extract_sentiment("lovely"), Sentiment::Positive);
    }
}
