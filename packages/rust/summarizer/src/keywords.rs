//! Keyword extraction by token frequency.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// Function words ignored by keyword ranking and sentence scoring.
const STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "for", "of", "to", "in", "on", "by", "with", "is", "are", "was",
    "were", "be", "been", "being", "from", "that", "this", "it", "as", "at", "into", "about",
    "over", "through", "between", "after", "before", "above", "below", "up", "down", "out", "off",
    "again", "further", "then", "once", "here", "there", "when", "where", "why", "how", "all",
    "any", "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not",
    "only", "own", "same", "so", "than", "too", "very", "can", "will", "just",
];

/// Tokens this short never count as keywords.
const MIN_KEYWORD_CHARS: usize = 3;

/// Word characters plus extended Latin letters and apostrophes.
pub(crate) static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\u{00C0}-\u{024F}\w']+").expect("valid regex"));

/// A ranked token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    pub word: String,
    pub frequency: usize,
}

/// Case-insensitive stopword check.
pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.iter().any(|stop| stop.eq_ignore_ascii_case(word))
}

/// Lowercased tokens of `text`, in order of appearance.
pub(crate) fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    WORD_RE.find_iter(text).map(|m| m.as_str().to_lowercase())
}

/// Rank the top `max_keywords` tokens by frequency (desc), ties by word (asc).
pub fn rank_keywords(text: &str, max_keywords: usize) -> Vec<Keyword> {
    let mut frequencies: HashMap<String, usize> = HashMap::new();

    for word in tokens(text) {
        if word.chars().count() < MIN_KEYWORD_CHARS || is_stopword(&word) {
            continue;
        }
        *frequencies.entry(word).or_default() += 1;
    }

    let mut ranked: Vec<Keyword> = frequencies
        .into_iter()
        .map(|(word, frequency)| Keyword { word, frequency })
        .collect();

    ranked.sort_by(|a, b| b.frequency.cmp(&a.frequency).then_with(|| a.word.cmp(&b.word)));
    ranked.truncate(max_keywords);
    ranked
}

/// The top `max_keywords` themes of `text`, most frequent first.
pub fn extract_keywords(text: &str, max_keywords: usize) -> Vec<String> {
    rank_keywords(text, max_keywords)
        .into_iter()
        .map(|k| k.word)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_no_keywords() {
        assert!(extract_keywords("", 5).is_empty());
        assert!(extract_keywords("   \n\t", 5).is_empty());
    }

    #[test]
    fn stopwords_and_short_tokens_are_dropped() {
        let keywords = extract_keywords("The and of to be it is OK go an AI", 10);
        assert!(keywords.is_empty(), "got {keywords:?}");
    }

    #[test]
    fn ranks_by_frequency_then_alphabetically() {
        let text = "Security security SECURITY api gateway gateway billing";
        let ranked = rank_keywords(text, 10);
        assert_eq!(
            ranked,
            vec![
                Keyword { word: "security".into(), frequency: 3 },
                Keyword { word: "gateway".into(), frequency: 2 },
                Keyword { word: "api".into(), frequency: 1 },
                Keyword { word: "billing".into(), frequency: 1 },
            ]
        );
    }

    #[test]
    fn respects_the_limit() {
        let text = "alpha beta gamma delta epsilon zeta";
        let keywords = extract_keywords(text, 3);
        assert_eq!(keywords, vec!["alpha", "beta", "delta"]);
        assert!(extract_keywords(text, 0).is_empty());
    }

    #[test]
    fn keeps_extended_latin_and_apostrophes() {
        let keywords = extract_keywords("Café café user's user's naïve", 5);
        assert_eq!(keywords, vec!["café", "user's", "naïve"]);
    }

    #[test]
    fn keywords_are_distinct_lowercase_and_filtered() {
        let text = "Integration with the Billing API. The API integration must pass Testing; \
                    Integration tests cover billing and the API!";
        let keywords = extract_keywords(text, 6);
        assert!(keywords.len() <= 6);
        let mut seen = std::collections::HashSet::new();
        for word in &keywords {
            assert!(seen.insert(word.clone()), "duplicate {word}");
            assert_eq!(word, &word.to_lowercase());
            assert!(!is_stopword(word));
            assert!(word.chars().count() > 2);
        }
        assert_eq!(keywords[..3], ["api", "integration", "billing"]);
    }

    #[test]
    fn stopword_check_ignores_case() {
        assert!(is_stopword("The"));
        assert!(is_stopword("WILL"));
        assert!(!is_stopword("security"));
    }
}
