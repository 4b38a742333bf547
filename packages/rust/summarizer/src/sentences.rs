//! Sentence splitting and frequency-based sentence scoring.
//!
//! A document summary is the `max_bullets` most information-dense sentences,
//! printed in their original order.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::keywords::{is_stopword, tokens};

/// Bullets per document summary unless the caller asks otherwise.
pub const DEFAULT_MAX_BULLETS: usize = 5;

/// Terminal punctuation followed by whitespace. Whether it is a boundary also
/// depends on the next character; see [`split_sentences`].
static BOUNDARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("valid regex"));

/// Score of one sentence: corpus frequency mass per character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentenceScore {
    /// Position of the sentence in the document.
    pub index: usize,
    pub score: f64,
}

/// Split `content` into trimmed, non-empty sentences.
///
/// A boundary is `.`, `!` or `?`, then whitespace, then an uppercase ASCII
/// letter or a digit. The punctuation stays with the sentence it ends.
/// Abbreviations followed by a capitalized word still split.
pub fn split_sentences(content: &str) -> Vec<String> {
    let normalized = content.replace(['\r', '\n'], " ");
    if normalized.trim().is_empty() {
        return Vec::new();
    }

    let mut sentences = Vec::new();
    let mut start = 0;

    for m in BOUNDARY_RE.find_iter(&normalized) {
        let opens_sentence = normalized[m.end()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
        if !opens_sentence {
            continue;
        }

        // Terminal punctuation is a single ASCII byte.
        push_trimmed(&mut sentences, &normalized[start..m.start() + 1]);
        start = m.end();
    }
    push_trimmed(&mut sentences, &normalized[start..]);

    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, fragment: &str) {
    let fragment = fragment.trim();
    if !fragment.is_empty() {
        sentences.push(fragment.to_string());
    }
}

/// Score every sentence against a word-frequency table built from all of them.
///
/// `score = Σ frequency(token) / max(1, chars(sentence))` over the sentence's
/// non-stopword tokens, so dense sentences beat merely long ones.
pub fn score_sentences(sentences: &[String]) -> Vec<SentenceScore> {
    let mut frequencies: HashMap<String, usize> = HashMap::new();
    for sentence in sentences {
        for word in tokens(sentence) {
            if !is_stopword(&word) {
                *frequencies.entry(word).or_default() += 1;
            }
        }
    }

    sentences
        .iter()
        .enumerate()
        .map(|(index, sentence)| SentenceScore {
            index,
            score: score_sentence(sentence, &frequencies),
        })
        .collect()
}

fn score_sentence(sentence: &str, frequencies: &HashMap<String, usize>) -> f64 {
    if sentence.trim().is_empty() {
        return 0.0;
    }

    let mass: usize = tokens(sentence)
        .filter_map(|word| frequencies.get(&word).copied())
        .sum();

    mass as f64 / sentence.chars().count().max(1) as f64
}

/// Extractive bullet summary of `content`.
///
/// Picks the `max_bullets` highest-scoring sentences (earlier sentence wins a
/// tie) and renders them as `- sentence` lines in document order. Returns an
/// empty string when there is nothing to summarize.
pub fn summarize_document(content: &str, max_bullets: usize) -> String {
    let sentences = split_sentences(content);
    if sentences.is_empty() {
        return String::new();
    }

    let mut scores = score_sentences(&sentences);
    scores.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.index.cmp(&b.index)));

    let mut selected: Vec<usize> = scores.iter().take(max_bullets).map(|s| s.index).collect();
    selected.sort_unstable();

    tracing::trace!(
        sentences = sentences.len(),
        selected = selected.len(),
        "document summarized"
    );

    let mut summary = String::new();
    for index in selected {
        summary.push_str("- ");
        summary.push_str(&sentences[index]);
        summary.push('\n');
    }

    summary.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_content_yields_empty_summary() {
        assert_eq!(summarize_document("", DEFAULT_MAX_BULLETS), "");
        assert_eq!(summarize_document(" \r\n ", DEFAULT_MAX_BULLETS), "");
        assert!(split_sentences("").is_empty());
    }

    #[test]
    fn splits_on_terminal_punctuation_before_capital_or_digit() {
        let sentences = split_sentences("First one. Second one! Third? 4 items remain.");
        assert_eq!(
            sentences,
            vec!["First one.", "Second one!", "Third?", "4 items remain."]
        );
    }

    #[test]
    fn does_not_split_before_lowercase() {
        let sentences = split_sentences("Use e.g. the gateway. Then stop.");
        assert_eq!(sentences, vec!["Use e.g. the gateway.", "Then stop."]);
    }

    #[test]
    fn line_breaks_become_spaces() {
        let sentences = split_sentences("Line one\r\ncontinues here. Next\nline.");
        assert_eq!(sentences, vec!["Line one  continues here.", "Next line."]);
    }

    #[test]
    fn abbreviations_before_capitals_still_split() {
        let sentences = split_sentences("Talk to Dr. Smith today.");
        assert_eq!(sentences, vec!["Talk to Dr.", "Smith today."]);
    }

    #[test]
    fn scores_favor_dense_sentences() {
        let sentences = vec![
            "Apples are great.".to_string(),
            "Bananas are tasty and very great indeed.".to_string(),
            "Cats sleep a lot.".to_string(),
        ];
        let scores = score_sentences(&sentences);
        assert_eq!(scores.len(), 3);
        // apples(1) + great(2) over 17 chars
        assert!((scores[0].score - 3.0 / 17.0).abs() < 1e-9);
        // bananas + tasty + great(2) + indeed over 40 chars
        assert!((scores[1].score - 5.0 / 40.0).abs() < 1e-9);
        assert!(scores[0].score > scores[1].score);
    }

    #[test]
    fn selected_bullets_keep_document_order() {
        let content = "Apples are great. Bananas are tasty and very great indeed. Cats sleep a lot.";
        let summary = summarize_document(content, 2);
        assert_eq!(summary, "- Apples are great.\n- Cats sleep a lot.");
    }

    #[test]
    fn output_follows_document_order_not_score_order() {
        // The last sentence scores highest but must still print last.
        let content = "Intro words here. Gateway gateway gateway gateway.";
        let sentences = split_sentences(content);
        let scores = score_sentences(&sentences);
        assert!(scores[1].score > scores[0].score);

        let summary = summarize_document(content, 2);
        assert_eq!(summary, "- Intro words here.\n- Gateway gateway gateway gateway.");
    }

    #[test]
    fn limits_bullet_count() {
        let content = "One alpha. Two beta. Three gamma. Four delta. Five epsilon. Six zeta.";
        let summary = summarize_document(content, DEFAULT_MAX_BULLETS);
        assert_eq!(summary.lines().count(), 5);
        assert!(summary.lines().all(|l| l.starts_with("- ")));
        assert!(!summary.ends_with('\n'));
    }
}
