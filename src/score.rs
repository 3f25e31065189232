use std::collections::HashSet;

use crate::corpus::{CleanedRecord, ScoredRecord};

/// Keywords that indicate a detailed test description: words about the
/// "how" of an experiment rather than just its outcome. Fixed
/// configuration, not derived from the data.
pub const DETAIL_KEYWORDS: &[&str] = &[
    "variation", "control", "hypothesis", "button", "headline", "form",
    "design", "image", "text", "copy", "color", "layout", "price", "cta",
    "page", "element", "change", "test", "version",
];

/// Count how many distinct detail keywords appear in a token list.
/// Duplicates collapse, so the score is bounded by the vocabulary size.
pub fn detail_score(tokens: &[String]) -> u32 {
    let vocab: HashSet<&str> = DETAIL_KEYWORDS.iter().copied().collect();
    count_keywords(tokens, &vocab)
}

fn count_keywords(tokens: &[String], vocab: &HashSet<&str>) -> u32 {
    let found: HashSet<&str> = tokens
        .iter()
        .map(String::as_str)
        .filter(|token| vocab.contains(token))
        .collect();
    found.len() as u32
}

/// Score every cleaned row and sort descending by score. The sort is
/// stable: rows with equal scores keep their input order.
pub fn score_corpus(rows: Vec<CleanedRecord>) -> Vec<ScoredRecord> {
    let vocab: HashSet<&str> = DETAIL_KEYWORDS.iter().copied().collect();

    let mut scored: Vec<ScoredRecord> = rows
        .into_iter()
        .map(|row| {
            let detail_score = count_keywords(&row.cleaned_tokens, &vocab);
            ScoredRecord {
                url: row.url,
                title: row.title,
                body_text: row.body_text,
                cleaned_tokens: row.cleaned_tokens,
                cleaned_text: row.cleaned_text,
                detail_score,
            }
        })
        .collect();

    scored.sort_by(|a, b| b.detail_score.cmp(&a.detail_score));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn cleaned(url: &str, words: &[&str]) -> CleanedRecord {
        CleanedRecord {
            url: url.to_string(),
            title: None,
            body_text: words.join(" "),
            cleaned_tokens: tokens(words),
            cleaned_text: words.join(" "),
        }
    }

    #[test]
    fn counts_distinct_keywords_only() {
        let t = tokens(&["variation", "button", "hypothesis", "foo", "bar"]);
        assert_eq!(detail_score(&t), 3);
    }

    #[test]
    fn duplicates_collapse() {
        let t = tokens(&["button", "button", "button"]);
        assert_eq!(detail_score(&t), 1);
    }

    #[test]
    fn disjoint_tokens_score_zero() {
        let t = tokens(&["banana", "kayak", "zebra"]);
        assert_eq!(detail_score(&t), 0);
    }

    #[test]
    fn full_vocabulary_scores_its_cardinality() {
        let t = tokens(DETAIL_KEYWORDS);
        assert_eq!(detail_score(&t) as usize, DETAIL_KEYWORDS.len());
    }

    #[test]
    fn empty_tokens_score_zero() {
        assert_eq!(detail_score(&[]), 0);
    }

    #[test]
    fn corpus_is_sorted_descending() {
        let rows = vec![
            cleaned("https://example.com/low", &["foo"]),
            cleaned("https://example.com/high", &["variation", "control", "cta"]),
            cleaned("https://example.com/mid", &["button", "bar"]),
        ];
        let scored = score_corpus(rows);
        let scores: Vec<u32> = scored.iter().map(|r| r.detail_score).collect();
        assert_eq!(scores, vec![3, 1, 0]);
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn equal_scores_keep_input_order() {
        let rows = vec![
            cleaned("https://example.com/first", &["button", "x"]),
            cleaned("https://example.com/second", &["form", "y"]),
            cleaned("https://example.com/third", &["cta", "control"]),
        ];
        let scored = score_corpus(rows);
        assert_eq!(scored[0].url, "https://example.com/third");
        // first and second both score 1; the stable sort keeps their order.
        assert_eq!(scored[1].url, "https://example.com/first");
        assert_eq!(scored[2].url, "https://example.com/second");
    }
}
