use std::collections::HashSet;

use regex::Regex;

use crate::corpus::{CleanedRecord, PageRecord};

/// Shared language resources: compiled punctuation pattern plus the English
/// stopword table. Built once at stage start and passed explicitly, instead
/// of being reconstructed for every record.
pub struct TextResources {
    punctuation: Regex,
    stopwords: HashSet<&'static str>,
}

impl TextResources {
    pub fn new() -> Self {
        Self {
            punctuation: Regex::new(r"[^\w\s]").unwrap(),
            stopwords: STOPWORDS.iter().copied().collect(),
        }
    }

    /// Canonical token pipeline, in this exact order: lowercase, strip
    /// punctuation, split on whitespace, drop stopwords, lemmatize each
    /// token to its noun base form. Empty input yields an empty sequence.
    pub fn clean(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let stripped = self.punctuation.replace_all(&lowered, "");
        stripped
            .split_whitespace()
            .filter(|word| !self.stopwords.contains(word))
            .map(lemmatize_noun)
            .collect()
    }

    /// Derive a cleaned record from a raw one. Rows without body text are
    /// dropped here, never normalized.
    pub fn normalize(&self, record: &PageRecord) -> Option<CleanedRecord> {
        let body = record.body_text.as_ref()?;
        let tokens = self.clean(body);
        let cleaned_text = tokens.join(" ");
        Some(CleanedRecord {
            url: record.url.clone(),
            title: record.title.clone(),
            body_text: body.clone(),
            cleaned_tokens: tokens,
            cleaned_text,
        })
    }
}

impl Default for TextResources {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize a whole raw corpus in input order. Returns the cleaned rows
/// and how many rows were dropped for missing body text.
pub fn normalize_corpus(
    resources: &TextResources,
    rows: &[PageRecord],
) -> (Vec<CleanedRecord>, usize) {
    let cleaned: Vec<CleanedRecord> = rows
        .iter()
        .filter_map(|row| resources.normalize(row))
        .collect();
    let dropped = rows.len() - cleaned.len();
    (cleaned, dropped)
}

/// Reduce a word to its dictionary noun form: irregular plurals first, then
/// ordered suffix substitutions. Part of speech is assumed to be noun, so
/// verbs and adjectives pass through mostly untouched.
pub fn lemmatize_noun(word: &str) -> String {
    for (plural, singular) in IRREGULAR_NOUNS {
        if word == *plural {
            return (*singular).to_string();
        }
    }

    for (suffix, replacement, min_len) in SUFFIX_RULES {
        if word.len() >= *min_len {
            if let Some(stem) = word.strip_suffix(suffix) {
                return format!("{stem}{replacement}");
            }
        }
    }

    // Plain plural "s", guarded so words like "class", "status" or
    // "hypothesis" are left alone.
    if word.len() > 3
        && word.ends_with('s')
        && !word.ends_with("ss")
        && !word.ends_with("us")
        && !word.ends_with("is")
    {
        return word[..word.len() - 1].to_string();
    }

    word.to_string()
}

/// Irregular plurals worth handling explicitly for this corpus.
const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("hypotheses", "hypothesis"),
    ("analyses", "analysis"),
    ("criteria", "criterion"),
    ("indices", "index"),
    ("wives", "wife"),
    ("lives", "life"),
    ("leaves", "leaf"),
    ("shelves", "shelf"),
    ("knives", "knife"),
    ("selves", "self"),
];

/// Suffix substitutions tried in order, longest and most specific first.
/// `min_len` keeps short words ("ties", "yes") out of the wrong rule.
/// V-stem plurals (leaves, wives) live in the exception table instead: a
/// blanket "ves" rule mangles words like "moves".
const SUFFIX_RULES: &[(&str, &str, usize)] = &[
    ("sses", "ss", 5),
    ("ches", "ch", 5),
    ("shes", "sh", 5),
    ("xes", "x", 4),
    ("ies", "y", 5),
];

/// Standard English stopword list (NLTK's set). Contraction fragments are
/// kept even though upstream punctuation stripping makes some unreachable.
const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "youre", "youve",
    "youll", "youd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "shes", "her", "hers", "herself", "it", "its", "itself", "they", "them", "their",
    "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "thatll", "these",
    "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then",
    "once", "here", "there", "when", "where", "why", "how", "all", "any", "both", "each",
    "few", "more", "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same",
    "so", "than", "too", "very", "s", "t", "can", "will", "just", "don", "dont", "should",
    "shouldve", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "arent",
    "couldn", "couldnt", "didn", "didnt", "doesn", "doesnt", "hadn", "hadnt", "hasn",
    "hasnt", "haven", "havent", "isn", "isnt", "ma", "mightn", "mightnt", "mustn", "mustnt",
    "needn", "neednt", "shan", "shant", "shouldn", "shouldnt", "wasn", "wasnt", "weren",
    "werent", "won", "wont", "wouldn", "wouldnt",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn record(url: &str, body: Option<&str>) -> PageRecord {
        PageRecord {
            url: url.to_string(),
            title: None,
            body_text: body.map(String::from),
        }
    }

    #[test]
    fn case_and_punctuation_fold_together() {
        let res = TextResources::new();
        // "button" and "BUTTON." must collapse to the same token.
        let tokens = res.clean("Great Button! Great BUTTON.");
        assert_eq!(tokens, vec!["great", "button", "great", "button"]);
    }

    #[test]
    fn stopwords_are_removed() {
        let res = TextResources::new();
        let tokens = res.clean("The variation was better than the control");
        assert_eq!(tokens, vec!["variation", "better", "control"]);
    }

    #[test]
    fn plurals_reduce_to_noun_base() {
        let res = TextResources::new();
        let tokens = res.clean("buttons pages changes stories boxes churches classes");
        assert_eq!(
            tokens,
            vec!["button", "page", "change", "story", "box", "church", "class"]
        );
    }

    #[test]
    fn irregular_plurals_use_exception_table() {
        assert_eq!(lemmatize_noun("hypotheses"), "hypothesis");
        assert_eq!(lemmatize_noun("children"), "child");
        assert_eq!(lemmatize_noun("men"), "man");
        assert_eq!(lemmatize_noun("analyses"), "analysis");
        assert_eq!(lemmatize_noun("leaves"), "leaf");
    }

    #[test]
    fn v_stem_rule_does_not_overreach() {
        assert_eq!(lemmatize_noun("moves"), "move");
        assert_eq!(lemmatize_noun("sizes"), "size");
        assert_eq!(lemmatize_noun("serves"), "serve");
    }

    #[test]
    fn short_and_guarded_words_pass_through() {
        assert_eq!(lemmatize_noun("cta"), "cta");
        assert_eq!(lemmatize_noun("class"), "class");
        assert_eq!(lemmatize_noun("status"), "status");
        assert_eq!(lemmatize_noun("hypothesis"), "hypothesis");
        assert_eq!(lemmatize_noun("yes"), "yes");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let res = TextResources::new();
        assert!(res.clean("").is_empty());
        assert!(res.clean("   \n\t ").is_empty());
        assert!(res.clean("!!! ... ???").is_empty());
    }

    #[test]
    fn renormalizing_cleaned_text_is_a_fixed_point() {
        let res = TextResources::new();
        let tokens = res.clean(
            "The variations of the landing pages increased conversions dramatically!",
        );
        let rejoined = tokens.join(" ");
        assert_eq!(res.clean(&rejoined), tokens);
    }

    #[test]
    fn rows_without_body_text_are_dropped() {
        let res = TextResources::new();
        let rows = vec![
            record("https://example.com/a", Some("A great button")),
            record("https://example.com/b", None),
            record("https://example.com/c", Some("Another test")),
        ];
        let (cleaned, dropped) = normalize_corpus(&res, &rows);
        assert_eq!(dropped, 1);
        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned[0].url, "https://example.com/a");
        assert_eq!(cleaned[1].url, "https://example.com/c");
    }

    #[test]
    fn cleaned_text_joins_tokens_with_single_spaces() {
        let res = TextResources::new();
        let rows = vec![record("https://example.com/a", Some("Great Button! Great BUTTON."))];
        let (cleaned, _) = normalize_corpus(&res, &rows);
        assert_eq!(cleaned[0].cleaned_text, "great button great button");
        assert_eq!(cleaned[0].body_text, "Great Button! Great BUTTON.");
    }
}
