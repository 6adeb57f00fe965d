//! Title normalization into matchable signals.
//!
//! Listing titles are free-form seller text. A [`QuerySignature`] distills
//! one into the signals the matcher compares: a significant-token set, a
//! detected quantity, a detected language, and the subset of tokens that a
//! comparable listing is required to share.

use std::collections::HashSet;

use regex::Regex;

/// Tokens too generic to carry matching signal.
const STOP_WORDS: [&str; 8] = ["the", "and", "for", "with", "your", "from", "this", "that"];

/// Tokens that encode the physical form of a collectible product. A title
/// that mentions one almost always describes a different item when the
/// other side lacks it.
const PRODUCT_KEYWORDS: [&str; 9] = [
    "jumbo", "booster", "box", "origin", "origins", "starter", "deck", "display", "case",
];

/// Languages sellers commonly flag in listing titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    Chinese,
    Japanese,
    Korean,
    German,
    French,
    Spanish,
    Italian,
}

/// Full-name spellings checked as substrings, in priority order.
const LANGUAGE_NAMES: [(&str, Language); 8] = [
    ("english", Language::English),
    ("chinese", Language::Chinese),
    ("japanese", Language::Japanese),
    ("korean", Language::Korean),
    ("german", Language::German),
    ("french", Language::French),
    ("spanish", Language::Spanish),
    ("italian", Language::Italian),
];

/// Structured signals derived once from a raw title.
#[derive(Debug, Clone)]
pub struct QuerySignature {
    /// Significant tokens, lower-cased and de-duplicated.
    pub tokens: HashSet<String>,
    /// Detected lot/pack quantity, if any.
    pub quantity: Option<u32>,
    /// Detected language, if any.
    pub language: Option<Language>,
    /// Tokens a candidate must share to count as the same item.
    pub required: HashSet<String>,
}

/// Derives [`QuerySignature`]s from raw titles.
///
/// Holds the compiled patterns so signature derivation stays a pure,
/// allocation-light operation per title.
#[derive(Debug)]
pub struct TitleAnalyzer {
    quantity_patterns: Vec<Regex>,
    language_abbrev: Regex,
    parenthetical: Regex,
}

impl TitleAnalyzer {
    pub fn new() -> Self {
        // First matching pattern wins, so order encodes precedence.
        let quantity_patterns = vec![
            Regex::new(r"lot of (\d+)").expect("valid regex"),
            Regex::new(r"(\d+)\s*(?:packs?|lot)").expect("valid regex"),
            Regex::new(r"x(\d+)").expect("valid regex"),
        ];

        Self {
            quantity_patterns,
            language_abbrev: Regex::new(r"\b(jp|cn|en)\b").expect("valid regex"),
            parenthetical: Regex::new(r"\(([^)]*)\)").expect("valid regex"),
        }
    }

    /// Derive the full signature for a title.
    pub fn signature(&self, title: &str) -> QuerySignature {
        let tokens = tokenize(title);
        let required = self.required_tokens(title, &tokens);

        QuerySignature {
            quantity: self.quantity(title),
            language: self.language(title),
            tokens,
            required,
        }
    }

    /// Detect a lot/pack quantity ("lot of 5", "3 packs", "x2").
    pub fn quantity(&self, title: &str) -> Option<u32> {
        let lowered = title.to_lowercase();
        self.quantity_patterns
            .iter()
            .find_map(|pattern| pattern.captures(&lowered))
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }

    /// Detect a language flag, full names first, then the bounded
    /// two-letter abbreviations sellers use (jp/cn/en).
    pub fn language(&self, title: &str) -> Option<Language> {
        let lowered = title.to_lowercase();

        for (name, language) in LANGUAGE_NAMES {
            if lowered.contains(name) {
                return Some(language);
            }
        }

        match self.language_abbrev.captures(&lowered)?.get(1)?.as_str() {
            "jp" => Some(Language::Japanese),
            "cn" => Some(Language::Chinese),
            "en" => Some(Language::English),
            _ => None,
        }
    }

    /// Tokens a candidate must share: anything with a digit, anything long
    /// enough to be distinctive, product-form keywords, and every token
    /// inside a parenthesized segment (sellers put edition and language
    /// qualifiers there).
    fn required_tokens(&self, title: &str, tokens: &HashSet<String>) -> HashSet<String> {
        let mut required: HashSet<String> = tokens
            .iter()
            .filter(|token| {
                token.chars().any(|c| c.is_ascii_digit())
                    || token.len() >= 5
                    || PRODUCT_KEYWORDS.contains(&token.as_str())
            })
            .cloned()
            .collect();

        for segment in self.parenthetical.captures_iter(title) {
            if let Some(inner) = segment.get(1) {
                required.extend(tokenize(inner.as_str()));
            }
        }

        required
    }
}

impl Default for TitleAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Lower-case, strip punctuation, split on whitespace, and drop tokens too
/// short or too generic to discriminate between listings.
pub fn tokenize(title: &str) -> HashSet<String> {
    title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .filter(|token| token.len() > 2 && !STOP_WORDS.contains(token))
        .map(str::to_string)
        .collect()
}
