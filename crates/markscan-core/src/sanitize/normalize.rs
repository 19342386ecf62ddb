use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Normalize free text for comparison.
///
/// Steps:
/// 1. Lowercase
/// 2. Replace punctuation (anything but letters, digits and `/`) with spaces
/// 3. Collapse runs of whitespace and trim
pub fn normalize_text(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let mut cleaned = String::with_capacity(lowered.len());
    for c in lowered.chars() {
        if c.is_alphanumeric() || c == '/' {
            cleaned.push(c);
        } else {
            cleaned.push(' ');
        }
    }
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Exact comparison after normalization.
pub fn exact_match(a: &str, b: &str) -> bool {
    normalize_text(a) == normalize_text(b)
}

/// Loose comparison: one normalized string contains the other.
///
/// Empty strings never match anything.
pub fn fuzzy_match(a: &str, b: &str) -> bool {
    let a = normalize_text(a);
    let b = normalize_text(b);
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(&b) || b.contains(&a)
}

/// Case-insensitive whole-word match of `word` inside `text`.
///
/// `contains_word("Paris, ECF applies", "ecf")` is true, while
/// `contains_word("macao", "cao")` is false.
pub fn contains_word(text: &str, word: &str) -> bool {
    let key = word.to_lowercase();
    if let Some(re) = WORD_PATTERNS.get(key.as_str()) {
        return re.is_match(text);
    }
    word_pattern(&key)
        .map(|re| re.is_match(text))
        .unwrap_or(false)
}

fn word_pattern(word: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(word)))
}

static WORD_PATTERNS: LazyLock<HashMap<&'static str, Regex>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    for word in ["ora", "ecf", "cao", "owtte"] {
        if let Ok(re) = word_pattern(word) {
            m.insert(word, re);
        }
    }
    m
});
