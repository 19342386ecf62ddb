use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static AND_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+(?:and|&)\s+").expect("valid AND separator pattern"));
static OR_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+or\s+").expect("valid OR separator pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlternativeKind {
    /// Any one alternative earns the mark on its own.
    Independent,
    /// Alternative taken from an "or" list.
    Optional,
}

/// One acceptable answer variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerAlternative {
    /// 1-based position within the source answer.
    pub id: usize,
    pub text: String,
    pub kind: AlternativeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorKind {
    /// "A and B": every component is needed.
    AllRequired,
    /// "A or B": any component is accepted.
    AnyAccepted,
    /// No operator found.
    Simple,
}

/// Result of reading AND/OR operators in an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperatorParse {
    pub kind: OperatorKind,
    pub required_components: Vec<String>,
    pub optional_components: Vec<String>,
    pub alternatives: Vec<AnswerAlternative>,
}

/// Split `"A / B / C"` into independent alternatives numbered from 1.
pub fn split_forward_slash(text: &str) -> Vec<AnswerAlternative> {
    slash_segments(text)
        .into_iter()
        .enumerate()
        .map(|(i, text)| AnswerAlternative {
            id: i + 1,
            text,
            kind: AlternativeKind::Independent,
        })
        .collect()
}

/// Classify an answer by its AND/OR operators.
///
/// AND is checked first: `"A and B or C"` reads as all-required with
/// components `["A", "B or C"]`.
pub fn parse_operators(text: &str) -> OperatorParse {
    let lower = text.to_lowercase();

    if lower.contains(" and ") || lower.contains(" & ") {
        return OperatorParse {
            kind: OperatorKind::AllRequired,
            required_components: split_on(&AND_SEPARATOR, text),
            optional_components: Vec::new(),
            alternatives: Vec::new(),
        };
    }

    if lower.contains(" or ") {
        let pieces = split_on(&OR_SEPARATOR, text);
        let alternatives = pieces
            .iter()
            .enumerate()
            .map(|(i, piece)| AnswerAlternative {
                id: i + 1,
                text: piece.clone(),
                kind: AlternativeKind::Optional,
            })
            .collect();
        return OperatorParse {
            kind: OperatorKind::AnyAccepted,
            required_components: Vec::new(),
            optional_components: pieces,
            alternatives,
        };
    }

    OperatorParse {
        kind: OperatorKind::Simple,
        required_components: vec![text.trim().to_string()],
        optional_components: Vec::new(),
        alternatives: Vec::new(),
    }
}

/// Every acceptable variant of an answer: slash-separated pieces followed
/// by "or"-separated pieces, without duplicates. Falls back to the trimmed
/// answer itself.
pub fn extract_all_valid_alternatives(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();

    if text.contains('/') {
        found.extend(slash_segments(text));
    }
    if text.to_lowercase().contains(" or ") {
        found.extend(split_on(&OR_SEPARATOR, text));
    }

    let mut unique: Vec<String> = Vec::with_capacity(found.len());
    for alt in found {
        if !unique.contains(&alt) {
            unique.push(alt);
        }
    }

    if unique.is_empty() {
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            unique.push(trimmed.to_string());
        }
    }
    unique
}

fn slash_segments(text: &str) -> Vec<String> {
    text.split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn split_on(separator: &Regex, text: &str) -> Vec<String> {
    separator
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slash_split_numbers_from_one() {
        let alts = split_forward_slash(" mitochondria / mitochondrion //  ");
        assert_eq!(alts.len(), 2);
        assert_eq!(alts[0].id, 1);
        assert_eq!(alts[0].text, "mitochondria");
        assert_eq!(alts[1].id, 2);
        assert!(alts.iter().all(|a| a.kind == AlternativeKind::Independent));
    }

    #[test]
    fn test_operators_and() {
        let parsed = parse_operators("Oxygen AND water");
        assert_eq!(parsed.kind, OperatorKind::AllRequired);
        assert_eq!(parsed.required_components, vec!["Oxygen", "water"]);
    }

    #[test]
    fn test_operators_ampersand() {
        let parsed = parse_operators("heat & light");
        assert_eq!(parsed.kind, OperatorKind::AllRequired);
        assert_eq!(parsed.required_components, vec!["heat", "light"]);
    }

    #[test]
    fn test_operators_or() {
        let parsed = parse_operators("red or blue");
        assert_eq!(parsed.kind, OperatorKind::AnyAccepted);
        assert_eq!(parsed.optional_components, vec!["red", "blue"]);
        assert_eq!(parsed.alternatives[1].id, 2);
        assert_eq!(parsed.alternatives[1].text, "blue");
    }

    #[test]
    fn test_operators_and_wins_over_or() {
        let parsed = parse_operators("A and B or C");
        assert_eq!(parsed.kind, OperatorKind::AllRequired);
        assert_eq!(parsed.required_components, vec!["A", "B or C"]);
    }

    #[test]
    fn test_operators_simple() {
        let parsed = parse_operators("  photosynthesis ");
        assert_eq!(parsed.kind, OperatorKind::Simple);
        assert_eq!(parsed.required_components, vec!["photosynthesis"]);
    }

    #[test]
    fn test_alternatives_or_order_preserved() {
        assert_eq!(extract_all_valid_alternatives("red or blue"), vec!["red", "blue"]);
    }

    #[test]
    fn test_alternatives_slash_and_or_combined() {
        assert_eq!(
            extract_all_valid_alternatives("A / B or C"),
            vec!["A", "B or C", "A / B", "C"]
        );
    }

    #[test]
    fn test_alternatives_deduplicated() {
        assert_eq!(extract_all_valid_alternatives("x / x"), vec!["x"]);
    }

    #[test]
    fn test_alternatives_fallback_to_text() {
        assert_eq!(extract_all_valid_alternatives("  osmosis "), vec!["osmosis"]);
        assert!(extract_all_valid_alternatives("   ").is_empty());
    }
}
