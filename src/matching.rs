//! Sign lookup by name, nickname or near-miss spelling.

use serde::Serialize;

use crate::{FUZZY_MATCH_MAX_DISTANCE, ZodiacSign, prelude::*, zodiac_signs};

/// Informal names mapped to canonical sign names.
static ALIASES: [(&str, &str); 18] = [
    ("ram", "Aries"),
    ("bull", "Taurus"),
    ("twins", "Gemini"),
    ("crab", "Cancer"),
    ("lion", "Leo"),
    ("maiden", "Virgo"),
    ("virgin", "Virgo"),
    ("scales", "Libra"),
    ("balance", "Libra"),
    ("scorpion", "Scorpio"),
    ("archer", "Sagittarius"),
    ("centaur", "Sagittarius"),
    ("goat", "Capricorn"),
    ("sea goat", "Capricorn"),
    ("water bearer", "Aquarius"),
    ("water-bearer", "Aquarius"),
    ("fish", "Pisces"),
    ("fishes", "Pisces"),
];

/// Which lookup step produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    #[display(fmt = "exact")]
    Exact,
    #[display(fmt = "prefix")]
    Prefix,
    #[display(fmt = "alias")]
    Alias,
    #[display(fmt = "fuzzy")]
    Fuzzy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SignMatch {
    pub sign: &'static ZodiacSign,
    pub kind: MatchKind,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// Nothing matched; `suggestion` is the closest lowercase name, if close enough.
    #[error("Sign \"{input}\" not found")]
    NameNotFound {
        input:      String,
        suggestion: Option<String>,
    },
}

impl LookupError {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NameNotFound { .. } => "NAME_NOT_FOUND",
        }
    }

    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::NameNotFound { suggestion, .. } => suggestion.as_deref(),
        }
    }
}

/// Edit distance with unit-cost insertion, deletion and substitution, over chars.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn sign_named(name: &str) -> Option<&'static ZodiacSign> {
    zodiac_signs().iter().find(|sign| sign.name() == name)
}

/// Exact name, then name prefix, then alias.
fn match_by_name(query: &str) -> Option<SignMatch> {
    let signs = zodiac_signs();
    let exact = signs
        .iter()
        .find(|sign| sign.name().to_lowercase() == query)
        .map(|sign| (sign, MatchKind::Exact));
    let prefix = || {
        signs
            .iter()
            .find(|sign| sign.name().to_lowercase().starts_with(query))
            .map(|sign| (sign, MatchKind::Prefix))
    };
    let alias = || {
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == query)
            .and_then(|(_, name)| sign_named(name))
            .map(|sign| (sign, MatchKind::Alias))
    };

    exact
        .or_else(prefix)
        .or_else(alias)
        .map(|(sign, kind)| SignMatch { sign, kind })
}

/// The sign whose lowercase name is nearest to `query`, when within
/// `FUZZY_MATCH_MAX_DISTANCE` edits. Ties go to the earlier sign in the table.
pub fn closest_sign(query: &str) -> Option<(&'static ZodiacSign, usize)> {
    zodiac_signs()
        .iter()
        .map(|sign| (sign, levenshtein_distance(query, &sign.name().to_lowercase())))
        .min_by_key(|&(_, distance)| distance)
        .filter(|&(_, distance)| distance <= FUZZY_MATCH_MAX_DISTANCE)
}

/// Resolves a sign through exact, prefix, alias and finally fuzzy matching.
///
/// # Errors
/// `LookupError::NameNotFound` when even the fuzzy step finds nothing close.
pub fn resolve_by_name_or_alias(text: &str) -> Result<SignMatch, LookupError> {
    let query = normalize(text);
    if query.is_empty() {
        return Err(LookupError::NameNotFound {
            input:      query,
            suggestion: None,
        });
    }
    if let Some(found) = match_by_name(&query) {
        return Ok(found);
    }
    match closest_sign(&query) {
        Some((sign, _)) => Ok(SignMatch {
            sign,
            kind: MatchKind::Fuzzy,
        }),
        None => Err(LookupError::NameNotFound {
            input:      query,
            suggestion: None,
        }),
    }
}

/// Like [`resolve_by_name_or_alias`] without the fuzzy step; a near miss is
/// reported as a suggestion instead of being accepted.
///
/// # Errors
/// `LookupError::NameNotFound`, carrying the closest name when one is near.
pub fn find_sign(text: &str) -> Result<SignMatch, LookupError> {
    let query = normalize(text);
    if query.is_empty() {
        return Err(LookupError::NameNotFound {
            input:      query,
            suggestion: None,
        });
    }
    match_by_name(&query).ok_or_else(|| LookupError::NameNotFound {
        suggestion: closest_sign(&query).map(|(sign, _)| sign.name().to_lowercase()),
        input:      query,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("scorpio", "scorpio"), 0);
        assert_eq!(levenshtein_distance("scorpeo", "scorpio"), 1);
        assert_eq!(levenshtein_distance("", "leo"), 3);
        assert_eq!(levenshtein_distance("leo", ""), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(
            levenshtein_distance("gemini", "aries"),
            levenshtein_distance("aries", "gemini")
        );
    }

    #[test]
    fn test_every_name_matches_exactly() {
        for sign in zodiac_signs() {
            let found = resolve_by_name_or_alias(&sign.name().to_lowercase()).unwrap();
            assert_eq!(found.sign, sign);
            assert_eq!(found.kind, MatchKind::Exact, "{}", sign.name());
        }
    }

    #[test]
    fn test_exact_is_case_and_space_insensitive() {
        let found = resolve_by_name_or_alias("  SAGITTARIUS ").unwrap();
        assert_eq!(found.sign.name(), "Sagittarius");
        assert_eq!(found.kind, MatchKind::Exact);
    }

    #[test]
    fn test_prefix_uses_table_order() {
        let cases = [
            ("sag", "Sagittarius"),
            ("cap", "Capricorn"),
            ("ca", "Cancer"),
            ("s", "Scorpio"),
            ("aq", "Aquarius"),
        ];
        for (query, expected) in cases {
            let found = resolve_by_name_or_alias(query).unwrap();
            assert_eq!(found.sign.name(), expected, "{query}");
            assert_eq!(found.kind, MatchKind::Prefix, "{query}");
        }
    }

    #[test]
    fn test_every_alias_resolves() {
        for (alias, name) in &ALIASES {
            let found = resolve_by_name_or_alias(alias).unwrap();
            assert_eq!(found.sign.name(), *name, "{alias}");
            assert_eq!(found.kind, MatchKind::Alias, "{alias}");
        }
        let found = resolve_by_name_or_alias("Water   Bearer").unwrap();
        assert_eq!(found.sign.name(), "Aquarius");
    }

    #[test]
    fn test_fuzzy_match() {
        let found = resolve_by_name_or_alias("scorpeo").unwrap();
        assert_eq!(found.sign.name(), "Scorpio");
        assert_eq!(found.kind, MatchKind::Fuzzy);

        let found = resolve_by_name_or_alias("sagitarius").unwrap();
        assert_eq!(found.sign.name(), "Sagittarius");
        assert_eq!(found.kind, MatchKind::Fuzzy);
    }

    #[test]
    fn test_no_match_when_far_from_every_name() {
        let best = zodiac_signs()
            .iter()
            .map(|sign| levenshtein_distance("xyzzy", &sign.name().to_lowercase()))
            .min()
            .unwrap();
        let result = resolve_by_name_or_alias("xyzzy");
        if best > FUZZY_MATCH_MAX_DISTANCE {
            assert_eq!(
                result,
                Err(LookupError::NameNotFound {
                    input:      "xyzzy".to_owned(),
                    suggestion: None,
                })
            );
        } else {
            assert_eq!(result.unwrap().kind, MatchKind::Fuzzy);
        }
    }

    #[test]
    fn test_empty_input() {
        let err = resolve_by_name_or_alias("   ").unwrap_err();
        assert_eq!(err.code(), "NAME_NOT_FOUND");
        assert_eq!(err.suggestion(), None);
    }

    #[test]
    fn test_find_sign_suggests_instead_of_matching() {
        let err = find_sign("scorpeo").unwrap_err();
        assert_eq!(err.suggestion(), Some("scorpio"));
        assert_eq!(err.to_string(), r#"Sign "scorpeo" not found"#);

        let err = find_sign("qwertyuiop").unwrap_err();
        assert_eq!(err.suggestion(), None);

        assert_eq!(find_sign("goat").unwrap().kind, MatchKind::Alias);
    }

    #[test]
    fn test_closest_sign_ties_prefer_table_order() {
        struct TestCase {
            query:    &'static str,
            tied:     [&'static str; 2],
            distance: usize,
        }

        let cases = [
            TestCase {
                query:    "libo",
                tied:     ["leo", "libra"],
                distance: 2,
            },
            TestCase {
                query:    "vio",
                tied:     ["leo", "virgo"],
                distance: 2,
            },
        ];

        for case in &cases {
            for name in case.tied {
                assert_eq!(levenshtein_distance(case.query, name), case.distance, "{name}");
            }
            assert_eq!(
                closest_sign(case.query).map(|(s, d)| (s.name(), d)),
                Some(("Leo", case.distance)),
                "{}",
                case.query
            );
            let found = resolve_by_name_or_alias(case.query).unwrap();
            assert_eq!(found.sign.name(), "Leo");
            assert_eq!(found.kind, MatchKind::Fuzzy);
        }
        assert_eq!(closest_sign("zzzzzzzzzz"), None);
    }

    #[test]
    fn test_match_kind_display() {
        assert_eq!(MatchKind::Fuzzy.to_string(), "fuzzy");
        assert_eq!(serde_json::to_string(&MatchKind::Alias).unwrap(), r#""alias""#);
    }
}
