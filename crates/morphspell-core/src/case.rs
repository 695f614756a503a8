// Case pattern detection and case-folded lookup variants

use crate::character::{is_lower, is_upper, to_lower, to_title, to_upper};

/// Classification of character casing within a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseType {
    /// No letters found in the word (only digits, punctuation, etc.).
    NoLetters,
    /// All letters are lowercase: "walk".
    AllLower,
    /// First letter is uppercase, rest are lowercase: "Walk".
    FirstUpper,
    /// Mixed case that does not fit other patterns: "wAlk", "McDonald".
    Complex,
    /// All letters are uppercase: "WALK".
    AllUpper,
}

/// Detect the case pattern of a word.
///
/// Non-letter characters (digits, punctuation) are ignored.
pub fn detect_case(word: &str) -> CaseType {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return CaseType::NoLetters;
    };

    let first_uc = is_upper(first);
    let mut no_letters = !first_uc && !is_lower(first);
    let mut all_uc = !is_lower(first);
    let mut rest_lc = true;

    for c in chars {
        if is_upper(c) {
            no_letters = false;
            rest_lc = false;
        } else if is_lower(c) {
            no_letters = false;
            all_uc = false;
        }
    }

    if no_letters {
        CaseType::NoLetters
    } else if all_uc {
        CaseType::AllUpper
    } else if !rest_lc {
        CaseType::Complex
    } else if first_uc {
        CaseType::FirstUpper
    } else {
        CaseType::AllLower
    }
}

/// Rewrite `word` into the given case pattern.
///
/// `NoLetters` and `Complex` leave the word unchanged.
pub fn set_case(word: &str, case_type: CaseType) -> String {
    match case_type {
        CaseType::NoLetters | CaseType::Complex => word.to_string(),
        CaseType::AllLower => to_lower(word),
        CaseType::AllUpper => to_upper(word),
        CaseType::FirstUpper => to_title(word),
    }
}

/// Case-folded variants to retry when an exact-case lookup fails.
///
/// - "Walk" is retried as "walk".
/// - "WALK" is retried as "Walk", then "walk".
///
/// Lowercase, mixed-case and letterless words have no variants. Variants
/// identical to the input are skipped.
pub fn case_variants(word: &str) -> Vec<String> {
    let candidates = match detect_case(word) {
        CaseType::FirstUpper => vec![to_lower(word)],
        CaseType::AllUpper => vec![to_title(word), to_lower(word)],
        CaseType::NoLetters | CaseType::AllLower | CaseType::Complex => Vec::new(),
    };
    let mut variants: Vec<String> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if candidate != word && !variants.contains(&candidate) {
            variants.push(candidate);
        }
    }
    variants
}
