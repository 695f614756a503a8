// Character case mapping helpers
//
// Dictionary lookups retry case-folded variants of a word. Those variants use
// the simple (one-to-one) Unicode mapping so that a folded word always has the
// same number of characters as its source. Multi-character expansions such as
// German sharp s are therefore never produced here.

/// Convert a character to its simple lowercase equivalent.
///
/// For characters whose full lowercase mapping expands to several
/// characters, only the first one is kept.
pub fn simple_lower(c: char) -> char {
    let mut iter = c.to_lowercase();
    iter.next().unwrap_or(c)
}

/// Convert a character to its simple uppercase equivalent.
pub fn simple_upper(c: char) -> char {
    let mut iter = c.to_uppercase();
    iter.next().unwrap_or(c)
}

/// Check whether a character is an uppercase letter.
pub fn is_upper(c: char) -> bool {
    c != simple_lower(c)
}

/// Check whether a character is a lowercase letter.
pub fn is_lower(c: char) -> bool {
    c != simple_upper(c)
}

/// Lowercase every character of `word`.
pub fn to_lower(word: &str) -> String {
    word.chars().map(simple_lower).collect()
}

/// Uppercase every character of `word`.
pub fn to_upper(word: &str) -> String {
    word.chars().map(simple_upper).collect()
}

/// Uppercase the first character and lowercase the rest.
pub fn to_title(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(word.len());
            out.push(simple_upper(first));
            out.extend(chars.map(simple_lower));
            out
        }
        None => String::new(),
    }
}

/// Compare two words ignoring simple case differences.
pub fn equals_ignore_case(a: &str, b: &str) -> bool {
    a.chars().count() == b.chars().count()
        && a.chars().zip(b.chars()).all(|(x, y)| simple_lower(x) == simple_lower(y))
}
