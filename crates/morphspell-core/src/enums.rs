// Shared enums: lookup results, overlay status codes, engine limits

/// Result of a single dictionary lookup.
///
/// Variants are ordered from best to worst so that `min()` over several
/// lookups picks the most favourable outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpellResult {
    /// The word is correct.
    Ok,
    /// The word is explicitly forbidden (a forbidden dictionary entry or a
    /// removed word). Case-folded retries must not override this.
    Forbidden,
    /// The word is not known.
    Failed,
}

/// Outcome of a runtime dictionary mutation.
///
/// These are non-exceptional results: callers routinely probe before
/// mutating. The integer codes are stable and exposed through the C ABI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayStatus {
    /// The mutation was applied.
    Ok,
    /// `add`: the word is already accepted.
    AlreadyPresent,
    /// `add_with_affix`: the example word does not resolve to a known stem.
    ExampleNotFound,
    /// `remove`: the word is not currently accepted.
    NotFound,
}

impl OverlayStatus {
    /// Stable integer code of this status.
    pub fn code(self) -> i32 {
        match self {
            OverlayStatus::Ok => 0,
            OverlayStatus::AlreadyPresent => 1,
            OverlayStatus::ExampleNotFound => 2,
            OverlayStatus::NotFound => 3,
        }
    }

    /// Inverse of [`OverlayStatus::code`].
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(OverlayStatus::Ok),
            1 => Some(OverlayStatus::AlreadyPresent),
            2 => Some(OverlayStatus::ExampleNotFound),
            3 => Some(OverlayStatus::NotFound),
            _ => None,
        }
    }

    pub fn is_ok(self) -> bool {
        self == OverlayStatus::Ok
    }
}

/// Words longer than this many characters are never accepted.
pub const MAX_WORD_CHARS: usize = 255;

/// Default number of suggestions returned by `suggest`.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 15;

/// Largest edit distance between a word and any of its suggestions.
pub const MAX_SUGGESTION_DISTANCE: usize = 2;
