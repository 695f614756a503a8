//! Reader for Hunspell-style affix (`.aff`) and dictionary (`.dic`) files.
//!
//! [`load_from_files`] and [`load_from_bytes`] decode both files with the
//! encoding declared by the affix file's `SET` directive, compile the affix
//! rules into an [`AffixTable`](aff::AffixTable) and read the stems into a
//! [`Dictionary`](dic::Dictionary).

pub mod aff;
pub mod affix;
pub mod compound;
pub mod condition;
pub mod dic;
pub mod encoding;
pub mod flags;
pub mod replacement;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::aff::AffixTable;
use crate::condition::ConditionError;
use crate::dic::Dictionary;
use crate::encoding::Encoding;
use crate::flags::FlagError;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure to produce a usable affix table and dictionary.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported encoding `{0}`")]
    UnsupportedEncoding(String),
    #[error("{file} file is not valid {encoding}")]
    InvalidText {
        file: &'static str,
        encoding: &'static str,
    },
    #[error(transparent)]
    Rules(#[from] RuleParseError),
    #[error(transparent)]
    Dictionary(#[from] DictionaryFormatError),
}

/// A malformed affix-file line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("affix file line {line}: {kind}")]
pub struct RuleParseError {
    /// 1-based line number.
    pub line: usize,
    pub kind: RuleErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleErrorKind {
    #[error("unknown flag type `{0}`")]
    UnknownFlagType(String),
    #[error("invalid flag `{flag}`: {reason}")]
    InvalidFlag { flag: String, reason: FlagError },
    #[error("flag alias {0} is not defined")]
    UnknownAlias(usize),
    #[error("cross product must be Y or N, found `{0}`")]
    BadCrossProduct(String),
    #[error("invalid count `{0}`")]
    BadCount(String),
    #[error("{0} needs a value")]
    MissingValue(String),
    #[error("entry flag `{found}` does not match block flag `{expected}`")]
    FlagMismatch { expected: String, found: String },
    #[error("expected a {expected} entry, found `{found}`")]
    KindMismatch {
        expected: &'static str,
        found: String,
    },
    #[error("expected {expected} entries, found {found}")]
    MissingEntries { expected: usize, found: usize },
    #[error("truncated entry")]
    TruncatedEntry,
    #[error("invalid condition `{pattern}`: {reason}")]
    InvalidCondition {
        pattern: String,
        reason: ConditionError,
    },
    #[error("strip `{strip}` can never satisfy condition `{condition}`")]
    InconsistentStrip { strip: String, condition: String },
    #[error("flag `{0}` already has a rule block")]
    DuplicateRule(String),
}

/// A dictionary file that cannot be read at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DictionaryFormatError {
    #[error("dictionary file is empty")]
    Empty,
    #[error("dictionary header `{0}` is not a word count")]
    BadHeader(String),
}

/// A dictionary line that references a flag the affix file never declares.
/// The line is skipped; loading continues.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("dictionary line {line}: `{word}` uses undeclared flag `{flag}`")]
pub struct UnknownFlagError {
    pub line: usize,
    pub word: String,
    pub flag: String,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Result of a successful load.
#[derive(Debug, Clone)]
pub struct LoadedDictionary {
    pub table: AffixTable,
    pub dictionary: Dictionary,
    /// Dictionary lines skipped because of undeclared flags.
    pub warnings: Vec<UnknownFlagError>,
}

/// Load from in-memory file contents.
pub fn load_from_bytes(dic: &[u8], aff: &[u8]) -> Result<LoadedDictionary, LoadError> {
    let (encoding, label) = Encoding::detect(aff)?;
    let aff_text = encoding.decode(aff, "affix")?;
    let mut table = AffixTable::parse(&aff_text)?;
    table.encoding = label;

    let dic_text = encoding.decode(dic, "dictionary")?;
    let (dictionary, warnings) = Dictionary::parse(&dic_text, &table)?;
    debug!(
        encoding = %table.encoding,
        rules = table.rules().len(),
        stems = dictionary.len(),
        skipped = warnings.len(),
        "dictionary loaded"
    );
    Ok(LoadedDictionary {
        table,
        dictionary,
        warnings,
    })
}

/// Load a dictionary/affix file pair from disk.
pub fn load_from_files(
    dic_path: impl AsRef<Path>,
    aff_path: impl AsRef<Path>,
) -> Result<LoadedDictionary, LoadError> {
    let read = |path: &Path| {
        std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
    };
    let aff = read(aff_path.as_ref())?;
    let dic = read(dic_path.as_ref())?;
    load_from_bytes(&dic, &aff)
}
