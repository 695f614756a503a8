// Morphological lookup over the affix table, base dictionary and overlay

pub mod analyzer;
mod compound;
pub mod expand;
pub mod generate;
pub mod lexicon;

pub use expand::{Expansion, expand};
pub use lexicon::{Homonym, Lexicon, LookupMode};

use morphspell_aff::affix::AffixRef;
use morphspell_aff::flags::FlagSet;
use morphspell_core::analysis::Analysis;

/// Trait for morphological analyzers.
pub trait Analyzer {
    /// Every analysis of `word`, in derivation order.
    fn analyze(&self, word: &str) -> Vec<Analysis>;
}

/// One way a surface form is obtained from a stem.
///
/// Simple derivations apply at most one prefix and one suffix. Compound
/// derivations carry their parts (each a simple derivation) and no affixes
/// of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivation {
    pub surface: String,
    pub stem: String,
    pub prefix: Option<AffixRef>,
    pub suffix: Option<AffixRef>,
    /// Flags of the stem; for compounds, the union over all parts.
    pub flags: FlagSet,
    /// Morphological fields of the stem.
    pub morph: Vec<String>,
    pub parts: Vec<Derivation>,
}

impl Derivation {
    pub(crate) fn from_homonym(
        surface: &str,
        homonym: &Homonym<'_>,
        prefix: Option<AffixRef>,
        suffix: Option<AffixRef>,
    ) -> Self {
        Self {
            surface: surface.to_string(),
            stem: homonym.stem.to_string(),
            prefix,
            suffix,
            flags: homonym.flags.clone().into_owned(),
            morph: homonym.morph.to_vec(),
            parts: Vec::new(),
        }
    }

    pub fn is_compound(&self) -> bool {
        !self.parts.is_empty()
    }

    /// `true` if neither affix was applied.
    pub fn is_bare(&self) -> bool {
        self.prefix.is_none() && self.suffix.is_none() && self.parts.is_empty()
    }
}

/// Byte offsets of every character boundary of `word`, including its end.
pub(crate) fn char_boundaries(word: &str) -> Vec<usize> {
    word.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(word.len()))
        .collect()
}
