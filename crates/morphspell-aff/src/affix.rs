// Affix rules: PFX/SFX blocks and their entries

use crate::condition::Condition;
use crate::flags::{Flag, FlagSet};

/// Which end of the stem a rule modifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AffixKind {
    Prefix,
    Suffix,
}

impl AffixKind {
    /// Directive keyword of this kind in the affix file.
    pub fn directive(self) -> &'static str {
        match self {
            AffixKind::Prefix => "PFX",
            AffixKind::Suffix => "SFX",
        }
    }

    pub fn from_directive(keyword: &str) -> Option<Self> {
        match keyword {
            "PFX" => Some(AffixKind::Prefix),
            "SFX" => Some(AffixKind::Suffix),
            _ => None,
        }
    }
}

/// One line of a rule block: strip `strip`, then add `add`, provided the
/// stem satisfies `condition`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffixEntry {
    pub strip: String,
    pub add: String,
    /// Continuation flags written as `add/FLAGS`.
    pub cont_flags: FlagSet,
    pub condition: Condition,
    /// Morphological fields following the condition (`is:past`).
    pub morph: Vec<String>,
}

impl AffixEntry {
    /// Apply the entry to `stem`, producing a surface form.
    ///
    /// The strip string must leave at least one character of the stem
    /// unless `full_strip` is set.
    pub fn apply(&self, kind: AffixKind, stem: &str, full_strip: bool) -> Option<String> {
        if !self.strip_fits(stem, full_strip) {
            return None;
        }
        match kind {
            AffixKind::Suffix => {
                if !stem.ends_with(self.strip.as_str()) || !self.condition.matches_end(stem) {
                    return None;
                }
                let kept = &stem[..stem.len() - self.strip.len()];
                Some(format!("{kept}{}", self.add))
            }
            AffixKind::Prefix => {
                if !stem.starts_with(self.strip.as_str()) || !self.condition.matches_start(stem) {
                    return None;
                }
                let kept = &stem[self.strip.len()..];
                Some(format!("{}{kept}", self.add))
            }
        }
    }

    /// Reverse [`AffixEntry::apply`]: recover the stem a surface form was
    /// derived from, if this entry can have produced it.
    pub fn unapply(&self, kind: AffixKind, word: &str, full_strip: bool) -> Option<String> {
        let rest = match kind {
            AffixKind::Suffix => word.strip_suffix(self.add.as_str())?,
            AffixKind::Prefix => word.strip_prefix(self.add.as_str())?,
        };
        if rest.is_empty() && !full_strip {
            return None;
        }
        let stem = match kind {
            AffixKind::Suffix => format!("{rest}{}", self.strip),
            AffixKind::Prefix => format!("{}{rest}", self.strip),
        };
        if stem.is_empty() {
            return None;
        }
        let accepted = match kind {
            AffixKind::Suffix => self.condition.matches_end(&stem),
            AffixKind::Prefix => self.condition.matches_start(&stem),
        };
        accepted.then_some(stem)
    }

    fn strip_fits(&self, stem: &str, full_strip: bool) -> bool {
        let stem_chars = stem.chars().count();
        let strip_chars = self.strip.chars().count();
        stem_chars > strip_chars || (full_strip && stem_chars == strip_chars && stem_chars > 0)
    }
}

/// A complete rule block sharing one flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffixRule {
    pub flag: Flag,
    pub kind: AffixKind,
    /// `Y` in the block header: the rule may combine with an affix of the
    /// opposite kind.
    pub cross_product: bool,
    pub entries: Vec<AffixEntry>,
}

/// Address of one entry inside the affix table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AffixRef {
    pub rule: usize,
    pub entry: usize,
}
