//! Hunspell-style morphological spell checking.
//!
//! - [`morphology`] -- reverse affix lookup, expansion, compounding,
//!   analysis and generation over a [`morphology::Lexicon`]
//! - [`overlay`] -- session-scoped additions and removals
//! - [`speller`] -- the spell check pipeline and its cache
//! - [`suggestion`] -- suggestion generators and strategy (feature `suggest`)
//! - [`handle`] -- [`MorphspellHandle`], owning everything (feature `handle`)
//!
//! ```no_run
//! use morphspell::MorphspellHandle;
//!
//! let handle = MorphspellHandle::from_files("en_US.dic", "en_US.aff")?;
//! assert!(handle.spell("walked"));
//! let suggestions = handle.suggest("walkk");
//! # let _ = suggestions;
//! # Ok::<(), morphspell::MorphspellError>(())
//! ```

pub mod morphology;
pub mod overlay;
pub mod speller;

#[cfg(feature = "suggest")]
pub mod suggestion;

#[cfg(feature = "handle")]
pub mod handle;

#[cfg(feature = "handle")]
pub use handle::{MorphspellError, MorphspellHandle};

pub use morphspell_core::analysis::Analysis;
pub use morphspell_core::enums::{OverlayStatus, SpellResult};
