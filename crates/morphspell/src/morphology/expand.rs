// Forward expansion: every surface form a stem licenses

use morphspell_aff::aff::AffixTable;
use morphspell_aff::affix::{AffixKind, AffixRef};
use morphspell_aff::flags::FlagSet;

/// A surface form and the affixes that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub form: String,
    pub prefix: Option<AffixRef>,
    pub suffix: Option<AffixRef>,
}

impl Expansion {
    /// Applied affixes, prefix first.
    pub fn chain(&self) -> impl Iterator<Item = AffixRef> + '_ {
        self.prefix.iter().chain(self.suffix.iter()).copied()
    }
}

/// Expand `stem` with `flags`: the bare stem, suffixed forms, prefixed
/// forms, then prefixed forms of suffixed forms.
///
/// Forbidden and compound-only stems license no standalone forms.
pub fn expand(table: &AffixTable, stem: &str, flags: &FlagSet) -> Vec<Expansion> {
    let special = &table.special;
    let mut out = Vec::new();
    if stem.is_empty()
        || flags.contains_opt(special.forbidden)
        || flags.contains_opt(special.only_in_compound)
    {
        return out;
    }
    if !flags.contains_opt(special.need_affix) {
        out.push(Expansion {
            form: stem.to_string(),
            prefix: None,
            suffix: None,
        });
    }

    let standalone = |cont: &FlagSet| {
        !cont.contains_opt(special.circumfix) && !cont.contains_opt(special.need_affix)
    };

    for kind in [AffixKind::Suffix, AffixKind::Prefix] {
        for flag in flags.iter() {
            let Some((rule_idx, rule)) = table.rule_for_flag(flag) else {
                continue;
            };
            if rule.kind != kind {
                continue;
            }
            for (entry_idx, entry) in rule.entries.iter().enumerate() {
                if !standalone(&entry.cont_flags) {
                    continue;
                }
                let Some(form) = entry.apply(kind, stem, table.full_strip) else {
                    continue;
                };
                if form.is_empty() {
                    continue;
                }
                let aref = Some(AffixRef {
                    rule: rule_idx,
                    entry: entry_idx,
                });
                let (prefix, suffix) = match kind {
                    AffixKind::Prefix => (aref, None),
                    AffixKind::Suffix => (None, aref),
                };
                out.push(Expansion {
                    form,
                    prefix,
                    suffix,
                });
            }
        }
    }

    for sflag in flags.iter() {
        let Some((srule_idx, srule)) = table.rule_for_flag(sflag) else {
            continue;
        };
        if srule.kind != AffixKind::Suffix || !srule.cross_product {
            continue;
        }
        for (sentry_idx, sentry) in srule.entries.iter().enumerate() {
            let Some(suffixed) = sentry.apply(AffixKind::Suffix, stem, table.full_strip) else {
                continue;
            };
            let mut prefix_flags = flags.clone();
            prefix_flags.union_with(&sentry.cont_flags);
            for pflag in prefix_flags.iter() {
                let Some((prule_idx, prule)) = table.rule_for_flag(pflag) else {
                    continue;
                };
                if prule.kind != AffixKind::Prefix || !prule.cross_product {
                    continue;
                }
                for (pentry_idx, pentry) in prule.entries.iter().enumerate() {
                    if pentry.cont_flags.contains_opt(special.circumfix)
                        != sentry.cont_flags.contains_opt(special.circumfix)
                    {
                        continue;
                    }
                    let Some(form) = pentry.apply(AffixKind::Prefix, &suffixed, table.full_strip)
                    else {
                        continue;
                    };
                    if form.is_empty() {
                        continue;
                    }
                    out.push(Expansion {
                        form,
                        prefix: Some(AffixRef {
                            rule: prule_idx,
                            entry: pentry_idx,
                        }),
                        suffix: Some(AffixRef {
                            rule: srule_idx,
                            entry: sentry_idx,
                        }),
                    });
                }
            }
        }
    }
    out
}
