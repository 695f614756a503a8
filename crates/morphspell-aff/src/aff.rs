// Affix rule compiler: parses .aff text into an immutable AffixTable
//
// Parsing runs in two passes. The first pass reads the directives that change
// how everything else is read (FLAG, IGNORE, AF, AM); the second pass reads
// rule blocks, tables and the remaining settings.

use std::borrow::Cow;

use hashbrown::HashMap;
use tracing::debug;

use crate::affix::{AffixEntry, AffixKind, AffixRef, AffixRule};
use crate::compound::{CompoundConfig, CompoundRule};
use crate::condition::Condition;
use crate::encoding::DEFAULT_ENCODING;
use crate::flags::{Flag, FlagSet, FlagType};
use crate::replacement::{Replacement, ReplacementTable};
use crate::{RuleErrorKind, RuleParseError};

/// Keyboard layout assumed when the affix file has no KEY directive.
pub const DEFAULT_KEY: &str = "qwertyuiop|asdfghjkl|zxcvbnm";

/// Flag-valued directives whose flags are accepted in dictionaries but have
/// no effect on lookups.
const INERT_FLAG_DIRECTIVES: &[&str] = &[
    "COMPOUNDPERMITFLAG",
    "COMPOUNDFORBIDFLAG",
    "COMPOUNDROOT",
    "ONLYROOT",
    "LEMMA_PRESENT",
    "SUBSTANDARD",
    "WARN",
    "FORCEUCASE",
];

/// Flags with a fixed meaning, declared by name in the affix file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpecialFlags {
    /// NEEDAFFIX (alias PSEUDOROOT): the bare stem is not a word.
    pub need_affix: Option<Flag>,
    /// KEEPCASE: the stem is only accepted in its dictionary case.
    pub keep_case: Option<Flag>,
    /// FORBIDDENWORD: the word is explicitly wrong.
    pub forbidden: Option<Flag>,
    /// ONLYINCOMPOUND: the stem only occurs inside compounds.
    pub only_in_compound: Option<Flag>,
    /// NOSUGGEST: never propose words derived from the stem.
    pub no_suggest: Option<Flag>,
    /// CIRCUMFIX: affixes carrying it must occur with an opposite affix that
    /// also carries it.
    pub circumfix: Option<Flag>,
    pub compound_flag: Option<Flag>,
    pub compound_begin: Option<Flag>,
    pub compound_middle: Option<Flag>,
    pub compound_end: Option<Flag>,
}

impl SpecialFlags {
    fn iter(&self) -> impl Iterator<Item = Flag> {
        [
            self.need_affix,
            self.keep_case,
            self.forbidden,
            self.only_in_compound,
            self.no_suggest,
            self.circumfix,
            self.compound_flag,
            self.compound_begin,
            self.compound_middle,
            self.compound_end,
        ]
        .into_iter()
        .flatten()
    }

    fn slot(&mut self, directive: &str) -> Option<&mut Option<Flag>> {
        match directive {
            "NEEDAFFIX" | "PSEUDOROOT" => Some(&mut self.need_affix),
            "KEEPCASE" => Some(&mut self.keep_case),
            "FORBIDDENWORD" => Some(&mut self.forbidden),
            "ONLYINCOMPOUND" => Some(&mut self.only_in_compound),
            "NOSUGGEST" => Some(&mut self.no_suggest),
            "CIRCUMFIX" => Some(&mut self.circumfix),
            "COMPOUNDFLAG" => Some(&mut self.compound_flag),
            "COMPOUNDBEGIN" => Some(&mut self.compound_begin),
            "COMPOUNDMIDDLE" => Some(&mut self.compound_middle),
            "COMPOUNDEND" => Some(&mut self.compound_end),
            _ => None,
        }
    }
}

/// The compiled affix file.
///
/// Settings are public; the rule storage and its lookup indexes are only
/// reachable through accessors so they stay consistent.
#[derive(Debug, Clone)]
pub struct AffixTable {
    /// Declared encoding label (`SET`).
    pub encoding: String,
    pub flag_type: FlagType,
    pub special: SpecialFlags,
    pub compound: CompoundConfig,
    pub replacements: ReplacementTable,
    /// Groups of related characters (`MAP`); multi-character items allowed.
    pub map: Vec<Vec<String>>,
    /// Keyboard rows separated by `|`.
    pub key: String,
    /// Characters tried by insertion and substitution suggestions.
    pub try_chars: Option<String>,
    /// Characters removed from stems, affixes and queries.
    pub ignore: Vec<char>,
    pub word_chars: String,
    pub lang: Option<String>,
    pub no_split_suggestions: bool,
    pub full_strip: bool,
    flag_aliases: Vec<FlagSet>,
    morph_aliases: Vec<Vec<String>>,
    inert_flags: Vec<Flag>,
    rules: Vec<AffixRule>,
    rule_by_flag: HashMap<Flag, usize>,
    suffix_index: HashMap<String, Vec<AffixRef>>,
    prefix_index: HashMap<String, Vec<AffixRef>>,
    max_prefix_add: usize,
    max_suffix_add: usize,
    max_strip: usize,
}

impl Default for AffixTable {
    fn default() -> Self {
        Self {
            encoding: DEFAULT_ENCODING.to_string(),
            flag_type: FlagType::default(),
            special: SpecialFlags::default(),
            compound: CompoundConfig::default(),
            replacements: ReplacementTable::new(),
            map: Vec::new(),
            key: DEFAULT_KEY.to_string(),
            try_chars: None,
            ignore: Vec::new(),
            word_chars: String::new(),
            lang: None,
            no_split_suggestions: false,
            full_strip: false,
            flag_aliases: Vec::new(),
            morph_aliases: Vec::new(),
            inert_flags: Vec::new(),
            rules: Vec::new(),
            rule_by_flag: HashMap::new(),
            suffix_index: HashMap::new(),
            prefix_index: HashMap::new(),
            max_prefix_add: 0,
            max_suffix_add: 0,
            max_strip: 0,
        }
    }
}

/// A non-blank, non-comment line split into whitespace-separated tokens.
struct Line<'a> {
    number: usize,
    tokens: Vec<&'a str>,
}

impl<'a> Line<'a> {
    fn directive(&self) -> &'a str {
        self.tokens[0]
    }

    fn arg(&self, index: usize) -> Option<&'a str> {
        self.tokens.get(index).copied()
    }

    fn error(&self, kind: RuleErrorKind) -> RuleParseError {
        RuleParseError {
            line: self.number,
            kind,
        }
    }

    fn required_arg(&self, index: usize) -> Result<&'a str, RuleParseError> {
        self.arg(index)
            .ok_or_else(|| self.error(RuleErrorKind::MissingValue(self.directive().to_string())))
    }
}

fn tokenize(text: &str) -> Vec<Line<'_>> {
    text.lines()
        .enumerate()
        .filter_map(|(i, raw)| {
            let tokens: Vec<&str> = raw.split_whitespace().collect();
            match tokens.first() {
                None => None,
                Some(first) if first.starts_with('#') => None,
                Some(_) => Some(Line {
                    number: i + 1,
                    tokens,
                }),
            }
        })
        .collect()
}

/// Read the body of a counted table (`REP 3` followed by three `REP` lines)
/// and advance `idx` past it.
fn read_table<'l, 'a>(
    lines: &'l [Line<'a>],
    idx: &mut usize,
) -> Result<&'l [Line<'a>], RuleParseError> {
    let header = &lines[*idx];
    let count_text = header.required_arg(1)?;
    let count: usize = count_text
        .parse()
        .map_err(|_| header.error(RuleErrorKind::BadCount(count_text.to_string())))?;
    let start = *idx + 1;
    let found = lines[start..]
        .iter()
        .take(count)
        .take_while(|line| line.directive() == header.directive())
        .count();
    if found < count {
        return Err(header.error(RuleErrorKind::MissingEntries {
            expected: count,
            found,
        }));
    }
    *idx = start + count;
    Ok(&lines[start..start + count])
}

fn parse_map_group(text: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '(' {
            let item: String = chars.by_ref().take_while(|&g| g != ')').collect();
            if !item.is_empty() {
                items.push(item);
            }
        } else {
            items.push(c.to_string());
        }
    }
    items
}

impl AffixTable {
    /// Compile affix-file text.
    pub fn parse(text: &str) -> Result<Self, RuleParseError> {
        let lines = tokenize(text);
        let mut table = AffixTable::default();
        table.read_layout_directives(&lines)?;
        table.read_aliases(&lines)?;
        table.read_body(&lines)?;
        table.build_indexes();
        debug!(
            rules = table.rules.len(),
            replacements = table.replacements.len(),
            compound_rules = table.compound.rules.len(),
            "affix table compiled"
        );
        Ok(table)
    }

    // ---------------------------------------------------------------------
    // Pass 1: FLAG, IGNORE, AF, AM
    // ---------------------------------------------------------------------

    fn read_layout_directives(&mut self, lines: &[Line<'_>]) -> Result<(), RuleParseError> {
        for line in lines {
            match line.directive() {
                "FLAG" => {
                    let value = line.required_arg(1)?;
                    self.flag_type = FlagType::from_directive(value).ok_or_else(|| {
                        line.error(RuleErrorKind::UnknownFlagType(value.to_string()))
                    })?;
                }
                "IGNORE" => self.ignore = line.required_arg(1)?.chars().collect(),
                _ => {}
            }
        }
        Ok(())
    }

    fn read_aliases(&mut self, lines: &[Line<'_>]) -> Result<(), RuleParseError> {
        let mut idx = 0;
        while idx < lines.len() {
            match lines[idx].directive() {
                "AF" => {
                    for line in read_table(lines, &mut idx)? {
                        let text = line.required_arg(1)?;
                        let flags = self.flag_type.parse(text).map_err(|reason| {
                            line.error(RuleErrorKind::InvalidFlag {
                                flag: text.to_string(),
                                reason,
                            })
                        })?;
                        self.flag_aliases.push(flags.into_iter().collect());
                    }
                }
                "AM" => {
                    for line in read_table(lines, &mut idx)? {
                        self.morph_aliases
                            .push(line.tokens[1..].iter().map(|t| t.to_string()).collect());
                    }
                }
                _ => idx += 1,
            }
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Pass 2: everything else
    // ---------------------------------------------------------------------

    fn read_body(&mut self, lines: &[Line<'_>]) -> Result<(), RuleParseError> {
        let mut idx = 0;
        while idx < lines.len() {
            let line = &lines[idx];
            let directive = line.directive();
            if let Some(kind) = AffixKind::from_directive(directive) {
                self.read_rule_block(lines, &mut idx, kind)?;
                continue;
            }
            if let Some(slot) = self.special.slot(directive) {
                let value = line.required_arg(1)?;
                let flag = self.flag_type.parse_one(value).map_err(|reason| {
                    line.error(RuleErrorKind::InvalidFlag {
                        flag: value.to_string(),
                        reason,
                    })
                })?;
                *slot = Some(flag);
                idx += 1;
                continue;
            }
            match directive {
                "AF" | "AM" => {
                    read_table(lines, &mut idx)?;
                    continue;
                }
                "REP" => {
                    for entry in read_table(lines, &mut idx)? {
                        let pattern = entry.required_arg(1)?;
                        let replacement = entry.required_arg(2)?;
                        self.replacements.push(Replacement::new(pattern, replacement));
                    }
                    continue;
                }
                "MAP" => {
                    for entry in read_table(lines, &mut idx)? {
                        self.map.push(parse_map_group(entry.required_arg(1)?));
                    }
                    continue;
                }
                "COMPOUNDRULE" => {
                    for entry in read_table(lines, &mut idx)? {
                        let pattern = entry.required_arg(1)?;
                        let rule =
                            CompoundRule::parse(pattern, self.flag_type).map_err(|reason| {
                                entry.error(RuleErrorKind::InvalidFlag {
                                    flag: pattern.to_string(),
                                    reason,
                                })
                            })?;
                        self.compound.rules.push(rule);
                    }
                    continue;
                }
                "SET" => self.encoding = line.required_arg(1)?.to_string(),
                "TRY" => self.try_chars = Some(line.required_arg(1)?.to_string()),
                "KEY" => self.key = line.required_arg(1)?.to_string(),
                "WORDCHARS" => self.word_chars = line.required_arg(1)?.to_string(),
                "LANG" => self.lang = Some(line.required_arg(1)?.to_string()),
                "NOSPLITSUGS" => self.no_split_suggestions = true,
                "FULLSTRIP" => self.full_strip = true,
                "COMPOUNDMIN" => self.compound.min_length = parse_count(line)?.max(1),
                "COMPOUNDWORDMAX" => self.compound.max_words = Some(parse_count(line)?),
                "FLAG" | "IGNORE" => {}
                other if INERT_FLAG_DIRECTIVES.contains(&other) => {
                    let value = line.required_arg(1)?;
                    match self.flag_type.parse_one(value) {
                        Ok(flag) => self.inert_flags.push(flag),
                        Err(reason) => {
                            return Err(line.error(RuleErrorKind::InvalidFlag {
                                flag: value.to_string(),
                                reason,
                            }));
                        }
                    }
                    debug!(line = line.number, directive = other, "flag directive has no effect");
                }
                other => debug!(line = line.number, directive = other, "ignoring directive"),
            }
            idx += 1;
        }
        Ok(())
    }

    fn read_rule_block(
        &mut self,
        lines: &[Line<'_>],
        idx: &mut usize,
        kind: AffixKind,
    ) -> Result<(), RuleParseError> {
        let header = &lines[*idx];
        if header.tokens.len() < 4 {
            return Err(header.error(RuleErrorKind::TruncatedEntry));
        }
        let flag_text = header.tokens[1];
        let flag = self.flag_type.parse_one(flag_text).map_err(|reason| {
            header.error(RuleErrorKind::InvalidFlag {
                flag: flag_text.to_string(),
                reason,
            })
        })?;
        let cross_product = match header.tokens[2] {
            "Y" => true,
            "N" => false,
            other => return Err(header.error(RuleErrorKind::BadCrossProduct(other.to_string()))),
        };
        let count: usize = header.tokens[3]
            .parse()
            .map_err(|_| header.error(RuleErrorKind::BadCount(header.tokens[3].to_string())))?;
        if self.rule_by_flag.contains_key(&flag) {
            return Err(header.error(RuleErrorKind::DuplicateRule(flag_text.to_string())));
        }

        let mut entries = Vec::with_capacity(count);
        for found in 0..count {
            let Some(line) = lines.get(*idx + 1 + found) else {
                return Err(header.error(RuleErrorKind::MissingEntries {
                    expected: count,
                    found,
                }));
            };
            match AffixKind::from_directive(line.directive()) {
                Some(k) if k == kind => {}
                Some(_) => {
                    return Err(line.error(RuleErrorKind::KindMismatch {
                        expected: kind.directive(),
                        found: line.directive().to_string(),
                    }));
                }
                None => {
                    return Err(header.error(RuleErrorKind::MissingEntries {
                        expected: count,
                        found,
                    }));
                }
            }
            if line.arg(1) != Some(flag_text) {
                return Err(line.error(RuleErrorKind::FlagMismatch {
                    expected: flag_text.to_string(),
                    found: line.arg(1).unwrap_or_default().to_string(),
                }));
            }
            entries.push(self.read_rule_entry(line, kind)?);
        }

        self.rule_by_flag.insert(flag, self.rules.len());
        self.rules.push(AffixRule {
            flag,
            kind,
            cross_product,
            entries,
        });
        *idx += count + 1;
        Ok(())
    }

    fn read_rule_entry(&self, line: &Line<'_>, kind: AffixKind) -> Result<AffixEntry, RuleParseError> {
        if line.tokens.len() < 4 {
            return Err(line.error(RuleErrorKind::TruncatedEntry));
        }
        let strip = match line.tokens[2] {
            "0" => String::new(),
            s => self.strip_ignored(s).into_owned(),
        };
        let (add_text, cont_text) = match line.tokens[3].split_once('/') {
            Some((add, cont)) => (add, Some(cont)),
            None => (line.tokens[3], None),
        };
        let add = match add_text {
            "0" => String::new(),
            s => self.strip_ignored(s).into_owned(),
        };
        let cont_flags = match cont_text {
            Some(text) => self.resolve_flags(text).map_err(|kind| line.error(kind))?,
            None => FlagSet::new(),
        };

        let pattern = line.arg(4).unwrap_or(".");
        let condition = Condition::parse(pattern).map_err(|reason| {
            line.error(RuleErrorKind::InvalidCondition {
                pattern: pattern.to_string(),
                reason,
            })
        })?;
        let consistent = match kind {
            AffixKind::Suffix => condition.accepts_strip_suffix(&strip),
            AffixKind::Prefix => condition.accepts_strip_prefix(&strip),
        };
        if !consistent {
            return Err(line.error(RuleErrorKind::InconsistentStrip {
                strip,
                condition: pattern.to_string(),
            }));
        }

        let morph_tokens = line.tokens.get(5..).unwrap_or_default();
        Ok(AffixEntry {
            strip,
            add,
            cont_flags,
            condition,
            morph: self.resolve_morph(morph_tokens),
        })
    }

    fn build_indexes(&mut self) {
        for (rule_idx, rule) in self.rules.iter().enumerate() {
            let index = match rule.kind {
                AffixKind::Prefix => &mut self.prefix_index,
                AffixKind::Suffix => &mut self.suffix_index,
            };
            for (entry_idx, entry) in rule.entries.iter().enumerate() {
                index.entry(entry.add.clone()).or_default().push(AffixRef {
                    rule: rule_idx,
                    entry: entry_idx,
                });
                let added = entry.add.chars().count();
                self.max_strip = self.max_strip.max(entry.strip.chars().count());
                match rule.kind {
                    AffixKind::Prefix => self.max_prefix_add = self.max_prefix_add.max(added),
                    AffixKind::Suffix => self.max_suffix_add = self.max_suffix_add.max(added),
                }
            }
        }
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// Resolve a flag field from the dictionary or a continuation class.
    /// With AF aliases, a numeric field names a 1-based alias.
    pub fn resolve_flags(&self, text: &str) -> Result<FlagSet, RuleErrorKind> {
        if !self.flag_aliases.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            let index: usize = text
                .parse()
                .map_err(|_| RuleErrorKind::BadCount(text.to_string()))?;
            return index
                .checked_sub(1)
                .and_then(|i| self.flag_aliases.get(i))
                .cloned()
                .ok_or(RuleErrorKind::UnknownAlias(index));
        }
        self.flag_type
            .parse(text)
            .map(|flags| flags.into_iter().collect())
            .map_err(|reason| RuleErrorKind::InvalidFlag {
                flag: text.to_string(),
                reason,
            })
    }

    /// Resolve morphological fields; a single numeric token names an AM alias.
    pub fn resolve_morph(&self, tokens: &[&str]) -> Vec<String> {
        if let [single] = tokens {
            if let Some(fields) = single
                .parse::<usize>()
                .ok()
                .and_then(|i| i.checked_sub(1))
                .and_then(|i| self.morph_aliases.get(i))
            {
                return fields.clone();
            }
        }
        tokens.iter().map(|t| t.to_string()).collect()
    }

    /// `true` if the flag names a rule, a special flag, a compound rule
    /// element or an accepted inert directive.
    pub fn is_declared(&self, flag: Flag) -> bool {
        self.rule_by_flag.contains_key(&flag)
            || self.special.iter().any(|f| f == flag)
            || self.compound.rules.iter().any(|r| r.flags().any(|f| f == flag))
            || self.inert_flags.contains(&flag)
    }

    /// Remove IGNORE characters.
    pub fn strip_ignored<'w>(&self, word: &'w str) -> Cow<'w, str> {
        if self.ignore.is_empty() || !word.chars().any(|c| self.ignore.contains(&c)) {
            Cow::Borrowed(word)
        } else {
            Cow::Owned(word.chars().filter(|c| !self.ignore.contains(c)).collect())
        }
    }

    pub fn format_flag(&self, flag: Flag) -> String {
        self.flag_type.format(flag)
    }

    pub fn rules(&self) -> &[AffixRule] {
        &self.rules
    }

    pub fn rule(&self, index: usize) -> &AffixRule {
        &self.rules[index]
    }

    pub fn rule_for_flag(&self, flag: Flag) -> Option<(usize, &AffixRule)> {
        self.rule_by_flag.get(&flag).map(|&i| (i, &self.rules[i]))
    }

    /// Rule and entry addressed by `affix`.
    pub fn entry(&self, affix: AffixRef) -> (&AffixRule, &AffixEntry) {
        let rule = &self.rules[affix.rule];
        (rule, &rule.entries[affix.entry])
    }

    /// Entries of the given kind whose add string is exactly `add`.
    pub fn entries_adding(&self, kind: AffixKind, add: &str) -> &[AffixRef] {
        let index = match kind {
            AffixKind::Prefix => &self.prefix_index,
            AffixKind::Suffix => &self.suffix_index,
        };
        index.get(add).map(Vec::as_slice).unwrap_or_default()
    }

    /// Longest prefix plus longest suffix add string, in characters.
    pub fn max_affix_chars(&self) -> usize {
        self.max_prefix_add + self.max_suffix_add
    }

    /// Longest add string of the given kind, in characters.
    pub fn max_add_chars(&self, kind: AffixKind) -> usize {
        match kind {
            AffixKind::Prefix => self.max_prefix_add,
            AffixKind::Suffix => self.max_suffix_add,
        }
    }

    /// Longest strip string of any entry, in characters.
    pub fn max_strip_chars(&self) -> usize {
        self.max_strip
    }

    /// `true` if any compounding directive is active.
    pub fn has_compounding(&self) -> bool {
        let s = &self.special;
        s.compound_flag.is_some()
            || s.compound_begin.is_some()
            || s.compound_middle.is_some()
            || s.compound_end.is_some()
            || !self.compound.rules.is_empty()
    }
}

fn parse_count(line: &Line<'_>) -> Result<usize, RuleParseError> {
    let text = line.required_arg(1)?;
    text.parse()
        .map_err(|_| line.error(RuleErrorKind::BadCount(text.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    const WALK_AFF: &str = "\
SET UTF-8
TRY esianrtolcdugmphbyfvkwzESIANRTOLCDUGMPHBYFVKWZ
NEEDAFFIX X

# regular verbs
SFX V Y 4
SFX V 0 ed [^e]
SFX V 0 d e
SFX V 0 ing [^e]
SFX V e ing e

PFX U Y 1
PFX U 0 un .

REP 1
REP kk k
";

    fn flag(c: char) -> Flag {
        Flag(c as u32)
    }

    #[test]
    fn parses_header_directives() {
        let table = AffixTable::parse(WALK_AFF).unwrap();
        assert_eq!(table.encoding, "UTF-8");
        assert_eq!(table.flag_type, FlagType::Short);
        assert_eq!(table.special.need_affix, Some(flag('X')));
        assert!(table.try_chars.as_deref().unwrap().starts_with("esian"));
        assert_eq!(table.key, DEFAULT_KEY);
        assert_eq!(table.replacements.len(), 1);
    }

    #[test]
    fn parses_rule_blocks() {
        let table = AffixTable::parse(WALK_AFF).unwrap();
        assert_eq!(table.rules().len(), 2);
        let (_, suffix) = table.rule_for_flag(flag('V')).unwrap();
        assert_eq!(suffix.kind, AffixKind::Suffix);
        assert!(suffix.cross_product);
        assert_eq!(suffix.entries.len(), 4);
        assert_eq!(suffix.entries[3].strip, "e");
        assert_eq!(suffix.entries[3].add, "ing");
        let (_, prefix) = table.rule_for_flag(flag('U')).unwrap();
        assert_eq!(prefix.kind, AffixKind::Prefix);
        assert!(prefix.entries[0].condition.is_empty());
    }

    #[test]
    fn indexes_entries_by_add_string() {
        let table = AffixTable::parse(WALK_AFF).unwrap();
        assert_eq!(table.entries_adding(AffixKind::Suffix, "ing").len(), 2);
        assert_eq!(table.entries_adding(AffixKind::Suffix, "ed").len(), 1);
        assert!(table.entries_adding(AffixKind::Suffix, "un").is_empty());
        assert_eq!(table.entries_adding(AffixKind::Prefix, "un").len(), 1);
        assert_eq!(table.max_affix_chars(), 5);
        assert_eq!(table.max_add_chars(AffixKind::Suffix), 3);
        assert_eq!(table.max_strip_chars(), 1);
    }

    #[test]
    fn declared_flags() {
        let table = AffixTable::parse(WALK_AFF).unwrap();
        assert!(table.is_declared(flag('V')));
        assert!(table.is_declared(flag('X')));
        assert!(!table.is_declared(flag('Q')));
    }

    #[test]
    fn default_encoding_without_set() {
        let table = AffixTable::parse("TRY abc\n").unwrap();
        assert_eq!(table.encoding, DEFAULT_ENCODING);
        assert!(!table.has_compounding());
    }

    #[test]
    fn unknown_flag_type() {
        let err = AffixTable::parse("FLAG hex\n").unwrap_err();
        assert_eq!(err.line, 1);
        assert_eq!(err.kind, RuleErrorKind::UnknownFlagType("hex".to_string()));
    }

    #[test]
    fn bad_cross_product() {
        let err = AffixTable::parse("SFX A maybe 1\nSFX A 0 s .\n").unwrap_err();
        assert_eq!(err.kind, RuleErrorKind::BadCrossProduct("maybe".to_string()));
    }

    #[test]
    fn entry_flag_must_match_header() {
        let err = AffixTable::parse("SFX A Y 2\nSFX A 0 s .\nSFX B 0 es .\n").unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(
            err.kind,
            RuleErrorKind::FlagMismatch {
                expected: "A".to_string(),
                found: "B".to_string()
            }
        );
    }

    #[test]
    fn entry_kind_must_match_header() {
        let err = AffixTable::parse("SFX A Y 1\nPFX A 0 re .\n").unwrap_err();
        assert!(matches!(err.kind, RuleErrorKind::KindMismatch { expected: "SFX", .. }));
    }

    #[test]
    fn missing_entries() {
        let err = AffixTable::parse("SFX A Y 3\nSFX A 0 s .\n\nTRY abc\n").unwrap_err();
        assert_eq!(err.line, 1);
        assert_eq!(err.kind, RuleErrorKind::MissingEntries { expected: 3, found: 1 });
    }

    #[test]
    fn invalid_condition() {
        let err = AffixTable::parse("SFX A Y 1\nSFX A 0 s [^aeiou\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(matches!(err.kind, RuleErrorKind::InvalidCondition { .. }));
    }

    #[test]
    fn inconsistent_strip() {
        let err = AffixTable::parse("SFX A Y 1\nSFX A y ies [^aeiou]e\n").unwrap_err();
        assert_eq!(
            err.kind,
            RuleErrorKind::InconsistentStrip {
                strip: "y".to_string(),
                condition: "[^aeiou]e".to_string()
            }
        );
    }

    #[test]
    fn duplicate_rule_block() {
        let text = "SFX A Y 1\nSFX A 0 s .\nSFX A Y 1\nSFX A 0 es .\n";
        let err = AffixTable::parse(text).unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(err.kind, RuleErrorKind::DuplicateRule("A".to_string()));
    }

    #[test]
    fn bad_table_count() {
        let err = AffixTable::parse("REP many\n").unwrap_err();
        assert_eq!(err.kind, RuleErrorKind::BadCount("many".to_string()));
    }

    #[test]
    fn long_flags_and_aliases() {
        let text = "\
FLAG long
AF 2
AF VvUu
AF Vv
AM 1
AM is:past
SFX Vv Y 1
SFX Vv 0 ed . 1
PFX Uu Y 1
PFX Uu 0 re/2 .
";
        let table = AffixTable::parse(text).unwrap();
        let vv = FlagType::Long.parse_one("Vv").unwrap();
        let uu = FlagType::Long.parse_one("Uu").unwrap();
        let alias = table.resolve_flags("1").unwrap();
        assert!(alias.contains(vv) && alias.contains(uu));
        assert_eq!(table.resolve_flags("3"), Err(RuleErrorKind::UnknownAlias(3)));
        let (_, suffix) = table.rule_for_flag(vv).unwrap();
        assert_eq!(suffix.entries[0].morph, vec!["is:past".to_string()]);
        let (_, prefix) = table.rule_for_flag(uu).unwrap();
        assert!(prefix.entries[0].cont_flags.contains(vv));
        assert_eq!(table.format_flag(vv), "Vv");
    }

    #[test]
    fn compounding_directives() {
        let text = "\
COMPOUNDFLAG Z
COMPOUNDMIN 2
COMPOUNDWORDMAX 4
ONLYINCOMPOUND O
COMPOUNDRULE 1
COMPOUNDRULE N*S
";
        let table = AffixTable::parse(text).unwrap();
        assert!(table.has_compounding());
        assert_eq!(table.compound.min_length, 2);
        assert_eq!(table.compound.max_words, Some(4));
        assert_eq!(table.compound.rules.len(), 1);
        assert!(table.is_declared(flag('N')));
        assert!(table.is_declared(flag('O')));
    }

    #[test]
    fn map_key_ignore_and_switches() {
        let text = "\
MAP 2
MAP a\u{00E1}\u{00E0}
MAP (ss)\u{00DF}
KEY qwe|asd
IGNORE -
NOSPLITSUGS
FULLSTRIP
WARN W
SOMETHINGNEW 1
";
        let table = AffixTable::parse(text).unwrap();
        assert_eq!(table.map.len(), 2);
        assert_eq!(table.map[0], vec!["a", "\u{00E1}", "\u{00E0}"]);
        assert_eq!(table.map[1], vec!["ss", "\u{00DF}"]);
        assert_eq!(table.key, "qwe|asd");
        assert_eq!(table.strip_ignored("wa-lk"), "walk");
        assert!(matches!(table.strip_ignored("walk"), Cow::Borrowed(_)));
        assert!(table.no_split_suggestions);
        assert!(table.full_strip);
        assert!(table.is_declared(flag('W')));
    }
}
