// Flag syntax (FLAG directive) and sorted flag sets
//
// A flag names an affix rule or a special marker. Its textual form depends on
// the affix file's FLAG directive:
//   default  one character per flag        "ABC"
//   long     two characters per flag       "AaBb"
//   num      comma-separated decimals      "101,102"
//   UTF-8    one Unicode character per flag
//
// Every syntax is packed into a `Flag(u32)` so that lookups never compare
// strings.

/// Flag syntax declared by the `FLAG` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlagType {
    /// One character per flag (the default).
    #[default]
    Short,
    /// Two characters per flag.
    Long,
    /// Comma-separated decimal numbers.
    Numeric,
    /// One Unicode character per flag.
    Utf8,
}

/// Error produced while reading a flag string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlagError {
    #[error("empty flag")]
    Empty,
    #[error("long flag string `{0}` has an odd number of characters")]
    OddLength(String),
    #[error("invalid numeric flag `{0}`")]
    InvalidNumber(String),
    #[error("flag `{0}` is out of range")]
    OutOfRange(String),
}

/// A single flag, packed into an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Flag(pub u32);

/// Largest value of a numeric flag.
const MAX_NUMERIC_FLAG: u32 = 65_535;

impl FlagType {
    /// Map the argument of a `FLAG` directive to a flag type.
    pub fn from_directive(value: &str) -> Option<Self> {
        match value {
            "long" => Some(FlagType::Long),
            "num" => Some(FlagType::Numeric),
            "UTF-8" | "utf-8" | "UTF8" => Some(FlagType::Utf8),
            "char" | "short" => Some(FlagType::Short),
            _ => None,
        }
    }

    /// Parse a flag string attached to a stem or affix (`walk/ABC`).
    pub fn parse(self, text: &str) -> Result<Vec<Flag>, FlagError> {
        match self {
            FlagType::Short | FlagType::Utf8 => Ok(text.chars().map(|c| Flag(c as u32)).collect()),
            FlagType::Long => {
                let chars: Vec<char> = text.chars().collect();
                if chars.len() % 2 != 0 {
                    return Err(FlagError::OddLength(text.to_string()));
                }
                chars
                    .chunks(2)
                    .map(|pair| pack_long(pair[0], pair[1], text))
                    .collect()
            }
            FlagType::Numeric => text
                .split(',')
                .filter(|part| !part.is_empty())
                .map(parse_numeric)
                .collect(),
        }
    }

    /// Parse exactly one flag, as used by rule headers and special flag
    /// directives (`NEEDAFFIX X`).
    pub fn parse_one(self, text: &str) -> Result<Flag, FlagError> {
        let mut chars = text.chars();
        match self {
            FlagType::Short | FlagType::Utf8 => {
                let first = chars.next().ok_or(FlagError::Empty)?;
                if chars.next().is_some() {
                    return Err(FlagError::OutOfRange(text.to_string()));
                }
                Ok(Flag(first as u32))
            }
            FlagType::Long => {
                let (Some(a), Some(b), None) = (chars.next(), chars.next(), chars.next()) else {
                    return Err(FlagError::OddLength(text.to_string()));
                };
                pack_long(a, b, text)
            }
            FlagType::Numeric => parse_numeric(text),
        }
    }

    /// Render a flag in this syntax.
    pub fn format(self, flag: Flag) -> String {
        match self {
            FlagType::Short | FlagType::Utf8 => char::from_u32(flag.0)
                .map(String::from)
                .unwrap_or_default(),
            FlagType::Long => {
                let mut out = String::with_capacity(2);
                for code in [flag.0 >> 16, flag.0 & 0xFFFF] {
                    if let Some(c) = char::from_u32(code) {
                        out.push(c);
                    }
                }
                out
            }
            FlagType::Numeric => flag.0.to_string(),
        }
    }
}

fn pack_long(a: char, b: char, source: &str) -> Result<Flag, FlagError> {
    let (a, b) = (a as u32, b as u32);
    if a > 0xFFFF || b > 0xFFFF {
        return Err(FlagError::OutOfRange(source.to_string()));
    }
    Ok(Flag((a << 16) | b))
}

fn parse_numeric(text: &str) -> Result<Flag, FlagError> {
    let value: u32 = text
        .trim()
        .parse()
        .map_err(|_| FlagError::InvalidNumber(text.to_string()))?;
    if value == 0 || value > MAX_NUMERIC_FLAG {
        return Err(FlagError::OutOfRange(text.to_string()));
    }
    Ok(Flag(value))
}

// ---------------------------------------------------------------------------
// FlagSet
// ---------------------------------------------------------------------------

/// Sorted, deduplicated set of flags.
///
/// Dictionary entries carry only a handful of flags, so a sorted `Vec` with
/// binary search beats a hash set in both memory and lookup time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FlagSet(Vec<Flag>);

impl FlagSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn contains(&self, flag: Flag) -> bool {
        self.0.binary_search(&flag).is_ok()
    }

    /// `false` when `flag` is `None`: an undeclared special flag is never set.
    pub fn contains_opt(&self, flag: Option<Flag>) -> bool {
        flag.is_some_and(|f| self.contains(f))
    }

    pub fn insert(&mut self, flag: Flag) {
        if let Err(pos) = self.0.binary_search(&flag) {
            self.0.insert(pos, flag);
        }
    }

    /// Add every flag of `other` to this set.
    pub fn union_with(&mut self, other: &FlagSet) {
        for &flag in &other.0 {
            self.insert(flag);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Flag> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render the set in the given flag syntax.
    pub fn format(&self, flag_type: FlagType) -> String {
        let parts: Vec<String> = self.iter().map(|f| flag_type.format(f)).collect();
        match flag_type {
            FlagType::Numeric => parts.join(","),
            _ => parts.concat(),
        }
    }
}

impl FromIterator<Flag> for FlagSet {
    fn from_iter<I: IntoIterator<Item = Flag>>(iter: I) -> Self {
        let mut flags: Vec<Flag> = iter.into_iter().collect();
        flags.sort_unstable();
        flags.dedup();
        Self(flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_type_directives() {
        assert_eq!(FlagType::from_directive("long"), Some(FlagType::Long));
        assert_eq!(FlagType::from_directive("num"), Some(FlagType::Numeric));
        assert_eq!(FlagType::from_directive("UTF-8"), Some(FlagType::Utf8));
        assert_eq!(FlagType::from_directive("hex"), None);
    }

    #[test]
    fn short_flags_are_single_chars() {
        let flags = FlagType::Short.parse("ABA").unwrap();
        assert_eq!(flags, vec![Flag('A' as u32), Flag('B' as u32), Flag('A' as u32)]);
        assert_eq!(FlagType::Short.format(flags[1]), "B");
    }

    #[test]
    fn long_flags_pair_chars() {
        let flags = FlagType::Long.parse("AaBb").unwrap();
        assert_eq!(flags.len(), 2);
        assert_eq!(FlagType::Long.format(flags[0]), "Aa");
        assert_eq!(FlagType::Long.format(flags[1]), "Bb");
        assert_eq!(
            FlagType::Long.parse("Aab"),
            Err(FlagError::OddLength("Aab".to_string()))
        );
    }

    #[test]
    fn numeric_flags_split_on_commas() {
        let flags = FlagType::Numeric.parse("101,7").unwrap();
        assert_eq!(flags, vec![Flag(101), Flag(7)]);
        assert_eq!(FlagType::Numeric.format(Flag(101)), "101");
        assert!(matches!(
            FlagType::Numeric.parse("1,x"),
            Err(FlagError::InvalidNumber(_))
        ));
        assert!(matches!(
            FlagType::Numeric.parse_one("70000"),
            Err(FlagError::OutOfRange(_))
        ));
    }

    #[test]
    fn parse_one_rejects_extra_characters() {
        assert_eq!(FlagType::Short.parse_one("X"), Ok(Flag('X' as u32)));
        assert!(FlagType::Short.parse_one("XY").is_err());
        assert_eq!(FlagType::Short.parse_one(""), Err(FlagError::Empty));
        assert!(FlagType::Long.parse_one("X").is_err());
    }

    #[test]
    fn utf8_flags_accept_non_ascii() {
        let flags = FlagType::Utf8.parse("\u{00C4}\u{00D6}").unwrap();
        assert_eq!(FlagType::Utf8.format(flags[0]), "\u{00C4}");
    }

    #[test]
    fn flag_set_is_sorted_and_deduplicated() {
        let set: FlagSet = [Flag(3), Flag(1), Flag(3), Flag(2)].into_iter().collect();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Flag(1), Flag(2), Flag(3)]);
        assert!(set.contains(Flag(2)));
        assert!(!set.contains(Flag(4)));
        assert!(!set.contains_opt(None));
        assert!(set.contains_opt(Some(Flag(1))));
    }

    #[test]
    fn flag_set_union() {
        let mut a: FlagSet = [Flag(1), Flag(5)].into_iter().collect();
        let b: FlagSet = [Flag(2), Flag(5)].into_iter().collect();
        a.union_with(&b);
        assert_eq!(a.len(), 3);
        assert_eq!(a.format(FlagType::Numeric), "1,2,5");
    }
}
