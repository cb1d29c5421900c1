//! Regular expression values.
//!
//! A pattern keeps its source text and flag set as written. Any source is
//! accepted, including lookaround and backreferences; only
//! [`Pattern::compile`] turns it into a `regex::Regex`, and fails for syntax
//! that engine does not support. Reuse only looks at source and flags.

use std::fmt;

use compact_str::CompactString;
use regex::{Regex, RegexBuilder};

use crate::error::{ValueError, ValueResult};

// =============================================================================
// PatternFlags
// =============================================================================

/// Flag letters in canonical order.
const FLAG_CHARS: [char; 8] = ['d', 'g', 'i', 'm', 's', 'u', 'v', 'y'];

/// Set of pattern flags.
///
/// Displays in canonical order (`dgimsuvy`) regardless of input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PatternFlags(u8);

impl PatternFlags {
    pub const HAS_INDICES: Self = Self(1 << 0);
    pub const GLOBAL: Self = Self(1 << 1);
    pub const IGNORE_CASE: Self = Self(1 << 2);
    pub const MULTILINE: Self = Self(1 << 3);
    pub const DOT_ALL: Self = Self(1 << 4);
    pub const UNICODE: Self = Self(1 << 5);
    pub const UNICODE_SETS: Self = Self(1 << 6);
    pub const STICKY: Self = Self(1 << 7);

    pub const fn empty() -> Self {
        Self(0)
    }

    /// Parse flag letters, rejecting unknown and repeated ones.
    pub fn parse(flags: &str) -> ValueResult<Self> {
        let mut set = Self::empty();
        for c in flags.chars() {
            let bit = FLAG_CHARS
                .iter()
                .position(|&f| f == c)
                .ok_or(ValueError::InvalidFlag(c))?;
            let flag = Self(1 << bit);
            if set.contains(flag) {
                return Err(ValueError::DuplicateFlag(c));
            }
            set = set.union(flag);
        }
        Ok(set)
    }

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for PatternFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (bit, c) in FLAG_CHARS.iter().enumerate() {
            if self.0 & (1 << bit) != 0 {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Pattern
// =============================================================================

/// Regular expression source with its flags.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    source: CompactString,
    flags: PatternFlags,
}

impl Pattern {
    /// Create a pattern from `source` and flag letters.
    ///
    /// Fails only on unknown or repeated flags; the source is not compiled.
    pub fn new(source: &str, flags: &str) -> ValueResult<Self> {
        Ok(Self {
            source: source.into(),
            flags: PatternFlags::parse(flags)?,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> PatternFlags {
        self.flags
    }

    /// Compile for matching.
    ///
    /// `i`, `m` and `s` change matching; the other flags are recorded only.
    pub fn compile(&self) -> ValueResult<Regex> {
        let regex = RegexBuilder::new(&self.source)
            .case_insensitive(self.flags.contains(PatternFlags::IGNORE_CASE))
            .multi_line(self.flags.contains(PatternFlags::MULTILINE))
            .dot_matches_new_line(self.flags.contains(PatternFlags::DOT_ALL))
            .build()?;
        Ok(regex)
    }

    /// Same source text and same flag set.
    pub fn same_pattern(&self, other: &Pattern) -> bool {
        self.source == other.source && self.flags == other.flags
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_canonical_order() {
        let flags = PatternFlags::parse("ymgi").unwrap();
        assert_eq!(flags.to_string(), "gimy");
        assert!(flags.contains(PatternFlags::STICKY));
        assert!(!flags.contains(PatternFlags::DOT_ALL));
        assert!(PatternFlags::parse("").unwrap().is_empty());
    }

    #[test]
    fn test_flags_rejected() {
        assert!(matches!(PatternFlags::parse("gq"), Err(ValueError::InvalidFlag('q'))));
        assert!(matches!(PatternFlags::parse("gig"), Err(ValueError::DuplicateFlag('g'))));
    }

    #[test]
    fn test_pattern_matching() {
        let p = Pattern::new("^ab+c$", "i").unwrap();
        let regex = p.compile().unwrap();
        assert!(regex.is_match("ABBC"));
        assert!(!regex.is_match("ac"));
        assert_eq!(p.to_string(), "/^ab+c$/i");

        let dot_all = Pattern::new("a.b", "s").unwrap().compile().unwrap();
        assert!(dot_all.is_match("a\nb"));
    }

    #[test]
    fn test_same_pattern() {
        let a = Pattern::new("a+", "gi").unwrap();
        let b = Pattern::new("a+", "ig").unwrap();
        let c = Pattern::new("a+", "g").unwrap();
        let d = Pattern::new("a*", "gi").unwrap();
        assert!(a.same_pattern(&b));
        assert!(!a.same_pattern(&c));
        assert!(!a.same_pattern(&d));
    }

    #[test]
    fn test_lookaround_and_backreference_sources() {
        let lookahead = Pattern::new("a(?=b)", "").unwrap();
        assert_eq!(lookahead.source(), "a(?=b)");
        let backref = Pattern::new("(a)\\1", "g").unwrap();
        assert_eq!(backref.to_string(), "/(a)\\1/g");

        let again = Pattern::new("a(?=b)", "").unwrap();
        assert!(lookahead.same_pattern(&again));
        assert!(matches!(lookahead.compile(), Err(ValueError::InvalidPattern(_))));
    }

    #[test]
    fn test_invalid_source() {
        let p = Pattern::new("(", "").unwrap();
        assert!(matches!(p.compile(), Err(ValueError::InvalidPattern(_))));
    }
}
