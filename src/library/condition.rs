//! Removal conditions for `REM`.
//!
//! Grammar (case-insensitive, first selected rule wins):
//!
//! ```text
//! type == <audio|video|image>
//! size <op> <bytes>          op: >, <, ==, =
//! name contains <substring>
//! <existing path>            exact match on the stored path
//! ```
//!
//! A rule is selected by keyword presence alone (`type`, `size`, or both
//! `name` and `contains`). If the selected rule's pattern then fails to
//! match, parsing fails without trying later rules, so `name contains
//! sizes` is a malformed *size* condition.
//!
//! `name contains` takes the whole rest of the condition as the substring,
//! so `name contains foo.mp3` looks for `foo.mp3`, not just the word `foo`.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::domain::{Entry, MediaKind};

static TYPE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"type\s*==\s*(\w+)").unwrap());
static SIZE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"size\s*([><=]+)\s*(\d+)").unwrap());
static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"name\s+contains\s+(.+)").unwrap());

/// Why a condition removed nothing
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConditionError {
    #[error("malformed {rule} condition: {condition}")]
    Malformed {
        rule: &'static str,
        condition: String,
    },

    #[error("unknown media type: {0}")]
    UnknownKind(String),

    #[error("condition not recognized: {0}")]
    Unrecognized(String),
}

/// Size comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeOp {
    Greater,
    Less,
    Equal,
}

impl SizeOp {
    /// Operator token as matched by `[><=]+`
    ///
    /// Any token containing `>` is "greater", then `<` is "less", anything
    /// else is equality; `>=` therefore behaves like `>`.
    fn from_token(token: &str) -> Self {
        if token.contains('>') {
            SizeOp::Greater
        } else if token.contains('<') {
            SizeOp::Less
        } else {
            SizeOp::Equal
        }
    }

    fn holds(&self, size: u64, bound: u64) -> bool {
        match self {
            SizeOp::Greater => size > bound,
            SizeOp::Less => size < bound,
            SizeOp::Equal => size == bound,
        }
    }
}

/// A parsed removal condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Entries of the given kind
    Kind(MediaKind),

    /// Entries whose size in bytes compares true against the bound
    Size(SizeOp, u64),

    /// Entries whose name contains the (lower-case) substring
    NameContains(String),

    /// Entries stored under exactly this path
    Path(PathBuf),
}

impl Condition {
    /// Parse a condition string
    pub fn parse(text: &str) -> Result<Self, ConditionError> {
        let lower = text.to_lowercase();
        let malformed = |rule: &'static str| ConditionError::Malformed {
            rule,
            condition: text.to_string(),
        };

        if lower.contains("type") {
            let caps = TYPE_RE.captures(&lower).ok_or_else(|| malformed("type"))?;
            let kind = caps[1]
                .parse::<MediaKind>()
                .map_err(|_| ConditionError::UnknownKind(caps[1].to_string()))?;
            return Ok(Condition::Kind(kind));
        }

        if lower.contains("size") {
            let caps = SIZE_RE.captures(&lower).ok_or_else(|| malformed("size"))?;
            let bound = caps[2].parse::<u64>().map_err(|_| malformed("size"))?;
            return Ok(Condition::Size(SizeOp::from_token(&caps[1]), bound));
        }

        if lower.contains("name") && lower.contains("contains") {
            let caps = NAME_RE.captures(&lower).ok_or_else(|| malformed("name"))?;
            let needle = caps[1]
                .trim()
                .trim_matches(|c: char| c == '"' || c == '\'')
                .trim();
            if needle.is_empty() {
                return Err(malformed("name"));
            }
            return Ok(Condition::NameContains(needle.to_string()));
        }

        if Path::new(text).exists() {
            return Ok(Condition::Path(PathBuf::from(text)));
        }

        Err(ConditionError::Unrecognized(text.to_string()))
    }

    /// Whether `entry` satisfies this condition
    pub fn matches(&self, entry: &Entry) -> bool {
        match self {
            Condition::Kind(kind) => entry.kind() == *kind,
            Condition::Size(op, bound) => op.holds(entry.size, *bound),
            Condition::NameContains(needle) => entry.name.to_lowercase().contains(needle.as_str()),
            Condition::Path(path) => entry.path.as_os_str() == path.as_os_str(),
        }
    }
}
