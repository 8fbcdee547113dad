//! Named rule-list transformations.
//!
//! Each transformation is a pure function from a line sequence to a line
//! sequence, identified by a case-sensitive name from a closed set. Names
//! are validated once at configuration time; dispatch is an exhaustive
//! match, so adding a variant without semantics fails to compile.

mod compress;
mod idn;
mod modifiers;
mod validate;

use std::fmt;

use ahash::AHashSet;

use crate::error::{Error, Result};

/// A rule-list transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transformation {
    /// Drop lines whose first non-whitespace character is `!` or `#`
    RemoveComments,
    /// Convert hosts-file syntax lines into adblock syntax
    Compress,
    /// Strip rule modifiers a DNS-level blocker does not support
    RemoveModifiers,
    /// Drop rules that are dangerous or malformed for DNS-level blocking
    Validate,
    /// Like `Validate`, but IP-literal rules are permitted
    ValidateAllowIp,
    /// Remove exact-duplicate lines, keeping the first occurrence
    Deduplicate,
    /// Swap exception (`@@`) and blocking rules
    InvertAllow,
    /// Drop lines that are empty after trimming
    RemoveEmptyLines,
    /// Strip leading and trailing whitespace from every line
    TrimLines,
    /// Ensure the serialized output ends with exactly one newline
    InsertFinalNewLine,
    /// Convert internationalized domain labels to punycode
    ConvertToAscii,
}

impl Transformation {
    /// Parse a transformation name. Names are case-sensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "RemoveComments" => Some(Self::RemoveComments),
            "Compress" => Some(Self::Compress),
            "RemoveModifiers" => Some(Self::RemoveModifiers),
            "Validate" => Some(Self::Validate),
            "ValidateAllowIp" => Some(Self::ValidateAllowIp),
            "Deduplicate" => Some(Self::Deduplicate),
            "InvertAllow" => Some(Self::InvertAllow),
            "RemoveEmptyLines" => Some(Self::RemoveEmptyLines),
            "TrimLines" => Some(Self::TrimLines),
            "InsertFinalNewLine" => Some(Self::InsertFinalNewLine),
            "ConvertToAscii" => Some(Self::ConvertToAscii),
            _ => None,
        }
    }

    /// Get the canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RemoveComments => "RemoveComments",
            Self::Compress => "Compress",
            Self::RemoveModifiers => "RemoveModifiers",
            Self::Validate => "Validate",
            Self::ValidateAllowIp => "ValidateAllowIp",
            Self::Deduplicate => "Deduplicate",
            Self::InvertAllow => "InvertAllow",
            Self::RemoveEmptyLines => "RemoveEmptyLines",
            Self::TrimLines => "TrimLines",
            Self::InsertFinalNewLine => "InsertFinalNewLine",
            Self::ConvertToAscii => "ConvertToAscii",
        }
    }

    /// Parse a list of names, failing on the first unknown one.
    pub fn parse_list(names: &[String]) -> Result<Vec<Transformation>> {
        names
            .iter()
            .map(|name| {
                Transformation::parse(name)
                    .ok_or_else(|| Error::UnknownTransformation(name.clone()))
            })
            .collect()
    }

    /// Apply this transformation to a line sequence.
    pub fn apply(self, lines: Vec<String>) -> Vec<String> {
        match self {
            Self::RemoveComments => remove_comments(lines),
            Self::Compress => compress::compress(lines),
            Self::RemoveModifiers => modifiers::remove_modifiers(lines),
            Self::Validate => validate::validate(lines, false),
            Self::ValidateAllowIp => validate::validate(lines, true),
            Self::Deduplicate => deduplicate(lines),
            Self::InvertAllow => invert_allow(lines),
            Self::RemoveEmptyLines => remove_empty_lines(lines),
            Self::TrimLines => trim_lines(lines),
            // Serialization marker, honored by the output writer
            Self::InsertFinalNewLine => lines,
            Self::ConvertToAscii => idn::convert_to_ascii(lines),
        }
    }

    /// Apply a list of transformations in order.
    pub fn apply_all(transformations: &[Transformation], lines: Vec<String>) -> Vec<String> {
        transformations
            .iter()
            .fold(lines, |lines, t| t.apply(lines))
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a trimmed line is a `!` or `#` comment.
pub(crate) fn is_comment(trimmed: &str) -> bool {
    trimmed.starts_with('!') || trimmed.starts_with('#')
}

fn remove_comments(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .filter(|line| !is_comment(line.trim_start()))
        .collect()
}

fn remove_empty_lines(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .collect()
}

fn trim_lines(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .map(|line| line.trim().to_string())
        .collect()
}

fn deduplicate(lines: Vec<String>) -> Vec<String> {
    let mut seen = AHashSet::with_capacity(lines.len());
    lines
        .into_iter()
        .filter(|line| seen.insert(line.clone()))
        .collect()
}

fn invert_allow(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() || is_comment(trimmed) {
                line
            } else if let Some(rest) = trimmed.strip_prefix("@@") {
                rest.to_string()
            } else {
                format!("@@{}", trimmed)
            }
        })
        .collect()
}
