//! Inclusion and exclusion pattern matching over raw rule lines.

use regex::Regex;

use crate::error::{Error, Result};

/// A single compiled line pattern.
#[derive(Debug, Clone)]
enum Matcher {
    /// `/regex/` literal
    Regex(Regex),
    /// Glob with `*` and `?` wildcards, compiled to an anchored regex
    Glob(Regex),
    /// Plain substring match
    Substring(String),
}

impl Matcher {
    fn matches(&self, line: &str) -> bool {
        match self {
            Matcher::Regex(re) | Matcher::Glob(re) => re.is_match(line),
            Matcher::Substring(s) => line.contains(s.as_str()),
        }
    }
}

/// A compiled set of inclusion and exclusion patterns.
///
/// A line is kept when the inclusion list is empty or at least one
/// inclusion matches, and no exclusion matches. Exclusion wins when both
/// match. Matching is against the raw line text.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    inclusions: Vec<Matcher>,
    exclusions: Vec<Matcher>,
}

impl PatternSet {
    /// Compile inclusion and exclusion patterns.
    ///
    /// A malformed `/regex/` pattern is a configuration error.
    pub fn compile(inclusions: &[String], exclusions: &[String]) -> Result<Self> {
        Ok(Self {
            inclusions: inclusions
                .iter()
                .map(|p| compile_pattern(p))
                .collect::<Result<_>>()?,
            exclusions: exclusions
                .iter()
                .map(|p| compile_pattern(p))
                .collect::<Result<_>>()?,
        })
    }

    /// Whether this set keeps every line unchanged.
    pub fn is_empty(&self) -> bool {
        self.inclusions.is_empty() && self.exclusions.is_empty()
    }

    /// Whether a line survives the patterns.
    pub fn keeps(&self, line: &str) -> bool {
        let included =
            self.inclusions.is_empty() || self.inclusions.iter().any(|m| m.matches(line));
        included && !self.exclusions.iter().any(|m| m.matches(line))
    }

    /// Filter a line sequence, preserving order.
    pub fn filter(&self, lines: Vec<String>) -> Vec<String> {
        if self.is_empty() {
            return lines;
        }
        lines.into_iter().filter(|line| self.keeps(line)).collect()
    }
}

fn compile_pattern(pattern: &str) -> Result<Matcher> {
    let invalid = |reason: String| Error::InvalidPattern {
        pattern: pattern.to_string(),
        reason,
    };

    if pattern.len() > 1 && pattern.starts_with('/') && pattern.ends_with('/') {
        let re = Regex::new(&pattern[1..pattern.len() - 1]).map_err(|e| invalid(e.to_string()))?;
        return Ok(Matcher::Regex(re));
    }

    if pattern.contains('*') || pattern.contains('?') {
        let re = Regex::new(&glob_to_regex(pattern)).map_err(|e| invalid(e.to_string()))?;
        return Ok(Matcher::Glob(re));
    }

    Ok(Matcher::Substring(pattern.to_string()))
}

/// Translate a glob into an anchored regex.
fn glob_to_regex(glob: &str) -> String {
    let mut re = String::with_capacity(glob.len() + 8);
    re.push('^');
    for c in glob.chars() {
        match c {
            '*' => re.push_str(".*"),
            '?' => re.push('.'),
            c => re.push_str(&regex::escape(&c.to_string())),
        }
    }
    re.push('$');
    re
}
