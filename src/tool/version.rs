//! Version model for managed tools.
//!
//! A [`SemVer`] keeps the three segments of a dotted version exactly as they
//! were written. Versions that are valid semantic versions order by SemVer
//! precedence (`semver::Version`), so `1.10.0` sorts after `1.9.9`,
//! `1.6.0-rc1` before `1.6.0` and `1.0.0-2` before `1.0.0-10`. Anything else
//! falls back to comparing the leading numeric run of each segment.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::error::{ToolError, ToolResult};

/// A `major.minor.patch` version identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SemVer {
    pub major: String,
    pub minor: String,
    pub patch: String,
}

impl SemVer {
    /// Parse a raw version string.
    ///
    /// Accepts exactly three non-empty dot-separated segments. Surrounding
    /// whitespace and a single leading `v` are ignored.
    pub fn parse(raw: &str) -> ToolResult<Self> {
        let trimmed = raw.trim();
        let version = trimmed.strip_prefix('v').unwrap_or(trimmed);

        let parts: Vec<&str> = version.split('.').collect();
        match parts.as_slice() {
            [major, minor, patch] if parts.iter().all(|p| !p.is_empty()) => Ok(Self {
                major: major.to_string(),
                minor: minor.to_string(),
                patch: patch.to_string(),
            }),
            _ => Err(ToolError::invalid_version(raw)),
        }
    }

    /// Whether the version carries a pre-release tag (`1.6.0-beta2`).
    ///
    /// Build metadata (`1.15.0+ent`) does not make a version a pre-release.
    pub fn is_prerelease(&self) -> bool {
        match self.to_semver() {
            Some(version) => !version.pre.is_empty(),
            None => self.segments().iter().any(|s| s.contains('-')),
        }
    }

    fn to_semver(&self) -> Option<semver::Version> {
        semver::Version::parse(&self.to_string()).ok()
    }

    fn segments(&self) -> [&str; 3] {
        [&self.major, &self.minor, &self.patch]
    }
}

impl fmt::Display for SemVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for SemVer {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Ord for SemVer {
    fn cmp(&self, other: &Self) -> Ordering {
        if let (Some(a), Some(b)) = (self.to_semver(), other.to_semver()) {
            return a.cmp(&b).then_with(|| self.to_string().cmp(&other.to_string()));
        }

        self.segments()
            .iter()
            .zip(other.segments().iter())
            .map(|(a, b)| compare_segment(a, b))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for SemVer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compare two segments of a non-SemVer version: numeric prefix, then
/// "no suffix" beats "suffix", then suffix text. Falls back to the raw text so
/// `Ord` agrees with `Eq`.
fn compare_segment(a: &str, b: &str) -> Ordering {
    let (a_num, a_rest) = split_numeric(a);
    let (b_num, b_rest) = split_numeric(b);

    compare_digits(a_num, b_num)
        .then_with(|| match (a_rest.is_empty(), b_rest.is_empty()) {
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            _ => a_rest.cmp(b_rest),
        })
        .then_with(|| a.cmp(b))
}

fn split_numeric(segment: &str) -> (&str, &str) {
    let end = segment
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(segment.len());
    segment.split_at(end)
}

// Compares digit strings of any length without overflowing an integer type.
fn compare_digits(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }

    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// The `version` field of a declared tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionRequest {
    /// Whatever the source reports as newest
    Latest,
    /// A pinned version
    Exact(SemVer),
}

impl VersionRequest {
    pub const LATEST: &'static str = "latest";

    /// The pinned version, if any.
    pub fn exact(&self) -> Option<&SemVer> {
        match self {
            Self::Latest => None,
            Self::Exact(v) => Some(v),
        }
    }
}

impl FromStr for VersionRequest {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(Self::LATEST) {
            Ok(Self::Latest)
        } else {
            SemVer::parse(s).map(Self::Exact)
        }
    }
}

impl fmt::Display for VersionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => write!(f, "{}", Self::LATEST),
            Self::Exact(v) => write!(f, "{}", v),
        }
    }
}
