//! Dotted version comparison
//!
//! SDK and runtime versions are compared segment-wise: numeric segments
//! numerically, a textual segment below a numeric one, missing segments as
//! zero. Two-part lines such as `2.0`, four-part builds and NuGet-style
//! prerelease tags all order this way. Versions with equal segments are
//! ordered by semver when both parse, then by their raw text. Plain string
//! comparison never decides between different segments, so `1.0.10` sorts
//! above `1.0.9`.

use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Number(u64),
    Text(String),
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Segment::Number(a), Segment::Number(b)) => a.cmp(b),
            (Segment::Text(a), Segment::Text(b)) => a.cmp(b),
            (Segment::Text(_), Segment::Number(_)) => Ordering::Less,
            (Segment::Number(_), Segment::Text(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A version token with a total ordering suitable for "latest" selection
#[derive(Debug, Clone)]
pub struct DottedVersion {
    raw: String,
    semver: Option<semver::Version>,
    segments: Vec<Segment>,
}

impl DottedVersion {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim().to_string();
        let semver = semver::Version::parse(&raw).ok();
        let segments = raw
            .split(['.', '-', '+'])
            .filter(|s| !s.is_empty())
            .map(|s| match s.parse::<u64>() {
                Ok(n) => Segment::Number(n),
                Err(_) => Segment::Text(s.to_string()),
            })
            .collect();

        Self {
            raw,
            semver,
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The `major.minor` line a version belongs to (`1.0.9` -> `1.0`)
    pub fn line(&self) -> String {
        self.raw.split('.').take(2).collect::<Vec<_>>().join(".")
    }

    fn cmp_segments(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        for i in 0..len {
            let ordering = match (self.segments.get(i), other.segments.get(i)) {
                (Some(a), Some(b)) => a.cmp(b),
                // a trailing text segment marks a prerelease: 1.0.0-rc < 1.0.0
                (Some(Segment::Text(_)), None) => Ordering::Less,
                (None, Some(Segment::Text(_))) => Ordering::Greater,
                (Some(Segment::Number(n)), None) => n.cmp(&0),
                (None, Some(Segment::Number(n))) => 0.cmp(n),
                (None, None) => Ordering::Equal,
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

impl Ord for DottedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        // segments first so the order stays total across semver and non-semver names
        self.cmp_segments(other)
            .then_with(|| self.semver.is_some().cmp(&other.semver.is_some()))
            .then_with(|| match (&self.semver, &other.semver) {
                (Some(a), Some(b)) => a.cmp(b),
                _ => Ordering::Equal,
            })
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for DottedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for DottedVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DottedVersion {}

impl fmt::Display for DottedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Compare two version strings
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    DottedVersion::parse(a).cmp(&DottedVersion::parse(b))
}

/// Sort ascending and drop exact duplicates
pub fn sort_unique(versions: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut parsed: Vec<DottedVersion> = versions
        .into_iter()
        .map(|v| DottedVersion::parse(&v))
        .collect();
    parsed.sort();
    parsed.dedup_by(|a, b| a.raw == b.raw);
    parsed.into_iter().map(|v| v.raw).collect()
}
