//! Logical paths
//!
//! A path is a `/`-separated list of segments whose first segment names a
//! namespace:
//!
//! ```text
//! /ipfs/<cid>/docs/readme    immutable content, walked link by link
//! /ipns/<key>/docs/readme    mutable name, substituted before walking
//! /<other>/...               passed through uninterpreted
//! ```
//!
//! Paths are immutable. Anything that "extends" a path builds a new one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::linked_data::{Cid, CidError};

pub const IPFS_NAMESPACE: &str = "ipfs";
pub const IPNS_NAMESPACE: &str = "ipns";

#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("invalid path: {0:?}")]
    BadPath(String),
    #[error("path must contain at least one component after the namespace")]
    NoComponents,
    #[error("cannot pop a segment from {0}: no key would remain")]
    InvalidPath(String),
    #[error("invalid cid in path: {0}")]
    InvalidCid(#[from] CidError),
}

/// Which namespace the first segment of a path names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    /// `/ipfs/`: immutable, content addressed
    Ipfs,
    /// `/ipns/`: mutable names
    Ipns,
    /// Anything else
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    // never empty, and no segment is ever the empty string
    segments: Vec<String>,
}

/// Split on `/`, dropping empty and `.` segments and applying `..`.
///  `..` at the root is a no-op, as with any rooted path.
fn clean<'a>(parts: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for part in parts.into_iter().flat_map(|p| p.split('/')) {
        match part {
            "" | "." => {}
            ".." => {
                out.pop();
            }
            part => out.push(part.to_string()),
        }
    }
    out
}

impl Path {
    /// Build a path from a string without interpreting its namespace.
    ///
    /// The string is cleaned (`//`, `.`, `..`, and trailing slashes are
    /// normalized away). Fails only if nothing remains.
    pub fn new(s: &str) -> Result<Self, PathError> {
        let segments = clean([s]);
        if segments.is_empty() {
            return Err(PathError::BadPath(s.to_string()));
        }
        Ok(Self { segments })
    }

    /// Build a normalized path from discrete parts. The first part is the
    /// namespace; at least one further part must survive normalization.
    pub fn from_segments<I, S>(segments: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parts: Vec<S> = segments.into_iter().collect();
        let segments = clean(parts.iter().map(|s| s.as_ref()));
        if segments.len() < 2 {
            return Err(PathError::NoComponents);
        }
        Ok(Self { segments })
    }

    /// Strictly parse user input.
    ///
    /// * `<cid>[/...]` is treated as `/ipfs/<cid>[/...]`
    /// * `/ipfs/<cid>[/...]` requires a decodable CID
    /// * `/ipns/<key>[/...]` is accepted as is
    ///
    /// Any other namespace is rejected.
    pub fn parse(s: &str) -> Result<Self, PathError> {
        if !s.starts_with('/') {
            let first = s.split('/').next().unwrap_or_default();
            if first.is_empty() || first.parse::<Cid>().is_err() {
                return Err(PathError::BadPath(s.to_string()));
            }
            return Self::from_segments([IPFS_NAMESPACE, s]);
        }

        let path = Self::new(s)?;
        if path.segments.len() < 2 {
            return Err(PathError::BadPath(s.to_string()));
        }
        match path.namespace() {
            Namespace::Ipfs => {
                path.segments[1].parse::<Cid>()?;
            }
            Namespace::Ipns => {}
            Namespace::Other => return Err(PathError::BadPath(s.to_string())),
        }
        Ok(path)
    }

    /// `/ipfs/<cid>`
    pub fn from_cid(cid: &Cid) -> Self {
        Self {
            segments: vec![IPFS_NAMESPACE.to_string(), cid.to_string()],
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn namespace(&self) -> Namespace {
        match self.segments[0].as_str() {
            IPFS_NAMESPACE => Namespace::Ipfs,
            IPNS_NAMESPACE => Namespace::Ipns,
            _ => Namespace::Other,
        }
    }

    /// The segment after the namespace, if any
    pub fn key(&self) -> Option<&str> {
        self.segments.get(1).map(String::as_str)
    }

    /// True iff this path is exactly `/ipfs/<cid>` and needs no link traversal
    pub fn is_just_a_key(&self) -> bool {
        self.segments.len() == 2 && self.namespace() == Namespace::Ipfs
    }

    /// Split off the final segment. The head keeps at least the namespace
    /// and key segments, so this fails on paths of fewer than three segments.
    pub fn pop_last_segment(&self) -> Result<(Path, String), PathError> {
        let mut head = self.segments.clone();
        let tail = match head.pop() {
            Some(tail) if head.len() >= 2 => tail,
            _ => return Err(PathError::InvalidPath(self.to_string())),
        };
        Ok((Path { segments: head }, tail))
    }

    /// A new path with `segment` appended
    pub fn join(&self, segment: &str) -> Result<Path, PathError> {
        Self::from_segments(self.segments.iter().map(String::as_str).chain([segment]))
    }

    /// Whether this path would survive [`Path::parse`]
    pub fn is_valid(&self) -> Result<(), PathError> {
        Self::parse(&self.to_string()).map(|_| ())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.segments.join("/"))
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(&s).map_err(serde::de::Error::custom)
    }
}

impl From<&Cid> for Path {
    fn from(cid: &Cid) -> Self {
        Self::from_cid(cid)
    }
}
