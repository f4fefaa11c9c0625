use std::fmt;

use serde::{Deserialize, Serialize};

use super::Cid;

/// A named edge's target: the CID it points at, plus the
///  cumulative size of the linked block if the writer knew it.
///  The name lives in the parent [`Node`](crate::dag::Node).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    cid: Cid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
}

impl Link {
    pub fn new(cid: Cid) -> Self {
        Self { cid, size: None }
    }

    pub fn with_size(cid: Cid, size: u64) -> Self {
        Self {
            cid,
            size: Some(size),
        }
    }

    pub fn cid(&self) -> &Cid {
        &self.cid
    }

    pub fn size(&self) -> Option<u64> {
        self.size
    }
}

impl From<Cid> for Link {
    fn from(cid: Cid) -> Self {
        Self::new(cid)
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.size {
            Some(size) => write!(f, "{} ({} bytes)", self.cid, size),
            None => write!(f, "{}", self.cid),
        }
    }
}
