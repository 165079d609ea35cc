use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Parameters controlling the shape of a built tree.
///
/// Deserializable so a host can embed it in its own configuration; missing
/// fields fall back to the defaults.
///
/// # Examples
/// ```
/// use centered_interval_tree::BuildParams;
///
/// let params = BuildParams::from_json(r#"{ "min_bucket": 64 }"#).unwrap();
/// assert_eq!(params.max_depth, 16);
/// assert_eq!(params.min_bucket, 64);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildParams {
    /// Maximum number of partitioning levels. Once exhausted the remaining
    /// intervals are stored as one flat, start-sorted bucket. `0` yields a
    /// single flat bucket.
    pub max_depth: usize,
    /// Interval sets smaller than this are never partitioned further.
    pub min_bucket: usize,
}

impl BuildParams {
    pub const DEFAULT_MAX_DEPTH: usize = 16;
    pub const DEFAULT_MIN_BUCKET: usize = 512;

    #[must_use]
    pub fn new(max_depth: usize, min_bucket: usize) -> BuildParams {
        BuildParams { max_depth, min_bucket }
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> BuildParams {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_min_bucket(mut self, min_bucket: usize) -> BuildParams {
        self.min_bucket = min_bucket;
        self
    }

    /// Parses parameters from a JSON object.
    ///
    /// # Errors
    /// Returns [`Error::Config`] if `json` is not a valid parameter object.
    pub fn from_json(json: &str) -> Result<BuildParams, Error> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for BuildParams {
    fn default() -> Self {
        BuildParams::new(Self::DEFAULT_MAX_DEPTH, Self::DEFAULT_MIN_BUCKET)
    }
}
