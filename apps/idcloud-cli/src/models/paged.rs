//! Query result envelope shared by list endpoints

use serde::{Deserialize, Serialize};

/// Result of a `_queryFilter` request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    #[serde(default = "Vec::new")]
    pub result: Vec<T>,

    #[serde(default)]
    pub result_count: Option<i64>,

    /// Continuation cookie; absent or null on the last page
    #[serde(default)]
    pub paged_results_cookie: Option<String>,
}

impl<T> PagedResult<T> {
    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }

    pub fn len(&self) -> usize {
        self.result.len()
    }
}
