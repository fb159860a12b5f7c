use serde::{Deserialize, Serialize};

/// Spring-style page envelope returned by every list endpoint. Pages are
/// zero-indexed; extra wire fields such as `first` and `last` are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub size: u32,
    pub number: u32,
}
