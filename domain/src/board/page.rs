//! Paginated question list
//!
//! Page metadata is computed by the server and passed through as-is.

use super::question::Question;
use serde::{Deserialize, Serialize};

/// One page of the question list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub has_prev: bool,
    pub prev_num: Option<u32>,
    /// Page links; `None` marks an elided gap
    pub page_nums: Vec<Option<u32>>,
    pub has_next: bool,
    pub next_num: Option<u32>,
    /// Search keyword the page was filtered by
    pub kw: String,
}
