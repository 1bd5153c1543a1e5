use serde::{Deserialize, Serialize};

/// Result of one calendar reconciliation pass.
///
/// `upserted` counts rows written (including unchanged re-writes, since the
/// upsert is convergent), `deleted` counts rows removed for cancelled source
/// events. A per-row write failure does not abort the pass; the last one
/// seen is reported in `last_error`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncOutcome {
    pub upserted: u32,
    pub deleted: u32,
    pub last_error: Option<String>,
}
