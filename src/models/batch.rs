use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::zone::Zone;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Batch {
    pub zone: Zone,
    pub order_count: usize,
    pub assignment: String,
    pub order_ids: Vec<Uuid>,
}

/// Outcome of one batching pass. Computed per request, never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResult {
    pub batches: Vec<Batch>,
    pub unbatched_count: usize,
}
