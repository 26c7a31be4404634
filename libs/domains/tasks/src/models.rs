use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Task {
    /// Store-assigned identifier, immutable after creation
    pub id: i32,
    /// Free-form description; no length or content constraint
    pub task: String,
    /// Completion flag
    pub is_done: bool,
}

/// Request body shared by create and update.
///
/// Update is a whole-record overwrite, not a patch, so both operations
/// carry the full field set. Absent fields decode to their zero values
/// to stay lenient with minimal clients.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct TaskPayload {
    #[serde(default)]
    pub task: String,
    #[serde(default)]
    pub is_done: bool,
}
