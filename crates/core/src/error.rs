/// Domain error shared by every crate in the workspace.
///
/// `Parse` and `Decode` are recoverable on load paths (callers log and fall
/// back). `Shape` only arises at dynamic boundaries where a section or
/// field is named by string.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Shape error: {0}")]
    Shape(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Entity not found: {entity} at index {index}")]
    NotFound { entity: &'static str, index: usize },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
