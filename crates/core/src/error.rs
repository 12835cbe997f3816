/// Domain-level error taxonomy.
///
/// Validation failures (`BadRequest`, `ReferenceNotFound`,
/// `ReferenceConflict`) are detected before any write and are fully
/// recoverable. `Communication` covers an unreachable or erroring
/// collaborator; `NotFound` an unknown note id on the retrieval path.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{kind} not found: {id}")]
    ReferenceNotFound { kind: &'static str, id: String },

    #[error("Conflict: {0}")]
    ReferenceConflict(String),

    #[error("Upstream communication failed: {0}")]
    Communication(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
}
