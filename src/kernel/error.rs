use thiserror::Error;

/// Why a workspace operation left the state untouched.
///
/// The UI usually ignores these (a stale tab or a double rename is not worth a
/// dialog), but tests and the build pipeline can match on them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkspaceError {
    #[error("project not found: {0}")]
    ProjectNotFound(String),

    #[error("item not found: {0}")]
    NodeNotFound(String),

    #[error("file is not open: {0}")]
    OpenFileNotFound(String),

    #[error("`{name}` already exists in this directory")]
    NameCollision { name: String, parent: String },

    #[error("not a file: {0}")]
    NotAFile(String),

    #[error("parent is not a directory: {0}")]
    InvalidParent(String),

    #[error("invalid name: {0:?}")]
    InvalidName(String),

    #[error("item id already in use: {0}")]
    DuplicateId(String),
}

impl WorkspaceError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            WorkspaceError::ProjectNotFound(_)
                | WorkspaceError::NodeNotFound(_)
                | WorkspaceError::OpenFileNotFound(_)
        )
    }
}

pub(crate) fn validate_name(name: &str) -> Result<(), WorkspaceError> {
    if name.trim().is_empty() || name.contains('/') || name == "." || name == ".." {
        return Err(WorkspaceError::InvalidName(name.to_string()));
    }
    Ok(())
}
