use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("rules file invalid: {0}")]
    InvalidRules(String),
    #[error("config invalid or unreadable: {0}")]
    InvalidConfig(String),
    #[error("docs root does not exist: {}", .0.display())]
    DocsRootMissing(PathBuf),
}
