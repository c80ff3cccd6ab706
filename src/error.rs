use thiserror::Error;

use crate::draft::DraftIssue;
use crate::model::RecipeId;

/// Errors that can occur while managing, sharing or importing recipes
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Shared text did not match the expected six-segment layout
    #[error("Contents didn't match expected format: {0}")]
    Format(String),

    /// The transport (clipboard, share sheet, stdin) had nothing to import
    #[error("No contents were found to import")]
    NoData,

    /// A store operation referenced a recipe that does not exist
    #[error("Recipe not found: {0}")]
    NotFound(RecipeId),

    /// The recipe form failed one or more required-field rules
    #[error("Recipe is incomplete: {}", describe_issues(.0))]
    InvalidDraft(Vec<DraftIssue>),

    /// Failed to read or write the recipe file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to (de)serialize the recipe file
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl CatalogError {
    /// Whether the user can fix this by re-copying, re-selecting or editing
    /// the form, as opposed to an environment failure.
    pub fn is_recoverable_by_user(&self) -> bool {
        matches!(
            self,
            CatalogError::Format(_)
                | CatalogError::NoData
                | CatalogError::NotFound(_)
                | CatalogError::InvalidDraft(_)
        )
    }
}

fn describe_issues(issues: &[DraftIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
