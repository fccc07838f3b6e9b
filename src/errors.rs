//! Unified error types and result handling.
//!
//! The allocation engine itself never fails; everything around it (bill editing,
//! validation at the boundary, configuration, split history) reports through
//! this single error enum.

use thiserror::Error;

/// Crate-wide error type
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Bill JSON could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The bill failed structural validation
    #[error("Invalid bill: {}", .reasons.join("; "))]
    InvalidBill {
        /// Human-readable reasons, one per problem found
        reasons: Vec<String>,
    },

    /// A price or tax value was negative or not finite
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// No person with this id exists in the bill
    #[error("Person not found: {id}")]
    PersonNotFound {
        /// The unresolved person id
        id: String,
    },

    /// The person is still the payer or a consumer of some item
    #[error("Person '{id}' is still referenced by the bill")]
    PersonInUse {
        /// The referenced person id
        id: String,
    },

    /// No item with this id exists in the bill
    #[error("Item not found: {id}")]
    ItemNotFound {
        /// The unresolved item id
        id: String,
    },

    /// A person or item id is already taken
    #[error("Duplicate id: {id}")]
    DuplicateId {
        /// The id that collided
        id: String,
    },

    /// A saved split needs a non-blank title
    #[error("Invalid split title: {title:?}")]
    InvalidTitle {
        /// The rejected title as given
        title: String,
    },

    /// The command line named no known command
    #[error("Unknown command: {command}")]
    UnknownCommand {
        /// The command as typed
        command: String,
    },

    /// No saved split with this id exists
    #[error("Saved split not found: {id}")]
    SplitNotFound {
        /// The unresolved split id
        id: i64,
    },
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
