use thiserror::Error;

/// Errors raised by the data layer and the recommendation facade.
///
/// Nothing in this crate recovers from these locally; they propagate through
/// `anyhow::Result` up to the process boundary.
#[derive(Debug, Error)]
pub enum RecError {
    #[error("missing required column `{0}` in header")]
    MissingColumn(&'static str),

    #[error("record {record}: invalid value for column `{column}`: {message}")]
    MalformedRecord {
        record: usize,
        column: &'static str,
        message: String,
    },

    #[error("artist directory has not been loaded")]
    DirectoryNotLoaded,

    #[error("artist id {0} not found in directory")]
    UnknownArtist(usize),

    #[error("model has not been fitted")]
    ModelNotFitted,

    #[error("user id {user_id} out of range for matrix with {num_users} users")]
    UserOutOfRange { user_id: usize, num_users: usize },

    #[error("recommendation count must be at least 1")]
    InvalidCount,
}
