use thiserror::Error;

pub type Result<T> = std::result::Result<T, QueryError>;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("invalid cursor: {0}")]
    InvalidCursor(String),

    #[error("invalid sort field: {0}")]
    InvalidSortField(String),

    #[error("invalid pagination: {0}")]
    InvalidPagination(String),

    #[error("page is out of range: offset {from} + size {size} exceeds the result window of {window}")]
    PageOutOfRange { from: u64, size: u32, window: u64 },

    #[error("offset and cursor pagination are mutually exclusive")]
    ConflictingPagination,

    #[error("cursor carries {cursor_len} sort values but the sort specification has {sort_len} fields")]
    CursorSortMismatch { cursor_len: usize, sort_len: usize },

    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl QueryError {
    /// True for errors caused by client input rather than by the caller or the backend.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCursor(_)
                | Self::InvalidSortField(_)
                | Self::InvalidPagination(_)
                | Self::PageOutOfRange { .. }
                | Self::CursorSortMismatch { .. }
        )
    }
}

/// Failures of the search backend round trip.
///
/// A missing index is not represented here: backends report it as an empty result.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("search backend is unreachable: {0}")]
    Unreachable(String),

    #[error("search backend timed out")]
    Timeout,

    #[error("search backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed search backend response: {0}")]
    MalformedResponse(String),
}
