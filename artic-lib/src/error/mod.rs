//! Error types

mod api;

pub use api::*;

/// Top-level error returned by the client and the fetcher.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The remote API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl Error {
    /// Returns `true` if the failure came from the transport rather than the payload.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Api(ApiError::Network(_)) | Self::Api(ApiError::Timeout(_))
        )
    }

    /// Returns `true` if the server answered with a body that could not be decoded.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Api(ApiError::Parse { .. }))
    }
}
