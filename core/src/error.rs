//! Error types for the roster client.
//!
//! # Design
//! Each layer owns one enum. `TransportError` is whatever the host reports
//! when the round-trip itself fails; `ApiError` covers everything the client
//! concludes from a response; `RenderError` is raised by renderers before
//! they touch a mount; `AppError` is what controller steps return.

/// The host could not complete the HTTP round-trip (network failure,
/// aborted request, missing browser window).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("transport failure: {0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Errors returned by `PlayerClient` parse methods and `PlayerApi` calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server returned 404 for the requested player.
    #[error("player not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Fetch { status: u16, body: String },

    /// A 2xx response whose envelope reported `success: false`.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The response body could not be deserialized into the expected shape.
    #[error("deserialization failed: {0}")]
    Decode(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Encode(String),
}

/// Errors signalled by renderers. The target mount is left untouched.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("invalid player list: expected an array, got {0}")]
    NotASequence(&'static str),
}

/// Errors returned by controller steps in `RosterApp`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Render(#[from] RenderError),

    /// Submit was requested before the form was rendered.
    #[error("the new-player form is not mounted")]
    FormMissing,
}
