//! Error types for the offers client and store.
//!
//! # Design
//! `NotFound` gets a dedicated variant because a stale id (the offer was
//! deleted elsewhere) is the one failure a screen may want to react to.
//! Every other non-2xx response lands in `Http` with the raw status and
//! body. `Transport` means no response arrived at all.

use thiserror::Error;

use crate::types::OfferIdError;

/// Errors produced while building requests or parsing responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("invalid offer id: {0}")]
    InvalidId(#[from] OfferIdError),

    /// The transport failed before a response was received.
    #[error("transport failed: {0}")]
    Transport(#[from] TransportError),
}

impl ApiError {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound => Some(404),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Raised by a [`Transport`](crate::transport::Transport) when the request
/// could not be delivered or the response could not be read.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Errors returned by `OfferStore` operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// An update was requested while no persisted offer was selected.
    #[error("no offer selected")]
    NothingSelected,
}
