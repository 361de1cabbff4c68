//! Error types for request dispatch

use lesali_crypto::{EnvelopeError, PaddingError, ProtocolError};
use thiserror::Error;

/// Reasons a request/response exchange was aborted.
///
/// `E` is the error type of the collaborators, surfaced unchanged.
#[derive(Debug, Error)]
pub enum DispatchError<E> {
    /// Reading the request or writing the response failed, including short reads
    #[error("Transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// The request violated the message-number discipline
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The request did not authenticate under the session's shared secret
    #[error("Authentication failed")]
    Authentication,

    /// The decrypted request, or the padding chosen for the response, was malformed
    #[error(transparent)]
    Padding(#[from] PaddingError),

    /// The response could not be sealed
    #[error("Encryption failed")]
    Encryption,

    /// A collaborator rejected the exchange
    #[error("Collaborator error: {0}")]
    Collaborator(E),
}

impl<E> From<EnvelopeError> for DispatchError<E> {
    fn from(value: EnvelopeError) -> Self {
        match value {
            EnvelopeError::Authentication => DispatchError::Authentication,
            EnvelopeError::Encryption => DispatchError::Encryption,
            EnvelopeError::Padding(padding) => DispatchError::Padding(padding),
        }
    }
}

/// Errors raised by the client half of an exchange
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ClientError {
    /// The message number cannot be used for a request
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Sealing the request or opening the response failed
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
}

impl From<PaddingError> for ClientError {
    fn from(value: PaddingError) -> Self {
        ClientError::Envelope(value.into())
    }
}
