//! Client half of an exchange: sealing requests and opening the responses to them.

use lesali_crypto::{
    default_padding_size, open_stripped, seal_public, strip_padding, KeyPair, MessageNumber,
    ProtocolError, PublicKey, SharedSecret,
};
use zeroize::Zeroizing;

use crate::error::ClientError;

/// A client bound to one server session.
///
/// The client does not track message numbers itself. Callers pick an unused even number for
/// every request and pass the same number back when opening its response.
#[derive(Debug, Clone)]
pub struct Client {
    public_key: PublicKey,
    shared_secret: SharedSecret,
}

impl Client {
    /// Create a client that announces `public_key` and seals under `shared_secret`.
    pub fn new(public_key: PublicKey, shared_secret: SharedSecret) -> Self {
        Self {
            public_key,
            shared_secret,
        }
    }

    /// Create a client for `server` from the client's own key pair.
    pub fn from_key_pair(key_pair: &KeyPair, server: &PublicKey) -> Self {
        Self::new(key_pair.public_key(), key_pair.precompute(server))
    }

    /// The public key sent in front of every request.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Seal `plain` as a request under `message_number`.
    ///
    /// The result is a Public envelope, ready to be written to the server followed by closing
    /// the sending half of the connection.
    pub fn seal_request(
        &self,
        message_number: MessageNumber,
        plain: &[u8],
    ) -> Result<Vec<u8>, ClientError> {
        let message_number = message_number.ensure_request()?;
        if !message_number.fits_wire() {
            return Err(ProtocolError::CounterOverflow(message_number).into());
        }

        let (_, padding) = default_padding_size(plain.len());
        Ok(seal_public(
            plain,
            &self.public_key,
            &self.shared_secret,
            padding,
            message_number,
        )?)
    }

    /// Open the response to the request sealed under `request_number`.
    pub fn open_response(
        &self,
        request_number: MessageNumber,
        sealed: &[u8],
    ) -> Result<Vec<u8>, ClientError> {
        let padded = Zeroizing::new(open_stripped(
            sealed,
            &self.shared_secret,
            request_number.response(),
        )?);
        Ok(strip_padding(&padded)?.to_vec())
    }
}
