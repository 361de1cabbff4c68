//! Server side of a single request/response exchange.
//!
//! A request arrives as `public_key(32) ‖ counter(6) ‖ sealed body` and runs to the end of the
//! input stream. The response is a Stripped envelope sealed under the request's shared secret
//! and the request's message number plus one.

use std::io::{Read, Write};

use lesali_crypto::{
    open_stripped, seal_stripped, strip_padding, MessageNumber, PublicKey, COUNTER_SIZE,
    KEY_SIZE,
};
use log::{debug, warn};
use zeroize::Zeroizing;

use crate::{collaborators::Collaborators, error::DispatchError};

/// Runs request/response exchanges against a set of [`Collaborators`].
///
/// The dispatcher keeps no state between exchanges, so one instance can serve many connections
/// at once as long as its collaborators can.
#[derive(Debug, Clone)]
pub struct Dispatcher<C> {
    collaborators: C,
}

impl<C: Collaborators> Dispatcher<C> {
    /// Create a dispatcher backed by `collaborators`.
    pub fn new(collaborators: C) -> Self {
        Self { collaborators }
    }

    /// The collaborators this dispatcher calls into.
    pub fn collaborators(&self) -> &C {
        &self.collaborators
    }

    /// Handle one request read from `request` and write the sealed response to `response`.
    ///
    /// The request body is read until end of stream, so the client has to close its sending
    /// half once the request is written. The first failure aborts the exchange. Nothing is
    /// written to `response` unless every other step succeeded.
    pub fn handle_request<R, W>(
        &self,
        ctx: C::Context,
        mut request: R,
        mut response: W,
    ) -> Result<(), DispatchError<C::Error>>
    where
        R: Read,
        W: Write,
    {
        let mut public_key = [0u8; KEY_SIZE];
        request.read_exact(&mut public_key)?;
        let public_key = PublicKey::from_bytes(public_key);

        let mut counter = [0u8; COUNTER_SIZE];
        request.read_exact(&mut counter)?;
        let message_number = MessageNumber::from_wire(counter);

        if let Err(e) = message_number.ensure_request() {
            warn!(
                "Rejecting request from {}: odd message number {message_number}",
                public_key.short_id()
            );
            return Err(e.into());
        }
        debug!("Request {message_number} from {}", public_key.short_id());

        let (ctx, shared_secret) = self
            .collaborators
            .establish_context(ctx, &public_key, message_number)
            .map_err(|e| {
                warn!(
                    "Session for {} rejected request {message_number}",
                    public_key.short_id()
                );
                DispatchError::Collaborator(e)
            })?;

        let mut sealed = Vec::new();
        request.read_to_end(&mut sealed)?;
        let padded = Zeroizing::new(
            open_stripped(&sealed, &shared_secret, message_number).map_err(|e| {
                warn!(
                    "Request {message_number} from {} failed to authenticate",
                    public_key.short_id()
                );
                DispatchError::from(e)
            })?,
        );

        self.collaborators
            .update_nonce(&ctx, &public_key, message_number)
            .map_err(|e| {
                warn!(
                    "Could not consume request {message_number} from {}",
                    public_key.short_id()
                );
                DispatchError::Collaborator(e)
            })?;

        let plain = strip_padding(&padded).map_err(|e| {
            warn!(
                "Request {message_number} from {} has malformed padding: {e}",
                public_key.short_id()
            );
            e
        })?;

        let reply = Zeroizing::new(
            self.collaborators
                .handle_request(&ctx, plain)
                .map_err(|e| {
                    warn!(
                        "Handler rejected request {message_number} from {}",
                        public_key.short_id()
                    );
                    DispatchError::Collaborator(e)
                })?,
        );

        let response_number = message_number.response();
        let (_, padding) = self.collaborators.padding_size(reply.len());
        let sealed_reply = seal_stripped(&reply, &shared_secret, padding, response_number)?;

        response.write_all(&sealed_reply)?;
        response.flush()?;
        debug!(
            "Response {response_number} to {} sealed, {} bytes",
            public_key.short_id(),
            sealed_reply.len()
        );
        Ok(())
    }
}
