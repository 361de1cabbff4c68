//! The seam between the dispatcher and the code that owns sessions, replay state and
//! application logic.

use std::marker::PhantomData;

use lesali_crypto::{default_padding_size, MessageNumber, PublicKey, SharedSecret};

/// Padding policy used when none is configured.
pub type PaddingSizeFn = fn(usize) -> (usize, u8);

/// External collaborators invoked by the [`Dispatcher`](crate::Dispatcher).
///
/// The dispatcher holds no replay state. Implementations must make sure that, for a given
/// public key, a message number is accepted by [`update_nonce`](Self::update_nonce) at most
/// once, even when several exchanges carrying it run concurrently. Without that, a captured
/// request can be replayed.
pub trait Collaborators {
    /// Per-exchange context threaded through every call. The dispatcher never inspects it; it
    /// exists so implementations can carry cancellation or request-scoped state.
    type Context;
    /// Error returned by the collaborators, surfaced unchanged to the caller.
    type Error;

    /// Look up or establish the session for `public_key` and return its shared secret.
    ///
    /// Called before the request body is decrypted. Implementations may reject unknown peers
    /// or message numbers they already consider consumed.
    fn establish_context(
        &self,
        ctx: Self::Context,
        public_key: &PublicKey,
        message_number: MessageNumber,
    ) -> Result<(Self::Context, SharedSecret), Self::Error>;

    /// Durably record `message_number` as consumed. Called once the request authenticated.
    fn update_nonce(
        &self,
        ctx: &Self::Context,
        public_key: &PublicKey,
        message_number: MessageNumber,
    ) -> Result<(), Self::Error>;

    /// Produce the plaintext response for a decrypted, unpadded request.
    fn handle_request(&self, ctx: &Self::Context, request: &[u8])
        -> Result<Vec<u8>, Self::Error>;

    /// Choose `(target_len, padding)` for a response of `plain_len` bytes. `padding` must be at
    /// least one.
    fn padding_size(&self, plain_len: usize) -> (usize, u8) {
        default_padding_size(plain_len)
    }
}

/// [`Collaborators`] assembled from four independent functions.
pub struct DispatcherConfig<Ctx, Err, Establish, Update, Handle, Padding = PaddingSizeFn> {
    establish_context: Establish,
    update_nonce: Update,
    handle_request: Handle,
    padding_size: Padding,
    _marker: PhantomData<fn(Ctx) -> Err>,
}

impl<Ctx, Err, Establish, Update, Handle> DispatcherConfig<Ctx, Err, Establish, Update, Handle>
where
    Establish: Fn(Ctx, &PublicKey, MessageNumber) -> Result<(Ctx, SharedSecret), Err>,
    Update: Fn(&Ctx, &PublicKey, MessageNumber) -> Result<(), Err>,
    Handle: Fn(&Ctx, &[u8]) -> Result<Vec<u8>, Err>,
{
    /// Build a configuration that pads responses with the default policy.
    pub fn new(establish_context: Establish, update_nonce: Update, handle_request: Handle) -> Self {
        DispatcherConfig {
            establish_context,
            update_nonce,
            handle_request,
            padding_size: default_padding_size,
            _marker: PhantomData,
        }
    }
}

impl<Ctx, Err, Establish, Update, Handle, Padding>
    DispatcherConfig<Ctx, Err, Establish, Update, Handle, Padding>
{
    /// Replace the padding policy.
    pub fn with_padding_size<P>(
        self,
        padding_size: P,
    ) -> DispatcherConfig<Ctx, Err, Establish, Update, Handle, P>
    where
        P: Fn(usize) -> (usize, u8),
    {
        DispatcherConfig {
            establish_context: self.establish_context,
            update_nonce: self.update_nonce,
            handle_request: self.handle_request,
            padding_size,
            _marker: PhantomData,
        }
    }
}

impl<Ctx, Err, Establish, Update, Handle, Padding> Collaborators
    for DispatcherConfig<Ctx, Err, Establish, Update, Handle, Padding>
where
    Establish: Fn(Ctx, &PublicKey, MessageNumber) -> Result<(Ctx, SharedSecret), Err>,
    Update: Fn(&Ctx, &PublicKey, MessageNumber) -> Result<(), Err>,
    Handle: Fn(&Ctx, &[u8]) -> Result<Vec<u8>, Err>,
    Padding: Fn(usize) -> (usize, u8),
{
    type Context = Ctx;
    type Error = Err;

    fn establish_context(
        &self,
        ctx: Ctx,
        public_key: &PublicKey,
        message_number: MessageNumber,
    ) -> Result<(Ctx, SharedSecret), Err> {
        (self.establish_context)(ctx, public_key, message_number)
    }

    fn update_nonce(
        &self,
        ctx: &Ctx,
        public_key: &PublicKey,
        message_number: MessageNumber,
    ) -> Result<(), Err> {
        (self.update_nonce)(ctx, public_key, message_number)
    }

    fn handle_request(&self, ctx: &Ctx, request: &[u8]) -> Result<Vec<u8>, Err> {
        (self.handle_request)(ctx, request)
    }

    fn padding_size(&self, plain_len: usize) -> (usize, u8) {
        (self.padding_size)(plain_len)
    }
}
