//! In-memory session table with replay protection.

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use lesali_crypto::{MessageNumber, PublicKey, SharedSecret};
use log::{debug, warn};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors returned by [`InMemoryPeerStore`]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PeerStoreError {
    /// No session is registered for the key
    #[error("Unknown peer {0}")]
    UnknownPeer(PublicKey),

    /// The message number was already consumed, or is older than one that was
    #[error("Message {message_number} from {peer} replayed, last consumed {last_consumed}")]
    Replayed {
        /// Peer the request claimed to come from
        peer: PublicKey,
        /// Number carried by the request
        message_number: MessageNumber,
        /// Highest number consumed so far for this peer
        last_consumed: MessageNumber,
    },

    /// The exchange was cancelled by its caller
    #[error("Exchange cancelled")]
    Cancelled,

    /// Another thread panicked while holding the store lock
    #[error("Peer store lock poisoned")]
    LockPoisoned,
}

#[derive(Debug)]
struct PeerState {
    shared_secret: SharedSecret,
    last_consumed: Option<MessageNumber>,
}

impl PeerState {
    fn check_fresh(
        &self,
        peer: &PublicKey,
        message_number: MessageNumber,
    ) -> Result<(), PeerStoreError> {
        match self.last_consumed {
            Some(last_consumed) if message_number <= last_consumed => {
                Err(PeerStoreError::Replayed {
                    peer: *peer,
                    message_number,
                    last_consumed,
                })
            }
            _ => Ok(()),
        }
    }
}

/// Peers keyed by public key, each with its shared secret and the highest request number
/// consumed so far.
///
/// Message numbers must increase per peer; gaps are allowed. [`consume`](Self::consume) checks
/// and records a number under a single lock, so of several exchanges carrying the same number
/// only one is accepted.
#[derive(Debug, Default)]
pub struct InMemoryPeerStore {
    peers: Mutex<HashMap<PublicKey, PeerState>>,
}

impl InMemoryPeerStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<PublicKey, PeerState>>, PeerStoreError> {
        self.peers.lock().map_err(|_| PeerStoreError::LockPoisoned)
    }

    /// Register `peer` under `shared_secret`.
    ///
    /// Registering a peer again with the secret it already has keeps its replay state, so
    /// requests consumed before stay rejected. A new secret starts a fresh session.
    pub fn register(
        &self,
        peer: PublicKey,
        shared_secret: SharedSecret,
    ) -> Result<(), PeerStoreError> {
        let mut peers = self.lock()?;
        match peers.get_mut(&peer) {
            Some(state) if state.shared_secret == shared_secret => {
                debug!("Peer {} already registered", peer.short_id());
            }
            Some(state) => {
                state.shared_secret = shared_secret;
                state.last_consumed = None;
                debug!("Replaced session for peer {}", peer.short_id());
            }
            None => {
                peers.insert(
                    peer,
                    PeerState {
                        shared_secret,
                        last_consumed: None,
                    },
                );
                debug!("Registered peer {}", peer.short_id());
            }
        }
        Ok(())
    }

    /// Forget `peer`. Returns whether it was registered.
    pub fn remove(&self, peer: &PublicKey) -> Result<bool, PeerStoreError> {
        Ok(self.lock()?.remove(peer).is_some())
    }

    /// The highest request number consumed for `peer`, if any.
    pub fn last_consumed(&self, peer: &PublicKey) -> Result<Option<MessageNumber>, PeerStoreError> {
        self.lock()?
            .get(peer)
            .map(|state| state.last_consumed)
            .ok_or(PeerStoreError::UnknownPeer(*peer))
    }

    /// Look up the session for `peer` and check that `message_number` has not been consumed.
    ///
    /// The check is advisory; the number is only claimed by [`consume`](Self::consume).
    pub fn establish(
        &self,
        ctx: CancellationToken,
        peer: &PublicKey,
        message_number: MessageNumber,
    ) -> Result<(CancellationToken, SharedSecret), PeerStoreError> {
        if ctx.is_cancelled() {
            return Err(PeerStoreError::Cancelled);
        }

        let peers = self.lock()?;
        let state = peers.get(peer).ok_or_else(|| {
            warn!("Request {message_number} from unknown peer {}", peer.short_id());
            PeerStoreError::UnknownPeer(*peer)
        })?;
        state.check_fresh(peer, message_number)?;
        let shared_secret = state.shared_secret.clone();
        drop(peers);

        Ok((ctx, shared_secret))
    }

    /// Record `message_number` as consumed for `peer`.
    ///
    /// Fails with [`PeerStoreError::Replayed`] unless the number is greater than every number
    /// consumed before it.
    pub fn consume(
        &self,
        ctx: &CancellationToken,
        peer: &PublicKey,
        message_number: MessageNumber,
    ) -> Result<(), PeerStoreError> {
        if ctx.is_cancelled() {
            return Err(PeerStoreError::Cancelled);
        }

        let mut peers = self.lock()?;
        let state = peers
            .get_mut(peer)
            .ok_or(PeerStoreError::UnknownPeer(*peer))?;
        state.check_fresh(peer, message_number).inspect_err(|_| {
            warn!(
                "Replayed request {message_number} from {}",
                peer.short_id()
            );
        })?;
        state.last_consumed = Some(message_number);
        Ok(())
    }
}
