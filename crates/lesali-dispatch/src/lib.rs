#![doc = include_str!("../README.md")]

mod client;
mod collaborators;
mod dispatcher;
/// Error types for dispatch and the client
pub mod error;
mod peer_store;

#[cfg(test)]
mod proptests;

pub use client::Client;
pub use collaborators::{Collaborators, DispatcherConfig, PaddingSizeFn};
pub use dispatcher::Dispatcher;
pub use error::{ClientError, DispatchError};
pub use peer_store::{InMemoryPeerStore, PeerStoreError};
