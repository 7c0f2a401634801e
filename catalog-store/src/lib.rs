#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod config;
mod error;
pub mod ranking;
mod store;

pub use error::{RemoteFailure, StoreError};
pub use store::{ProductRankingStore, Snapshot};
