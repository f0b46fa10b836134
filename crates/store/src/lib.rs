//! Client for the external managed record store and identity provider.
//!
//! The app owns no persistence: budgets and transactions live in the store,
//! and this crate is the only place that talks to it. Operations are
//! request/response with no retry policy; a failed call surfaces immediately
//! as a [`StoreError`] for the presentation layer to report.

pub use client::{Filter, Order, StoreClient};
pub use error::{Result, StoreError};
pub use session::{Session, SessionHandle, SessionWatch, channel as session_channel, fetch_session};

mod client;
mod error;
mod session;

pub mod budgets;
pub mod transactions;
