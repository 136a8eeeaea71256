//! HTTP surface for the trove in-memory catalogue service.
//!
//! Exposes the `users` and `products` REST resources over a single shared
//! in-process store. All state lives for the lifetime of the server
//! process; there is no persistence.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod routes;
pub mod state;
