//! Shared helpers for integration tests.

pub mod listing_server;
pub mod raw_server;
pub mod socket_guard;
