//! API handlers for the mail API.

pub mod send;

pub use send::*;
