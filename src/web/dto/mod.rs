//! Request and response DTOs for the mail API.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
