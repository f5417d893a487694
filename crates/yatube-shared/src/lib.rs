//! # Yatube Shared
//!
//! Request/response types of the HTTP API plus the error envelope.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
