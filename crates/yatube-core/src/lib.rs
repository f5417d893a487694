//! # Yatube Core
//!
//! The domain layer of the Yatube blogging platform.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! entities, feed composition, write authorization, and form validation.

pub mod access;
pub mod domain;
pub mod error;
pub mod feed;
pub mod forms;
pub mod ports;

pub use error::DomainError;
