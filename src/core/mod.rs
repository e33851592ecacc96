//! Core business logic for bearer token inspection.
//!
//! This module contains the domain logic separated from CLI concerns.
//! All types and functions here are testable without the CLI layer.

pub mod claims;
pub mod decoder;
pub mod time_travel;
pub mod validator;
