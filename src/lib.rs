//! bearer-inspect: offline inspection and validation of bearer tokens.
//!
//! An API client calls [`validate`] before it connects with a credential.
//! Opaque tokens only get a minimum-length check. Structured three-part
//! tokens are decoded with [`decode`] and rejected when expired or not yet
//! valid. Signatures are not verified.
//!
//! ```
//! use bearer_inspect::{CredentialKind, validate};
//!
//! assert_eq!(validate("opaque-token-0123456789").unwrap(), CredentialKind::Opaque);
//! assert!(validate("short").is_err());
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod core;
pub mod error;
pub mod logger;
pub mod version;

pub use crate::config::{ClientConfig, ConnectionOptions, TokenAuth, TokenInfo};
pub use crate::core::claims::Claims;
pub use crate::core::decoder::decode;
pub use crate::core::validator::{CredentialKind, classify, strip_bearer, validate, validate_at};
pub use crate::error::{ConfigError, DecodeError, ErrorKind, ValidationError};
pub use crate::logger::{Level, Logger, NoOpLogger, TracingLogger, WriterLogger};
pub use crate::version::Version;
