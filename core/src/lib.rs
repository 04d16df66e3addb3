//! Core components for signed-message API clients.
//!
//! This crate provides the foundational types and traits for the swaggersign
//! ecosystem. It knows nothing about Swagger documents or about a concrete
//! signature scheme; it only defines the seams both sides plug into.
//!
//! ## Overview
//!
//! - **Context**: A container that holds implementations for file reading, HTTP sending, and environment access
//! - **Traits**: Abstract interfaces for credential loading (`ProvideCredential`) and request signing (`SignRequest`)
//! - **Signer**: Coordinates credential loading and request signing
//!
//! ## Example
//!
//! ```no_run
//! use swaggersign_core::{Context, ProvideCredential, Result, SignRequest, Signer, SigningCredential};
//! use async_trait::async_trait;
//! use http::request::Parts;
//!
//! #[derive(Clone, Debug)]
//! struct Token(String);
//!
//! impl SigningCredential for Token {
//!     fn is_valid(&self) -> bool {
//!         !self.0.is_empty()
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct StaticToken;
//!
//! #[async_trait]
//! impl ProvideCredential for StaticToken {
//!     type Credential = Token;
//!
//!     async fn provide_credential(&self, _: &Context) -> Result<Option<Token>> {
//!         Ok(Some(Token("secret".to_string())))
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct BearerSigner;
//!
//! #[async_trait]
//! impl SignRequest for BearerSigner {
//!     type Credential = Token;
//!
//!     async fn sign_request(
//!         &self,
//!         _ctx: &Context,
//!         req: &mut Parts,
//!         _body: &[u8],
//!         cred: Option<&Token>,
//!     ) -> Result<()> {
//!         if let Some(cred) = cred {
//!             req.headers.insert("authorization", format!("Bearer {}", cred.0).parse()?);
//!         }
//!         Ok(())
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let signer = Signer::new(Context::new(), StaticToken, BearerSigner);
//! let (mut parts, body) = http::Request::new(bytes::Bytes::new()).into_parts();
//! signer.sign(&mut parts, &body).await?;
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::Context;
pub use context::Env;
pub use context::FileRead;
pub use context::HttpSend;
pub use context::NoopEnv;
pub use context::NoopFileRead;
pub use context::NoopHttpSend;
pub use context::OsEnv;
pub use context::RequestTimeouts;
pub use context::StaticEnv;

mod error;
pub use error::{Error, ErrorKind, Result};

mod api;
pub use api::{ProvideCredential, ProvideCredentialChain, SignRequest, SigningCredential};
mod signer;
pub use signer::Signer;
