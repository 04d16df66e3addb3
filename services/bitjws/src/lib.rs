//! bitjws signed-message authentication.
//!
//! Every request carries an `Authorization: BitJWS <token>` header. The token
//! is a compact JWS signed with a secp256k1 key whose claims pin the method,
//! the full request URI and a SHA-256 digest of the body, so the server can
//! reject a request that was altered after signing.
//!
//! ```no_run
//! use swaggersign_bitjws::{RequestSigner, SigningIdentity, StaticCredentialProvider};
//! use swaggersign_core::{Context, Signer};
//!
//! # async fn example() -> swaggersign_core::Result<()> {
//! let identity = SigningIdentity::generate();
//! let signer = Signer::new(
//!     Context::new(),
//!     StaticCredentialProvider::new(identity),
//!     RequestSigner::new(),
//! );
//!
//! let req = http::Request::post("https://api.example.com/v1/widget")
//!     .body(bytes::Bytes::from_static(b"{\"id\":5}"))?;
//! let (mut parts, body) = req.into_parts();
//! signer.sign(&mut parts, &body).await?;
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::{BITJWS_ALGORITHM, BITJWS_KEY_FILE, BITJWS_PRIVATE_KEY, BITJWS_SCHEME};

mod identity;
pub use identity::{PublicKey, SigningIdentity};

mod token;
pub use token::Claims;

mod sign_request;
pub use sign_request::RequestSigner;

mod verify;
pub use verify::{verify_request, verify_token};

mod provide_credential;
pub use provide_credential::*;
