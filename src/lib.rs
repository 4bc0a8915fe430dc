//! # request-chain
//!
//! Chain-of-responsibility request handling over an immutable string payload.
//!
//! A [`Handler`] is a pure transform from one [`Request`] to a new one.
//! Handlers compose with [`Handler::then`], which runs the receiver first and
//! passes its output to the argument.
//!
//! ## Overview
//!
//! The common pipeline applies three handlers in order:
//! - **Transaction tag**: wraps the payload in `<transaction>...</transaction>`
//! - **Digest**: appends `<digest>...</digest>` computed over the wrapped payload
//! - **Request tag**: wraps everything in `<request>...</request>`
//!
//! ## Example
//!
//! ```
//! use request_chain::{COMMON_REQUEST_HANDLER, Handler, Request};
//!
//! let out = COMMON_REQUEST_HANDLER.handle(&Request::new("New request"));
//!
//! assert_eq!(
//!     out.data(),
//!     "<request>\n<transaction> \n New request \n </transaction>\n\
//!      <digest>CZVMYTgc3iiOdJjFP+6dhQ==</digest>\n</request>"
//! );
//! ```

pub mod chain;
pub mod digest;
pub mod error;
pub mod handler;
pub mod handlers;
pub mod pipeline;
pub mod request;
pub mod trace;

pub use chain::{Chain, DEFAULT_CHAIN, HandlerKind, parse_chain};
pub use digest::{DigestAlgorithm, DigestStrategy, FixedDigest, REFERENCE_DIGEST, Sha256Digest};
pub use error::{ChainError, DigestError};
pub use handler::{BoxedHandler, Handler, Then, compose_all};
pub use handlers::{CreateDigest, wrap_in_request_tag, wrap_in_transaction_tag};
pub use pipeline::{
    COMMON_REQUEST_HANDLER, CommonRequestHandler, HandlerFn, SEED_DATA, common_request_handler,
    common_request_handler_with,
};
pub use request::Request;
pub use trace::ChainTrace;
