//! The common request pipeline: transaction tag, then digest, then request tag.

use std::sync::LazyLock;

use crate::Request;
use crate::digest::{DigestStrategy, FixedDigest};
use crate::handler::{Handler, Then};
use crate::handlers::{CreateDigest, wrap_in_request_tag, wrap_in_transaction_tag};

/// Payload of the seed request used by the CLI.
pub const SEED_DATA: &str = "New request";

/// A plain-function handler.
pub type HandlerFn = fn(&Request) -> Request;

/// Concrete type of the common pipeline for a digest strategy `D`.
pub type CommonRequestHandler<D = FixedDigest> =
    Then<Then<HandlerFn, CreateDigest<D>>, HandlerFn>;

/// The common pipeline with the reference digest, built on first use.
pub static COMMON_REQUEST_HANDLER: LazyLock<CommonRequestHandler> =
    LazyLock::new(common_request_handler);

/// Build the common pipeline with the reference digest.
pub fn common_request_handler() -> CommonRequestHandler {
    common_request_handler_with(FixedDigest::default())
}

/// Build the common pipeline around a caller-supplied digest strategy.
///
/// The digest covers the transaction-wrapped payload, and the result is
/// wrapped in the outer request tag.
pub fn common_request_handler_with<D: DigestStrategy>(strategy: D) -> CommonRequestHandler<D> {
    (wrap_in_transaction_tag as HandlerFn)
        .then(CreateDigest::new(strategy))
        .then(wrap_in_request_tag as HandlerFn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::{REFERENCE_DIGEST, Sha256Digest};

    const EXPECTED: &str = "<request>\n<transaction> \n New request \n </transaction>\n<digest>CZVMYTgc3iiOdJjFP+6dhQ==</digest>\n</request>";

    #[test]
    fn test_end_to_end() {
        let out = COMMON_REQUEST_HANDLER.handle(&Request::new(SEED_DATA));
        assert_eq!(out.data(), EXPECTED);
    }

    #[test]
    fn test_builder_matches_static() {
        let seed = Request::new(SEED_DATA);
        assert_eq!(
            common_request_handler().handle(&seed),
            COMMON_REQUEST_HANDLER.handle(&seed)
        );
    }

    #[test]
    fn test_matches_manual_order() {
        let seed = Request::new("payload");
        let wrapped = wrap_in_transaction_tag(&seed);
        let manual = wrap_in_request_tag(&CreateDigest::reference().handle(&wrapped));
        assert_eq!(COMMON_REQUEST_HANDLER.handle(&seed), manual);
    }

    #[test]
    fn test_digest_covers_transaction_payload() {
        let seed = Request::new(SEED_DATA);
        let out = common_request_handler_with(Sha256Digest).handle(&seed);

        let wrapped = wrap_in_transaction_tag(&seed);
        let digest = Sha256Digest.digest(wrapped.data()).unwrap();
        assert_eq!(
            out.data(),
            format!("<request>\n{}<digest>{digest}</digest>\n</request>", wrapped.data())
        );
        assert!(!out.data().contains(REFERENCE_DIGEST));
    }

    #[test]
    fn test_repeated_calls_are_independent() {
        let seed = Request::new(SEED_DATA);
        let first = COMMON_REQUEST_HANDLER.handle(&seed);
        let second = COMMON_REQUEST_HANDLER.handle(&seed);
        assert_eq!(first, second);
        assert_eq!(seed.data(), SEED_DATA);
    }

    #[test]
    fn test_not_idempotent() {
        let once = COMMON_REQUEST_HANDLER.handle(&Request::new(SEED_DATA));
        let twice = COMMON_REQUEST_HANDLER.handle(&once);
        assert_ne!(once, twice);
        assert_eq!(twice.data().matches("<request>").count(), 2);
        assert_eq!(twice.data().matches("<digest>").count(), 2);
    }

    #[test]
    fn test_shared_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                std::thread::spawn(move || {
                    COMMON_REQUEST_HANDLER.handle(&Request::new(format!("r{i}")))
                })
            })
            .collect();
        for (i, h) in handles.into_iter().enumerate() {
            let out = h.join().unwrap();
            assert!(out.data().contains(&format!(" r{i} ")));
        }
    }
}
