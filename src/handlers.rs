//! The concrete handlers: transaction tag, digest, and request tag.
//!
//! Each handler is stateless and independent of the others.

use tracing::warn;

use crate::Request;
use crate::digest::{DigestStrategy, FixedDigest};
use crate::handler::Handler;

/// Wrap the payload in `<transaction>...</transaction>`.
///
/// `P` becomes `"<transaction> \n P \n </transaction>\n"`.
pub fn wrap_in_transaction_tag(request: &Request) -> Request {
    Request::new(format!(
        "<transaction> \n {} \n </transaction>\n",
        request.data()
    ))
}

/// Wrap the payload in `<request>...</request>`.
///
/// `P` becomes `"<request>\nP\n</request>"`.
pub fn wrap_in_request_tag(request: &Request) -> Request {
    Request::new(format!("<request>\n{}\n</request>", request.data()))
}

/// Append `<digest>D</digest>` to the payload, where `D` comes from the
/// configured [`DigestStrategy`].
///
/// A failing strategy never fails the handler: the digest is left empty.
#[derive(Debug, Clone)]
pub struct CreateDigest<D = FixedDigest> {
    strategy: D,
}

impl CreateDigest<FixedDigest> {
    /// Digest handler appending [`REFERENCE_DIGEST`](crate::digest::REFERENCE_DIGEST).
    pub fn reference() -> Self {
        Self::new(FixedDigest::default())
    }
}

impl Default for CreateDigest<FixedDigest> {
    fn default() -> Self {
        Self::reference()
    }
}

impl<D: DigestStrategy> CreateDigest<D> {
    pub fn new(strategy: D) -> Self {
        Self { strategy }
    }
}

impl<D: DigestStrategy> Handler for CreateDigest<D> {
    fn handle(&self, request: &Request) -> Request {
        let digest = self.strategy.digest(request.data()).unwrap_or_else(|e| {
            warn!(error = %e, "digest omitted");
            String::new()
        });
        Request::new(format!("{}<digest>{digest}</digest>", request.data()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::{REFERENCE_DIGEST, Sha256Digest};
    use crate::error::DigestError;
    use proptest::prelude::*;

    struct Broken;

    impl DigestStrategy for Broken {
        fn digest(&self, _payload: &str) -> Result<String, DigestError> {
            Err(DigestError::Failed {
                algorithm: "broken",
                reason: "no hasher".to_string(),
            })
        }
    }

    #[test]
    fn test_transaction_tag() {
        let out = wrap_in_transaction_tag(&Request::new("New request"));
        assert_eq!(out.data(), "<transaction> \n New request \n </transaction>\n");
    }

    #[test]
    fn test_request_tag() {
        let out = wrap_in_request_tag(&Request::new("body"));
        assert_eq!(out.data(), "<request>\nbody\n</request>");
    }

    #[test]
    fn test_create_digest_default() {
        let out = CreateDigest::reference().handle(&Request::new("P"));
        assert_eq!(out.data(), format!("P<digest>{REFERENCE_DIGEST}</digest>"));
    }

    #[test]
    fn test_create_digest_sha256() {
        let out = CreateDigest::new(Sha256Digest).handle(&Request::new(""));
        assert_eq!(
            out.data(),
            "<digest>47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU=</digest>"
        );
    }

    #[test]
    fn test_failed_digest_is_omitted() {
        let out = CreateDigest::new(Broken).handle(&Request::new("P"));
        assert_eq!(out.data(), "P<digest></digest>");
    }

    #[test]
    fn test_empty_payloads() {
        assert_eq!(
            wrap_in_transaction_tag(&Request::new("")).data(),
            "<transaction> \n  \n </transaction>\n"
        );
        assert_eq!(wrap_in_request_tag(&Request::new("")).data(), "<request>\n\n</request>");
    }

    #[test]
    fn test_reapplying_nests_tags() {
        let once = wrap_in_request_tag(&Request::new("x"));
        let twice = wrap_in_request_tag(&once);
        assert_ne!(once, twice);
        assert_eq!(twice.data(), "<request>\n<request>\nx\n</request>\n</request>");

        let once = CreateDigest::reference().handle(&Request::new("x"));
        let twice = CreateDigest::reference().handle(&once);
        assert_eq!(twice.data().matches("<digest>").count(), 2);

        let once = wrap_in_transaction_tag(&Request::new("x"));
        let twice = wrap_in_transaction_tag(&once);
        assert_ne!(once, twice);
        assert_eq!(twice.data().matches("<transaction>").count(), 2);
    }

    proptest! {
        #[test]
        fn prop_transaction_tag_format(p in ".*") {
            let input = Request::new(p.clone());
            let out = wrap_in_transaction_tag(&input);
            prop_assert_eq!(out.data(), format!("<transaction> \n {p} \n </transaction>\n"));
            prop_assert_eq!(input.data(), p.as_str());
        }

        #[test]
        fn prop_request_tag_format(p in ".*") {
            let input = Request::new(p.clone());
            let out = wrap_in_request_tag(&input);
            prop_assert_eq!(out.data(), format!("<request>\n{p}\n</request>"));
            prop_assert_eq!(input.data(), p.as_str());
        }

        #[test]
        fn prop_digest_appends(p in ".*") {
            let input = Request::new(p.clone());
            let out = CreateDigest::reference().handle(&input);
            prop_assert_eq!(out.data(), format!("{p}<digest>{REFERENCE_DIGEST}</digest>"));
            prop_assert_eq!(input.data(), p.as_str());
        }
    }
}
