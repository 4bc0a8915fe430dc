//! The handler capability and its sequential combinator.
//!
//! A handler transforms a borrowed [`Request`] into a new one. Any
//! `Fn(&Request) -> Request` is a handler, so closures and plain functions
//! can be used directly:
//!
//! ```
//! use request_chain::{Handler, Request};
//!
//! let shout = |req: &Request| Request::new(req.data().to_uppercase());
//! let bang = |req: &Request| Request::new(format!("{}!", req.data()));
//!
//! let both = shout.then(bang);
//! assert_eq!(both.handle(&Request::new("hi")).data(), "HI!");
//! ```

use std::fmt;

use crate::Request;

/// A pure transform from one request to a new request.
pub trait Handler {
    /// Produce a new request from `request`.
    fn handle(&self, request: &Request) -> Request;

    /// Combine `self` with `next` into a handler that runs `self` first and
    /// feeds its output to `next`.
    ///
    /// Neither handler runs until the combined handler is invoked.
    fn then<N>(self, next: N) -> Then<Self, N>
    where
        Self: Sized,
        N: Handler,
    {
        Then { first: self, next }
    }

    /// Erase the handler's type.
    fn boxed(self) -> BoxedHandler
    where
        Self: Sized + Send + Sync + 'static,
    {
        BoxedHandler(Box::new(self))
    }
}

impl<F> Handler for F
where
    F: Fn(&Request) -> Request,
{
    fn handle(&self, request: &Request) -> Request {
        self(request)
    }
}

/// Sequential composition of two handlers. Built by [`Handler::then`].
#[derive(Debug, Clone, Copy)]
pub struct Then<A, B> {
    first: A,
    next: B,
}

impl<A, B> Handler for Then<A, B>
where
    A: Handler,
    B: Handler,
{
    fn handle(&self, request: &Request) -> Request {
        self.next.handle(&self.first.handle(request))
    }
}

/// A type-erased handler, used where chains are assembled at runtime.
pub struct BoxedHandler(Box<dyn Handler + Send + Sync>);

impl Handler for BoxedHandler {
    fn handle(&self, request: &Request) -> Request {
        self.0.handle(request)
    }
}

impl fmt::Debug for BoxedHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BoxedHandler")
    }
}

/// Fold handlers left to right with [`Handler::then`].
///
/// Returns `None` when `handlers` is empty.
pub fn compose_all<I>(handlers: I) -> Option<BoxedHandler>
where
    I: IntoIterator<Item = BoxedHandler>,
{
    handlers
        .into_iter()
        .reduce(|acc, next| acc.then(next).boxed())
}
