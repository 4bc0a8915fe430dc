//! Trace of a request's journey through a chain.

use crate::Request;

/// Requests observed between the stages of one chain run.
///
/// `pipe_points[0]` is the input, `pipe_points[i]` is the output after
/// stage `i-1`. Length is `stage_names.len() + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainTrace {
    /// Names of each stage in the chain.
    pub stage_names: Vec<String>,
    /// Request present at each pipe point between stages.
    pub pipe_points: Vec<Request>,
}

impl ChainTrace {
    /// The final request, or `None` for an empty trace.
    pub fn output(&self) -> Option<&Request> {
        self.pipe_points.last()
    }

    /// Input and output of each stage, paired with its name.
    pub fn steps(&self) -> impl Iterator<Item = (&str, &Request, &Request)> {
        self.stage_names
            .iter()
            .zip(self.pipe_points.windows(2))
            .map(|(name, pair)| (name.as_str(), &pair[0], &pair[1]))
    }
}
