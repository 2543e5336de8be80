//! Shared constants for the HTTP surface.

/// Header presenting the shared access key on job submissions.
pub(crate) const HEADER_ACCESS_KEY: &str = "x-access-key";

pub(crate) const PROBLEM_INTERNAL: &str = "https://vortex.dev/problems/internal";
pub(crate) const PROBLEM_UNAUTHORIZED: &str = "https://vortex.dev/problems/unauthorized";
pub(crate) const PROBLEM_BAD_REQUEST: &str = "https://vortex.dev/problems/bad-request";
pub(crate) const PROBLEM_NOT_FOUND: &str = "https://vortex.dev/problems/not-found";
