//! Request context carrying the authenticated caller.

/// Context for the current authenticated request.
///
/// Built by the API layer from a validated bearer token and passed into
/// service methods so that every operation knows *who* is acting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Caller id taken from the token subject.
    pub caller_id: String,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(caller_id: impl Into<String>) -> Self {
        Self {
            caller_id: caller_id.into(),
        }
    }
}
