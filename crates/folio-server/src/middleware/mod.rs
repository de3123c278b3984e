//! Request and response middleware.

pub(crate) mod rewrite;
pub(crate) mod security;
