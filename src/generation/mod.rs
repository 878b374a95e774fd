pub(crate) mod classify;
pub(crate) mod http;
pub(crate) mod workflow;
