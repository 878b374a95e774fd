//! Load-time normalization of stored specs.

pub(crate) mod migrate;
