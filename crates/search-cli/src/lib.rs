//! Library side of the `search-norm` binary.

pub mod commands;
pub mod logging;
pub mod summary;
