//! konf - interactive kubeconfig context picker
//!
//! Library crate exposing the filtering, templating and selection pieces used
//! by the binary.
//!
//! Tests live close to the modules they exercise as unit tests.

pub mod config;
pub mod logging;
pub mod prompt;
pub mod store;
