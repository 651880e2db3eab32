//! Library half of the `thermo` binary: logging, the load-to-output
//! pipeline and output writers, exposed for integration tests.

pub mod logging;
pub mod output;
pub mod pipeline;
