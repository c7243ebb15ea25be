//! Library components of the `sleeplog` CLI.

pub mod logging;
pub mod pipeline;
