//! colornoise CLI library
//!
//! Command implementations and output writers behind the `colornoise`
//! binary, exposed as a library so they can be exercised from tests.

pub mod commands;
pub mod logging;
pub mod output;
