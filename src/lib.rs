//! Library entrypoint for binstall-bootstrap.
//!
//! The primary interface is the `binstall-bootstrap` binary. This lib target
//! exists to expose internal modules to integration tests.

pub mod config;
pub mod fetch;
pub mod install;
pub mod output;
pub mod path_env;
pub mod release;
