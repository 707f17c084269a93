//! Shared utilities used by the server binary.

pub mod logger;
