//! Command implementations for the shareeats CLI

pub mod serve;

pub use serve::run_serve;
