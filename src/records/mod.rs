//! Helpers for exposing domain structs as records

pub mod macros;
