//! Utilities shared across modules

pub mod glob;
