//! Command implementations for the commit-shield CLI

pub mod check;
pub mod init;
