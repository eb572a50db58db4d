//! Utility modules

pub mod abort;
