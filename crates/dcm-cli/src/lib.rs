//! CLI library components for the field mapper.

pub mod input;
pub mod logging;
