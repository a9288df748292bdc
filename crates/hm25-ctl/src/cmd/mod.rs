//! CLI command modules.

pub mod deploy;
pub mod encode;
pub mod query;
pub mod sign;
pub mod watch;
