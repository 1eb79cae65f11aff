//! CLI command implementations

pub mod check;
pub mod exec;
pub mod locate;
pub mod run;
