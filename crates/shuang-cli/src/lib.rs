//! Command-line front end for the shuangpin practice engine.

pub mod commands;
pub mod trace_init;
pub mod upload;
