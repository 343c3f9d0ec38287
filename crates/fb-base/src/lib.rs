pub mod actions;
pub mod config;
