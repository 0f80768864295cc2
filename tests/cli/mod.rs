//! CLI Integration Test Modules

pub mod config_command;
pub mod queue_demo;
pub mod text_command;
