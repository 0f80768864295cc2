//! Application module

pub mod cli;
pub mod commands;
mod display;
pub mod error;
pub mod settings;
pub mod startup;
