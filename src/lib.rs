pub mod app;
pub mod core;
pub mod document;
pub mod queue;
pub mod runner;
pub mod text;
