//! Queue integration test modules

pub mod handles;
pub mod scenarios;
