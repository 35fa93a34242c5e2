//! Core business logic for wren.

pub mod services;

pub use services::*;
