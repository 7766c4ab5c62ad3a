//! Core type definitions for the dashboard

pub mod history;
pub mod persona;
pub mod proxy;

// Re-export commonly used types
pub use history::*;
pub use persona::*;
pub use proxy::*;
