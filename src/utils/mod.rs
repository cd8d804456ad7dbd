// Utility functions
// Helper functions for common operations

pub mod format;
pub mod time;

pub use format::join_comma;
