// Test utilities - only compiled in test builds
pub mod utils;
