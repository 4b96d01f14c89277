//! Live adapters for real filesystem access.

pub mod directory;

pub use directory::LiveDirectoryReader;
