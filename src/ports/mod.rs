//! Port traits defining external boundaries.
//!
//! The only boundary is the directory reader. Implementations live in
//! `src/adapters/`.

pub mod directory;

pub use directory::DirectoryReader;
