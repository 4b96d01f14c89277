//! Cassette format for recording and replaying directory listings.

pub mod format;
pub mod recorder;
pub mod replayer;
