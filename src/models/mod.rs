//! Value records exchanged with tool callers.
//!
//! Inputs are validated before any network call; results serialize naturally
//! as JSON via `serde`. Nothing here outlives a single request.

pub mod bucket;
