// Cache module for in-process caching.
// Keeps GitHub API responses and README bodies for a fixed time-to-live.

pub mod store;

pub use store::{CachedData, DEFAULT_TTL, TtlCache};
