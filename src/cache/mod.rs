//! Response caching subsystem.
//!
//! # Data Flow
//! ```text
//! caller → ResourceCache::get_or_fetch(fetch)
//!     slot filled   → Arc handed out, no upstream contact
//!     slot empty    → first caller runs fetch, stores result
//!                     concurrent callers wait and reuse the stored value
//!     fetch failed  → error propagates, slot stays empty
//! ```
//!
//! # Design Decisions
//! - One slot per resource; this is page-lifetime memoization, not a KV store
//! - Reads are lock-free (arc-swap); only fillers take the flight mutex
//! - A failed fetch caches nothing, so the next caller retries

pub mod resource;

pub use resource::ResourceCache;
