//! Storage and upstream access for the geodata platform services.
//!
//! Provides:
//! - Byte stores (filesystem, in-memory) with atomic replacement
//! - HTTP fetching (reqwest, scripted test double)
//! - The TTL capability document cache built over both

pub mod capability_cache;
pub mod error;
pub mod fetch;
pub mod store;

pub use capability_cache::{CapabilityCache, Invalidation, DEFAULT_TTL};
pub use error::{StorageError, StorageResult};
pub use fetch::{HttpFetch, ReqwestFetcher, ScriptedFetcher};
pub use store::{ByteStore, FsByteStore, MemoryByteStore, StoredDocument};
