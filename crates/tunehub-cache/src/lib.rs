//! # tunehub-cache
//!
//! Cache provider implementations for TuneHub. Supports two modes:
//!
//! - **memory**: In-process cache using [moka](https://crates.io/crates/moka)
//! - **redis**: Redis-backed cache using the [redis](https://crates.io/crates/redis) crate
//!
//! The provider is selected at runtime based on configuration. Provider
//! credentials are the main tenant: they are written without expiry and
//! must survive until overwritten.

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::CacheManager;

#[cfg(feature = "memory")]
pub use memory::MemoryCacheProvider;
#[cfg(feature = "redis-backend")]
pub use redis::{RedisCacheProvider, RedisClient};
