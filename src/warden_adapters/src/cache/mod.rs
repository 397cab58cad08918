pub mod dashmap_cache_handler;

pub use dashmap_cache_handler::DashMapCacheHandler;
