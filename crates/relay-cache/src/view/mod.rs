//! Entity cache views

mod cache_view;
mod entity_caches;
mod member_cache;

pub use cache_view::CacheView;
pub use entity_caches::EntityCaches;
pub use member_cache::MemberCache;
