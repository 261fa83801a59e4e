//! 对象缓存
//!
//! 以字符串键值缓存已认证用户等对象，当前后端为 Moka 内存缓存。

pub mod object_cache;

use async_trait::async_trait;
use std::sync::Arc;

pub use object_cache::moka::MokaCacheWrapper;

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    ExistsButNoValue,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

/// 按配置创建缓存实例
pub fn create_cache() -> crate::errors::Result<Arc<dyn ObjectCache>> {
    let cache = MokaCacheWrapper::new()?;
    Ok(Arc::new(cache))
}
