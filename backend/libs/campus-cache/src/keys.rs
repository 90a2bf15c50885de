//! Unified cache key schema
//!
//! All feed reads must use these key generators so that mutations can
//! invalidate them by prefix.
//! Key format: v{VERSION}:{entity}:{kind}:{identifier}

/// Cache schema version - increment when changing key formats
pub const CACHE_VERSION: u32 = 1;

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Prefix shared by every feed key
    /// Format: v1:feed:
    pub fn feed_prefix() -> String {
        format!("v{}:feed:", CACHE_VERSION)
    }

    /// Feed listing for a request signature
    /// Format: v1:feed:list:{k1=v1&k2=v2} with parameters sorted by name and
    /// both sides percent-encoded
    pub fn feed_list<'a, I>(params: I) -> String
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut pairs: Vec<(&str, &str)> = params.into_iter().collect();
        pairs.sort();
        let signature = pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("v{}:feed:list:{}", CACHE_VERSION, signature)
    }

    /// Single post
    /// Format: v1:feed:post:{post_id}
    pub fn post(post_id: &str) -> String {
        format!("v{}:feed:post:{}", CACHE_VERSION, post_id)
    }

    /// Comments of a post
    /// Format: v1:feed:comments:{post_id}
    pub fn post_comments(post_id: &str) -> String {
        format!("v{}:feed:comments:{}", CACHE_VERSION, post_id)
    }
}
