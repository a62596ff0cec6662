//! Toy post store for the demo endpoints.
//!
//! Process-local and non-persistent; contents reset on restart.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::Post;

/// Storage for demo posts.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Most recently appended post.
    async fn latest(&self) -> Option<Post>;

    /// Append a post named `name` and return it with its assigned id.
    async fn append(&self, name: String) -> Post;
}

/// In-memory [`PostStore`], seeded with a single greeting.
pub struct InMemoryPostStore {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::with_posts(vec![Post {
            id: 1,
            name: "Hello World".to_string(),
        }])
    }

    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: RwLock::new(posts),
        }
    }
}

impl Default for InMemoryPostStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn latest(&self) -> Option<Post> {
        self.posts.read().await.last().cloned()
    }

    async fn append(&self, name: String) -> Post {
        let mut posts = self.posts.write().await;
        let post = Post {
            id: posts.len() as u64 + 1,
            name,
        };
        posts.push(post.clone());
        post
    }
}
