//! Toy post model backing the in-memory demo endpoints.

use serde::{Deserialize, Serialize};

/// A demo post. Ids are sequential starting at 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub name: String,
}

/// Request body for creating a new post.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostRequest {
    pub name: String,
}
