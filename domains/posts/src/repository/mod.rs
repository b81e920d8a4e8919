//! Repository implementations for the Posts domain

pub mod comments;
pub mod posts;

use sqlx::SqlitePool;

pub use comments::CommentRepository;
pub use posts::PostRepository;

/// Combined repository access for the Posts domain
#[derive(Clone)]
pub struct PostsRepositories {
    pub posts: PostRepository,
    pub comments: CommentRepository,
}

impl PostsRepositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            posts: PostRepository::new(pool.clone()),
            comments: CommentRepository::new(pool),
        }
    }
}
