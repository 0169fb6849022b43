//! Per-user summaries derived from a flat post list, used by the dashboard
//! charts. Rows are rebuilt from scratch whenever the post list changes.

use crate::models::Post;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateRow {
    pub user_id: String,
    pub username: String,
    pub post_count: u64,
    pub max_likes: u64,
    pub total_likes: u64,
}

impl AggregateRow {
    fn seed(post: &Post) -> Self {
        Self {
            user_id: post.user_id.clone(),
            username: post.username.clone(),
            post_count: 1,
            max_likes: post.likes,
            total_likes: post.likes,
        }
    }

    fn absorb(&mut self, post: &Post) {
        self.post_count += 1;
        self.max_likes = self.max_likes.max(post.likes);
        self.total_likes = self.total_likes.saturating_add(post.likes);
    }
}

/// One row per distinct `user_id`, in first-seen order. The username of a
/// row is the one carried by that user's first post.
pub fn aggregate_posts(posts: &[Post]) -> Vec<AggregateRow> {
    let mut rows: Vec<AggregateRow> = Vec::new();
    for post in posts {
        match rows.iter_mut().find(|row| row.user_id == post.user_id) {
            Some(row) => row.absorb(post),
            None => rows.push(AggregateRow::seed(post)),
        }
    }
    rows
}
