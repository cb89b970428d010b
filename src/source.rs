use super::*;

/// Read-only access to users, posts and comments.
pub(crate) trait Source: Send + Sync {
  fn fetch_all_users(
    &self,
  ) -> impl Future<Output = Result<Vec<User>, FetchError>> + Send;

  fn fetch_comments_for_post(
    &self,
    post_id: u64,
  ) -> impl Future<Output = Result<Vec<Comment>, FetchError>> + Send;

  fn fetch_posts_for_user(
    &self,
    user_id: u64,
  ) -> impl Future<Output = Result<Vec<Post>, FetchError>> + Send;

  fn fetch_user(
    &self,
    user_id: u64,
  ) -> impl Future<Output = Result<User, FetchError>> + Send;
}
