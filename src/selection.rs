use super::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Selection {
  pub(crate) posts: Option<Vec<Post>>,
  pub(crate) refresh: Option<Refresh>,
  pub(crate) user_id: String,
}
