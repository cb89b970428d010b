use {
  super::*,
  std::{collections::HashMap, sync::Mutex},
  tokio::time::sleep,
};

/// In-memory `Source` that records every request path it serves.
#[derive(Default)]
pub(crate) struct FakeSource {
  author_delays: HashMap<u64, Duration>,
  comments: HashMap<u64, Vec<Comment>>,
  fail_users: bool,
  posts: HashMap<u64, Vec<Post>>,
  requests: Mutex<Vec<String>>,
  users: Vec<User>,
}

impl FakeSource {
  fn record(&self, path: String) -> String {
    self
      .requests
      .lock()
      .expect("requests lock poisoned")
      .push(path.clone());

    path
  }

  pub(crate) fn requests(&self) -> Vec<String> {
    self.requests.lock().expect("requests lock poisoned").clone()
  }

  /// Three users. Users 1 and 3 have posts, user 2 has none. Post 31 has no
  /// comments.
  pub(crate) fn sample() -> Self {
    let mut source = Self {
      users: vec![
        sample_user(1, "Leanne Graham", "Romaguera-Crona"),
        sample_user(2, "Ervin Howell", "Deckow-Crist"),
        sample_user(3, "Clementine Bauch", "Romaguera-Jacobson"),
      ],
      ..Self::default()
    };

    source.posts.insert(1, vec![sample_post(1, 1), sample_post(2, 1)]);
    source.posts.insert(2, Vec::new());
    source.posts.insert(
      3,
      vec![sample_post(21, 3), sample_post(22, 3), sample_post(31, 3)],
    );

    for post_id in [1, 2, 21, 22] {
      source.comments.insert(
        post_id,
        vec![sample_comment(post_id, 1), sample_comment(post_id, 2)],
      );
    }

    source
  }

  fn unavailable(path: String) -> FetchError {
    FetchError::Status {
      status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
      url: path,
    }
  }

  /// Delays every `fetch_user` for `user_id` by `delay`.
  pub(crate) fn with_author_delay(
    mut self,
    user_id: u64,
    delay: Duration,
  ) -> Self {
    self.author_delays.insert(user_id, delay);
    self
  }

  pub(crate) fn with_failing_users(self) -> Self {
    Self {
      fail_users: true,
      ..self
    }
  }

  pub(crate) fn without_posts(mut self) -> Self {
    self.posts.clear();
    self
  }
}

impl Source for FakeSource {
  async fn fetch_all_users(&self) -> Result<Vec<User>, FetchError> {
    let path = self.record("/users".into());

    if self.fail_users {
      return Err(Self::unavailable(path));
    }

    Ok(self.users.clone())
  }

  async fn fetch_comments_for_post(
    &self,
    post_id: u64,
  ) -> Result<Vec<Comment>, FetchError> {
    self.record(format!("/posts/{post_id}/comments"));

    Ok(self.comments.get(&post_id).cloned().unwrap_or_default())
  }

  async fn fetch_posts_for_user(
    &self,
    user_id: u64,
  ) -> Result<Vec<Post>, FetchError> {
    let path = self.record(format!("/posts?userId={user_id}"));

    self
      .posts
      .get(&user_id)
      .cloned()
      .ok_or_else(|| Self::unavailable(path))
  }

  async fn fetch_user(&self, user_id: u64) -> Result<User, FetchError> {
    let path = self.record(format!("/users/{user_id}"));

    if let Some(delay) = self.author_delays.get(&user_id) {
      sleep(*delay).await;
    }

    if self.fail_users {
      return Err(Self::unavailable(path));
    }

    self
      .users
      .iter()
      .find(|user| user.id == user_id)
      .cloned()
      .ok_or_else(|| Self::unavailable(path))
  }
}

pub(crate) fn sample_comment(post_id: u64, index: u64) -> Comment {
  Comment {
    body: format!("comment body {post_id}.{index}"),
    email: format!("reader{index}@example.com"),
    name: format!("comment {post_id}.{index}"),
  }
}

pub(crate) fn sample_post(id: u64, user_id: u64) -> Post {
  Post {
    body: format!("body of post {id}"),
    id,
    title: format!("post {id}"),
    user_id,
  }
}

pub(crate) fn sample_user(id: u64, name: &str, company: &str) -> User {
  User {
    company: Company {
      catch_phrase: format!("{company} catch phrase"),
      name: company.into(),
    },
    email: None,
    id,
    name: name.into(),
    username: None,
  }
}
