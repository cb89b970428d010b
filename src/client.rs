use super::*;

#[derive(Clone)]
pub(crate) struct Client {
  base_url: String,
  client: reqwest::Client,
}

impl Client {
  async fn get<T: DeserializeOwned>(
    &self,
    path: &str,
  ) -> Result<T, FetchError> {
    let url = format!("{}{path}", self.base_url);

    debug!(%url, "fetching");

    let response = self
      .client
      .get(&url)
      .send()
      .await
      .map_err(|source| FetchError::Request {
        source,
        url: url.clone(),
      })?;

    let status = response.status();

    if !status.is_success() {
      return Err(FetchError::Status { status, url });
    }

    response
      .json::<T>()
      .await
      .map_err(|source| FetchError::Decode { source, url })
  }

  pub(crate) fn new(base_url: &str) -> Self {
    Self {
      base_url: base_url.trim_end_matches('/').to_string(),
      client: reqwest::Client::new(),
    }
  }
}

impl Source for Client {
  async fn fetch_all_users(&self) -> Result<Vec<User>, FetchError> {
    self.get("/users").await
  }

  async fn fetch_comments_for_post(
    &self,
    post_id: u64,
  ) -> Result<Vec<Comment>, FetchError> {
    self.get(&format!("/posts/{post_id}/comments")).await
  }

  async fn fetch_posts_for_user(
    &self,
    user_id: u64,
  ) -> Result<Vec<Post>, FetchError> {
    self.get(&format!("/posts?userId={user_id}")).await
  }

  async fn fetch_user(&self, user_id: u64) -> Result<User, FetchError> {
    self.get(&format!("/users/{user_id}")).await
  }
}
