use super::*;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub(crate) struct User {
  pub(crate) company: Company,
  #[serde(default)]
  pub(crate) email: Option<String>,
  pub(crate) id: u64,
  pub(crate) name: String,
  #[serde(default)]
  pub(crate) username: Option<String>,
}

impl User {
  pub(crate) fn label(&self) -> String {
    match &self.username {
      Some(username) => format!("{} (@{username})", self.name),
      None => self.name.clone(),
    }
  }
}
