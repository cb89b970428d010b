use super::*;

pub(crate) enum Event {
  Rendered {
    page: Box<Page>,
    posts: Option<usize>,
    request_id: u64,
  },
}
