use super::*;

/// Fetches the comments of `post_id` into a hidden comment section. A failed
/// fetch leaves the section empty.
pub(crate) async fn build_comment_section<S: Source>(
  document: &mut Document,
  source: &S,
  post_id: Option<u64>,
) -> Option<NodeId> {
  let post_id = post_id?;

  let comments = source.fetch_comments_for_post(post_id).await.or_log();

  let section = document.create_element("section");

  document.set_post_id(section, &post_id.to_string());
  document.add_class(section, COMMENTS_CLASS);
  document.add_class(section, HIDDEN_CLASS);

  if let Some(batch) = build_comment_batch(document, comments.as_deref()) {
    document.append(section, batch);
  }

  Some(section)
}

fn build_post_article(
  document: &mut Document,
  post: &Post,
  author: Option<&User>,
  section: Option<NodeId>,
) -> NodeId {
  let article = document.create_element("article");

  let title = TextElement::new("h2").text(&post.title).build(document);
  let body = TextElement::new("p").text(&post.body).build(document);

  let id = TextElement::new("p")
    .text(&format!("Post ID: {}", post.id))
    .build(document);

  let (byline, catch_phrase) = match author {
    Some(author) => (
      TextElement::new("p")
        .text(&format!(
          "Author: {} with {}",
          author.name, author.company.name
        ))
        .build(document),
      TextElement::new("p")
        .text(&author.company.catch_phrase)
        .build(document),
    ),
    None => (
      TextElement::new("p").text(UNKNOWN_AUTHOR_TEXT).build(document),
      TextElement::default().build(document),
    ),
  };

  let button = TextElement::new("button")
    .text(SHOW_COMMENTS_LABEL)
    .build(document);

  document.set_post_id(button, &post.id.to_string());

  for child in [title, body, id, byline, catch_phrase, button]
    .into_iter()
    .chain(section)
  {
    document.append(article, child);
  }

  article
}

/// Renders one `article` per post into a fragment.
///
/// Author fetches for up to `concurrency` posts are in flight at once and
/// are consumed in input order, so the articles always follow the order of
/// `posts`. Each post's comment section is fetched as its article is built.
/// A concurrency of 1 fetches strictly one post after another. A post whose
/// author cannot be fetched is still rendered, with a placeholder author
/// line, so every article keeps its button and section.
pub(crate) async fn build_post_batch<S: Source>(
  document: &mut Document,
  source: &S,
  posts: Option<&[Post]>,
  concurrency: usize,
) -> Option<NodeId> {
  let posts = posts?;

  let fetches = posts
    .iter()
    .map(|post| {
      async move {
        let author = source.fetch_user(post.user_id).await.or_log();

        if author.is_none() {
          warn!(
            post_id = post.id,
            user_id = post.user_id,
            "rendering post with placeholder author"
          );
        }

        (post, author)
      }
      .boxed()
    })
    .collect::<Vec<_>>();

  let mut authors = stream::iter(fetches).buffered(concurrency.max(1));

  let batch = document.create_fragment();

  while let Some((post, author)) = authors.next().await {
    let section = build_comment_section(document, source, Some(post.id)).await;

    let article = build_post_article(document, post, author.as_ref(), section);

    document.append(batch, article);
  }

  debug!(count = posts.len(), "rendered post batch");

  Some(batch)
}

#[cfg(test)]
mod tests {
  use {
    super::*,
    fake_source::{FakeSource, sample_post},
  };

  fn texts(document: &Document, node: NodeId) -> Vec<(String, String)> {
    document
      .children(node)
      .iter()
      .map(|&child| {
        (
          document.tag(child).unwrap_or_default().to_string(),
          document.text(child).to_string(),
        )
      })
      .collect()
  }

  #[tokio::test]
  async fn missing_posts_render_nothing() {
    let mut document = Document::new();
    let source = FakeSource::sample();

    assert_eq!(build_post_batch(&mut document, &source, None, 4).await, None);
    assert!(source.requests().is_empty());
  }

  #[tokio::test]
  async fn articles_follow_input_order_with_full_structure() {
    let mut document = Document::new();
    let source = FakeSource::sample();

    let posts = vec![sample_post(22, 3), sample_post(21, 3)];

    let batch = build_post_batch(&mut document, &source, Some(&posts[..]), 8)
      .await
      .unwrap();

    let articles = document.children(batch).to_vec();

    assert_eq!(articles.len(), 2);

    assert_eq!(
      texts(&document, articles[0])[..6],
      [
        ("h2".to_string(), "post 22".to_string()),
        ("p".to_string(), "body of post 22".to_string()),
        ("p".to_string(), "Post ID: 22".to_string()),
        (
          "p".to_string(),
          "Author: Clementine Bauch with Romaguera-Jacobson".to_string()
        ),
        (
          "p".to_string(),
          "Romaguera-Jacobson catch phrase".to_string()
        ),
        ("button".to_string(), SHOW_COMMENTS_LABEL.to_string()),
      ]
    );

    for (article, post) in articles.iter().zip(&posts) {
      let children = document.children(*article).to_vec();

      let button = children[5];
      let section = children[6];

      let post_id = post.id.to_string();

      assert_eq!(document.post_id(button), Some(post_id.as_str()));
      assert_eq!(document.tag(section), Some("section"));
      assert_eq!(document.post_id(section), Some(post_id.as_str()));
      assert!(document.has_class(section, COMMENTS_CLASS));
      assert!(document.has_class(section, HIDDEN_CLASS));
      assert_eq!(document.children(section).len(), 2);
    }
  }

  #[tokio::test]
  async fn sequential_rendering_fetches_one_post_at_a_time() {
    let mut document = Document::new();
    let source = FakeSource::sample();

    let posts = vec![sample_post(1, 1), sample_post(2, 1)];

    build_post_batch(&mut document, &source, Some(posts.as_slice()), 1)
      .await
      .unwrap();

    assert_eq!(
      source.requests(),
      vec![
        "/users/1".to_string(),
        "/posts/1/comments".to_string(),
        "/users/1".to_string(),
        "/posts/2/comments".to_string(),
      ]
    );
  }

  #[tokio::test]
  async fn slow_authors_do_not_reorder_articles() {
    let mut document = Document::new();
    let source =
      FakeSource::sample().with_author_delay(1, Duration::from_millis(50));

    let posts = vec![sample_post(1, 1), sample_post(21, 3)];

    let batch = build_post_batch(&mut document, &source, Some(&posts[..]), 2)
      .await
      .unwrap();

    let titles = document
      .children(batch)
      .iter()
      .map(|&article| document.text(document.children(article)[0]).to_string())
      .collect::<Vec<_>>();

    assert_eq!(titles, vec!["post 1", "post 21"]);

    assert_eq!(
      source.requests()[..2],
      ["/users/1".to_string(), "/users/3".to_string()]
    );
  }

  #[tokio::test]
  async fn failed_author_renders_placeholder() {
    let mut document = Document::new();
    let source = FakeSource::sample().with_failing_users();

    let posts = vec![sample_post(1, 1)];

    let batch = build_post_batch(&mut document, &source, Some(&posts[..]), 4)
      .await
      .unwrap();

    let article = document.children(batch)[0];
    let rendered = texts(&document, article);

    assert_eq!(rendered.len(), 7);
    assert_eq!(rendered[3].1, UNKNOWN_AUTHOR_TEXT);
    assert_eq!(rendered[4].1, "");
    assert_eq!(
      rendered[5],
      ("button".to_string(), SHOW_COMMENTS_LABEL.to_string())
    );
    assert_eq!(rendered[6].0, "section");
  }

  #[tokio::test]
  async fn comment_section_requires_post_id() {
    let mut document = Document::new();
    let source = FakeSource::sample();

    assert_eq!(build_comment_section(&mut document, &source, None).await, None);
    assert!(source.requests().is_empty());
  }

  #[tokio::test]
  async fn comment_section_is_hidden_and_tagged() {
    let mut document = Document::new();
    let source = FakeSource::sample();

    let section = build_comment_section(&mut document, &source, Some(21))
      .await
      .unwrap();

    assert_eq!(document.post_id(section), Some("21"));
    assert!(document.has_class(section, HIDDEN_CLASS));

    let names = document
      .children(section)
      .iter()
      .map(|&article| document.text(document.children(article)[0]).to_string())
      .collect::<Vec<_>>();

    assert_eq!(names, vec!["comment 21.1", "comment 21.2"]);
    assert_eq!(source.requests(), vec!["/posts/21/comments".to_string()]);
  }

  #[tokio::test]
  async fn post_without_comments_gets_an_empty_section() {
    let mut document = Document::new();
    let source = FakeSource::sample();

    let section = build_comment_section(&mut document, &source, Some(31))
      .await
      .unwrap();

    assert!(document.children(section).is_empty());
  }
}
