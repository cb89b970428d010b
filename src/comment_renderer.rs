use super::*;

/// Renders each comment as an `article` holding its name, body and sender,
/// collected into one fragment in input order.
pub(crate) fn build_comment_batch(
  document: &mut Document,
  comments: Option<&[Comment]>,
) -> Option<NodeId> {
  let comments = comments?;

  let batch = document.create_fragment();

  for comment in comments {
    let article = document.create_element("article");

    let name = TextElement::new("h3").text(&comment.name).build(document);
    let body = TextElement::new("p").text(&comment.body).build(document);
    let from = TextElement::new("p")
      .text(&format!("From: {}", comment.email))
      .build(document);

    for child in [name, body, from] {
      document.append(article, child);
    }

    document.append(batch, article);
  }

  Some(batch)
}
