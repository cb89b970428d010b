pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
  if text.chars().count() <= max_chars {
    return text.to_string();
  }

  let mut result = text.chars().take(max_chars).collect::<String>();

  result.truncate(result.trim_end().len());
  result.push_str("...");

  result
}

/// Greedy word wrap. Words longer than `width` are split across lines.
pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
  let width = width.max(1);

  let mut lines = Vec::new();
  let mut current = String::new();
  let mut current_width = 0;

  for word in text.split_whitespace() {
    let mut chars = word.chars().collect::<Vec<_>>();

    while chars.len() > width {
      if !current.is_empty() {
        lines.push(std::mem::take(&mut current));
        current_width = 0;
      }

      lines.push(chars.drain(..width).collect());
    }

    let word_width = chars.len();

    if word_width == 0 {
      continue;
    }

    let piece = chars.into_iter().collect::<String>();

    if current.is_empty() {
      current = piece;
      current_width = word_width;
    } else if current_width + 1 + word_width <= width {
      current.push(' ');
      current.push_str(&piece);
      current_width += 1 + word_width;
    } else {
      lines.push(std::mem::replace(&mut current, piece));
      current_width = word_width;
    }
  }

  if !current.is_empty() {
    lines.push(current);
  }

  lines
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn truncate_returns_original_when_within_limit() {
    assert_eq!(truncate("short", 10), "short");
  }

  #[test]
  fn truncate_appends_ellipsis_when_exceeding_limit() {
    assert_eq!(truncate("This is a longer line", 5), "This...");
  }

  #[test]
  fn wrap_text_returns_nothing_for_blank_input() {
    assert!(wrap_text("", 10).is_empty());
    assert!(wrap_text("   ", 10).is_empty());
  }

  #[test]
  fn wrap_text_wraps_on_word_boundaries() {
    assert_eq!(
      wrap_text("hello brave new world", 11),
      vec!["hello brave".to_string(), "new world".to_string()]
    );
  }

  #[test]
  fn wrap_text_joins_lines_of_multiline_bodies() {
    assert_eq!(
      wrap_text("quia et suscipit\nsuscipit recusandae", 40),
      vec!["quia et suscipit suscipit recusandae".to_string()]
    );
  }

  #[test]
  fn wrap_text_splits_words_longer_than_width() {
    assert_eq!(
      wrap_text("go abcdefghij ok", 4),
      vec![
        "go".to_string(),
        "abcd".to_string(),
        "efgh".to_string(),
        "ij".to_string(),
        "ok".to_string(),
      ]
    );
  }
}
