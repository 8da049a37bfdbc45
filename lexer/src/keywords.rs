use core::tokens::TokenKind;

/// Hand-rolled keyword trie, dispatching on the first (and occasionally
/// second) character. The candidate keyword is compared with a plain
/// byte-slice equality check, since the scanner already hands us an owned
/// `&str` lexeme rather than raw source pointers.
pub fn identifier_kind(lexeme: &str) -> TokenKind {
  let bytes = lexeme.as_bytes();
  match bytes.first() {
    Some(b'a') => check_keyword(bytes, "and", TokenKind::And),
    Some(b'c') => check_keyword(bytes, "class", TokenKind::Class),
    Some(b'e') => check_keyword(bytes, "else", TokenKind::Else),
    Some(b'i') => check_keyword(bytes, "if", TokenKind::If),
    Some(b'n') => check_keyword(bytes, "none", TokenKind::None),
    Some(b'o') => check_keyword(bytes, "or", TokenKind::Or),
    Some(b'l') => check_keyword(bytes, "let", TokenKind::Let),
    Some(b'p') => check_keyword(bytes, "print", TokenKind::Print),
    Some(b'r') => check_keyword(bytes, "return", TokenKind::Return),
    Some(b's') => check_keyword(bytes, "super", TokenKind::Super),
    Some(b'w') => check_keyword(bytes, "while", TokenKind::While),
    Some(b'f') if bytes.len() > 1 => match bytes[1] {
      b'a' => check_keyword(bytes, "false", TokenKind::False),
      b'o' => check_keyword(bytes, "for", TokenKind::For),
      b'u' => check_keyword(bytes, "func", TokenKind::Func),
      _ => TokenKind::Identifier,
    },
    Some(b't') if bytes.len() > 1 => match bytes[1] {
      b'h' => check_keyword(bytes, "this", TokenKind::This),
      b'r' => check_keyword(bytes, "true", TokenKind::True),
      _ => TokenKind::Identifier,
    },
    _ => TokenKind::Identifier,
  }
}

fn check_keyword(lexeme: &[u8], keyword: &str, kind: TokenKind) -> TokenKind {
  if lexeme == keyword.as_bytes() {
    kind
  } else {
    TokenKind::Identifier
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn matches_exact_keywords_only() {
    assert_eq!(identifier_kind("and"), TokenKind::And);
    assert_eq!(identifier_kind("andx"), TokenKind::Identifier);
    assert_eq!(identifier_kind("a"), TokenKind::Identifier);
    assert_eq!(identifier_kind("false"), TokenKind::False);
    assert_eq!(identifier_kind("for"), TokenKind::For);
    assert_eq!(identifier_kind("func"), TokenKind::Func);
    assert_eq!(identifier_kind("f"), TokenKind::Identifier);
    assert_eq!(identifier_kind("this"), TokenKind::This);
    assert_eq!(identifier_kind("true"), TokenKind::True);
    assert_eq!(identifier_kind("t"), TokenKind::Identifier);
  }
}
