mod keywords;

use core::tokens::{Token, TokenKind};
pub use keywords::identifier_kind;

/// A stateful cursor over the source buffer. `start` marks the beginning
/// of the token under construction; `cur` the next unread byte. Scans
/// bytes rather than `char`s: identifiers and string contents are treated
/// as ASCII, so there's no need to decode UTF-8 while scanning.
pub struct Scanner<'a> {
  source: &'a [u8],
  start: usize,
  cur: usize,
  line: usize,
}

impl<'a> Scanner<'a> {
  pub fn new(source: &'a str) -> Self {
    Scanner { source: source.as_bytes(), start: 0, cur: 0, line: 1 }
  }

  fn at_end(&self) -> bool {
    self.cur >= self.source.len()
  }

  fn peek(&self) -> u8 {
    if self.at_end() {
      0
    } else {
      self.source[self.cur]
    }
  }

  fn peek_next(&self) -> u8 {
    if self.cur + 1 >= self.source.len() {
      0
    } else {
      self.source[self.cur + 1]
    }
  }

  fn consume(&mut self) -> u8 {
    let c = self.source[self.cur];
    self.cur += 1;
    c
  }

  /// One-character lookahead used by `!`, `=`, `<`, `>` to recognize their
  /// two-char forms.
  fn check_next(&mut self, expected: u8) -> bool {
    if !self.at_end() && self.source[self.cur] == expected {
      self.cur += 1;
      true
    } else {
      false
    }
  }

  fn lexeme(&self) -> &'a str {
    std::str::from_utf8(&self.source[self.start..self.cur]).expect("source slices stay on ASCII boundaries")
  }

  fn make(&self, kind: TokenKind) -> Token<'a> {
    Token::new(kind, self.lexeme(), self.line)
  }

  fn error(&self, message: &'static str) -> Token<'a> {
    Token::new(TokenKind::Error, message, self.line)
  }

  fn skip_whitespace_and_comments(&mut self) {
    loop {
      match self.peek() {
        b' ' | b'\r' | b'\t' => {
          self.consume();
        }
        b'\n' => {
          self.line += 1;
          self.consume();
        }
        b'/' if self.peek_next() == b'/' => {
          while self.peek() != b'\n' && !self.at_end() {
            self.consume();
          }
        }
        _ => break,
      }
    }
  }

  fn number(&mut self) -> Token<'a> {
    while self.peek().is_ascii_digit() {
      self.consume();
    }
    if self.peek() == b'.' && self.peek_next().is_ascii_digit() {
      self.consume();
      while self.peek().is_ascii_digit() {
        self.consume();
      }
    }
    self.make(TokenKind::Num)
  }

  fn identifier(&mut self) -> Token<'a> {
    while is_ident_continue(self.peek()) {
      self.consume();
    }
    self.make(identifier_kind(self.lexeme()))
  }

  fn string(&mut self) -> Token<'a> {
    while !self.at_end() && self.peek() != b'"' {
      if self.peek() == b'\n' {
        self.line += 1;
      }
      self.consume();
    }
    if self.at_end() {
      return self.error("Unclosed string");
    }
    self.consume(); // closing quote
    self.make(TokenKind::Str)
  }

  /// Scans and returns the next token. Skips whitespace,
  /// newlines, and `//` line comments first; end-of-input yields `EndFile`.
  pub fn scan_token(&mut self) -> Token<'a> {
    self.skip_whitespace_and_comments();
    self.start = self.cur;

    if self.at_end() {
      return self.make(TokenKind::EndFile);
    }

    let c = self.consume();

    if c.is_ascii_digit() || (c == b'.' && self.peek().is_ascii_digit()) {
      return self.number();
    }
    if is_ident_start(c) {
      return self.identifier();
    }

    match c {
      b'(' => self.make(TokenKind::OpenParen),
      b')' => self.make(TokenKind::CloseParen),
      b'{' => self.make(TokenKind::OpenCurly),
      b'}' => self.make(TokenKind::CloseCurly),
      b',' => self.make(TokenKind::Comma),
      b'.' => self.make(TokenKind::Dot),
      b';' => self.make(TokenKind::Semicolon),
      b'-' => self.make(TokenKind::Sub),
      b'+' => self.make(TokenKind::Add),
      b'*' => self.make(TokenKind::Mul),
      b'/' => self.make(TokenKind::Div),
      b'!' => {
        let kind = if self.check_next(b'=') { TokenKind::NotEqual } else { TokenKind::Not };
        self.make(kind)
      }
      b'=' => {
        let kind = if self.check_next(b'=') { TokenKind::EqualEqual } else { TokenKind::Equal };
        self.make(kind)
      }
      b'<' => {
        if self.check_next(b'<') {
          self.make(TokenKind::LeftShift)
        } else {
          let kind = if self.check_next(b'=') { TokenKind::LessThanEqual } else { TokenKind::LessThan };
          self.make(kind)
        }
      }
      b'>' => {
        if self.check_next(b'>') {
          self.make(TokenKind::RightShift)
        } else {
          let kind = if self.check_next(b'=') { TokenKind::GreaterThanEqual } else { TokenKind::GreaterThan };
          self.make(kind)
        }
      }
      b'"' => self.string(),
      _ => self.error("Unexpected token"),
    }
  }
}

fn is_ident_start(c: u8) -> bool {
  c.is_ascii_alphabetic() || c == b'_'
}

fn is_ident_continue(c: u8) -> bool {
  c.is_ascii_alphanumeric() || c == b'_'
}

#[cfg(test)]
mod tests {
  use super::*;

  fn kinds(src: &str) -> Vec<TokenKind> {
    let mut s = Scanner::new(src);
    let mut out = vec![];
    loop {
      let t = s.scan_token();
      let done = t.kind == TokenKind::EndFile;
      out.push(t.kind);
      if done {
        break;
      }
    }
    out
  }

  #[test]
  fn scans_arithmetic_expression() {
    let k = kinds("1 + 2 * 3;");
    assert_eq!(
      k,
      vec![
        TokenKind::Num,
        TokenKind::Add,
        TokenKind::Num,
        TokenKind::Mul,
        TokenKind::Num,
        TokenKind::Semicolon,
        TokenKind::EndFile,
      ]
    );
  }

  #[test]
  fn skips_line_comments() {
    let k = kinds("1; // a comment\n2;");
    assert_eq!(
      k,
      vec![TokenKind::Num, TokenKind::Semicolon, TokenKind::Num, TokenKind::Semicolon, TokenKind::EndFile]
    );
  }

  #[test]
  fn tracks_line_numbers_across_newlines() {
    let mut s = Scanner::new("1;\n2;\n3;");
    let mut lines = vec![];
    loop {
      let t = s.scan_token();
      if t.kind == TokenKind::EndFile {
        break;
      }
      if t.kind == TokenKind::Num {
        lines.push(t.line);
      }
    }
    assert_eq!(lines, vec![1, 2, 3]);
  }

  #[test]
  fn unterminated_string_is_an_error_token() {
    let mut s = Scanner::new("\"abc");
    let t = s.scan_token();
    assert_eq!(t.kind, TokenKind::Error);
    assert_eq!(t.lexeme, "Unclosed string");
  }

  #[test]
  fn recognizes_keywords_and_identifiers() {
    let k = kinds("let x = func true false none print and or if else for while class this super return");
    assert_eq!(
      k,
      vec![
        TokenKind::Let,
        TokenKind::Identifier,
        TokenKind::Equal,
        TokenKind::Func,
        TokenKind::True,
        TokenKind::False,
        TokenKind::None,
        TokenKind::Print,
        TokenKind::And,
        TokenKind::Or,
        TokenKind::If,
        TokenKind::Else,
        TokenKind::For,
        TokenKind::While,
        TokenKind::Class,
        TokenKind::This,
        TokenKind::Super,
        TokenKind::Return,
        TokenKind::EndFile,
      ]
    );
  }

  #[test]
  fn recognizes_comparison_and_shift_operators() {
    let k = kinds("< <= > >= == != << >>");
    assert_eq!(
      k,
      vec![
        TokenKind::LessThan,
        TokenKind::LessThanEqual,
        TokenKind::GreaterThan,
        TokenKind::GreaterThanEqual,
        TokenKind::EqualEqual,
        TokenKind::NotEqual,
        TokenKind::LeftShift,
        TokenKind::RightShift,
        TokenKind::EndFile,
      ]
    );
  }

  #[test]
  fn scans_string_and_number_literals() {
    let mut s = Scanner::new("\"hello\" 3.14");
    let str_tok = s.scan_token();
    assert_eq!(str_tok.kind, TokenKind::Str);
    assert_eq!(str_tok.lexeme, "\"hello\"");
    let num_tok = s.scan_token();
    assert_eq!(num_tok.kind, TokenKind::Num);
    assert_eq!(num_tok.lexeme, "3.14");
  }
}
