use core::tokens::{Token, TokenKind};
use lexer::Scanner;

use crate::error::format_error_at;

/// Token-stream plumbing shared by every `expressions`/`statements` emitter
/// (spec.md §4.3). Mirrors the teacher's `Parser` struct shape
/// (`current`/`previous`/`had_error`/`panic_mode`), itself the same shape
/// `original_source/src/compiler.c`'s global parser state takes.
pub struct Parser<'a> {
  scanner: Scanner<'a>,
  pub current: Token<'a>,
  pub previous: Token<'a>,
  pub had_error: bool,
  panic_mode: bool,
}

impl<'a> Parser<'a> {
  pub fn new(source: &'a str) -> Self {
    let mut parser = Parser {
      scanner: Scanner::new(source),
      current: Token::uninitialized(),
      previous: Token::uninitialized(),
      had_error: false,
      panic_mode: false,
    };
    parser.advance();
    parser
  }

  /// Pulls the next non-error token into `current`, reporting (and
  /// skipping past) any scanner `Error` tokens along the way — matching
  /// `original_source/src/compiler.c`'s `advance()`.
  pub fn advance(&mut self) {
    self.previous = self.current;
    loop {
      self.current = self.scanner.scan_token();
      if self.current.kind != TokenKind::Error {
        break;
      }
      self.error_at_current(self.current.lexeme);
    }
  }

  pub fn check(&self, kind: TokenKind) -> bool {
    self.current.kind == kind
  }

  pub fn match_tok(&mut self, kind: TokenKind) -> bool {
    if !self.check(kind) {
      return false;
    }
    self.advance();
    true
  }

  /// Advances past `current` if it has the expected kind, else reports
  /// `message` at `current`'s position.
  pub fn consume(&mut self, kind: TokenKind, message: &str) {
    if self.current.kind == kind {
      self.advance();
      return;
    }
    self.error_at_current(message);
  }

  pub fn error_at_current(&mut self, message: &str) {
    self.error_at(self.current, message);
  }

  pub fn error(&mut self, message: &str) {
    self.error_at(self.previous, message);
  }

  /// Reports one diagnostic to stderr and enters panic mode (spec.md §4.3:
  /// "further errors are swallowed until statement boundary resync").
  /// Subsequent calls while already panicking are dropped, matching
  /// `original_source`'s `error_at`'s `if (parser.panic_mode) return;` guard.
  fn error_at(&mut self, token: Token<'a>, message: &str) {
    if self.panic_mode {
      return;
    }
    self.panic_mode = true;
    self.had_error = true;
    eprintln!("{}", format_error_at(&token, message));
  }

  /// Skips tokens until a likely statement boundary (spec.md §4.3's
  /// panic-mode synchronization), matching
  /// `original_source/src/compiler.c`'s `synchronize()`.
  pub fn synchronize(&mut self) {
    self.panic_mode = false;
    while self.current.kind != TokenKind::EndFile {
      if self.previous.kind == TokenKind::Semicolon {
        return;
      }
      match self.current.kind {
        TokenKind::Class
        | TokenKind::Func
        | TokenKind::Let
        | TokenKind::For
        | TokenKind::If
        | TokenKind::While
        | TokenKind::Print
        | TokenKind::Return => return,
        _ => self.advance(),
      }
    }
  }
}
