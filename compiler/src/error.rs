use core::tokens::{Token, TokenKind};

/// Returned once compilation has accumulated one or more diagnostics
/// (spec.md §7: "the compiler returns a boolean success; the entry point
/// maps false → `COMPILE_ERROR`"). The diagnostics themselves are already on
/// stderr by the time this is returned — matching `original_source`'s
/// `compile()`, which reports as it goes rather than collecting a list.
#[derive(Debug, thiserror::Error)]
#[error("compilation failed")]
pub struct CompileError;

/// Formats one diagnostic exactly as `original_source/src/compiler.c`'s
/// `report_error` would (spec.md §4.3, §8 scenario 7):
/// `[line L] Error at 'lexeme': msg`, `[line L] Error at end of file: msg`,
/// or — for scanner `Error` tokens, whose lexeme already *is* the message —
/// plain `[line L] Error: msg`.
pub(crate) fn format_error_at(token: &Token, message: &str) -> String {
  let mut out = format!("[line {}] Error", token.line);
  match token.kind {
    TokenKind::EndFile => out.push_str(" at end of file"),
    TokenKind::Error => {}
    _ => out.push_str(&format!(" at '{}'", token.lexeme)),
  }
  out.push_str(": ");
  out.push_str(message);
  out
}
