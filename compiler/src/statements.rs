use core::bytecode::OpCode;
use core::tokens::TokenKind;

use crate::Compiler;

/// `declaration` (spec.md §4.3): dispatches to `let_declaration` or falls
/// through to `statement`, then resynchronizes on a panic-mode error so
/// one bad statement doesn't cascade into spurious follow-on diagnostics.
pub(crate) fn declaration(compiler: &mut Compiler) {
  if compiler.parser.match_tok(TokenKind::Let) {
    let_declaration(compiler);
  } else {
    statement(compiler);
  }

  if compiler.parser.had_error {
    compiler.parser.synchronize();
  }
}

/// `let_declaration` (spec.md §4.3, §4.4): `let IDENT (= EXPR)? ;`. With no
/// initializer the variable starts out `none`, matching
/// `original_source`'s equivalent default-initialize-to-nil behavior.
fn let_declaration(compiler: &mut Compiler) {
  compiler.parser.consume(TokenKind::Identifier, "Expected variable name");
  let name = compiler.parser.previous.lexeme;
  let global_idx = compiler.identifier_constant(name);

  if compiler.parser.match_tok(TokenKind::Equal) {
    compiler.expression();
  } else {
    compiler.emit_op(OpCode::LoadNone);
  }
  compiler.parser.consume(TokenKind::Semicolon, "Expected ';' after variable declaration");

  let line = compiler.parser.previous.line;
  compiler.chunk.write_pool_index(OpCode::DefineGlobal, OpCode::DefineGlobalLong, global_idx, line);
}

fn statement(compiler: &mut Compiler) {
  if compiler.parser.match_tok(TokenKind::Print) {
    print_statement(compiler);
  } else {
    expression_statement(compiler);
  }
}

fn print_statement(compiler: &mut Compiler) {
  compiler.expression();
  compiler.parser.consume(TokenKind::Semicolon, "Expected ';' after value");
  compiler.emit_op(OpCode::Print);
}

/// A bare expression statement discards its result (spec.md §4.4 `OP_POP`)
/// so the stack returns to its pre-statement depth.
fn expression_statement(compiler: &mut Compiler) {
  compiler.expression();
  compiler.parser.consume(TokenKind::Semicolon, "Expected ';' after expression");
  compiler.emit_op(OpCode::Pop);
}
