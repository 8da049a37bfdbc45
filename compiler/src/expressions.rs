use core::bytecode::OpCode;
use core::tokens::TokenKind;
use core::values::Value;

use crate::Compiler;

/// `number` (spec.md §4.3): the previous token's lexeme is already a
/// validated numeric literal, so parsing it can't fail.
pub(crate) fn number(compiler: &mut Compiler) {
  let value: f64 = compiler.parser.previous.lexeme.parse().expect("scanner only emits well-formed numeric lexemes");
  compiler.emit_constant(Value::Num(value));
}

/// `string` (spec.md §4.3): strips the surrounding quotes and interns the
/// contents into the shared object heap.
pub(crate) fn string(compiler: &mut Compiler) {
  let lexeme = compiler.parser.previous.lexeme;
  let contents = &lexeme[1..lexeme.len() - 1];
  let obj_ref = compiler.heap.intern_str(contents);
  compiler.emit_constant(Value::Obj(obj_ref));
}

pub(crate) fn literal(compiler: &mut Compiler) {
  match compiler.parser.previous.kind {
    TokenKind::True => compiler.emit_op(OpCode::LoadTrue),
    TokenKind::False => compiler.emit_op(OpCode::LoadFalse),
    TokenKind::None => compiler.emit_op(OpCode::LoadNone),
    other => unreachable!("literal() dispatched for non-literal token kind {other:?}"),
  }
}

pub(crate) fn grouping(compiler: &mut Compiler) {
  compiler.expression();
  compiler.parser.consume(TokenKind::CloseParen, "Expected ')' after expression");
}

pub(crate) fn unary(compiler: &mut Compiler) {
  let operator_kind = compiler.parser.previous.kind;
  compiler.parse_precedence(crate::precedence::Precedence::PREC_UNARY);
  match operator_kind {
    TokenKind::Sub => compiler.emit_op(OpCode::Negate),
    TokenKind::Not => compiler.emit_op(OpCode::Not),
    other => unreachable!("unary() dispatched for non-unary token kind {other:?}"),
  }
}

/// `binary` (spec.md §4.3): parses the right operand at one precedence
/// level higher than its own (left-associativity), then emits. The four
/// "negated" operators (`!=`, `<=`, `>=`) that have no dedicated opcode
/// are synthesized from `Equal`/`LessThan`/`GreaterThan` plus `Not`,
/// matching `original_source/src/vm.c`'s equivalent expansions.
pub(crate) fn binary(compiler: &mut Compiler) {
  let operator_kind = compiler.parser.previous.kind;
  let rule = crate::precedence::get_rule(operator_kind);
  compiler.parse_precedence(rule.precedence.next());

  match operator_kind {
    TokenKind::Add => compiler.emit_op(OpCode::Add),
    TokenKind::Sub => compiler.emit_op(OpCode::Subtract),
    TokenKind::Mul => compiler.emit_op(OpCode::Multiply),
    TokenKind::Div => compiler.emit_op(OpCode::Divide),
    TokenKind::EqualEqual => compiler.emit_op(OpCode::Equal),
    TokenKind::NotEqual => {
      compiler.emit_op(OpCode::Equal);
      compiler.emit_op(OpCode::Not);
    }
    TokenKind::GreaterThan => compiler.emit_op(OpCode::GreaterThan),
    TokenKind::GreaterThanEqual => {
      compiler.emit_op(OpCode::LessThan);
      compiler.emit_op(OpCode::Not);
    }
    TokenKind::LessThan => compiler.emit_op(OpCode::LessThan),
    TokenKind::LessThanEqual => {
      compiler.emit_op(OpCode::GreaterThan);
      compiler.emit_op(OpCode::Not);
    }
    other => unreachable!("binary() dispatched for non-binary token kind {other:?}"),
  }
}

/// `named_variable` (spec.md §4.3, the assignment REDESIGN): reads or
/// writes a global depending on whether an `=` follows at an
/// assignment-eligible precedence.
pub(crate) fn named_variable(compiler: &mut Compiler, can_assign: bool) {
  let name = compiler.parser.previous.lexeme;
  let idx = compiler.identifier_constant(name);

  if can_assign && compiler.parser.match_tok(TokenKind::Equal) {
    compiler.expression();
    compiler.chunk.write_pool_index(OpCode::SetGlobal, OpCode::SetGlobalLong, idx, compiler.parser.previous.line);
  } else {
    compiler.chunk.write_pool_index(OpCode::GetGlobal, OpCode::GetGlobalLong, idx, compiler.parser.previous.line);
  }
}
