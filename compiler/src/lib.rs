mod error;
mod expressions;
mod parser;
mod precedence;
mod statements;

use core::bytecode::OpCode;
use core::chunk::Chunk;
use core::heap::ObjectHeap;
use core::values::Value;

pub use error::CompileError;
use parser::Parser;
use precedence::{get_rule, ParseFn, Precedence};

/// Single-pass Pratt compiler: parses and emits bytecode directly into one
/// `Chunk`, with no intermediate AST (spec.md §4.3). Borrows the shared
/// object heap so string literals and identifier names intern into the
/// same table the `vm` crate reads from at runtime.
pub struct Compiler<'src, 'h> {
  parser: Parser<'src>,
  chunk: Chunk,
  heap: &'h mut ObjectHeap,
}

impl<'src, 'h> Compiler<'src, 'h> {
  fn new(source: &'src str, heap: &'h mut ObjectHeap) -> Self {
    Compiler { parser: Parser::new(source), chunk: Chunk::new(), heap }
  }

  fn emit_byte(&mut self, byte: u8) {
    let line = self.parser.previous.line;
    self.chunk.write(byte, line);
  }

  fn emit_op(&mut self, op: OpCode) {
    self.emit_byte(op.into());
  }

  fn emit_constant(&mut self, value: Value) {
    let line = self.parser.previous.line;
    self.chunk.write_constant(value, line);
  }

  /// Interns `name` as a string object and records it in the constant pool,
  /// returning the index `OP_(DEFINE|GET|SET)_GLOBAL[_LONG]` reads
  /// (spec.md §4.3, §4.4: globals are looked up by interned-string identity,
  /// not by a compile-time slot).
  fn identifier_constant(&mut self, name: &str) -> usize {
    let obj_ref = self.heap.intern_str(name);
    self.chunk.add_constant(Value::Obj(obj_ref))
  }

  fn expression(&mut self) {
    self.parse_precedence(Precedence::PREC_ASSIGN);
  }

  /// The Pratt parsing core (spec.md §4.3, §9): consumes a prefix handler,
  /// then repeatedly consumes infix handlers whose precedence is at least
  /// `precedence`. `can_assign` is threaded down so only a prefix position
  /// that started at `PREC_ASSIGN` or looser may bind a trailing `=`
  /// (spec.md's assignment REDESIGN) — `x + y = 1` must not silently treat
  /// `y` as an assignment target.
  fn parse_precedence(&mut self, precedence: Precedence) {
    self.parser.advance();
    let prefix_rule = get_rule(self.parser.previous.kind).prefix;
    if prefix_rule == ParseFn::None {
      self.parser.error("Expected expression");
      return;
    }

    let can_assign = precedence <= Precedence::PREC_ASSIGN;
    self.dispatch(prefix_rule, can_assign);

    while precedence <= get_rule(self.parser.current.kind).precedence {
      self.parser.advance();
      let infix_rule = get_rule(self.parser.previous.kind).infix;
      self.dispatch(infix_rule, can_assign);
    }

    if can_assign && self.parser.match_tok(core::tokens::TokenKind::Equal) {
      self.parser.error("Invalid assignment target");
    }
  }

  /// Dispatches a tagged `ParseFn` to its concrete handler (spec.md §9's
  /// "table of tagged handler identifiers, dispatched by a match").
  fn dispatch(&mut self, parse_fn: ParseFn, can_assign: bool) {
    match parse_fn {
      ParseFn::Grouping => expressions::grouping(self),
      ParseFn::Unary => expressions::unary(self),
      ParseFn::Binary => expressions::binary(self),
      ParseFn::Number => expressions::number(self),
      ParseFn::Str => expressions::string(self),
      ParseFn::Literal => expressions::literal(self),
      ParseFn::NamedVariable => expressions::named_variable(self, can_assign),
      ParseFn::None => unreachable!("dispatch() called with ParseFn::None"),
    }
  }
}

/// Compiles `source` into a `Chunk`, interning any string literals and
/// identifier names into `heap` along the way (spec.md §2, §7). Mirrors
/// `original_source/src/compiler.c`'s top-level `compile()`: parse
/// declarations until end-of-file, emit a trailing `OP_RETURN`, and map a
/// `false` success flag to `CompileError`.
pub fn compile(source: &str, heap: &mut ObjectHeap) -> Result<Chunk, CompileError> {
  let mut compiler = Compiler::new(source, heap);

  while !compiler.parser.check(core::tokens::TokenKind::EndFile) {
    statements::declaration(&mut compiler);
  }

  compiler.emit_op(OpCode::Return);

  if compiler.parser.had_error {
    Err(CompileError)
  } else {
    Ok(compiler.chunk)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use core::bytecode::OpCode;

  fn compile_ok(source: &str) -> (Chunk, ObjectHeap) {
    let mut heap = ObjectHeap::new();
    let chunk = compile(source, &mut heap).expect("expected successful compilation");
    (chunk, heap)
  }

  #[test]
  fn compiles_an_arithmetic_expression_statement() {
    let (chunk, _heap) = compile_ok("1 + 2 * 3;");
    assert_eq!(chunk.code[0], u8::from(OpCode::Constant));
    assert!(chunk.code.contains(&u8::from(OpCode::Add)));
    assert!(chunk.code.contains(&u8::from(OpCode::Multiply)));
    assert_eq!(*chunk.code.last().unwrap(), u8::from(OpCode::Return));
  }

  #[test]
  fn disassembly_of_a_compiled_chunk_names_every_emitted_instruction() {
    let (chunk, _heap) = compile_ok("print 1 + 2 * 3;");
    let text = plv::disassemble_chunk(&chunk, "print 1 + 2 * 3;");
    assert!(text.contains("Constant"));
    assert!(text.contains("Add"));
    assert!(text.contains("Multiply"));
    assert!(text.contains("Print"));
    assert!(text.contains("Return"));
  }

  #[test]
  fn compiles_a_let_declaration_without_initializer() {
    let (chunk, _heap) = compile_ok("let x;");
    assert!(chunk.code.contains(&u8::from(OpCode::LoadNone)));
    assert!(chunk.code.contains(&u8::from(OpCode::DefineGlobal)));
  }

  #[test]
  fn compiles_a_global_assignment() {
    let (chunk, _heap) = compile_ok("let x = 1; x = 2;");
    assert!(chunk.code.contains(&u8::from(OpCode::SetGlobal)));
  }

  #[test]
  fn rejects_an_invalid_assignment_target() {
    let mut heap = ObjectHeap::new();
    let result = compile("1 + 1 = 2;", &mut heap);
    assert!(result.is_err());
  }

  #[test]
  fn reports_a_missing_semicolon() {
    let mut heap = ObjectHeap::new();
    let result = compile("1 + 1", &mut heap);
    assert!(result.is_err());
  }

  #[test]
  fn interns_string_literals_into_the_shared_heap() {
    let mut heap = ObjectHeap::new();
    let _chunk = compile("print \"hi\";", &mut heap).expect("expected successful compilation");
    assert!(heap.find_str("hi").is_some());
  }
}
