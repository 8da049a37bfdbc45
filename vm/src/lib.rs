mod run;

use hashbrown::HashMap;

use core::chunk::Chunk;
use core::heap::ObjectHeap;
use core::values::{ObjRef, Value};
use core::{InterpretResult, STACK_MAX};

/// The stack-based bytecode interpreter. Owns the object heap the
/// compiler interns literals into, the global variable table, and a
/// fixed-capacity value stack. All three persist across repeated calls to
/// `interpret` on the same `Vm`, so a REPL holding one `Vm` for its whole
/// session sees globals defined on an earlier line.
pub struct Vm {
  chunk: Chunk,
  ip: usize,
  stack: Vec<Value>,
  /// Keyed by the interned `ObjRef` of the variable's name rather than by
  /// its text — two equal names always share one `ObjRef`, so this is a
  /// correct and cheaper stand-in for a string-keyed table.
  globals: HashMap<ObjRef, Value>,
  heap: ObjectHeap,
}

/// Runtime-error diagnostics. Not surfaced as a `Result` all the way out
/// of `run()`: the message is printed to stderr as soon as it's
/// discovered and `run()` simply returns `InterpretResult::RuntimeError`.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub(crate) enum RuntimeError {
  #[error("Operands are not numbers")]
  OperandsNotNumbers,
  #[error("Operand is not a number ")]
  OperandNotANumber,
  #[error("Operands are not both strings or both numbers")]
  AddOperandsMismatched,
  #[error("This variable has not been defined '{0}'")]
  UndefinedVariable(String),
  #[error("Undefined variable name '{0}' LET's define it!")]
  AssignToUndefined(String),
  #[error("Stack overflow")]
  StackOverflow,
}

impl Vm {
  /// A fresh, empty `Vm`: no chunk loaded yet, empty globals and heap.
  /// Call `interpret` one or more times to compile and run source against
  /// it — the globals table and object heap persist across calls, which is
  /// what lets a REPL session see a variable `let` on one line from a
  /// `print` on the next (spec.md §5: "the REPL ... call `init_vm` once").
  pub fn new() -> Self {
    Vm { chunk: Chunk::new(), ip: 0, stack: Vec::with_capacity(STACK_MAX), globals: HashMap::new(), heap: ObjectHeap::new() }
  }

  /// Compiles `source` into this `Vm`'s existing object heap (so literals
  /// interned by this call land in the same table earlier globals already
  /// reference) and runs it against the existing globals table. Resets the
  /// instruction pointer and value stack for the new chunk; `globals` and
  /// `heap` are left untouched across calls.
  pub fn interpret(&mut self, source: &str) -> InterpretResult {
    let chunk = match compiler::compile(source, &mut self.heap) {
      Ok(chunk) => chunk,
      Err(_) => return InterpretResult::CompileError,
    };
    self.chunk = chunk;
    self.ip = 0;
    self.stack.clear();
    self.run()
  }

  fn push(&mut self, value: Value) -> Result<(), RuntimeError> {
    if self.stack.len() >= STACK_MAX {
      return Err(RuntimeError::StackOverflow);
    }
    self.stack.push(value);
    Ok(())
  }

  fn pop(&mut self) -> Value {
    self.stack.pop().expect("stack underflow: malformed bytecode")
  }

  fn peek(&self, distance_from_top: usize) -> Value {
    self.stack[self.stack.len() - 1 - distance_from_top]
  }

  fn next_byte(&mut self) -> u8 {
    let byte = self.chunk.code[self.ip];
    self.ip += 1;
    byte
  }

  fn next_u24(&mut self) -> usize {
    let idx = self.chunk.read_u24(self.ip);
    self.ip += 3;
    idx
  }

  /// Prints a runtime diagnostic: the message, then `[line L] in program`
  /// computed from the instruction the VM was executing when it failed.
  fn report_runtime_error(&self, error: &RuntimeError) {
    let line = self.chunk.get_line(self.ip.saturating_sub(1)).unwrap_or(0);
    eprintln!("{error}");
    eprintln!("[line {line}] in program");
  }
}

impl Default for Vm {
  fn default() -> Self {
    Self::new()
  }
}

/// Compiles and runs `source` in a fresh, single-use `Vm`: a new heap,
/// globals table, and chunk that are torn down when this call returns
/// (spec.md §5's `init_vm`/`free_vm` pair, collapsed into one call) —
/// appropriate for `run_file`, which has no follow-up call to share state
/// with. A REPL, which does, should hold one `Vm` and call `interpret` on
/// it directly instead of going through this free function.
pub fn interpret(source: &str) -> InterpretResult {
  Vm::new().interpret(source)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn runs_an_arithmetic_expression() {
    assert_eq!(interpret("print 1 + 2 * 3;"), InterpretResult::Ok);
  }

  /// Uses the long-form constant encoding to exercise the `ConstantLong`
  /// path end to end, asserting the disassembled bytecode actually took
  /// that form rather than just checking the interpreted result.
  #[test]
  fn long_form_constants_compile_and_run() {
    let mut heap = core::heap::ObjectHeap::new();
    let mut source = String::new();
    for i in 0..300 {
      source.push_str(&format!("let v{i} = {i};\n"));
    }
    source.push_str("print v299;");
    let chunk = compiler::compile(&source, &mut heap).expect("expected successful compilation");
    let text = plv::disassemble_chunk(&chunk, "long constants");
    assert!(text.contains("ConstantLong") || text.contains("DefineGlobalLong"));
  }

  #[test]
  fn reports_a_compile_error_as_such() {
    assert_eq!(interpret("1 +;"), InterpretResult::CompileError);
  }

  #[test]
  fn reports_a_type_mismatch_as_a_runtime_error() {
    assert_eq!(interpret("print 1 + \"a\";"), InterpretResult::RuntimeError);
  }

  #[test]
  fn reports_an_undefined_global_read_as_a_runtime_error() {
    assert_eq!(interpret("print missing;"), InterpretResult::RuntimeError);
  }

  #[test]
  fn reports_an_undefined_global_assignment_as_a_runtime_error() {
    assert_eq!(interpret("missing = 1;"), InterpretResult::RuntimeError);
  }

  #[test]
  fn defines_and_reads_back_a_global() {
    assert_eq!(interpret("let x = 40; x = x + 2; print x;"), InterpretResult::Ok);
  }

  #[test]
  fn concatenates_strings() {
    assert_eq!(interpret("print \"foo\" + \"bar\";"), InterpretResult::Ok);
  }

  /// A REPL holds one `Vm` across lines (`cli::run_repl`); a global
  /// defined in one `interpret` call must still be visible in the next.
  #[test]
  fn globals_persist_across_repeated_interpret_calls_on_one_vm() {
    let mut vm = Vm::new();
    assert_eq!(vm.interpret("let x = 42;"), InterpretResult::Ok);
    assert_eq!(vm.interpret("print x;"), InterpretResult::Ok);
  }
}
