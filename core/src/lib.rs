pub mod bytecode;
pub mod chunk;
pub mod heap;
pub mod objects;
pub mod tokens;
pub mod values;

/// The current version of the interpreter.
pub const VERSION: &str = "0.1.0";

/// The fixed capacity of the VM's value stack: `stack ≤ stack_top ≤
/// stack + 256`.
pub const STACK_MAX: usize = 256;

/// The three-valued outcome of an `interpret` call.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum InterpretResult {
  Ok,
  CompileError,
  RuntimeError,
}
