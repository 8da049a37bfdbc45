use num_derive::FromPrimitive;

/// The set of instructions supported by the virtual machine.
///
/// **NOTE:** changing the order in which members are declared creates
/// incompatibilities between different versions of the interpreter, since
/// `OpCode as u8` is the wire representation written into a `Chunk`.
#[derive(Debug, PartialEq, Eq, Copy, Clone, FromPrimitive)]
#[repr(u8)]
pub enum OpCode {
  // Instructions with zero chunk operands.
  Add,
  Divide,
  Equal,
  GreaterThan,
  LessThan,
  Multiply,
  Negate,
  Not,
  Pop,
  Print,
  Return,
  Subtract,
  LoadNone,
  LoadTrue,
  LoadFalse,

  // Instructions with one chunk operand (a single byte).
  Constant,
  DefineGlobal,
  GetGlobal,
  SetGlobal,

  // Instructions with three chunk operands (a little-endian u24).
  ConstantLong,
  DefineGlobalLong,
  GetGlobalLong,
  SetGlobalLong,
}

impl From<u8> for OpCode {
  fn from(byte: u8) -> Self {
    <OpCode as num_traits::FromPrimitive>::from_u8(byte)
      .unwrap_or_else(|| panic!("corrupt chunk: {byte} is not a valid opcode"))
  }
}

impl From<OpCode> for u8 {
  fn from(op: OpCode) -> Self {
    op as u8
  }
}
