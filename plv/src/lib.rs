use core::bytecode::OpCode;
use core::chunk::Chunk;

/// A diagnostic bytecode disassembler: a human-readable listing for
/// `--disassemble` and for tests that assert on emitted bytecode shape.
pub fn disassemble_chunk(chunk: &Chunk, name: &str) -> String {
  let mut out = format!("== {name} ==\n");
  let mut offset = 0;
  while offset < chunk.len() {
    offset = disassemble_instruction(chunk, offset, &mut out);
  }
  out
}

/// Disassembles one instruction at `offset`, appends its textual form to
/// `out`, and returns the offset of the next instruction.
pub fn disassemble_instruction(chunk: &Chunk, offset: usize, out: &mut String) -> usize {
  let line = chunk.get_line(offset).unwrap_or(0);
  let op: OpCode = chunk.code[offset].into();

  match op {
    OpCode::Constant | OpCode::DefineGlobal | OpCode::GetGlobal | OpCode::SetGlobal => {
      constant_instruction(op, chunk, offset, line, out)
    }
    OpCode::ConstantLong | OpCode::DefineGlobalLong | OpCode::GetGlobalLong | OpCode::SetGlobalLong => {
      constant_long_instruction(op, chunk, offset, line, out)
    }
    _ => simple_instruction(op, offset, line, out),
  }
}

fn simple_instruction(op: OpCode, offset: usize, line: usize, out: &mut String) -> usize {
  out.push_str(&format!("{offset:04} {line:>4} {op:?}\n"));
  offset + 1
}

fn constant_instruction(op: OpCode, chunk: &Chunk, offset: usize, line: usize, out: &mut String) -> usize {
  let idx = chunk.code[offset + 1] as usize;
  out.push_str(&format!("{offset:04} {line:>4} {op:?} {idx} '{:?}'\n", chunk.constants[idx]));
  offset + 2
}

fn constant_long_instruction(op: OpCode, chunk: &Chunk, offset: usize, line: usize, out: &mut String) -> usize {
  let idx = chunk.read_u24(offset + 1);
  out.push_str(&format!("{offset:04} {line:>4} {op:?} {idx} '{:?}'\n", chunk.constants[idx]));
  offset + 4
}

#[cfg(test)]
mod tests {
  use super::*;
  use core::values::Value;

  #[test]
  fn disassembles_a_short_constant_load() {
    let mut chunk = Chunk::new();
    chunk.write_constant(Value::Num(1.5), 1);
    chunk.write_op(OpCode::Return, 1);
    let text = disassemble_chunk(&chunk, "test");
    assert!(text.contains("Constant"));
    assert!(text.contains("Return"));
  }

  #[test]
  fn walks_every_instruction_to_the_end_of_the_chunk() {
    let mut chunk = Chunk::new();
    chunk.write_constant(Value::Num(1.0), 1);
    chunk.write_constant(Value::Num(2.0), 1);
    chunk.write_op(OpCode::Add, 1);
    chunk.write_op(OpCode::Return, 2);
    let text = disassemble_chunk(&chunk, "test");
    assert_eq!(text.lines().count(), 5); // header + 4 instructions
  }
}
