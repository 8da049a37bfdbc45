use core::bytecode::OpCode;
use core::values::{format_value, Value};
use core::InterpretResult;

use crate::{RuntimeError, Vm};

impl Vm {
  /// The dispatch loop (spec.md §4.4): fetch one opcode, execute it, repeat
  /// until `OP_RETURN` or a runtime error. Modeled on the teacher's own
  /// `run()` (`VirtualMachine/src/run.rs`) — one `match` over the decoded
  /// opcode, one method call per case — generalized down to this
  /// language's smaller opcode set.
  pub fn run(&mut self) -> InterpretResult {
    loop {
      let op: OpCode = self.next_byte().into();

      let result = match op {
        OpCode::Constant => self.op_constant(false),
        OpCode::ConstantLong => self.op_constant(true),
        OpCode::LoadNone => self.push(Value::None),
        OpCode::LoadTrue => self.push(Value::Bool(true)),
        OpCode::LoadFalse => self.push(Value::Bool(false)),

        OpCode::Add => self.op_add(),
        OpCode::Subtract => self.op_binary_arith(|a, b| a - b),
        OpCode::Multiply => self.op_binary_arith(|a, b| a * b),
        OpCode::Divide => self.op_binary_arith(|a, b| a / b),
        OpCode::Negate => self.op_negate(),

        OpCode::Not => {
          let value = self.pop();
          self.push(Value::Bool(value.is_falsey()))
        }
        OpCode::Equal => {
          let b = self.pop();
          let a = self.pop();
          self.push(Value::Bool(self.values_equal(a, b)))
        }
        OpCode::GreaterThan => self.op_compare(|a, b| a > b),
        OpCode::LessThan => self.op_compare(|a, b| a < b),

        OpCode::DefineGlobal => self.op_define_global(false),
        OpCode::DefineGlobalLong => self.op_define_global(true),
        OpCode::GetGlobal => self.op_get_global(false),
        OpCode::GetGlobalLong => self.op_get_global(true),
        OpCode::SetGlobal => self.op_set_global(false),
        OpCode::SetGlobalLong => self.op_set_global(true),

        OpCode::Print => {
          let value = self.pop();
          println!("{}", format_value(&value, &self.heap));
          Ok(())
        }
        OpCode::Pop => {
          self.pop();
          Ok(())
        }
        OpCode::Return => return InterpretResult::Ok,
      };

      if let Err(error) = result {
        self.report_runtime_error(&error);
        return InterpretResult::RuntimeError;
      }
    }
  }

  fn op_constant(&mut self, is_long: bool) -> Result<(), RuntimeError> {
    let idx = if is_long { self.next_u24() } else { self.next_byte() as usize };
    let value = self.chunk.constants[idx];
    self.push(value)
  }

  /// `OP_ADD` (spec.md §4.4): strings concatenate, numbers add, anything
  /// else is a type error — exactly `original_source/src/vm.c`'s branch
  /// order (string+string checked before falling back to arithmetic).
  fn op_add(&mut self) -> Result<(), RuntimeError> {
    let b = self.peek(0);
    let a = self.peek(1);
    match (a, b) {
      (Value::Obj(a_ref), Value::Obj(b_ref))
        if self.heap.get(a_ref).as_str_obj().is_some() && self.heap.get(b_ref).as_str_obj().is_some() =>
      {
        self.pop();
        self.pop();
        let joined = self.heap.concat_str(a_ref, b_ref);
        self.push(Value::Obj(joined))
      }
      (Value::Num(a), Value::Num(b)) => {
        self.pop();
        self.pop();
        self.push(Value::Num(a + b))
      }
      _ => Err(RuntimeError::AddOperandsMismatched),
    }
  }

  fn op_binary_arith(&mut self, apply: impl Fn(f64, f64) -> f64) -> Result<(), RuntimeError> {
    match (self.peek(1), self.peek(0)) {
      (Value::Num(a), Value::Num(b)) => {
        self.pop();
        self.pop();
        self.push(Value::Num(apply(a, b)))
      }
      _ => Err(RuntimeError::OperandsNotNumbers),
    }
  }

  fn op_compare(&mut self, apply: impl Fn(f64, f64) -> bool) -> Result<(), RuntimeError> {
    match (self.peek(1), self.peek(0)) {
      (Value::Num(a), Value::Num(b)) => {
        self.pop();
        self.pop();
        self.push(Value::Bool(apply(a, b)))
      }
      _ => Err(RuntimeError::OperandsNotNumbers),
    }
  }

  /// `OP_NEGATE` (spec.md §4.4): the one-space-before-newline wording is
  /// intentional — it matches `original_source/src/vm.c`'s literal
  /// `"Operand is not a number "` (note the trailing space before its `\n`).
  fn op_negate(&mut self) -> Result<(), RuntimeError> {
    match self.peek(0) {
      Value::Num(n) => {
        self.pop();
        self.push(Value::Num(-n))
      }
      _ => Err(RuntimeError::OperandNotANumber),
    }
  }

  fn op_define_global(&mut self, is_long: bool) -> Result<(), RuntimeError> {
    let idx = if is_long { self.next_u24() } else { self.next_byte() as usize };
    let name_ref = self.constant_obj_ref(idx);
    let value = self.pop();
    self.globals.insert(name_ref, value);
    Ok(())
  }

  fn op_get_global(&mut self, is_long: bool) -> Result<(), RuntimeError> {
    let idx = if is_long { self.next_u24() } else { self.next_byte() as usize };
    let name_ref = self.constant_obj_ref(idx);
    match self.globals.get(&name_ref) {
      Some(value) => self.push(*value),
      None => Err(RuntimeError::UndefinedVariable(self.heap.get_str(name_ref).to_string())),
    }
  }

  /// `OP_SET_GLOBAL` (spec.md §4.4, resolved via `original_source/src/vm.c`):
  /// assigning to a name with no prior `let` is an error, and the spurious
  /// entry `insert` would otherwise have created is removed again rather
  /// than left behind.
  fn op_set_global(&mut self, is_long: bool) -> Result<(), RuntimeError> {
    let idx = if is_long { self.next_u24() } else { self.next_byte() as usize };
    let name_ref = self.constant_obj_ref(idx);
    let value = self.peek(0);
    if self.globals.insert(name_ref, value).is_none() {
      self.globals.remove(&name_ref);
      return Err(RuntimeError::AssignToUndefined(self.heap.get_str(name_ref).to_string()));
    }
    Ok(())
  }

  fn constant_obj_ref(&self, idx: usize) -> core::values::ObjRef {
    match self.chunk.constants[idx] {
      Value::Obj(r) => r,
      other => unreachable!("global name constant was not an interned string: {other:?}"),
    }
  }

  fn values_equal(&self, a: Value, b: Value) -> bool {
    match (a, b) {
      (Value::Obj(a_ref), Value::Obj(b_ref)) => self.heap.objects_equal(a_ref, b_ref),
      _ => a == b,
    }
  }
}
