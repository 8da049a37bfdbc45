use std::fmt::{Debug, Formatter};

/// A non-owning handle into the object heap. Identity equality on this
/// index is exactly identity equality on the underlying object, which is
/// what interned strings need.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ObjRef(pub usize);

/// A dynamically-typed value. `Copy` because every variant is either plain
/// data or a non-owning handle.
#[derive(Debug, Copy, Clone)]
pub enum Value {
  Bool(bool),
  None,
  Num(f64),
  Obj(ObjRef),
}

impl Value {
  pub fn is_falsey(&self) -> bool {
    matches!(self, Value::None | Value::Bool(false))
  }

  pub fn is_num(&self) -> bool {
    matches!(self, Value::Num(_))
  }

  pub fn is_obj(&self) -> bool {
    matches!(self, Value::Obj(_))
  }

  pub fn kind_name(&self) -> &'static str {
    match self {
      Value::Bool(_) => "bool",
      Value::None => "none",
      Value::Num(_) => "num",
      Value::Obj(_) => "obj",
    }
  }
}

/// Cross-variant comparisons are always false; `Num` uses IEEE-754 (so
/// `NaN != NaN`); `Obj` compares by handle identity, which for interned
/// strings is equivalent to structural equality.
impl PartialEq for Value {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Value::Bool(a), Value::Bool(b)) => a == b,
      (Value::None, Value::None) => true,
      (Value::Num(a), Value::Num(b)) => a == b,
      (Value::Obj(a), Value::Obj(b)) => a == b,
      _ => false,
    }
  }
}

/// A rendering usable without a live heap; real value formatting for
/// `print` goes through `format_value` below, which can resolve `ObjRef`
/// against the heap. This impl exists so `Value` prints sensibly in
/// assertions and diagnostics that have no heap at hand.
impl std::fmt::Display for Value {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Value::Bool(true) => write!(f, "true"),
      Value::Bool(false) => write!(f, "false"),
      Value::None => write!(f, "none"),
      Value::Num(n) => write!(f, "{}", format_num(*n)),
      Value::Obj(r) => write!(f, "<obj #{}>", r.0),
    }
  }
}

/// The rendering `print` actually uses: Bool → `true`/`false`; None →
/// `none`; Num → shortest round-trip rendering; String → raw bytes. Unlike
/// the `Display` impl above, this can resolve `Obj` handles because it
/// takes the heap they point into.
pub fn format_value(value: &Value, heap: &crate::heap::ObjectHeap) -> String {
  match value {
    Value::Obj(r) => heap.get_str(*r).to_string(),
    other => other.to_string(),
  }
}

/// Shortest round-trip-ish rendering of a double, `%g`-equivalent:
/// integral values print without a trailing `.0`.
pub fn format_num(n: f64) -> String {
  if n.is_infinite() {
    return if n > 0.0 { "inf".to_string() } else { "-inf".to_string() };
  }
  if n.is_nan() {
    return "NaN".to_string();
  }
  if n == n.trunc() && n.abs() < 1e15 {
    format!("{}", n as i64)
  } else {
    format!("{}", n)
  }
}
