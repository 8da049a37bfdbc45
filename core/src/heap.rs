use hashbrown::HashMap;

use crate::objects::{fnv1a_hash, Object, StrObj};
use crate::values::ObjRef;

/// The VM's heap of allocated objects plus its interned-string set. Backed
/// by a flat `Vec` instead of a literal intrusive linked list: Rust
/// ownership makes pointer-chasing either `unsafe` or `Rc`-based churn for
/// no behavioral gain, and a `Vec` gives the same "one place to walk at
/// shutdown" property — dropping the `ObjectHeap` bulk-releases every
/// object in one pass.
///
/// The string interner is backed by `hashbrown::HashMap`.
#[derive(Default)]
pub struct ObjectHeap {
  objects: Vec<Object>,
  strings: HashMap<String, ObjRef>,
}

impl ObjectHeap {
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns the existing interned object if one with equal bytes already
  /// exists, otherwise allocates, interns, and returns the new one.
  pub fn intern_str(&mut self, bytes: &str) -> ObjRef {
    if let Some(existing) = self.find_str(bytes) {
      return existing;
    }
    let hash = fnv1a_hash(bytes.as_bytes());
    let obj_ref = ObjRef(self.objects.len());
    self.objects.push(Object::Str(StrObj::new(bytes.to_string(), hash)));
    self.strings.insert(bytes.to_string(), obj_ref);
    obj_ref
  }

  /// Byte-equal lookup in the interner, with no allocation on the miss
  /// path.
  pub fn find_str(&self, bytes: &str) -> Option<ObjRef> {
    self.strings.get(bytes).copied()
  }

  pub fn get(&self, obj_ref: ObjRef) -> &Object {
    &self.objects[obj_ref.0]
  }

  pub fn get_str(&self, obj_ref: ObjRef) -> &str {
    self.get(obj_ref).as_str_obj().expect("ObjRef did not point at a StrObj").as_str()
  }

  /// Concatenation for `OP_ADD`: pop-right-then-left is the caller's job;
  /// this only allocates the joined, interned result.
  pub fn concat_str(&mut self, left: ObjRef, right: ObjRef) -> ObjRef {
    let mut joined = String::with_capacity(self.get_str(left).len() + self.get_str(right).len());
    joined.push_str(self.get_str(left));
    joined.push_str(self.get_str(right));
    self.intern_str(&joined)
  }

  pub fn objects_equal(&self, a: ObjRef, b: ObjRef) -> bool {
    // Interning guarantees equal-content strings share an ObjRef, but this
    // stays byte-wise correct even for objects allocated outside intern_str.
    a == b || self.get(a) == self.get(b)
  }

  #[cfg(test)]
  pub fn len(&self) -> usize {
    self.objects.len()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn interning_returns_the_same_ref_for_equal_bytes() {
    let mut heap = ObjectHeap::new();
    let a = heap.intern_str("hello");
    let b = heap.intern_str("hello");
    assert_eq!(a, b);
    assert_eq!(heap.len(), 1);
  }

  #[test]
  fn distinct_bytes_intern_to_distinct_objects() {
    let mut heap = ObjectHeap::new();
    let a = heap.intern_str("hello");
    let b = heap.intern_str("world");
    assert_ne!(a, b);
  }

  #[test]
  fn concat_interns_the_joined_result() {
    let mut heap = ObjectHeap::new();
    let a = heap.intern_str("foo");
    let b = heap.intern_str("bar");
    let joined = heap.concat_str(a, b);
    assert_eq!(heap.get_str(joined), "foobar");
    let also_joined = heap.intern_str("foobar");
    assert_eq!(joined, also_joined);
  }
}
