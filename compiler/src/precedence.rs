use core::tokens::TokenKind;

/// Precedence ladder, low→high (spec.md §4.3). `PartialOrd` derives from
/// declaration order, which is what `parse_precedence`'s `min_prec ≤
/// infix_precedence[current]` comparison relies on.
#[allow(non_camel_case_types)]
#[derive(Debug, PartialEq, PartialOrd, Copy, Clone)]
#[repr(u8)]
pub enum Precedence {
  PREC_NONE,
  PREC_ASSIGN,
  PREC_OR,
  PREC_AND,
  PREC_EQUALITY,
  PREC_COMPARE,
  PREC_ADD_SUB,
  PREC_MUL_DIV,
  PREC_UNARY,
  PREC_ACCESSOR,
}

impl Precedence {
  /// One step up the ladder, used by left-associative `binary` emitters
  /// (spec.md §4.3: `parse_precedence(operator_precedence + 1)`).
  pub fn next(self) -> Precedence {
    match self {
      Precedence::PREC_NONE => Precedence::PREC_ASSIGN,
      Precedence::PREC_ASSIGN => Precedence::PREC_OR,
      Precedence::PREC_OR => Precedence::PREC_AND,
      Precedence::PREC_AND => Precedence::PREC_EQUALITY,
      Precedence::PREC_EQUALITY => Precedence::PREC_COMPARE,
      Precedence::PREC_COMPARE => Precedence::PREC_ADD_SUB,
      Precedence::PREC_ADD_SUB => Precedence::PREC_MUL_DIV,
      Precedence::PREC_MUL_DIV => Precedence::PREC_UNARY,
      Precedence::PREC_UNARY => Precedence::PREC_ACCESSOR,
      Precedence::PREC_ACCESSOR => Precedence::PREC_ACCESSOR,
    }
  }
}

/// Tagged handler identifiers rather than raw fn pointers (spec.md §9's
/// first option), matching the teacher's own `ParseFn` enum
/// (`src/compiler/precedence.rs`) dispatched by a `match` in the compiler.
#[derive(Debug, PartialEq, Copy, Clone)]
pub enum ParseFn {
  Grouping,
  Unary,
  Binary,
  Number,
  Str,
  Literal,
  NamedVariable,
  None,
}

/// A parse-rule table entry: `{prefix_fn, infix_fn, infix_precedence}`
/// (spec.md §4.3).
#[derive(Debug, Copy, Clone)]
pub struct ParseRule {
  pub prefix: ParseFn,
  pub infix: ParseFn,
  pub precedence: Precedence,
}

const NO_RULE: ParseRule = ParseRule { prefix: ParseFn::None, infix: ParseFn::None, precedence: Precedence::PREC_NONE };

/// The parse-rule table (spec.md §4.3). Unlisted token kinds default to
/// `{None, None, PREC_NONE}`, same as the teacher's `get_rule` catch-all arm.
pub fn get_rule(kind: TokenKind) -> ParseRule {
  match kind {
    TokenKind::OpenParen => ParseRule { prefix: ParseFn::Grouping, ..NO_RULE },
    TokenKind::Sub => ParseRule { prefix: ParseFn::Unary, infix: ParseFn::Binary, precedence: Precedence::PREC_ADD_SUB },
    TokenKind::Add => ParseRule { infix: ParseFn::Binary, precedence: Precedence::PREC_ADD_SUB, ..NO_RULE },
    TokenKind::Mul => ParseRule { infix: ParseFn::Binary, precedence: Precedence::PREC_MUL_DIV, ..NO_RULE },
    TokenKind::Div => ParseRule { infix: ParseFn::Binary, precedence: Precedence::PREC_MUL_DIV, ..NO_RULE },
    TokenKind::Not => ParseRule { prefix: ParseFn::Unary, ..NO_RULE },
    TokenKind::NotEqual => ParseRule { infix: ParseFn::Binary, precedence: Precedence::PREC_EQUALITY, ..NO_RULE },
    TokenKind::EqualEqual => ParseRule { infix: ParseFn::Binary, precedence: Precedence::PREC_EQUALITY, ..NO_RULE },
    TokenKind::LessThan => ParseRule { infix: ParseFn::Binary, precedence: Precedence::PREC_COMPARE, ..NO_RULE },
    TokenKind::LessThanEqual => ParseRule { infix: ParseFn::Binary, precedence: Precedence::PREC_COMPARE, ..NO_RULE },
    TokenKind::GreaterThan => ParseRule { infix: ParseFn::Binary, precedence: Precedence::PREC_COMPARE, ..NO_RULE },
    TokenKind::GreaterThanEqual => ParseRule { infix: ParseFn::Binary, precedence: Precedence::PREC_COMPARE, ..NO_RULE },
    TokenKind::Identifier => ParseRule { prefix: ParseFn::NamedVariable, ..NO_RULE },
    TokenKind::Str => ParseRule { prefix: ParseFn::Str, ..NO_RULE },
    TokenKind::Num => ParseRule { prefix: ParseFn::Number, ..NO_RULE },
    TokenKind::True | TokenKind::False | TokenKind::None => ParseRule { prefix: ParseFn::Literal, ..NO_RULE },
    _ => NO_RULE,
  }
}
