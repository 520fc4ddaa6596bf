use std::rc::Rc;

use quill_object::Value;

/// Resolve a builtin by name, returning `None` if `name` isn't one --
/// callers fall through to a regular identifier lookup in that case, so
/// a user program can still shadow a builtin with `let len = 5;`.
pub fn lookup(name: &str) -> Option<Value> {
    match name {
        "len" => Some(Value::Builtin("len")),
        "first" => Some(Value::Builtin("first")),
        "last" => Some(Value::Builtin("last")),
        "rest" => Some(Value::Builtin("rest")),
        "push" => Some(Value::Builtin("push")),
        "puts" => Some(Value::Builtin("puts")),
        _ => None,
    }
}

pub fn call(name: &str, args: Vec<Value>) -> Value {
    match name {
        "len" => builtin_len(args),
        "first" => builtin_first(args),
        "last" => builtin_last(args),
        "rest" => builtin_rest(args),
        "push" => builtin_push(args),
        "puts" => builtin_puts(args),
        _ => Value::error(format!("unknown builtin: {name}")),
    }
}

fn wrong_arg_count(name: &str, want: &str, got: usize) -> Value {
    Value::error(format!(
        "wrong number of arguments to `{name}`: want {want}, got {got}"
    ))
}

fn builtin_len(args: Vec<Value>) -> Value {
    if args.len() != 1 {
        return wrong_arg_count("len", "1", args.len());
    }
    match &args[0] {
        Value::Str(s) => Value::Int(s.chars().count() as i64),
        Value::Array(items) => Value::Int(items.len() as i64),
        other => Value::error(format!("argument to `len` not supported, got {}", other.type_tag())),
    }
}

fn builtin_first(args: Vec<Value>) -> Value {
    if args.len() != 1 {
        return wrong_arg_count("first", "1", args.len());
    }
    match &args[0] {
        Value::Array(items) => items.first().cloned().unwrap_or(Value::Null),
        other => Value::error(format!(
            "argument to `first` must be ARRAY, got {}",
            other.type_tag()
        )),
    }
}

fn builtin_last(args: Vec<Value>) -> Value {
    if args.len() != 1 {
        return wrong_arg_count("last", "1", args.len());
    }
    match &args[0] {
        Value::Array(items) => items.last().cloned().unwrap_or(Value::Null),
        other => Value::error(format!(
            "argument to `last` must be ARRAY, got {}",
            other.type_tag()
        )),
    }
}

fn builtin_rest(args: Vec<Value>) -> Value {
    if args.len() != 1 {
        return wrong_arg_count("rest", "1", args.len());
    }
    match &args[0] {
        Value::Array(items) => {
            if items.is_empty() {
                Value::Null
            } else {
                Value::Array(Rc::new(items[1..].to_vec()))
            }
        }
        other => Value::error(format!(
            "argument to `rest` must be ARRAY, got {}",
            other.type_tag()
        )),
    }
}

fn builtin_push(args: Vec<Value>) -> Value {
    if args.len() != 2 {
        return wrong_arg_count("push", "2", args.len());
    }
    match &args[0] {
        Value::Array(items) => {
            let mut next = (**items).clone();
            next.push(args[1].clone());
            Value::Array(Rc::new(next))
        }
        other => Value::error(format!(
            "argument to `push` must be ARRAY, got {}",
            other.type_tag()
        )),
    }
}

fn builtin_puts(args: Vec<Value>) -> Value {
    for arg in &args {
        println!("{}", arg.inspect());
    }
    Value::Null
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_counts_string_chars() {
        assert!(matches!(builtin_len(vec![Value::str("hello")]), Value::Int(5)));
    }

    #[test]
    fn len_rejects_unsupported_type() {
        assert!(builtin_len(vec![Value::Int(1)]).is_error());
    }

    #[test]
    fn first_and_last_on_empty_array_are_null() {
        let empty = Value::Array(Rc::new(vec![]));
        assert!(matches!(builtin_first(vec![empty.clone()]), Value::Null));
        assert!(matches!(builtin_last(vec![empty]), Value::Null));
    }

    #[test]
    fn rest_drops_first_element() {
        let arr = Value::Array(Rc::new(vec![Value::Int(1), Value::Int(2), Value::Int(3)]));
        match builtin_rest(vec![arr]) {
            Value::Array(items) => assert_eq!(items.len(), 2),
            other => panic!("expected array, got {:?}", other),
        }
    }

    #[test]
    fn push_does_not_mutate_original() {
        let arr = Rc::new(vec![Value::Int(1)]);
        let original = Value::Array(arr.clone());
        let pushed = builtin_push(vec![original, Value::Int(2)]);
        assert_eq!(arr.len(), 1);
        match pushed {
            Value::Array(items) => assert_eq!(items.len(), 2),
            other => panic!("expected array, got {:?}", other),
        }
    }
}
