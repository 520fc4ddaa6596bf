use std::cell::RefCell;
use std::rc::Rc;

use quill_object::{Environment, FunctionValue, Value};
use quill_parser::{BlockStatement, Expression, Program, Statement};

use crate::builtins;

type Env = Rc<RefCell<Environment>>;

/// Evaluate a whole program. Unlike [`eval_block_statement`], this unwraps
/// a trailing `ReturnValue` -- `return` at the top level simply produces
/// the program's result rather than propagating further.
pub fn eval_program(program: &Program, env: &Env) -> Value {
    let mut result = Value::Null;
    for stmt in program {
        result = eval_statement(stmt, env);
        match result {
            Value::ReturnValue(inner) => return *inner,
            Value::Error(_) => return result,
            _ => {}
        }
    }
    result
}

pub fn eval_statement(stmt: &Statement, env: &Env) -> Value {
    match stmt {
        Statement::Let { name, value } => {
            let evaluated = eval_expression(value, env);
            if evaluated.is_error() {
                return evaluated;
            }
            env.borrow_mut().set(name.clone(), evaluated);
            Value::Null
        }
        Statement::Return { value } => {
            let evaluated = eval_expression(value, env);
            if evaluated.is_error() {
                return evaluated;
            }
            Value::ReturnValue(Box::new(evaluated))
        }
        Statement::Expr(expr) => eval_expression(expr, env),
        Statement::Block(block) => eval_block_statement(block, env),
    }
}

/// Evaluate a block's statements without unwrapping `ReturnValue` -- a
/// `return` inside a nested `if` must keep propagating upward through
/// enclosing blocks until it reaches the function call boundary or the
/// top-level program.
fn eval_block_statement(block: &BlockStatement, env: &Env) -> Value {
    let mut result = Value::Null;
    for stmt in &block.statements {
        result = eval_statement(stmt, env);
        if matches!(result, Value::ReturnValue(_) | Value::Error(_)) {
            return result;
        }
    }
    result
}

fn eval_expression(expr: &Expression, env: &Env) -> Value {
    match expr {
        Expression::IntLit(n) => Value::Int(*n),
        Expression::StrLit(s) => Value::str(s.clone()),
        Expression::BoolLit(b) => Value::Bool(*b),
        Expression::Ident(name) => eval_identifier(name, env),
        Expression::Prefix { op, right } => {
            let right = eval_expression(right, env);
            if right.is_error() {
                return right;
            }
            eval_prefix_expression(op, right)
        }
        Expression::Infix { op, left, right } => {
            let left = eval_expression(left, env);
            if left.is_error() {
                return left;
            }
            let right = eval_expression(right, env);
            if right.is_error() {
                return right;
            }
            eval_infix_expression(op, left, right)
        }
        Expression::If { cond, cons, alt } => eval_if_expression(cond, cons, alt.as_ref(), env),
        Expression::FnLit { params, body } => Value::Function(Rc::new(FunctionValue {
            params: params.clone(),
            body: body.clone(),
            env: env.clone(),
        })),
        Expression::Call { func, args } => eval_call_expression(func, args, env),
        Expression::ArrayLit(elements) => {
            let values = eval_expressions(elements, env);
            match values {
                Ok(values) => Value::Array(Rc::new(values)),
                Err(err) => err,
            }
        }
        Expression::Index { left, index } => {
            let left = eval_expression(left, env);
            if left.is_error() {
                return left;
            }
            let index = eval_expression(index, env);
            if index.is_error() {
                return index;
            }
            eval_index_expression(left, index)
        }
        Expression::HashLit(pairs) => eval_hash_literal(pairs, env),
    }
}

fn eval_identifier(name: &str, env: &Env) -> Value {
    if let Some(value) = env.borrow().get(name) {
        return value;
    }
    if let Some(builtin) = builtins::lookup(name) {
        return builtin;
    }
    Value::error(format!("identifier not found: {name}"))
}

fn eval_prefix_expression(op: &str, right: Value) -> Value {
    match op {
        "!" => Value::Bool(!right.is_truthy()),
        "-" => match right {
            Value::Int(n) => Value::Int(n.wrapping_neg()),
            other => Value::error(format!("unknown operator: -{}", other.type_tag())),
        },
        other => Value::error(format!("unknown operator: {other}")),
    }
}

fn eval_infix_expression(op: &str, left: Value, right: Value) -> Value {
    match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => eval_integer_infix(op, *a, *b),
        (Value::Str(a), Value::Str(b)) => eval_string_infix(op, a, b),
        _ if left.type_tag() != right.type_tag() => Value::error(format!(
            "type mismatch: {} {} {}",
            left.type_tag(),
            op,
            right.type_tag()
        )),
        _ if op == "==" => Value::Bool(left == right),
        _ if op == "!=" => Value::Bool(left != right),
        _ => Value::error(format!(
            "unknown operator: {} {} {}",
            left.type_tag(),
            op,
            right.type_tag()
        )),
    }
}

fn eval_integer_infix(op: &str, a: i64, b: i64) -> Value {
    match op {
        "+" => Value::Int(a.wrapping_add(b)),
        "-" => Value::Int(a.wrapping_sub(b)),
        "*" => Value::Int(a.wrapping_mul(b)),
        "/" => Value::Int(a / b),
        "<" => Value::Bool(a < b),
        ">" => Value::Bool(a > b),
        "==" => Value::Bool(a == b),
        "!=" => Value::Bool(a != b),
        other => Value::error(format!("unknown operator: INTEGER {other} INTEGER")),
    }
}

fn eval_string_infix(op: &str, a: &str, b: &str) -> Value {
    match op {
        "+" => Value::str(format!("{a}{b}")),
        other => Value::error(format!("unknown operator: STRING {other} STRING")),
    }
}

fn eval_if_expression(
    cond: &Expression,
    cons: &BlockStatement,
    alt: Option<&BlockStatement>,
    env: &Env,
) -> Value {
    let condition = eval_expression(cond, env);
    if condition.is_error() {
        return condition;
    }
    if condition.is_truthy() {
        eval_block_statement(cons, env)
    } else if let Some(alt) = alt {
        eval_block_statement(alt, env)
    } else {
        Value::Null
    }
}

fn eval_expressions(exprs: &[Expression], env: &Env) -> Result<Vec<Value>, Value> {
    let mut values = Vec::with_capacity(exprs.len());
    for expr in exprs {
        let value = eval_expression(expr, env);
        if value.is_error() {
            return Err(value);
        }
        values.push(value);
    }
    Ok(values)
}

fn eval_call_expression(func: &Expression, args: &[Expression], env: &Env) -> Value {
    let func_value = eval_expression(func, env);
    if func_value.is_error() {
        return func_value;
    }

    let arg_values = match eval_expressions(args, env) {
        Ok(values) => values,
        Err(err) => return err,
    };

    apply_function(func_value, arg_values)
}

fn apply_function(func: Value, args: Vec<Value>) -> Value {
    match func {
        Value::Function(func) => {
            // Extra args are dropped and missing params are left unbound --
            // `zip` already truncates to the shorter side, and an unbound
            // param only surfaces later as "identifier not found" if used.
            let call_env = Environment::new_enclosed(func.env.clone());
            for (param, arg) in func.params.iter().zip(args) {
                call_env.borrow_mut().set(param.clone(), arg);
            }
            let result = eval_block_statement(&func.body, &call_env);
            match result {
                Value::ReturnValue(inner) => *inner,
                other => other,
            }
        }
        Value::Builtin(name) => crate::builtins::call(name, args),
        other => Value::error(format!("not a function: {}", other.type_tag())),
    }
}

fn eval_index_expression(left: Value, index: Value) -> Value {
    match (&left, &index) {
        (Value::Array(items), Value::Int(i)) => {
            if *i < 0 || *i as usize >= items.len() {
                Value::Null
            } else {
                items[*i as usize].clone()
            }
        }
        (Value::Hash(map), _) => match index.hash_key() {
            Ok(key) => map.get(&key).map(|(_, v)| v.clone()).unwrap_or(Value::Null),
            Err(err) => err,
        },
        (other, _) => Value::error(format!("index operator not supported: {}", other.type_tag())),
    }
}

fn eval_hash_literal(pairs: &[(Expression, Expression)], env: &Env) -> Value {
    let mut map = rustc_hash::FxHashMap::default();
    for (key_expr, value_expr) in pairs {
        let key = eval_expression(key_expr, env);
        if key.is_error() {
            return key;
        }
        let value = eval_expression(value_expr, env);
        if value.is_error() {
            return value;
        }
        match key.hash_key() {
            Ok(hash_key) => {
                map.insert(hash_key, (key, value));
            }
            Err(err) => return err,
        }
    }
    Value::Hash(Rc::new(map))
}
