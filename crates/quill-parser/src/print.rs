//! Pretty printer: renders an AST back to Quill source text.
//!
//! Every compound expression prints fully parenthesized, so re-parsing the
//! output always reconstructs the same tree regardless of what precedence
//! originally produced it -- this is what makes the printer/parser pair a
//! round trip rather than just a human-readable dump.

use crate::ast::{BlockStatement, Expression, Program, Statement};

pub fn print_program(program: &Program) -> String {
    program
        .iter()
        .map(print_statement)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn print_statement(stmt: &Statement) -> String {
    match stmt {
        Statement::Let { name, value } => format!("let {} = {};", name, print_expression(value)),
        Statement::Return { value } => format!("return {};", print_expression(value)),
        Statement::Expr(expr) => format!("{};", print_expression(expr)),
        Statement::Block(block) => print_block(block),
    }
}

pub fn print_block(block: &BlockStatement) -> String {
    let body = block
        .statements
        .iter()
        .map(print_statement)
        .collect::<Vec<_>>()
        .join(" ");
    format!("{{ {body} }}")
}

pub fn print_expression(expr: &Expression) -> String {
    match expr {
        Expression::Ident(name) => name.clone(),
        Expression::IntLit(n) => n.to_string(),
        Expression::StrLit(s) => format!("\"{}\"", escape_string(s)),
        Expression::BoolLit(b) => b.to_string(),
        Expression::Prefix { op, right } => format!("({op}{})", print_expression(right)),
        Expression::Infix { op, left, right } => {
            format!("({} {op} {})", print_expression(left), print_expression(right))
        }
        Expression::If { cond, cons, alt } => {
            let mut rendered = format!("if ({}) {}", print_expression(cond), print_block(cons));
            if let Some(alt) = alt {
                rendered.push_str(&format!(" else {}", print_block(alt)));
            }
            rendered
        }
        Expression::FnLit { params, body } => {
            format!("fn({}) {}", params.join(", "), print_block(body))
        }
        Expression::Call { func, args } => format!(
            "{}({})",
            print_expression(func),
            args.iter().map(print_expression).collect::<Vec<_>>().join(", ")
        ),
        Expression::ArrayLit(elements) => format!(
            "[{}]",
            elements
                .iter()
                .map(print_expression)
                .collect::<Vec<_>>()
                .join(", ")
        ),
        Expression::Index { left, index } => {
            format!("({}[{}])", print_expression(left), print_expression(index))
        }
        Expression::HashLit(pairs) => format!(
            "{{{}}}",
            pairs
                .iter()
                .map(|(k, v)| format!("{}: {}", print_expression(k), print_expression(v)))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

/// Escape the characters the lexer treats specially inside a string literal
/// (`\`, `"`, tab, newline, carriage return) so the printed literal reparses
/// back to the same contents.
fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}
