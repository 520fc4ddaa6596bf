use std::cell::RefCell;
use std::rc::Rc;

use quill_eval::eval_program;
use quill_object::{Environment, Value};
use quill_parser::parse;

/// One REPL's worth of state: a single persistent environment that every
/// line evaluates against, so a `let` on one line is visible to the next.
pub struct ReplSession {
    env: Rc<RefCell<Environment>>,
}

/// The outcome of feeding one line of input to a [`ReplSession`].
pub enum LineOutcome {
    /// Lexing/parsing failed; these are the accumulated parser error
    /// messages. Evaluation is skipped entirely for the line.
    ParseErrors(Vec<String>),
    /// The line parsed and evaluated to `value`.
    Value(Value),
}

impl Default for ReplSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplSession {
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
        }
    }

    pub fn eval_line(&self, line: &str) -> LineOutcome {
        let (program, errors) = parse(line);
        if !errors.is_empty() {
            return LineOutcome::ParseErrors(errors);
        }
        LineOutcome::Value(eval_program(&program, &self.env))
    }

    /// Names currently bound in the top-level environment, for the `:env`
    /// dot-command.
    pub fn bound_names(&self) -> Vec<String> {
        self.env.borrow().names()
    }
}
