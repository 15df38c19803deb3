//! Debug rendering of expression trees.
//!
//! Output names each variant with its ordered children, e.g.
//! `If(Component(a), Literal(1), UnaryOp(-, Literal(2)))`. The format is for
//! tests and diagnostics only.

use super::visitor::{visit, Visitor};
use super::{BinaryOp, ComponentReference, Expression, Literal, UnaryOp};

/// Visitor that appends the debug rendering of each node to a `String`.
pub struct DebugPrinter;

/// Renders `expr` using [`DebugPrinter`].
pub fn render(expr: &Expression) -> String {
    let mut out = String::new();
    visit(&DebugPrinter, expr, &mut out);
    out
}

/// Renders a reference in source form; subscript indices use debug form.
pub fn render_reference(reference: &ComponentReference) -> String {
    let mut out = String::new();
    write_reference(reference, &mut out);
    out
}

impl Visitor<String> for DebugPrinter {
    fn visit_conditional(
        &self,
        condition: &Expression,
        then_branch: &Expression,
        else_branch: &Expression,
        out: &mut String,
    ) {
        out.push_str("If(");
        visit(self, condition, out);
        out.push_str(", ");
        visit(self, then_branch, out);
        out.push_str(", ");
        visit(self, else_branch, out);
        out.push(')');
    }

    fn visit_unary(&self, op: UnaryOp, operand: &Expression, out: &mut String) {
        out.push_str("UnaryOp(");
        out.push_str(op.symbol());
        out.push_str(", ");
        visit(self, operand, out);
        out.push(')');
    }

    fn visit_binary(&self, op: BinaryOp, left: &Expression, right: &Expression, out: &mut String) {
        out.push_str("BinaryOp(");
        out.push_str(op.symbol());
        out.push_str(", ");
        visit(self, left, out);
        out.push_str(", ");
        visit(self, right, out);
        out.push(')');
    }

    fn visit_function_call(&self, function: &ComponentReference, arguments: &[Expression], out: &mut String) {
        out.push_str("FunctionCall(");
        write_reference(function, out);
        for argument in arguments {
            out.push_str(", ");
            visit(self, argument, out);
        }
        out.push(')');
    }

    fn visit_literal(&self, literal: &Literal, out: &mut String) {
        out.push_str("Literal(");
        match literal {
            // `{:?}` keeps a fractional part or exponent, so reals never print like integers.
            Literal::Real(d) => out.push_str(&format!("{:?}", d)),
            Literal::Integer(i) => out.push_str(&i.to_string()),
            Literal::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
            Literal::String(s) => write_quoted(s, out),
            Literal::End => out.push_str("end"),
        }
        out.push(')');
    }

    fn visit_array_range(
        &self,
        start: &Expression,
        step: Option<&Expression>,
        stop: &Expression,
        out: &mut String,
    ) {
        out.push_str("ArrayRange(");
        visit(self, start, out);
        out.push_str(", ");
        if let Some(step) = step {
            visit(self, step, out);
            out.push_str(", ");
        }
        visit(self, stop, out);
        out.push(')');
    }

    fn visit_component(&self, reference: &ComponentReference, out: &mut String) {
        out.push_str("Component(");
        write_reference(reference, out);
        out.push(')');
    }
}

fn write_reference(reference: &ComponentReference, out: &mut String) {
    if reference.global {
        out.push('.');
    }
    for (i, part) in reference.parts.iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        out.push_str(&part.ident);
        if part.subscripts.is_empty() {
            continue;
        }
        out.push('[');
        for (j, subscript) in part.subscripts.iter().enumerate() {
            if j > 0 {
                out.push_str(", ");
            }
            match subscript.expression() {
                Some(index) => visit(&DebugPrinter, index, out),
                None => out.push(':'),
            }
        }
        out.push(']');
    }
}

fn write_quoted(s: &str, out: &mut String) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
}
