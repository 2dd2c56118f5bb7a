//! Class extraction from Lua source with full_moon.

use super::doc_comment::{parse_line, DocLine};
use super::{LuaClass, LuaConstructor, LuaParam};
use crate::error::{Result, StubError, SyntaxError};
use crate::model::Named;
use full_moon::ast::punctuated::Punctuated;
use full_moon::ast::{
    Call, Expression, FunctionArgs, FunctionCall, FunctionDeclaration, Parameter, Prefix, Stmt,
    Suffix, Var,
};
use full_moon::node::Node;
use full_moon::tokenizer::{TokenReference, TokenType};
use full_moon::visitors::Visitor;
use std::path::Path;
use tracing::debug;

/// Parse `source` and collect its classes in declaration order.
///
/// Any syntax error fails the whole file; no partial model is returned.
pub fn extract(path: &Path, source: &str) -> Result<Named<LuaClass>> {
    let ast = full_moon::parse(source).map_err(|errors| StubError::Syntax {
        path: path.to_path_buf(),
        errors: errors.iter().map(syntax_error).collect(),
    })?;

    let mut collector = ClassCollector::default();
    collector.visit_ast(&ast);
    Ok(collector.classes)
}

fn syntax_error(error: &full_moon::Error) -> SyntaxError {
    let (start, _) = error.range();
    SyntaxError {
        line: start.line(),
        column: start.character(),
        message: error.error_message().to_string(),
    }
}

/// The comment block directly above `stmt`. A blank line detaches it.
fn doc_lines(stmt: &Stmt) -> Vec<DocLine> {
    let Some(first) = stmt.tokens().next() else {
        return Vec::new();
    };

    let mut lines = Vec::new();
    let mut newlines = 0;
    for trivia in first.leading_trivia() {
        match trivia.token_type() {
            TokenType::SingleLineComment { comment } => {
                if newlines > 1 {
                    lines.clear();
                }
                newlines = 0;
                lines.extend(parse_line(comment.as_str()));
            }
            TokenType::Whitespace { characters } => {
                newlines += characters.as_str().matches('\n').count();
            }
            _ => {}
        }
    }
    if newlines > 1 {
        lines.clear();
    }
    lines
}

fn single<T>(items: &Punctuated<T>) -> Option<&T> {
    if items.len() == 1 {
        items.iter().next()
    } else {
        None
    }
}

fn string_literal(token: &TokenReference) -> Option<String> {
    match token.token_type() {
        TokenType::StringLiteral { literal, .. } => Some(literal.to_string()),
        _ => None,
    }
}

fn base_name(expr: &Expression) -> Option<String> {
    match expr {
        Expression::String(s) => string_literal(s),
        Expression::Var(Var::Name(name)) => Some(name.token().to_string()),
        Expression::Var(var) => Some(var.to_string().trim().to_string()),
        _ => None,
    }
}

/// Arguments of a `class ...` call. `name` is `None` for the table form.
struct ClassCall {
    name: Option<String>,
    base: Option<String>,
}

fn class_call(call: &FunctionCall) -> Option<ClassCall> {
    let Prefix::Name(prefix) = call.prefix() else {
        return None;
    };
    if prefix.token().to_string() != "class" {
        return None;
    }

    let mut suffixes = call.suffixes();
    let Some(Suffix::Call(Call::AnonymousCall(args))) = suffixes.next() else {
        return None;
    };
    if suffixes.next().is_some() {
        return None;
    }

    match args {
        FunctionArgs::String(s) => Some(ClassCall {
            name: Some(string_literal(s)?),
            base: None,
        }),
        FunctionArgs::TableConstructor(_) => Some(ClassCall {
            name: None,
            base: None,
        }),
        FunctionArgs::Parentheses { arguments, .. } => {
            let mut args = arguments.iter();
            let Some(Expression::String(name)) = args.next() else {
                return None;
            };
            Some(ClassCall {
                name: Some(string_literal(name)?),
                base: args.next().and_then(base_name),
            })
        }
        _ => None,
    }
}

fn class_expr(expr: &Expression) -> Option<ClassCall> {
    match expr {
        Expression::FunctionCall(call) => class_call(call),
        _ => None,
    }
}

/// Walker-local accumulator for class declarations and constructors.
#[derive(Default)]
struct ClassCollector {
    classes: Named<LuaClass>,
}

impl ClassCollector {
    fn declare(&mut self, stmt: &Stmt, var: Option<String>, local: bool, call: ClassCall) {
        let global = var.is_some() && !local;
        let name = match (call.name, var) {
            (Some(name), _) => name,
            (None, Some(var)) => var,
            (None, None) => {
                debug!("anonymous table class without a variable, skipped");
                return;
            }
        };
        let has_comment = doc_lines(stmt).contains(&DocLine::Class);

        debug!(class = %name, global, has_comment, "found class declaration");
        // A redeclaration updates the header but keeps known constructors.
        let class = self
            .classes
            .entry(name.clone())
            .or_insert_with(|| LuaClass {
                name,
                ..Default::default()
            });
        class.inherits = call.base;
        class.global = global;
        class.has_comment = has_comment;
    }

    fn constructor(&mut self, stmt: &Stmt, func: &FunctionDeclaration) {
        let fn_name = func.name();
        let Some(method) = fn_name.method_name() else {
            return;
        };
        if method.token().to_string() != "__init" {
            return;
        }
        let Some(owner) = single(fn_name.names()) else {
            return;
        };
        let owner = owner.token().to_string();
        let Some(class) = self.classes.get_mut(&owner) else {
            debug!(class = %owner, "constructor for an undeclared class, skipped");
            return;
        };

        let mut params: Vec<LuaParam> = func
            .body()
            .parameters()
            .iter()
            .filter_map(|p| match p {
                Parameter::Name(name) => Some(LuaParam::untyped(&name.token().to_string(), false)),
                Parameter::Ellipsis(_) => Some(LuaParam::untyped("...", true)),
                _ => None,
            })
            .collect();

        let docs = doc_lines(stmt);
        overlay(&mut params, &docs);
        let description = docs
            .iter()
            .filter_map(|line| match line {
                DocLine::Description(text) => Some(text.clone()),
                _ => None,
            })
            .collect();

        class.constructors.push(LuaConstructor {
            description,
            params,
        });
    }
}

/// Copy documented types and descriptions onto signature parameters.
/// Parameters without a matching comment keep `any`.
fn overlay(params: &mut [LuaParam], docs: &[DocLine]) {
    for param in params.iter_mut() {
        let doc = docs.iter().find_map(|line| match line {
            DocLine::Vararg { ty, description } if param.variadic => Some((ty, description)),
            DocLine::Param {
                name,
                ty,
                description,
            } if !param.variadic && *name == param.name => Some((ty, description)),
            _ => None,
        });
        if let Some((ty, description)) = doc {
            param.ty = ty.clone();
            param.description = description.clone();
        }
    }
}

impl Visitor for ClassCollector {
    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::LocalAssignment(assign) => {
                let (Some(name), Some(expr)) = (single(assign.names()), single(assign.expressions()))
                else {
                    return;
                };
                if let Some(call) = class_expr(expr) {
                    self.declare(stmt, Some(name.token().to_string()), true, call);
                }
            }
            Stmt::Assignment(assign) => {
                let (Some(Var::Name(name)), Some(expr)) =
                    (single(assign.variables()), single(assign.expressions()))
                else {
                    return;
                };
                if let Some(call) = class_expr(expr) {
                    self.declare(stmt, Some(name.token().to_string()), false, call);
                }
            }
            Stmt::FunctionCall(call) => {
                if let Some(call) = class_call(call) {
                    self.declare(stmt, None, false, call);
                }
            }
            Stmt::FunctionDeclaration(func) => self.constructor(stmt, func),
            _ => {}
        }
    }
}
