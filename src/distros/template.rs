// file: src/distros/template.rs
// version: 1.0.0
// guid: 61f0b3d8-7c2e-4a59-9e1d-4b8a2c6f0e95

//! Strict template rendering for configuration files
//!
//! Templates are rendered with minijinja in strict undefined mode: printing,
//! iterating or testing a name that is missing from the context is an error,
//! never an empty string. Block tags own their whole line (`trim_blocks` and
//! `lstrip_blocks`) so conditionals do not leave blank lines behind.

use crate::error::NetworkingError;
use crate::Result;
use minijinja::{Environment, ErrorKind, UndefinedBehavior};
use serde::Serialize;
use tracing::trace;

/// Banner placed at the top of generated files
pub fn generated_header(prefix: &str) -> String {
    let prefix = if prefix.is_empty() {
        String::new()
    } else {
        format!("{} ", prefix)
    };
    format!(
        "{p}This file was automatically generated by provision-networking.\n\
         {p}Local changes may be overwritten the next time the host is provisioned.",
        p = prefix
    )
}

/// Remove the whitespace margin shared by every non-blank line
///
/// Whitespace-only lines are emptied and do not count toward the margin.
pub fn dedent(text: &str) -> String {
    let margin = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        let (body, newline) = match line.strip_suffix('\n') {
            Some(body) => (body, "\n"),
            None => (line, ""),
        };
        if !body.trim().is_empty() {
            out.push_str(&body[margin..]);
        }
        out.push_str(newline);
    }
    out
}

/// minijinja environment configured for configuration file templates
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.add_function("generated_header", |prefix: Option<String>| {
            generated_header(prefix.as_deref().unwrap_or("#"))
        });
        Self { env }
    }

    /// Render `source` for the task at `task` against `ctx`
    pub fn render<S: Serialize>(&self, task: &str, source: &str, ctx: S) -> Result<String> {
        let source = dedent(source);
        trace!("Rendering {}", task);
        self.env
            .render_str(&source, ctx)
            .map_err(|e| template_error(task, &source, e))
    }
}

fn template_error(task: &str, source: &str, err: minijinja::Error) -> NetworkingError {
    match err.kind() {
        ErrorKind::UndefinedError => {
            let line = err.line();
            let offending = line
                .and_then(|l| source.lines().nth(l.saturating_sub(1)))
                .map(|text| format!(" in `{}`", text.trim()))
                .unwrap_or_default();
            NetworkingError::TemplateContract {
                task: task.to_string(),
                line,
                detail: format!("{}{}", err, offending),
            }
        }
        _ => NetworkingError::TemplateError(format!("{}: {}", task, err)),
    }
}
