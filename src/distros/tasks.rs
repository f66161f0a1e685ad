// file: src/distros/tasks.rs
// version: 1.0.0
// guid: 0d6a9f3e-2b7c-4e81-95f4-c8e1a3d7b260

//! File tasks produced by distro builders and how they land on disk
//!
//! A task maps a path relative to the target root to a template, or to
//! nothing when the file should be removed. Rendering turns every task into
//! concrete content; applying writes that content under the target root with
//! every path resolved through [`resolve_path`] so links inside the target
//! cannot redirect writes onto the host.

use super::template::TemplateRenderer;
use crate::error::NetworkingError;
use crate::utils::resolve_path;
use crate::Result;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// How rendered content is combined with an existing file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    #[default]
    Write,
    Append,
}

/// One file-level action requested by a builder
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    /// Template source; `None` deletes the file
    pub template: Option<String>,
    pub write_mode: WriteMode,
    /// Permission bits applied after writing
    pub mode: Option<u32>,
    /// Extra context merged over the shared context for this task only
    pub overrides: Map<String, Value>,
}

impl Task {
    pub fn template(source: impl Into<String>) -> Self {
        Self {
            template: Some(source.into()),
            write_mode: WriteMode::Write,
            mode: None,
            overrides: Map::new(),
        }
    }

    pub fn delete() -> Self {
        Self {
            template: None,
            write_mode: WriteMode::Write,
            mode: None,
            overrides: Map::new(),
        }
    }

    pub fn append(mut self) -> Self {
        self.write_mode = WriteMode::Append;
        self
    }

    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_override(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.overrides.insert(key.to_string(), value.into());
        self
    }

    pub fn is_delete(&self) -> bool {
        self.template.is_none()
    }
}

/// Tasks keyed by path relative to the target root
pub type TaskMap = BTreeMap<String, Task>;

/// Rendered output of a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Delete,
    Content(String),
    WithMode { mode: u32, content: String },
}

impl Rendered {
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Delete => None,
            Self::Content(content) | Self::WithMode { content, .. } => Some(content),
        }
    }

    pub fn mode(&self) -> Option<u32> {
        match self {
            Self::WithMode { mode, .. } => Some(*mode),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTask {
    pub output: Rendered,
    pub write_mode: WriteMode,
}

impl RenderedTask {
    pub fn content(&self) -> Option<&str> {
        self.output.content()
    }
}

pub type RenderedTasks = BTreeMap<String, RenderedTask>;

/// Render every task against `context`
pub fn render_tasks(
    tasks: &TaskMap,
    context: &Map<String, Value>,
    renderer: &TemplateRenderer,
) -> Result<RenderedTasks> {
    let mut rendered = RenderedTasks::new();
    for (path, task) in tasks {
        let output = match &task.template {
            None => Rendered::Delete,
            Some(source) => {
                let content = if task.overrides.is_empty() {
                    renderer.render(path, source, context)?
                } else {
                    let mut ctx = context.clone();
                    ctx.extend(task.overrides.clone());
                    renderer.render(path, source, &ctx)?
                };
                match task.mode {
                    Some(mode) => Rendered::WithMode { mode, content },
                    None => Rendered::Content(content),
                }
            }
        };
        rendered.insert(
            path.clone(),
            RenderedTask {
                output,
                write_mode: task.write_mode,
            },
        );
    }
    Ok(rendered)
}

/// Outcome of applying rendered tasks to a target root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub written: Vec<PathBuf>,
    pub deleted: Vec<PathBuf>,
    /// Appends whose content was already present
    pub unchanged: Vec<PathBuf>,
    /// Deletions of files that did not exist
    pub missing: Vec<PathBuf>,
}

impl ApplyReport {
    /// Every path a task was processed for
    pub fn processed(&self) -> Vec<&PathBuf> {
        self.written
            .iter()
            .chain(&self.deleted)
            .chain(&self.unchanged)
            .chain(&self.missing)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.written.is_empty() && self.deleted.is_empty() && self.unchanged.is_empty() && self.missing.is_empty()
    }
}

/// Whether `content` occurs in `existing` as whole lines
fn contains_lines(existing: &str, content: &str) -> bool {
    if content.is_empty() {
        return true;
    }
    let bytes = existing.as_bytes();
    existing.match_indices(content).any(|(start, _)| {
        let end = start + content.len();
        let starts_line = start == 0 || bytes[start - 1] == b'\n';
        let ends_line = content.ends_with('\n') || end == bytes.len() || bytes[end] == b'\n';
        starts_line && ends_line
    })
}

/// Apply rendered tasks beneath `root`
pub fn apply_tasks(rendered: &RenderedTasks, root: &Path) -> Result<ApplyReport> {
    let mut report = ApplyReport::default();

    for (relpath, task) in rendered {
        let path = resolve_path(root, Path::new(relpath))?;

        let content = match &task.output {
            Rendered::Delete => {
                if path.exists() {
                    debug!("Removing {}", path.display());
                    fs::remove_file(&path).map_err(|e| NetworkingError::filesystem(&path, e))?;
                    report.deleted.push(path);
                } else {
                    report.missing.push(path);
                }
                continue;
            }
            Rendered::Content(content) | Rendered::WithMode { content, .. } => content,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| NetworkingError::filesystem(parent, e))?;
        }

        match task.write_mode {
            WriteMode::Write => {
                debug!("Writing {}", path.display());
                fs::write(&path, content).map_err(|e| NetworkingError::filesystem(&path, e))?;
            }
            WriteMode::Append => {
                let existing = match fs::read_to_string(&path) {
                    Ok(existing) => existing,
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
                    Err(e) => return Err(NetworkingError::filesystem(&path, e)),
                };
                if contains_lines(&existing, content) {
                    debug!("{} already contains the content, skipping", path.display());
                    report.unchanged.push(path);
                    continue;
                }
                debug!("Appending to {}", path.display());
                let mut updated = existing;
                if !updated.is_empty() && !updated.ends_with('\n') {
                    updated.push('\n');
                }
                updated.push_str(content);
                fs::write(&path, updated).map_err(|e| NetworkingError::filesystem(&path, e))?;
            }
        }

        if let Some(mode) = task.output.mode() {
            fs::set_permissions(&path, fs::Permissions::from_mode(mode))
                .map_err(|e| NetworkingError::filesystem(&path, e))?;
        }
        report.written.push(path);
    }

    info!(
        "Applied {} tasks under {}: {} written, {} deleted",
        rendered.len(),
        root.display(),
        report.written.len(),
        report.deleted.len()
    );
    Ok(report)
}
