//! Course scripts: a JSON array of steps replayed against a fresh course.
//!
//! Steps point at modules and items with display references (`2`, `2.3`,
//! `i1`), resolved against the course as it stands when the step runs.
//! Positions in `reorder_*` steps are 1-based like the references.
//!
//! ```json
//! [
//!   { "op": "create_module", "name": "Week 1" },
//!   { "op": "add_link", "to": "1", "title": "Syllabus", "url": "https://example.com" },
//!   { "op": "add_file", "title": "Notes", "file_name": "notes.pdf", "file_data": "JVBERg==" },
//!   { "op": "drag", "source": "i1", "drop": ["1", "canvas"] }
//! ]
//! ```

use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use syllabus::api::{CmdMessage, CourseApi, DropCommand};
use syllabus::dnd::DropOutcome;
use syllabus::error::{Result, SyllabusError};
use syllabus::model::{ItemPayload, ModuleId};

const DEFAULT_FILE_TYPE: &str = "application/octet-stream";

fn default_file_type() -> String {
    DEFAULT_FILE_TYPE.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    CreateModule {
        name: String,
    },
    RenameModule {
        module: String,
        name: String,
    },
    DeleteModule {
        module: String,
    },
    AddLink {
        #[serde(default)]
        to: Option<String>,
        title: String,
        url: String,
    },
    AddFile {
        #[serde(default)]
        to: Option<String>,
        title: String,
        file_name: String,
        #[serde(default = "default_file_type")]
        file_type: String,
        /// Base64 encoded file contents
        file_data: String,
    },
    RenameItem {
        item: String,
        title: String,
    },
    DeleteItem {
        item: String,
    },
    MoveItem {
        item: String,
        #[serde(default)]
        to: Option<String>,
    },
    ReorderItems {
        #[serde(default)]
        module: Option<String>,
        from: usize,
        to: usize,
    },
    ReorderModules {
        from: usize,
        to: usize,
    },
    SelectModule {
        module: String,
    },
    Drag {
        source: String,
        drop: Vec<String>,
    },
}

pub fn load(path: &Path) -> Result<Vec<Step>> {
    let content = fs::read_to_string(path)?;
    let steps: Vec<Step> = serde_json::from_str(&content)?;
    debug!(
        "event=script_loaded path={} steps={}",
        path.display(),
        steps.len()
    );
    Ok(steps)
}

/// Replays `steps` in order, stopping at the first failure.
pub fn replay(api: &mut CourseApi, steps: Vec<Step>) -> Result<Vec<CmdMessage>> {
    let mut messages = Vec::new();
    for (n, step) in steps.into_iter().enumerate() {
        let step_messages = apply(api, step)
            .map_err(|e| SyllabusError::Api(format!("Step {} failed: {}", n + 1, e)))?;
        messages.extend(step_messages);
    }
    Ok(messages)
}

fn apply(api: &mut CourseApi, step: Step) -> Result<Vec<CmdMessage>> {
    let result = match step {
        Step::CreateModule { name } => api.create_module(&name)?,
        Step::RenameModule { module, name } => {
            let id = api.module_at(&module)?;
            api.update_module(&id, &name)?
        }
        Step::DeleteModule { module } => {
            let id = api.module_at(&module)?;
            api.delete_module(&id)?
        }
        Step::AddLink { to, title, url } => {
            let target = target_module(api, to.as_deref())?;
            api.create_item(target, &title, ItemPayload::Link { url })?
        }
        Step::AddFile {
            to,
            title,
            file_name,
            file_type,
            file_data,
        } => {
            let target = target_module(api, to.as_deref())?;
            let file_data = STANDARD.decode(file_data.trim())?;
            let payload = ItemPayload::File {
                file_name,
                file_size: file_data.len() as u64,
                file_type,
                file_data,
            };
            api.create_item(target, &title, payload)?
        }
        Step::RenameItem { item, title } => {
            let id = api.item_at(&item)?;
            api.rename_item(&id, &title)?
        }
        Step::DeleteItem { item } => {
            let id = api.item_at(&item)?;
            api.delete_item(&id)?
        }
        Step::MoveItem { item, to } => {
            let id = api.item_at(&item)?;
            let target = target_module(api, to.as_deref())?;
            api.move_item(&id, target)?
        }
        Step::ReorderItems { module, from, to } => {
            let target = target_module(api, module.as_deref())?;
            api.reorder_items(target, position(from)?, position(to)?)?
        }
        Step::ReorderModules { from, to } => api.reorder_modules(position(from)?, position(to)?)?,
        Step::SelectModule { module } => {
            let id = api.module_at(&module)?;
            api.select_module(&id)?;
            return Ok(Vec::new());
        }
        Step::Drag { source, drop } => {
            api.submit_drag(&source, &drop)?;
            let outcomes = api.process_events()?;
            return Ok(outcomes.iter().filter_map(describe_outcome).collect());
        }
    };
    Ok(result.messages)
}

fn target_module(api: &CourseApi, reference: Option<&str>) -> Result<Option<ModuleId>> {
    reference.map(|r| api.module_at(r)).transpose()
}

fn position(one_based: usize) -> Result<usize> {
    one_based
        .checked_sub(1)
        .ok_or_else(|| SyllabusError::Api("Positions start at 1".to_string()))
}

fn describe_outcome(outcome: &DropOutcome) -> Option<CmdMessage> {
    match outcome {
        DropOutcome::Applied(DropCommand::MoveItem { target: None, .. }) => {
            Some(CmdMessage::success("Dropped item onto the canvas"))
        }
        DropOutcome::Applied(DropCommand::MoveItem { target: Some(_), .. }) => {
            Some(CmdMessage::success("Dropped item into a module"))
        }
        DropOutcome::Applied(DropCommand::ReorderItems { from, to, .. }) => Some(
            CmdMessage::success(format!("Item moved from position {} to {}", from + 1, to + 1)),
        ),
        DropOutcome::Applied(DropCommand::ReorderModules { from, to }) => Some(
            CmdMessage::success(format!("Module moved from position {} to {}", from + 1, to + 1)),
        ),
        DropOutcome::Applied(DropCommand::Nothing) => {
            Some(CmdMessage::info("Dropped in place, nothing changed"))
        }
        DropOutcome::Cancelled => Some(CmdMessage::warning("Drop not accepted, nothing changed")),
        DropOutcome::Tracked | DropOutcome::Ignored => None,
    }
}
