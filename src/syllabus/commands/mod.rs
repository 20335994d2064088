//! # Command Layer
//!
//! The mutation engine. Every function here either validates and applies one
//! operation in full, or returns an error with the store untouched. Nothing
//! else in the crate writes to [`InMemoryStore`](crate::store::memory::InMemoryStore).

use crate::model::{Item, Module};

pub mod helpers;
pub mod item;
pub mod module;
pub mod move_item;
pub mod outline;
pub mod reorder;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_modules: Vec<Module>,
    pub affected_items: Vec<Item>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn with_affected_modules(mut self, modules: Vec<Module>) -> Self {
        self.affected_modules = modules;
        self
    }

    pub fn with_affected_items(mut self, items: Vec<Item>) -> Self {
        self.affected_items = items;
        self
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// True when the command left the model as it was.
    pub fn is_noop(&self) -> bool {
        self.affected_modules.is_empty() && self.affected_items.is_empty()
    }
}
