use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ModuleId = Uuid;
pub type ItemId = Uuid;

/// Which ordered sequence owns an item.
///
/// An item lives in exactly one container at a time. `Module` must always
/// reference a module that exists in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Container {
    Module(ModuleId),
    Independent,
}

impl Container {
    pub fn from_module(module_id: Option<ModuleId>) -> Self {
        match module_id {
            Some(id) => Container::Module(id),
            None => Container::Independent,
        }
    }

    pub fn module_id(&self) -> Option<ModuleId> {
        match self {
            Container::Module(id) => Some(*id),
            Container::Independent => None,
        }
    }
}

impl std::fmt::Display for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Container::Module(id) => write!(f, "module:{}", id),
            Container::Independent => write!(f, "independent"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub id: ModuleId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Module {
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Link,
    File,
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKind::Link => write!(f, "link"),
            ItemKind::File => write!(f, "file"),
        }
    }
}

/// Kind-specific content. Values arrive already validated by the upload and
/// link-entry collaborators; only presence is checked here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ItemPayload {
    Link {
        url: String,
    },
    File {
        file_name: String,
        file_size: u64,
        file_type: String,
        file_data: Vec<u8>,
    },
}

impl ItemPayload {
    pub fn kind(&self) -> ItemKind {
        match self {
            ItemPayload::Link { .. } => ItemKind::Link,
            ItemPayload::File { .. } => ItemKind::File,
        }
    }

    /// The secondary text searched alongside the title.
    pub fn search_text(&self) -> &str {
        match self {
            ItemPayload::Link { url } => url,
            ItemPayload::File { file_name, .. } => file_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub container: Container,
    pub payload: ItemPayload,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    pub fn new(container: Container, title: String, payload: ItemPayload) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            container,
            payload,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn kind(&self) -> ItemKind {
        self.payload.kind()
    }

    pub fn module_id(&self) -> Option<ModuleId> {
        self.container.module_id()
    }
}
