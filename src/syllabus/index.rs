//! # Display References
//!
//! Ids are opaque UUIDs assigned by the core. People and scripts point at
//! things by position instead, so this module maps short, 1-based references
//! onto the ids of the current course:
//!
//! - `2`: the second module
//! - `2.3`: the third item of the second module
//! - `i4`: the fourth independent item
//!
//! Drop targets reuse the same notation, with an optional `@slot` for the
//! position the gesture layer resolved inside a container:
//!
//! - `2` / `2@1`: the module card of module 2 (optionally at item slot 1)
//! - `2.3` / `i4`: an item acting as a reorder anchor
//! - `canvas` / `canvas@2`: the page-level canvas (the independent list)
//!
//! References are resolved against the unfiltered model, so they stay the
//! same whether or not a search is active.

use crate::dnd::{DragSource, DropTarget};
use crate::error::{Result, SyllabusError};
use crate::model::{Container, ItemId, ModuleId};
use crate::store::CourseStore;
use std::str::FromStr;

/// A user-facing reference to a module or item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayRef {
    Module(usize),
    Item { module: usize, item: usize },
    Independent(usize),
}

impl std::fmt::Display for DisplayRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayRef::Module(m) => write!(f, "{}", m),
            DisplayRef::Item { module, item } => write!(f, "{}.{}", module, item),
            DisplayRef::Independent(i) => write!(f, "i{}", i),
        }
    }
}

fn parse_position(s: &str) -> std::result::Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("Positions start at 1".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("Invalid position: {}", s)),
    }
}

impl FromStr for DisplayRef {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(rest) = s.strip_prefix('i') {
            return parse_position(rest)
                .map(DisplayRef::Independent)
                .map_err(|_| format!("Invalid reference format: {}", s));
        }
        if let Some((module, item)) = s.split_once('.') {
            return match (parse_position(module), parse_position(item)) {
                (Ok(module), Ok(item)) => Ok(DisplayRef::Item { module, item }),
                _ => Err(format!("Invalid reference format: {}", s)),
            };
        }
        parse_position(s)
            .map(DisplayRef::Module)
            .map_err(|_| format!("Invalid reference format: {}", s))
    }
}

/// A user-facing reference to a drop target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetRef {
    Module { module: usize, slot: Option<usize> },
    Anchor(DisplayRef),
    Canvas { slot: Option<usize> },
}

impl FromStr for TargetRef {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let (head, slot) = match s.split_once('@') {
            Some((head, slot)) => (head, Some(parse_position(slot)?)),
            None => (s, None),
        };

        if head == "canvas" {
            return Ok(TargetRef::Canvas { slot });
        }
        match DisplayRef::from_str(head)? {
            DisplayRef::Module(module) => Ok(TargetRef::Module { module, slot }),
            anchor if slot.is_none() => Ok(TargetRef::Anchor(anchor)),
            _ => Err(format!("Only modules and the canvas take a slot: {}", s)),
        }
    }
}

fn missing(reference: impl std::fmt::Display) -> SyllabusError {
    SyllabusError::Api(format!("Reference {} not found in current course", reference))
}

pub fn resolve_module<S: CourseStore>(store: &S, position: usize) -> Result<ModuleId> {
    position
        .checked_sub(1)
        .and_then(|i| store.modules().get(i).map(|m| m.id))
        .ok_or_else(|| missing(DisplayRef::Module(position)))
}

/// Resolves an optional module reference to a container; `None` is the independent list.
pub fn resolve_container<S: CourseStore>(store: &S, module: Option<usize>) -> Result<Container> {
    match module {
        Some(position) => resolve_module(store, position).map(Container::Module),
        None => Ok(Container::Independent),
    }
}

pub fn resolve_item<S: CourseStore>(store: &S, reference: DisplayRef) -> Result<ItemId> {
    let (container, position) = match reference {
        DisplayRef::Module(_) => {
            return Err(SyllabusError::Api(format!(
                "Reference {} names a module, not an item",
                reference
            )))
        }
        DisplayRef::Item { module, item } => (resolve_container(store, Some(module))?, item),
        DisplayRef::Independent(item) => (Container::Independent, item),
    };
    position
        .checked_sub(1)
        .and_then(|i| store.items_in(container).ok()?.get(i).map(|item| item.id))
        .ok_or_else(|| missing(reference))
}

/// Computes the reference of an item as it currently sits in the model.
pub fn item_ref<S: CourseStore>(store: &S, id: &ItemId) -> Result<DisplayRef> {
    let (container, position) = store.locate_item(id)?;
    Ok(match container {
        Container::Module(module_id) => DisplayRef::Item {
            module: store.module_position(&module_id)? + 1,
            item: position + 1,
        },
        Container::Independent => DisplayRef::Independent(position + 1),
    })
}

/// Builds the drag payload for whatever `reference` points at.
pub fn drag_source<S: CourseStore>(store: &S, reference: DisplayRef) -> Result<DragSource> {
    match reference {
        DisplayRef::Module(position) => {
            let id = resolve_module(store, position)?;
            Ok(DragSource::Module {
                id,
                index: position - 1,
            })
        }
        _ => {
            let id = resolve_item(store, reference)?;
            let (container, index) = store.locate_item(&id)?;
            Ok(DragSource::Item {
                id,
                container,
                index,
            })
        }
    }
}

/// Converts a 1-based slot into the 0-based index drop targets carry.
fn slot_index(slot: Option<usize>) -> Result<Option<usize>> {
    slot.map(|s| {
        s.checked_sub(1)
            .ok_or_else(|| SyllabusError::Api("Positions start at 1".to_string()))
    })
    .transpose()
}

pub fn drop_target<S: CourseStore>(store: &S, target: TargetRef) -> Result<DropTarget> {
    Ok(match target {
        TargetRef::Module { module, slot } => DropTarget::Module {
            id: resolve_module(store, module)?,
            slot: slot_index(slot)?,
        },
        TargetRef::Anchor(reference) => DropTarget::Anchor {
            id: resolve_item(store, reference)?,
        },
        TargetRef::Canvas { slot } => DropTarget::Canvas {
            slot: slot_index(slot)?,
        },
    })
}
