//! # Storage Layer
//!
//! This module defines the read contract for a course. The [`CourseStore`] trait
//! is what queries, the filter engine and the drag/drop translator see.
//!
//! ## Design Rationale
//!
//! Reads go through a trait while writes do not:
//! - Every query command is generic over `CourseStore`, so it can be exercised
//!   against any model holder
//! - The only writer is the command layer, which reaches the crate-private write
//!   primitives of [`memory::InMemoryStore`]. Callers outside the crate cannot
//!   splice a container directly, so container invariants hold at a single
//!   choke point
//!
//! ## Layout
//!
//! ```text
//! InMemoryStore
//! ├── modules: [ModuleEntry]      # ordered; position is the display order
//! │   └── items: [Item]           # the module's own ordered sequence
//! └── independent: [Item]         # top-level ordered sequence
//! ```
//!
//! An item's `container` field always names the sequence that physically holds
//! it. There is no persistence: state lives for a single session.

use crate::error::Result;
use crate::model::{Container, Item, ItemId, Module, ModuleId};

pub mod memory;

/// Read accessors over the course model.
///
/// Every call reflects the latest state; nothing here caches.
pub trait CourseStore {
    /// All modules in display order.
    fn modules(&self) -> Vec<&Module>;

    /// Look up one module by id.
    fn module(&self, id: &ModuleId) -> Result<&Module>;

    /// Position of a module within the module sequence.
    fn module_position(&self, id: &ModuleId) -> Result<usize>;

    /// The ordered sequence held by a container.
    fn items_in(&self, container: Container) -> Result<&[Item]>;

    /// Look up one item by id, wherever it lives.
    fn item(&self, id: &ItemId) -> Result<&Item>;

    /// The container holding an item and its position there.
    fn locate_item(&self, id: &ItemId) -> Result<(Container, usize)>;

    /// Items owned by one module, in order.
    fn module_items(&self, id: &ModuleId) -> Result<&[Item]> {
        self.items_in(Container::Module(*id))
    }

    /// The independent sequence, in order.
    fn independent_items(&self) -> &[Item];

    /// All module-owned items: module order first, then each module's own order.
    fn items(&self) -> Vec<&Item> {
        self.modules()
            .into_iter()
            .filter_map(|m| self.module_items(&m.id).ok())
            .flatten()
            .collect()
    }
}
