//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It serves as the
//! single entry point for presentation, modal and gesture layers alike.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns** the course state, the drag session and the pending gesture queue
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (e.g., converting display references to ids)
//! - **Returns structured types** (`Result<CmdResult>`, borrowed views)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs`, `filter.rs` and `dnd.rs`
//! - **I/O operations**: No stdout, stderr, or file formatting
//! - **Presentation concerns**: Returns data structures, not strings
//!
//! There is no ambient state: a `CourseApi` value is the whole session and is
//! passed explicitly to whoever needs it.

use crate::commands::{self, outline::OutlineEntry};
use crate::dnd::{DragEvent, DragSession, DropOutcome, DropTarget, GestureQueue};
use crate::error::{Result, SyllabusError};
use crate::filter::{self, FilteredView};
use crate::index::{self, DisplayRef, TargetRef};
use crate::model::{Item, ItemId, ItemPayload, Module, ModuleId};
use crate::store::memory::InMemoryStore;
use crate::store::CourseStore;
use std::str::FromStr;

/// The main API facade for course operations.
#[derive(Debug, Default)]
pub struct CourseApi {
    store: InMemoryStore,
    session: DragSession,
    queue: GestureQueue,
    selected: Option<ModuleId>,
}

impl CourseApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &InMemoryStore {
        &self.store
    }

    // --- Queries ---

    pub fn modules(&self) -> Vec<&Module> {
        self.store.modules()
    }

    pub fn module_items(&self, id: &ModuleId) -> Result<&[Item]> {
        self.store.module_items(id)
    }

    pub fn independent_items(&self) -> &[Item] {
        self.store.independent_items()
    }

    /// The visible course for a live search query. A blank query shows everything.
    pub fn view(&self, query: &str) -> Result<FilteredView<'_>> {
        filter::filter(&self.store, query)
    }

    pub fn outline(&self, query: &str) -> Result<Vec<OutlineEntry>> {
        let view = self.view(query)?;
        Ok(commands::outline::run(&view, self.selected))
    }

    // --- Module commands ---

    pub fn create_module(&mut self, name: &str) -> Result<commands::CmdResult> {
        commands::module::create(&mut self.store, name)
    }

    pub fn update_module(&mut self, id: &ModuleId, name: &str) -> Result<commands::CmdResult> {
        commands::module::update(&mut self.store, id, name)
    }

    pub fn delete_module(&mut self, id: &ModuleId) -> Result<commands::CmdResult> {
        let result = commands::module::delete(&mut self.store, id)?;
        if self.selected == Some(*id) {
            self.selected = None;
        }
        Ok(result)
    }

    pub fn reorder_modules(&mut self, from: usize, to: usize) -> Result<commands::CmdResult> {
        commands::reorder::modules(&mut self.store, from, to)
    }

    // --- Item commands ---

    pub fn create_item(
        &mut self,
        module_id: Option<ModuleId>,
        title: &str,
        payload: ItemPayload,
    ) -> Result<commands::CmdResult> {
        commands::item::create(&mut self.store, module_id, title, payload)
    }

    pub fn delete_item(&mut self, id: &ItemId) -> Result<commands::CmdResult> {
        commands::item::delete(&mut self.store, id)
    }

    pub fn rename_item(&mut self, id: &ItemId, title: &str) -> Result<commands::CmdResult> {
        commands::item::rename(&mut self.store, id, title)
    }

    pub fn move_item(
        &mut self,
        id: &ItemId,
        target: Option<ModuleId>,
    ) -> Result<commands::CmdResult> {
        commands::move_item::run(&mut self.store, id, target)
    }

    pub fn reorder_items(
        &mut self,
        module_id: Option<ModuleId>,
        from: usize,
        to: usize,
    ) -> Result<commands::CmdResult> {
        commands::reorder::items(&mut self.store, module_id, from, to)
    }

    // --- Outline selection ---

    pub fn select_module(&mut self, id: &ModuleId) -> Result<()> {
        self.store.module(id)?;
        self.selected = Some(*id);
        Ok(())
    }

    pub fn selected_module(&self) -> Option<ModuleId> {
        self.selected
    }

    // --- Drag and drop ---

    /// Queues a gesture event for [`process_events`](Self::process_events).
    pub fn submit(&mut self, event: DragEvent) {
        self.queue.push(event);
    }

    pub fn process_events(&mut self) -> Result<Vec<DropOutcome>> {
        self.queue.dispatch(&mut self.session, &mut self.store)
    }

    pub fn handle_event(&mut self, event: DragEvent) -> Result<DropOutcome> {
        self.session.handle(&mut self.store, event)
    }

    pub fn hovered(&self) -> Option<&DropTarget> {
        self.session.hovered()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_dragging()
    }

    // --- Display references ---

    pub fn module_at(&self, reference: &str) -> Result<ModuleId> {
        match parse_ref(reference)? {
            DisplayRef::Module(position) => index::resolve_module(&self.store, position),
            other => Err(SyllabusError::Api(format!(
                "Reference {} names an item, not a module",
                other
            ))),
        }
    }

    pub fn item_at(&self, reference: &str) -> Result<ItemId> {
        index::resolve_item(&self.store, parse_ref(reference)?)
    }

    /// Queues a full drag gesture: start on `source`, drop through `targets`
    /// (deepest first), end.
    pub fn submit_drag<T: AsRef<str>>(&mut self, source: &str, targets: &[T]) -> Result<()> {
        let source = index::drag_source(&self.store, parse_ref(source)?)?;
        let mut resolved = Vec::with_capacity(targets.len());
        for target in targets {
            let target = TargetRef::from_str(target.as_ref()).map_err(SyllabusError::Api)?;
            resolved.push(index::drop_target(&self.store, target)?);
        }
        let targets = resolved;

        self.submit(DragEvent::Start(source));
        if let Some(first) = targets.first() {
            self.submit(DragEvent::Hover(vec![*first]));
        }
        self.submit(DragEvent::Drop(targets));
        self.submit(DragEvent::End);
        Ok(())
    }
}

fn parse_ref(reference: &str) -> Result<DisplayRef> {
    DisplayRef::from_str(reference).map_err(SyllabusError::Api)
}

pub use crate::commands::outline::summary_label;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
pub use crate::dnd::DropCommand;
pub use crate::filter::{ModuleView, ViewState};
