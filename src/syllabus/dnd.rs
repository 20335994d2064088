//! # Drag and Drop Translation
//!
//! The gesture layer turns pointer movement into a strictly ordered stream of
//! [`DragEvent`]s. This module consumes that stream one event at a time and
//! turns each completed drop into at most one mutation command.
//!
//! ## Drop resolution
//!
//! A drop is delivered as a chain of targets, deepest first, the way it
//! bubbles from an item anchor to its module card to the page canvas. Every
//! target in the chain sees the drop, but each one first checks whether a
//! deeper target already claimed it and stands down if so. A target may also
//! decline, letting the drop bubble on.
//!
//! | dragged | target  | effect                                               |
//! |---------|---------|------------------------------------------------------|
//! | item    | module  | move into the module, or reorder to `slot` if already there |
//! | item    | anchor  | reorder within a shared container; otherwise decline |
//! | item    | canvas  | move to the independent list, or reorder to `slot`   |
//! | module  | module  | reorder modules unless dropped on itself             |
//! | module  | anchor  | decline                                              |
//! | module  | canvas  | claim, no effect                                     |
//!
//! A drag that ends without any target claiming it changes nothing.
//!
//! Positions come from the model, looked up by id, never from the payload:
//! the indexes a gesture layer captures while a search filter is active are
//! positions in the filtered view.

use crate::commands::{move_item, reorder, CmdResult};
use crate::error::Result;
use crate::model::{Container, ItemId, ModuleId};
use crate::store::memory::InMemoryStore;
use crate::store::CourseStore;
use log::{info, warn};
use std::collections::VecDeque;

/// What is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    Item {
        id: ItemId,
        container: Container,
        index: usize,
    },
    Module {
        id: ModuleId,
        index: usize,
    },
}

/// Something a drag can be released over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// A module card. `slot` is the item position the gesture layer resolved
    /// inside the module, when it resolved one.
    Module { id: ModuleId, slot: Option<usize> },
    /// Another item acting as a reorder anchor.
    Anchor { id: ItemId },
    /// The page-level canvas, standing for the independent list.
    Canvas { slot: Option<usize> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    Start(DragSource),
    /// Targets under the pointer, deepest first.
    Hover(Vec<DropTarget>),
    /// Targets the drop bubbles through, deepest first.
    Drop(Vec<DropTarget>),
    End,
}

/// The model operation a claimed drop resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropCommand {
    MoveItem {
        id: ItemId,
        target: Option<ModuleId>,
    },
    ReorderItems {
        module: Option<ModuleId>,
        from: usize,
        to: usize,
    },
    ReorderModules {
        from: usize,
        to: usize,
    },
    /// Claimed, but the drop lands where the source already is.
    Nothing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// A drop was claimed and its command applied.
    Applied(DropCommand),
    /// The drag finished without any target claiming it.
    Cancelled,
    /// Bookkeeping event (start, hover, or an end after a drop).
    Tracked,
    /// The event arrived with no drag in progress.
    Ignored,
}

/// Shared by every target a drop bubbles through.
#[derive(Debug, Default)]
struct DropContext {
    claimed: Option<DropCommand>,
}

impl DropContext {
    fn did_drop(&self) -> bool {
        self.claimed.is_some()
    }
}

/// Tracks the gesture in progress and applies drops to the store.
#[derive(Debug, Default)]
pub struct DragSession {
    active: Option<DragSource>,
    hovered: Option<DropTarget>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// The innermost target under the pointer, for shallow hover highlighting.
    pub fn hovered(&self) -> Option<&DropTarget> {
        self.hovered.as_ref()
    }

    pub fn handle(&mut self, store: &mut InMemoryStore, event: DragEvent) -> Result<DropOutcome> {
        match event {
            DragEvent::Start(source) => {
                if let Some(previous) = self.active.replace(source) {
                    warn!("event=drag_restarted previous={:?}", previous);
                }
                self.hovered = None;
                Ok(DropOutcome::Tracked)
            }
            DragEvent::Hover(targets) => {
                if self.active.is_none() {
                    return Ok(DropOutcome::Ignored);
                }
                self.hovered = targets.first().copied();
                Ok(DropOutcome::Tracked)
            }
            DragEvent::Drop(targets) => {
                let Some(source) = self.active.take() else {
                    return Ok(DropOutcome::Ignored);
                };
                self.hovered = None;
                self.drop_on(store, source, &targets)
            }
            DragEvent::End => {
                self.hovered = None;
                match self.active.take() {
                    Some(source) => {
                        info!("event=drag_cancelled source={:?}", source);
                        Ok(DropOutcome::Cancelled)
                    }
                    None => Ok(DropOutcome::Tracked),
                }
            }
        }
    }

    fn drop_on(
        &mut self,
        store: &mut InMemoryStore,
        source: DragSource,
        targets: &[DropTarget],
    ) -> Result<DropOutcome> {
        note_stale_payload(&*store, &source);

        let mut ctx = DropContext::default();
        for target in targets {
            on_drop(&*store, &mut ctx, &source, target)?;
        }

        let Some(command) = ctx.claimed else {
            info!("event=drop_unclaimed source={:?}", source);
            return Ok(DropOutcome::Cancelled);
        };

        info!("event=drop_resolved command={:?}", command);
        apply(store, command)?;
        Ok(DropOutcome::Applied(command))
    }
}

/// One target's drop handler. Stands down when a deeper target claimed the drop.
fn on_drop<S: CourseStore>(
    store: &S,
    ctx: &mut DropContext,
    source: &DragSource,
    target: &DropTarget,
) -> Result<()> {
    if ctx.did_drop() {
        return Ok(());
    }
    ctx.claimed = resolve(store, source, target)?;
    Ok(())
}

/// Decides what dropping `source` on `target` means. `None` declines the drop.
pub fn resolve<S: CourseStore>(
    store: &S,
    source: &DragSource,
    target: &DropTarget,
) -> Result<Option<DropCommand>> {
    let command = match (source, target) {
        (DragSource::Item { id, .. }, DropTarget::Module { id: module_id, slot }) => {
            let (current, from) = store.locate_item(id)?;
            let destination = Container::Module(*module_id);
            if current != destination {
                store.module(module_id)?;
                DropCommand::MoveItem {
                    id: *id,
                    target: Some(*module_id),
                }
            } else {
                reorder_to(Some(*module_id), from, *slot)
            }
        }
        (DragSource::Item { id, .. }, DropTarget::Anchor { id: anchor }) => {
            let (current, from) = store.locate_item(id)?;
            let (anchor_container, to) = store.locate_item(anchor)?;
            if current != anchor_container {
                return Ok(None);
            }
            reorder_to(current.module_id(), from, Some(to))
        }
        (DragSource::Item { id, .. }, DropTarget::Canvas { slot }) => {
            let (current, from) = store.locate_item(id)?;
            if current != Container::Independent {
                DropCommand::MoveItem {
                    id: *id,
                    target: None,
                }
            } else {
                reorder_to(None, from, *slot)
            }
        }
        (DragSource::Module { id, .. }, DropTarget::Module { id: target_id, .. }) => {
            let from = store.module_position(id)?;
            let to = store.module_position(target_id)?;
            if from == to {
                DropCommand::Nothing
            } else {
                DropCommand::ReorderModules { from, to }
            }
        }
        (DragSource::Module { .. }, DropTarget::Anchor { .. }) => return Ok(None),
        (DragSource::Module { .. }, DropTarget::Canvas { .. }) => DropCommand::Nothing,
    };
    Ok(Some(command))
}

fn reorder_to(module: Option<ModuleId>, from: usize, slot: Option<usize>) -> DropCommand {
    match slot {
        Some(to) if to != from => DropCommand::ReorderItems { module, from, to },
        _ => DropCommand::Nothing,
    }
}

fn apply(store: &mut InMemoryStore, command: DropCommand) -> Result<CmdResult> {
    match command {
        DropCommand::MoveItem { id, target } => move_item::run(store, &id, target),
        DropCommand::ReorderItems { module, from, to } => reorder::items(store, module, from, to),
        DropCommand::ReorderModules { from, to } => reorder::modules(store, from, to),
        DropCommand::Nothing => Ok(CmdResult::default()),
    }
}

fn note_stale_payload<S: CourseStore>(store: &S, source: &DragSource) {
    let stale = match source {
        DragSource::Item {
            id,
            container,
            index,
        } => store
            .locate_item(id)
            .is_ok_and(|current| current != (*container, *index)),
        DragSource::Module { id, index } => store
            .module_position(id)
            .is_ok_and(|current| current != *index),
    };
    if stale {
        warn!("event=drag_payload_stale source={:?}", source);
    }
}

/// Events waiting to be handled, in delivery order.
#[derive(Debug, Default)]
pub struct GestureQueue {
    events: VecDeque<DragEvent>,
}

impl GestureQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: DragEvent) {
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Handles queued events in order, each to completion before the next.
    ///
    /// Stops at the first failing event. The rest of the failed gesture, up to
    /// and including its `End`, is discarded; later gestures stay queued.
    pub fn dispatch(
        &mut self,
        session: &mut DragSession,
        store: &mut InMemoryStore,
    ) -> Result<Vec<DropOutcome>> {
        let mut outcomes = Vec::with_capacity(self.events.len());
        while let Some(event) = self.events.pop_front() {
            let ends_gesture = event == DragEvent::End;
            match session.handle(store, event) {
                Ok(outcome) => outcomes.push(outcome),
                Err(err) => {
                    if !ends_gesture {
                        self.discard_gesture();
                    }
                    return Err(err);
                }
            }
        }
        Ok(outcomes)
    }

    fn discard_gesture(&mut self) {
        while let Some(event) = self.events.pop_front() {
            if event == DragEvent::End {
                break;
            }
        }
        warn!("event=gesture_discarded remaining={}", self.events.len());
    }
}
