use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Container, ModuleId};
use crate::store::memory::InMemoryStore;
use log::debug;

use super::helpers::splice_move;

/// Moves one item within a single container's sequence.
///
/// Indexes are positions in that container only, never global ones.
pub fn items(
    store: &mut InMemoryStore,
    module_id: Option<ModuleId>,
    from: usize,
    to: usize,
) -> Result<CmdResult> {
    let container = Container::from_module(module_id);
    let sequence = store.container_mut(container)?;

    if !splice_move(sequence, from, to)? {
        return Ok(CmdResult::default());
    }
    let moved = sequence[to].clone();

    debug!(
        "event=items_reordered container={} from={} to={} item_id={}",
        container, from, to, moved.id
    );
    Ok(CmdResult::default().with_affected_items(vec![moved]))
}

/// Moves one module within the module sequence.
pub fn modules(store: &mut InMemoryStore, from: usize, to: usize) -> Result<CmdResult> {
    let entries = store.module_entries_mut();

    if !splice_move(entries, from, to)? {
        return Ok(CmdResult::default());
    }
    let moved = entries[to].module.clone();

    debug!(
        "event=modules_reordered from={} to={} module_id={}",
        from, to, moved.id
    );
    Ok(CmdResult::default()
        .with_message(CmdMessage::info(format!(
            "Module '{}' moved to position {}",
            moved.name,
            to + 1
        )))
        .with_affected_modules(vec![moved]))
}
