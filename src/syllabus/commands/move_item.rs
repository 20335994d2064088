use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Container, ItemId, ModuleId};
use crate::store::memory::InMemoryStore;
use crate::store::CourseStore;
use chrono::Utc;
use log::debug;

/// Detaches an item from its container and appends it to the target's sequence.
///
/// The target is resolved before anything is detached, so an unknown module
/// leaves the item exactly where it was. Moving to the current container is a no-op.
pub fn run(
    store: &mut InMemoryStore,
    id: &ItemId,
    target_module: Option<ModuleId>,
) -> Result<CmdResult> {
    let (source, position) = store.locate_item(id)?;
    let target = Container::from_module(target_module);

    // Resolve the destination first.
    store.items_in(target)?;

    if source == target {
        let title = &store.item(id)?.title;
        return Ok(CmdResult::default().with_message(CmdMessage::info(format!(
            "Item '{}' is already at destination",
            title
        ))));
    }

    let mut item = store.container_mut(source)?.remove(position);
    item.container = target;
    item.updated_at = Utc::now();
    store.container_mut(target)?.push(item.clone());

    debug!(
        "event=item_moved item_id={} from={} to={}",
        item.id, source, target
    );
    Ok(CmdResult::default().with_affected_items(vec![item]))
}
