use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Module, ModuleId};
use crate::store::memory::InMemoryStore;
use chrono::Utc;
use log::debug;

use super::helpers::required_text;

/// Appends a new, empty module to the end of the module sequence.
pub fn create(store: &mut InMemoryStore, name: &str) -> Result<CmdResult> {
    let name = required_text(name, "module name")?;
    let module = Module::new(name);
    store.push_module(module.clone());

    debug!("event=module_created module_id={} name={:?}", module.id, module.name);
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!("Module created: {}", module.name)))
        .with_affected_modules(vec![module]))
}

/// Replaces a module's name. Position and items are untouched.
pub fn update(store: &mut InMemoryStore, id: &ModuleId, name: &str) -> Result<CmdResult> {
    let name = required_text(name, "module name")?;
    let module = store.module_mut(id)?;

    if module.name != name {
        module.name = name;
        module.updated_at = Utc::now();
    }
    let module = module.clone();

    debug!("event=module_updated module_id={} name={:?}", module.id, module.name);
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!("Module renamed: {}", module.name)))
        .with_affected_modules(vec![module]))
}

/// Removes a module and every item it owns. The items are gone, not moved
/// to the independent list.
pub fn delete(store: &mut InMemoryStore, id: &ModuleId) -> Result<CmdResult> {
    let (module, items) = store.remove_module(id)?;

    debug!(
        "event=module_deleted module_id={} cascaded_items={}",
        module.id,
        items.len()
    );
    let mut result = CmdResult::default().with_message(CmdMessage::success(format!(
        "Module deleted: {} ({} item{} removed)",
        module.name,
        items.len(),
        if items.len() == 1 { "" } else { "s" }
    )));
    result.affected_modules.push(module);
    result.affected_items = items;
    Ok(result)
}
