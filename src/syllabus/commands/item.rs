use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Container, Item, ItemId, ItemPayload, ModuleId};
use crate::store::memory::InMemoryStore;
use crate::store::CourseStore;
use chrono::Utc;
use log::debug;

use super::helpers::{required_text, validate_payload};

/// Appends a new item to the end of a module's sequence, or of the
/// independent list when `module_id` is `None`.
pub fn create(
    store: &mut InMemoryStore,
    module_id: Option<ModuleId>,
    title: &str,
    payload: ItemPayload,
) -> Result<CmdResult> {
    let title = required_text(title, "item title")?;
    validate_payload(&payload)?;

    let container = Container::from_module(module_id);
    let item = Item::new(container, title, payload);
    store.container_mut(container)?.push(item.clone());

    debug!(
        "event=item_created item_id={} kind={} container={}",
        item.id,
        item.kind(),
        container
    );
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Added {}: {}",
            item.kind(),
            item.title
        )))
        .with_affected_items(vec![item]))
}

/// Removes an item from whichever container holds it.
pub fn delete(store: &mut InMemoryStore, id: &ItemId) -> Result<CmdResult> {
    let (container, position) = store.locate_item(id)?;
    let item = store.container_mut(container)?.remove(position);

    debug!("event=item_deleted item_id={} container={}", item.id, container);
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!("Item deleted: {}", item.title)))
        .with_affected_items(vec![item]))
}

/// Updates an item's title in place; container and position never change.
pub fn rename(store: &mut InMemoryStore, id: &ItemId, title: &str) -> Result<CmdResult> {
    let title = required_text(title, "item title")?;
    let item = store.item_mut(id)?;

    if item.title == title {
        return Ok(CmdResult::default().with_message(CmdMessage::info(format!(
            "Item already titled: {}",
            item.title
        ))));
    }

    item.title = title;
    item.updated_at = Utc::now();
    let item = item.clone();

    debug!("event=item_renamed item_id={} title={:?}", item.id, item.title);
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!("Item renamed: {}", item.title)))
        .with_affected_items(vec![item]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyllabusError;
    use crate::store::memory::fixtures::CourseFixture;
    use uuid::Uuid;

    fn link(url: &str) -> ItemPayload {
        ItemPayload::Link {
            url: url.to_string(),
        }
    }

    #[test]
    fn create_in_module_appends() {
        let mut fixture = CourseFixture::new()
            .with_module("Intro")
            .with_link(Some("Intro"), "First", "https://1");
        let intro = fixture.module_id("Intro");

        create(&mut fixture.store, Some(intro), " Second ", link("https://2")).unwrap();

        let titles: Vec<_> = fixture
            .store
            .module_items(&intro)
            .unwrap()
            .iter()
            .map(|i| i.title.clone())
            .collect();
        assert_eq!(titles, vec!["First", "Second"]);
        assert_eq!(
            fixture.store.module_items(&intro).unwrap()[1].container,
            Container::Module(intro)
        );
    }

    #[test]
    fn create_without_module_goes_independent() {
        let mut store = InMemoryStore::new();
        let result = create(&mut store, None, "Loose", link("https://x")).unwrap();

        assert_eq!(result.affected_items[0].container, Container::Independent);
        assert_eq!(store.independent_items().len(), 1);
    }

    #[test]
    fn create_in_missing_module_fails_cleanly() {
        let mut store = InMemoryStore::new();
        let err = create(&mut store, Some(Uuid::new_v4()), "T", link("https://x")).unwrap_err();
        assert!(matches!(err, SyllabusError::ModuleNotFound(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn create_validates_title_and_payload() {
        let mut store = InMemoryStore::new();
        assert!(matches!(
            create(&mut store, None, "", link("https://x")),
            Err(SyllabusError::Validation(_))
        ));
        assert!(matches!(
            create(&mut store, None, "Title", link("")),
            Err(SyllabusError::Validation(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn delete_from_module_and_independent() {
        let mut fixture = CourseFixture::new()
            .with_module("M")
            .with_link(Some("M"), "In module", "https://m")
            .with_link(None, "Loose", "https://l");
        let in_module = fixture.item_id("In module");
        let loose = fixture.item_id("Loose");

        delete(&mut fixture.store, &in_module).unwrap();
        delete(&mut fixture.store, &loose).unwrap();

        assert!(fixture.store.items().is_empty());
        assert!(fixture.store.independent_items().is_empty());
        assert_eq!(fixture.store.modules().len(), 1);
    }

    #[test]
    fn delete_missing_item_is_not_found() {
        let mut store = InMemoryStore::new();
        assert!(matches!(
            delete(&mut store, &Uuid::new_v4()),
            Err(SyllabusError::ItemNotFound(_))
        ));
    }

    #[test]
    fn rename_keeps_position() {
        let mut fixture = CourseFixture::new()
            .with_module("M")
            .with_link(Some("M"), "a", "https://a")
            .with_link(Some("M"), "b", "https://b")
            .with_link(Some("M"), "c", "https://c");
        let b = fixture.item_id("b");
        let before = fixture.store.locate_item(&b).unwrap();

        rename(&mut fixture.store, &b, "  bee ").unwrap();

        assert_eq!(fixture.store.locate_item(&b).unwrap(), before);
        assert_eq!(fixture.store.item(&b).unwrap().title, "bee");
    }

    #[test]
    fn rename_to_current_title_changes_nothing() {
        let mut fixture = CourseFixture::new()
            .with_module("M")
            .with_file(Some("M"), "Notes", "notes.pdf");
        let id = fixture.item_id("Notes");
        let before = fixture.store.clone();

        let result = rename(&mut fixture.store, &id, "Notes").unwrap();

        assert!(result.is_noop());
        assert_eq!(fixture.store, before);
    }

    #[test]
    fn rename_rejects_blank_title() {
        let mut fixture = CourseFixture::new().with_link(None, "x", "https://x");
        let id = fixture.item_id("x");
        assert!(matches!(
            rename(&mut fixture.store, &id, "  "),
            Err(SyllabusError::Validation(_))
        ));
        assert_eq!(fixture.store.item(&id).unwrap().title, "x");
    }
}
