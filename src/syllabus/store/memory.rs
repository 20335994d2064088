use super::CourseStore;
use crate::error::{Result, SyllabusError};
use crate::model::{Container, Item, ItemId, Module, ModuleId};
use std::collections::HashSet;

/// One module plus the ordered sequence of items it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ModuleEntry {
    pub(crate) module: Module,
    pub(crate) items: Vec<Item>,
}

/// The authoritative in-memory course model.
/// Does NOT persist data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryStore {
    modules: Vec<ModuleEntry>,
    independent: Vec<Item>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty() && self.independent.is_empty()
    }

    /// Verifies container exclusivity, id uniqueness and that every item's
    /// `container` names the sequence holding it.
    pub fn check_invariants(&self) -> Result<()> {
        let mut module_ids = HashSet::new();
        let mut item_ids = HashSet::new();

        for entry in &self.modules {
            if !module_ids.insert(entry.module.id) {
                return Err(SyllabusError::Store(format!(
                    "duplicate module id {}",
                    entry.module.id
                )));
            }
        }

        let held = self
            .modules
            .iter()
            .map(|e| (Container::Module(e.module.id), &e.items))
            .chain(std::iter::once((Container::Independent, &self.independent)));

        for (container, items) in held {
            for item in items {
                if !item_ids.insert(item.id) {
                    return Err(SyllabusError::Store(format!(
                        "item {} is held by more than one container",
                        item.id
                    )));
                }
                if item.container != container {
                    return Err(SyllabusError::Store(format!(
                        "item {} claims {} but is held by {}",
                        item.id, item.container, container
                    )));
                }
            }
        }

        Ok(())
    }

    // --- Write primitives: only the command layer calls these ---

    pub(crate) fn push_module(&mut self, module: Module) {
        self.modules.push(ModuleEntry {
            module,
            items: Vec::new(),
        });
    }

    pub(crate) fn module_mut(&mut self, id: &ModuleId) -> Result<&mut Module> {
        self.modules
            .iter_mut()
            .find(|e| e.module.id == *id)
            .map(|e| &mut e.module)
            .ok_or(SyllabusError::ModuleNotFound(*id))
    }

    /// Removes a module together with every item it owns.
    pub(crate) fn remove_module(&mut self, id: &ModuleId) -> Result<(Module, Vec<Item>)> {
        let position = self.module_position(id)?;
        let entry = self.modules.remove(position);
        Ok((entry.module, entry.items))
    }

    pub(crate) fn module_entries_mut(&mut self) -> &mut Vec<ModuleEntry> {
        &mut self.modules
    }

    pub(crate) fn container_mut(&mut self, container: Container) -> Result<&mut Vec<Item>> {
        match container {
            Container::Independent => Ok(&mut self.independent),
            Container::Module(id) => self
                .modules
                .iter_mut()
                .find(|e| e.module.id == id)
                .map(|e| &mut e.items)
                .ok_or(SyllabusError::ModuleNotFound(id)),
        }
    }

    pub(crate) fn item_mut(&mut self, id: &ItemId) -> Result<&mut Item> {
        let (container, position) = self.locate_item(id)?;
        let items = self.container_mut(container)?;
        Ok(&mut items[position])
    }
}

impl CourseStore for InMemoryStore {
    fn modules(&self) -> Vec<&Module> {
        self.modules.iter().map(|e| &e.module).collect()
    }

    fn module(&self, id: &ModuleId) -> Result<&Module> {
        self.modules
            .iter()
            .find(|e| e.module.id == *id)
            .map(|e| &e.module)
            .ok_or(SyllabusError::ModuleNotFound(*id))
    }

    fn module_position(&self, id: &ModuleId) -> Result<usize> {
        self.modules
            .iter()
            .position(|e| e.module.id == *id)
            .ok_or(SyllabusError::ModuleNotFound(*id))
    }

    fn items_in(&self, container: Container) -> Result<&[Item]> {
        match container {
            Container::Independent => Ok(&self.independent),
            Container::Module(id) => self
                .modules
                .iter()
                .find(|e| e.module.id == id)
                .map(|e| e.items.as_slice())
                .ok_or(SyllabusError::ModuleNotFound(id)),
        }
    }

    fn item(&self, id: &ItemId) -> Result<&Item> {
        let (container, position) = self.locate_item(id)?;
        Ok(&self.items_in(container)?[position])
    }

    fn locate_item(&self, id: &ItemId) -> Result<(Container, usize)> {
        for entry in &self.modules {
            if let Some(pos) = entry.items.iter().position(|i| i.id == *id) {
                return Ok((Container::Module(entry.module.id), pos));
            }
        }
        self.independent
            .iter()
            .position(|i| i.id == *id)
            .map(|pos| (Container::Independent, pos))
            .ok_or(SyllabusError::ItemNotFound(*id))
    }

    fn independent_items(&self) -> &[Item] {
        &self.independent
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::ItemPayload;

    /// Builds a course directly through the write primitives, bypassing
    /// validation, so tests can set up state in one expression.
    pub struct CourseFixture {
        pub store: InMemoryStore,
    }

    impl Default for CourseFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl CourseFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_module(mut self, name: &str) -> Self {
            self.store.push_module(Module::new(name.to_string()));
            self
        }

        /// Adds a link to the named module, or to the independent list when `module` is `None`.
        pub fn with_link(self, module: Option<&str>, title: &str, url: &str) -> Self {
            self.with_item(
                module,
                title,
                ItemPayload::Link {
                    url: url.to_string(),
                },
            )
        }

        pub fn with_file(self, module: Option<&str>, title: &str, file_name: &str) -> Self {
            self.with_item(
                module,
                title,
                ItemPayload::File {
                    file_name: file_name.to_string(),
                    file_size: 4,
                    file_type: "application/pdf".to_string(),
                    file_data: b"%PDF".to_vec(),
                },
            )
        }

        fn with_item(mut self, module: Option<&str>, title: &str, payload: ItemPayload) -> Self {
            let container = Container::from_module(module.map(|name| self.module_id(name)));
            let item = Item::new(container, title.to_string(), payload);
            self.store
                .container_mut(container)
                .expect("fixture module exists")
                .push(item);
            self
        }

        pub fn module_id(&self, name: &str) -> ModuleId {
            self.store
                .modules()
                .into_iter()
                .find(|m| m.name == name)
                .map(|m| m.id)
                .unwrap_or_else(|| panic!("fixture has no module named {name}"))
        }

        pub fn item_id(&self, title: &str) -> ItemId {
            self.store
                .items()
                .into_iter()
                .chain(self.store.independent_items())
                .find(|i| i.title == title)
                .map(|i| i.id)
                .unwrap_or_else(|| panic!("fixture has no item titled {title}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::CourseFixture;
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_module_not_found() {
        let store = InMemoryStore::new();
        let id = Uuid::new_v4();
        match store.module(&id) {
            Err(SyllabusError::ModuleNotFound(err_id)) => assert_eq!(err_id, id),
            _ => panic!("Expected ModuleNotFound"),
        }
    }

    #[test]
    fn test_items_in_unknown_module() {
        let store = InMemoryStore::new();
        let id = Uuid::new_v4();
        assert!(matches!(
            store.items_in(Container::Module(id)),
            Err(SyllabusError::ModuleNotFound(_))
        ));
    }

    #[test]
    fn test_locate_item_across_containers() {
        let fixture = CourseFixture::new()
            .with_module("Intro")
            .with_link(Some("Intro"), "Syllabus", "https://example.com/syllabus")
            .with_link(Some("Intro"), "Rules", "https://example.com/rules")
            .with_file(None, "Handout", "handout.pdf");

        let intro = fixture.module_id("Intro");
        let rules = fixture.item_id("Rules");
        let handout = fixture.item_id("Handout");

        assert_eq!(
            fixture.store.locate_item(&rules).unwrap(),
            (Container::Module(intro), 1)
        );
        assert_eq!(
            fixture.store.locate_item(&handout).unwrap(),
            (Container::Independent, 0)
        );
        assert_eq!(fixture.store.item(&rules).unwrap().title, "Rules");
    }

    #[test]
    fn test_items_flatten_in_module_order() {
        let fixture = CourseFixture::new()
            .with_module("A")
            .with_module("B")
            .with_link(Some("B"), "b1", "https://b")
            .with_link(Some("A"), "a1", "https://a")
            .with_link(None, "free", "https://free");

        let titles: Vec<_> = fixture
            .store
            .items()
            .into_iter()
            .map(|i| i.title.as_str())
            .collect();
        assert_eq!(titles, vec!["a1", "b1"]);
        assert_eq!(fixture.store.independent_items().len(), 1);
    }

    #[test]
    fn test_invariants_hold_for_fixture() {
        let fixture = CourseFixture::default()
            .with_module("A")
            .with_link(Some("A"), "x", "https://x")
            .with_file(None, "y", "y.png");
        fixture.store.check_invariants().unwrap();
    }

    #[test]
    fn test_invariants_detect_mislabelled_item() {
        let mut fixture = CourseFixture::new()
            .with_module("A")
            .with_link(Some("A"), "x", "https://x");
        let id = fixture.item_id("x");
        fixture.store.item_mut(&id).unwrap().container = Container::Independent;

        let err = fixture.store.check_invariants().unwrap_err();
        assert!(err.to_string().contains("claims independent"));
    }

    #[test]
    fn test_invariants_detect_duplicate_item() {
        let mut fixture = CourseFixture::new().with_link(None, "x", "https://x");
        let copy = fixture.store.independent_items()[0].clone();
        fixture
            .store
            .container_mut(Container::Independent)
            .unwrap()
            .push(copy);

        let err = fixture.store.check_invariants().unwrap_err();
        assert!(err.to_string().contains("more than one container"));
    }
}
