//! # Search Filter
//!
//! Derives the visible part of a course for a live search query without
//! touching the model. Ordering is always the model's own; results are never
//! ranked.
//!
//! ## Visibility rules
//!
//! For a non-blank query (trimmed, case-folded):
//!
//! - A module is shown if its name matches, or if any item it owns matches.
//! - A module shown because of its own name shows **all** of its items.
//!   Otherwise it shows only the items that matched individually.
//! - Independent items are shown only when they match. Modules play no part.
//! - When nothing at all matches, the view reports [`ViewState::NoResults`],
//!   which is distinct from an empty course viewed without a query.
//!
//! An item matches on its title, or on its url (links) or file name (files).

use crate::error::Result;
use crate::model::{Item, Module};
use crate::store::CourseStore;

/// A normalized search query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        Self {
            needle: raw.trim().to_lowercase(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches_text(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.needle)
    }

    pub fn matches_module(&self, module: &Module) -> bool {
        self.matches_text(&module.name)
    }

    pub fn matches_item(&self, item: &Item) -> bool {
        self.matches_text(&item.title) || self.matches_text(item.payload.search_text())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// No query is active; the view is the whole course.
    Unfiltered,
    /// A query is active and at least one entry matched.
    Matches,
    /// A query is active and nothing matched.
    NoResults,
}

#[derive(Debug, Clone)]
pub struct ModuleView<'a> {
    pub module: &'a Module,
    pub items: Vec<&'a Item>,
    /// Whether the module's own name matched the query.
    pub name_matched: bool,
}

#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    pub modules: Vec<ModuleView<'a>>,
    pub independent: Vec<&'a Item>,
    pub state: ViewState,
}

impl<'a> FilteredView<'a> {
    /// Visible module-owned items, in module order.
    pub fn items(&self) -> impl Iterator<Item = &'a Item> + '_ {
        self.modules.iter().flat_map(|mv| mv.items.iter().copied())
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty() && self.independent.is_empty()
    }

    pub fn no_results(&self) -> bool {
        self.state == ViewState::NoResults
    }
}

/// Builds the visible view of `store` for a raw query string.
pub fn filter<'a, S: CourseStore>(store: &'a S, raw_query: &str) -> Result<FilteredView<'a>> {
    let query = SearchQuery::new(raw_query);

    if query.is_blank() {
        let mut modules = Vec::new();
        for module in store.modules() {
            modules.push(ModuleView {
                module,
                items: store.module_items(&module.id)?.iter().collect(),
                name_matched: false,
            });
        }
        return Ok(FilteredView {
            modules,
            independent: store.independent_items().iter().collect(),
            state: ViewState::Unfiltered,
        });
    }

    let mut modules = Vec::new();
    for module in store.modules() {
        let owned = store.module_items(&module.id)?;
        let name_matched = query.matches_module(module);
        let items: Vec<&Item> = if name_matched {
            owned.iter().collect()
        } else {
            owned.iter().filter(|i| query.matches_item(i)).collect()
        };
        if name_matched || !items.is_empty() {
            modules.push(ModuleView {
                module,
                items,
                name_matched,
            });
        }
    }

    let independent: Vec<&Item> = store
        .independent_items()
        .iter()
        .filter(|i| query.matches_item(i))
        .collect();

    let state = if modules.is_empty() && independent.is_empty() {
        ViewState::NoResults
    } else {
        ViewState::Matches
    };

    Ok(FilteredView {
        modules,
        independent,
        state,
    })
}
