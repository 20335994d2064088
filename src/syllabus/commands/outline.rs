use crate::filter::FilteredView;
use crate::model::ModuleId;

/// One line of the module outline shown beside the course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    pub id: ModuleId,
    pub name: String,
    /// Items visible under the current filter.
    pub item_count: usize,
    pub selected: bool,
}

impl OutlineEntry {
    pub fn summary(&self) -> String {
        summary_label(self.item_count)
    }
}

pub fn summary_label(item_count: usize) -> String {
    match item_count {
        0 => "Add items to this module".to_string(),
        1 => "1 item".to_string(),
        n => format!("{} items", n),
    }
}

/// Lists the visible modules in order, marking the selected one.
pub fn run(view: &FilteredView<'_>, selected: Option<ModuleId>) -> Vec<OutlineEntry> {
    view.modules
        .iter()
        .map(|mv| OutlineEntry {
            id: mv.module.id,
            name: mv.module.name.clone(),
            item_count: mv.items.len(),
            selected: selected == Some(mv.module.id),
        })
        .collect()
}
