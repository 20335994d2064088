use colored::Colorize;
use syllabus::api::{summary_label, CmdMessage, MessageLevel, ViewState};
use syllabus::commands::outline::OutlineEntry;
use syllabus::error::Result;
use syllabus::filter::FilteredView;
use syllabus::index;
use syllabus::model::{Item, ItemPayload};
use syllabus::store::CourseStore;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const REF_WIDTH: usize = 8;
const KIND_WIDTH: usize = 6;
const TITLE_WIDTH: usize = 40;
const SELECTED_MARKER: &str = "▸";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

pub(super) fn print_course<S: CourseStore>(
    store: &S,
    view: &FilteredView<'_>,
    query: &str,
    show_urls: bool,
) -> Result<()> {
    print!("{}", render_course(store, view, query, show_urls)?);
    Ok(())
}

pub(super) fn print_outline<S: CourseStore>(store: &S, entries: &[OutlineEntry]) -> Result<()> {
    print!("{}", render_outline(store, entries)?);
    Ok(())
}

fn render_course<S: CourseStore>(
    store: &S,
    view: &FilteredView<'_>,
    query: &str,
    show_urls: bool,
) -> Result<String> {
    let mut out = String::new();

    match view.state {
        ViewState::NoResults => {
            out.push_str(&format!("No results found for \"{}\".\n", query.trim()));
            return Ok(out);
        }
        ViewState::Unfiltered if view.is_empty() => {
            out.push_str("Empty course. Add a module or an item to get started.\n");
            return Ok(out);
        }
        _ => {}
    }

    for module_view in &view.modules {
        let position = store.module_position(&module_view.module.id)? + 1;
        let head = format!("{:>3}. ", position);
        let name = truncate_to_width(&module_view.module.name, LINE_WIDTH / 2);
        out.push_str(&format!(
            "{}{}  {}\n",
            head.yellow(),
            name.bold(),
            summary_label(module_view.items.len()).dimmed()
        ));
        for item in &module_view.items {
            out.push_str(&render_item(store, item, show_urls)?);
        }
    }

    if !view.independent.is_empty() {
        if !view.modules.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("{}\n", "Independent items".bold()));
        for item in &view.independent {
            out.push_str(&render_item(store, item, show_urls)?);
        }
    }

    Ok(out)
}

fn render_item<S: CourseStore>(store: &S, item: &Item, show_urls: bool) -> Result<String> {
    let reference = index::item_ref(store, &item.id)?.to_string();
    let reference = pad_to_width(&reference, REF_WIDTH);

    let title = pad_to_width(&truncate_to_width(&item.title, TITLE_WIDTH), TITLE_WIDTH);
    let kind = pad_to_width(&item.kind().to_string(), KIND_WIDTH);

    let detail = if show_urls {
        let fixed = 5 + REF_WIDTH + TITLE_WIDTH + 1 + KIND_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed);
        match &item.payload {
            ItemPayload::Link { url } => truncate_to_width(url, available),
            ItemPayload::File {
                file_name,
                file_size,
                ..
            } => truncate_to_width(&format!("{} ({} bytes)", file_name, file_size), available),
        }
    } else {
        String::new()
    };

    let line = format!(
        "     {}{} {}{}",
        reference.yellow(),
        title,
        kind.cyan(),
        detail.dimmed()
    );
    Ok(format!("{}\n", line.trim_end()))
}

fn render_outline<S: CourseStore>(store: &S, entries: &[OutlineEntry]) -> Result<String> {
    let mut out = String::new();
    if entries.is_empty() {
        out.push_str("No modules.\n");
        return Ok(out);
    }

    out.push_str(&format!("{}\n", "Outline".bold()));
    for entry in entries {
        let position = store.module_position(&entry.id)? + 1;
        let marker = if entry.selected { SELECTED_MARKER } else { " " };
        let head = format!("{} {:>3}. ", marker, position);
        let available = LINE_WIDTH.saturating_sub(head.width() + 28);
        let name = pad_to_width(&truncate_to_width(&entry.name, available), available);
        let head = if entry.selected {
            head.green()
        } else {
            head.normal()
        };
        out.push_str(&format!("{}{}{}\n", head, name, entry.summary().dimmed()));
    }
    Ok(out)
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use syllabus::api::CourseApi;

    fn course() -> CourseApi {
        let mut api = CourseApi::new();
        let intro = api.create_module("Intro").unwrap().affected_modules[0].id;
        api.create_module("Labs").unwrap();
        api.create_item(
            Some(intro),
            "Welcome",
            ItemPayload::Link {
                url: "https://example.com/welcome".to_string(),
            },
        )
        .unwrap();
        api.create_item(
            None,
            "Handbook",
            ItemPayload::File {
                file_name: "handbook.pdf".to_string(),
                file_size: 4,
                file_type: "application/pdf".to_string(),
                file_data: b"%PDF".to_vec(),
            },
        )
        .unwrap();
        api
    }

    #[test]
    fn truncates_by_display_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        assert_eq!(truncate_to_width("日本語テキスト", 6), "日本…");
    }

    #[test]
    fn pads_by_display_width() {
        assert_eq!(pad_to_width("日本", 6), "日本  ");
        assert_eq!(pad_to_width("toolong", 3), "toolong");
    }

    #[test]
    fn course_shows_refs_and_details() {
        let api = course();
        let view = api.view("").unwrap();
        let out = render_course(api.store(), &view, "", true).unwrap();

        assert!(out.contains("Intro"));
        assert!(out.contains("1 item"));
        assert!(out.contains("Add items to this module"));
        assert!(out.contains("1.1"));
        assert!(out.contains("https://example.com/welcome"));
        assert!(out.contains("Independent items"));
        assert!(out.contains("i1"));
        assert!(out.contains("handbook.pdf (4 bytes)"));
    }

    #[test]
    fn hides_details_when_disabled() {
        let api = course();
        let view = api.view("").unwrap();
        let out = render_course(api.store(), &view, "", false).unwrap();
        assert!(out.contains("Welcome"));
        assert!(!out.contains("https://example.com/welcome"));
    }

    #[test]
    fn filtered_refs_keep_model_positions() {
        let api = course();
        let view = api.view("labs").unwrap();
        let out = render_course(api.store(), &view, "labs", true).unwrap();
        assert!(out.contains("2. "));
        assert!(!out.contains("Intro"));
    }

    #[test]
    fn empty_states_are_distinct() {
        let api = CourseApi::new();
        let view = api.view("").unwrap();
        let empty = render_course(api.store(), &view, "", true).unwrap();
        assert!(empty.starts_with("Empty course."));

        let api = course();
        let view = api.view("zzzz999").unwrap();
        let none = render_course(api.store(), &view, "zzzz999", true).unwrap();
        assert_eq!(none, "No results found for \"zzzz999\".\n");
    }

    #[test]
    fn outline_marks_selection() {
        let mut api = course();
        let labs = api.module_at("2").unwrap();
        api.select_module(&labs).unwrap();

        let entries = api.outline("").unwrap();
        let out = render_outline(api.store(), &entries).unwrap();
        let labs_line = out.lines().find(|l| l.contains("Labs")).unwrap();
        assert!(labs_line.contains(SELECTED_MARKER));
        assert!(labs_line.contains("Add items to this module"));
        let intro_line = out.lines().find(|l| l.contains("Intro")).unwrap();
        assert!(!intro_line.contains(SELECTED_MARKER));
    }
}
