pub mod approvals;
pub mod checklist;
pub mod family;
pub mod manage;
pub mod reports;

use crate::errors::AppError;
use crate::handlers::Action;
use crate::machine::{ItemRef, Status};
use crate::models::{ChildSummary, Extra, Group, Task};
use crate::router::{Route, RouteParams};
use crate::ui::{Element, Kind};

pub const EXTRAS_HEADER: &str = "⭐ Bonus tasks";
const PROGRESS_CELLS: u32 = 10;

pub fn group_header(group: Group) -> &'static str {
    match group {
        Group::Morning => "🌅 Morning",
        Group::Evening => "🌙 Evening",
        Group::Sunday => "🧹 Sunday",
        Group::Custom => "📝 My tasks",
    }
}

pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Todo => "⬜",
        Status::Pending => "🕐",
        Status::Done => "✅",
    }
}

/// Tasks in server order with a header whenever the group changes, then the
/// extras. Items only get click handlers when `clickable` is set.
pub fn item_list(tasks: &[Task], extras: &[Extra], clickable: bool) -> Vec<Element> {
    let mut elements = Vec::with_capacity(tasks.len() + extras.len() + 4);
    let mut current_group = None;

    for task in tasks {
        if current_group != Some(task.group) {
            current_group = Some(task.group);
            elements.push(Element::new(Kind::GroupHeader, group_header(task.group)));
        }
        elements.push(item(task.item_ref(), &task.label, task.status, clickable));
    }

    if !extras.is_empty() {
        elements.push(Element::new(Kind::GroupHeader, EXTRAS_HEADER));
        for extra in extras {
            elements.push(item(extra.item_ref(), &extra.label(), extra.status, clickable));
        }
    }
    elements
}

fn item(item: ItemRef, label: &str, status: Status, clickable: bool) -> Element {
    let key = match &item {
        ItemRef::Task { key } => format!("task-{key}"),
        ItemRef::Extra { id } => format!("extra-{id}"),
    };
    let mut element = Element::new(Kind::Item, format!("{} {label}", status_icon(status)))
        .key(key)
        .class("task-item")
        .class(status.as_str());
    if clickable {
        element = element.on_click(Action::Item {
            item,
            label: label.to_string(),
            status,
        });
    }
    element
}

pub fn progress_bar(percent: u32) -> Element {
    let filled = (percent.min(100) * PROGRESS_CELLS + 50) / 100;
    let bar: String = (0..PROGRESS_CELLS)
        .map(|cell| if cell < filled { '▓' } else { '░' })
        .collect();
    Element::text(format!("{bar} {percent}%")).class("progress-bar")
}

pub fn back_row() -> Element {
    Element::button("← Back", Action::navigate(Route::Home, RouteParams::default()))
        .class("back-btn")
}

pub fn child_picker(title: &str, children: &[ChildSummary], route: Route) -> Vec<Element> {
    let mut view = vec![
        back_row(),
        Element::header(title).child(Element::subtitle("Choose a child")),
    ];
    view.extend(children.iter().map(|child| {
        Element::new(Kind::Item, child.name.clone())
            .key(format!("child-{}", child.id))
            .class("child-card")
            .on_click(Action::navigate(route, RouteParams::child(child.id)))
    }));
    view
}

pub fn not_found() -> Vec<Element> {
    vec![Element::empty_state("🤷", "Page not found")]
}

pub fn error_panel(err: &AppError) -> Vec<Element> {
    vec![Element::new(Kind::ErrorPanel, format!("😵 Error: {err}"))]
}

pub fn fatal_panel() -> Vec<Element> {
    vec![Element::new(
        Kind::ErrorPanel,
        "🔒 Could not sign in. Open the app through the host.",
    )]
}
