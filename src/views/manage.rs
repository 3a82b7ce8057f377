use super::{back_row, child_picker};
use crate::errors::AppError;
use crate::handlers::Action;
use crate::models::{ChildSummary, TaskList};
use crate::router::{Route, RouteParams};
use crate::state::AppState;
use crate::ui::Element;

pub const EXTRA_RESULT: &str = "extra-result";
const EXTRAS_TITLE: &str = "⭐ Bonus task";
const TASKS_TITLE: &str = "📝 Tasks";

/// Which child a page is about: the one in the params, or the only child in
/// the family. `None` means the parent has to pick.
fn pick_child(params: RouteParams, children: &[ChildSummary]) -> Option<i64> {
    match (params.child_id, children) {
        (Some(child_id), _) => Some(child_id),
        (None, [only]) => Some(only.id),
        _ => None,
    }
}

pub async fn render_extras(state: AppState, params: RouteParams) -> Result<Vec<Element>, AppError> {
    let children = state.client.children().await?.children;
    let Some(child_id) = pick_child(params, &children) else {
        return Ok(child_picker(EXTRAS_TITLE, &children, Route::ChildExtras));
    };
    let name = children
        .iter()
        .find(|child| child.id == child_id)
        .map_or("Child", |child| child.name.as_str());
    Ok(build_extras(child_id, name))
}

pub fn build_extras(child_id: i64, child_name: &str) -> Vec<Element> {
    vec![
        back_row(),
        Element::header(EXTRAS_TITLE).child(Element::subtitle(child_name)),
        Element::card().children([
            Element::text("Title and bonus points (1-10)").class("text-hint"),
            Element::button("Assign", Action::AssignExtra { child_id })
                .key("submit-extra")
                .class("btn-primary"),
            Element::text("").key(EXTRA_RESULT),
        ]),
    ]
}

pub async fn render_tasks(state: AppState, params: RouteParams) -> Result<Vec<Element>, AppError> {
    let child_id = match params.child_id {
        Some(child_id) => child_id,
        None => {
            let children = state.client.children().await?.children;
            match pick_child(params, &children) {
                Some(child_id) => child_id,
                None => return Ok(child_picker(TASKS_TITLE, &children, Route::ChildTasks)),
            }
        }
    };
    let tasks = state.client.tasks(child_id).await?;
    Ok(build_tasks(child_id, &tasks))
}

pub fn build_tasks(child_id: i64, list: &TaskList) -> Vec<Element> {
    let rows = list.tasks.iter().map(|task| {
        let toggle = if task.enabled { "☑ on" } else { "☐ off" };
        let mut row = Element::row()
            .key(format!("task-{}", task.key))
            .class("toggle-item")
            .children([
                Element::text(task.label.clone()),
                Element::button(
                    toggle,
                    Action::ToggleTask {
                        child_id,
                        key: task.key.clone(),
                        enabled: !task.enabled,
                    },
                ),
            ]);
        if !task.is_standard {
            row = row.child(
                Element::button(
                    "✕",
                    Action::DeleteTask {
                        child_id,
                        key: task.key.clone(),
                    },
                )
                .class("delete-btn"),
            );
        }
        row
    });

    vec![
        back_row(),
        Element::header(format!("{TASKS_TITLE}: {}", list.child_name)),
        Element::card().key("task-list").children(rows),
        Element::card().children([
            Element::button("Add task", Action::AddTask { child_id }).class("btn-primary"),
            Element::button("↩ Reset to standard", Action::ResetTasks { child_id }).class("btn-outline"),
        ]),
    ]
}
