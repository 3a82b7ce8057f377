use super::{item_list, progress_bar};
use crate::checklist::Checklist;
use crate::errors::AppError;
use crate::models::ChecklistSnapshot;
use crate::router::RouteParams;
use crate::state::AppState;
use crate::stats::{Progress, weekday_date};
use crate::ui::Element;

pub async fn render(state: AppState, _params: RouteParams) -> Result<Vec<Element>, AppError> {
    let snapshot = Checklist::new(&state.client).load().await?;
    Ok(build(&snapshot))
}

pub fn build(snapshot: &ChecklistSnapshot) -> Vec<Element> {
    let progress = Progress::of(snapshot);
    let summary = if progress.pending > 0 {
        format!("{} awaiting review", progress.pending)
    } else {
        "tasks done".to_string()
    };

    vec![
        Element::header("📋 Checklist").child(Element::subtitle(weekday_date(snapshot.date))),
        Element::card().class("score-summary").children([
            Element::text(format!("{}/{}", progress.done, progress.total)).class("score-big"),
            Element::text(summary).class("score-label"),
            progress_bar(progress.percent()),
        ]),
        Element::card()
            .key("checklist")
            .children(item_list(&snapshot.tasks, &snapshot.extras, true)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::Status;
    use crate::models::{Extra, Group, Task};
    use crate::ui::Container;
    use chrono::NaiveDate;

    fn snapshot() -> ChecklistSnapshot {
        ChecklistSnapshot {
            date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            is_sunday: false,
            tasks: vec![
                Task {
                    key: "bed".to_string(),
                    label: "Make the bed".to_string(),
                    group: Group::Morning,
                    status: Status::Done,
                },
                Task {
                    key: "shower".to_string(),
                    label: "Shower".to_string(),
                    group: Group::Evening,
                    status: Status::Pending,
                },
            ],
            extras: vec![Extra {
                id: 7,
                title: "Wash dishes".to_string(),
                points: 2,
                status: Status::Todo,
            }],
        }
    }

    #[test]
    fn every_item_gets_exactly_one_handler_per_render() {
        let snapshot = snapshot();
        let mut container = Container::new();
        container.mount(build(&snapshot));
        container.mount(build(&snapshot));
        assert_eq!(container.handler_count(), 3);
    }

    #[test]
    fn summary_mentions_pending_items() {
        let mut container = Container::new();
        container.mount(build(&snapshot()));
        let text = container.to_text();
        assert!(text.contains("Monday, 5.01"));
        assert!(text.contains("1/3"));
        assert!(text.contains("1 awaiting review"));
        assert!(text.contains("🕐 Shower"));
        assert!(text.contains("⭐ Bonus tasks"));
    }
}
