use crate::api::ApiClient;
use crate::approvals::{ApprovalQueue, actions_key};
use crate::errors::AppError;
use crate::handlers::Action;
use crate::models::{ApprovalItem, Decision, MediaType};
use crate::router::RouteParams;
use crate::state::AppState;
use crate::ui::{Element, Kind};

pub async fn render(state: AppState, _params: RouteParams) -> Result<Vec<Element>, AppError> {
    let items = ApprovalQueue::new(&state.client).load().await?;
    state
        .set_pending_badge(u32::try_from(items.len()).unwrap_or(u32::MAX))
        .await;
    Ok(build(&items, &state.client))
}

pub fn build(items: &[ApprovalItem], client: &ApiClient) -> Vec<Element> {
    let mut view = vec![Element::header("Review")];
    if items.is_empty() {
        view.push(Element::empty_state("✨", "Everything is reviewed!"));
        return view;
    }

    view.push(Element::subtitle(format!("{} awaiting review", items.len())));
    view.extend(items.iter().map(|item| card(item, client)));
    view
}

fn card(item: &ApprovalItem, client: &ApiClient) -> Element {
    let key = item.key();
    let mut card = Element::card().key(key.card_key()).class("approval-card");

    if let Some(url) = item.media_ref.as_deref().and_then(|media| client.media_url(media)) {
        let label = match item.media_type {
            MediaType::Photo => "🖼 photo",
            MediaType::Video => "🎬 video",
        };
        card = card.child(Element::new(Kind::Media, format!("{label}: {url}")));
    }

    let label = match item.points {
        Some(points) if points > 0 => format!("{} (+{points} pts)", item.label),
        _ => item.label.clone(),
    };

    card.children([
        Element::text(item.child_name.clone()).class("child-name"),
        Element::text(label).class("task-name"),
        Element::text(item.date.clone()).class("text-hint"),
        Element::row().key(actions_key(key)).children([
            Element::button(
                "✅ Approve",
                Action::Decide {
                    key,
                    decision: Decision::Approve,
                },
            ),
            Element::button(
                "✕ Reject",
                Action::Decide {
                    key,
                    decision: Decision::Reject,
                },
            ),
        ]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::models::ApprovalKind;
    use crate::ui::Container;

    fn item(kind: ApprovalKind, id: i64, points: Option<u32>, media: Option<&str>) -> ApprovalItem {
        ApprovalItem {
            id,
            kind,
            child_name: "Alan".to_string(),
            child_id: Some(3),
            label: "Wash dishes".to_string(),
            points,
            date: "2026-01-05".to_string(),
            media_ref: media.map(str::to_string),
            media_type: MediaType::Photo,
        }
    }

    fn client() -> ApiClient {
        ApiClient::new(&ClientConfig::new("http://host", "token")).unwrap()
    }

    #[test]
    fn each_card_gets_approve_and_reject() {
        let items = [
            item(ApprovalKind::Task, 1, None, None),
            item(ApprovalKind::Extra, 7, Some(2), Some("uploads/2026-01-05/a.jpg")),
        ];
        let mut container = Container::new();
        container.mount(build(&items, &client()));

        assert_eq!(container.handler_count(), 4);
        let card = container.find("approval-extra-7").unwrap();
        let text = card.text_content();
        assert!(text.contains("Wash dishes (+2 pts)"));
        assert!(text.contains("http://host/uploads/2026-01-05/a.jpg"));
        assert!(container.find("approval-task-1-actions").is_some());
    }

    #[test]
    fn empty_queue_shows_all_clear() {
        let mut container = Container::new();
        container.mount(build(&[], &client()));
        assert_eq!(container.handler_count(), 0);
        assert!(container.to_text().contains("Everything is reviewed!"));
    }
}
