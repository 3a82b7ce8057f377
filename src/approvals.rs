use crate::api::ApiClient;
use crate::errors::AppError;
use crate::models::{ApprovalItem, ApprovalKey, Decision};
use crate::ui::{Container, Element, Kind};
use tracing::{debug, info};

pub const PROCESSED: &str = "processed";
const CARD_PREFIX: &str = "approval-";

pub struct ApprovalQueue<'a> {
    client: &'a ApiClient,
}

impl<'a> ApprovalQueue<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn load(&self) -> Result<Vec<ApprovalItem>, AppError> {
        let list = self.client.approvals().await?;
        debug!(pending = list.approvals.len(), "approvals loaded");
        Ok(list.approvals)
    }

    /// The server refuses a second decision on the same item.
    pub async fn decide(&self, key: ApprovalKey, decision: Decision) -> Result<(), AppError> {
        info!(%key, decision = decision.as_str(), "deciding approval");
        self.client.decide(key, decision).await?;
        Ok(())
    }
}

pub fn actions_key(key: ApprovalKey) -> String {
    format!("{}-actions", key.card_key())
}

pub fn result_label(decision: Decision) -> &'static str {
    match decision {
        Decision::Approve => "✅ Approved",
        Decision::Reject => "❌ Rejected",
    }
}

/// Marks the card processed and swaps its buttons for the decision result.
pub fn mark_processed(container: &mut Container, key: ApprovalKey, decision: Decision) -> bool {
    let marked = container.add_class(&key.card_key(), PROCESSED);
    if marked {
        container.replace_children(
            &actions_key(key),
            vec![Element::text(result_label(decision)).class("approval-result")],
        );
    }
    marked
}

pub fn remaining(container: &Container) -> u32 {
    let count = container.count(|node| {
        node.kind == Kind::Card
            && node
                .key
                .as_deref()
                .is_some_and(|key| key.starts_with(CARD_PREFIX))
            && !node.has_class(PROCESSED)
    });
    u32::try_from(count).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::Action;
    use crate::models::ApprovalKind;

    fn card(kind: ApprovalKind, id: i64) -> Element {
        let key = ApprovalKey { kind, id };
        Element::card().key(key.card_key()).children([
            Element::text("Alan"),
            Element::row().key(actions_key(key)).children([
                Element::button("Approve", Action::Decide { key, decision: Decision::Approve }),
                Element::button("Reject", Action::Decide { key, decision: Decision::Reject }),
            ]),
        ])
    }

    fn queue() -> Container {
        let mut container = Container::new();
        container.mount(vec![
            Element::header("Review"),
            card(ApprovalKind::Task, 1),
            card(ApprovalKind::Extra, 7),
            card(ApprovalKind::Task, 7),
        ]);
        container
    }

    #[test]
    fn processing_a_card_decrements_by_one() {
        let mut container = queue();
        assert_eq!(remaining(&container), 3);

        let key = ApprovalKey { kind: ApprovalKind::Extra, id: 7 };
        assert!(mark_processed(&mut container, key, Decision::Approve));
        assert_eq!(remaining(&container), 2);
        assert_eq!(container.handler_count(), 4);

        let card = container.find(&key.card_key()).unwrap();
        assert!(card.text_content().contains("Approved"));
    }

    #[test]
    fn count_never_goes_below_zero() {
        let mut container = queue();
        let keys = [
            ApprovalKey { kind: ApprovalKind::Task, id: 1 },
            ApprovalKey { kind: ApprovalKind::Extra, id: 7 },
            ApprovalKey { kind: ApprovalKind::Task, id: 7 },
        ];
        let mut previous = remaining(&container);
        for key in keys.iter().chain(keys.iter()) {
            mark_processed(&mut container, *key, Decision::Reject);
            let now = remaining(&container);
            assert!(now <= previous && previous - now <= 1);
            previous = now;
        }
        assert_eq!(previous, 0);
    }

    #[test]
    fn unknown_card_is_left_alone() {
        let mut container = queue();
        let key = ApprovalKey { kind: ApprovalKind::Extra, id: 99 };
        assert!(!mark_processed(&mut container, key, Decision::Approve));
        assert_eq!(remaining(&container), 3);
    }
}
