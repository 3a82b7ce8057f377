use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Todo,
    Pending,
    Done,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::Pending => "pending",
            Status::Done => "done",
        }
    }

    pub fn apply(self, event: Event) -> Result<Status, InvalidTransition> {
        match (self, event) {
            (Status::Todo, Event::Submit) => Ok(Status::Pending),
            (Status::Done, Event::Retract) => Ok(Status::Todo),
            (Status::Pending, Event::Approve) => Ok(Status::Done),
            (Status::Pending, Event::Reject) => Ok(Status::Todo),
            (from, event) => Err(InvalidTransition { from, event }),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Submit,
    Retract,
    Approve,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Child,
    Parent,
}

impl Event {
    pub fn actor(self) -> Actor {
        match self {
            Event::Submit | Event::Retract => Actor::Child,
            Event::Approve | Event::Reject => Actor::Parent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidTransition {
    pub from: Status,
    pub event: Event,
}

impl fmt::Display for InvalidTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot apply {:?} to a {} item", self.event, self.from)
    }
}

impl std::error::Error for InvalidTransition {}

/// What a child's click on an item means, decided by its status alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildIntent {
    SubmitProof,
    AwaitReview,
    Retract,
}

impl ChildIntent {
    pub fn event(self) -> Option<Event> {
        match self {
            ChildIntent::SubmitProof => Some(Event::Submit),
            ChildIntent::Retract => Some(Event::Retract),
            ChildIntent::AwaitReview => None,
        }
    }
}

pub fn on_click(status: Status) -> ChildIntent {
    match status {
        Status::Todo => ChildIntent::SubmitProof,
        Status::Pending => ChildIntent::AwaitReview,
        Status::Done => ChildIntent::Retract,
    }
}

/// A completable item as the server addresses it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemRef {
    Task { key: String },
    Extra { id: i64 },
}

impl ItemRef {
    pub fn task(key: impl Into<String>) -> Self {
        ItemRef::Task { key: key.into() }
    }

    pub fn extra(id: i64) -> Self {
        ItemRef::Extra { id }
    }

    pub fn complete_path(&self) -> String {
        format!("{}/complete", self.base_path())
    }

    pub fn uncomplete_path(&self) -> String {
        format!("{}/uncomplete", self.base_path())
    }

    fn base_path(&self) -> String {
        match self {
            ItemRef::Task { key } => format!("/api/checklist/{key}"),
            ItemRef::Extra { id } => format!("/api/extras/{id}"),
        }
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemRef::Task { key } => write!(f, "task {key}"),
            ItemRef::Extra { id } => write!(f, "extra {id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATES: [Status; 3] = [Status::Todo, Status::Pending, Status::Done];
    const ALL_EVENTS: [Event; 4] = [Event::Submit, Event::Retract, Event::Approve, Event::Reject];

    #[test]
    fn approve_path_reaches_done() {
        let status = Status::Todo.apply(Event::Submit).unwrap();
        assert_eq!(status, Status::Pending);
        assert_eq!(status.apply(Event::Approve).unwrap(), Status::Done);
    }

    #[test]
    fn reject_path_returns_to_todo() {
        let status = Status::Todo.apply(Event::Submit).unwrap();
        assert_eq!(status.apply(Event::Reject).unwrap(), Status::Todo);
    }

    #[test]
    fn retract_is_the_only_way_out_of_done() {
        let exits: Vec<_> = ALL_EVENTS
            .iter()
            .filter_map(|event| Status::Done.apply(*event).ok().map(|next| (*event, next)))
            .collect();
        assert_eq!(exits, vec![(Event::Retract, Status::Todo)]);
    }

    #[test]
    fn pending_only_leaves_by_parent_decision() {
        for event in ALL_EVENTS {
            if Status::Pending.apply(event).is_ok() {
                assert_eq!(event.actor(), Actor::Parent, "{event:?} moved a pending item");
            }
        }
    }

    #[test]
    fn transition_table_has_four_edges() {
        let legal = ALL_STATES
            .iter()
            .flat_map(|state| ALL_EVENTS.iter().map(move |event| state.apply(*event)))
            .filter(Result::is_ok)
            .count();
        assert_eq!(legal, 4);
    }

    #[test]
    fn click_dispatch_is_total() {
        assert_eq!(on_click(Status::Todo), ChildIntent::SubmitProof);
        assert_eq!(on_click(Status::Pending), ChildIntent::AwaitReview);
        assert_eq!(on_click(Status::Done), ChildIntent::Retract);
        assert_eq!(ChildIntent::AwaitReview.event(), None);
        for status in ALL_STATES {
            if let Some(event) = on_click(status).event() {
                assert!(status.apply(event).is_ok());
            }
        }
    }

    #[test]
    fn items_map_to_distinct_endpoints() {
        assert_eq!(ItemRef::task("shower").complete_path(), "/api/checklist/shower/complete");
        assert_eq!(ItemRef::extra(7).uncomplete_path(), "/api/extras/7/uncomplete");
    }

    #[test]
    fn status_uses_lowercase_wire_names() {
        let status: Status = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(status, Status::Pending);
        assert_eq!(serde_json::to_string(&Status::Done).unwrap(), "\"done\"");
    }
}
