use crate::api::ProofFile;
use crate::approvals::{self, ApprovalQueue};
use crate::checklist::Checklist;
use crate::errors::AppError;
use crate::machine::{self, ChildIntent, ItemRef, Status};
use crate::models::{ApprovalKey, Decision};
use crate::router::{NavOutcome, Route, RouteParams};
use crate::state::AppState;
use crate::ui::{Element, Handle};
use crate::views;
use tracing::{debug, warn};

pub const AWAITING_REVIEW: &str = "🕐 Awaiting review by a parent";
pub const SUBMITTED_LATE: &str = "⚠️ Submitted after the 22:00 deadline";
const MAX_EXTRA_POINTS: u32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Item {
        item: ItemRef,
        label: String,
        status: Status,
    },
    Decide {
        key: ApprovalKey,
        decision: Decision,
    },
    Navigate {
        route: Route,
        params: RouteParams,
    },
    ShowInvite,
    ResetFamily,
    AssignExtra {
        child_id: i64,
    },
    ToggleTask {
        child_id: i64,
        key: String,
        enabled: bool,
    },
    AddTask {
        child_id: i64,
    },
    DeleteTask {
        child_id: i64,
        key: String,
    },
    ResetTasks {
        child_id: i64,
    },
}

impl Action {
    pub fn navigate(route: Route, params: RouteParams) -> Self {
        Action::Navigate { route, params }
    }
}

/// What the host supplies along with a click.
#[derive(Debug, Clone)]
pub enum Input {
    Proof(ProofFile),
    Text(String),
    Extra { title: String, points: u32 },
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            text: text.into(),
        }
    }

    pub fn failure(err: &AppError) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: format!("Error: {err}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The view was rebuilt (or patched in place) from the server's answer.
    Updated { notice: Option<Notice> },
    Notice(Notice),
    NeedsInput { prompt: String },
    Failed(Notice),
    Navigated(NavOutcome),
    Ignored,
    /// The view changed while the request was in flight.
    Discarded,
}

pub(crate) async fn item_click(
    state: &AppState,
    handle: Handle,
    item: ItemRef,
    label: String,
    status: Status,
    input: Option<Input>,
) -> Outcome {
    match machine::on_click(status) {
        ChildIntent::AwaitReview => Outcome::Notice(Notice::info(AWAITING_REVIEW)),
        ChildIntent::SubmitProof => {
            let Some(Input::Proof(proof)) = input else {
                return Outcome::NeedsInput {
                    prompt: format!("📸 Attach a photo or video for \"{label}\""),
                };
            };
            let Some(generation) = begin(state, handle).await else {
                return Outcome::Ignored;
            };
            let result = Checklist::new(&state.client)
                .submit_proof(&item, proof)
                .await
                .map(|(submission, snapshot)| {
                    let notice = submission.late.then(|| Notice::warning(SUBMITTED_LATE));
                    (views::checklist::build(&snapshot), notice)
                });
            settle(state, handle, generation, result).await
        }
        ChildIntent::Retract => {
            let Some(generation) = begin(state, handle).await else {
                return Outcome::Ignored;
            };
            let result = Checklist::new(&state.client)
                .retract(&item)
                .await
                .map(|snapshot| (views::checklist::build(&snapshot), None));
            settle(state, handle, generation, result).await
        }
    }
}

pub(crate) async fn decide(
    state: &AppState,
    handle: Handle,
    key: ApprovalKey,
    decision: Decision,
) -> Outcome {
    // Both decision buttons of the card go down together.
    let (generation, held) = {
        let mut shell = state.shell.lock().await;
        if !shell.content.is_enabled(handle) {
            debug!(%handle, "control is busy or gone");
            return Outcome::Ignored;
        }
        let held = shell
            .content
            .disable_where(|action| matches!(action, Action::Decide { key: k, .. } if *k == key));
        (shell.generation(), held)
    };
    let result = ApprovalQueue::new(&state.client).decide(key, decision).await;

    let mut shell = state.shell.lock().await;
    if !shell.is_current(generation) {
        debug!(%key, "approval view left while deciding");
        return Outcome::Discarded;
    }
    match result {
        Ok(()) => {
            approvals::mark_processed(&mut shell.content, key, decision);
            let remaining = approvals::remaining(&shell.content);
            shell.chrome.set_badge(remaining);
            debug!(%key, remaining, "approval processed");
            Outcome::Updated { notice: None }
        }
        Err(err) => {
            for held in held {
                shell.content.enable(held);
            }
            warn!(%key, "decision failed: {err}");
            Outcome::Failed(Notice::failure(&err))
        }
    }
}

pub(crate) async fn show_invite(state: &AppState, handle: Handle) -> Outcome {
    let Some(generation) = begin(state, handle).await else {
        return Outcome::Ignored;
    };
    let result = state.client.invite().await;

    let mut shell = state.shell.lock().await;
    if !shell.is_current(generation) {
        return Outcome::Discarded;
    }
    shell.content.enable(handle);
    match result {
        Ok(invite) => {
            shell.content.replace_children(
                views::family::INVITE_DISPLAY,
                vec![Element::text(format!("🔗 {}", invite.invite_code)).class("invite-code")],
            );
            Outcome::Updated { notice: None }
        }
        Err(err) => Outcome::Failed(Notice::failure(&err)),
    }
}

pub(crate) async fn reset_family(state: &AppState, handle: Handle, input: Option<Input>) -> Outcome {
    if !matches!(input, Some(Input::Confirm)) {
        return Outcome::NeedsInput {
            prompt: "Reset the whole family? Everyone will have to register again.".to_string(),
        };
    }
    let Some(generation) = begin(state, handle).await else {
        return Outcome::Ignored;
    };
    let result = state.client.reset_family().await;

    let mut shell = state.shell.lock().await;
    if !shell.is_current(generation) {
        return Outcome::Discarded;
    }
    match result {
        Ok(_) => {
            shell.content.mount(vec![Element::empty_state(
                "👋",
                "The family was reset. Register again through the bot with /start.",
            )]);
            Outcome::Updated { notice: None }
        }
        Err(err) => {
            shell.content.enable(handle);
            Outcome::Failed(Notice::failure(&err))
        }
    }
}

pub(crate) async fn assign_extra(
    state: &AppState,
    handle: Handle,
    child_id: i64,
    input: Option<Input>,
) -> Outcome {
    let Some(Input::Extra { title, points }) = input else {
        return Outcome::NeedsInput {
            prompt: "Enter a title and bonus points (1-10)".to_string(),
        };
    };
    let title = title.trim().to_string();
    if title.is_empty() {
        return Outcome::Notice(Notice::info("Enter a task title"));
    }
    let points = points.clamp(1, MAX_EXTRA_POINTS);

    let Some(generation) = begin(state, handle).await else {
        return Outcome::Ignored;
    };
    let result = state.client.create_extra(child_id, &title, points).await;

    let mut shell = state.shell.lock().await;
    if !shell.is_current(generation) {
        return Outcome::Discarded;
    }
    shell.content.enable(handle);
    match result {
        Ok(_) => {
            let text = format!("✅ Task \"{title}\" (+{points} pts) assigned!");
            shell.content.replace_children(
                views::manage::EXTRA_RESULT,
                vec![Element::text(text.clone()).class("success")],
            );
            Outcome::Updated {
                notice: Some(Notice::info(text)),
            }
        }
        Err(err) => {
            shell.content.replace_children(
                views::manage::EXTRA_RESULT,
                vec![Element::text(format!("Error: {err}")).class("error")],
            );
            Outcome::Failed(Notice::failure(&err))
        }
    }
}

pub(crate) async fn manage_tasks(
    state: &AppState,
    handle: Handle,
    action: Action,
    input: Option<Input>,
) -> Outcome {
    let child_id = match &action {
        Action::ToggleTask { child_id, .. }
        | Action::DeleteTask { child_id, .. }
        | Action::AddTask { child_id }
        | Action::ResetTasks { child_id } => *child_id,
        _ => return Outcome::Ignored,
    };

    let label = match (&action, input) {
        (Action::AddTask { .. }, Some(Input::Text(label))) if !label.trim().is_empty() => {
            Some(label.trim().to_string())
        }
        (Action::AddTask { .. }, _) => {
            return Outcome::NeedsInput {
                prompt: "Name of the new task".to_string(),
            };
        }
        (Action::ResetTasks { .. }, Some(Input::Confirm)) => None,
        (Action::ResetTasks { .. }, _) => {
            return Outcome::NeedsInput {
                prompt: "Reset tasks to the standard set?".to_string(),
            };
        }
        _ => None,
    };

    let Some(generation) = begin(state, handle).await else {
        return Outcome::Ignored;
    };

    let client = &state.client;
    let result = async {
        match &action {
            Action::ToggleTask { key, enabled, .. } => client.toggle_task(child_id, key, *enabled).await?,
            Action::DeleteTask { key, .. } => client.delete_task(child_id, key).await?,
            Action::AddTask { .. } => client.add_task(child_id, label.as_deref().unwrap_or_default()).await?,
            _ => client.reset_tasks(child_id).await?,
        };
        let tasks = client.tasks(child_id).await?;
        Ok::<_, AppError>((views::manage::build_tasks(child_id, &tasks), None))
    }
    .await;

    settle(state, handle, generation, result).await
}

async fn begin(state: &AppState, handle: Handle) -> Option<u64> {
    let mut shell = state.shell.lock().await;
    if !shell.content.disable(handle) {
        debug!(%handle, "control is busy or gone");
        return None;
    }
    Some(shell.generation())
}

async fn settle(
    state: &AppState,
    handle: Handle,
    generation: u64,
    result: Result<(Vec<Element>, Option<Notice>), AppError>,
) -> Outcome {
    let mut shell = state.shell.lock().await;
    if !shell.is_current(generation) {
        debug!(generation, "view changed while the request was in flight; dropping result");
        return Outcome::Discarded;
    }
    match result {
        Ok((view, notice)) => {
            shell.content.mount(view);
            Outcome::Updated { notice }
        }
        Err(err) => {
            shell.content.enable(handle);
            warn!("action failed: {err}");
            Outcome::Failed(Notice::failure(&err))
        }
    }
}
