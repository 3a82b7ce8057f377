use super::{back_row, item_list, progress_bar};
use crate::errors::AppError;
use crate::handlers::Action;
use crate::models::{ChildToday, ChildrenOverview};
use crate::router::{Route, RouteParams};
use crate::state::AppState;
use crate::stats::{fill_class, percent, short_date};
use crate::ui::{Element, Kind};

pub const INVITE_DISPLAY: &str = "invite-display";

pub async fn render_dashboard(state: AppState, _params: RouteParams) -> Result<Vec<Element>, AppError> {
    let overview = state.client.children().await?;
    state.set_pending_badge(overview.pending_approvals).await;
    Ok(build_dashboard(&overview))
}

pub fn build_dashboard(overview: &ChildrenOverview) -> Vec<Element> {
    let mut view = vec![Element::header("👨‍👩‍👧‍👦 Family")];
    if overview.children.is_empty() {
        view.push(Element::empty_state("👶", "No children in the family yet"));
        return view;
    }

    for child in &overview.children {
        let pct = percent(child.done, child.total_tasks);
        let pending = if child.pending > 0 {
            format!(" ({} awaiting review)", child.pending)
        } else {
            String::new()
        };
        view.push(
            Element::new(Kind::Item, child.name.clone())
                .key(format!("child-{}", child.id))
                .class("child-card")
                .on_click(Action::navigate(Route::ChildToday, RouteParams::child(child.id)))
                .children([
                    Element::text(format!(
                        "{}/{} tasks done{pending}",
                        child.done, child.total_tasks
                    )),
                    progress_bar(pct).class(fill_class(pct)),
                ]),
        );
    }

    let shortcuts = [
        ("📊 Report", Route::ChildReport),
        ("📜 History", Route::ChildHistory),
        ("⭐ Bonus", Route::ChildExtras),
        ("📝 Tasks", Route::ChildTasks),
    ];
    view.push(Element::card().key("shortcuts").children(overview.children.iter().map(|child| {
        Element::row().children(shortcuts.iter().map(|(label, route)| {
            Element::button(
                format!("{label} {}", child.name),
                Action::navigate(*route, RouteParams::child(child.id)),
            )
        }))
    })));

    if !overview.parents.is_empty() {
        let names: Vec<&str> = overview.parents.iter().map(|parent| parent.name.as_str()).collect();
        view.push(Element::text(format!("Parents: {}", names.join(", "))).class("text-hint"));
    }

    view.push(Element::card().children([
        Element::button("🔗 Invite code", Action::ShowInvite).key("show-invite"),
        Element::text("").key(INVITE_DISPLAY),
        Element::button("⚠️ Reset family", Action::ResetFamily).class("danger"),
    ]));
    view
}

pub async fn render_child(state: AppState, params: RouteParams) -> Result<Vec<Element>, AppError> {
    let child_id = params.require_child()?;
    let today = state.client.child_today(child_id).await?;
    Ok(build_child(&today))
}

pub fn build_child(today: &ChildToday) -> Vec<Element> {
    let score = if today.shower_missing {
        "0 ⚠️".to_string()
    } else {
        format!("{}/{}", today.points, today.max_points)
    };

    let mut summary = Element::card().class("score-summary").children([
        Element::text(score).class("score-big"),
        Element::text("points today").class("score-label"),
    ]);
    if today.shower_missing {
        summary = summary.child(Element::text("No shower today, so the day scores 0").class("text-hint"));
    }
    if today.extra_points > 0 {
        summary = summary.child(Element::text(format!("⭐ Bonus tasks: +{} pts", today.extra_points)));
    }

    vec![
        back_row(),
        Element::header(today.child_name.clone()).child(Element::subtitle(short_date(today.date))),
        summary,
        Element::card().children(item_list(&today.tasks, &today.extras, false)),
    ]
}
