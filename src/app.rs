use crate::api::ApiClient;
use crate::errors::AppError;
use crate::handlers::{self, Action, Input, Outcome};
use crate::models::CurrentUser;
use crate::router::{NavChrome, NavOutcome, Registry, Route, RouteParams, Router};
use crate::state::AppState;
use crate::ui::Handle;
use crate::views;
use tracing::{debug, error, info};

/// Every screen of the app, parent and child alike.
pub fn routes() -> Registry {
    let mut registry = Registry::new();
    registry
        .register(Route::Checklist, views::checklist::render)
        .register(Route::Home, views::family::render_dashboard)
        .register(Route::Approvals, views::approvals::render)
        .register(Route::ChildToday, views::family::render_child)
        .register(Route::ChildReport, views::reports::render_report)
        .register(Route::ChildHistory, views::reports::render_history)
        .register(Route::ChildExtras, views::manage::render_extras)
        .register(Route::ChildTasks, views::manage::render_tasks);
    registry
}

pub struct App {
    state: AppState,
    router: Router,
}

impl App {
    pub fn new(client: ApiClient) -> Self {
        Self::with_routes(client, routes())
    }

    pub fn with_routes(client: ApiClient, registry: Registry) -> Self {
        Self {
            state: AppState::new(client),
            router: Router::new(registry),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub async fn bootstrap(&self) -> Result<CurrentUser, AppError> {
        let user = match self.state.client.me().await {
            Ok(user) => user,
            Err(err) => {
                error!("could not load the current user: {err}");
                let mut shell = self.state.shell.lock().await;
                shell.chrome = NavChrome::default();
                shell.content.mount(views::fatal_panel());
                return Err(err);
            }
        };
        info!(user_id = user.id, role = ?user.role, "signed in");

        {
            let mut shell = self.state.shell.lock().await;
            shell.chrome = NavChrome::for_role(user.role);
            shell.nav.current_user = Some(user.clone());
        }
        self.navigate(Route::home_for(user.role), RouteParams::default())
            .await;
        Ok(user)
    }

    pub async fn navigate(&self, route: Route, params: RouteParams) -> NavOutcome {
        self.router.navigate(&self.state, route, params).await
    }

    pub async fn navigate_named(&self, name: &str, params: RouteParams) -> NavOutcome {
        self.router.navigate_named(&self.state, name, params).await
    }

    pub async fn handle(&self, slot: usize) -> Option<Handle> {
        self.state.shell.lock().await.content.handle(slot)
    }

    pub async fn activate(&self, handle: Handle, input: Option<Input>) -> Outcome {
        let action = {
            let shell = self.state.shell.lock().await;
            shell.content.action(handle).cloned()
        };
        let Some(action) = action else {
            debug!(%handle, "click on a control that is gone or busy");
            return Outcome::Ignored;
        };
        let state = &self.state;

        match action {
            Action::Navigate { route, params } => Outcome::Navigated(self.navigate(route, params).await),
            Action::Item {
                item,
                label,
                status,
            } => handlers::item_click(state, handle, item, label, status, input).await,
            Action::Decide { key, decision } => handlers::decide(state, handle, key, decision).await,
            Action::ShowInvite => handlers::show_invite(state, handle).await,
            Action::ResetFamily => handlers::reset_family(state, handle, input).await,
            Action::AssignExtra { child_id } => {
                handlers::assign_extra(state, handle, child_id, input).await
            }
            action @ (Action::ToggleTask { .. }
            | Action::AddTask { .. }
            | Action::DeleteTask { .. }
            | Action::ResetTasks { .. }) => handlers::manage_tasks(state, handle, action, input).await,
        }
    }

    pub async fn click(&self, slot: usize, input: Option<Input>) -> Outcome {
        match self.handle(slot).await {
            Some(handle) => self.activate(handle, input).await,
            None => Outcome::Ignored,
        }
    }

    pub async fn screen(&self) -> String {
        self.state.shell.lock().await.to_text()
    }
}
