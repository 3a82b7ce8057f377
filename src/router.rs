use crate::errors::AppError;
use crate::models::Role;
use crate::state::AppState;
use crate::ui::Element;
use crate::views;
use std::{collections::HashMap, fmt, future::Future, pin::Pin, sync::Arc};
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Checklist,
    Home,
    Approvals,
    ChildToday,
    ChildReport,
    ChildHistory,
    ChildExtras,
    ChildTasks,
}

impl Route {
    pub const ALL: [Route; 8] = [
        Route::Checklist,
        Route::Home,
        Route::Approvals,
        Route::ChildToday,
        Route::ChildReport,
        Route::ChildHistory,
        Route::ChildExtras,
        Route::ChildTasks,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Route::Checklist => "checklist",
            Route::Home => "home",
            Route::Approvals => "approvals",
            Route::ChildToday => "child-today",
            Route::ChildReport => "child-report",
            Route::ChildHistory => "child-history",
            Route::ChildExtras => "child-extras",
            Route::ChildTasks => "child-tasks",
        }
    }

    pub fn parse(name: &str) -> Option<Route> {
        Route::ALL.into_iter().find(|route| route.name() == name)
    }

    pub fn home_for(role: Role) -> Route {
        match role {
            Role::Child => Route::Checklist,
            Role::Parent => Route::Home,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteParams {
    pub child_id: Option<i64>,
}

impl RouteParams {
    pub fn child(child_id: i64) -> Self {
        Self {
            child_id: Some(child_id),
        }
    }

    pub fn require_child(&self) -> Result<i64, AppError> {
        self.child_id
            .ok_or_else(|| AppError::render("this page needs a child"))
    }
}

pub type RenderFuture = Pin<Box<dyn Future<Output = Result<Vec<Element>, AppError>> + Send>>;
type RenderFn = Arc<dyn Fn(AppState, RouteParams) -> RenderFuture + Send + Sync>;

#[derive(Default, Clone)]
pub struct Registry {
    routes: HashMap<Route, RenderFn>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F, Fut>(&mut self, route: Route, render: F) -> &mut Self
    where
        F: Fn(AppState, RouteParams) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<Element>, AppError>> + Send + 'static,
    {
        let render: RenderFn =
            Arc::new(move |state: AppState, params: RouteParams| -> RenderFuture {
                Box::pin(render(state, params))
            });
        self.routes.insert(route, render);
        self
    }

    pub fn contains(&self, route: Route) -> bool {
        self.routes.contains_key(&route)
    }

    fn get(&self, route: Route) -> Option<RenderFn> {
        self.routes.get(&route).cloned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    Rendered,
    NotFound,
    Failed(String),
    /// A newer navigation took over before this render resolved.
    Superseded,
}

pub struct Router {
    registry: Registry,
}

impl Router {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    pub async fn navigate(&self, state: &AppState, route: Route, params: RouteParams) -> NavOutcome {
        self.go(state, Some(route), params).await
    }

    pub async fn navigate_named(&self, state: &AppState, name: &str, params: RouteParams) -> NavOutcome {
        let route = Route::parse(name);
        if route.is_none() {
            debug!(name, "unknown route");
        }
        self.go(state, route, params).await
    }

    async fn go(&self, state: &AppState, route: Option<Route>, params: RouteParams) -> NavOutcome {
        let generation = state.shell.lock().await.begin_navigation(route);
        let name = route.map_or("not-found", Route::name);
        info!(route = name, child_id = ?params.child_id, generation, "navigate");

        let Some(render) = route.and_then(|route| self.registry.get(route)) else {
            let mut shell = state.shell.lock().await;
            if !shell.is_current(generation) {
                return NavOutcome::Superseded;
            }
            shell.content.mount(views::not_found());
            return NavOutcome::NotFound;
        };

        // Spawned so a panicking view surfaces as a JoinError rather than
        // unwinding through the caller.
        let result = match tokio::spawn((*render)(state.clone(), params)).await {
            Ok(result) => result,
            Err(err) => Err(AppError::render(format!("view crashed: {err}"))),
        };

        let mut shell = state.shell.lock().await;
        if !shell.is_current(generation) {
            debug!(
                route = name,
                generation,
                current = shell.generation(),
                "dropping render of a view that is no longer current"
            );
            return NavOutcome::Superseded;
        }

        match result {
            Ok(view) => {
                shell.content.mount(view);
                NavOutcome::Rendered
            }
            Err(err) => {
                error!(route = name, "route error: {err}");
                shell.content.mount(views::error_panel(&err));
                NavOutcome::Failed(err.message)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub route: Route,
    pub icon: &'static str,
    pub label: &'static str,
}

/// Bottom navigation: one tab per top-level route of the signed-in role.
#[derive(Debug, Clone, Default)]
pub struct NavChrome {
    tabs: Vec<Tab>,
    active: Option<Route>,
    badge: u32,
}

impl NavChrome {
    pub fn for_role(role: Role) -> Self {
        let tabs = match role {
            Role::Child => vec![Tab {
                route: Route::Checklist,
                icon: "📋",
                label: "Checklist",
            }],
            Role::Parent => vec![
                Tab {
                    route: Route::Home,
                    icon: "🏠",
                    label: "Home",
                },
                Tab {
                    route: Route::Approvals,
                    icon: "👁",
                    label: "Review",
                },
            ],
        };
        Self {
            tabs,
            active: None,
            badge: 0,
        }
    }

    pub fn is_visible(&self) -> bool {
        !self.tabs.is_empty()
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn set_active(&mut self, route: Option<Route>) {
        self.active = route;
    }

    pub fn active(&self) -> Option<Route> {
        self.active
            .filter(|route| self.tabs.iter().any(|tab| tab.route == *route))
    }

    pub fn set_badge(&mut self, count: u32) {
        self.badge = count;
    }

    pub fn badge_count(&self) -> u32 {
        self.badge
    }

    /// The badge as shown; hidden at zero.
    pub fn badge(&self) -> Option<u32> {
        (self.badge > 0).then_some(self.badge)
    }

    pub fn to_text(&self) -> String {
        let active = self.active();
        self.tabs
            .iter()
            .map(|tab| {
                let badge = match (tab.route, self.badge()) {
                    (Route::Approvals, Some(count)) => format!(" ({count})"),
                    _ => String::new(),
                };
                let label = format!("{} {}{badge}", tab.icon, tab.label);
                if active == Some(tab.route) {
                    format!("[*{label}*]")
                } else {
                    format!("[{label}]")
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_names_round_trip() {
        for route in Route::ALL {
            assert_eq!(Route::parse(route.name()), Some(route));
        }
        assert_eq!(Route::parse("settings"), None);
    }

    #[test]
    fn roles_land_on_their_home() {
        assert_eq!(Route::home_for(Role::Child), Route::Checklist);
        assert_eq!(Route::home_for(Role::Parent), Route::Home);
    }

    #[test]
    fn child_params_are_required_when_asked() {
        assert_eq!(RouteParams::child(5).require_child().unwrap(), 5);
        assert!(RouteParams::default().require_child().is_err());
    }

    #[test]
    fn chrome_highlights_only_its_own_tabs() {
        let mut chrome = NavChrome::for_role(Role::Parent);
        chrome.set_active(Some(Route::Approvals));
        assert_eq!(chrome.active(), Some(Route::Approvals));

        chrome.set_active(Some(Route::ChildReport));
        assert_eq!(chrome.active(), None);
    }

    #[test]
    fn badge_hides_at_zero() {
        let mut chrome = NavChrome::for_role(Role::Parent);
        chrome.set_active(Some(Route::Home));
        chrome.set_badge(3);
        assert_eq!(chrome.badge(), Some(3));
        assert_eq!(chrome.to_text(), "[*🏠 Home*] [👁 Review (3)]");

        chrome.set_badge(0);
        assert_eq!(chrome.badge(), None);
        assert_eq!(chrome.to_text(), "[*🏠 Home*] [👁 Review]");
    }

    #[test]
    fn registry_tracks_registered_routes() {
        let mut registry = Registry::new();
        registry.register(Route::Home, |_state, _params| async { Ok(Vec::new()) });
        assert!(registry.contains(Route::Home));
        assert!(!registry.contains(Route::Approvals));
    }
}
