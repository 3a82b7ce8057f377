use crate::api::ApiClient;
use crate::models::CurrentUser;
use crate::router::{NavChrome, Route};
use crate::ui::Container;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
pub struct NavigationState {
    /// `None` while the not-found page is showing.
    pub current_route: Option<Route>,
    pub current_user: Option<CurrentUser>,
}

#[derive(Debug, Default)]
pub struct Shell {
    pub nav: NavigationState,
    pub chrome: NavChrome,
    pub content: Container,
    generation: u64,
}

impl Shell {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    pub(crate) fn begin_navigation(&mut self, route: Option<Route>) -> u64 {
        self.generation += 1;
        self.nav.current_route = route;
        self.chrome.set_active(route);
        self.content.clear();
        self.generation
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        if self.chrome.is_visible() {
            out.push_str(&self.chrome.to_text());
            out.push('\n');
        }
        out.push_str(&self.content.to_text());
        out
    }
}

#[derive(Clone)]
pub struct AppState {
    pub client: ApiClient,
    pub shell: Arc<Mutex<Shell>>,
}

impl AppState {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            shell: Arc::new(Mutex::new(Shell::default())),
        }
    }

    /// The one writer of the pending-approvals badge.
    pub async fn set_pending_badge(&self, count: u32) {
        self.shell.lock().await.chrome.set_badge(count);
    }

    pub async fn pending_badge(&self) -> u32 {
        self.shell.lock().await.chrome.badge_count()
    }

    pub async fn current_route(&self) -> Option<Route> {
        self.shell.lock().await.nav.current_route
    }
}
