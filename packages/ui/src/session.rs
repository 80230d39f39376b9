//! Console context and hooks for the UI.
//!
//! [`SessionProvider`] restores the persisted session once, then exposes a
//! [`ConsoleContext`] to every view. Views read the authenticated client
//! from it and report failures back through it, so a `401` anywhere ends
//! the session in one place.

use api::{AdminInfo, AdminRole, ApiClient, ApiError};
use dashboard::{ActionError, SessionController};
use dioxus::prelude::*;
use store::{ConsoleConfig, PlatformStore};

use crate::activity_log::{ActivityLog, LogLevel};

/// Everything built from configuration before the first render.
#[derive(Clone, Debug)]
pub struct ConsoleSetup {
    pub client: ApiClient,
    pub store: PlatformStore,
}

impl ConsoleSetup {
    /// Resolve configuration for this target. The error is the message the
    /// configuration screen shows.
    pub fn load() -> Result<Self, String> {
        let config = ConsoleConfig::load().map_err(|e| e.to_string())?;
        Self::from_config(&config)
    }

    pub fn from_config(config: &ConsoleConfig) -> Result<Self, String> {
        let base_url = config.base_url().map_err(|e| e.to_string())?;
        let client = ApiClient::new(base_url).map_err(|e| e.to_string())?;
        let store = store::platform_store(config.session_keys()).map_err(|e| e.to_string())?;
        tracing::info!(base_url = client.base_url(), "console configured");
        Ok(Self { client, store })
    }
}

// Built once per app; the backend URL identifies it.
impl PartialEq for ConsoleSetup {
    fn eq(&self, other: &Self) -> bool {
        self.client.base_url() == other.client.base_url()
    }
}

#[derive(Clone, Copy)]
pub struct ConsoleContext {
    pub session: Signal<SessionController<PlatformStore>>,
    client: Signal<ApiClient>,
    pub log: Signal<ActivityLog>,
}

impl ConsoleContext {
    /// The client without credentials, for login.
    pub fn anonymous(&self) -> ApiClient {
        self.client.peek().clone()
    }

    /// An authenticated client. Subscribes the caller to the session.
    pub fn backend(&self) -> Option<ApiClient> {
        self.session.read().client(&self.client.peek())
    }

    pub fn admin(&self) -> Option<AdminInfo> {
        self.session.read().admin().cloned()
    }

    pub fn role(&self) -> Option<AdminRole> {
        self.session.read().admin().map(|a| a.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_authenticated()
    }

    pub fn record(&self, level: LogLevel, message: impl Into<String>) {
        let mut log = self.log;
        log.write().push(level, message);
    }

    /// A data load failed: log it and end the session on `401`.
    pub fn load_failed(&self, what: &str, error: &ApiError) {
        tracing::error!("failed to load {what}: {error}");
        self.record(LogLevel::Error, format!("Failed to load {what}: {error}"));
        self.observe(error);
    }

    /// A mutation did not go through. Declined confirmations are silent.
    pub fn action_failed(&self, error: &ActionError) {
        match error {
            ActionError::Declined => {}
            ActionError::Invalid(message) => self.record(LogLevel::Warning, message.clone()),
            ActionError::Failed { message, source } => {
                self.record(LogLevel::Error, message.clone());
                self.observe(source);
            }
        }
    }

    fn observe(&self, error: &ApiError) {
        if !error.is_unauthorized() {
            return;
        }
        let mut session = self.session;
        let ctx = *self;
        spawn(async move {
            let mut controller = session.peek().clone();
            if controller.observe(&ApiError::Unauthorized).await {
                session.set(controller);
                ctx.record(LogLevel::Warning, "Session expired, please sign in again");
            }
        });
    }

    pub async fn logout(&self) {
        let mut session = self.session;
        let mut controller = session.peek().clone();
        controller.logout().await;
        session.set(controller);
        let mut log = self.log;
        log.write().set_tab(None);
        self.record(LogLevel::Info, "Signed out");
    }

    /// Replace the signed-in admin after a profile update.
    pub async fn update_admin(&self, admin: AdminInfo) {
        let mut session = self.session;
        let mut controller = session.peek().clone();
        controller.update_admin(admin).await;
        session.set(controller);
    }
}

pub fn use_console() -> ConsoleContext {
    use_context::<ConsoleContext>()
}

/// Restores the persisted session, then renders `children` with a
/// [`ConsoleContext`] in scope.
#[component]
pub fn SessionProvider(setup: ConsoleSetup, children: Element) -> Element {
    let store = setup.store.clone();
    let client = setup.client.clone();
    let mut session = use_signal(move || SessionController::new(store));
    let client = use_signal(move || client);
    let log = use_context_provider(|| Signal::new(ActivityLog::default()));
    let mut restored = use_signal(|| false);

    use_context_provider(|| ConsoleContext { session, client, log });

    let _restore = use_resource(move || async move {
        let mut controller = session.peek().clone();
        if let Some(existing) = controller.restore().await {
            tracing::info!(admin = %existing.admin.email, "restored session");
        }
        session.set(controller);
        restored.set(true);
    });

    if !restored() {
        return rsx! {
            div { class: "console-loading", "Loading..." }
        };
    }

    rsx! {
        {children}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use store::FileStore;

    /// Which page is mounted under the provider, and what the second page saw.
    #[derive(Clone, Default)]
    struct Pages {
        current: Rc<Cell<u8>>,
        seen: Rc<RefCell<Vec<(usize, bool)>>>,
    }

    impl PartialEq for Pages {
        fn eq(&self, other: &Self) -> bool {
            Rc::ptr_eq(&self.current, &other.current)
        }
    }

    #[component]
    fn Shell(setup: ConsoleSetup, pages: Pages) -> Element {
        let first = pages.current.get() == 0;
        rsx! {
            SessionProvider {
                setup,
                if first {
                    FirstPage {}
                } else {
                    SecondPage { pages }
                }
            }
        }
    }

    #[component]
    fn FirstPage() -> Element {
        let console = use_console();
        use_hook(move || console.record(LogLevel::Info, "opened users"));
        rsx! { div { "users" } }
    }

    #[component]
    fn SecondPage(pages: Pages) -> Element {
        let console = use_console();
        use_hook(move || {
            let entries = console.log.peek().entries.len();
            let authenticated = console.session.peek().is_authenticated();
            pages.seen.borrow_mut().push((entries, authenticated));
        });
        rsx! { div { "feedback" } }
    }

    fn setup(name: &str) -> ConsoleSetup {
        let dir = std::env::temp_dir().join(format!("flowfinance_admin_{name}_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        ConsoleSetup {
            client: ApiClient::new("http://localhost:8000").unwrap(),
            store: FileStore::new(dir),
        }
    }

    #[tokio::test]
    async fn test_page_switch_keeps_console_state() {
        let pages = Pages::default();
        let mut dom = VirtualDom::new_with_props(
            Shell,
            ShellProps {
                setup: setup("page_switch"),
                pages: pages.clone(),
            },
        );
        dom.rebuild_in_place();
        // Session restore runs once, then the first page mounts
        dom.wait_for_work().await;
        dom.render_immediate_to_vec();

        pages.current.set(1);
        dom.mark_dirty(ScopeId::APP);
        dom.render_immediate_to_vec();

        // Same activity log as the first page wrote to, not a fresh one
        assert_eq!(*pages.seen.borrow(), vec![(1, false)]);
    }
}
