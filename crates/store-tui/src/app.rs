//! App — component-based event loop for the store settings screen.
//!
//! Architecture:
//! - `App` owns all components and `AppState` (shared read-only data for components).
//! - A `tokio::mpsc` channel carries `AppMessage` events in from background tasks:
//!   terminal input and the outcome of every backend request.
//! - The event loop draws each frame, then awaits the next message.
//! - Components return `Vec<Action>`; App dispatches each Action.
//! - Every request is spawned through `spawn_request`, which reports back
//!   exactly once even if the request task panics, so the form can never be
//!   left loading.

use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use store_proto::client::{ApiError, StoreApi};
use store_proto::store::{Store, StoreId, UpdateStore};

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    components::{alert_modal::AlertModal, root_view::RootView, settings_view::SettingsView},
    route::Route,
    widgets::{
        status_bar::{self, KeysContext},
        toast::{Severity, ToastManager},
    },
};

// ── Internal event bus ────────────────────────────────────────────────────────

pub enum AppMessage {
    Event(Event),
    /// `GET /api/stores/{id}` finished (initial load or refresh).
    StoreLoaded(Result<Store, ApiError>),
    /// `PATCH /api/stores/{id}` finished.
    UpdateFinished(Result<(), ApiError>),
    /// `DELETE /api/stores/{id}` finished.
    DeleteFinished(Result<(), ApiError>),
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App<A: StoreApi + 'static> {
    // ── Shared state (passed read-only to components) ─────────────────────────
    pub state: AppState,

    // ── Components ────────────────────────────────────────────────────────────
    settings: SettingsView,
    alert_modal: AlertModal,
    root_view: RootView,

    // ── Backend ───────────────────────────────────────────────────────────────
    api: Arc<A>,
    tx: mpsc::Sender<AppMessage>,
    /// False after a transport-level failure, true again on the next success.
    backend_reachable: bool,

    // ── UI bookkeeping ────────────────────────────────────────────────────────
    toast: ToastManager,
    show_keys_bar: bool,
    /// Last-drawn body rect, used for mouse hit-testing.
    body_area: Rect,
    should_quit: bool,
}

impl<A: StoreApi + 'static> App<A> {
    pub fn new(
        api: A,
        store_id: StoreId,
        api_base_url: impl Into<String>,
        tx: mpsc::Sender<AppMessage>,
    ) -> Self {
        Self {
            state: AppState::new(store_id, api_base_url),
            settings: SettingsView::new(),
            alert_modal: AlertModal::new(),
            root_view: RootView::new(),
            api: Arc::new(api),
            tx,
            backend_reachable: true,
            toast: ToastManager::new(),
            show_keys_bar: true,
            body_area: Rect::default(),
            should_quit: false,
        }
    }

    /// Fetch `initialData` for the settings form.
    pub fn load_initial(&mut self) {
        self.push_log(format!("loading store {}", self.state.store_id));
        self.spawn_get(self.state.store_id.clone());
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self, rx: mpsc::Receiver<AppMessage>) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let result = self.event_loop(&mut terminal, rx).await;

        // ── Teardown ──────────────────────────────────────────────────────────
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        mut rx: mpsc::Receiver<AppMessage>,
    ) -> anyhow::Result<()> {
        // ── Background task: keyboard/mouse events ────────────────────────────
        // Polls so the thread notices when the loop has gone away.
        let event_tx = self.tx.clone();
        tokio::task::spawn_blocking(move || {
            while !event_tx.is_closed() {
                match event::poll(Duration::from_millis(100)) {
                    Ok(true) => match event::read() {
                        Ok(ev) => {
                            if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                                break;
                            }
                        }
                        Err(_) => break,
                    },
                    Ok(false) => {}
                    Err(_) => break,
                }
            }
        });

        self.load_initial();

        // Toast expiry check + spinner animation
        let mut toast_tick = tokio::time::interval(Duration::from_millis(100));
        toast_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    needs_redraw = self.handle_message(msg);
                }

                _ = toast_tick.tick() => {
                    let had_toasts = !self.toast.is_empty();
                    self.toast.tick();
                    needs_redraw = had_toasts;
                }
            }
        }
        info!("event loop finished");
        Ok(())
    }

    // ── Message handler ───────────────────────────────────────────────────────

    /// Returns `true` if the message requires a redraw.
    pub fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(ev) => match ev {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        return false;
                    }
                    let actions = self.handle_key(key);
                    self.dispatch_all(actions);
                }
                Event::Mouse(mouse) => {
                    let actions = self.handle_mouse(mouse);
                    self.dispatch_all(actions);
                }
                Event::Resize(..) => {}
                _ => return false,
            },

            AppMessage::StoreLoaded(result) => self.on_store_loaded(result),

            AppMessage::UpdateFinished(result) => {
                self.toast.dismiss_spinner();
                self.note_reachability(&result);
                let actions = self.settings.finish_update(&result);
                self.dispatch_all(actions);
            }

            AppMessage::DeleteFinished(result) => {
                self.toast.dismiss_spinner();
                self.note_reachability(&result);
                let actions = self.settings.finish_delete(&result);
                self.dispatch_all(actions);
            }
        }
        self.alert_modal.sync(self.settings.phase());
        true
    }

    fn on_store_loaded(&mut self, result: Result<Store, ApiError>) {
        self.note_reachability(&result);
        // A reply for a store we have already navigated away from is stale.
        let current = match &self.state.route {
            Route::Settings(id) => id.clone(),
            Route::Root => {
                debug!("ignoring store reply on {}", self.state.route.path());
                return;
            }
        };
        match result {
            Ok(store) if store.id == current => {
                if self.settings.load_initial(&store) {
                    self.push_log(format!("loaded store {:?}", store.name));
                }
                self.state.store = Some(store);
            }
            Ok(store) => {
                warn!("backend returned store {} for {}", store.id, current);
            }
            Err(e) => {
                if self.settings.is_initialized() {
                    warn!("refreshing store {} failed: {}", current, e);
                } else {
                    error!("loading store {} failed: {}", current, e);
                    let msg = format!("Could not load store {}. Press r to retry.", current);
                    self.dispatch(Action::Toast(Severity::Error, msg));
                }
            }
        }
    }

    fn note_reachability<T>(&mut self, result: &Result<T, ApiError>) {
        self.backend_reachable = !matches!(result, Err(ApiError::Transport(_)));
    }

    // ── Input routing ─────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return vec![Action::Quit];
        }
        // The modal captures all input while open.
        if self.alert_modal.is_open() {
            return self.alert_modal.handle_key(key, &self.state);
        }
        let component: &mut dyn Component = match self.state.route {
            Route::Settings(_) => &mut self.settings,
            Route::Root => &mut self.root_view,
        };
        component.handle_key(key, &self.state)
    }

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        if self.alert_modal.is_open() {
            return self.alert_modal.handle_mouse(event, self.body_area, &self.state);
        }
        let component: &mut dyn Component = match self.state.route {
            Route::Settings(_) => &mut self.settings,
            Route::Root => &mut self.root_view,
        };
        component.handle_mouse(event, self.body_area, &self.state)
    }

    // ── Dispatch ──────────────────────────────────────────────────────────────

    fn dispatch_all(&mut self, actions: Vec<Action>) {
        for action in actions {
            self.dispatch(action);
        }
    }

    fn dispatch(&mut self, action: Action) {
        // Broadcast action to all components first
        let secondary: Vec<Action> = {
            let s = &self.state;
            let mut out = Vec::new();
            out.extend(self.settings.on_action(&action, s));
            out.extend(self.alert_modal.on_action(&action, s));
            out.extend(self.root_view.on_action(&action, s));
            out
        };

        // Handle the action at the app level
        self.apply_action(action);

        // Dispatch any secondary actions (depth-limited to 1 level)
        for a in secondary {
            self.apply_action(a);
        }

        self.alert_modal.sync(self.settings.phase());
    }

    fn apply_action(&mut self, action: Action) {
        debug!("apply_action: {:?}", action);
        match action {
            // ── Settings form ─────────────────────────────────────────────────
            Action::UpdateStore(values) => {
                let id = self.state.store_id.clone();
                info!("updating store {} name={:?}", id, values.name);
                self.toast.spinner("Updating store…");
                let api = Arc::clone(&self.api);
                let body = UpdateStore::from(values);
                self.spawn_request(
                    async move { api.update_store(&id, &body).await },
                    AppMessage::UpdateFinished,
                );
            }
            Action::DeleteStore => {
                let id = self.state.store_id.clone();
                info!("deleting store {}", id);
                self.toast.spinner("Deleting store…");
                let api = Arc::clone(&self.api);
                self.spawn_request(
                    async move { api.delete_store(&id).await },
                    AppMessage::DeleteFinished,
                );
            }
            // Phase transitions live in the settings view.
            Action::OpenDeleteDialog | Action::CloseDeleteDialog | Action::ConfirmDelete => {}

            // ── Cached store ──────────────────────────────────────────────────
            Action::RefreshStore => {
                if let Route::Settings(id) = &self.state.route {
                    self.spawn_get(id.clone());
                }
            }
            Action::ReloadStore => {
                self.toast.notify(Severity::Info, "Retrying…");
                self.load_initial();
            }
            Action::EvictStore => {
                self.state.store = None;
            }

            // ── Navigation ────────────────────────────────────────────────────
            Action::Navigate(route) => {
                self.push_log(format!(
                    "navigate {} → {}",
                    self.state.route.path(),
                    route.path()
                ));
                self.state.route = route;
            }

            // ── UI ────────────────────────────────────────────────────────────
            Action::Toast(severity, message) => {
                self.push_log(message.clone());
                self.toast.notify(severity, message);
            }
            Action::ToggleKeys => {
                self.show_keys_bar = !self.show_keys_bar;
            }

            // ── System ────────────────────────────────────────────────────────
            Action::Quit => {
                self.should_quit = true;
            }
        }
    }

    // ── Requests ──────────────────────────────────────────────────────────────

    fn spawn_get(&self, id: StoreId) {
        let api = Arc::clone(&self.api);
        self.spawn_request(
            async move { api.get_store(&id).await },
            AppMessage::StoreLoaded,
        );
    }

    /// Run `request` on its own task and send `done(result)` back exactly once.
    fn spawn_request<T, Fut>(&self, request: Fut, done: fn(Result<T, ApiError>) -> AppMessage)
    where
        T: Send + 'static,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = match tokio::spawn(request).await {
                Ok(result) => result,
                Err(e) => {
                    error!("request task failed: {}", e);
                    Err(ApiError::Aborted(e.to_string()))
                }
            };
            if tx.send(done(result)).await.is_err() {
                debug!("request finished after the event loop closed");
            }
        });
    }

    fn push_log(&mut self, msg: String) {
        info!("{}", msg);
        self.state.last_log = Some(msg);
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        use crate::theme::C_BG;
        use ratatui::widgets::Block;
        let area = frame.area();

        frame.render_widget(
            Block::default().style(ratatui::style::Style::default().bg(C_BG)),
            area,
        );

        // ── Outer layout: header | separator | body | log | (keys) ────────────
        let keys_h = if self.show_keys_bar { 1u16 } else { 0 };
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(keys_h),
            ])
            .split(area);

        status_bar::draw_header(frame, outer[0], &self.state, self.settings.phase().loading());
        status_bar::draw_separator(frame, outer[1]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(2), Constraint::Min(0), Constraint::Length(2)])
            .split(outer[2])[1];
        let body = Rect {
            y: body.y + 1,
            height: body.height.saturating_sub(1),
            ..body
        };
        self.body_area = body;

        let modal_open = self.alert_modal.is_open();
        match self.state.route {
            Route::Settings(_) => self.settings.draw(frame, body, !modal_open, &self.state),
            Route::Root => self.root_view.draw(frame, body, !modal_open, &self.state),
        }

        status_bar::draw_log_bar(
            frame,
            outer[3],
            self.state.last_log.as_deref(),
            self.backend_reachable,
        );
        if self.show_keys_bar {
            let context = if modal_open {
                KeysContext::Dialog
            } else {
                match self.state.route {
                    Route::Settings(_) => KeysContext::Settings,
                    Route::Root => KeysContext::Root,
                }
            };
            status_bar::draw_keys_bar(frame, outer[4], context);
        }

        // ── Confirmation dialog (on top of the body) ─────────────────────────
        self.alert_modal.draw(frame, area, true, &self.state);

        // ── Toast notifications (topmost layer) ──────────────────────────────
        self.toast.draw(frame, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::settings_view::{
        DELETE_FAILURE, DELETE_SUCCESS, UPDATE_FAILURE, UPDATE_SUCCESS,
    };
    use crate::form::{Phase, NAME_TOO_SHORT};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Get(StoreId),
        Update(StoreId, UpdateStore),
        Delete(StoreId),
    }

    #[derive(Clone, Copy, Default, PartialEq)]
    enum Failure {
        #[default]
        None,
        Status(u16),
        Panic,
    }

    /// In-memory backend recording every call.
    #[derive(Clone)]
    struct FakeApi {
        store: Arc<Mutex<Option<Store>>>,
        calls: Arc<Mutex<Vec<Call>>>,
        /// Shared so a test can bring the backend back mid-session.
        get_down: Arc<AtomicBool>,
        fail_update: Failure,
        fail_delete: Failure,
    }

    impl FakeApi {
        fn with_store(name: &str) -> Self {
            Self {
                store: Arc::new(Mutex::new(Some(Store::new("123", name)))),
                calls: Arc::new(Mutex::new(Vec::new())),
                get_down: Arc::new(AtomicBool::new(false)),
                fail_update: Failure::None,
                fail_delete: Failure::None,
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn writes(&self) -> Vec<Call> {
            self.calls()
                .into_iter()
                .filter(|c| !matches!(c, Call::Get(_)))
                .collect()
        }
    }

    fn outcome(failure: Failure) -> Result<(), ApiError> {
        match failure {
            Failure::None => Ok(()),
            Failure::Status(code) => Err(ApiError::Status {
                status: code.try_into().unwrap(),
                body: String::new(),
            }),
            Failure::Panic => panic!("backend exploded"),
        }
    }

    impl StoreApi for FakeApi {
        async fn get_store(&self, id: &StoreId) -> Result<Store, ApiError> {
            self.calls.lock().unwrap().push(Call::Get(id.clone()));
            if self.get_down.load(Ordering::SeqCst) {
                outcome(Failure::Status(503))?;
            }
            self.store.lock().unwrap().clone().ok_or(ApiError::Status {
                status: 404u16.try_into().unwrap(),
                body: String::new(),
            })
        }

        async fn update_store(&self, id: &StoreId, body: &UpdateStore) -> Result<(), ApiError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Update(id.clone(), body.clone()));
            outcome(self.fail_update)?;
            if let Some(store) = self.store.lock().unwrap().as_mut() {
                store.name = body.name.clone();
            }
            Ok(())
        }

        async fn delete_store(&self, id: &StoreId) -> Result<(), ApiError> {
            self.calls.lock().unwrap().push(Call::Delete(id.clone()));
            outcome(self.fail_delete)?;
            self.store.lock().unwrap().take();
            Ok(())
        }
    }

    struct Harness {
        app: App<FakeApi>,
        rx: mpsc::Receiver<AppMessage>,
        api: FakeApi,
    }

    impl Harness {
        /// App with `initialData` already loaded.
        async fn loaded(api: FakeApi) -> Self {
            let (tx, rx) = mpsc::channel(16);
            let app = App::new(api.clone(), StoreId::new("123"), "http://test", tx);
            let mut h = Self { app, rx, api };
            h.app.load_initial();
            h.settle().await;
            h
        }

        /// Wait for the next request outcome and feed it to the app.
        async fn settle(&mut self) {
            let msg = tokio::time::timeout(Duration::from_secs(5), self.rx.recv())
                .await
                .expect("request never reported back")
                .expect("channel closed");
            self.app.handle_message(msg);
        }

        fn key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
            self.app
                .handle_message(AppMessage::Event(Event::Key(KeyEvent::new(code, modifiers))));
        }

        fn ctrl(&mut self, c: char) {
            self.key(KeyCode::Char(c), KeyModifiers::CONTROL);
        }

        fn toasts(&self) -> Vec<(Severity, String)> {
            self.app
                .toast
                .iter()
                .map(|(s, m)| (s, m.to_string()))
                .collect()
        }

        fn assert_idle(&self) {
            assert_eq!(self.app.settings.phase(), Phase::Idle);
            assert!(!self.app.settings.phase().loading());
            assert!(!self.app.alert_modal.is_open());
            assert!(!self.app.toast.has_spinner());
        }
    }

    fn store_id() -> StoreId {
        StoreId::new("123")
    }

    #[tokio::test]
    async fn test_initial_data_prefills_form() {
        let h = Harness::loaded(FakeApi::with_store("Acme")).await;
        assert_eq!(h.app.settings.draft().name, "Acme");
        assert_eq!(h.app.state.store_label(), "Acme");
        assert_eq!(h.api.calls(), vec![Call::Get(store_id())]);
    }

    #[tokio::test]
    async fn test_initial_load_failure_toasts() {
        let api = FakeApi::with_store("Acme");
        api.get_down.store(true, Ordering::SeqCst);
        let h = Harness::loaded(api).await;
        assert!(!h.app.settings.is_initialized());
        assert_eq!(
            h.toasts(),
            vec![(
                Severity::Error,
                "Could not load store 123. Press r to retry.".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_form_is_inert_until_store_loads() {
        let api = FakeApi::with_store("Acme");
        api.get_down.store(true, Ordering::SeqCst);
        let mut h = Harness::loaded(api).await;

        h.key(KeyCode::Char('X'), KeyModifiers::SHIFT);
        h.key(KeyCode::Enter, KeyModifiers::NONE);
        h.ctrl('s');
        h.ctrl('d');

        h.assert_idle();
        assert!(h.api.writes().is_empty());
        assert_eq!(h.app.settings.draft().name, "");
        assert!(h.rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_retry_recovers_failed_initial_load() {
        let api = FakeApi::with_store("Acme");
        api.get_down.store(true, Ordering::SeqCst);
        let mut h = Harness::loaded(api).await;
        assert!(!h.app.settings.is_initialized());

        h.api.get_down.store(false, Ordering::SeqCst);
        h.key(KeyCode::Char('r'), KeyModifiers::NONE);
        h.settle().await;

        assert!(h.app.settings.is_initialized());
        assert_eq!(h.app.settings.draft().name, "Acme");
        assert_eq!(h.api.calls(), vec![Call::Get(store_id()), Call::Get(store_id())]);

        h.app.settings.set_name("Acme Co");
        h.ctrl('s');
        h.settle().await;
        h.assert_idle();
        assert_eq!(
            h.api.writes(),
            vec![Call::Update(
                store_id(),
                UpdateStore {
                    name: "Acme Co".into()
                }
            )]
        );
    }

    #[tokio::test]
    async fn test_rename_issues_one_patch_then_refreshes() {
        let mut h = Harness::loaded(FakeApi::with_store("Acme")).await;

        h.app.settings.set_name("Acme Co");
        h.ctrl('s');
        assert!(h.app.settings.phase().loading());
        assert!(h.app.toast.has_spinner());

        h.settle().await; // UpdateFinished
        h.assert_idle();
        h.settle().await; // StoreLoaded (refresh)

        assert_eq!(
            h.api.calls(),
            vec![
                Call::Get(store_id()),
                Call::Update(
                    store_id(),
                    UpdateStore {
                        name: "Acme Co".into()
                    }
                ),
                Call::Get(store_id()),
            ]
        );
        assert_eq!(
            h.toasts(),
            vec![(Severity::Success, UPDATE_SUCCESS.to_string())]
        );
        assert_eq!(h.app.state.route, Route::Settings(store_id()));
        assert_eq!(h.app.state.store_label(), "Acme Co");
        assert_eq!(h.app.settings.draft().name, "Acme Co");
    }

    #[tokio::test]
    async fn test_every_non_empty_name_patches_exactly_once() {
        for name in ["x", "Acme Co", "  padded  ", "Ünïcödé ストア"] {
            let mut h = Harness::loaded(FakeApi::with_store("Acme")).await;
            h.app.settings.set_name(name);
            h.ctrl('s');
            // A second submit while loading is ignored.
            h.ctrl('s');
            h.settle().await;
            h.assert_idle();
            assert_eq!(
                h.api.writes(),
                vec![Call::Update(store_id(), UpdateStore { name: name.into() })]
            );
        }
    }

    #[tokio::test]
    async fn test_update_failure_toasts_and_keeps_value() {
        let mut api = FakeApi::with_store("Acme");
        api.fail_update = Failure::Status(422);
        let mut h = Harness::loaded(api).await;

        h.app.settings.set_name("Acme Co");
        h.ctrl('s');
        h.settle().await;

        h.assert_idle();
        assert_eq!(
            h.toasts(),
            vec![(Severity::Error, UPDATE_FAILURE.to_string())]
        );
        assert_eq!(h.app.settings.draft().name, "Acme Co");
        assert_eq!(h.app.state.store_label(), "Acme");
        // No refresh after a failure.
        assert!(h.rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_empty_name_sends_nothing() {
        let mut h = Harness::loaded(FakeApi::with_store("Acme")).await;

        h.app.settings.set_name("");
        h.ctrl('s');

        h.assert_idle();
        assert!(h.api.writes().is_empty());
        assert!(h.rx.try_recv().is_err());
        assert_eq!(
            h.app.settings.draft().errors.name.as_deref(),
            Some(NAME_TOO_SHORT)
        );
        assert!(h.toasts().is_empty());
    }

    #[tokio::test]
    async fn test_delete_confirmed_navigates_home() {
        let mut h = Harness::loaded(FakeApi::with_store("Acme")).await;

        h.ctrl('d');
        assert!(h.app.alert_modal.is_open());
        assert!(h.api.writes().is_empty());

        h.key(KeyCode::Char('y'), KeyModifiers::NONE);
        assert_eq!(h.app.settings.phase(), Phase::Deleting);
        assert!(h.app.alert_modal.is_open());

        h.settle().await;

        h.assert_idle();
        assert_eq!(h.api.writes(), vec![Call::Delete(store_id())]);
        assert_eq!(h.app.state.route, Route::Root);
        assert!(h.app.state.store.is_none());
        assert_eq!(
            h.toasts(),
            vec![(Severity::Success, DELETE_SUCCESS.to_string())]
        );
    }

    #[tokio::test]
    async fn test_delete_cancelled_sends_nothing() {
        let mut h = Harness::loaded(FakeApi::with_store("Acme")).await;

        h.ctrl('d');
        h.key(KeyCode::Esc, KeyModifiers::NONE);

        h.assert_idle();
        assert!(h.api.writes().is_empty());
        assert_eq!(h.app.state.route, Route::Settings(store_id()));
    }

    #[tokio::test]
    async fn test_delete_rejected_with_dependents() {
        let mut api = FakeApi::with_store("Acme");
        api.fail_delete = Failure::Status(500);
        let mut h = Harness::loaded(api).await;

        h.ctrl('d');
        h.key(KeyCode::Char('y'), KeyModifiers::NONE);
        h.settle().await;

        h.assert_idle();
        assert_eq!(h.api.writes(), vec![Call::Delete(store_id())]);
        assert_eq!(h.app.state.route, Route::Settings(store_id()));
        assert_eq!(h.app.state.store_label(), "Acme");
        assert_eq!(
            h.toasts(),
            vec![(Severity::Error, DELETE_FAILURE.to_string())]
        );
    }

    #[tokio::test]
    async fn test_panicking_request_still_resolves_to_idle() {
        let mut api = FakeApi::with_store("Acme");
        api.fail_update = Failure::Panic;
        api.fail_delete = Failure::Panic;
        let mut h = Harness::loaded(api).await;

        h.ctrl('s');
        h.settle().await;
        h.assert_idle();

        h.ctrl('d');
        h.key(KeyCode::Char('y'), KeyModifiers::NONE);
        h.settle().await;
        h.assert_idle();

        assert_eq!(
            h.toasts(),
            vec![
                (Severity::Error, UPDATE_FAILURE.to_string()),
                (Severity::Error, DELETE_FAILURE.to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_ctrl_c_quits_from_dialog() {
        let mut h = Harness::loaded(FakeApi::with_store("Acme")).await;
        h.ctrl('d');
        h.ctrl('c');
        assert!(h.app.should_quit);
    }
}
