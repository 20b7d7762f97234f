use crate::fortune::GeminiFortuneClient;
use crate::storage::BrowserStorage;
use miyabi_core::{Catalog, FortuneClient, ProgressStore, RallySession};
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

/// Shared handles for the running rally.
///
/// The session lives behind a `RefCell` rather than in a reducer because
/// its transitions hand back tokens (`PendingScan`, `StampTicket`) that the
/// async handlers need. Every mutation goes through [`AppState::update`],
/// which schedules a re-render.
#[derive(Clone)]
pub struct AppState {
    session: Rc<RefCell<RallySession>>,
    pub store: Rc<ProgressStore<BrowserStorage>>,
    pub fortune: Rc<dyn FortuneClient>,
    pub current_language: UseStateHandle<String>,
    refresh: UseForceUpdateHandle,
}

/// Rally state backed by `localStorage` and the Gemini fortune client.
#[hook]
pub fn use_app_state(catalog: Rc<Catalog>) -> AppState {
    let fortune: Rc<dyn FortuneClient> = use_memo((), |()| GeminiFortuneClient::from_env());
    use_app_state_with(catalog, fortune)
}

/// [`use_app_state`] with a caller-chosen fortune client.
#[hook]
pub fn use_app_state_with(catalog: Rc<Catalog>, fortune: Rc<dyn FortuneClient>) -> AppState {
    let store = use_memo((), |()| ProgressStore::new(BrowserStorage));
    let session = {
        let store = Rc::clone(&store);
        use_mut_ref(move || RallySession::restore(catalog, &store))
    };

    AppState {
        session,
        store,
        fortune,
        current_language: use_state(crate::i18n::current_lang),
        refresh: use_force_update(),
    }
}

impl AppState {
    pub fn read<R>(&self, f: impl FnOnce(&RallySession) -> R) -> R {
        f(&self.session.borrow())
    }

    /// Apply `f` to the session and re-render. The borrow ends before the
    /// render is scheduled, so callers must not hold one across an `.await`.
    pub fn update<R>(&self, f: impl FnOnce(&mut RallySession) -> R) -> R {
        let out = f(&mut self.session.borrow_mut());
        self.refresh.force_update();
        out
    }

    #[must_use]
    pub fn snapshot(&self) -> RallySession {
        self.session.borrow().clone()
    }
}
