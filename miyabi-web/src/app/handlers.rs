use crate::app::state::AppState;
use crate::{a11y, dom, i18n};
use gloo::timers::future::TimeoutFuture;
use miyabi_core::constants::{SCAN_DELAY_MS, STAMP_SETTLE_MS};
use miyabi_core::{Checkpoint, CheckpointId, NavTarget, RallySession, maps_search_url};
use std::collections::BTreeMap;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Clone)]
pub struct AppHandlers {
    pub start: Callback<()>,
    pub navigate: Callback<NavTarget>,
    pub open_scanner: Callback<()>,
    pub close_scanner: Callback<()>,
    pub demo_scan: Callback<()>,
    pub select: Callback<CheckpointId>,
    pub close_detail: Callback<()>,
    pub stamp: Callback<()>,
    pub close_fortune: Callback<()>,
    pub open_map: Callback<Checkpoint>,
    pub lang_change: Callback<String>,
}

impl AppHandlers {
    #[must_use]
    pub fn new(state: &AppState) -> Self {
        Self {
            start: sync(state, RallySession::start),
            navigate: {
                let state = state.clone();
                Callback::from(move |target: NavTarget| {
                    state.update(|s| s.navigate(target));
                })
            },
            open_scanner: sync(state, RallySession::open_scanner),
            close_scanner: sync(state, RallySession::close_scanner),
            demo_scan: build_demo_scan(state),
            select: {
                let state = state.clone();
                Callback::from(move |id: CheckpointId| {
                    state.update(|s| s.select_checkpoint(id));
                })
            },
            close_detail: sync(state, RallySession::close_detail),
            stamp: build_stamp(state),
            close_fortune: sync(state, RallySession::close_fortune),
            open_map: Callback::from(|cp: Checkpoint| dom::open_in_new_tab(&maps_search_url(&cp))),
            lang_change: build_lang_change(state),
        }
    }
}

/// Callback for a transition that needs no arguments and no follow-up.
fn sync(state: &AppState, event: fn(&mut RallySession) -> bool) -> Callback<()> {
    let state = state.clone();
    Callback::from(move |()| {
        state.update(event);
    })
}

fn announce(key: &str, name: &str) {
    let mut args = BTreeMap::new();
    args.insert("name", name);
    a11y::set_status(&i18n::tr(key, Some(&args)));
}

fn build_demo_scan(state: &AppState) -> Callback<()> {
    let state = state.clone();
    Callback::from(move |()| {
        let Some(pending) = state.update(RallySession::request_scan) else {
            return;
        };
        let state = state.clone();
        spawn_local(async move {
            TimeoutFuture::new(SCAN_DELAY_MS).await;
            let name = state.update(|s| s.resolve_scan(pending).map(|cp| cp.name.clone()));
            if let Some(name) = name {
                announce("a11y.scan_done", &name);
            }
        });
    })
}

fn build_stamp(state: &AppState) -> Callback<()> {
    let state = state.clone();
    Callback::from(move |()| {
        let Some(ticket) = state.read(RallySession::stamp_ticket) else {
            return;
        };
        let state = state.clone();
        spawn_local(async move {
            // Let the impact animation land before the overlay changes.
            TimeoutFuture::new(STAMP_SETTLE_MS).await;
            let store = std::rc::Rc::clone(&state.store);
            if !state.update(|s| s.begin_stamp(&store, &ticket)) {
                return;
            }
            let name = ticket.checkpoint().name.clone();
            announce("a11y.stamped", &name);
            let text = state.fortune.fetch_fortune(&name).await;
            state.update(|s| s.finish_stamp(&ticket, text));
        });
    })
}

fn build_lang_change(state: &AppState) -> Callback<String> {
    let lang = state.current_language.clone();
    Callback::from(move |code: String| {
        i18n::set_lang(&code);
        lang.set(i18n::current_lang());
    })
}
