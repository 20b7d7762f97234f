use crate::app::handlers::AppHandlers;
use crate::app::state::AppState;
use crate::components::nav_bar::NavBar;
use crate::components::ui::{CheckpointDetail, FortuneCard, LoadingOverlay, StampAction};
use crate::i18n;
use crate::pages::{IntroPage, LocationsPage, PrizesPage, ScannerPage, StampBookPage};
use miyabi_core::{RallySession, View};
use yew::prelude::*;

fn render_page(session: &RallySession, handlers: &AppHandlers) -> Html {
    let catalog = session.shared_catalog();
    let stamps = session.stamps().clone();
    match session.view() {
        View::Intro => html! { <IntroPage on_start={handlers.start.clone()} /> },
        View::StampBook => html! {
            <StampBookPage {catalog} {stamps} on_select={handlers.select.clone()} />
        },
        View::Locations => html! {
            <LocationsPage {catalog} {stamps}
                on_select={handlers.select.clone()}
                on_open_map={handlers.open_map.clone()} />
        },
        View::Prizes => html! { <PrizesPage {catalog} {stamps} /> },
        View::Scanner => html! {
            <ScannerPage scanning={session.scan_pending()}
                on_scan={handlers.demo_scan.clone()}
                on_close={handlers.close_scanner.clone()} />
        },
    }
}

fn render_overlays(session: &RallySession, handlers: &AppHandlers) -> Html {
    let detail = session.selected_checkpoint().map(|cp| {
        html! {
            <CheckpointDetail checkpoint={cp.clone()} stamped={session.is_stamped(cp.id)}
                on_close={handlers.close_detail.clone()}
                on_open_map={handlers.open_map.clone()} />
        }
    });
    let stamp = session.scanned_checkpoint().map(|cp| {
        html! { <StampAction key={cp.id} checkpoint={cp.clone()} on_stamp={handlers.stamp.clone()} /> }
    });
    let fortune = session.fortune_result().map(|result| {
        html! { <FortuneCard result={result.clone()} on_close={handlers.close_fortune.clone()} /> }
    });
    html! {
        <>
            { detail.unwrap_or_default() }
            { stamp.unwrap_or_default() }
            { fortune.unwrap_or_default() }
            if session.is_loading_fortune() {
                <LoadingOverlay />
            }
        </>
    }
}

fn render_lang_toggle(state: &AppState, handlers: &AppHandlers) -> Html {
    let current = (*state.current_language).clone();
    let buttons = i18n::locales().iter().map(|meta| {
        let selected = meta.code == current;
        let onclick = {
            let cb = handlers.lang_change.clone();
            let code = meta.code.to_string();
            Callback::from(move |_| cb.emit(code.clone()))
        };
        let class = classes!(
            "px-2", "py-1", "rounded-full", "text-[10px]", "font-bold",
            if selected { "bg-stone-900 text-white" } else { "text-stone-500" }
        );
        html! {
            <button type="button" {class} {onclick} lang={meta.code} aria-pressed={selected.to_string()}>
                { meta.name }
            </button>
        }
    });
    html! {
        <div class="fixed top-3 right-3 z-[900] flex gap-1 rounded-full bg-white/80 p-1 shadow">
            { for buttons }
        </div>
    }
}

pub fn render_app(state: &AppState, handlers: &AppHandlers) -> Html {
    let session = state.snapshot();
    let nav = session.shows_nav_bar().then(|| {
        html! {
            <>
                { render_lang_toggle(state, handlers) }
                <NavBar active={session.view()}
                    on_navigate={handlers.navigate.clone()}
                    on_scan={handlers.open_scanner.clone()} />
            </>
        }
    });

    html! {
        <div class="min-h-screen bg-[#fdfbf7] text-stone-800 font-sans">
            <style>{ crate::a11y::visible_focus_css() }</style>
            <div id={crate::a11y::STATUS_REGION_ID} class="sr-only" role="status" aria-live="polite"></div>
            <main id="main" role="main" class="mx-auto max-w-md">
                { render_page(&session, handlers) }
            </main>
            { nav.unwrap_or_default() }
            { render_overlays(&session, handlers) }
        </div>
    }
}
