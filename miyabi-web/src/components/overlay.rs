use crate::a11y::{active_element, restore_focus};
use std::sync::atomic::{AtomicUsize, Ordering};
use yew::prelude::*;

static OVERLAY_IDS: AtomicUsize = AtomicUsize::new(0);

#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// Slides up from the bottom edge.
    #[default]
    Sheet,
    /// Centred card over a dimmed backdrop.
    Center,
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub title: AttrValue,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub placement: Placement,
    /// Hide the title visually but keep it for assistive technology.
    #[prop_or_default]
    pub hide_title: bool,
    #[prop_or_default]
    pub children: Children,
}

/// Modal dialog layer. Escape and backdrop clicks close it; focus moves in
/// on mount and goes back to the opener on unmount.
#[function_component(Overlay)]
pub fn overlay(props: &Props) -> Html {
    let overlay_id = use_state(|| OVERLAY_IDS.fetch_add(1, Ordering::Relaxed));
    let title_id = format!("overlay-title-{}", *overlay_id);
    let container_ref = use_node_ref();

    {
        let container_ref = container_ref.clone();
        use_effect_with((), move |()| {
            let opener = active_element();
            if let Some(el) = container_ref.cast::<web_sys::HtmlElement>() {
                let _ = el.focus();
            }
            move || restore_focus(opener.as_ref())
        });
    }

    let on_backdrop = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let stop = Callback::from(|e: MouseEvent| e.stop_propagation());
    let on_keydown = {
        let cb = props.on_close.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                e.prevent_default();
                cb.emit(());
            }
        })
    };

    let (backdrop_class, panel_class) = match props.placement {
        Placement::Sheet => (
            "fixed inset-0 z-[2000] flex items-end justify-center bg-stone-900/60",
            "w-full max-w-md max-h-[90vh] overflow-y-auto rounded-t-3xl bg-[#fdfbf7] shadow-2xl",
        ),
        Placement::Center => (
            "fixed inset-0 z-[3000] flex items-center justify-center bg-stone-900/70 p-6",
            "w-full max-w-sm rounded-3xl bg-[#fdfbf7] shadow-2xl",
        ),
    };
    let title_class = if props.hide_title {
        "sr-only"
    } else {
        "text-lg font-bold text-stone-900 px-6 pt-6"
    };

    html! {
        <div class={backdrop_class} role="presentation" onclick={on_backdrop}>
            <div
                class={panel_class}
                role="dialog"
                aria-modal="true"
                aria-labelledby={title_id.clone()}
                tabindex="-1"
                onclick={stop}
                onkeydown={on_keydown}
                ref={container_ref}
            >
                <h2 id={title_id} class={title_class}>{ props.title.clone() }</h2>
                { for props.children.iter() }
            </div>
        </div>
    }
}
