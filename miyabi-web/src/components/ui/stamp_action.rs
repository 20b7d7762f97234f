use crate::components::stamp_seal::StampSeal;
use crate::i18n;
use miyabi_core::Checkpoint;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub checkpoint: Checkpoint,
    /// Fired once, on the first tap.
    pub on_stamp: Callback<()>,
}

/// Full-screen "press your stamp" step shown after a scan.
#[function_component(StampAction)]
pub fn stamp_action(props: &Props) -> Html {
    let pressed = use_state(|| false);

    let on_press = {
        let pressed = pressed.clone();
        let cb = props.on_stamp.clone();
        Callback::from(move |_| {
            if *pressed {
                return;
            }
            pressed.set(true);
            cb.emit(());
        })
    };

    let seal_class = classes!(
        "relative", "w-48", "h-48", "rounded-full", "bg-white", "shadow-2xl",
        "flex", "items-center", "justify-center",
        (*pressed).then_some("animate-stamp-impact")
    );

    html! {
        <div class="fixed inset-0 z-[2500] flex flex-col items-center justify-center bg-stone-900/90 text-white"
            role="dialog" aria-modal="true" aria-labelledby="stamp-action-title">
            <div class="mb-10 text-center">
                <p class="text-[10px] font-bold tracking-[0.3em] text-[#c5a059]">{ i18n::t("stamp.found") }</p>
                <h2 id="stamp-action-title" class="mt-2 text-3xl font-serif font-bold">{ props.checkpoint.name.clone() }</h2>
            </div>
            <button type="button" class={seal_class} onclick={on_press} disabled={*pressed}
                aria-label={i18n::t("stamp.press")}>
                if *pressed {
                    <StampSeal name={props.checkpoint.name.clone()} />
                } else {
                    <span class="flex flex-col items-center gap-2 text-[#cf2e2e]">
                        <span aria-hidden="true" class="text-5xl">{ "印" }</span>
                        <span class="text-[10px] font-bold tracking-widest">{ i18n::t("stamp.press") }</span>
                    </span>
                }
            </button>
            <p class="mt-10 text-xs text-stone-300">{ i18n::t("stamp.prompt") }</p>
        </div>
    }
}
