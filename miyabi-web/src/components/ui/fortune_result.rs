use crate::components::overlay::{Overlay, Placement};
use crate::i18n;
use miyabi_core::FortuneResult;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub result: FortuneResult,
    pub on_close: Callback<()>,
}

/// Per-character spans so the text can be revealed one letter at a time.
fn letters(text: &str) -> Html {
    text.chars()
        .enumerate()
        .map(|(idx, ch)| {
            let style = format!("animation-delay: {}ms", idx * 50);
            html! { <span class="animate-letter" {style}>{ ch.to_string() }</span> }
        })
        .collect()
}

#[function_component(FortuneCard)]
pub fn fortune_card(props: &Props) -> Html {
    let on_close = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <Overlay title={props.result.checkpoint.name.clone()} on_close={props.on_close.clone()}
            placement={Placement::Center} hide_title={true}>
            <div class="px-8 pt-10 pb-8 text-center">
                <p class="text-[10px] font-bold tracking-[0.3em] text-[#c5a059]">{ i18n::t("fortune.celebration") }</p>
                <h3 class="mt-2 text-2xl font-serif font-bold text-stone-900" aria-hidden="true">
                    { props.result.checkpoint.name.clone() }
                </h3>
                <p class="mt-6 text-base font-serif leading-loose text-stone-700 whitespace-pre-wrap"
                    aria-label={props.result.text.clone()}>
                    { letters(&props.result.text) }
                </p>
                <button type="button" onclick={on_close}
                    class="mt-8 w-full rounded-xl bg-stone-900 py-3 text-sm font-bold text-white">
                    { i18n::t("fortune.close") }
                </button>
            </div>
        </Overlay>
    }
}
