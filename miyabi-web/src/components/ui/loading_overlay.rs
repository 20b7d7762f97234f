use crate::i18n;
use yew::prelude::*;

#[function_component(LoadingOverlay)]
pub fn loading_overlay() -> Html {
    html! {
        <div class="fixed inset-0 z-[2800] flex flex-col items-center justify-center bg-stone-900/80"
            role="status" aria-live="polite">
            <span aria-hidden="true" class="text-5xl text-[#c5a059] animate-spin">{ "✦" }</span>
            <p class="mt-4 text-sm font-bold tracking-widest text-white">{ i18n::t("fortune.loading") }</p>
        </div>
    }
}
