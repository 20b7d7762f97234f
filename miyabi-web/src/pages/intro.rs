use crate::i18n;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct IntroPageProps {
    pub on_start: Callback<()>,
}

#[function_component(IntroPage)]
pub fn intro_page(props: &IntroPageProps) -> Html {
    let on_start = {
        let cb = props.on_start.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <section class="fixed inset-0 z-50 flex flex-col items-center justify-center bg-[#fafaf9] text-center"
            aria-labelledby="intro-title" data-testid="intro-screen">
            <div class="mb-12 flex h-48 w-48 flex-col items-center justify-center rounded-full border-4 border-[#c5a059] bg-gradient-to-br from-[#c5a059] to-[#a8843f] text-white shadow-2xl">
                <span class="text-[10px] tracking-[0.3em]">{ i18n::t("app.since") }</span>
                <span class="text-6xl font-serif font-bold leading-none">{ "40" }<span class="text-2xl">{ "th" }</span></span>
                <span class="text-[10px] font-bold tracking-[0.3em]">{ i18n::t("app.anniversary") }</span>
            </div>
            <h1 id="intro-title" class="px-6 text-4xl font-serif font-bold text-stone-900 mb-3">{ i18n::t("app.shop") }</h1>
            <p class="px-6 text-lg font-serif text-stone-600 mb-12">{ i18n::t("app.title") }</p>
            <button type="button" onclick={on_start}
                class="rounded-full bg-stone-900 px-12 py-4 text-sm font-bold tracking-[0.3em] text-white shadow-xl">
                { i18n::t("app.start") }{ " →" }
            </button>
        </section>
    }
}
