use crate::i18n;
use miyabi_core::{NavTarget, View};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub active: View,
    pub on_navigate: Callback<NavTarget>,
    pub on_scan: Callback<()>,
}

fn icon(target: NavTarget) -> &'static str {
    match target {
        NavTarget::Locations => "📍",
        NavTarget::StampBook => "📖",
        NavTarget::Prizes => "🎁",
    }
}

#[function_component(NavBar)]
pub fn nav_bar(props: &Props) -> Html {
    let tab = |target: NavTarget| {
        let selected = props.active == View::from(target);
        let onclick = {
            let cb = props.on_navigate.clone();
            Callback::from(move |_| cb.emit(target))
        };
        let class = classes!(
            "flex", "flex-col", "items-center", "gap-1", "text-[10px]", "font-bold",
            if selected { "text-[#cf2e2e]" } else { "text-stone-400" }
        );
        html! {
            <button type="button" {class} {onclick}
                aria-current={selected.then_some("page")}>
                <span aria-hidden="true" class="text-xl">{ icon(target) }</span>
                { i18n::t(target.label_key()) }
            </button>
        }
    };
    let on_scan = {
        let cb = props.on_scan.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let [first, middle, last] = NavTarget::ALL;

    html! {
        <nav class="fixed bottom-0 inset-x-0 z-[1000] flex justify-center pb-4" aria-label={i18n::t("nav.label")}>
            <div class="flex items-center gap-6 rounded-full bg-white/95 px-8 py-3 shadow-xl">
                { tab(first) }
                { tab(middle) }
                <button type="button" onclick={on_scan}
                    class="-mt-8 flex h-16 w-16 items-center justify-center rounded-full bg-[#cf2e2e] text-white shadow-lg"
                    aria-label={i18n::t("nav.scan")}>
                    <span aria-hidden="true" class="text-2xl">{ "⌗" }</span>
                </button>
                { tab(last) }
            </div>
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn marks_active_tab_and_offers_scanner() {
        let props = Props {
            active: View::Prizes,
            on_navigate: Callback::noop(),
            on_scan: Callback::noop(),
        };
        let html = block_on(LocalServerRenderer::<NavBar>::with_props(props).render());
        assert!(html.contains("スポット"));
        assert!(html.contains("スタンプ帳"));
        assert_eq!(html.matches("aria-current=\"page\"").count(), 1);
        let current = html.find("aria-current").unwrap();
        assert!(html.find("スタンプ帳").unwrap() < current);
        assert!(current < html.find("景品").unwrap());
        assert!(html.contains("aria-label=\"スキャン\""));
    }
}
