use crate::components::overlay::{Overlay, Placement};
use crate::i18n;
use miyabi_core::Checkpoint;
use std::collections::BTreeMap;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub checkpoint: Checkpoint,
    pub stamped: bool,
    pub on_close: Callback<()>,
    pub on_open_map: Callback<Checkpoint>,
}

fn info_row(label_key: &str, icon: &str, value: &str) -> Html {
    html! {
        <div class="flex items-start gap-3">
            <span aria-hidden="true" class="text-[#c5a059]">{ icon.to_string() }</span>
            <div class="text-sm text-stone-700">
                <span class="block text-[10px] font-bold text-stone-400">{ i18n::t(label_key) }</span>
                { value.to_string() }
            </div>
        </div>
    }
}

/// Bottom sheet with a checkpoint's photo, contact details and map link.
#[function_component(CheckpointDetail)]
pub fn checkpoint_detail(props: &Props) -> Html {
    let cp = &props.checkpoint;
    let number = cp.number_label();
    let mut args = BTreeMap::new();
    args.insert("number", number.as_str());
    let spot = i18n::tr("detail.spot", Some(&args));

    let on_close = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let on_map = {
        let cb = props.on_open_map.clone();
        let cp = cp.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            cb.emit(cp.clone());
        })
    };

    html! {
        <Overlay title={cp.name.clone()} on_close={props.on_close.clone()} placement={Placement::Sheet} hide_title={true}>
            <div class="relative h-56">
                <img src={cp.image.clone()} alt="" class="w-full h-full object-cover rounded-t-3xl" />
                <button type="button" onclick={on_close}
                    class="absolute top-4 right-4 rounded-full bg-white/80 p-2 text-stone-800"
                    aria-label={i18n::t("detail.close")}>{ "✕" }</button>
            </div>
            <div class="px-6 pb-8 -mt-6 relative">
                <span class="inline-block rounded-full bg-[#cf2e2e] px-3 py-1 text-[10px] font-bold text-white tracking-widest">{ spot }</span>
                <h3 class="mt-3 text-2xl font-serif font-bold text-stone-900" aria-hidden="true">{ cp.name.clone() }</h3>
                <div class="mt-4 space-y-3">
                    { info_row("detail.address", "📍", &cp.address) }
                    { info_row("detail.hours", "🕒", &cp.hours) }
                    { info_row("detail.phone", "☎", &cp.phone) }
                </div>
                <p class="mt-5 text-sm leading-relaxed text-stone-600">{ cp.description.clone() }</p>
                <div class="mt-6 flex items-center gap-3">
                    <button type="button" onclick={on_map}
                        class="flex-1 rounded-xl bg-stone-900 py-3 text-xs font-bold text-white">
                        { i18n::t("detail.open_map") }
                    </button>
                    if props.stamped {
                        <div class="flex items-center gap-1 rounded-xl bg-[#c5a059]/10 px-4 py-3 text-xs font-bold text-[#c5a059]">
                            <span aria-hidden="true">{ "✓" }</span>
                            { i18n::t("detail.collected") }
                        </div>
                    }
                </div>
            </div>
        </Overlay>
    }
}
