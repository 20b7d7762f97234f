use crate::components::rally_map::RallyMap;
use crate::i18n;
use miyabi_core::{Catalog, Checkpoint, CheckpointId, StampSet, markers};
use std::collections::BTreeMap;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, Clone)]
pub struct LocationsPageProps {
    pub catalog: Rc<Catalog>,
    pub stamps: StampSet,
    pub on_select: Callback<CheckpointId>,
    pub on_open_map: Callback<Checkpoint>,
}

impl PartialEq for LocationsPageProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.catalog, &other.catalog)
            && self.stamps == other.stamps
            && self.on_select == other.on_select
            && self.on_open_map == other.on_open_map
    }
}

#[function_component(LocationsPage)]
pub fn locations_page(props: &LocationsPageProps) -> Html {
    let pins = markers(&props.catalog, &props.stamps);
    let count = props.catalog.len().to_string();
    let mut args = BTreeMap::new();
    args.insert("count", count.as_str());

    let rows = props.catalog.checkpoints().iter().map(|cp| {
        let stamped = props.stamps.contains(cp.id);
        let on_row = {
            let cb = props.on_select.clone();
            let id = cp.id;
            Callback::from(move |_| cb.emit(id))
        };
        let on_map = {
            let cb = props.on_open_map.clone();
            let cp = cp.clone();
            Callback::from(move |e: MouseEvent| {
                e.stop_propagation();
                cb.emit(cp.clone());
            })
        };
        let img_class = classes!(
            "w-full", "h-full", "object-cover",
            (!stamped).then_some("grayscale")
        );
        html! {
            <li key={cp.id} class="flex items-center gap-4 rounded-2xl bg-white p-3 shadow-sm">
                <button type="button" onclick={on_row} class="relative h-16 w-16 shrink-0 overflow-hidden rounded-xl"
                    aria-label={cp.name.clone()}>
                    <img src={cp.image.clone()} alt="" class={img_class} />
                    if stamped {
                        <span class="absolute inset-0 flex items-center justify-center bg-[#c5a059]/60 text-white" data-testid="stamped-check">{ "✓" }</span>
                    }
                </button>
                <div class="min-w-0 flex-1">
                    <div class="flex items-baseline justify-between gap-2">
                        <h3 class="truncate text-sm font-bold text-stone-900">{ cp.name.clone() }</h3>
                        <span class="text-[10px] font-mono text-stone-400">{ format!("#{}", cp.number_label()) }</span>
                    </div>
                    <p class="truncate text-[11px] text-stone-500">{ cp.address.clone() }</p>
                    <button type="button" onclick={on_map}
                        class="mt-1 rounded-full bg-stone-100 px-3 py-1 text-[10px] font-bold text-stone-600">
                        { "🗺 " }{ i18n::t("locations.open_map") }
                    </button>
                </div>
            </li>
        }
    });

    html! {
        <section class="pb-32" aria-labelledby="locations-title" data-testid="locations">
            <div class="h-[45vh] w-full">
                <RallyMap markers={pins} on_select={props.on_select.clone()} />
            </div>
            <div class="relative -mt-6 rounded-t-3xl bg-[#fdfbf7] px-5 pt-6">
                <div class="mb-4 flex items-end justify-between">
                    <div>
                        <h2 id="locations-title" class="text-2xl font-serif font-bold text-stone-900">{ i18n::t("locations.title") }</h2>
                        <p class="text-[10px] tracking-[0.3em] text-stone-400">{ i18n::t("locations.subtitle") }</p>
                    </div>
                    <span class="text-xs font-bold text-[#c5a059]">{ i18n::tr("locations.count", Some(&args)) }</span>
                </div>
                <ul class="space-y-3" role="list">
                    { for rows }
                </ul>
            </div>
        </section>
    }
}
