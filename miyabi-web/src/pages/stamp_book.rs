use crate::components::progress_ring::ProgressRing;
use crate::components::stamp_seal::StampSeal;
use crate::i18n;
use miyabi_core::{Catalog, CheckpointId, StampSet};
use std::collections::BTreeMap;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, Clone)]
pub struct StampBookPageProps {
    pub catalog: Rc<Catalog>,
    pub stamps: StampSet,
    pub on_select: Callback<CheckpointId>,
}

impl PartialEq for StampBookPageProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.catalog, &other.catalog)
            && self.stamps == other.stamps
            && self.on_select == other.on_select
    }
}

#[function_component(StampBookPage)]
pub fn stamp_book_page(props: &StampBookPageProps) -> Html {
    let total = u32::try_from(props.catalog.len()).unwrap_or(u32::MAX);
    let tiles = props.catalog.checkpoints().iter().map(|cp| {
        let stamped = props.stamps.contains(cp.id);
        let onclick = {
            let cb = props.on_select.clone();
            let id = cp.id;
            Callback::from(move |_| cb.emit(id))
        };
        let mut args = BTreeMap::new();
        args.insert("name", cp.name.as_str());
        let aria = if stamped {
            i18n::tr("stamp_book.stamped_aria", Some(&args))
        } else {
            i18n::tr("stamp_book.unstamped_aria", Some(&args))
        };
        let class = classes!(
            "aspect-square", "relative", "rounded-2xl", "shadow-sm", "border", "overflow-hidden",
            if stamped { "bg-white border-stone-200" } else { "bg-stone-50 border-stone-200/50 border-dashed" }
        );
        html! {
            <li key={cp.id}>
                <button type="button" {class} {onclick} aria-label={aria} data-stamped={stamped.to_string()}>
                    <span class="absolute top-2 left-3 text-2xl font-serif font-bold text-stone-200" aria-hidden="true">
                        { cp.number_label() }
                    </span>
                    <span class="absolute inset-0 flex items-center justify-center">
                        if stamped {
                            <StampSeal name={cp.name.clone()} />
                        } else {
                            <span class="flex flex-col items-center gap-1 text-stone-300">
                                <span aria-hidden="true" class="text-lg">{ "印" }</span>
                                <span class="text-[9px] font-bold tracking-widest">{ i18n::t("stamp_book.collect") }</span>
                            </span>
                        }
                    </span>
                    <span class="absolute bottom-0 inset-x-0 bg-white/80 py-1.5 text-center text-[10px] font-bold text-stone-600 truncate px-2">
                        { cp.name.clone() }
                    </span>
                </button>
            </li>
        }
    });

    html! {
        <section class="px-5 pt-10 pb-32" aria-labelledby="stamp-book-title" data-testid="stamp-book">
            <div class="mb-8 flex items-center justify-between">
                <div>
                    <h2 id="stamp-book-title" class="text-3xl font-serif font-bold text-stone-900">{ i18n::t("stamp_book.title") }</h2>
                    <p class="text-[10px] tracking-[0.3em] text-stone-400">{ i18n::t("stamp_book.subtitle") }</p>
                </div>
                <ProgressRing current={props.stamps.count()} {total} />
            </div>
            <ul class="grid grid-cols-3 gap-3" role="list">
                { for tiles }
            </ul>
        </section>
    }
}
