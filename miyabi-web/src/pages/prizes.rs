use crate::i18n;
use miyabi_core::{Catalog, StampSet};
use std::collections::BTreeMap;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, Clone)]
pub struct PrizesPageProps {
    pub catalog: Rc<Catalog>,
    pub stamps: StampSet,
}

impl PartialEq for PrizesPageProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.catalog, &other.catalog) && self.stamps == other.stamps
    }
}

#[function_component(PrizesPage)]
pub fn prizes_page(props: &PrizesPageProps) -> Html {
    let count = props.stamps.count();
    let cards = props.catalog.prizes().iter().map(|prize| {
        let locked = !prize.is_unlocked(count);
        let remaining = prize.remaining(count).to_string();
        let mut args = BTreeMap::new();
        args.insert("count", remaining.as_str());
        let button_class = classes!(
            "w-full", "py-4", "rounded-xl", "text-xs", "font-bold", "tracking-widest",
            if locked {
                "bg-stone-100 text-stone-400 cursor-not-allowed"
            } else {
                "bg-stone-900 text-white shadow-lg"
            }
        );
        html! {
            <li key={prize.id} class="overflow-hidden rounded-3xl bg-white shadow-sm" data-locked={locked.to_string()}>
                <div class="relative h-40">
                    <img src={prize.image.clone()} alt={prize.name.clone()} class="w-full h-full object-cover" />
                    if locked {
                        <div class="absolute inset-0 flex items-center justify-center bg-stone-900/50">
                            <span class="rounded-full border border-white/60 px-4 py-1 text-[10px] font-bold tracking-[0.3em] text-white">
                                { i18n::t("prizes.locked") }
                            </span>
                        </div>
                    }
                </div>
                <div class="p-5">
                    <div class="flex items-baseline justify-between">
                        <h3 class="text-lg font-serif font-bold text-stone-900">{ prize.name.clone() }</h3>
                        <span class="text-xs font-bold text-[#cf2e2e]">{ i18n::tr("prizes.remaining", Some(&args)) }</span>
                    </div>
                    <p class="mt-2 mb-4 text-xs text-stone-500">{ prize.description.clone() }</p>
                    <button type="button" class={button_class} disabled={locked}>
                        if locked {
                            { i18n::t("prizes.collect_more") }
                        } else {
                            { i18n::t("prizes.exchange") }
                        }
                    </button>
                </div>
            </li>
        }
    });

    html! {
        <section class="px-5 pt-10 pb-32" aria-labelledby="prizes-title" data-testid="prizes">
            <div class="mb-8">
                <h2 id="prizes-title" class="text-3xl font-serif font-bold text-stone-900">{ i18n::t("prizes.title") }</h2>
                <p class="text-[10px] tracking-[0.3em] text-stone-400">{ i18n::t("prizes.subtitle") }</p>
            </div>
            <ul class="space-y-5" role="list">
                { for cards }
            </ul>
        </section>
    }
}
