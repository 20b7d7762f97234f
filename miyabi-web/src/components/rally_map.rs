use crate::i18n;
use crate::map::LeafletAdapter;
use miyabi_core::{CheckpointId, MapAdapter, MapMarker};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub markers: Vec<MapMarker>,
    pub on_select: Callback<CheckpointId>,
}

/// Leaflet map of every checkpoint with a "my location" button.
#[function_component(RallyMap)]
pub fn rally_map(props: &Props) -> Html {
    let container = use_node_ref();
    let adapter = use_mut_ref(|| None::<LeafletAdapter>);
    let unavailable = use_state(|| false);

    {
        let container = container.clone();
        let adapter = adapter.clone();
        let unavailable = unavailable.clone();
        use_effect_with((), move |()| {
            if let Some(el) = container.cast::<web_sys::HtmlElement>() {
                match LeafletAdapter::mount(&el, i18n::t("locations.popup_detail")) {
                    Ok(mounted) => *adapter.borrow_mut() = Some(mounted),
                    Err(err) => {
                        log::error!("{err}");
                        unavailable.set(true);
                    }
                }
            }
            move || {
                adapter.borrow_mut().take();
            }
        });
    }

    {
        let adapter = adapter.clone();
        let on_select = props.on_select.clone();
        use_effect_with(props.markers.clone(), move |markers| {
            if let Some(map) = adapter.borrow_mut().as_mut() {
                map.on_marker_activate(Box::new(move |id| on_select.emit(id)));
                map.render_markers(markers);
            }
        });
    }

    let on_locate = {
        let adapter = adapter.clone();
        Callback::from(move |_| {
            if let Some(map) = adapter.borrow_mut().as_mut() {
                map.locate_user();
            }
        })
    };

    html! {
        <div class="relative w-full h-full">
            <div ref={container} class="w-full h-full" style="z-index: 0"></div>
            if *unavailable {
                <p class="absolute inset-0 flex items-center justify-center text-sm text-stone-500">
                    { i18n::t("locations.map_unavailable") }
                </p>
            } else {
                <button type="button" onclick={on_locate}
                    class="absolute bottom-6 right-6 z-[1000] bg-white text-stone-700 p-3 rounded-full shadow-xl"
                    aria-label={i18n::t("locations.locate")}>
                    <span aria-hidden="true">{ "◎" }</span>
                </button>
            }
        </div>
    }
}
