use crate::i18n;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ScannerPageProps {
    /// A demo scan is decoding. Tapping again restarts it.
    pub scanning: bool,
    pub on_scan: Callback<()>,
    pub on_close: Callback<()>,
}

/// Start the rear camera behind the frame. Failures only cost the picture.
#[hook]
fn use_camera_preview(video: NodeRef) {
    use_effect_with((), move |()| {
        let stream = std::rc::Rc::new(std::cell::RefCell::new(None));
        let alive = std::rc::Rc::new(std::cell::Cell::new(true));
        {
            let stream = stream.clone();
            let alive = alive.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match crate::camera::CameraStream::acquire().await {
                    Ok(camera) if alive.get() => {
                        if let Some(el) = video.cast::<web_sys::HtmlVideoElement>() {
                            camera.attach(&el);
                        }
                        *stream.borrow_mut() = Some(camera);
                    }
                    // Unmounted while waiting; dropping stops the tracks.
                    Ok(_) => {}
                    Err(err) => log::error!("{err}"),
                }
            });
        }
        move || {
            alive.set(false);
            stream.borrow_mut().take();
        }
    });
}

#[function_component(ScannerPage)]
pub fn scanner_page(props: &ScannerPageProps) -> Html {
    let video = use_node_ref();
    use_camera_preview(video.clone());

    let on_close = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let on_scan = {
        let cb = props.on_scan.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {
        <section class="fixed inset-0 z-[1500] bg-black" aria-label={i18n::t("scanner.title")} data-testid="scanner">
            <video ref={video} autoplay=true playsinline=true muted=true
                class="absolute inset-0 w-full h-full object-cover opacity-60"></video>
            <div class="relative flex h-full flex-col items-center justify-between py-10">
                <div class="flex w-full justify-end px-6">
                    <button type="button" onclick={on_close}
                        class="rounded-full bg-white/10 p-3 text-white" aria-label={i18n::t("scanner.close")}>
                        { "✕" }
                    </button>
                </div>
                <div class="relative h-64 w-64 rounded-3xl border-2 border-white/40" aria-hidden="true">
                    <div class="absolute inset-x-4 top-1/2 h-0.5 bg-[#cf2e2e] shadow-[0_0_12px_#cf2e2e] animate-pulse"></div>
                </div>
                <div class="flex flex-col items-center gap-6 px-6">
                    <p class="text-sm text-white/80">{ i18n::t("scanner.hint") }</p>
                    <button type="button" onclick={on_scan} aria-busy={props.scanning.to_string()}
                        class="rounded-full bg-white px-8 py-3 text-xs font-bold tracking-widest text-stone-900">
                        if props.scanning {
                            { i18n::t("scanner.scanning") }
                        } else {
                            { i18n::t("scanner.demo") }{ " ›" }
                        }
                    </button>
                </div>
            </div>
        </section>
    }
}
