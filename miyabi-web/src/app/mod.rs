use miyabi_core::Catalog;
use std::rc::Rc;
use yew::prelude::*;

pub mod handlers;
pub mod state;
pub mod view;

pub use handlers::AppHandlers;
pub use state::{AppState, use_app_state, use_app_state_with};

/// Root component: loads the bundled catalog and starts the rally.
#[function_component(App)]
pub fn app() -> Html {
    let catalog = use_memo((), |()| {
        Catalog::load_from_static().map(Rc::new).map_err(|err| {
            log::error!("bundled catalog is invalid: {err}");
            err.to_string()
        })
    });
    match &*catalog {
        Ok(catalog) => html! { <Rally catalog={Rc::clone(catalog)} /> },
        Err(message) => html! {
            <p role="alert" class="p-6 text-sm text-red-700">{ message.clone() }</p>
        },
    }
}

#[derive(Properties, Clone)]
pub struct RallyProps {
    pub catalog: Rc<Catalog>,
}

impl PartialEq for RallyProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.catalog, &other.catalog)
    }
}

#[function_component(Rally)]
pub fn rally(props: &RallyProps) -> Html {
    let state = use_app_state(Rc::clone(&props.catalog));
    let handlers = AppHandlers::new(&state);
    view::render_app(&state, &handlers)
}
