pub mod base;
pub mod styles;
pub mod hooks;
pub mod models;
pub mod components;
pub mod pages;
pub mod config;
pub mod engine;

use yew::prelude::*;
use yew_router::prelude::*;
use crate::pages::{
    case_opening::CaseOpening,
    home::Home,
    upgrade::Upgrade,
};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/cases/:id")]
    Case { id: i64 },
    #[at("/upgrade")]
    Upgrade,
    #[not_found]
    #[at("/404")]
    NotFound,
}

#[function_component(App)]
pub fn app() -> Html {
    // Restore the persisted theme before the first page renders.
    use_effect_with((), move |_| {
        if let Some(window) = web_sys::window() {
            let theme = window
                .local_storage()
                .ok()
                .flatten()
                .and_then(|s| s.get_item("theme").ok().flatten())
                .unwrap_or_else(|| "dark".to_string());
            if let Some(html) = window.document().and_then(|d| d.document_element()) {
                html.set_class_name(&theme);
            }
        }
        || ()
    });

    html! {
        <BrowserRouter>
            <div class="min-h-screen w-full">
                <div class="mx-auto">
                    <Switch<Route> render={switch} />
                </div>
            </div>
        </BrowserRouter>
    }
}

pub fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <Home /> },
        Route::Case { id } => html! { <CaseOpening case_id={id} /> },
        Route::Upgrade => html! { <Upgrade /> },
        Route::NotFound => html! {
            <div class="min-h-screen flex items-center justify-center text-gray-500 dark:text-gray-400">
                {"Nothing here. The cases are on the home page."}
            </div>
        },
    }
}
