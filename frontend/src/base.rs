use crate::hooks::use_balance::use_balance;
use crate::{styles, Route};
use wasm_bindgen::JsValue;
use web_sys::{window, CustomEvent, CustomEventInit};
use yew::prelude::*;
use yew_router::prelude::*;

pub const BALANCE_UPDATE_EVENT: &str = "balanceUpdate";

#[derive(Properties, PartialEq)]
pub struct BaseProps {
    pub children: Html,
}

/// Broadcasts a new absolute balance to every mounted listener
/// (nav readout, pages) after a spin settles or a purchase completes.
pub fn dispatch_balance_event(new_balance: i64) {
    if let Some(window) = window() {
        let event_init = CustomEventInit::new();
        event_init.set_detail(&JsValue::from_f64(new_balance as f64));
        if let Ok(event) = CustomEvent::new_with_event_init_dict(BALANCE_UPDATE_EVENT, &event_init)
        {
            let _ = window.dispatch_event(&event);
        }
    }
}

/// Session token from local storage, falling back to session storage.
pub fn get_auth_token() -> Option<String> {
    window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item("token").ok().flatten())
        .or_else(|| {
            window()
                .and_then(|w| w.session_storage().ok().flatten())
                .and_then(|s| s.get_item("token").ok().flatten())
        })
}

fn handle_theme_toggle(dark_mode: bool) {
    if let Some(document) = window().and_then(|w| w.document()) {
        if let Some(html) = document.document_element() {
            html.set_class_name(if dark_mode { "dark" } else { "light" });
            if let Some(storage) = window().and_then(|w| w.local_storage().ok().flatten()) {
                let _ = storage.set_item("theme", if dark_mode { "dark" } else { "light" });
            }
        }
    }
}

#[function_component(Base)]
pub fn base(props: &BaseProps) -> Html {
    let dark_mode = use_state(|| {
        window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|s| s.get_item("theme").ok().flatten())
            .map_or(true, |theme| theme == "dark")
    });
    let balance = use_balance();

    let on_theme_toggle = {
        let dark_mode = dark_mode.clone();
        Callback::from(move |_: MouseEvent| {
            let next = !*dark_mode;
            dark_mode.set(next);
            handle_theme_toggle(next);
        })
    };

    html! {
        <>
            <nav class={styles::NAV}>
                <div class={styles::NAV_INNER}>
                    <div class={styles::NAV_CONTENT}>
                        <Link<Route> to={Route::Home} classes={styles::NAV_BRAND}>
                            {"CaseVault"}
                        </Link<Route>>
                        <div class={styles::NAV_ITEMS}>
                            <Link<Route> to={Route::Home} classes={styles::NAV_LINK}>{"Cases"}</Link<Route>>
                            <Link<Route> to={Route::Upgrade} classes={styles::NAV_LINK}>{"Upgrade"}</Link<Route>>
                            <span class="px-3 py-1 rounded-full bg-amber-100 dark:bg-amber-900/40 text-sm font-semibold text-amber-700 dark:text-amber-300">
                                {format!("{} cr", *balance)}
                            </span>
                            <button onclick={on_theme_toggle} class="p-2 text-gray-800 dark:text-white rounded-lg" title="Toggle theme">
                                { if *dark_mode { "\u{2600}" } else { "\u{1F319}" } }
                            </button>
                        </div>
                    </div>
                </div>
            </nav>
            <main class="pt-16 min-h-screen bg-gray-50 dark:bg-gray-900">
                { props.children.clone() }
            </main>
        </>
    }
}
