use crate::base::BALANCE_UPDATE_EVENT;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{window, CustomEvent};
use yew::prelude::*;

/// Credit balance, seeded from local storage and kept current through the
/// balance-update event that settling spins dispatch.
#[hook]
pub fn use_balance() -> UseStateHandle<i64> {
    let balance = use_state(|| {
        window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|s| s.get_item("balance").ok().flatten())
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(0)
    });

    {
        let balance = balance.clone();
        use_effect(move || {
            let handle = balance.clone();

            let listener = Closure::wrap(Box::new(move |e: CustomEvent| {
                if let Some(new_total) = e.detail().as_f64() {
                    handle.set(new_total as i64);

                    if let Some(w) = window() {
                        if let Ok(Some(storage)) = w.local_storage() {
                            let _ = storage.set_item("balance", &(new_total as i64).to_string());
                        }
                    }
                }
            }) as Box<dyn FnMut(CustomEvent)>);

            if let Some(window) = window() {
                let _ = window.add_event_listener_with_callback(
                    BALANCE_UPDATE_EVENT,
                    listener.as_ref().unchecked_ref(),
                );
            }

            move || {
                if let Some(window) = window() {
                    let _ = window.remove_event_listener_with_callback(
                        BALANCE_UPDATE_EVENT,
                        listener.as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    balance
}
