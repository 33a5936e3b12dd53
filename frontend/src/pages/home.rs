use crate::base::Base;
use crate::config::{get_api_base_url, get_asset_url};
use crate::{styles, Route};
use gloo_net::http::Request;
use shared::shared_case::CaseSummary;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

async fn fetch_cases() -> Result<Vec<CaseSummary>, String> {
    match Request::get(&format!("{}/api/cases", get_api_base_url()))
        .send()
        .await
    {
        Ok(response) if response.ok() => response
            .json::<Vec<CaseSummary>>()
            .await
            .map_err(|e| format!("Error parsing case list: {:?}", e)),
        Ok(response) => Err(format!("Error status: {}", response.status())),
        Err(e) => Err(format!("Network error: {:?}", e)),
    }
}

#[function_component(Home)]
pub fn home() -> Html {
    let cases = use_state(Vec::<CaseSummary>::new);
    let loading = use_state(|| true);
    let error_message = use_state(String::new);

    {
        let cases = cases.clone();
        let loading = loading.clone();
        let error_message = error_message.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match fetch_cases().await {
                    Ok(list) => cases.set(list),
                    Err(err) => {
                        log::warn!("failed to load cases: {}", err);
                        error_message.set(err);
                    }
                }
                loading.set(false);
            });
            || ()
        });
    }

    html! {
        <Base>
            <div class={styles::CONTAINER_LG}>
                <h1 class={classes!(styles::TEXT_H1, "mb-6")}>{"Cases"}</h1>

                if !(*error_message).is_empty() {
                    <div class={classes!(styles::CARD_ERROR, "mb-6")}>{&*error_message}</div>
                }

                if *loading {
                    <div class="flex justify-center py-12">
                        <svg class={styles::LOADING_SPINNER} xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 24 24">
                            <circle class="opacity-25" cx="12" cy="12" r="10" stroke="currentColor" stroke-width="4"></circle>
                            <path class="opacity-75" fill="currentColor" d="M4 12a8 8 0 018-8V0C5.373 0 0 5.373 0 12h4z"></path>
                        </svg>
                    </div>
                } else {
                    <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-6">
                        {
                            for (*cases).iter().map(|case| html! {
                                <Link<Route> to={Route::Case { id: case.id }}>
                                    <div class={styles::CARD_HOVER}>
                                        <img
                                            src={get_asset_url(&case.image_path)}
                                            alt={case.name.clone()}
                                            class="w-full h-40 object-contain mb-4"
                                        />
                                        <div class="flex items-center justify-between">
                                            <span class="font-semibold text-gray-900 dark:text-white">{&case.name}</span>
                                            <span class="text-sm font-bold text-amber-600 dark:text-amber-400">{format!("{} cr", case.price)}</span>
                                        </div>
                                    </div>
                                </Link<Route>>
                            })
                        }
                    </div>
                }
            </div>
        </Base>
    }
}
