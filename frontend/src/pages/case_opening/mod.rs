mod handlers;
mod reel_track;

use std::cell::RefCell;
use std::rc::Rc;

use shared::constants::MAX_CASE_LANES;
use shared::shared_case::{CaseDetail, WonItem};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use yew::prelude::*;

use crate::base::{dispatch_balance_event, Base};
use crate::components::SpinButton;
use crate::config::get_asset_url;
use crate::engine::scheduler::SettleOutcome;
use crate::engine::sequence::ReelSequence;
use crate::engine::{SpinScheduler, SurfaceGroup, SurfaceKey};
use crate::styles;

use handlers::{fetch_case_detail, open_case};
use reel_track::ReelTrack;

#[derive(Properties, PartialEq)]
pub struct CaseOpeningProps {
    pub case_id: i64,
}

#[function_component(CaseOpening)]
pub fn case_opening(props: &CaseOpeningProps) -> Html {
    let case_detail = use_state(|| None::<CaseDetail>);
    let loading = use_state(|| true);
    let error_message = use_state(String::new);
    let lane_count = use_state(|| 1usize);
    let fast_mode = use_state(|| false);
    let spinning = use_state(|| false);
    let lane_offsets = use_state(|| vec![0.0f64; MAX_CASE_LANES]);
    let won_items = use_state(Vec::<WonItem>::new);
    let show_result = use_state(|| false);

    let scheduler = use_mut_ref(SpinScheduler::new);
    let lane_refs = use_memo((), |_| {
        (0..MAX_CASE_LANES).map(|_| NodeRef::default()).collect::<Vec<_>>()
    });

    // Load the case on mount and whenever the route changes.
    {
        let case_detail = case_detail.clone();
        let loading = loading.clone();
        let error_message = error_message.clone();
        use_effect_with(props.case_id, move |case_id| {
            let case_id = *case_id;
            spawn_local(async move {
                match fetch_case_detail(case_id).await {
                    Ok(detail) => case_detail.set(Some(detail)),
                    Err(err) => {
                        log::warn!("failed to load case {}: {}", case_id, err);
                        error_message.set(err);
                    }
                }
                loading.set(false);
            });
            || ()
        });
    }

    // Leaving the page abandons the in-flight spin; frames that fire after
    // this become stale completions the scheduler ignores.
    {
        let scheduler = scheduler.clone();
        use_effect_with((), move |_| {
            move || {
                scheduler.borrow_mut().cancel(SurfaceGroup::CaseLanes);
            }
        });
    }

    let start_spin = {
        let case_detail = case_detail.clone();
        let error_message = error_message.clone();
        let lane_count = lane_count.clone();
        let fast_mode = fast_mode.clone();
        let spinning = spinning.clone();
        let lane_offsets = lane_offsets.clone();
        let won_items = won_items.clone();
        let show_result = show_result.clone();
        let scheduler = scheduler.clone();
        let lane_refs = lane_refs.clone();
        let case_id = props.case_id;

        Callback::from(move |_| {
            if *spinning {
                return;
            }
            let detail = match &*case_detail {
                Some(detail) => detail.clone(),
                None => return,
            };

            spinning.set(true);
            error_message.set(String::new());
            show_result.set(false);
            won_items.set(Vec::new());

            let error_message = error_message.clone();
            let spinning = spinning.clone();
            let lane_offsets = lane_offsets.clone();
            let won_items = won_items.clone();
            let show_result = show_result.clone();
            let scheduler = scheduler.clone();
            let lane_refs = lane_refs.clone();
            let fast = *fast_mode;
            let count = *lane_count;

            spawn_local(async move {
                let response = match open_case(case_id, count as u32).await {
                    Ok(response) => response,
                    Err(err) => {
                        spinning.set(false);
                        error_message.set(err);
                        return;
                    }
                };
                if !response.success {
                    spinning.set(false);
                    error_message.set(
                        response
                            .message
                            .unwrap_or_else(|| "Could not open the case.".to_string()),
                    );
                    return;
                }

                // Measure the first lane; all lanes share the same width.
                let container_px = lane_refs
                    .first()
                    .and_then(|r| r.cast::<Element>())
                    .map(|el| el.get_bounding_client_rect().width());

                let plans = match scheduler.borrow_mut().begin_case_spin(
                    &detail.items,
                    &response.items,
                    response.new_balance,
                    container_px,
                    fast,
                    &mut rand::thread_rng(),
                ) {
                    Ok(plans) => plans,
                    Err(err) => {
                        spinning.set(false);
                        if err.is_user_visible() {
                            error_message.set(err.to_string());
                        }
                        return;
                    }
                };

                let start_time = js_sys::Date::now();
                let duration = plans[0].animation.duration_ms;

                let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
                let g = f.clone();

                *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                    let elapsed = js_sys::Date::now() - start_time;

                    let mut offsets = vec![0.0f64; MAX_CASE_LANES];
                    for plan in &plans {
                        let slot = SurfaceKey::CASE_LANES
                            .iter()
                            .position(|k| *k == plan.key)
                            .unwrap_or(0);
                        offsets[slot] = plan.animation.offset_at(elapsed);
                    }
                    lane_offsets.set(offsets);

                    if elapsed < duration {
                        if let Some(window) = web_sys::window() {
                            let _ = window.request_animation_frame(
                                f.borrow().as_ref().unwrap().as_ref().unchecked_ref(),
                            );
                        }
                        return;
                    }

                    let settled = {
                        let mut sched = scheduler.borrow_mut();
                        let mut settled = None;
                        for plan in &plans {
                            match sched.mark_lane_settled(plan.key, plan.generation) {
                                SettleOutcome::GroupSettled(settlement) => {
                                    settled = Some(settlement);
                                }
                                SettleOutcome::LaneSettled => {}
                                SettleOutcome::Stale => break,
                            }
                        }
                        settled
                    };

                    if let Some(settlement) = settled {
                        dispatch_balance_event(settlement.new_balance);
                        won_items.set(settlement.gained);
                        show_result.set(true);
                    }
                    spinning.set(false);
                    // Last frame: drop the self-reference so the closure
                    // is freed once this call returns.
                    f.borrow_mut().take();
                }) as Box<dyn FnMut()>));

                if let Some(window) = web_sys::window() {
                    let _ = window.request_animation_frame(
                        g.borrow().as_ref().unwrap().as_ref().unchecked_ref(),
                    );
                }
            });
        })
    };

    let sequences: Vec<Option<ReelSequence>> = {
        let sched = scheduler.borrow();
        SurfaceKey::CASE_LANES
            .iter()
            .map(|key| sched.sequence(*key).cloned())
            .collect()
    };

    let total_cost = case_detail
        .as_ref()
        .map(|d| d.price * *lane_count as i64)
        .unwrap_or(0);

    html! {
        <Base>
            <div class={styles::CONTAINER}>
                if *loading {
                    <div class="flex justify-center py-12">
                        <div class={styles::LOADING_SPINNER}></div>
                    </div>
                } else if let Some(detail) = &*case_detail {
                    <h1 class={classes!(styles::TEXT_H1, "mb-6")}>{&detail.name}</h1>

                    if !(*error_message).is_empty() {
                        <div class={classes!(styles::CARD_ERROR, "mb-6")}>{&*error_message}</div>
                    }

                    <div class="space-y-3 mb-6">
                        {
                            for (0..*lane_count).map(|i| html! {
                                <ReelTrack
                                    sequence={sequences[i].clone()}
                                    offset_px={(*lane_offsets)[i]}
                                    container_ref={lane_refs[i].clone()}
                                />
                            })
                        }
                    </div>

                    <div class="flex flex-wrap items-center justify-center gap-4 mb-6">
                        <div class="flex rounded-lg overflow-hidden border border-gray-300 dark:border-gray-600">
                            {
                                for (1..=MAX_CASE_LANES).map(|n| {
                                    let lane_count = lane_count.clone();
                                    let selected = *lane_count == n;
                                    let onclick = Callback::from(move |_| lane_count.set(n));
                                    html! {
                                        <button
                                            {onclick}
                                            disabled={*spinning}
                                            class={if selected {
                                                "px-4 py-2 bg-amber-500 text-white font-semibold"
                                            } else {
                                                "px-4 py-2 bg-white dark:bg-gray-800 text-gray-700 dark:text-gray-300 hover:bg-gray-100 dark:hover:bg-gray-700"
                                            }}
                                        >
                                            {n}
                                        </button>
                                    }
                                })
                            }
                        </div>

                        <label class="flex items-center gap-2 text-sm text-gray-700 dark:text-gray-300 cursor-pointer">
                            <input
                                type="checkbox"
                                checked={*fast_mode}
                                disabled={*spinning}
                                onchange={{
                                    let fast_mode = fast_mode.clone();
                                    Callback::from(move |_| fast_mode.set(!*fast_mode))
                                }}
                                class="rounded accent-amber-500"
                            />
                            {"Fast spin"}
                        </label>
                    </div>

                    <div class="max-w-sm mx-auto">
                        <SpinButton
                            is_spinning={*spinning}
                            disabled={false}
                            label={format!("Open for {} cr", total_cost)}
                            onclick={start_spin}
                        />
                    </div>

                    if *show_result && !(*won_items).is_empty() {
                        <div class="mt-8">
                            <h2 class={classes!(styles::TEXT_H2, "text-center", "mb-4")}>{"You won"}</h2>
                            <div class="flex flex-wrap justify-center gap-4">
                                {
                                    for (*won_items).iter().map(|won| html! {
                                        <div class={classes!(
                                            styles::CARD,
                                            "w-40", "text-center", "border-b-4",
                                            styles::rarity_border(won.item.rarity.as_str()),
                                        )}>
                                            <img
                                                src={get_asset_url(&won.item.image_path)}
                                                alt={won.item.name.clone()}
                                                class="w-24 h-24 object-contain mx-auto"
                                            />
                                            <div class="mt-2 font-medium text-gray-900 dark:text-white">{&won.item.name}</div>
                                            <div class="text-sm text-amber-600 dark:text-amber-400">{format!("{} cr", won.item.price)}</div>
                                        </div>
                                    })
                                }
                            </div>
                        </div>
                    }

                    <div class="mt-10">
                        <h2 class={classes!(styles::TEXT_H2, "mb-4")}>{"Case contents"}</h2>
                        <div class="grid grid-cols-2 sm:grid-cols-3 lg:grid-cols-5 gap-4">
                            {
                                for detail.items.iter().map(|item| html! {
                                    <div class={classes!(
                                        styles::CARD,
                                        "text-center", "border-b-4",
                                        styles::rarity_border(item.rarity.as_str()),
                                    )}>
                                        <img
                                            src={get_asset_url(&item.image_path)}
                                            alt={item.name.clone()}
                                            class="w-16 h-16 object-contain mx-auto"
                                        />
                                        <div class="mt-1 text-sm text-gray-900 dark:text-white truncate">{&item.name}</div>
                                        <div class="text-xs text-gray-500 dark:text-gray-400">{format!("{:.2}%", item.drop_chance)}</div>
                                    </div>
                                })
                            }
                        </div>
                    </div>
                } else {
                    <div class={styles::CARD_ERROR}>{&*error_message}</div>
                }
            </div>
        </Base>
    }
}
