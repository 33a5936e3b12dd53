mod handlers;
mod wheel_canvas;

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use shared::shared_case::{CatalogItem, WonItem};
use shared::shared_upgrade::{upgrade_chance, UpgradeConfig};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::base::{dispatch_balance_event, Base};
use crate::components::SpinButton;
use crate::config::get_asset_url;
use crate::engine::scheduler::SettleOutcome;
use crate::engine::speed_curve::ease_out_cubic;
use crate::engine::zones::ZoneBoundary;
use crate::engine::{SpinScheduler, SurfaceGroup, SurfaceKey};
use crate::models::InventoryItem;
use crate::styles;

use handlers::{fetch_inventory, fetch_upgrade_config, fetch_upgrade_targets, submit_upgrade_spin};
use wheel_canvas::WheelCanvas;

/// Success arc to paint on the wheel. While a spin is in flight or resting
/// on its result, the partition the spin was targeted against wins over
/// the live preview; settling clears the stake, which would otherwise
/// collapse the arc to zero under a pointer resting in the success zone.
fn wheel_arc_deg(spun_arc_deg: Option<f64>, live_chance_percent: f64) -> f64 {
    spun_arc_deg
        .unwrap_or_else(|| ZoneBoundary::from_percent(live_chance_percent).success_arc_deg())
}

#[function_component(Upgrade)]
pub fn upgrade() -> Html {
    let inventory = use_state(Vec::<InventoryItem>::new);
    let targets = use_state(Vec::<CatalogItem>::new);
    let config = use_state(|| None::<UpgradeConfig>);
    let loading = use_state(|| true);
    let error_message = use_state(String::new);

    let selected_ids = use_state(HashSet::<i64>::new);
    let target_id = use_state(|| None::<i64>);

    let spinning = use_state(|| false);
    let rotation = use_state(|| 0.0f64);
    let show_result = use_state(|| false);
    let won_item = use_state(|| None::<WonItem>);
    // Partition of the spin currently in flight or resting on screen.
    let spun_arc_deg = use_state(|| None::<f64>);

    let scheduler = use_mut_ref(SpinScheduler::new);

    {
        let inventory = inventory.clone();
        let targets = targets.clone();
        let config = config.clone();
        let loading = loading.clone();
        let error_message = error_message.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match fetch_inventory().await {
                    Ok(items) => inventory.set(items),
                    Err(err) => error_message.set(err),
                }
                match fetch_upgrade_targets().await {
                    Ok(items) => targets.set(items),
                    Err(err) => error_message.set(err),
                }
                match fetch_upgrade_config().await {
                    Ok(cfg) => config.set(Some(cfg)),
                    Err(err) => error_message.set(err),
                }
                loading.set(false);
            });
            || ()
        });
    }

    // Leaving the page abandons the in-flight spin. The server has already
    // applied the outcome; the next mount refetches inventory and balance.
    {
        let scheduler = scheduler.clone();
        use_effect_with((), move |_| {
            move || {
                scheduler.borrow_mut().cancel(SurfaceGroup::Upgrade);
            }
        });
    }

    let stake_value: i64 = inventory
        .iter()
        .filter(|entry| selected_ids.contains(&entry.id))
        .map(|entry| entry.item.price)
        .sum();
    let target_item = target_id.and_then(|id| targets.iter().find(|t| t.id == id).cloned());
    let rtp = config.as_ref().map(|c| c.rtp).unwrap_or(0.0);
    let chance = target_item
        .as_ref()
        .map(|t| upgrade_chance(stake_value as f64, t.price as f64, rtp))
        .unwrap_or(0.0);
    let success_arc_deg = wheel_arc_deg(*spun_arc_deg, chance);

    let start_spin = {
        let inventory = inventory.clone();
        let error_message = error_message.clone();
        let selected_ids = selected_ids.clone();
        let target_id = target_id.clone();
        let spinning = spinning.clone();
        let rotation = rotation.clone();
        let show_result = show_result.clone();
        let won_item = won_item.clone();
        let spun_arc_deg = spun_arc_deg.clone();
        let scheduler = scheduler.clone();

        Callback::from(move |_| {
            if *spinning {
                return;
            }
            let stake: Vec<i64> = selected_ids.iter().copied().collect();
            let target = match *target_id {
                Some(id) => id,
                None => {
                    error_message.set("Pick a target item first.".to_string());
                    return;
                }
            };
            if stake.is_empty() {
                error_message.set("Select at least one item to stake.".to_string());
                return;
            }

            spinning.set(true);
            error_message.set(String::new());
            show_result.set(false);
            won_item.set(None);

            let inventory = inventory.clone();
            let error_message = error_message.clone();
            let selected_ids = selected_ids.clone();
            let spinning = spinning.clone();
            let rotation = rotation.clone();
            let show_result = show_result.clone();
            let won_item = won_item.clone();
            let spun_arc_deg = spun_arc_deg.clone();
            let scheduler = scheduler.clone();
            let chance = chance;

            spawn_local(async move {
                let response = match submit_upgrade_spin(stake.clone(), target).await {
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
                            .unwrap_or_else(|| "Upgrade request failed.".to_string()),
                    );
                    return;
                }

                let won = response.won_item.map(|item| WonItem {
                    item,
                    withdrawable: true,
                });

                let plan = match scheduler.borrow_mut().begin_upgrade_spin(
                    chance,
                    response.is_win,
                    won,
                    stake,
                    response.new_balance,
                    &mut rand::thread_rng(),
                ) {
                    Ok(plan) => plan,
                    Err(err) => {
                        spinning.set(false);
                        if err.is_user_visible() {
                            error_message.set(err.to_string());
                        }
                        return;
                    }
                };

                // Freeze the painted partition on the spun plan until the
                // user next edits the stake or target.
                spun_arc_deg.set(Some(plan.zones.success_arc_deg()));

                let start_time = js_sys::Date::now();
                let from = plan.from_deg;
                let change = plan.to_deg - plan.from_deg;
                let duration = plan.duration_ms;
                let generation = plan.generation;

                let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
                let g = f.clone();

                *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                    let elapsed = js_sys::Date::now() - start_time;
                    let progress = (elapsed / duration).min(1.0);
                    rotation.set(from + change * ease_out_cubic(progress));

                    if elapsed < duration {
                        if let Some(window) = web_sys::window() {
                            let _ = window.request_animation_frame(
                                f.borrow().as_ref().unwrap().as_ref().unchecked_ref(),
                            );
                        }
                        return;
                    }

                    let outcome = scheduler
                        .borrow_mut()
                        .mark_lane_settled(SurfaceKey::Wheel, generation);
                    if let SettleOutcome::GroupSettled(settlement) = outcome {
                        dispatch_balance_event(settlement.new_balance);
                        won_item.set(settlement.gained.into_iter().next());
                        show_result.set(true);
                        selected_ids.set(HashSet::new());

                        let inventory = inventory.clone();
                        let error_message = error_message.clone();
                        spawn_local(async move {
                            match fetch_inventory().await {
                                Ok(items) => inventory.set(items),
                                Err(err) => {
                                    log::warn!("inventory refresh failed: {}", err);
                                    error_message.set(err);
                                }
                            }
                        });
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

    html! {
        <Base>
            <div class={styles::CONTAINER_LG}>
                <h1 class={classes!(styles::TEXT_H1, "mb-6")}>{"Upgrade"}</h1>

                if !(*error_message).is_empty() {
                    <div class={classes!(styles::CARD_ERROR, "mb-6")}>{&*error_message}</div>
                }

                if *loading {
                    <div class="flex justify-center py-12">
                        <div class={styles::LOADING_SPINNER}></div>
                    </div>
                } else {
                    <div class="grid grid-cols-1 lg:grid-cols-3 gap-8">
                        <div>
                            <h2 class={classes!(styles::TEXT_H2, "mb-4")}>{"Your items"}</h2>
                            if (*inventory).is_empty() {
                                <p class={styles::TEXT_BODY}>{"Nothing to stake. Open a case first."}</p>
                            }
                            <div class="grid grid-cols-2 gap-3">
                                {
                                    for (*inventory).iter().map(|entry| {
                                        let selected = selected_ids.contains(&entry.id);
                                        let onclick = {
                                            let selected_ids = selected_ids.clone();
                                            let spinning = spinning.clone();
                                            let spun_arc_deg = spun_arc_deg.clone();
                                            let id = entry.id;
                                            Callback::from(move |_| {
                                                if *spinning {
                                                    return;
                                                }
                                                let mut next = (*selected_ids).clone();
                                                if !next.remove(&id) {
                                                    next.insert(id);
                                                }
                                                selected_ids.set(next);
                                                spun_arc_deg.set(None);
                                            })
                                        };
                                        html! {
                                            <div
                                                key={entry.id}
                                                {onclick}
                                                class={classes!(
                                                    styles::CARD,
                                                    "cursor-pointer", "text-center", "border-b-4",
                                                    styles::rarity_border(entry.item.rarity.as_str()),
                                                    selected.then_some("ring-2 ring-amber-500"),
                                                )}
                                            >
                                                <img
                                                    src={get_asset_url(&entry.item.image_path)}
                                                    alt={entry.item.name.clone()}
                                                    class="w-16 h-16 object-contain mx-auto"
                                                />
                                                <div class="mt-1 text-sm text-gray-900 dark:text-white truncate">{&entry.item.name}</div>
                                                <div class="text-xs text-amber-600 dark:text-amber-400">{format!("{} cr", entry.item.price)}</div>
                                            </div>
                                        }
                                    })
                                }
                            </div>
                        </div>

                        <div class="flex flex-col items-center">
                            <WheelCanvas
                                rotation={*rotation}
                                success_arc_deg={success_arc_deg}
                                is_spinning={*spinning}
                            />
                            <div class="mt-4 text-center">
                                <div class="text-3xl font-bold text-gray-900 dark:text-white">
                                    {format!("{:.2}%", chance)}
                                </div>
                                <div class={styles::TEXT_SMALL}>
                                    {format!("staking {} cr", stake_value)}
                                </div>
                            </div>
                            <div class="mt-4 w-full max-w-[300px]">
                                <SpinButton
                                    is_spinning={*spinning}
                                    disabled={selected_ids.is_empty() || target_id.is_none()}
                                    label={"Upgrade".to_string()}
                                    onclick={start_spin}
                                />
                            </div>

                            if *show_result {
                                <div class="mt-6 text-center">
                                    {
                                        match &*won_item {
                                            Some(won) => html! {
                                                <div class={classes!(styles::CARD, "border-b-4", styles::rarity_border(won.item.rarity.as_str()))}>
                                                    <div class="text-green-500 font-bold mb-2">{"Upgrade successful!"}</div>
                                                    <img
                                                        src={get_asset_url(&won.item.image_path)}
                                                        alt={won.item.name.clone()}
                                                        class="w-24 h-24 object-contain mx-auto"
                                                    />
                                                    <div class="mt-2 font-medium text-gray-900 dark:text-white">{&won.item.name}</div>
                                                </div>
                                            },
                                            None => html! {
                                                <div class="text-red-500 font-bold">{"Upgrade failed. Items lost."}</div>
                                            },
                                        }
                                    }
                                </div>
                            }
                        </div>

                        <div>
                            <h2 class={classes!(styles::TEXT_H2, "mb-4")}>{"Target"}</h2>
                            <div class="grid grid-cols-2 gap-3">
                                {
                                    for (*targets).iter().map(|item| {
                                        let selected = *target_id == Some(item.id);
                                        let onclick = {
                                            let target_id = target_id.clone();
                                            let spinning = spinning.clone();
                                            let spun_arc_deg = spun_arc_deg.clone();
                                            let id = item.id;
                                            Callback::from(move |_| {
                                                if !*spinning {
                                                    target_id.set(Some(id));
                                                    spun_arc_deg.set(None);
                                                }
                                            })
                                        };
                                        html! {
                                            <div
                                                key={item.id}
                                                {onclick}
                                                class={classes!(
                                                    styles::CARD,
                                                    "cursor-pointer", "text-center", "border-b-4",
                                                    styles::rarity_border(item.rarity.as_str()),
                                                    selected.then_some("ring-2 ring-amber-500"),
                                                )}
                                            >
                                                <img
                                                    src={get_asset_url(&item.image_path)}
                                                    alt={item.name.clone()}
                                                    class="w-16 h-16 object-contain mx-auto"
                                                />
                                                <div class="mt-1 text-sm text-gray-900 dark:text-white truncate">{&item.name}</div>
                                                <div class="text-xs text-amber-600 dark:text-amber-400">{format!("{} cr", item.price)}</div>
                                            </div>
                                        }
                                    })
                                }
                            </div>
                        </div>
                    </div>
                }
            </div>
        </Base>
    }
}

#[cfg(test)]
mod tests {
    use super::wheel_arc_deg;

    #[test]
    fn test_settled_wheel_keeps_the_spun_partition() {
        // Settling clears the stake, so the live chance drops to zero. The
        // painted arc must stay the one the spin landed in, not repaint an
        // all-failure wheel under a pointer resting in the success zone.
        assert_eq!(wheel_arc_deg(Some(162.0), 0.0), 162.0);
        assert_eq!(wheel_arc_deg(Some(360.0), 0.0), 360.0);
    }

    #[test]
    fn test_preview_tracks_the_live_chance_between_spins() {
        assert_eq!(wheel_arc_deg(None, 45.0), 162.0);
        assert_eq!(wheel_arc_deg(None, 0.0), 0.0);
        assert_eq!(wheel_arc_deg(None, 100.0), 360.0);
    }
}
