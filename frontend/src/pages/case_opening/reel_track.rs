use crate::config::get_asset_url;
use crate::engine::sequence::ReelSequence;
use crate::styles;
use shared::constants::{CARD_GAP_PX, CARD_WIDTH_PX};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ReelTrackProps {
    pub sequence: Option<ReelSequence>,
    pub offset_px: f64,
    pub container_ref: NodeRef,
}

/// One horizontal reel lane. The strip geometry (card width and gap) is
/// written as inline styles from the same constants the offset math uses,
/// so the pointer lines up with the card the engine aimed at.
#[function_component(ReelTrack)]
pub fn reel_track(props: &ReelTrackProps) -> Html {
    let strip_style = format!(
        "transform: translateX({}px); gap: {}px;",
        props.offset_px, CARD_GAP_PX
    );
    let card_style = format!("width: {}px; min-width: {}px;", CARD_WIDTH_PX, CARD_WIDTH_PX);

    html! {
        <div
            ref={props.container_ref.clone()}
            class="relative w-full overflow-hidden rounded-xl bg-gray-100 dark:bg-gray-900/60 border border-gray-200 dark:border-gray-700 py-4"
        >
            <div class="absolute left-1/2 top-0 bottom-0 w-0.5 bg-amber-500 z-10 pointer-events-none"></div>
            <div class="absolute left-1/2 top-0 -translate-x-1/2 border-l-8 border-r-8 border-t-8 border-l-transparent border-r-transparent border-t-amber-500 z-10 pointer-events-none"></div>

            <div class="flex" style={strip_style}>
                {
                    match &props.sequence {
                        Some(sequence) => sequence
                            .entries()
                            .iter()
                            .map(|entry| html! {
                                <div
                                    key={entry.render_id}
                                    class={classes!(
                                        "flex", "flex-col", "items-center", "p-2",
                                        "rounded-lg", "bg-white", "dark:bg-gray-800",
                                        "border-b-4",
                                        styles::rarity_border(entry.item.rarity.as_str()),
                                    )}
                                    style={card_style.clone()}
                                >
                                    <img
                                        src={get_asset_url(&entry.item.image_path)}
                                        alt={entry.item.name.clone()}
                                        class="w-20 h-20 object-contain"
                                    />
                                    <span class="mt-1 text-xs text-center text-gray-700 dark:text-gray-300 truncate w-full">
                                        {&entry.item.name}
                                    </span>
                                </div>
                            })
                            .collect::<Html>(),
                        None => html! {
                            <div class="w-full flex justify-center py-8 text-gray-400 dark:text-gray-500">
                                {"Ready to open"}
                            </div>
                        },
                    }
                }
            </div>
        </div>
    }
}
