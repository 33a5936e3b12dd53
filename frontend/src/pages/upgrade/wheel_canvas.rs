use std::f64::consts::PI;
use wasm_bindgen::JsCast;
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct WheelCanvasProps {
    pub rotation: f64,
    pub success_arc_deg: f64,
    pub is_spinning: bool,
}

// The pointer sits at the top of the canvas (270 degrees in canvas terms).
// Wheel angle `a` is painted at canvas angle (270 - a), so the success arc
// [0, s) covers the canvas arc [270 - s, 270] and the zone under the
// pointer at rest is exactly the zone the rotation math targeted.
#[function_component(WheelCanvas)]
pub fn wheel_canvas(props: &WheelCanvasProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        let rotation = props.rotation;
        let success_arc_deg = props.success_arc_deg;
        let is_spinning = props.is_spinning;

        use_effect_with(
            (rotation, success_arc_deg, is_spinning),
            move |(rotation, success_arc_deg, is_spinning)| {
                if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                    if let Some(context) = canvas
                        .get_context("2d")
                        .ok()
                        .flatten()
                        .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
                    {
                        draw_wheel(&canvas, &context, *rotation, *success_arc_deg, *is_spinning);
                    }
                }
                || ()
            },
        );
    }

    html! {
        <div class="relative">
            <canvas
                ref={canvas_ref}
                width="420"
                height="420"
                class="w-full max-w-[420px] h-auto rounded-full shadow-lg transition-all duration-300"
                style={if props.is_spinning {
                    "filter: drop-shadow(0px 5px 20px rgba(245, 158, 11, 0.4));"
                } else {
                    "filter: drop-shadow(0px 5px 15px rgba(0, 0, 0, 0.2));"
                }}
            />
        </div>
    }
}

fn draw_wheel(
    canvas: &HtmlCanvasElement,
    context: &CanvasRenderingContext2d,
    rotation: f64,
    success_arc_deg: f64,
    is_spinning: bool,
) {
    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let center_x = width / 2.0;
    let center_y = height / 2.0;
    let radius = width.min(height) / 2.0 - 20.0;

    context.clear_rect(0.0, 0.0, width, height);

    let is_dark_mode = window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .map(|el| el.class_list().contains("dark"))
        .unwrap_or(false);

    // Outer glow
    let glow_intensity = if is_spinning { 0.25 } else { 0.12 };
    context.begin_path();
    context.set_fill_style_str(&format!("rgba(245, 158, 11, {})", glow_intensity));
    let _ = context.arc(center_x, center_y, radius + 12.0, 0.0, 2.0 * PI);
    context.fill();

    context.save();
    let _ = context.translate(center_x, center_y);
    let _ = context.rotate(rotation * PI / 180.0);
    let _ = context.translate(-center_x, -center_y);

    let success_start = (270.0 - success_arc_deg).to_radians();
    let success_end = 270.0_f64.to_radians();
    let failure_end = (630.0 - success_arc_deg).to_radians();

    // Success zone
    context.begin_path();
    context.set_fill_style_str("#22c55e");
    context.move_to(center_x, center_y);
    let _ = context.arc(center_x, center_y, radius, success_start, success_end);
    context.fill();

    // Failure zone
    context.begin_path();
    context.set_fill_style_str(if is_dark_mode { "#7f1d1d" } else { "#ef4444" });
    context.move_to(center_x, center_y);
    let _ = context.arc(center_x, center_y, radius, success_end, failure_end);
    context.fill();

    // Zone boundaries
    if success_arc_deg > 0.0 && success_arc_deg < 360.0 {
        for angle in [success_start, success_end] {
            context.begin_path();
            context.set_stroke_style_str("rgba(255, 255, 255, 0.9)");
            context.set_line_width(2.5);
            context.move_to(center_x, center_y);
            context.line_to(
                center_x + radius * angle.cos(),
                center_y + radius * angle.sin(),
            );
            context.stroke();
        }
    }

    // Zone labels, skipped for slivers where they would overflow the arc
    context.set_text_align("center");
    context.set_text_baseline("middle");
    context.set_fill_style_str("#ffffff");
    context.set_font("bold 22px 'Segoe UI', Roboto, system-ui, sans-serif");
    context.set_shadow_color("rgba(0, 0, 0, 0.5)");
    context.set_shadow_blur(3.0);

    if success_arc_deg >= 30.0 {
        let mid = (270.0 - success_arc_deg / 2.0).to_radians();
        context.save();
        let _ = context.translate(center_x + radius * 0.6 * mid.cos(), center_y + radius * 0.6 * mid.sin());
        let _ = context.fill_text("WIN", 0.0, 0.0);
        context.restore();
    }
    if success_arc_deg <= 330.0 {
        let mid = (270.0 + (360.0 - success_arc_deg) / 2.0).to_radians();
        context.save();
        let _ = context.translate(center_x + radius * 0.6 * mid.cos(), center_y + radius * 0.6 * mid.sin());
        let _ = context.fill_text("LOSE", 0.0, 0.0);
        context.restore();
    }

    context.set_shadow_color("rgba(0, 0, 0, 0)");
    context.set_shadow_blur(0.0);
    context.restore();

    // Hub, drawn after restore so it does not rotate
    context.begin_path();
    context.set_fill_style_str(if is_dark_mode { "#1f2937" } else { "#f9fafb" });
    let _ = context.arc(center_x, center_y, radius * 0.22, 0.0, 2.0 * PI);
    context.fill();
    context.begin_path();
    context.set_stroke_style_str(if is_dark_mode { "rgba(255,255,255,0.2)" } else { "rgba(0,0,0,0.15)" });
    context.set_line_width(2.0);
    let _ = context.arc(center_x, center_y, radius * 0.22, 0.0, 2.0 * PI);
    context.stroke();

    // Outer ring
    context.begin_path();
    context.set_stroke_style_str("rgba(245, 158, 11, 0.6)");
    context.set_line_width(4.0);
    let _ = context.arc(center_x, center_y, radius - 2.0, 0.0, 2.0 * PI);
    context.stroke();

    // Fixed pointer at the top
    context.set_shadow_color("rgba(245, 158, 11, 0.6)");
    context.set_shadow_blur(if is_spinning { 10.0 } else { 4.0 });
    context.begin_path();
    context.move_to(center_x, center_y - radius + 8.0);
    context.line_to(center_x - 14.0, center_y - radius - 18.0);
    context.line_to(center_x + 14.0, center_y - radius - 18.0);
    context.close_path();
    context.set_fill_style_str(if is_spinning { "#ffd700" } else { "#f59e0b" });
    context.fill();
    context.set_stroke_style_str("#e69500");
    context.set_line_width(1.5);
    context.stroke();
    context.set_shadow_color("rgba(0, 0, 0, 0)");
    context.set_shadow_blur(0.0);
}
