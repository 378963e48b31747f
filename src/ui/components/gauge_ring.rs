use std::time::Duration;

use dioxus::prelude::*;

use crate::ui::gauge::GaugeTween;
use crate::ui::timer;

const FRAME: Duration = Duration::from_millis(16);

/// Circular gauge that eases toward `value` one frame at a time.
#[component]
pub fn GaugeRing(
    value: f64,
    #[props(default = 0.0)] min: f64,
    #[props(default = 100.0)] max: f64,
    #[props(default = 120.0)] size: f64,
    #[props(default = 10.0)] stroke_width: f64,
    #[props(default = true)] animate: bool,
    #[props(default = "#007BFF".to_string())] color: String,
) -> Element {
    let mut tween = use_signal(move || GaugeTween::new(min, max, animate));

    use_effect(use_reactive!(|value| {
        if tween.write().set_target(value) {
            spawn(async move {
                while tween.write().step() {
                    timer::sleep(FRAME).await;
                }
            });
        }
    }));

    let percent = tween.read().percent();
    let offset = tween.read().dash_offset(size, stroke_width);
    let radius = (size - stroke_width) / 2.0;
    let center = size / 2.0;
    let circumference = 2.0 * std::f64::consts::PI * radius;

    rsx! {
        svg {
            width: "{size}",
            height: "{size}",
            view_box: "0 0 {size} {size}",
            circle {
                cx: "{center}",
                cy: "{center}",
                r: "{radius}",
                fill: "none",
                stroke: "#eee",
                stroke_width: "{stroke_width}",
            }
            circle {
                cx: "{center}",
                cy: "{center}",
                r: "{radius}",
                fill: "none",
                stroke: "{color}",
                stroke_width: "{stroke_width}",
                stroke_dasharray: "{circumference}",
                stroke_dashoffset: "{offset}",
                transform: "rotate(-90 {center} {center})",
            }
            text {
                x: "50%",
                y: "50%",
                text_anchor: "middle",
                dominant_baseline: "central",
                "{percent}%"
            }
        }
    }
}
