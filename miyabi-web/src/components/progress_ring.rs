use yew::prelude::*;

const RADIUS: f64 = 30.0;

/// Stroke geometry of the ring for `current` out of `total`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    pub percentage: u32,
    pub circumference: f64,
    pub dash_offset: f64,
}

#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // bounded to 0..=100
pub fn ring_geometry(current: u32, total: u32) -> RingGeometry {
    let percentage = if total == 0 {
        0
    } else {
        (f64::from(current.min(total)) / f64::from(total) * 100.0).round() as u32
    };
    let circumference = 2.0 * std::f64::consts::PI * RADIUS;
    RingGeometry {
        percentage,
        circumference,
        dash_offset: circumference - f64::from(percentage) / 100.0 * circumference,
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub current: u32,
    pub total: u32,
}

#[function_component(ProgressRing)]
pub fn progress_ring(props: &Props) -> Html {
    let geometry = ring_geometry(props.current, props.total);
    let label = format!("{} / {}", props.current, props.total);
    html! {
        <div class="relative flex items-center justify-center w-20 h-20"
            role="progressbar"
            aria-valuemin="0"
            aria-valuemax={props.total.to_string()}
            aria-valuenow={props.current.to_string()}
            aria-valuetext={label}>
            <svg class="transform -rotate-90 w-full h-full" aria-hidden="true">
                <circle cx="40" cy="40" r={RADIUS.to_string()} stroke="#e5e5e5" stroke-width="4" fill="transparent" />
                <circle cx="40" cy="40" r={RADIUS.to_string()} stroke="#cf2e2e" stroke-width="4" fill="transparent"
                    stroke-dasharray={format!("{:.3}", geometry.circumference)}
                    stroke-dashoffset={format!("{:.3}", geometry.dash_offset)}
                    stroke-linecap="round"
                    class="transition-all duration-1000 ease-out" />
            </svg>
            <div class="absolute flex flex-col items-center">
                <span class="text-xl font-bold text-stone-800 font-serif leading-none">{ props.current }</span>
                <span class="text-[9px] text-stone-400 font-medium">{ format!("/ {}", props.total) }</span>
            </div>
        </div>
    }
}
