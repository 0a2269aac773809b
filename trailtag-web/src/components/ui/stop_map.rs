use std::rc::Rc;

use trailtag_core::{Snapshot, Stop};
use yew::prelude::*;

const MAP_WIDTH: f64 = 420.0;
const MAP_HEIGHT: f64 = 300.0;
const MAP_MARGIN: f64 = 28.0;
/// Floor on the coordinate span so a single-stop trail still projects
/// to the middle of the map instead of dividing by zero.
const MIN_SPAN_DEG: f64 = 0.000_5;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub stops: Rc<Vec<Stop>>,
    pub snapshot: Snapshot,
    pub on_select: Callback<String>,
}

/// Project catalog coordinates into map space, north up.
fn marker_positions(stops: &[Stop]) -> Vec<(f64, f64)> {
    let mut min_lat = f64::INFINITY;
    let mut max_lat = f64::NEG_INFINITY;
    let mut min_lng = f64::INFINITY;
    let mut max_lng = f64::NEG_INFINITY;
    for stop in stops {
        min_lat = min_lat.min(stop.lat);
        max_lat = max_lat.max(stop.lat);
        min_lng = min_lng.min(stop.lng);
        max_lng = max_lng.max(stop.lng);
    }
    let lat_span = (max_lat - min_lat).max(MIN_SPAN_DEG);
    let lng_span = (max_lng - min_lng).max(MIN_SPAN_DEG);
    let lat_center = (min_lat + max_lat) / 2.0;
    let lng_center = (min_lng + max_lng) / 2.0;

    let usable_w = MAP_WIDTH - 2.0 * MAP_MARGIN;
    let usable_h = MAP_HEIGHT - 2.0 * MAP_MARGIN;
    stops
        .iter()
        .map(|stop| {
            let x = MAP_WIDTH / 2.0 + (stop.lng - lng_center) / lng_span * usable_w;
            let y = MAP_HEIGHT / 2.0 - (stop.lat - lat_center) / lat_span * usable_h;
            (x, y)
        })
        .collect()
}

#[function_component(StopMap)]
pub fn stop_map(props: &Props) -> Html {
    let positions = marker_positions(&props.stops);
    let path_points = positions
        .iter()
        .map(|(x, y)| format!("{x:.1},{y:.1}"))
        .collect::<Vec<_>>()
        .join(" ");

    html! {
        <section class="panel stop-map" aria-label="Trail map">
            <svg
                viewBox={format!("0 0 {MAP_WIDTH} {MAP_HEIGHT}")}
                role="img"
                aria-label="Map of trail stops"
            >
                <polyline class="trail-path" points={path_points} fill="none" />
                { for props.stops.iter().zip(positions.iter().copied()).enumerate().map(|(idx, (stop, (x, y)))| {
                    let unlocked = props
                        .snapshot
                        .badges
                        .get(idx)
                        .is_some_and(|badge| badge.unlocked);
                    let is_current =
                        props.snapshot.current_stop_id.as_deref() == Some(stop.id.as_str());
                    let onclick = {
                        let on_select = props.on_select.clone();
                        let id = stop.id.clone();
                        Callback::from(move |_| on_select.emit(id.clone()))
                    };
                    html! {
                        <g
                            class={classes!(
                                "marker",
                                unlocked.then_some("unlocked"),
                                is_current.then_some("current"),
                            )}
                            {onclick}
                        >
                            <title>{ stop.name.clone() }</title>
                            <circle cx={format!("{x:.1}")} cy={format!("{y:.1}")} r={if is_current { "12" } else { "9" }} />
                            <text x={format!("{x:.1}")} y={format!("{:.1}", y + 4.0)} text-anchor="middle">
                                { (stop.ordinal + 1).to_string() }
                            </text>
                        </g>
                    }
                }) }
            </svg>
        </section>
    }
}
