use std::cell::RefCell;
use std::rc::Rc;

use yew::prelude::*;

use crate::components::footer::Footer;
use crate::components::ui::badge_grid::BadgeGrid;
use crate::components::ui::controls::ControlsBar;
use crate::components::ui::progress_bar::ProgressBar;
use crate::components::ui::stop_map::StopMap;
use crate::components::ui::stop_panel::{StatusLine, StopPanel};
use crate::dom;
use crate::geoloc;
use crate::trail::{
    CHECK_IN_RADIUS_M, CheckInError, CheckInOutcome, Snapshot, Started, Stop, TrailState,
    WebProgressStorage, WebStorageError, create_web_engine,
};

type WebTrail = TrailState<WebProgressStorage>;
/// Single owner of the application state. Callbacks mutate it in place
/// and then ask for a re-render, so a render right after a mutation
/// always observes it; the async gap of a location request cannot lose
/// interleaved updates.
type TrailCell = Rc<RefCell<Result<WebTrail, anyhow::Error>>>;

fn check_in_error_text(err: &CheckInError<WebStorageError>) -> String {
    match err {
        CheckInError::CapabilityUnavailable => {
            "Geolocation is not supported here. Enable demo mode to check in anyway.".to_string()
        }
        CheckInError::RequestPending(_) => {
            "Still waiting for a location fix for this stop.".to_string()
        }
        CheckInError::Location { reason } => {
            format!("Location error: {reason}. Allow location permission, or use demo mode.")
        }
        CheckInError::UnknownStop(id) => format!("Stop `{id}` is not on this trail."),
        CheckInError::Progress(err) => format!("Your progress could not be saved: {err}"),
    }
}

#[function_component(App)]
pub fn app() -> Html {
    // The embedded catalog and localStorage are both synchronous, so the
    // whole boot happens in the first render.
    let trail: TrailCell = use_mut_ref(|| create_web_engine().load());
    let status = use_state(|| None::<StatusLine>);

    // Mutations go through the cell, not through state handles, so the
    // completion of an in-flight location request sees every change made
    // while it was outstanding. This callback schedules the re-render.
    let revision = use_state(|| 0_u32);
    let redraw = {
        let revision = revision.clone();
        Callback::from(move |()| revision.set(revision.wrapping_add(1)))
    };

    let on_select = {
        let trail = trail.clone();
        let status = status.clone();
        let redraw = redraw.clone();
        Callback::from(move |stop_id: String| {
            if let Ok(state) = trail.borrow_mut().as_mut() {
                state.select_stop(&stop_id);
            }
            status.set(None);
            redraw.emit(());
        })
    };

    let on_demo_toggle = {
        let trail = trail.clone();
        let status = status.clone();
        let redraw = redraw.clone();
        Callback::from(move |enabled: bool| {
            if let Ok(state) = trail.borrow_mut().as_mut() {
                state.set_demo_mode(enabled);
            }
            status.set(enabled.then(|| {
                StatusLine::info("Demo mode is on. Check-ins will skip the location check.")
            }));
            redraw.emit(());
        })
    };

    let on_reset = {
        let trail = trail.clone();
        let status = status.clone();
        let redraw = redraw.clone();
        Callback::from(move |()| {
            if !dom::confirm("Clear your progress on this device?") {
                return;
            }
            if let Ok(state) = trail.borrow_mut().as_mut() {
                match state.reset() {
                    Ok(()) => status.set(Some(StatusLine::info("Progress cleared."))),
                    Err(err) => status.set(Some(StatusLine::error(format!(
                        "Your progress could not be cleared: {err}"
                    )))),
                }
            }
            redraw.emit(());
        })
    };

    let on_skip = {
        let trail = trail.clone();
        let status = status.clone();
        let redraw = redraw.clone();
        Callback::from(move |stop_id: String| {
            if !dom::confirm("Skip the location check for this stop?") {
                return;
            }
            if let Ok(state) = trail.borrow_mut().as_mut() {
                let stop_name = state
                    .catalog()
                    .get(&stop_id)
                    .map_or_else(|| stop_id.clone(), |stop| stop.name.clone());
                match state.skip(&stop_id) {
                    Ok(()) => status.set(Some(StatusLine::success(format!(
                        "Badge unlocked: {stop_name} (skipped)."
                    )))),
                    Err(err) => status.set(Some(StatusLine::error(check_in_error_text(&err)))),
                }
            }
            redraw.emit(());
        })
    };

    let on_clear_badge = {
        let trail = trail.clone();
        let status = status.clone();
        let redraw = redraw.clone();
        Callback::from(move |stop_id: String| {
            if let Ok(state) = trail.borrow_mut().as_mut() {
                match state.clear_badge(&stop_id) {
                    Ok(()) => status.set(Some(StatusLine::info(
                        "Badge cleared. Check in again to earn it back.",
                    ))),
                    Err(err) => status.set(Some(StatusLine::error(format!(
                        "The badge could not be cleared: {err}"
                    )))),
                }
            }
            redraw.emit(());
        })
    };

    let on_check_in = {
        let trail = trail.clone();
        let status = status.clone();
        let redraw = redraw.clone();
        Callback::from(move |stop_id: String| {
            let capability = geoloc::capability_available();
            let started = {
                let mut guard = trail.borrow_mut();
                let Ok(state) = guard.as_mut() else { return };
                state.begin_check_in(&stop_id, capability)
            };
            match started {
                Ok(Started::Unlocked { stop_name }) => {
                    status.set(Some(StatusLine::success(format!(
                        "Badge unlocked: {stop_name}!"
                    ))));
                }
                Ok(Started::AwaitingFix(request)) => {
                    status.set(Some(StatusLine::info("Waiting for a location fix...")));
                    let trail = trail.clone();
                    let status = status.clone();
                    let redraw = redraw.clone();
                    wasm_bindgen_futures::spawn_local(async move {
                        let fix = geoloc::current_position(request).await;
                        let outcome = {
                            let mut guard = trail.borrow_mut();
                            let Ok(state) = guard.as_mut() else { return };
                            state.complete_check_in(&stop_id, fix)
                        };
                        match outcome {
                            Ok(CheckInOutcome::Unlocked { stop_name }) => {
                                log::info!("stop {stop_id} unlocked by proximity");
                                status.set(Some(StatusLine::success(format!(
                                    "Badge unlocked: {stop_name}!"
                                ))));
                            }
                            Ok(CheckInOutcome::TooFar { distance_m }) => {
                                status.set(Some(StatusLine::error(format!(
                                    "You are {distance_m} m away. Move within {CHECK_IN_RADIUS_M} m of the stop, or enable demo mode."
                                ))));
                            }
                            Err(err) => {
                                log::warn!("check-in for {stop_id} failed: {err}");
                                status.set(Some(StatusLine::error(check_in_error_text(&err))));
                            }
                        }
                        redraw.emit(());
                    });
                }
                Err(err) => {
                    status.set(Some(StatusLine::error(check_in_error_text(&err))));
                }
            }
            redraw.emit(());
        })
    };

    // One coherent read of the state per render; all four views are
    // rebuilt from it together.
    let boot: Result<(Snapshot, Option<Stop>, Rc<Vec<Stop>>, bool), String> = {
        let mut guard = trail.borrow_mut();
        match guard.as_mut() {
            Ok(state) if state.catalog().is_empty() => {
                Err("The stops dataset is empty.".to_string())
            }
            Ok(state) => {
                let snapshot = state.snapshot();
                let current = snapshot
                    .current_stop_id
                    .as_deref()
                    .and_then(|id| state.catalog().get(id))
                    .cloned();
                let stops: Rc<Vec<Stop>> = Rc::new(state.catalog().stops().to_vec());
                let demo = state.demo_mode();
                Ok((snapshot, current, stops, demo))
            }
            Err(err) => Err(format!("{err:#}")),
        }
    };

    let main_view = match boot {
        Err(detail) => {
            dom::console_error(&detail);
            html! {
                <section class="panel catalog-error" role="alert">
                    <h2>{ "The trail could not be loaded" }</h2>
                    <p>{ detail }</p>
                    <p class="muted">{ "Check the stops data file and reload the page." }</p>
                </section>
            }
        }
        Ok((snapshot, current, stops, demo)) => {
            let panel = current.map_or_else(Html::default, |stop| {
                let badge = snapshot.badges.iter().find(|b| b.id == stop.id);
                let unlocked = badge.is_some_and(|b| b.unlocked);
                let pending = badge.is_some_and(|b| b.pending);
                html! {
                    <StopPanel
                        stop={stop}
                        unlocked={unlocked}
                        pending={pending}
                        status={(*status).clone()}
                        on_check_in={on_check_in.clone()}
                        on_skip={on_skip.clone()}
                        on_clear_badge={on_clear_badge.clone()}
                    />
                }
            });
            html! {
                <>
                    <ProgressBar
                        unlocked={snapshot.unlocked}
                        total={snapshot.total}
                        percent={snapshot.percent}
                    />
                    { panel }
                    <BadgeGrid
                        stops={stops.clone()}
                        snapshot={snapshot.clone()}
                        on_select={on_select.clone()}
                    />
                    <StopMap
                        stops={stops}
                        snapshot={snapshot}
                        on_select={on_select}
                    />
                    <ControlsBar
                        demo_mode={demo}
                        on_demo_toggle={on_demo_toggle}
                        on_reset={on_reset}
                    />
                </>
            }
        }
    };

    html! {
        <main id="main" role="main">
            <header class="app-header">
                <h1>{ "Trailtag" }</h1>
                <p class="muted">{ "Visit every stop on the trail to collect its badge." }</p>
            </header>
            { main_view }
            <Footer />
        </main>
    }
}
