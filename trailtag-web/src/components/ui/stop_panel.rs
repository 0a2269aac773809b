use trailtag_core::Stop;
use yew::prelude::*;

/// Tone of the status line under the actions.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Success,
    Error,
    Info,
}

/// A user-facing message about the latest action, always paired with an
/// actionable next step when something went wrong.
#[derive(Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub tone: StatusTone,
    pub text: String,
}

impl StatusLine {
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            tone: StatusTone::Success,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            tone: StatusTone::Error,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            tone: StatusTone::Info,
            text: text.into(),
        }
    }
}

const fn tone_class(tone: StatusTone) -> &'static str {
    match tone {
        StatusTone::Success => "status-success",
        StatusTone::Error => "status-error",
        StatusTone::Info => "status-info",
    }
}

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub stop: Stop,
    pub unlocked: bool,
    /// A location request for this stop is outstanding.
    pub pending: bool,
    #[prop_or_default]
    pub status: Option<StatusLine>,
    pub on_check_in: Callback<String>,
    pub on_skip: Callback<String>,
    pub on_clear_badge: Callback<String>,
}

#[function_component(StopPanel)]
pub fn stop_panel(props: &Props) -> Html {
    let stop = &props.stop;
    let check_in_label = if props.pending {
        "Locating..."
    } else if props.unlocked {
        "Check in again"
    } else {
        "Check in"
    };

    let on_check_in = {
        let cb = props.on_check_in.clone();
        let id = stop.id.clone();
        Callback::from(move |_| cb.emit(id.clone()))
    };
    let on_skip = {
        let cb = props.on_skip.clone();
        let id = stop.id.clone();
        Callback::from(move |_| cb.emit(id.clone()))
    };
    let on_clear = {
        let cb = props.on_clear_badge.clone();
        let id = stop.id.clone();
        Callback::from(move |_| cb.emit(id.clone()))
    };

    html! {
        <section class="panel current-stop" aria-label="Current stop">
            <div class="hero">
                <div class="emblem" aria-hidden="true">{ &stop.emblem }</div>
                <div>
                    <h2>{ format!("#{} {}", stop.ordinal + 1, stop.name) }</h2>
                    <div class="meta">{ &stop.kind }</div>
                    <p>{ &stop.description }</p>
                </div>
            </div>
            <div class="actions">
                <button class="btn" id="check-in-btn" disabled={props.pending} onclick={on_check_in}>
                    { check_in_label }
                </button>
                { if props.unlocked {
                    html! {
                        <button class="btn secondary" id="clear-badge-btn" onclick={on_clear}>
                            { "Clear badge" }
                        </button>
                    }
                } else {
                    html! {
                        <button class="btn secondary" id="skip-btn" onclick={on_skip}>
                            { "Skip" }
                        </button>
                    }
                } }
            </div>
            { props.status.as_ref().map_or_else(Html::default, |status| html! {
                <p class={classes!("status-line", tone_class(status.tone))} role="status" aria-live="polite">
                    { status.text.clone() }
                </p>
            }) }
            <div class="hint"><b>{ "Next hint: " }</b>{ &stop.hint }</div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use trailtag_core::StopCatalog;
    use yew::LocalServerRenderer;

    fn fixture_stop() -> Stop {
        let catalog = StopCatalog::from_json(
            r#"[
                {"id": "old-oak", "lat": 51.5066, "lng": -0.1721, "name": "The Old Oak",
                 "short": "Oak", "type": "English oak",
                 "desc": "A three-hundred-year-old oak.",
                 "hint": "Follow the gravel path past the bandstand.",
                 "emblem": "X"}
            ]"#,
        )
        .unwrap();
        catalog.get("old-oak").unwrap().clone()
    }

    #[test]
    fn stop_panel_renders_detail_and_hint() {
        let props = Props {
            stop: fixture_stop(),
            unlocked: false,
            pending: false,
            status: None,
            on_check_in: Callback::noop(),
            on_skip: Callback::noop(),
            on_clear_badge: Callback::noop(),
        };
        let html = block_on(LocalServerRenderer::<StopPanel>::with_props(props).render());
        assert!(html.contains("#1 The Old Oak"), "heading should render: {html}");
        assert!(html.contains("English oak"), "kind should render: {html}");
        assert!(
            html.contains("Follow the gravel path"),
            "hint should render: {html}"
        );
        assert!(html.contains("Check in"), "check-in action should render: {html}");
        assert!(html.contains("Skip"), "skip action should render: {html}");
        assert!(
            !html.contains("Clear badge"),
            "a locked stop has no clear action: {html}"
        );
    }

    #[test]
    fn stop_panel_swaps_actions_once_unlocked() {
        let props = Props {
            stop: fixture_stop(),
            unlocked: true,
            pending: false,
            status: Some(StatusLine::success("Badge unlocked: The Old Oak!")),
            on_check_in: Callback::noop(),
            on_skip: Callback::noop(),
            on_clear_badge: Callback::noop(),
        };
        let html = block_on(LocalServerRenderer::<StopPanel>::with_props(props).render());
        assert!(html.contains("Check in again"), "re-check-in should render: {html}");
        assert!(html.contains("Clear badge"), "clear action should render: {html}");
        assert!(
            html.contains("Badge unlocked: The Old Oak!"),
            "status line should render: {html}"
        );
        assert!(html.contains("status-success"), "tone class should render: {html}");
    }

    #[test]
    fn stop_panel_disables_check_in_while_locating() {
        let props = Props {
            stop: fixture_stop(),
            unlocked: false,
            pending: true,
            status: None,
            on_check_in: Callback::noop(),
            on_skip: Callback::noop(),
            on_clear_badge: Callback::noop(),
        };
        let html = block_on(LocalServerRenderer::<StopPanel>::with_props(props).render());
        assert!(html.contains("Locating..."), "pending label should render: {html}");
        assert!(html.contains("disabled"), "button should be disabled: {html}");
    }
}
