use std::rc::Rc;

use trailtag_core::{Snapshot, Stop};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub stops: Rc<Vec<Stop>>,
    pub snapshot: Snapshot,
    pub on_select: Callback<String>,
}

#[function_component(BadgeGrid)]
pub fn badge_grid(props: &Props) -> Html {
    html! {
        <section class="panel badge-grid" role="list" aria-label="Badges">
            { for props.stops.iter().enumerate().map(|(idx, stop)| {
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
                    <button
                        type="button"
                        role="listitem"
                        class={classes!(
                            "badge",
                            unlocked.then_some("unlocked"),
                            is_current.then_some("current"),
                        )}
                        aria-pressed={is_current.to_string()}
                        title={stop.name.clone()}
                        {onclick}
                    >
                        <span class="badge-emblem" aria-hidden="true">{ &stop.emblem }</span>
                        <span class="label">{ &stop.short_label }</span>
                    </button>
                }
            }) }
        </section>
    }
}
