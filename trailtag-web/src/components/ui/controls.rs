use wasm_bindgen::JsCast;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct Props {
    pub demo_mode: bool,
    pub on_demo_toggle: Callback<bool>,
    pub on_reset: Callback<()>,
}

#[function_component(ControlsBar)]
pub fn controls_bar(props: &Props) -> Html {
    let on_demo_change = {
        let on_demo_toggle = props.on_demo_toggle.clone();
        Callback::from(move |e: web_sys::Event| {
            if let Some(input) = e
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            {
                on_demo_toggle.emit(input.checked());
            }
        })
    };
    let on_reset = {
        let cb = props.on_reset.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {
        <section class="panel controls-bar" aria-label="Trail controls">
            <label class="demo-toggle" for="demo-mode">
                <input
                    id="demo-mode"
                    type="checkbox"
                    checked={props.demo_mode}
                    onchange={on_demo_change}
                />
                { "Demo mode (skip the location check)" }
            </label>
            <button class="btn secondary" id="reset-btn" onclick={on_reset}>
                { "Reset progress" }
            </button>
        </section>
    }
}
