use yew::prelude::*;

#[derive(Properties, Clone, PartialEq, Eq)]
pub struct Props {
    pub unlocked: usize,
    pub total: usize,
    pub percent: u8,
}

#[function_component(ProgressBar)]
pub fn progress_bar(props: &Props) -> Html {
    html! {
        <section class="panel progress-panel" aria-label="Trail progress">
            <div class="bar-wrap" role="progressbar" aria-valuemin="0" aria-valuemax="100" aria-valuenow={props.percent.to_string()}>
                <div class="bar-fill" style={format!("width:{}%", props.percent)} />
            </div>
            <p class="progress-text" aria-live="polite">
                { format!("{} / {} badges", props.unlocked, props.total) }
            </p>
        </section>
    }
}
