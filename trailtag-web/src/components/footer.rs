use yew::prelude::*;

#[function_component(Footer)]
pub fn footer() -> Html {
    let node = html! {
        <footer>{ "Trailtag. Progress is stored on this device only." }</footer>
    };
    node
}
