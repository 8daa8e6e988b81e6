use yew::prelude::*;
use yew_router::prelude::*;

mod api;
mod arena;
mod config;
mod live;
mod nickname;
mod styles;

use crate::{arena::Arena, nickname::Nickname, styles::*};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")] Home,
    #[at("/play/:nickname")] Arena { nickname: String },
    #[not_found]
    #[at("/404")] NotFound,
}

#[function_component(App)]
fn app() -> Html {
    html! {
        <BrowserRouter>
            <div class="min-h-screen bg-gray-900">
                <Switch<Route> render={switch} />
            </div>
        </BrowserRouter>
    }
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <Nickname /> },
        Route::Arena { nickname } => html! { <Arena {nickname} /> },
        Route::NotFound => html! {
            <div class={CARD}>
                <p class={TEXT_MUTED}>{"Nothing here. "}<Link<Route> to={Route::Home}>{"Pick a nickname"}</Link<Route>></p>
            </div>
        },
    }
}

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
