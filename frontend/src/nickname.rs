use yew::prelude::*;
use yew_router::prelude::*;
use web_sys::HtmlInputElement;
use shared::validate_nickname;
use crate::{api, Route, styles::*};

#[function_component(Nickname)]
pub fn nickname() -> Html {
    let input = use_node_ref();
    let error = use_state(|| None::<String>);
    let saving = use_state(|| false);
    let navigator = use_navigator();

    let onsubmit = {
        let input = input.clone();
        let error = error.clone();
        let saving = saving.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *saving {
                return;
            }

            let value = input
                .cast::<HtmlInputElement>()
                .map(|el| el.value())
                .unwrap_or_default();

            let nickname = match validate_nickname(&value) {
                Ok(nickname) => nickname.to_string(),
                Err(e) => {
                    error.set(Some(e.to_string()));
                    return;
                }
            };

            saving.set(true);
            let error = error.clone();
            let saving = saving.clone();
            let navigator = navigator.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match api::register(&nickname).await {
                    Ok(participant) => {
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Arena { nickname: participant.nickname });
                        }
                    }
                    Err(e) => error.set(Some(format!("Error saving nickname: {}", e))),
                }
                saving.set(false);
            });
        })
    };

    html! {
        <div class={CARD}>
            <form {onsubmit} class={SPACE_Y_BASE}>
                <label class={TEXT_LABEL} for="nickname">{"Your nickname"}</label>
                <input
                    id="nickname"
                    ref={input}
                    class={INPUT_BASE}
                    placeholder="Enter your nickname"
                    autocomplete="off"
                />
                {if let Some(error) = &*error {
                    html! { <p class={TEXT_ERROR}>{error}</p> }
                } else { html! {} }}
                <button type="submit" class={button_primary(true)} disabled={*saving}>
                    {if *saving { "Saving..." } else { "Start Game" }}
                </button>
            </form>
        </div>
    }
}
