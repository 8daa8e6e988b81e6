use yew::prelude::*;
use gloo_timers::callback::Timeout;
use shared::{Team, TallyView, NEUTRAL};
use crate::{api, live::TallySubscription, styles::*};
use crate::config::CONFIG;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub nickname: String,
}

fn bar_color(progress: f64) -> &'static str {
    if progress < NEUTRAL { RED_FILL } else { BLUE_FILL }
}

#[function_component(Arena)]
pub fn arena(props: &Props) -> Html {
    let tally = use_state(TallyView::default);
    let live_error = use_state(|| None::<String>);
    let vote_error = use_state(|| None::<String>);

    {
        let tally = tally.clone();
        let live_error = live_error.clone();
        use_effect_with_deps(move |_| {
            let on_tally = {
                let live_error = live_error.clone();
                Callback::from(move |view: TallyView| {
                    live_error.set(None);
                    tally.set(view);
                })
            };
            let on_error = Callback::from(move |message: String| live_error.set(Some(message)));

            let subscription = TallySubscription::open(&api::tally_stream_url(), on_tally, on_error);
            move || drop(subscription)
        }, ());
    }

    // one pending dismissal; replacing it cancels the previous one
    let dismiss = use_mut_ref(|| None::<Timeout>);

    let vote = |team: Team| {
        let nickname = props.nickname.clone();
        let vote_error = vote_error.clone();
        let dismiss = dismiss.clone();
        Callback::from(move |_: MouseEvent| {
            let nickname = nickname.clone();
            let vote_error = vote_error.clone();
            let dismiss = dismiss.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = api::cast_vote(team, &nickname).await {
                    vote_error.set(Some(format!("Your vote was not counted: {}", e)));
                    let vote_error = vote_error.clone();
                    *dismiss.borrow_mut() =
                        Some(Timeout::new(CONFIG.vote_error_ms, move || vote_error.set(None)));
                }
            });
        })
    };

    let progress = tally.progress.clamp(0.0, 1.0);

    html! {
        <div class={CONTAINER}>
            <h1 class={HEADING_LG}>{format!("Hello, {}!", props.nickname)}</h1>

            {if let Some(error) = &*live_error {
                html! { <div class={alert_style("warning")}>{error}</div> }
            } else { html! {} }}
            {if let Some(error) = &*vote_error {
                html! { <div class={alert_style("error")}>{error}</div> }
            } else { html! {} }}

            <div class={FLEX_BETWEEN}>
                <span class={combine_classes(TEAM_TEXT, RED_TEXT)}>{format!("Red: {}", tally.red_count)}</span>
                <span class={combine_classes(TEAM_TEXT, BLUE_TEXT)}>{format!("Blue: {}", tally.blue_count)}</span>
            </div>

            <div class={PROGRESS_TRACK}>
                <div
                    class={combine_classes(PROGRESS_FILL, bar_color(progress))}
                    style={format!("width: {:.1}%", progress * 100.0)}
                />
            </div>

            <div class="flex justify-around my-8">
                <button class={combine_classes(ROUND_BUTTON, RED_FILL)} onclick={vote(Team::Red)}>{"RED"}</button>
                <button class={combine_classes(ROUND_BUTTON, BLUE_FILL)} onclick={vote(Team::Blue)}>{"BLUE"}</button>
            </div>

            <p class={combine_classes(TEXT_MUTED, "text-center text-base")}>
                {format!("Total clicks: {}", tally.total_count)}
            </p>
        </div>
    }
}
