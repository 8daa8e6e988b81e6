use shared::TallyView;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Event, EventSource, MessageEvent};
use yew::Callback;

/// Open tally stream. Dropping it closes the `EventSource` so the server
/// releases its count subscriptions.
pub struct TallySubscription {
    source: Option<EventSource>,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_error: Closure<dyn FnMut(Event)>,
}

impl TallySubscription {
    pub fn open(url: &str, on_tally: Callback<TallyView>, on_error: Callback<String>) -> Self {
        let on_message = {
            let on_error = on_error.clone();
            Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
                let Some(text) = event.data().as_string() else { return };
                match serde_json::from_str::<TallyView>(&text) {
                    Ok(view) => on_tally.emit(view),
                    Err(e) => on_error.emit(format!("Bad tally update: {}", e)),
                }
            })
        };

        let on_stream_error = {
            let on_error = on_error.clone();
            Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                // EventSource reconnects by itself; counts stay at the last value
                on_error.emit("Live updates interrupted, reconnecting...".into());
            })
        };

        let source = match EventSource::new(url) {
            Ok(source) => {
                source.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
                source.set_onerror(Some(on_stream_error.as_ref().unchecked_ref()));
                Some(source)
            }
            Err(_) => {
                on_error.emit("Live updates are unavailable".into());
                None
            }
        };

        Self {
            source,
            _on_message: on_message,
            _on_error: on_stream_error,
        }
    }
}

impl Drop for TallySubscription {
    fn drop(&mut self) {
        if let Some(source) = self.source.take() {
            source.set_onmessage(None);
            source.set_onerror(None);
            source.close();
        }
    }
}
