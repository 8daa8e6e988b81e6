use gloo_net::http::{Request, Response};
use serde::{de::DeserializeOwned, Serialize};
use shared::{CastVoteRequest, ErrorResponse, Participant, RegisterRequest, Team, VoteReceipt};
use crate::config::CONFIG;

async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, String> {
    let response = Request::post(&format!("{}{}", CONFIG.api_base_url, path))
        .json(body)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.ok() {
        response.json::<T>().await.map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(error_message(response).await)
    }
}

async fn error_message(response: Response) -> String {
    let status = response.status();
    match response.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => format!("Request failed with status {}", status),
    }
}

pub async fn register(nickname: &str) -> Result<Participant, String> {
    post_json("/participants", &RegisterRequest { nickname: nickname.to_string() }).await
}

pub async fn cast_vote(team: Team, display_name: &str) -> Result<VoteReceipt, String> {
    let request = CastVoteRequest {
        team,
        display_name: Some(display_name.to_string()),
    };
    post_json("/votes", &request).await
}

pub fn tally_stream_url() -> String {
    format!("{}/tally/stream", CONFIG.api_base_url)
}
