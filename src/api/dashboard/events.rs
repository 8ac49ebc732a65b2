//! Server-sent registry change notifications

use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::{Stream, StreamExt};
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};
use tracing::{debug, warn};

use crate::api::state::AppState;
use crate::domain::RegistryEvent;

/// GET /api/events
pub async fn stream_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    debug!("Client subscribed to registry events");

    let stream = BroadcastStream::new(state.model_service.subscribe()).filter_map(|message| {
        let event = match message {
            Ok(event) => to_sse_event(&event),
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                warn!(skipped, "Event subscriber lagged behind");
                None
            }
        };
        futures::future::ready(event.map(Ok))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

fn to_sse_event(event: &RegistryEvent) -> Option<Event> {
    match Event::default().event(event.name()).json_data(event) {
        Ok(sse) => Some(sse),
        Err(e) => {
            warn!(event = event.name(), error = %e, "Failed to encode registry event");
            None
        }
    }
}
