use axum::{
    Router,
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
};
use futures::stream::{self, Stream};
use rand::Rng;
use serde::Serialize;
use std::{convert::Infallible, sync::Arc, time::Duration};
use tokio::sync::broadcast;
use tracing::warn;

use crate::api::AppState;

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", content = "payload")]
pub enum NotificationEvent {
    BotCreated {
        bot_id: i32,
        name: String,
    },
    BotUpdated {
        bot_id: i32,
    },
    BotDeleted {
        bot_id: i32,
    },

    CommandCreated {
        bot_id: i32,
        name: String,
    },
    CommandUpdated {
        command_id: i32,
    },
    CommandDeleted {
        command_id: i32,
    },

    InvocationRecorded {
        bot_id: i32,
        command_name: String,
        usage_count: i32,
    },

    Error {
        message: String,
    },
    Info {
        message: String,
    },
}

/// One frame of the live status feed.
#[derive(Clone, Debug, Serialize)]
pub struct StatusFrame {
    pub online: bool,
    pub latency_ms: f64,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/events", get(sse_handler))
        .route("/status/feed", get(status_feed))
}

async fn sse_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.event_bus().subscribe();

    let stream = stream::unfold(rx, |mut rx| async move {
        match rx.recv().await {
            Ok(event) => {
                let json = serde_json::to_string(&event).unwrap_or_default();
                Some((Ok(Event::default().data(json)), rx))
            }
            Err(broadcast::error::RecvError::Lagged(count)) => {
                warn!("Client lagged by {} messages", count);

                Some((
                    Ok(Event::default().event("warning").data("Missed some events")),
                    rx,
                ))
            }
            Err(broadcast::error::RecvError::Closed) => None,
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}

/// Pushes a status frame at a fixed interval for as long as the connection
/// stays open. Each connection gets its own timer; dropping the stream on
/// disconnect cancels it. The latency sample is simulated, there is no real
/// chat-network connection to measure.
async fn status_feed(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let interval_seconds = state.config().read().await.status.interval_seconds;
    let interval = tokio::time::interval(Duration::from_secs(interval_seconds));

    let stream = stream::unfold(interval, |mut interval| async move {
        interval.tick().await;

        let frame = StatusFrame {
            online: true,
            latency_ms: rand::rng().random_range(0.0..100.0),
        };
        let json = serde_json::to_string(&frame).unwrap_or_default();

        Some((Ok(Event::default().event("status").data(json)), interval))
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}
