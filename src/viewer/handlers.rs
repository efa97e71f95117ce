//! Request handlers for the log viewer routes.

use std::path::PathBuf;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tokio::time::MissedTickBehavior;

use crate::config::ViewerConfig;
use crate::manager::LoggerManager;
use crate::viewer::reader::{read_tail, render_lines};
use crate::viewer::{page, ViewerState, FALLBACK_LOGGER, MAX_TAIL_LINES, NO_LOGFILE, WS_PATH};

#[derive(Debug, Default, Deserialize)]
pub struct LoggerQuery {
    pub logger: Option<String>,
    pub lines: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TailResponse {
    pub logger: String,
    pub file: String,
    pub lines: Vec<String>,
}

/// `{prefix}` → `{prefix}/`, keeping the query string.
pub async fn redirect_to_slash(uri: Uri) -> Redirect {
    let target = match uri.query() {
        Some(query) => format!("{}/?{}", uri.path(), query),
        None => format!("{}/", uri.path()),
    };
    Redirect::temporary(&target)
}

pub async fn index(State(state): State<ViewerState>) -> Html<String> {
    Html(page::render(&state.manager.loggers_with_logfiles(), WS_PATH))
}

pub async fn logger_names(State(state): State<ViewerState>) -> Json<Vec<String>> {
    Json(state.manager.loggers_with_logfiles().into_keys().collect())
}

pub async fn tail(
    State(state): State<ViewerState>,
    Query(query): Query<LoggerQuery>,
) -> Response {
    let Some(logger) = query.logger else {
        return error_response(StatusCode::BAD_REQUEST, "missing `logger` query parameter");
    };
    let Some(file) = state.manager.logfile_for(&logger) else {
        return error_response(
            StatusCode::NOT_FOUND,
            &format!("no logfile configured for logger `{logger}`"),
        );
    };

    let count = query.lines.unwrap_or(state.config.tail_lines).min(MAX_TAIL_LINES);
    match read_tail(&file, count).await {
        Ok(lines) => Json(TailResponse {
            logger,
            file: file.display().to_string(),
            lines,
        })
        .into_response(),
        Err(e) => {
            tracing::warn!(file = %file.display(), error = %e, "Failed to read log file");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "failed to read log file")
        }
    }
}

pub async fn log_socket(
    ws: WebSocketUpgrade,
    State(state): State<ViewerState>,
    Query(query): Query<LoggerQuery>,
) -> Response {
    let logfile = resolve_logfile(&state.manager, query.logger.as_deref());
    tracing::debug!(logger = ?query.logger, file = ?logfile, "Log viewer connected");
    ws.on_upgrade(move |socket| stream_log(socket, logfile, state.config))
}

/// File for `logger`, falling back to the application logger's file.
pub fn resolve_logfile(manager: &LoggerManager, logger: Option<&str>) -> Option<PathBuf> {
    logger
        .and_then(|name| manager.logfile_for(name))
        .or_else(|| manager.logfile_for(FALLBACK_LOGGER))
}

/// Push the tail of `logfile` to the client once per poll interval until it
/// disconnects.
async fn stream_log(mut socket: WebSocket, logfile: Option<PathBuf>, config: ViewerConfig) {
    let mut ticker = tokio::time::interval(config.poll_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => continue,
            },
        }

        let payload = match &logfile {
            None => NO_LOGFILE.to_string(),
            Some(path) => match read_tail(path, config.tail_lines).await {
                Ok(lines) => render_lines(&lines),
                Err(e) => {
                    tracing::warn!(file = %path.display(), error = %e, "Failed to read log file");
                    break;
                }
            },
        };

        if socket.send(Message::Text(payload.into())).await.is_err() {
            break;
        }
    }

    tracing::debug!("Log viewer disconnected");
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}
