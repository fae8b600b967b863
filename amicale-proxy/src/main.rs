use std::env;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use chrono::Local;
use log::{error, info};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::signal;

use amicale_agenda::{build_agenda, codec, dashboard, Agenda, Event};

mod cache;
mod cli;

use cache::AgendaCache;

// Windows past two years pollute the cache without serving anyone.
const MAX_MONTHS_WINDOW: u32 = 24;

struct AppState {
    cache: Arc<AgendaCache>,
    upstream: String,
    default_months: u32,
}

fn setup_logging() {
    if env::var("LOG").is_err() {
        env::set_var("LOG", "amicale_proxy=info");
    }

    pretty_env_logger::init_custom_env("LOG");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::parse(env::args().skip(1).collect());

    setup_logging();

    let state = Arc::new(AppState {
        cache: AgendaCache::new(args.enable_cache, args.cache_ttl),
        upstream: args.upstream,
        default_months: args.default_months,
    });

    let router = Router::new()
        .route("/agenda", get(handle_agenda))
        .route("/dashboard", get(handle_dashboard))
        .fallback(|| async { Redirect::permanent(env!("CARGO_PKG_REPOSITORY")) })
        .with_state(state);

    let listener = TcpListener::bind(args.address).await?;
    info!("listening at http://{}", args.address);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;

    Ok(())
}

#[derive(Deserialize)]
struct AgendaQuery {
    months: Option<u32>,
    #[serde(default)]
    ics: bool,
}

async fn handle_agenda(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AgendaQuery>,
) -> Response {
    let months = query.months.unwrap_or(state.default_months);
    if months > MAX_MONTHS_WINDOW {
        return (
            StatusCode::BAD_REQUEST,
            format!("months window out of range (max {MAX_MONTHS_WINDOW})"),
        )
            .into_response();
    }

    let agenda = match fetch_agenda(&state, months).await {
        Ok(agenda) => agenda,
        Err(err) => {
            error!("failed to build agenda: {err:#}");
            return (StatusCode::BAD_GATEWAY, "failed to build agenda").into_response();
        }
    };

    if query.ics {
        return (
            [("content-type", "text/calendar")],
            agenda.to_ics().to_string(),
        )
            .into_response();
    }

    Json(agenda.as_ref()).into_response()
}

#[derive(Serialize)]
struct Dashboard {
    today_events: Vec<Event>,
    display_event: Option<Event>,
    display_time: Option<String>,
}

async fn handle_dashboard(State(state): State<Arc<AppState>>) -> Response {
    let agenda = match fetch_agenda(&state, state.default_months).await {
        Ok(agenda) => agenda,
        Err(err) => {
            error!("failed to build dashboard: {err:#}");
            return (StatusCode::BAD_GATEWAY, "failed to build dashboard").into_response();
        }
    };

    let now = Local::now().naive_local();
    let today = agenda.day(now.date());

    let today_events: Vec<Event> = dashboard::future_events(today, now)
        .into_iter()
        .cloned()
        .collect();
    let display_event = dashboard::pick_display_event(&today_events, now).cloned();
    let display_time = display_event.as_ref().map(Event::time_range);

    Json(Dashboard {
        today_events,
        display_event,
        display_time,
    })
    .into_response()
}

async fn fetch_agenda(state: &AppState, months: u32) -> Result<Arc<Agenda>> {
    if let Some(agenda) = state.cache.get(months).await {
        return Ok(agenda);
    }

    let events: Vec<Event> = reqwest::get(&state.upstream)
        .await
        .context("upstream request failed")?
        .error_for_status()
        .context("upstream answered with an error status")?
        .json()
        .await
        .context("upstream event list did not decode")?;

    let now = Local::now().naive_local();
    let agenda = build_agenda(events, months, now)
        .ok_or_else(|| anyhow!("agenda window of {months} months is invalid"))?;

    if let (Some(first), Some(last)) = (
        agenda.days.keys().next().copied(),
        agenda.days.keys().next_back().copied(),
    ) {
        info!(
            "built agenda from {} to {} ({} events)",
            codec::day_key(first),
            codec::day_key(last),
            agenda.events().count()
        );
    }

    Ok(Arc::clone(&state.cache).insert(months, agenda).await)
}
