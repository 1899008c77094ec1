use actix_web::http::StatusCode;
use actix_web::web::{self, Data};
use actix_web::{HttpResponse, Responder};
use chrono::NaiveDate;
use serde_json::json;
use std::collections::HashMap;
use tracing::{error, warn};

use super::forms::{EndForm, StartForm};
use crate::args::validation::parse_date;
use crate::controller::state::AppState;
use crate::error::TrackerError;
use crate::export::history_csv;
use crate::model::{DATE_FORMAT, format_clock, local_now};
use crate::view::{
    render_active_board, render_history_page, render_index_template, render_name_options,
    render_status,
};

/// htmx event fired after any change to the active set.
pub const ROUNDS_CHANGED_EVENT: &str = "roundsChanged";

fn get_param_str<'a>(query: &'a HashMap<String, String>, key: &str) -> &'a str {
    query.get(key).map_or("", |s| s.trim())
}

fn wants_json(query: &HashMap<String, String>) -> bool {
    match get_param_str(query, "json") {
        "1" => true,
        "0" => false,
        other => other.parse().unwrap_or(false),
    }
}

fn status_code_for(err: &TrackerError) -> StatusCode {
    if err.is_user_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

fn log_failure(action: &str, err: &TrackerError) {
    if err.is_user_error() {
        warn!(action, error = %err, "request rejected");
    } else {
        error!(action, error = %err, "storage failure");
    }
}

/// `date=YYYY-MM-DD`, or today when absent.
fn requested_date(query: &HashMap<String, String>) -> Result<NaiveDate, TrackerError> {
    match get_param_str(query, "date") {
        "" => Ok(local_now().date()),
        raw => parse_date(raw).map_err(TrackerError::InvalidInput),
    }
}

fn html(markup: maud::Markup) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html")
        .body(markup.into_string())
}

fn status_response(action: &str, outcome: Result<String, TrackerError>) -> HttpResponse {
    let mut builder = match &outcome {
        Ok(_) => {
            let mut ok = HttpResponse::Ok();
            ok.insert_header(("HX-Trigger", ROUNDS_CHANGED_EVENT));
            ok
        }
        Err(e) => {
            log_failure(action, e);
            HttpResponse::build(status_code_for(e))
        }
    };
    builder
        .content_type("text/html")
        .body(render_status(&outcome).into_string())
}

fn error_json(err: &TrackerError) -> HttpResponse {
    HttpResponse::build(status_code_for(err)).json(json!({"error": err.to_string()}))
}

pub async fn index(state: Data<AppState>) -> impl Responder {
    html(render_index_template(state.refresh_secs, local_now().date()))
}

pub async fn start_round(state: Data<AppState>, form: web::Form<StartForm>) -> impl Responder {
    let outcome = async {
        let attributes = form.attributes()?;
        let start = form.start_time()?.resolve(local_now());
        let mut tracker = state.tracker.lock().await;
        let round = tracker.start_round(&form.name, attributes, start)?;
        Ok::<_, TrackerError>(format!(
            "Started round for {} at {}",
            round.golfer_name,
            format_clock(&round.start_time)
        ))
    }
    .await;
    status_response("start", outcome)
}

pub async fn end_round(state: Data<AppState>, form: web::Form<EndForm>) -> impl Responder {
    let outcome = async {
        let end = form.end_time()?.resolve(local_now());
        let mut tracker = state.tracker.lock().await;
        let round = tracker.end_round(&form.name, end)?;
        Ok::<_, TrackerError>(format!(
            "Ended round for {} after {}",
            round.golfer_name,
            round.elapsed.unwrap_or_default()
        ))
    }
    .await;
    status_response("end", outcome)
}

pub async fn active(
    state: Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let board = state.tracker.lock().await.active_board(local_now());
    match board {
        Ok(board) if wants_json(&query) => HttpResponse::Ok().json(board),
        Ok(board) => html(render_active_board(&board)),
        Err(e) => {
            log_failure("active", &e);
            error_json(&e)
        }
    }
}

pub async fn active_names(state: Data<AppState>) -> impl Responder {
    match state.tracker.lock().await.active_names() {
        Ok(names) => html(render_name_options(&names)),
        Err(e) => {
            log_failure("active_names", &e);
            error_json(&e)
        }
    }
}

pub async fn history(
    state: Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let date = match requested_date(&query) {
        Ok(d) => d,
        Err(e) => return error_json(&e),
    };
    match state.tracker.lock().await.list_history(date) {
        Ok(rounds) if wants_json(&query) => HttpResponse::Ok().json(rounds),
        Ok(rounds) => html(render_history_page(date, &rounds)),
        Err(e) => {
            log_failure("history", &e);
            error_json(&e)
        }
    }
}

pub async fn history_export(
    state: Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let date = match requested_date(&query) {
        Ok(d) => d,
        Err(e) => return error_json(&e),
    };
    let rounds = state.tracker.lock().await.list_history(date);
    match rounds.and_then(|r| history_csv(&r)) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/csv")
            .insert_header((
                "Content-Disposition",
                format!(
                    "attachment; filename=\"golf_rounds_{}.csv\"",
                    date.format(DATE_FORMAT)
                ),
            ))
            .body(body),
        Err(e) => {
            log_failure("history_export", &e);
            error_json(&e)
        }
    }
}
