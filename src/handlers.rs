use crate::columns::DATUM;
use crate::errors::AppError;
use crate::models::{AppendResponse, CellValue, History, Record, ReportResponse, TodayResponse};
use crate::state::AppState;
use crate::stats::compute;
use crate::storage::persist_history;
use crate::ui::render_index;
use axum::{
    extract::{Form, State},
    response::{Html, Redirect},
    Json,
};
use chrono::Local;
use std::collections::HashMap;
use tracing::{debug, info};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let date = today_string();
    let history = state.history.lock().await;
    let report = compute(&history.rows, &state.config);
    Html(render_index(&date, &state.config.group_labels(), &report))
}

pub async fn get_today(State(state): State<AppState>) -> Json<TodayResponse> {
    let date = today_string();
    let history = state.history.lock().await;
    let rows_today = history
        .rows
        .iter()
        .filter(|row| matches!(row.get(DATUM), Some(CellValue::Text(day)) if *day == date))
        .count();

    Json(TodayResponse {
        date,
        rows_today,
        total_rows: history.rows.len(),
    })
}

pub async fn get_history(State(state): State<AppState>) -> Json<History> {
    let history = state.history.lock().await;
    Json(history.clone())
}

pub async fn get_report(State(state): State<AppState>) -> Json<ReportResponse> {
    let history = state.history.lock().await;
    let report = compute(&history.rows, &state.config);
    debug!(rows = history.rows.len(), entries = report.entries.len(), "computed report");
    Json(ReportResponse::new(history.rows.len(), &report))
}

pub async fn append_row(
    State(state): State<AppState>,
    Json(row): Json<Record>,
) -> Result<Json<AppendResponse>, AppError> {
    let response = apply_row(&state, row).await?;
    Ok(Json(response))
}

pub async fn submit_form(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Redirect, AppError> {
    let row: Record = fields
        .iter()
        .map(|(column, value)| (column.trim().to_string(), CellValue::from(value.as_str())))
        .filter(|(column, value)| !column.is_empty() && *value != CellValue::Empty)
        .collect();
    apply_row(&state, row).await?;
    Ok(Redirect::to("/"))
}

async fn apply_row(state: &AppState, mut row: Record) -> Result<AppendResponse, AppError> {
    if row.keys().all(|column| column == DATUM) {
        return Err(AppError::bad_request("row must contain at least one column"));
    }

    let today = today_string();
    let date = match row.get(DATUM) {
        Some(CellValue::Text(day)) if !day.trim().is_empty() => day.trim().to_string(),
        _ => {
            row.insert(DATUM.to_string(), CellValue::Text(today.clone()));
            today
        }
    };

    let mut history = state.history.lock().await;
    history.rows.push(row);
    if let Err(err) = persist_history(&state.data_path, &history).await {
        history.rows.pop();
        return Err(err);
    }

    info!(date = %date, total_rows = history.rows.len(), "appended row");
    Ok(AppendResponse {
        date,
        total_rows: history.rows.len(),
    })
}

fn today_string() -> String {
    Local::now().date_naive().to_string()
}
