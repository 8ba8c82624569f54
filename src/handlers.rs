use crate::calendar::display_date;
use crate::errors::AppError;
use crate::models::{DayState, Exercise, Person, StateView, ToggleRequest};
use crate::progression::{can_advance, status};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{extract::State, response::Html, Json};
use chrono::NaiveDate;

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let current = state.store.get_state().await;
    let page = render_index(&to_view(current, state.epoch))?;
    Ok(Html(page))
}

pub async fn get_state(State(state): State<AppState>) -> Json<StateView> {
    let current = state.store.get_state().await;
    Json(to_view(current, state.epoch))
}

pub async fn toggle(
    State(state): State<AppState>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<StateView>, AppError> {
    let person = Person::parse(&payload.person)?;
    let exercise = Exercise::parse(&payload.exercise)?;

    let updated = state.store.toggle(person, exercise).await?;
    Ok(Json(to_view(updated, state.epoch)))
}

pub async fn next_day(State(state): State<AppState>) -> Result<Json<StateView>, AppError> {
    let updated = state.store.advance().await?;
    Ok(Json(to_view(updated, state.epoch)))
}

fn to_view(state: DayState, epoch: NaiveDate) -> StateView {
    StateView {
        date: display_date(state.day(), epoch),
        can_advance: can_advance(&state),
        status: status(&state),
        state,
    }
}
