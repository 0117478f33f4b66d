use crate::dates::{date_key, parse_date_key, today, today_key};
use crate::errors::AppError;
use crate::models::{
    CompletionMap, ExportDocument, Habit, HabitInput, HabitPatch, MentalStateRequest, MonthStats,
    StatsQuery, TodayResponse, ToggleRequest, ToggleResponse,
};
use crate::state::AppState;
use crate::stats::{daily_progress, month_stats};
use crate::storage::persist_data;
use crate::ui::render_index;
use axum::{
    Json,
    extract::{Path, Query, State},
    response::Html,
};
use chrono::{Datelike, Local};

pub async fn index() -> Html<String> {
    Html(render_index(&today_key()))
}

pub async fn list_habits(State(state): State<AppState>) -> Json<Vec<Habit>> {
    let data = state.data.lock().await;
    Json(data.habits.clone())
}

pub async fn create_habit(
    State(state): State<AppState>,
    Json(input): Json<HabitInput>,
) -> Result<Json<Habit>, AppError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::bad_request("habit name must not be empty"));
    }
    if input.goal == Some(0) {
        return Err(AppError::bad_request("goal must be at least 1"));
    }

    let mut data = state.data.lock().await;
    let habit = Habit {
        id: data.allocate_habit_id(),
        name: name.to_string(),
        icon: input.icon.unwrap_or_else(|| "\u{2b50}".to_string()),
        color: input.color.unwrap_or_else(|| "#14b8a6".to_string()),
        goal: input.goal.unwrap_or(30),
        created_at: Local::now().to_rfc3339(),
        is_active: true,
    };
    data.habits.push(habit.clone());

    if let Err(err) = persist_data(&state.data_path, &data).await {
        data.habits.pop();
        data.next_habit_id -= 1;
        return Err(err);
    }

    Ok(Json(habit))
}

pub async fn update_habit(
    State(state): State<AppState>,
    Path(habit_id): Path<String>,
    Json(patch): Json<HabitPatch>,
) -> Result<Json<Habit>, AppError> {
    if let Some(name) = &patch.name {
        if name.trim().is_empty() {
            return Err(AppError::bad_request("habit name must not be empty"));
        }
    }
    if patch.goal == Some(0) {
        return Err(AppError::bad_request("goal must be at least 1"));
    }

    let mut data = state.data.lock().await;
    let index = data
        .habits
        .iter()
        .position(|h| h.id == habit_id)
        .ok_or_else(|| AppError::not_found(format!("no habit with id {habit_id}")))?;

    let previous = data.habits[index].clone();
    {
        let habit = &mut data.habits[index];
        if let Some(name) = patch.name {
            habit.name = name.trim().to_string();
        }
        if let Some(icon) = patch.icon {
            habit.icon = icon;
        }
        if let Some(color) = patch.color {
            habit.color = color;
        }
        if let Some(goal) = patch.goal {
            habit.goal = goal;
        }
    }

    if let Err(err) = persist_data(&state.data_path, &data).await {
        data.habits[index] = previous;
        return Err(err);
    }

    Ok(Json(data.habits[index].clone()))
}

/// Removes a habit from the registry. Its completion entries stay in the
/// store; they are orphaned on purpose so history survives re-creation.
pub async fn delete_habit(
    State(state): State<AppState>,
    Path(habit_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut data = state.data.lock().await;
    let index = data
        .habits
        .iter()
        .position(|h| h.id == habit_id)
        .ok_or_else(|| AppError::not_found(format!("no habit with id {habit_id}")))?;

    let removed = data.habits.remove(index);

    if let Err(err) = persist_data(&state.data_path, &data).await {
        data.habits.insert(index, removed);
        return Err(err);
    }

    Ok(Json(serde_json::json!({ "deleted": habit_id })))
}

pub async fn list_completions(State(state): State<AppState>) -> Json<CompletionMap> {
    let data = state.data.lock().await;
    Json(data.completions.clone())
}

pub async fn toggle_completion(
    State(state): State<AppState>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<ToggleResponse>, AppError> {
    let key = resolve_date_key(payload.date.as_deref())?;

    let mut data = state.data.lock().await;
    if data.habit(&payload.habit_id).is_none() {
        return Err(AppError::not_found(format!(
            "no habit with id {}",
            payload.habit_id
        )));
    }

    let mut record = data.completions.get(&key).cloned().unwrap_or_default();
    let completed = !record
        .habits
        .get(&payload.habit_id)
        .copied()
        .unwrap_or(false);
    record.habits.insert(payload.habit_id.clone(), completed);

    let previous = data.completions.insert(key.clone(), record);
    if let Err(err) = persist_data(&state.data_path, &data).await {
        match previous {
            Some(previous) => {
                data.completions.insert(key, previous);
            }
            None => {
                data.completions.remove(&key);
            }
        }
        return Err(err);
    }

    let daily = daily_progress(&data.habits, &data.completions, &key);
    Ok(Json(ToggleResponse {
        date: key,
        habit_id: payload.habit_id,
        completed,
        daily,
    }))
}

pub async fn set_mental_state(
    State(state): State<AppState>,
    Json(payload): Json<MentalStateRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if payload.mood.is_none() && payload.motivation.is_none() {
        return Err(AppError::bad_request("mood or motivation is required"));
    }
    validate_rating("mood", payload.mood)?;
    validate_rating("motivation", payload.motivation)?;
    let key = resolve_date_key(payload.date.as_deref())?;

    let mut data = state.data.lock().await;
    let mut record = data.completions.get(&key).cloned().unwrap_or_default();
    if payload.mood.is_some() {
        record.mood = payload.mood;
    }
    if payload.motivation.is_some() {
        record.motivation = payload.motivation;
    }

    let previous = data.completions.insert(key.clone(), record.clone());
    if let Err(err) = persist_data(&state.data_path, &data).await {
        match previous {
            Some(previous) => {
                data.completions.insert(key, previous);
            }
            None => {
                data.completions.remove(&key);
            }
        }
        return Err(err);
    }

    Ok(Json(serde_json::json!({
        "date": key,
        "mood": record.mood,
        "motivation": record.motivation,
    })))
}

pub async fn get_today(State(state): State<AppState>) -> Result<Json<TodayResponse>, AppError> {
    let key = today_key();
    let data = state.data.lock().await;
    let daily = daily_progress(&data.habits, &data.completions, &key);
    let record = data.completions.get(&key);

    Ok(Json(TodayResponse {
        date: key,
        daily,
        mood: record.and_then(|r| r.mood),
        motivation: record.and_then(|r| r.motivation),
    }))
}

pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<MonthStats>, AppError> {
    let now = today();
    let year = query.year.unwrap_or_else(|| now.year());
    let month = query.month.unwrap_or_else(|| now.month());
    if !(1..=12).contains(&month) {
        return Err(AppError::bad_request("month must be between 1 and 12"));
    }

    let data = state.data.lock().await;
    Ok(Json(month_stats(
        &data.habits,
        &data.completions,
        year,
        month,
    )))
}

pub async fn export_data(State(state): State<AppState>) -> Json<ExportDocument> {
    let data = state.data.lock().await;
    Json(ExportDocument {
        export_date: Local::now().to_rfc3339(),
        habits: data.habits.clone(),
        completions: data.completions.clone(),
    })
}

fn resolve_date_key(date: Option<&str>) -> Result<String, AppError> {
    match date {
        // Re-format after parsing so only the canonical zero-padded form
        // ever reaches the store.
        Some(raw) => parse_date_key(raw)
            .map(date_key)
            .ok_or_else(|| AppError::bad_request("date must be YYYY-MM-DD")),
        None => Ok(today_key()),
    }
}

fn validate_rating(field: &str, value: Option<u8>) -> Result<(), AppError> {
    match value {
        Some(rating) if !(1..=10).contains(&rating) => Err(AppError::bad_request(format!(
            "{field} must be between 1 and 10"
        ))),
        _ => Ok(()),
    }
}
