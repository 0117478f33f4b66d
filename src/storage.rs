use crate::dates;
use crate::errors::AppError;
use crate::models::{AppData, Habit, default_habits};
use chrono::Local;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, info};

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/habits.json"))
}

pub async fn load_data(path: &Path) -> AppData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file: {err}");
                AppData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            AppData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

/// Seeds the starter habit set into an empty registry and persists it, so a
/// first launch has something to track. A store that already has habits is
/// left alone, even if the user deleted all completions.
pub async fn ensure_seeded(path: &Path, data: &mut AppData) -> Result<(), AppError> {
    if !data.habits.is_empty() {
        return Ok(());
    }

    let created_at = Local::now().to_rfc3339();
    for (name, icon, color, goal) in default_habits() {
        let id = data.allocate_habit_id();
        data.habits.push(Habit {
            id,
            name: name.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
            goal,
            created_at: created_at.clone(),
            is_active: true,
        });
    }
    info!(
        "seeded {} default habits for {}",
        data.habits.len(),
        dates::today_key()
    );
    persist_data(path, data).await
}
