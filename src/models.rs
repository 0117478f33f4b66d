use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A user-defined recurring activity with a monthly completion goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    #[serde(default = "default_goal")]
    pub goal: u32,
    #[serde(default)]
    pub created_at: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

pub fn default_goal() -> u32 {
    30
}

fn default_true() -> bool {
    true
}

/// Everything recorded for one calendar day. Created lazily on the first
/// toggle or mood log for that day and never deleted afterwards, so entries
/// for removed habits stay around (they are simply not displayed).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CompletionRecord {
    #[serde(default)]
    pub habits: BTreeMap<String, bool>,
    #[serde(default)]
    pub mood: Option<u8>,
    #[serde(default)]
    pub motivation: Option<u8>,
}

pub type CompletionMap = BTreeMap<String, CompletionRecord>;

/// The persisted document: habit registry in creation order plus the full
/// date-keyed completion history.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub habits: Vec<Habit>,
    #[serde(default)]
    pub completions: CompletionMap,
    #[serde(default)]
    pub next_habit_id: u64,
}

impl AppData {
    pub fn allocate_habit_id(&mut self) -> String {
        self.next_habit_id += 1;
        format!("h{}", self.next_habit_id)
    }

    pub fn habit(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }
}

/// The starter registry for an empty store: (name, icon, color, goal).
pub fn default_habits() -> Vec<(&'static str, &'static str, &'static str, u32)> {
    vec![
        ("Wake up at 06:00", "\u{23f0}", "#14b8a6", 30),
        ("Gym", "\u{1f3cb}\u{fe0f}", "#3b82f6", 20),
        ("Reading / Learning", "\u{1f4da}", "#8b5cf6", 30),
        ("Day Planning", "\u{1f4cb}", "#f59e0b", 30),
        ("Project Work", "\u{1f4bc}", "#ec4899", 25),
        ("Social Media Detox", "\u{1f4f1}", "#06b6d4", 30),
    ]
}

#[derive(Debug, Deserialize)]
pub struct HabitInput {
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub goal: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HabitPatch {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub goal: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub habit_id: String,
    /// Canonical `YYYY-MM-DD` key; today when omitted.
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MentalStateRequest {
    pub date: Option<String>,
    pub mood: Option<u8>,
    pub motivation: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub date: String,
    pub habit_id: String,
    pub completed: bool,
    pub daily: ProgressSummary,
}

#[derive(Debug, Serialize)]
pub struct TodayResponse {
    pub date: String,
    pub daily: ProgressSummary,
    pub mood: Option<u8>,
    pub motivation: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressSummary {
    pub completed: u32,
    pub total: u32,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub day: u32,
    pub date: String,
    pub completed: u32,
    pub total: u32,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MentalStatePoint {
    pub day: u32,
    pub date: String,
    pub mood: Option<u8>,
    pub motivation: Option<u8>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HabitAnalysisRow {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub goal: u32,
    pub actual: u32,
    pub progress: u32,
    pub streak: u32,
}

/// One month's worth of derived views, as served by `/api/stats`.
#[derive(Debug, Serialize)]
pub struct MonthStats {
    pub year: i32,
    pub month: u32,
    pub month_name: &'static str,
    pub days_in_month: u32,
    pub leading_blanks: u32,
    pub today: String,
    pub overall: ProgressSummary,
    pub days: Vec<ChartPoint>,
    pub mental_state: Vec<MentalStatePoint>,
    pub analysis: Vec<HabitAnalysisRow>,
}

/// The flat backup document served by `/api/export`.
#[derive(Debug, Serialize)]
pub struct ExportDocument {
    pub export_date: String,
    pub habits: Vec<Habit>,
    pub completions: CompletionMap,
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}
