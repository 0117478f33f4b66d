use crate::dates::{date_key, days_in_month, leading_blanks, month_name, today};
use crate::models::{
    ChartPoint, CompletionMap, Habit, HabitAnalysisRow, MentalStatePoint, MonthStats,
    ProgressSummary, default_goal,
};
use chrono::{Duration, NaiveDate};

/// Hard upper bound on a streak walk, against corrupt or unbounded data.
const MAX_STREAK: u32 = 365;

/// `round(100 * completed / goal)` clamped to 100. A zero goal yields 0
/// rather than dividing by zero.
pub fn progress_percentage(completed: u32, goal: u32) -> u32 {
    if goal == 0 {
        return 0;
    }
    let pct = (f64::from(completed) / f64::from(goal) * 100.0).round() as u32;
    pct.min(100)
}

/// Days in the given month on which the habit was marked done.
pub fn monthly_completed_count(
    habit_id: &str,
    completions: &CompletionMap,
    year: i32,
    month: u32,
) -> u32 {
    let mut completed = 0;
    for day in 1..=days_in_month(year, month) {
        let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
            continue;
        };
        if is_done(completions, &date_key(date), habit_id) {
            completed += 1;
        }
    }
    completed
}

/// Completions and goals summed across the whole registry for one month.
pub fn overall_monthly_progress(
    habits: &[Habit],
    completions: &CompletionMap,
    year: i32,
    month: u32,
) -> ProgressSummary {
    let mut completed = 0;
    let mut total = 0;
    for habit in habits {
        completed += monthly_completed_count(&habit.id, completions, year, month);
        total += effective_goal(habit);
    }
    ProgressSummary {
        completed,
        total,
        percentage: progress_percentage(completed, total),
    }
}

/// How many of the registered habits were done on one day.
pub fn daily_progress(
    habits: &[Habit],
    completions: &CompletionMap,
    date_key: &str,
) -> ProgressSummary {
    let total = habits.len() as u32;
    let completed = habits
        .iter()
        .filter(|habit| is_done(completions, date_key, &habit.id))
        .count() as u32;
    ProgressSummary {
        completed,
        total,
        percentage: progress_percentage(completed, total),
    }
}

/// Current streak: consecutive completed days ending at `today`, or at
/// yesterday when today is not yet done (an undone today does not zero an
/// ongoing streak). Capped at [`MAX_STREAK`].
pub fn streak_length(habit_id: &str, completions: &CompletionMap, today: NaiveDate) -> u32 {
    let mut check = today;
    if !is_done(completions, &date_key(check), habit_id) {
        check -= Duration::days(1);
    }

    let mut streak = 0;
    while streak < MAX_STREAK && is_done(completions, &date_key(check), habit_id) {
        streak += 1;
        check -= Duration::days(1);
    }
    streak
}

/// Daily progress for every calendar day of the month, ascending. Future
/// days are included; filtering them out is a presentation concern.
pub fn monthly_chart_series(
    habits: &[Habit],
    completions: &CompletionMap,
    year: i32,
    month: u32,
) -> Vec<ChartPoint> {
    month_keys(year, month)
        .map(|(day, key)| {
            let progress = daily_progress(habits, completions, &key);
            ChartPoint {
                day,
                date: key,
                completed: progress.completed,
                total: progress.total,
                percentage: progress.percentage,
            }
        })
        .collect()
}

/// Mood and motivation for every calendar day of the month. Days with no
/// record still get an entry, with `None` ratings, so consumers can render
/// gaps.
pub fn mental_state_series(
    completions: &CompletionMap,
    year: i32,
    month: u32,
) -> Vec<MentalStatePoint> {
    month_keys(year, month)
        .map(|(day, key)| {
            let record = completions.get(&key);
            MentalStatePoint {
                day,
                mood: record.and_then(|r| r.mood),
                motivation: record.and_then(|r| r.motivation),
                date: key,
            }
        })
        .collect()
}

/// Per-habit month summary in registry order: actual vs goal plus the
/// current streak.
pub fn habit_analysis(
    habits: &[Habit],
    completions: &CompletionMap,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Vec<HabitAnalysisRow> {
    habits
        .iter()
        .map(|habit| {
            let goal = effective_goal(habit);
            let actual = monthly_completed_count(&habit.id, completions, year, month);
            HabitAnalysisRow {
                id: habit.id.clone(),
                name: habit.name.clone(),
                icon: habit.icon.clone(),
                color: habit.color.clone(),
                goal,
                actual,
                progress: progress_percentage(actual, goal),
                streak: streak_length(&habit.id, completions, today),
            }
        })
        .collect()
}

pub fn month_stats(
    habits: &[Habit],
    completions: &CompletionMap,
    year: i32,
    month: u32,
) -> MonthStats {
    month_stats_at(today(), habits, completions, year, month)
}

pub fn month_stats_at(
    today: NaiveDate,
    habits: &[Habit],
    completions: &CompletionMap,
    year: i32,
    month: u32,
) -> MonthStats {
    MonthStats {
        year,
        month,
        month_name: month_name(month),
        days_in_month: days_in_month(year, month),
        leading_blanks: leading_blanks(year, month),
        today: date_key(today),
        overall: overall_monthly_progress(habits, completions, year, month),
        days: monthly_chart_series(habits, completions, year, month),
        mental_state: mental_state_series(completions, year, month),
        analysis: habit_analysis(habits, completions, year, month, today),
    }
}

fn effective_goal(habit: &Habit) -> u32 {
    if habit.goal == 0 { default_goal() } else { habit.goal }
}

fn is_done(completions: &CompletionMap, date_key: &str, habit_id: &str) -> bool {
    completions
        .get(date_key)
        .and_then(|record| record.habits.get(habit_id))
        .copied()
        .unwrap_or(false)
}

fn month_keys(year: i32, month: u32) -> impl Iterator<Item = (u32, String)> {
    (1..=days_in_month(year, month)).filter_map(move |day| {
        NaiveDate::from_ymd_opt(year, month, day).map(|date| (day, date_key(date)))
    })
}
