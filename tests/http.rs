use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct Habit {
    id: String,
    name: String,
    goal: u32,
    is_active: bool,
}

#[derive(Debug, Deserialize)]
struct ProgressSummary {
    completed: u32,
    total: u32,
    percentage: u32,
}

#[derive(Debug, Deserialize)]
struct TodayResponse {
    date: String,
    daily: ProgressSummary,
    mood: Option<u8>,
    motivation: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct ToggleResponse {
    date: String,
    habit_id: String,
    completed: bool,
    daily: ProgressSummary,
}

#[derive(Debug, Deserialize)]
struct ChartPoint {
    day: u32,
    date: String,
    total: u32,
}

#[derive(Debug, Deserialize)]
struct MonthStats {
    year: i32,
    month: u32,
    month_name: String,
    days_in_month: u32,
    today: String,
    days: Vec<ChartPoint>,
    mental_state: Vec<serde_json::Value>,
    analysis: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct CompletionRecord {
    #[serde(default)]
    habits: BTreeMap<String, bool>,
    mood: Option<u8>,
    motivation: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct ExportDocument {
    export_date: String,
    habits: Vec<Habit>,
    completions: BTreeMap<String, CompletionRecord>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "habit_tracker_http_{}_{}.json",
        std::process::id(),
        nanos
    ));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/today")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_habit_tracker"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn list_habits(client: &Client, base_url: &str) -> Vec<Habit> {
    client
        .get(format!("{base_url}/api/habits"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn create_habit(client: &Client, base_url: &str, name: &str, goal: u32) -> Habit {
    client
        .post(format!("{base_url}/api/habits"))
        .json(&serde_json::json!({ "name": name, "goal": goal }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_fresh_store_is_seeded_with_defaults() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let habits = list_habits(&client, &server.base_url).await;
    assert!(habits.len() >= 6, "expected seeded defaults, got {habits:?}");
    assert!(habits.iter().any(|h| h.name == "Gym" && h.goal == 20));
    assert!(habits.iter().all(|h| h.is_active));
}

#[tokio::test]
async fn http_create_and_delete_habit() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = list_habits(&client, &server.base_url).await.len();
    let habit = create_habit(&client, &server.base_url, "Meditation", 15).await;
    assert!(!habit.id.is_empty());
    assert_eq!(habit.name, "Meditation");
    assert_eq!(habit.goal, 15);

    let habits = list_habits(&client, &server.base_url).await;
    assert_eq!(habits.len(), before + 1);
    // Creation order: the new habit is last.
    assert_eq!(habits.last().unwrap().id, habit.id);

    let response = client
        .delete(format!("{}/api/habits/{}", server.base_url, habit.id))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let habits = list_habits(&client, &server.base_url).await;
    assert_eq!(habits.len(), before);

    let response = client
        .delete(format!("{}/api/habits/{}", server.base_url, habit.id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_rejects_invalid_habit_input() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/habits", server.base_url))
        .json(&serde_json::json!({ "name": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    let response = client
        .post(format!("{}/api/habits", server.base_url))
        .json(&serde_json::json!({ "name": "Stretching", "goal": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_toggle_flips_completion_and_daily_progress() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let habit = create_habit(&client, &server.base_url, "Journaling", 30).await;
    let before: TodayResponse = client
        .get(format!("{}/api/today", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let toggled: ToggleResponse = client
        .post(format!("{}/api/completions/toggle", server.base_url))
        .json(&serde_json::json!({ "habit_id": habit.id }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(toggled.completed);
    assert_eq!(toggled.date, before.date);
    assert_eq!(toggled.habit_id, habit.id);
    assert_eq!(toggled.daily.completed, before.daily.completed + 1);
    assert_eq!(toggled.daily.total, before.daily.total);
    assert!(toggled.daily.percentage <= 100);

    let toggled_back: ToggleResponse = client
        .post(format!("{}/api/completions/toggle", server.base_url))
        .json(&serde_json::json!({ "habit_id": habit.id }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!toggled_back.completed);
    assert_eq!(toggled_back.daily.completed, before.daily.completed);

    let response = client
        .post(format!("{}/api/completions/toggle", server.base_url))
        .json(&serde_json::json!({ "habit_id": "no-such-habit" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

    let response = client
        .post(format!("{}/api/completions/toggle", server.base_url))
        .json(&serde_json::json!({ "habit_id": habit.id, "date": "29-08-2026" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_mental_state_round_trip() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/mental-state", server.base_url))
        .json(&serde_json::json!({ "mood": 8, "motivation": 6 }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let today: TodayResponse = client
        .get(format!("{}/api/today", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(today.mood, Some(8));
    assert_eq!(today.motivation, Some(6));

    let response = client
        .post(format!("{}/api/mental-state", server.base_url))
        .json(&serde_json::json!({ "mood": 11 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    let response = client
        .post(format!("{}/api/mental-state", server.base_url))
        .json(&serde_json::json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_stats_covers_the_whole_month() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let habits = list_habits(&client, &server.base_url).await;
    let stats: MonthStats = client
        .get(format!("{}/api/stats", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!((1..=12).contains(&stats.month));
    assert!(!stats.month_name.is_empty());
    assert_eq!(stats.days.len(), stats.days_in_month as usize);
    assert_eq!(stats.mental_state.len(), stats.days_in_month as usize);
    assert_eq!(stats.analysis.len(), habits.len());
    assert!(stats.days.iter().any(|day| day.date == stats.today));
    assert_eq!(stats.days[0].day, 1);
    assert_eq!(stats.days.last().unwrap().day, stats.days_in_month);

    let total_sum: u32 = stats.days.iter().map(|day| day.total).sum();
    assert_eq!(total_sum, habits.len() as u32 * stats.days_in_month);

    // A fixed past month is also addressable.
    let leap: MonthStats = client
        .get(format!("{}/api/stats?year=2024&month=2", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(leap.year, 2024);
    assert_eq!(leap.days_in_month, 29);
    assert_eq!(leap.month_name, "February");
    assert_eq!(leap.days.last().unwrap().date, "2024-02-29");

    let response = client
        .get(format!("{}/api/stats?year=2024&month=13", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_deleting_a_habit_keeps_its_completions() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let habit = create_habit(&client, &server.base_url, "Cold shower", 30).await;
    let toggled: ToggleResponse = client
        .post(format!("{}/api/completions/toggle", server.base_url))
        .json(&serde_json::json!({ "habit_id": habit.id }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(toggled.completed);

    client
        .delete(format!("{}/api/habits/{}", server.base_url, habit.id))
        .send()
        .await
        .unwrap()
        .error_for_status()
        .unwrap();

    let completions: BTreeMap<String, CompletionRecord> = client
        .get(format!("{}/api/completions", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let record = completions.get(&toggled.date).expect("day record retained");
    assert_eq!(record.habits.get(&habit.id), Some(&true));
}

#[tokio::test]
async fn http_export_contains_full_document() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let habits = list_habits(&client, &server.base_url).await;
    let export: ExportDocument = client
        .get(format!("{}/api/export", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(!export.export_date.is_empty());
    assert_eq!(export.habits.len(), habits.len());
    for record in export.completions.values() {
        for rating in [record.mood, record.motivation].into_iter().flatten() {
            assert!((1..=10).contains(&rating));
        }
    }
}
