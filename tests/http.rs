use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct TodayResponse {
    date: String,
    rows_today: usize,
    total_rows: usize,
}

#[derive(Debug, Deserialize)]
struct AppendResponse {
    date: String,
    total_rows: usize,
}

#[derive(Debug, Deserialize)]
struct ReportLine {
    label: String,
    value: String,
    header: bool,
}

#[derive(Debug, Deserialize)]
struct ReportResponse {
    rows: usize,
    entries: Vec<ReportLine>,
}

impl ReportResponse {
    fn value(&self, label: &str) -> &str {
        self.entries
            .iter()
            .find(|entry| !entry.header && entry.label == label)
            .map(|entry| entry.value.as_str())
            .unwrap_or_else(|| panic!("missing label {label}"))
    }
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

fn unique_path(kind: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("scen_stats_{kind}_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

fn write_config() -> String {
    let path = unique_path("config");
    let config = serde_json::json!({
        "MAX_PAPPAN": 10,
        "MAX_GRANNAR": 10,
        "MAX_NILS_VANNER": 10,
        "MAX_NILS_FAMILJ": 10,
        "SUPER_BONUS_PCT": "0,1",
    });
    std::fs::write(&path, config.to_string()).expect("write config");
    path
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
    let child = Command::new(env!("CARGO_BIN_EXE_scen_stats"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", unique_path("history"))
        .env("APP_CONFIG_PATH", write_config())
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

async fn fetch_report(client: &Client, base_url: &str) -> ReportResponse {
    client
        .get(format!("{base_url}/api/report"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_append_row_updates_report() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = fetch_report(&client, &server.base_url).await;
    let before_today: TodayResponse = client
        .get(format!("{}/api/today", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let response = client
        .post(format!("{}/api/rows", server.base_url))
        .json(&serde_json::json!({ "Män": 1, "Svarta": "0", "Prenumeranter": 100 }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let appended: AppendResponse = response.json().await.unwrap();
    assert_eq!(appended.total_rows, before.rows + 1);
    assert_eq!(appended.date, before_today.date);

    let after = fetch_report(&client, &server.base_url).await;
    assert_eq!(after.rows, before.rows + 1);
    assert_eq!(after.value("Antal rader"), (before.rows + 1).to_string());
    assert_eq!(after.entries.len(), before.entries.len());
    assert!(after.entries[0].header);
    assert_eq!(after.entries[0].label, "Översikt");

    let today: TodayResponse = client
        .get(format!("{}/api/today", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(today.rows_today, before_today.rows_today + 1);
    assert_eq!(today.total_rows, after.rows);
}

#[tokio::test]
async fn http_form_submission_appends_row() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = fetch_report(&client, &server.base_url).await;

    let response = client
        .post(format!("{}/rows", server.base_url))
        .header("content-type", "application/x-www-form-urlencoded")
        .body("Grannar=2%2C5&Svarta=&Nils=1")
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success() || response.status().is_redirection());

    let after = fetch_report(&client, &server.base_url).await;
    assert_eq!(after.rows, before.rows + 1);

    let history: serde_json::Value = client
        .get(format!("{}/api/history", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let last = history["rows"].as_array().unwrap().last().unwrap().clone();
    assert_eq!(last["Grannar"], "2,5");
    assert!(last.get("Svarta").is_none());
    assert!(last["Datum"].is_string());
}

#[tokio::test]
async fn http_empty_row_is_rejected() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/rows", server.base_url))
        .json(&serde_json::json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn http_index_renders_report_panel() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let body = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Prognos Nöjdhet (per vecka)"));
    assert!(body.contains(r#"name="Pappans vänner""#));
}
