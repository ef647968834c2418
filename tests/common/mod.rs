#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use helpdesk::auth::{AuthProvider, Credentials, Session, SessionStore};
use helpdesk::remote::{FileSource, HelpRelay, HelpRequest};
use helpdesk::{AppContext, Config, HelpdeskError, Result};
use jiff::Timestamp;
use tempfile::TempDir;

/// Rows in the sheet proxy's format, covering the awkward cells.
pub const FIXTURE_ROWS: &str = r#"[
  {"Timestamp": "2024-03-01T09:15:00", "Subject": "Printer jam on 3F", "Description": "Tray 2 keeps jamming", "Status": "New", "Priority": "High", "Name": "Ana Reyes", "Company": "CITIMAX"},
  {"Timestamp": "2024-03-02T10:00:00", "Subject": "VPN drops", "Description": "", "Status": "In Progress", "Priority": "Medium", "Name": null, "Company": "PRIMEHOME"},
  {"Timestamp": "2024-03-03T11:30:00", "Subject": "Reset password", "Status": "resolved", "Priority": "low", "Name": "Ben Cruz", "Company": "CITIMAX"},
  {"Timestamp": 45123, "Subject": "", "Status": "closed", "Priority": "urgent!!", "Company": "WORKPLUS"},
  {"Subject": "New laptop", "Priority": "", "Company": "CITIMAX"}
]"#;

/// Write the fixture rows into `dir` and return the file path.
pub fn write_rows(dir: &Path) -> PathBuf {
    let path = dir.join("rows.json");
    std::fs::write(&path, FIXTURE_ROWS).expect("Failed to write fixture rows");
    path
}

/// Accepts one email/password pair.
pub struct MockAuth {
    pub email: String,
    pub password: String,
}

impl MockAuth {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
        }
    }
}

#[async_trait]
impl AuthProvider for MockAuth {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session> {
        if credentials.email() == self.email && credentials.password() == self.password {
            Ok(Session::new(
                credentials.email(),
                "uid-1",
                "id-token",
                Some("refresh-token".to_string()),
                Timestamp::MAX,
            ))
        } else {
            Err(HelpdeskError::Auth("INVALID_LOGIN_CREDENTIALS".to_string()))
        }
    }

    async fn refresh(&self, session: &Session) -> Result<Session> {
        Ok(Session::new(
            session.email.clone(),
            session.user_id.clone(),
            "id-token-2",
            Some("refresh-token-2".to_string()),
            Timestamp::MAX,
        ))
    }
}

/// Records every submission instead of posting it.
#[derive(Default)]
pub struct StubRelay {
    pub submitted: Mutex<Vec<(String, String)>>,
    pub fail: bool,
}

#[async_trait]
impl HelpRelay for StubRelay {
    async fn submit(&self, request: &HelpRequest) -> Result<()> {
        if self.fail {
            return Err(HelpdeskError::Status(500));
        }
        self.submitted
            .lock()
            .expect("relay lock poisoned")
            .push((request.email().to_string(), request.message().to_string()));
        Ok(())
    }
}

/// An [`AppContext`] backed by fixture rows and stub services in a temp dir.
pub struct TestContext {
    pub temp_dir: TempDir,
    pub ctx: AppContext,
    pub relay: Arc<StubRelay>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let rows = write_rows(temp_dir.path());
        let relay = Arc::new(StubRelay::default());
        let ctx = AppContext::new(
            config,
            reqwest::Client::new(),
            Arc::new(FileSource::new(rows)),
            Arc::new(MockAuth::new("ana@citimax.test", "hunter22")),
            relay.clone(),
            SessionStore::in_dir(temp_dir.path()),
        );
        TestContext {
            temp_dir,
            ctx,
            relay,
        }
    }
}

pub fn helpdesk_binary() -> &'static str {
    env!("CARGO_BIN_EXE_helpdesk")
}

/// Runs the helpdesk binary with config and data dirs isolated in a temp dir.
pub struct HelpdeskTest {
    pub temp_dir: TempDir,
}

impl HelpdeskTest {
    pub fn new() -> Self {
        HelpdeskTest {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("config.yaml")
    }

    pub fn rows_path(&self) -> PathBuf {
        write_rows(self.temp_dir.path())
    }

    pub fn run(&self, args: &[&str]) -> Output {
        let home = self.temp_dir.path().join("home");
        Command::new(helpdesk_binary())
            .args(args)
            .current_dir(self.temp_dir.path())
            .env("HELPDESK_CONFIG", self.config_path())
            .env("HOME", &home)
            .env("XDG_DATA_HOME", home.join("data"))
            .env("XDG_CONFIG_HOME", home.join("config"))
            .env_remove("HELPDESK_TICKETS_URL")
            .env_remove("HELPDESK_API_KEY")
            .env_remove("HELPDESK_LOG")
            .output()
            .expect("Failed to execute helpdesk command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }
}
