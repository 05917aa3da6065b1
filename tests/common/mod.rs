//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use annotation_server::lifecycle::{Lifecycle, LifecycleState, StartupError, StartupMode};
use tokio::task::JoinHandle;

pub const ADMIN_KEY: &str = "test-admin-key";

pub const LEXICON: &str = "\
# surface\tresource\tsupport\tcontext
Berlin\tBerlin\t900\tgermany,capital,city
Berlin\tBerlin_(band)\t100\tmusic,band,album
Germany\tGermany\t1200\tcountry,europe,berlin
capital\tCapital_city\t50\tcity,government
Angela Merkel\tAngela_Merkel\t300\tchancellor,germany
";

/// Write a Mode A service directory: `service.toml` next to `lexicon.tsv`.
pub fn write_service(dir: &Path, spotters: &[&str], admin: bool) -> PathBuf {
    fs::write(dir.join("lexicon.tsv"), LEXICON).unwrap();

    let config = format!(
        r#"
[listener]
server_uri = "http://127.0.0.1:0/rest/"

[service]
namespace_prefix = "http://dbpedia.org/resource/"

[strategies]
lexicon_path = "lexicon.tsv"
spotters = [{spotters}]
disambiguators = ["Default", "Occurrences"]

[timeouts]
shutdown_secs = 2

[admin]
enabled = {admin}
api_key = "{key}"
"#,
        spotters = quoted(spotters),
        admin = admin,
        key = ADMIN_KEY,
    );

    let path = dir.join("service.toml");
    fs::write(&path, config).unwrap();
    path
}

/// Write a Mode B model folder.
pub fn write_model(dir: &Path, namespace: Option<&str>, spotters: &[&str]) {
    let mut properties = format!("spotters = [{}]\ndisambiguators = [\"Default\"]\n", quoted(spotters));
    if let Some(namespace) = namespace {
        properties.push_str(&format!("namespace = \"{}\"\n", namespace));
    }
    fs::write(dir.join("model.toml"), properties).unwrap();
    fs::write(dir.join("lexicon.tsv"), LEXICON).unwrap();
}

fn quoted(items: &[&str]) -> String {
    items
        .iter()
        .map(|s| format!("\"{}\"", s))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A service running in the background.
pub struct RunningService {
    pub lifecycle: Arc<Lifecycle>,
    pub task: JoinHandle<Result<(), StartupError>>,
    pub addr: SocketAddr,
}

impl RunningService {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Wait for the controller to return.
    pub async fn join(self) -> Result<(), StartupError> {
        tokio::time::timeout(Duration::from_secs(10), self.task)
            .await
            .expect("service did not stop in time")
            .expect("service task panicked")
    }
}

/// Run the service for `mode` and wait until it is serving.
pub async fn start(mode: StartupMode) -> RunningService {
    let lifecycle = Arc::new(Lifecycle::new());
    let mut states = lifecycle.subscribe_state();

    let task = {
        let lifecycle = lifecycle.clone();
        tokio::spawn(async move { lifecycle.run(&mode).await })
    };

    let state = tokio::time::timeout(
        Duration::from_secs(10),
        states.wait_for(|s| matches!(s, LifecycleState::Serving | LifecycleState::Stopped)),
    )
    .await
    .expect("service did not start in time")
    .map(|s| *s)
    .unwrap();
    assert_eq!(state, LifecycleState::Serving, "service failed to start");

    let addr = lifecycle.local_addr().expect("listener bound");
    RunningService {
        lifecycle,
        task,
        addr,
    }
}
