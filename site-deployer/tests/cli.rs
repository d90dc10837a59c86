use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_deploy_command() {
    let mut cmd = Command::cargo_bin("site-deployer").expect("Binary exists");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("deploy"));
}

#[test]
fn deploy_help_documents_flags() {
    let mut cmd = Command::cargo_bin("site-deployer").expect("Binary exists");
    cmd.args(["deploy", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--config").and(predicate::str::contains("--skip-invalidation")));
}

#[test]
fn deploy_with_missing_config_fails() {
    let mut cmd = Command::cargo_bin("site-deployer").expect("Binary exists");
    cmd.args(["deploy", "--config", "/nonexistent/deploy.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}

use std::sync::{Arc, Mutex};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{layer::Context, Layer, Registry};

/// Custom Layer to collect emitted event messages.
struct EventCollector {
    events: Arc<Mutex<Vec<String>>>,
}

impl<S> Layer<S> for EventCollector
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        use std::fmt::Write as FmtWrite;
        let mut msg = String::new();
        let _ = write!(&mut msg, "{:?}", event);
        self.events.lock().unwrap().push(msg);
    }
}

#[tokio::test]
async fn emits_trace_initialised_event() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let collector = EventCollector {
        events: events.clone(),
    };
    let subscriber = Registry::default().with(collector);
    let _guard = tracing::subscriber::set_default(subscriber);

    use site_deployer::cli::{run, Cli, Commands};

    let cli = Cli {
        command: Commands::Deploy {
            config: std::path::PathBuf::from("dummy.yaml"),
            skip_invalidation: false,
        },
    };

    let result = run(cli).await;
    assert!(result.is_err(), "dummy config must not load");

    let event_msgs = events.lock().unwrap();
    assert!(
        event_msgs.iter().any(|msg| msg.contains("trace_initialised")),
        "Expected a 'trace_initialised' trace event, got: {:?}",
        event_msgs
    );
}
