use std::fs;
use std::sync::{Arc, Mutex};

use site_deployer_core::config::DeployConfig;
use site_deployer_core::contract::{LocalFs, MockCdnClient, MockObjectStore};
use site_deployer_core::deploy::DeploySession;
use tempfile::tempdir;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{layer::Context, Layer, Registry};

/// Collects the Debug rendering of every event.
struct EventCollector {
    events: Arc<Mutex<Vec<String>>>,
}

impl<S: tracing::Subscriber> Layer<S> for EventCollector {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        self.events.lock().unwrap().push(format!("{event:?}"));
    }
}

#[tokio::test]
async fn uploads_are_logged_and_blacklist_skips_are_silent() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = Registry::default().with(EventCollector {
        events: events.clone(),
    });
    let _guard = tracing::subscriber::set_default(subscriber);

    let site = tempdir().unwrap();
    fs::write(site.path().join("index.html"), "home").unwrap();
    fs::write(site.path().join("secret.env"), "KEY=1").unwrap();

    let mut store = MockObjectStore::new();
    store.expect_put_object().returning(|_| Ok(()));
    let config = DeployConfig::new("my-site").with_blacklist(["secret.env"]);
    let mut session = DeploySession::new(config, store, MockCdnClient::new(), LocalFs);
    session.run(site.path()).await.unwrap();

    let events = events.lock().unwrap();
    assert!(events
        .iter()
        .any(|e| e.contains("Upload file success") && e.contains("index.html")));
    assert!(events
        .iter()
        .any(|e| e.contains("No distribution_id configured")));
    // The config dump names the blacklist itself; nothing else may.
    assert!(
        !events
            .iter()
            .filter(|e| !e.contains("DeployConfig"))
            .any(|e| e.contains("secret.env")),
        "blacklisted file must not be mentioned: {events:?}"
    );
}
