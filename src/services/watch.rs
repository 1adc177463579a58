use std::time::Duration;

use anyhow::Result;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::api::status_client::StatusClient;
use crate::config::settings::AppConfig;
use crate::feed::ChangeKind;
use crate::services::viewer::{self, ViewerService};
use crate::store::BoardStore;
use crate::view::ViewQuery;

/// Live terminal view: renders the board and the status widget, then waits
/// for the change feed. Every wakeup is a full reload of authoritative
/// state, so duplicate or spurious notifications cost one re-render at
/// most.
pub struct WatchService {
    store: BoardStore,
    config: AppConfig,
}

impl WatchService {
    pub fn new(store: BoardStore, config: AppConfig) -> Self {
        Self { store, config }
    }

    pub async fn run(&self, query: ViewQuery, host: String) -> Result<()> {
        let mut changes = self.store.feed().subscribe();
        let _poller = spawn_revision_poller(
            self.store.clone(),
            Duration::from_millis(self.config.watch.revision_poll_ms),
        );

        let viewer = ViewerService::new(self.store.clone());
        let mut status_client = StatusClient::new(&self.config.status)?;
        let refresh = Duration::from_secs(self.config.watch.status_refresh_secs);

        let mut report = status_client.fetch(&host).await;
        loop {
            let board = viewer.render_board(&query)?;
            println!("{}", viewer::render_status(&report));
            print!("{board}");

            tokio::select! {
                changed = changes.recv() => match changed {
                    Ok(kind) => log::debug!("Reloading after {kind}"),
                    Err(RecvError::Lagged(missed)) => {
                        log::debug!("Change feed lagged by {missed}, reloading");
                    }
                    Err(RecvError::Closed) => break,
                },
                _ = tokio::time::sleep(refresh) => {
                    report = status_client.fetch(&host).await;
                }
            }
        }
        Ok(())
    }
}

/// Cross-process half of the change feed: other processes mutate the store
/// directly, so their writes only show up as revision bumps. The poller
/// turns a bump into the matching feed event, key by key.
pub fn spawn_revision_poller(store: BoardStore, every: Duration) -> JoinHandle<()> {
    // Baseline is taken before the task starts: a write that lands between
    // the spawn and the first tick must still be reported.
    let mut last = store.revisions().unwrap_or_default();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            let current = match store.revisions() {
                Ok(current) => current,
                Err(e) => {
                    log::warn!("Revision poll failed: {e:?}");
                    continue;
                }
            };

            if current.players != last.players {
                store.feed().publish(ChangeKind::PlayersUpdated);
            }
            if current.mapping != last.mapping {
                store.feed().publish(ChangeKind::MappingUpdated);
            }
            last = current;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::ChangeFeed;
    use crate::store::seed;
    use tokio::time::timeout;

    #[tokio::test]
    async fn poller_publishes_when_another_process_writes() {
        let path = std::env::temp_dir().join("tierboard_watch_poller.db");
        let _ = std::fs::remove_file(&path);
        let path = path.to_str().unwrap().to_string();

        // Two stores over the same file, with independent feeds, stand in
        // for two processes.
        let watching = BoardStore::open(&path, ChangeFeed::new()).unwrap();
        let editing = BoardStore::open(&path, ChangeFeed::new()).unwrap();

        let mut changes = watching.feed().subscribe();
        let poller = spawn_revision_poller(watching.clone(), Duration::from_millis(10));

        editing.save_players(&seed::example_players()).unwrap();

        let kind = timeout(Duration::from_secs(2), changes.recv())
            .await
            .expect("poller should observe the write")
            .unwrap();
        assert_eq!(kind, ChangeKind::PlayersUpdated);

        poller.abort();
    }

    #[tokio::test]
    async fn poller_reports_the_affected_key() {
        let path = std::env::temp_dir().join("tierboard_watch_poller_key.db");
        let _ = std::fs::remove_file(&path);
        let path = path.to_str().unwrap().to_string();

        let watching = BoardStore::open(&path, ChangeFeed::new()).unwrap();
        let editing = BoardStore::open(&path, ChangeFeed::new()).unwrap();

        let mut changes = watching.feed().subscribe();
        let poller = spawn_revision_poller(watching.clone(), Duration::from_millis(10));

        let mapping = editing.load_mapping().unwrap();
        editing.save_mapping(&mapping).unwrap();

        let kind = timeout(Duration::from_secs(2), changes.recv())
            .await
            .expect("poller should observe the write")
            .unwrap();
        assert_eq!(kind, ChangeKind::MappingUpdated);

        poller.abort();
    }
}
