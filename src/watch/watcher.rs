// src/watch/watcher.rs

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use notify::{Config, Event, RecommendedWatcher, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::engine::RuntimeEvent;
use crate::errors::Result;
use crate::fs::FileSystem;
use crate::watch::exclude::ExcludeFilter;
use crate::watch::scanner::DirectoryScanner;
use crate::watch::translator::EventTranslator;
use crate::watch::watch_set::{Subscriber, WatchSet};

/// Handle for the background watcher thread.
///
/// The thread owns the `RecommendedWatcher` and the watch set; it ends once
/// the runtime side of the channel is gone and the next notification fails
/// to send.
pub struct WatcherHandle {
    thread: thread::JoinHandle<()>,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle")
            .field("finished", &self.thread.is_finished())
            .finish()
    }
}

/// Start watching `root` and forward change timestamps to the runtime.
///
/// - `root` is registered recursively (minus excluded paths) on the watcher
///   thread before any notification is processed.
/// - `exclude` filters both registration and incoming changes.
/// - `runtime_tx` receives `RuntimeEvent::Changed` per change and a single
///   `RuntimeEvent::WatcherFailed` if the notification backend breaks.
pub fn spawn_watcher(
    root: impl Into<PathBuf>,
    exclude: ExcludeFilter,
    fs: Arc<dyn FileSystem>,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) -> Result<WatcherHandle> {
    let root = root.into();

    // Channel from the blocking notify callback to the watcher thread.
    let (event_tx, event_rx) = mpsc::unbounded_channel::<notify::Result<Event>>();

    let watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| {
            if let Err(err) = event_tx.send(res) {
                // Runs on the backend's thread.
                eprintln!("watchrun: failed to forward notify event: {err}");
            }
        },
        Config::default(),
    )?;

    let watch_set = WatchSet::new(watcher, DirectoryScanner::new(fs), exclude);
    let translator = EventTranslator::new(watch_set);

    let thread = thread::Builder::new()
        .name("watchrun-events".to_string())
        .spawn(move || forward_changes(root, translator, event_rx, runtime_tx))?;

    Ok(WatcherHandle { thread })
}

/// Body of the watcher thread: register the root, then translate raw
/// notifications until either side goes away.
pub fn forward_changes<S: Subscriber>(
    root: PathBuf,
    mut translator: EventTranslator<S>,
    mut event_rx: mpsc::UnboundedReceiver<notify::Result<Event>>,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) {
    translator.watch_set_mut().watch_recursive(&root);
    info!(root = ?root, "file watcher started");

    while let Some(res) = event_rx.blocking_recv() {
        let event = match res {
            Ok(event) => event,
            Err(err) => {
                error!(error = %err, "watcher error");
                let _ = runtime_tx.blocking_send(RuntimeEvent::WatcherFailed {
                    reason: err.to_string(),
                });
                return;
            }
        };

        debug!(?event, "received notify event");

        for change in translator.translate_event(&event) {
            let sent = runtime_tx.blocking_send(RuntimeEvent::Changed {
                at: change.timestamp,
            });
            if sent.is_err() {
                debug!("runtime channel closed; stopping watcher thread");
                return;
            }
        }
    }

    debug!("watcher event loop finished");
}
