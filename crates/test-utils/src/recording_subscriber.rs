use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use watchrun::watch::Subscriber;

/// Subscriber that records registrations in order instead of touching the
/// OS. Individual paths can be made to fail.
#[derive(Debug, Clone, Default)]
pub struct RecordingSubscriber {
    registered: Arc<Mutex<Vec<PathBuf>>>,
    failures: Arc<Mutex<HashMap<PathBuf, io::ErrorKind>>>,
}

impl RecordingSubscriber {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make registration of `path` fail with an IO error of `kind`.
    pub fn fail(&self, path: impl AsRef<Path>, kind: io::ErrorKind) {
        self.failures
            .lock()
            .unwrap()
            .insert(path.as_ref().to_path_buf(), kind);
    }

    /// Successfully registered paths, in registration order.
    pub fn registered(&self) -> Vec<PathBuf> {
        self.registered.lock().unwrap().clone()
    }
}

impl Subscriber for RecordingSubscriber {
    fn subscribe(&mut self, path: &Path) -> notify::Result<()> {
        if let Some(kind) = self.failures.lock().unwrap().get(path) {
            let err = io::Error::new(*kind, format!("injected failure for {path:?}"));
            return Err(notify::Error::io(err).add_path(path.to_path_buf()));
        }
        self.registered.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}
