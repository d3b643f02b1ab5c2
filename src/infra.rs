use crate::board::{MemoryStore, SnapshotError};
use crate::config::BoardConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Build the store, hydrated from the configured snapshot when one is set.
pub(crate) fn load_store(config: &BoardConfig) -> Result<MemoryStore, SnapshotError> {
    match &config.data_path {
        Some(path) => {
            let store = MemoryStore::from_path(path)?;
            info!(path = %path.display(), "board store hydrated from snapshot");
            Ok(store)
        }
        None => {
            info!("board store starting empty");
            Ok(MemoryStore::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{AccountId, JobRepository};
    use std::path::PathBuf;

    #[test]
    fn empty_store_without_snapshot() {
        let store = load_store(&BoardConfig::default()).expect("empty store builds");
        let jobs = store
            .jobs_by_company(&AccountId("biz-1".to_string()))
            .expect("query succeeds");
        assert!(jobs.is_empty());
    }

    #[test]
    fn missing_snapshot_file_is_an_io_error() {
        let config = BoardConfig {
            data_path: Some(PathBuf::from("/nonexistent/jobboard/snapshot.json")),
            ..BoardConfig::default()
        };
        assert!(matches!(load_store(&config), Err(SnapshotError::Io(_))));
    }
}
