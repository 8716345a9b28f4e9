//! Per-file folding and snapshot assembly.

use crate::config::{Config, FileErrorPolicy};
use crate::diff::{DiffProvider, provider_for};
use crate::error::{Result, TraceError};
use crate::provenance::FileTrackState;
use crate::snapshot::{Snapshot, assemble_with};
use crate::timefmt::TimeFormat;
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, error, info, warn};

use super::history::{FileHistory, History};

/// Run the whole pipeline with the default config (in-process diffs,
/// sequential, fail on the first faulty file).
pub fn process(history: &History) -> Result<Snapshot> {
    Driver::new(Config::default()).process(history)
}

/// Orchestrates tracking and assembly for a set of files.
pub struct Driver {
    config: Config,
    provider: Box<dyn DiffProvider>,
}

impl Driver {
    /// Driver using the diff backend named by the config.
    pub fn new(config: Config) -> Self {
        let provider = provider_for(&config);
        Self { config, provider }
    }

    /// Driver with an explicit diff backend.
    pub fn with_provider(config: Config, provider: Box<dyn DiffProvider>) -> Self {
        Self { config, provider }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fold one file's history into its final tracking state.
    ///
    /// Returns `Ok(None)` for a file with no versions, whatever its timestamps.
    pub fn track_file(&self, path: &str, history: &FileHistory) -> Result<Option<FileTrackState>> {
        let Some((base_version, later_versions)) = history.versions.split_first() else {
            return Ok(None);
        };
        history.validate()?;

        let mut state = FileTrackState::new(base_version, history.timestamps[0]);
        for (step, (version, &timestamp)) in later_versions
            .iter()
            .zip(&history.timestamps[1..])
            .enumerate()
        {
            state.apply(self.provider.as_ref(), version, timestamp)?;
            debug!(file = path, step = step + 1, lines = version.len(), "applied version");
        }

        Ok(Some(state))
    }

    /// Fold every file, honouring the config's parallelism and error policy.
    ///
    /// Returns the final states plus the files dropped under `skip`.
    pub fn track_all(
        &self,
        history: &History,
    ) -> Result<(BTreeMap<String, FileTrackState>, BTreeMap<String, String>)> {
        let results = self.fold_files(history)?;

        let mut states = BTreeMap::new();
        let mut failures = BTreeMap::new();

        for (path, result) in results {
            match result {
                Ok(Some(state)) => {
                    states.insert(path.clone(), state);
                }
                Ok(None) => warn!(file = %path, "file has no captured versions, skipping"),
                Err(err) => self.handle_failure(path, err, &mut failures)?,
            }
        }

        Ok((states, failures))
    }

    /// Track every file and assemble the annotated snapshot.
    pub fn process(&self, history: &History) -> Result<Snapshot> {
        let (states, failures) = self.track_all(history)?;

        let format = TimeFormat::from_config(&self.config);
        let mut assembly_failures = failures;
        let mut snapshot =
            assemble_with(&states, self.provider.as_ref(), &format, |path, err| {
                self.handle_failure(path, err, &mut assembly_failures)
            })?;

        for (path, reason) in assembly_failures {
            snapshot.record_failure(&path, reason);
        }

        info!(
            files = snapshot.files().len(),
            edits = snapshot.edits().len(),
            failed = snapshot.failed_files().len(),
            "snapshot assembled"
        );
        Ok(snapshot)
    }

    fn fold_files<'h>(
        &self,
        history: &'h History,
    ) -> Result<Vec<(&'h String, Result<Option<FileTrackState>>)>> {
        let workers = self.config.max_parallel_files;
        if workers <= 1 {
            return Ok(history
                .iter()
                .map(|(path, file)| (path, self.track_file(path, file)))
                .collect());
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| TraceError::UserError(format!("failed to start worker pool: {}", e)))?;

        Ok(pool.install(|| {
            history
                .par_iter()
                .map(|(path, file)| (path, self.track_file(path, file)))
                .collect()
        }))
    }

    fn handle_failure(
        &self,
        path: &str,
        err: TraceError,
        failures: &mut BTreeMap<String, String>,
    ) -> Result<()> {
        match self.config.on_file_error {
            FileErrorPolicy::Fail => Err(err.in_file(path)),
            FileErrorPolicy::Skip => {
                error!(file = path, error = %err, "dropping file with untrustworthy provenance");
                failures.insert(path.to_string(), err.to_string());
                Ok(())
            }
        }
    }
}
