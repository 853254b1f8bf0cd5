//! Entry removal by full archive rewrite
//!
//! The rewriter never edits an archive in place. It streams the source into
//! a staging artifact next to it, dropping the removal target and every
//! entry that is not a regular file, then moves the staging artifact over
//! the original in one repository-level step.
//!
//! ## Lifecycle
//!
//! ```text
//! Idle -> StagingCreated -> Copying -> CopyFailed -> Cleanup -> Idle
//!                                   -> CopyComplete -> Replacing -> ReplaceFailed -> Cleanup -> Idle
//!                                                                -> ReplaceOk -> Idle
//! ```
//!
//! ## Failure handling
//!
//! - staging creation/open failures are raised (precondition class)
//! - decode, framing and I/O failures in the copy loop are logged and
//!   reported as `completed = false`; the staging artifact is deleted
//! - a failed replace is logged; the staging artifact is deleted and the
//!   original stays untouched, while `completed` keeps its copy-loop value
//!   (`replaced` tells the two apart)

use crate::config::ArchiveConfig;
use crate::staging::staging_path_for;
use std::io::Read;
use tarsmith_codec::{ArchiveReader, ArchiveWriter};
use tarsmith_core::{
    Error, FileRepository, RepositoryWriter, Result, RewriteOutcome, RewritePhase,
};
use tracing::{debug, error, info, trace, warn};

#[derive(Debug, Default)]
struct CopyStats {
    copied: usize,
    skipped: usize,
    bytes: u64,
}

/// Tracks and traces the lifecycle of one invocation
struct PhaseTracker<'a> {
    archive_path: &'a str,
    phase: RewritePhase,
}

impl<'a> PhaseTracker<'a> {
    fn new(archive_path: &'a str) -> Self {
        PhaseTracker {
            archive_path,
            phase: RewritePhase::Idle,
        }
    }

    fn advance(&mut self, next: RewritePhase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "illegal rewrite transition {:?} -> {:?}",
            self.phase,
            next
        );
        debug!(
            target: "tarsmith::rewrite",
            archive = %self.archive_path,
            from = ?self.phase,
            to = ?next,
            "Rewrite phase"
        );
        self.phase = next;
    }
}

/// Removes entries from archives stored in a file repository
#[derive(Debug, Clone, Default)]
pub struct ArchiveRewriter {
    config: ArchiveConfig,
}

impl ArchiveRewriter {
    /// Create a rewriter with the given configuration
    pub fn new(config: ArchiveConfig) -> Self {
        ArchiveRewriter { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &ArchiveConfig {
        &self.config
    }

    /// Rewrite `archive_path` without the regular file named `target`
    ///
    /// `source` must be a stream over the current content of `archive_path`;
    /// it is consumed and released before the replace step.
    ///
    /// # Errors
    ///
    /// Only precondition failures (the staging artifact cannot be created or
    /// opened) are returned as `Err`. Every other failure yields
    /// `Ok(outcome)` with `completed == false`.
    pub fn remove_entry<R: Read>(
        &self,
        repo: &dyn FileRepository,
        archive_path: &str,
        source: R,
        target: &str,
    ) -> Result<RewriteOutcome> {
        let staging = staging_path_for(archive_path);
        let mut tracker = PhaseTracker::new(archive_path);
        let mut outcome = RewriteOutcome {
            staging_path: staging.clone(),
            ..RewriteOutcome::default()
        };

        repo.create_empty(&staging).map_err(|e| {
            Error::not_found(format!(
                "Unable To Create [{}] in [{}] : {}",
                staging,
                repo.name(),
                e
            ))
        })?;
        tracker.advance(RewritePhase::StagingCreated);

        let sink = match repo.open_write(&staging) {
            Ok(sink) => sink,
            Err(e) => {
                tracker.advance(RewritePhase::Cleanup);
                discard_staging(repo, &staging);
                tracker.advance(RewritePhase::Idle);
                return Err(Error::not_found(format!(
                    "Unable To Open [{}] in [{}] : {}",
                    archive_path,
                    repo.name(),
                    e
                )));
            }
        };

        tracker.advance(RewritePhase::Copying);
        match self.copy_entries(source, sink, target) {
            Ok(stats) => {
                tracker.advance(RewritePhase::CopyComplete);
                outcome.completed = true;
                outcome.entries_copied = stats.copied;
                outcome.entries_skipped = stats.skipped;
                outcome.bytes_copied = stats.bytes;
            }
            Err(e) => {
                warn!(
                    target: "tarsmith::rewrite",
                    archive = %archive_path,
                    entry = %target,
                    error = %e,
                    "Archive rewrite failed, original left untouched"
                );
                tracker.advance(RewritePhase::CopyFailed);
                tracker.advance(RewritePhase::Cleanup);
                discard_staging(repo, &staging);
                tracker.advance(RewritePhase::Idle);
                return Ok(outcome);
            }
        }

        tracker.advance(RewritePhase::Replacing);
        match repo.move_file(&staging, archive_path, true) {
            Ok(()) => {
                tracker.advance(RewritePhase::ReplaceOk);
                outcome.replaced = true;
                info!(
                    target: "tarsmith::rewrite",
                    archive = %archive_path,
                    entry = %target,
                    copied = outcome.entries_copied,
                    skipped = outcome.entries_skipped,
                    "Archive rewritten"
                );
            }
            Err(source) => {
                let e = Error::Replace {
                    from: staging.clone(),
                    to: archive_path.to_string(),
                    source,
                };
                error!(target: "tarsmith::rewrite", error = %e, "Archive replace failed");
                tracker.advance(RewritePhase::ReplaceFailed);
                tracker.advance(RewritePhase::Cleanup);
                discard_staging(repo, &staging);
            }
        }
        tracker.advance(RewritePhase::Idle);

        Ok(outcome)
    }

    /// Stream `source` into `sink`, skipping `target` and non-regular entries
    ///
    /// Both codec stacks own their raw streams, so every return path drops
    /// the codec layer before the stream beneath it.
    fn copy_entries<R: Read>(
        &self,
        source: R,
        sink: RepositoryWriter,
        target: &str,
    ) -> Result<CopyStats> {
        let mut reader = ArchiveReader::new(source);
        let mut writer = ArchiveWriter::new(sink, self.config.compression_level);
        let mut buf = vec![0u8; self.config.copy_buffer_size.max(1)];
        let mut stats = CopyStats::default();

        for entry in reader.entries()? {
            let mut entry = entry?;
            let metadata = entry.metadata().clone();
            if metadata.is_regular_file() && !metadata.name_matches(target) {
                stats.bytes += writer.append(&metadata, &mut entry, &mut buf)?;
                stats.copied += 1;
            } else {
                trace!(
                    target: "tarsmith::rewrite",
                    name = %metadata.name,
                    kind = ?metadata.kind,
                    "Skipping entry"
                );
                stats.skipped += 1;
            }
        }

        reader.finish()?;
        writer.finish()?;
        debug!(
            target: "tarsmith::rewrite",
            copied = stats.copied,
            skipped = stats.skipped,
            bytes = stats.bytes,
            "Copy loop finished"
        );
        Ok(stats)
    }
}

/// Best-effort removal of a staging artifact
fn discard_staging(repo: &dyn FileRepository, staging: &str) {
    if let Err(e) = repo.delete_file(staging) {
        error!(
            target: "tarsmith::rewrite",
            staging = %staging,
            error = %e,
            "Failed to remove staging artifact"
        );
    }
}
