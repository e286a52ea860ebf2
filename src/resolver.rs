//! License resolution for extracted dependency records.
//!
//! Each record is resolved independently: a cached license file is read when
//! one was found, a configured-but-empty cache is reported as a miss without
//! touching the network, and only records with no cache configured are sent
//! to the remote license service.

use futures_util::{StreamExt, stream};
use log::*;
use std::{
    collections::{HashMap, HashSet},
    fmt,
    sync::Arc,
};
use tokio::fs;

use crate::{
    cache::CacheLookupResult,
    dependency::{
        extractor,
        record::{ConfigFileInput, DependencyRecord},
    },
    error::LicenseError,
    remote::{LicenseKind, LicenseRequest, RemoteLicenseService},
};

/// Default number of records resolved concurrently.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Reason a license could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionFailure {
    /// A cache root was configured but holds no license for the dependency.
    CacheMiss,
    /// A cached license file was found but could not be read.
    CacheUnreadable(String),
    /// The remote service has no license for the repository.
    RemoteNotFound,
    /// The remote service failed for another reason.
    Remote(String),
}

impl fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionFailure::CacheMiss => write!(f, "no license in cache"),
            ResolutionFailure::CacheUnreadable(msg) => {
                write!(f, "unable to read cached license: {msg}")
            }
            ResolutionFailure::RemoteNotFound => {
                write!(f, "no license found remotely")
            }
            ResolutionFailure::Remote(msg) => {
                write!(f, "remote lookup failed: {msg}")
            }
        }
    }
}

impl From<LicenseError> for ResolutionFailure {
    fn from(err: LicenseError) -> Self {
        if err.is_not_found() {
            ResolutionFailure::RemoteNotFound
        } else {
            ResolutionFailure::Remote(err.to_string())
        }
    }
}

/// Result of resolving a single record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenseOutcome {
    FromCache { body: String },
    FromRemote { body: String, kind: LicenseKind },
    Failed(ResolutionFailure),
}

impl LicenseOutcome {
    pub fn body(&self) -> Option<&str> {
        match self {
            LicenseOutcome::FromCache { body } => Some(body),
            LicenseOutcome::FromRemote { body, .. } => Some(body),
            LicenseOutcome::Failed(_) => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, LicenseOutcome::Failed(_))
    }
}

/// A dependency record paired with its license outcome.
#[derive(Debug, Clone)]
pub struct ResolvedLibrary {
    pub record: DependencyRecord,
    pub outcome: LicenseOutcome,
}

/// Resolution statistics.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResolutionSummary {
    /// Total libraries processed.
    pub total: usize,
    /// Licenses read from the local cache.
    pub from_cache: usize,
    /// Licenses fetched from the remote service.
    pub from_remote: usize,
    /// Libraries without a license.
    pub failed: usize,
}

impl ResolutionSummary {
    pub fn from_libraries(libraries: &[ResolvedLibrary]) -> Self {
        libraries
            .iter()
            .fold(Self::default(), |mut summary, library| {
                summary.total += 1;
                match library.outcome {
                    LicenseOutcome::FromCache { .. } => summary.from_cache += 1,
                    LicenseOutcome::FromRemote { .. } => {
                        summary.from_remote += 1
                    }
                    LicenseOutcome::Failed(_) => summary.failed += 1,
                }
                summary
            })
    }
}

impl fmt::Display for ResolutionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "License Statistics:")?;
        writeln!(f, "  Total libraries: {}", self.total)?;
        writeln!(f, "  From cache: {}", self.from_cache)?;
        writeln!(f, "  From remote: {}", self.from_remote)?;
        writeln!(f, "  Failed: {}", self.failed)?;
        Ok(())
    }
}

/// Coordinates extraction, cache checks and remote fetches.
pub struct LicenseResolver {
    service: Arc<dyn RemoteLicenseService>,
}

impl LicenseResolver {
    pub fn new(service: Arc<dyn RemoteLicenseService>) -> Self {
        Self { service }
    }

    /// Resolve the license for a single record.
    pub async fn resolve(&self, record: &DependencyRecord) -> LicenseOutcome {
        match &record.cached_license {
            CacheLookupResult::Found(path) => {
                match fs::read_to_string(path).await {
                    Ok(body) => {
                        debug!(
                            "using cached license for {}: {}",
                            record.name,
                            path.display()
                        );
                        LicenseOutcome::FromCache { body }
                    }
                    Err(err) => {
                        warn!(
                            "failed to read cached license {}: {err}",
                            path.display()
                        );
                        LicenseOutcome::Failed(
                            ResolutionFailure::CacheUnreadable(err.to_string()),
                        )
                    }
                }
            }
            CacheLookupResult::CheckedAbsent => {
                warn!(
                    "no cached license for {}: skipping remote lookup",
                    record.name
                );
                LicenseOutcome::Failed(ResolutionFailure::CacheMiss)
            }
            CacheLookupResult::NotConfigured => {
                debug!("fetching license for {}/{}", record.owner, record.name);
                match self.service.fetch(LicenseRequest::from(record)).await {
                    Ok(license) => LicenseOutcome::FromRemote {
                        body: license.body,
                        kind: license.kind,
                    },
                    Err(err) => {
                        warn!(
                            "failed to fetch license for {}/{}: {err}",
                            record.owner, record.name
                        );
                        LicenseOutcome::Failed(err.into())
                    }
                }
            }
        }
    }

    /// Resolve many records with at most `concurrency` in flight. Output
    /// order matches input order.
    pub async fn resolve_all(
        &self,
        records: Vec<DependencyRecord>,
        concurrency: usize,
    ) -> Vec<ResolvedLibrary> {
        stream::iter(records)
            .map(|record| async move {
                let outcome = self.resolve(&record).await;
                ResolvedLibrary { record, outcome }
            })
            .buffered(concurrency.max(1))
            .collect()
            .await
    }

    /// Extract records from every input, drop duplicates (first occurrence
    /// wins) and resolve their licenses.
    pub async fn collect(
        &self,
        inputs: &[ConfigFileInput],
        renames: &HashMap<String, String>,
        concurrency: usize,
    ) -> Vec<ResolvedLibrary> {
        let mut seen: HashSet<DependencyRecord> = HashSet::new();
        let mut records: Vec<DependencyRecord> = vec![];

        for input in inputs {
            for record in extractor::extract(input, renames) {
                if !seen.insert(record.clone()) {
                    debug!("skipping duplicate dependency: {record}");
                    continue;
                }
                records.push(record);
            }
        }

        info!("resolving licenses for {} dependencies", records.len());

        self.resolve_all(records, concurrency).await
    }
}
