//! Collaborators shared by the commit pipeline and the tool adapters.

use std::sync::Arc;

use crate::commit::ExclusionPolicy;
use crate::config::Config;
use crate::git::{Git2Repository, VersionControl};
use crate::llm::{self, CompletionService};

/// Explicit context handed to every operation instead of process-wide globals.
#[derive(Clone)]
pub struct ReviewContext {
    version_control: Arc<dyn VersionControl>,
    completion: Arc<dyn CompletionService>,
    exclusions: ExclusionPolicy,
}

impl ReviewContext {
    /// Context with the default exclusion list.
    pub fn new(
        version_control: Arc<dyn VersionControl>,
        completion: Arc<dyn CompletionService>,
    ) -> Self {
        Self {
            version_control,
            completion,
            exclusions: ExclusionPolicy::default(),
        }
    }

    pub fn with_exclusions(mut self, exclusions: ExclusionPolicy) -> Self {
        self.exclusions = exclusions;
        self
    }

    /// Wire the git2 backend and the configured completion provider.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(Git2Repository::new()),
            llm::completion_service(config),
        )
        .with_exclusions(config.exclusions.clone())
    }

    pub fn version_control(&self) -> &dyn VersionControl {
        self.version_control.as_ref()
    }

    pub fn completion(&self) -> &dyn CompletionService {
        self.completion.as_ref()
    }

    pub fn exclusions(&self) -> &ExclusionPolicy {
        &self.exclusions
    }
}

impl std::fmt::Debug for ReviewContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewContext")
            .field("exclusions", &self.exclusions)
            .finish_non_exhaustive()
    }
}
