//! API application state shared across handlers.

use std::sync::Arc;

use vortex_config::AccessKey;
use vortex_core::JobWorkflow;
use vortex_store::ArtifactStore;

pub(crate) struct ApiState {
    pub(crate) access_key: AccessKey,
    pub(crate) jobs: Arc<dyn JobWorkflow>,
    pub(crate) store: ArtifactStore,
}

impl ApiState {
    pub(crate) fn new(
        access_key: AccessKey,
        jobs: Arc<dyn JobWorkflow>,
        store: ArtifactStore,
    ) -> Self {
        Self {
            access_key,
            jobs,
            store,
        }
    }
}
