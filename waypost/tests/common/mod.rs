use waypost::testing::RecordingTemplates;
use waypost::{
    ChannelBus, DISPATCH_VAR, DispatchError, DispatchOutcome, DispatchPath, PathDispatcher,
    PathRegistry, ResolvedQuery,
};

// ============================================================================
// Test Embedding
// ============================================================================

/// A minimal embedding: a registry wired to the in-memory host seams.
pub struct Host {
    pub registry: PathRegistry,
    pub bus: ChannelBus<DispatchPath>,
    pub templates: RecordingTemplates,
}

impl Host {
    pub fn new() -> Self {
        Self {
            registry: PathRegistry::new(),
            bus: ChannelBus::new(),
            templates: RecordingTemplates::new(),
        }
    }

    pub fn dispatch(&self, query: &ResolvedQuery) -> Result<DispatchOutcome, DispatchError> {
        PathDispatcher::new(&self.registry, &self.bus, &self.templates).dispatch(query)
    }
}

/// A main query whose `dispatch` variable resolved to `path`.
pub fn main_query(path: &str) -> ResolvedQuery {
    ResolvedQuery::new().with_var(DISPATCH_VAR, path)
}
