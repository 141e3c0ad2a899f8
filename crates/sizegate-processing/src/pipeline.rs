//! Upload filter pipeline
//!
//! Filters run on every upload before the file is moved to final storage.
//! They are registered by typed reference with a priority; lower priorities
//! run first and filters sharing a priority run in registration order.

use std::fmt::Debug;
use std::sync::Arc;

use sizegate_core::UploadDescriptor;

pub const DEFAULT_PRIORITY: i32 = 10;

/// A step in the pre-storage upload chain.
///
/// Filters report problems by setting the descriptor's `error`; they must
/// not panic and must return the descriptor they were given.
pub trait UploadFilter: Send + Sync + Debug {
    fn name(&self) -> &str;

    fn filter(&self, descriptor: UploadDescriptor) -> UploadDescriptor;
}

#[derive(Debug, Clone)]
struct RegisteredFilter {
    priority: i32,
    filter: Arc<dyn UploadFilter>,
}

#[derive(Debug, Clone, Default)]
pub struct UploadPipeline {
    filters: Vec<RegisteredFilter>,
}

impl UploadPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, filter: Arc<dyn UploadFilter>, priority: i32) {
        tracing::debug!(filter = filter.name(), priority, "Registered upload filter");
        self.filters.push(RegisteredFilter { priority, filter });
        // stable: equal priorities keep registration order
        self.filters.sort_by_key(|f| f.priority);
    }

    /// Names of the registered filters in execution order.
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.filter.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Run every filter in order, threading the descriptor through.
    pub fn run(&self, descriptor: UploadDescriptor) -> UploadDescriptor {
        self.filters.iter().fold(descriptor, |descriptor, registered| {
            let was_rejected = descriptor.is_rejected();
            let descriptor = registered.filter.filter(descriptor);
            if !was_rejected && descriptor.is_rejected() {
                tracing::debug!(filter = registered.filter.name(), "Upload rejected by filter");
            }
            descriptor
        })
    }
}
