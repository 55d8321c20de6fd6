//! Shared state handed to every event handler invocation

use std::sync::Arc;

use relay_cache::{EntityCaches, GuildSetupTracker};

use crate::builder::EntityBuilder;
use crate::dispatch::EventDispatcher;

/// Everything a handler needs: caches, setup tracking, and the dispatcher
#[derive(Debug, Clone)]
pub struct GatewayState {
    caches: Arc<EntityCaches>,
    setup: Arc<GuildSetupTracker>,
    dispatcher: Arc<EventDispatcher>,
}

impl GatewayState {
    /// Create a new state bundle
    #[must_use]
    pub fn new(
        caches: Arc<EntityCaches>,
        setup: Arc<GuildSetupTracker>,
        dispatcher: Arc<EventDispatcher>,
    ) -> Self {
        Self {
            caches,
            setup,
            dispatcher,
        }
    }

    /// The shared entity caches
    pub fn caches(&self) -> &EntityCaches {
        &self.caches
    }

    /// The guild setup tracker
    pub fn setup(&self) -> &GuildSetupTracker {
        &self.setup
    }

    /// The event dispatcher
    pub fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    /// An entity builder writing into this state's caches
    pub fn entity_builder(&self) -> EntityBuilder {
        EntityBuilder::new(Arc::clone(&self.caches))
    }
}
