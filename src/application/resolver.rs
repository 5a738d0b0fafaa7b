//! Remote target resolution use case
//!
//! Tracks which remote context is "the" controlled target and resolves it
//! on demand with a cache-with-validation-and-fallback chain: reuse the
//! cached context when it still exists, otherwise adopt the first matching
//! existing context, otherwise create a fresh one. Lifecycle notifications
//! from the transport keep the cache in sync.
//!
//! All mutation of the cached id happens inside [`TargetResolver::handle_message`],
//! which runs to completion per message; rapid repeated searches therefore
//! read their own writes, even though the navigation side effects at the
//! target may still interleave.

use thiserror::Error;

use super::ports::{ContextId, ContextTransport, TransportError, TransportMessage};

/// Resolver configuration: where searches navigate and which contexts
/// count as controllable.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Destination prefix; the percent-encoded query is appended
    pub search_url: String,
    /// Substring identifying controllable context locations
    pub context_pattern: String,
}

impl ResolverConfig {
    /// Build the query-derived destination URL
    pub fn destination(&self, query: &str) -> String {
        format!("{}{}", self.search_url, urlencoding::encode(query))
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            search_url: crate::domain::config::app_config::DEFAULT_SEARCH_URL.to_string(),
            context_pattern: crate::domain::config::app_config::DEFAULT_CONTEXT_PATTERN.to_string(),
        }
    }
}

/// How a message was resolved, for logging and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The cached target was still valid and was navigated
    Navigated(ContextId),
    /// An existing matching context was adopted and navigated
    AdoptedExisting(ContextId),
    /// A fresh context was created and cached
    Created(ContextId),
    /// A lifecycle notification updated the cached target
    Adopted(ContextId),
    /// The cached target was cleared
    Cleared,
    /// The message did not concern the cached target
    Ignored,
}

/// Error surfaced when the fallback chain bottoms out
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Failed to open a target for \"{query}\": {source}")]
    CreateFailed {
        query: String,
        #[source]
        source: TransportError,
    },
}

/// Remote target resolution use case
pub struct TargetResolver<T: ContextTransport> {
    transport: T,
    config: ResolverConfig,
    cached: Option<ContextId>,
}

impl<T: ContextTransport> TargetResolver<T> {
    /// Create a resolver with no cached target
    pub fn new(transport: T, config: ResolverConfig) -> Self {
        Self {
            transport,
            config,
            cached: None,
        }
    }

    /// The currently cached target, if any
    pub fn cached_target(&self) -> Option<ContextId> {
        self.cached
    }

    /// Single entry point for all transport messages
    pub async fn handle_message(
        &mut self,
        message: TransportMessage,
    ) -> Result<Resolution, ResolveError> {
        match message {
            TransportMessage::SearchAndPlay { query } => self.search_and_play(&query).await,
            TransportMessage::AnnounceActiveContext { id } => {
                // Authoritative: a controlled context declared itself active.
                self.cached = Some(id);
                tracing::debug!(%id, "controlled context announced itself");
                Ok(Resolution::Adopted(id))
            }
            TransportMessage::Activated { id } => match self.transport.lookup(id).await {
                Ok(info) if info.url.contains(&self.config.context_pattern) => {
                    self.cached = Some(id);
                    tracing::debug!(%id, "adopted foregrounded context");
                    Ok(Resolution::Adopted(id))
                }
                _ => Ok(Resolution::Ignored),
            },
            TransportMessage::Removed { id } => {
                if self.cached == Some(id) {
                    self.cached = None;
                    tracing::info!(%id, "controlled context was closed");
                    Ok(Resolution::Cleared)
                } else {
                    Ok(Resolution::Ignored)
                }
            }
        }
    }

    /// Resolve a target for the query and navigate it:
    /// cached-and-valid, else first existing match, else create.
    async fn search_and_play(&mut self, query: &str) -> Result<Resolution, ResolveError> {
        let url = self.config.destination(query);

        if let Some(id) = self.cached {
            match self.transport.lookup(id).await {
                Ok(_) => match self.transport.navigate(id, &url, true).await {
                    Ok(()) => {
                        tracing::debug!(%id, "navigated cached target");
                        return Ok(Resolution::Navigated(id));
                    }
                    Err(e) => {
                        tracing::warn!(%id, "navigation of cached target failed: {e}");
                        self.cached = None;
                        return self.create_target(query, &url).await;
                    }
                },
                Err(e) => {
                    tracing::debug!(%id, "cached target invalid: {e}");
                    self.cached = None;
                }
            }
        }

        let existing = match self.transport.find_matching(&self.config.context_pattern).await {
            Ok(contexts) => contexts,
            Err(e) => {
                tracing::warn!("context query failed: {e}");
                Vec::new()
            }
        };

        if let Some(info) = existing.first() {
            self.cached = Some(info.id);
            match self.transport.navigate(info.id, &url, true).await {
                Ok(()) => {
                    tracing::debug!(id = %info.id, "adopted existing context");
                    return Ok(Resolution::AdoptedExisting(info.id));
                }
                Err(e) => {
                    tracing::warn!(id = %info.id, "navigation of adopted context failed: {e}");
                    self.cached = None;
                }
            }
        }

        self.create_target(query, &url).await
    }

    async fn create_target(&mut self, query: &str, url: &str) -> Result<Resolution, ResolveError> {
        match self.transport.create(url).await {
            Ok(info) => {
                self.cached = Some(info.id);
                tracing::info!(id = %info.id, "created new controlled context");
                Ok(Resolution::Created(info.id))
            }
            Err(source) => Err(ResolveError::CreateFailed {
                query: query.to_string(),
                source,
            }),
        }
    }
}
