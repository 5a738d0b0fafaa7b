//! In-process context transport
//!
//! Keeps a registry of simulated browsing contexts and delivers
//! [`TransportMessage`]s over a channel, in order, to whoever drives the
//! resolver. Context lifecycle changes (open, close, focus) post the
//! matching notifications, mirroring how a tab layer reports them.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::application::ports::{
    ContextId, ContextInfo, ContextTransport, MessageBus, TransportError, TransportMessage,
};

#[derive(Debug, Default)]
struct Registry {
    contexts: BTreeMap<u64, ContextInfo>,
    next_id: u64,
}

impl Registry {
    fn mint(&mut self, url: &str, active: bool) -> ContextInfo {
        self.next_id += 1;
        let info = ContextInfo {
            id: ContextId::new(self.next_id),
            url: url.to_string(),
            active,
        };
        if active {
            self.deactivate_all();
        }
        self.contexts.insert(self.next_id, info.clone());
        info
    }

    fn deactivate_all(&mut self) {
        for info in self.contexts.values_mut() {
            info.active = false;
        }
    }
}

/// In-process transport with a simulated context registry
#[derive(Clone)]
pub struct LoopbackTransport {
    registry: Arc<Mutex<Registry>>,
    messages: UnboundedSender<TransportMessage>,
}

impl LoopbackTransport {
    /// Create the transport and the receiving end of its message stream
    pub fn new() -> (Self, UnboundedReceiver<TransportMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                registry: Arc::new(Mutex::new(Registry::default())),
                messages: tx,
            },
            rx,
        )
    }

    /// Simulate a user opening a page; posts an activation notification
    pub fn open(&self, url: &str) -> ContextId {
        let info = self.registry.lock().unwrap().mint(url, true);
        let _ = self
            .messages
            .send(TransportMessage::Activated { id: info.id });
        info.id
    }

    /// Simulate closing a context; posts a removal notification
    pub fn close(&self, id: ContextId) {
        let removed = self
            .registry
            .lock()
            .unwrap()
            .contexts
            .remove(&id.raw())
            .is_some();
        if removed {
            let _ = self.messages.send(TransportMessage::Removed { id });
        }
    }

    /// Simulate the user foregrounding an existing context
    pub fn focus(&self, id: ContextId) {
        {
            let mut registry = self.registry.lock().unwrap();
            if !registry.contexts.contains_key(&id.raw()) {
                return;
            }
            registry.deactivate_all();
            if let Some(info) = registry.contexts.get_mut(&id.raw()) {
                info.active = true;
            }
        }
        let _ = self.messages.send(TransportMessage::Activated { id });
    }

    /// Simulate a controlled context announcing itself as active
    pub fn announce(&self, id: ContextId) {
        let _ = self
            .messages
            .send(TransportMessage::AnnounceActiveContext { id });
    }

    /// Inspect a context, for the CLI status line and tests
    pub fn context(&self, id: ContextId) -> Option<ContextInfo> {
        self.registry.lock().unwrap().contexts.get(&id.raw()).cloned()
    }

    /// Number of live contexts
    pub fn context_count(&self) -> usize {
        self.registry.lock().unwrap().contexts.len()
    }
}

#[async_trait]
impl ContextTransport for LoopbackTransport {
    async fn lookup(&self, id: ContextId) -> Result<ContextInfo, TransportError> {
        self.registry
            .lock()
            .unwrap()
            .contexts
            .get(&id.raw())
            .cloned()
            .ok_or(TransportError::UnknownContext(id))
    }

    async fn find_matching(&self, pattern: &str) -> Result<Vec<ContextInfo>, TransportError> {
        Ok(self
            .registry
            .lock()
            .unwrap()
            .contexts
            .values()
            .filter(|info| info.url.contains(pattern))
            .cloned()
            .collect())
    }

    async fn navigate(
        &self,
        id: ContextId,
        url: &str,
        foreground: bool,
    ) -> Result<(), TransportError> {
        let mut registry = self.registry.lock().unwrap();
        if !registry.contexts.contains_key(&id.raw()) {
            return Err(TransportError::UnknownContext(id));
        }
        if foreground {
            registry.deactivate_all();
        }
        let info = registry
            .contexts
            .get_mut(&id.raw())
            .ok_or(TransportError::UnknownContext(id))?;
        info.url = url.to_string();
        if foreground {
            info.active = true;
        }
        Ok(())
    }

    async fn create(&self, url: &str) -> Result<ContextInfo, TransportError> {
        Ok(self.registry.lock().unwrap().mint(url, true))
    }
}

#[async_trait]
impl MessageBus for LoopbackTransport {
    async fn post(&self, message: TransportMessage) -> Result<(), TransportError> {
        self.messages
            .send(message)
            .map_err(|e| TransportError::Unavailable(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_posts_activation_and_registers() {
        let (transport, mut rx) = LoopbackTransport::new();

        let id = transport.open("https://media.example/home");

        assert_eq!(
            rx.try_recv().unwrap(),
            TransportMessage::Activated { id }
        );
        let info = transport.lookup(id).await.unwrap();
        assert!(info.active);
    }

    #[tokio::test]
    async fn close_posts_removal_once() {
        let (transport, mut rx) = LoopbackTransport::new();
        let id = transport.open("https://media.example/home");
        let _ = rx.try_recv();

        transport.close(id);
        transport.close(id);

        assert_eq!(rx.try_recv().unwrap(), TransportMessage::Removed { id });
        assert!(rx.try_recv().is_err());
        assert!(transport.lookup(id).await.is_err());
    }

    #[tokio::test]
    async fn navigate_updates_url_and_foregrounds() {
        let (transport, _rx) = LoopbackTransport::new();
        let first = transport.open("https://media.example/one");
        let second = transport.open("https://media.example/two");

        transport
            .navigate(first, "https://media.example/results?q=x", true)
            .await
            .unwrap();

        let info = transport.lookup(first).await.unwrap();
        assert!(info.active);
        assert!(info.url.contains("results"));
        assert!(!transport.lookup(second).await.unwrap().active);
    }

    #[tokio::test]
    async fn navigate_unknown_context_fails() {
        let (transport, _rx) = LoopbackTransport::new();
        let err = transport
            .navigate(ContextId::new(99), "https://media.example", true)
            .await;
        assert!(matches!(err, Err(TransportError::UnknownContext(_))));
    }

    #[tokio::test]
    async fn find_matching_filters_by_pattern() {
        let (transport, _rx) = LoopbackTransport::new();
        transport.open("https://media.example/watch");
        transport.open("https://unrelated.example/page");

        let matching = transport.find_matching("media.example").await.unwrap();
        assert_eq!(matching.len(), 1);
        assert!(matching[0].url.contains("media.example"));
    }

    #[tokio::test]
    async fn create_mints_fresh_active_context() {
        let (transport, _rx) = LoopbackTransport::new();
        let first = transport.create("https://media.example/a").await.unwrap();
        let second = transport.create("https://media.example/b").await.unwrap();

        assert_ne!(first.id, second.id);
        assert!(transport.lookup(second.id).await.unwrap().active);
        assert!(!transport.lookup(first.id).await.unwrap().active);
        assert_eq!(transport.context_count(), 2);
    }

    #[tokio::test]
    async fn posted_messages_arrive_in_order() {
        let (transport, mut rx) = LoopbackTransport::new();

        transport
            .post(TransportMessage::SearchAndPlay { query: "a".into() })
            .await
            .unwrap();
        transport
            .post(TransportMessage::SearchAndPlay { query: "b".into() })
            .await
            .unwrap();

        assert_eq!(
            rx.try_recv().unwrap(),
            TransportMessage::SearchAndPlay { query: "a".into() }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            TransportMessage::SearchAndPlay { query: "b".into() }
        );
    }
}
