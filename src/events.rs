//! In-process publish/subscribe for application events.
//!
//! The dispatcher is assembled once at startup and shared through
//! [`crate::startup::AppState`]. Dispatching is synchronous: every listener
//! has run, or one has failed, by the time [`EventDispatcher::dispatch`]
//! returns.

use std::{collections::HashMap, fmt, sync::Arc};

use crate::{domain::OperatorRecord, Result};

pub const OPERATOR_LOGIN: &str = "operatorLogin";

/// Payload of [`OPERATOR_LOGIN`].
#[derive(Debug, Clone)]
pub struct OperatorLoginEvent {
    pub operator: OperatorRecord,
    pub remember: bool,
}

#[derive(Debug, Clone)]
pub enum Event {
    OperatorLogin(OperatorLoginEvent),
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::OperatorLogin(_) => OPERATOR_LOGIN,
        }
    }
}

pub trait EventListener: Send + Sync {
    /// Used in logs and error messages.
    fn name(&self) -> &str;

    fn handle(&self, event: &Event) -> Result<()>;
}

#[derive(Default, Clone)]
pub struct EventDispatcher {
    listeners: HashMap<&'static str, Vec<Arc<dyn EventListener>>>,
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners: HashMap<_, Vec<_>> = self
            .listeners
            .iter()
            .map(|(event, listeners)| (*event, listeners.iter().map(|l| l.name()).collect()))
            .collect();
        f.debug_struct("EventDispatcher")
            .field("listeners", &listeners)
            .finish()
    }
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listeners run in the order they were subscribed.
    #[must_use]
    pub fn subscribe(mut self, event: &'static str, listener: Arc<dyn EventListener>) -> Self {
        self.listeners.entry(event).or_default().push(listener);
        self
    }

    /// Calls every listener subscribed to the event. The first failing
    /// listener aborts the dispatch and its error is returned.
    #[tracing::instrument(name = "Dispatch event", skip_all, fields(event = event.name()))]
    pub fn dispatch(&self, event: &Event) -> Result<()> {
        let Some(listeners) = self.listeners.get(event.name()) else {
            return Ok(());
        };
        for listener in listeners {
            tracing::debug!(listener = listener.name(), "notifying listener");
            listener.handle(event)?;
        }
        Ok(())
    }
}

/// Writes every successful operator login to the log.
#[derive(Debug, Default)]
pub struct AuditLogListener;

impl EventListener for AuditLogListener {
    fn name(&self) -> &str {
        "audit_log"
    }

    fn handle(&self, event: &Event) -> Result<()> {
        match event {
            Event::OperatorLogin(login) => tracing::info!(
                operator_id = %login.operator.operator_id,
                login = %login.operator.login,
                remember = login.remember,
                "operator logged in"
            ),
        }
        Ok(())
    }
}
