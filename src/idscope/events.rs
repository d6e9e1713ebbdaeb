//! # Rewrite Events
//!
//! Two kinds of notification are published while rewriting:
//!
//! - [`EventKind::Id`]: once per newly generated identifier, with the token it
//!   replaced,
//! - [`EventKind::Ids`]: once per node that had at least one attribute
//!   changed, with the old and new value of every changed attribute.
//!
//! Handlers are called synchronously, in subscription order, from inside the
//! rewrite.

use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Id,
    Ids,
}

/// Old and new value of one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delta {
    pub old: String,
    pub new: String,
}

/// Changed attributes of one node, keyed by attribute name.
pub type Deltas = IndexMap<String, Delta>;

#[derive(Debug)]
pub struct IdChange<'a, N> {
    pub node: &'a N,
    pub name: &'a str,
    pub old: &'a str,
    pub new: &'a str,
}

#[derive(Debug)]
pub struct NodeChanges<'a, N> {
    pub node: &'a N,
    pub deltas: &'a Deltas,
}

#[derive(Debug)]
pub enum ScopeEvent<'a, N> {
    Id(IdChange<'a, N>),
    Ids(NodeChanges<'a, N>),
}

impl<N> ScopeEvent<'_, N> {
    pub fn kind(&self) -> EventKind {
        match self {
            ScopeEvent::Id(_) => EventKind::Id,
            ScopeEvent::Ids(_) => EventKind::Ids,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler<N> = Box<dyn Fn(&ScopeEvent<'_, N>)>;

pub struct EventBus<N> {
    handlers: Vec<(SubscriptionId, EventKind, Handler<N>)>,
    next_id: u64,
}

impl<N> Default for EventBus<N> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
            next_id: 0,
        }
    }
}

impl<N> EventBus<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: Fn(&ScopeEvent<'_, N>) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, kind, Box::new(handler)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(sub, _, _)| *sub != id);
        self.handlers.len() != before
    }

    pub fn publish(&self, event: &ScopeEvent<'_, N>) {
        let kind = event.kind();
        for (_, _, handler) in self.handlers.iter().filter(|(_, k, _)| *k == kind) {
            handler(event);
        }
    }

    pub fn has_subscribers(&self, kind: EventKind) -> bool {
        self.handlers.iter().any(|(_, k, _)| *k == kind)
    }
}
