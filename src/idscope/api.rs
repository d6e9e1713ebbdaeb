//! # API Facade
//!
//! The entry point for UI clients (the `idscope` binary, or anything else that
//! works with serialized element trees). It turns a [`ScopeConfig`] and a
//! per-call [`ScopeRequest`] into a configured [`Scoper`], runs it, and returns
//! a structured [`CmdResult`].
//!
//! Like the rest of the library it does no terminal I/O: reading documents and
//! printing results is the caller's business. The one exception is
//! configuration, which the facade loads from and saves to its config
//! directory.

use crate::attrs::{resolve, AttrNames, IdAttrs};
use crate::config::ScopeConfig;
use crate::error::{Result, ScopeError};
use crate::events::{Deltas, EventKind, ScopeEvent};
use crate::message::Message;
use crate::node::Element;
use crate::scope::IdMap;
use crate::scoper::{ScopeOptions, Scoper};
use serde::Serialize;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Per-call settings, layered over the loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct ScopeRequest {
    /// Rewrite the root element itself instead of its descendants
    pub own: bool,
    /// Scan these attributes in addition to the configured ones
    pub extra_attrs: Vec<String>,
    /// Scan only these attributes
    pub only_attrs: Vec<String>,
    pub prefix: Option<String>,
    /// Collect the rewrite events into the result
    pub record_events: bool,
}

impl ScopeRequest {
    fn id_attrs(&self) -> IdAttrs {
        if !self.only_attrs.is_empty() {
            let extra = self.extra_attrs.iter();
            IdAttrs::replace(self.only_attrs.iter().chain(extra).cloned())
        } else if !self.extra_attrs.is_empty() {
            IdAttrs::extend(self.extra_attrs.clone())
        } else {
            IdAttrs::Inherit
        }
    }

    fn options(&self) -> ScopeOptions<Element> {
        let options = ScopeOptions::new().with_id_attrs(self.id_attrs());
        match &self.prefix {
            Some(prefix) => options.with_prefix(prefix),
            None => options,
        }
    }
}

/// A rewrite event, detached from the tree so it can be reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum EventRecord {
    Id {
        tag: String,
        name: String,
        old: String,
        new: String,
    },
    Ids {
        tag: String,
        deltas: Deltas,
    },
}

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    SetPrefix(String),
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub events: Vec<EventRecord>,
    pub id_attrs: Vec<String>,
    pub config: Option<ScopeConfig>,
    pub messages: Vec<Message>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn with_events(mut self, events: Vec<EventRecord>) -> Self {
        self.events = events;
        self
    }

    pub fn with_id_attrs(mut self, names: &AttrNames) -> Self {
        self.id_attrs = names.iter().cloned().collect();
        self
    }

    pub fn with_config(mut self, config: ScopeConfig) -> Self {
        self.config = Some(config);
        self
    }
}

pub struct ScopeApi {
    config: ScopeConfig,
    config_dir: PathBuf,
}

impl ScopeApi {
    /// Load the configuration found in `config_dir` (defaults if absent).
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();
        let config = ScopeConfig::load(&config_dir)?;
        Ok(Self { config, config_dir })
    }

    pub fn with_config(config: ScopeConfig, config_dir: PathBuf) -> Self {
        Self { config, config_dir }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    fn scoper(&self) -> Scoper<Element> {
        Scoper::from_config(&self.config)
    }

    /// Rewrite `document` in place, extending `ids`.
    pub fn scope(
        &self,
        document: &Element,
        request: &ScopeRequest,
        ids: &mut IdMap,
    ) -> Result<CmdResult> {
        let mut scoper = self.scoper();
        let options = request.options();
        let records = Rc::new(RefCell::new(Vec::new()));

        if request.record_events {
            let sink = records.clone();
            scoper.subscribe(EventKind::Id, move |event| {
                sink.borrow_mut().push(EventRecord::from_event(event));
            });
            let sink = records.clone();
            scoper.subscribe(EventKind::Ids, move |event| {
                sink.borrow_mut().push(EventRecord::from_event(event));
            });
        }

        let mut result = CmdResult::default();
        result.messages.extend(scoper.diagnostics().iter().cloned());
        result.messages.extend(options.messages.iter().cloned());

        let before = ids.translations().count();
        if request.own {
            scoper.scope_own_ids_in(document, &options, ids)?;
        } else {
            scoper.scope_ids_in(document, &options, ids)?;
        }
        let generated = ids.translations().count() - before;

        result.add_message(Message::info(format!(
            "{} id{} generated",
            generated,
            if generated == 1 { "" } else { "s" }
        )));

        let events = records.borrow().clone();
        Ok(result.with_events(events))
    }

    /// The attribute names a rewrite with `request` would scan.
    pub fn id_attrs(&self, request: &ScopeRequest) -> CmdResult {
        let scoper = self.scoper();
        let caller = request.id_attrs();
        let names = resolve(&caller, scoper.id_attrs());
        let mut result = CmdResult::default().with_id_attrs(&names);
        result.messages.extend(scoper.diagnostics().iter().cloned());
        result
    }

    pub fn config(&mut self, action: ConfigAction) -> Result<CmdResult> {
        match action {
            ConfigAction::ShowAll => Ok(CmdResult::default().with_config(self.config.clone())),
            ConfigAction::SetPrefix(prefix) => {
                crate::token::Prefix::new(prefix.as_str())?;
                self.config.prefix = prefix;
                self.config.save(&self.config_dir)?;
                let mut result = CmdResult::default().with_config(self.config.clone());
                result.add_message(Message::success(format!(
                    "prefix set to {}",
                    self.config.prefix
                )));
                Ok(result)
            }
        }
    }
}

impl EventRecord {
    fn from_event(event: &ScopeEvent<'_, Element>) -> Self {
        match event {
            ScopeEvent::Id(change) => EventRecord::Id {
                tag: change.node.tag.clone(),
                name: change.name.to_string(),
                old: change.old.to_string(),
                new: change.new.to_string(),
            },
            ScopeEvent::Ids(changes) => EventRecord::Ids {
                tag: changes.node.tag.clone(),
                deltas: changes.deltas.clone(),
            },
        }
    }
}

/// Parse a JSON element tree.
pub fn parse_document(json: &str) -> Result<Element> {
    serde_json::from_str(json).map_err(ScopeError::Serialization)
}

pub fn render_document(document: &Element) -> Result<String> {
    serde_json::to_string_pretty(document).map_err(ScopeError::Serialization)
}
