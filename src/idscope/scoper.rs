//! # Scoping Identifiers
//!
//! A [`Scoper`] rewrites identifier attributes so they are unique on the page
//! while references between nodes keep pointing at the right place:
//!
//! ```text
//! before                               after
//! <div id="panel">                     <div id="scoped-id-panel-Xk2...">
//! <button aria-controls="panel">       <button aria-controls="scoped-id-panel-Xk2...">
//! ```
//!
//! Two entry points, each with a variant taking a caller-owned [`IdMap`]:
//!
//! - [`Scoper::scope_ids`] / [`Scoper::scope_ids_in`]: every descendant of a
//!   root that carries an identifier attribute, under one mapping,
//! - [`Scoper::scope_own_ids`] / [`Scoper::scope_own_ids_in`]: a single node.
//!
//! The root passed to `scope_ids` is not rewritten itself.
//!
//! ## Per token
//!
//! Attribute values are whitespace-separated lists (`aria-labelledby="a b"`).
//! Each token goes through the decision chain (see [`crate::decision`]):
//!
//! | decision      | output                                       | `Id` event |
//! |---------------|----------------------------------------------|------------|
//! | `Replace(s)`  | `s`                                          | no         |
//! | `Exclude`     | dropped                                      | no         |
//! | `Include`     | mapped replacement, generated on first sight | first only |
//!
//! The rewritten list is joined with single spaces and written back only when
//! it differs from the trimmed original.
//!
//! ## Failure
//!
//! A failing decision function aborts the call. Attributes and nodes already
//! written stay rewritten.

use crate::attrs::{default_id_attrs, resolve, AttrNames, IdAttrs};
use crate::config::ScopeConfig;
use crate::decision::{self, Decision, DefaultDecision, DynDecide, Id};
use crate::error::Result;
use crate::events::{
    Delta, Deltas, EventBus, EventKind, IdChange, NodeChanges, ScopeEvent, SubscriptionId,
};
use crate::message::Message;
use crate::node::{Node, Tree};
use crate::scope::IdMap;
use crate::token::{IdGenerator, Prefix, RandomIds};
use std::rc::Rc;
use tracing::debug;

/// Options accepted both when building a [`Scoper`] and per call. Per-call
/// values refine the ones the scoper was built with.
pub struct ScopeOptions<N> {
    pub id_attrs: IdAttrs,
    pub decision: Option<Rc<DynDecide<N>>>,
    pub prefix: Option<Prefix>,
    /// Warnings raised while building these options.
    pub messages: Vec<Message>,
}

impl<N> Default for ScopeOptions<N> {
    fn default() -> Self {
        Self {
            id_attrs: IdAttrs::Inherit,
            decision: None,
            prefix: None,
            messages: Vec::new(),
        }
    }
}

impl<N> Clone for ScopeOptions<N> {
    fn clone(&self) -> Self {
        Self {
            id_attrs: self.id_attrs.clone(),
            decision: self.decision.clone(),
            prefix: self.prefix.clone(),
            messages: self.messages.clone(),
        }
    }
}

impl<N> ScopeOptions<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id_attrs(mut self, id_attrs: IdAttrs) -> Self {
        self.id_attrs = id_attrs;
        self
    }

    pub fn with_decision(mut self, decision: Rc<DynDecide<N>>) -> Self {
        self.decision = Some(decision);
        self
    }

    /// An invalid prefix falls back to the default and leaves a warning in
    /// [`ScopeOptions::messages`].
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        let (prefix, message) = Prefix::or_default(prefix);
        self.prefix = Some(prefix);
        self.messages.extend(message);
        self
    }
}

pub struct Scoper<N> {
    id_attrs: AttrNames,
    decisions: Vec<Rc<DynDecide<N>>>,
    prefix: Prefix,
    generator: Box<dyn IdGenerator>,
    events: EventBus<N>,
    diagnostics: Vec<Message>,
}

impl<N: Node + 'static> Default for Scoper<N> {
    fn default() -> Self {
        Self::new(ScopeOptions::default())
    }
}

impl<N: Node + 'static> Scoper<N> {
    pub fn new(options: ScopeOptions<N>) -> Self {
        let base = default_id_attrs();
        let id_attrs = resolve(&options.id_attrs, &base).into_owned();

        let mut decisions: Vec<Rc<DynDecide<N>>> = vec![Rc::new(DefaultDecision)];
        decisions.extend(options.decision);

        Self {
            id_attrs,
            decisions,
            prefix: options.prefix.unwrap_or_default(),
            generator: Box::new(RandomIds),
            events: EventBus::new(),
            diagnostics: options.messages,
        }
    }

    pub fn from_config(config: &ScopeConfig) -> Self {
        Self::new(config.to_options())
    }

    /// Replace the identifier source, e.g. with a deterministic one.
    pub fn with_generator(mut self, generator: impl IdGenerator + 'static) -> Self {
        self.generator = Box::new(generator);
        self
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: Fn(&ScopeEvent<'_, N>) + 'static,
    {
        self.events.subscribe(kind, handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Warnings raised while building this scoper.
    pub fn diagnostics(&self) -> &[Message] {
        &self.diagnostics
    }

    pub fn id_attrs(&self) -> &AttrNames {
        &self.id_attrs
    }

    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    /// Rewrite the identifiers of `node` itself, under a fresh mapping.
    pub fn scope_own_ids<'n>(&self, node: &'n N, options: &ScopeOptions<N>) -> Result<&'n N> {
        self.scope_own_ids_in(node, options, &mut IdMap::new())
    }

    /// Rewrite the identifiers of `node` itself, reusing and extending `ids`.
    pub fn scope_own_ids_in<'n>(
        &self,
        node: &'n N,
        options: &ScopeOptions<N>,
        ids: &mut IdMap,
    ) -> Result<&'n N> {
        let id_attrs = resolve(&options.id_attrs, &self.id_attrs);
        self.rewrite(node, &id_attrs, options, ids)
    }

    fn rewrite<'n>(
        &self,
        node: &'n N,
        id_attrs: &AttrNames,
        options: &ScopeOptions<N>,
        ids: &mut IdMap,
    ) -> Result<&'n N> {
        let prefix = options.prefix.as_ref().unwrap_or(&self.prefix);
        let decisions: Vec<Rc<DynDecide<N>>> = self
            .decisions
            .iter()
            .cloned()
            .chain(options.decision.clone())
            .collect();
        let pipeline = decision::pipeline();
        let notify = self.events.has_subscribers(EventKind::Ids);
        let mut deltas = Deltas::new();
        let mut changed = 0;

        for name in id_attrs {
            let old_ids = node.attribute(name).unwrap_or_default();
            let old_ids = old_ids.trim();

            if old_ids.is_empty() {
                continue;
            }

            let mut mapped = Vec::new();

            for token in old_ids.split_whitespace() {
                let chain = pipeline.build(decisions.iter().cloned());

                match chain.call((node, Id::new(name.as_str(), token)))? {
                    Decision::Exclude => {}
                    Decision::Replace(literal) => mapped.push(literal),
                    Decision::Include => {
                        mapped.push(self.translate(node, name, token, prefix, ids))
                    }
                }
            }

            let new_ids = mapped.join(" ");

            if new_ids == old_ids {
                continue;
            }

            node.set_attribute(name, &new_ids);
            changed += 1;
            if notify {
                deltas.insert(
                    name.clone(),
                    Delta {
                        old: old_ids.to_string(),
                        new: new_ids,
                    },
                );
            }
        }

        if changed > 0 {
            debug!(attributes = changed, "rewrote node ids");
        }
        if !deltas.is_empty() {
            self.events.publish(&ScopeEvent::Ids(NodeChanges {
                node,
                deltas: &deltas,
            }));
        }

        Ok(node)
    }

    fn translate(
        &self,
        node: &N,
        name: &str,
        token: &str,
        prefix: &Prefix,
        ids: &mut IdMap,
    ) -> String {
        if let Some(cached) = ids.get(token) {
            return cached.to_string();
        }

        let new_id = self.generator.generate(token, prefix);
        ids.insert(token, &new_id);
        debug!(name, old = token, new = %new_id, "generated id");

        self.events.publish(&ScopeEvent::Id(IdChange {
            node,
            name,
            old: token,
            new: &new_id,
        }));

        new_id
    }
}

impl<N: Tree + 'static> Scoper<N> {
    /// Rewrite the identifiers of every matching descendant of `root` under a
    /// fresh mapping, so references between them stay intact.
    pub fn scope_ids<'r>(&self, root: &'r N, options: &ScopeOptions<N>) -> Result<&'r N> {
        self.scope_ids_in(root, options, &mut IdMap::new())
    }

    /// Like [`Scoper::scope_ids`], reusing and extending `ids`.
    pub fn scope_ids_in<'r>(
        &self,
        root: &'r N,
        options: &ScopeOptions<N>,
        ids: &mut IdMap,
    ) -> Result<&'r N> {
        // resolved once: an augmenting function runs once per subtree
        let id_attrs = resolve(&options.id_attrs, &self.id_attrs);

        for descendant in root.select(&id_attrs) {
            self.rewrite(descendant, &id_attrs, options, ids)?;
        }

        Ok(root)
    }
}

/// Scope the descendants of `root` with a default [`Scoper`].
pub fn scope_ids<'r, N: Tree + 'static>(root: &'r N, options: &ScopeOptions<N>) -> Result<&'r N> {
    Scoper::default().scope_ids(root, options)
}

/// Scope the identifiers of `node` itself with a default [`Scoper`].
pub fn scope_own_ids<'n, N: Node + 'static>(
    node: &'n N,
    options: &ScopeOptions<N>,
) -> Result<&'n N> {
    Scoper::default().scope_own_ids(node, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::decision;
    use crate::error::{DecisionError, ScopeError};
    use crate::message::MessageLevel;
    use crate::node::Element;
    use crate::token::fixtures::SequentialIds;
    use std::cell::RefCell;

    type Log = Rc<RefCell<Vec<String>>>;

    fn scoper(options: ScopeOptions<Element>) -> (Scoper<Element>, Log) {
        let mut scoper = Scoper::new(options).with_generator(SequentialIds::new());
        let log: Log = Rc::default();

        let l = log.clone();
        scoper.subscribe(EventKind::Id, move |event| {
            if let ScopeEvent::Id(change) = event {
                l.borrow_mut()
                    .push(format!("{}: {} -> {}", change.name, change.old, change.new));
            }
        });
        let l = log.clone();
        scoper.subscribe(EventKind::Ids, move |event| {
            if let ScopeEvent::Ids(changes) = event {
                let names: Vec<&str> = changes.deltas.keys().map(String::as_str).collect();
                l.borrow_mut().push(format!("ids: {}", names.join(",")));
            }
        });

        (scoper, log)
    }

    fn events(log: &Log) -> Vec<String> {
        log.borrow().clone()
    }

    fn attr(el: &Element, name: &str) -> Option<String> {
        el.attribute(name)
    }

    fn none() -> ScopeOptions<Element> {
        ScopeOptions::new()
    }

    #[test]
    fn rewrites_own_id() {
        let (scoper, log) = scoper(none());
        let div = Element::new("div").with_attr("id", "panel");

        let returned = scoper.scope_own_ids(&div, &none()).unwrap();

        assert!(std::ptr::eq(returned, &div));
        assert_eq!(attr(&div, "id").as_deref(), Some("scoped-id-panel-1"));
        assert_eq!(
            events(&log),
            vec!["id: panel -> scoped-id-panel-1", "ids: id"]
        );
    }

    #[test]
    fn preserves_token_order() {
        let (scoper, _) = scoper(none());
        let el = Element::new("div").with_attr("aria-labelledby", "a b c");
        scoper.scope_own_ids(&el, &none()).unwrap();
        assert_eq!(
            attr(&el, "aria-labelledby").as_deref(),
            Some("scoped-id-a-1 scoped-id-b-2 scoped-id-c-3")
        );
    }

    #[test]
    fn normalizes_whitespace_between_tokens() {
        let (scoper, _) = scoper(none());
        let el = Element::new("div").with_attr("aria-owns", "  a \t  b\n");
        scoper.scope_own_ids(&el, &none()).unwrap();
        assert_eq!(
            attr(&el, "aria-owns").as_deref(),
            Some("scoped-id-a-1 scoped-id-b-2")
        );
    }

    #[test]
    fn repeated_token_reuses_replacement() {
        let (scoper, log) = scoper(none());
        let el = Element::new("div")
            .with_attr("id", "x")
            .with_attr("aria-describedby", "x x");
        scoper.scope_own_ids(&el, &none()).unwrap();

        assert_eq!(attr(&el, "id").as_deref(), Some("scoped-id-x-1"));
        assert_eq!(
            attr(&el, "aria-describedby").as_deref(),
            Some("scoped-id-x-1 scoped-id-x-1")
        );
        assert_eq!(
            events(&log),
            vec!["id: x -> scoped-id-x-1", "ids: id,aria-describedby"]
        );
    }

    #[test]
    fn excluded_tokens_are_removed() {
        let (scoper, _) = scoper(none());
        let skip_b = none().with_decision(decision(|_: &Element, id, next| {
            if id.value == "b" {
                Ok(Decision::Exclude)
            } else {
                next.call()
            }
        }));
        let el = Element::new("div").with_attr("aria-controls", "a b c");
        scoper.scope_own_ids(&el, &skip_b).unwrap();
        assert_eq!(
            attr(&el, "aria-controls").as_deref(),
            Some("scoped-id-a-1 scoped-id-c-2")
        );
    }

    #[test]
    fn for_on_a_non_label_is_emptied() {
        let (scoper, log) = scoper(none());
        let output = Element::new("output").with_attr("for", "panel1");
        scoper.scope_own_ids(&output, &none()).unwrap();
        assert_eq!(attr(&output, "for").as_deref(), Some(""));
        assert_eq!(events(&log), vec!["ids: for"]);
    }

    #[test]
    fn for_on_a_label_is_rewritten() {
        let (scoper, _) = scoper(none());
        let label = Element::new("label").with_attr("for", "email");
        scoper.scope_own_ids(&label, &none()).unwrap();
        assert_eq!(attr(&label, "for").as_deref(), Some("scoped-id-email-1"));
    }

    #[test]
    fn node_without_id_attributes_is_untouched() {
        let (scoper, log) = scoper(none());
        let el = Element::new("p").with_attr("class", "lead");
        let before = el.clone();
        scoper.scope_own_ids(&el, &none()).unwrap();
        assert_eq!(el, before);
        assert!(events(&log).is_empty());
    }

    #[test]
    fn blank_attribute_is_skipped() {
        let (scoper, log) = scoper(none());
        let el = Element::new("div").with_attr("id", "   ");
        scoper.scope_own_ids(&el, &none()).unwrap();
        assert_eq!(attr(&el, "id").as_deref(), Some("   "));
        assert!(events(&log).is_empty());
    }

    #[test]
    fn generated_ids_are_never_rewritten_again() {
        let (scoper, log) = scoper(none());
        let mut ids = IdMap::new();
        let el = Element::new("div").with_attr("id", "x");

        scoper.scope_own_ids_in(&el, &none(), &mut ids).unwrap();
        let first = attr(&el, "id").unwrap();
        scoper.scope_own_ids_in(&el, &none(), &mut ids).unwrap();

        assert_eq!(attr(&el, "id").unwrap(), first);
        assert_eq!(ids.get(&first), Some(first.as_str()));
        // one generation, one aggregate: the second pass changed nothing
        assert_eq!(events(&log).len(), 2);

        // a fresh node that happens to carry the generated value keeps it
        let twin = Element::new("div").with_attr("aria-controls", first.as_str());
        scoper.scope_own_ids_in(&twin, &none(), &mut ids).unwrap();
        assert_eq!(attr(&twin, "aria-controls").unwrap(), first);
    }

    #[test]
    fn saved_mapping_replacements_are_kept() {
        let (scoper, _) = scoper(none());
        let mut ids: IdMap = serde_json::from_str(r#"{"tab":"my-tab"}"#).unwrap();
        let el = Element::new("div").with_attr("aria-controls", "tab my-tab");
        scoper.scope_own_ids_in(&el, &none(), &mut ids).unwrap();
        assert_eq!(attr(&el, "aria-controls").as_deref(), Some("my-tab my-tab"));
    }

    #[test]
    fn rewrites_without_subscribers() {
        let scoper = Scoper::new(none()).with_generator(SequentialIds::new());
        let el = Element::new("div").with_attr("id", "x");
        scoper.scope_own_ids(&el, &none()).unwrap();
        assert_eq!(attr(&el, "id").as_deref(), Some("scoped-id-x-1"));
    }

    #[test]
    fn literal_replacement_skips_mapping_and_events() {
        let (scoper, log) = scoper(none());
        let fixed = none().with_decision(decision(|_: &Element, id, _| {
            Ok(Decision::Replace(format!("fixed-{}", id.value)))
        }));
        let mut ids = IdMap::new();
        let el = Element::new("div").with_attr("id", "x");
        scoper.scope_own_ids_in(&el, &fixed, &mut ids).unwrap();

        assert_eq!(attr(&el, "id").as_deref(), Some("fixed-x"));
        assert!(ids.is_empty());
        assert_eq!(events(&log), vec!["ids: id"]);
    }

    #[test]
    fn call_site_delegation_with_substituted_token() {
        // the constructor-level decision excludes "b"
        let (scoper, _) = scoper(none().with_decision(decision(|_: &Element, id, next| {
            if id.value == "b" {
                Ok(Decision::Exclude)
            } else {
                next.call()
            }
        })));
        // the call-site decision tests "a" as if it were "b"
        let alias = none().with_decision(decision(|node: &Element, id, next| {
            if id.value == "a" {
                next.call_with((node, Id::new(id.name.as_str(), "b")))
            } else {
                next.call()
            }
        }));
        let el = Element::new("div").with_attr("aria-flowto", "a c");
        scoper.scope_own_ids(&el, &alias).unwrap();
        assert_eq!(attr(&el, "aria-flowto").as_deref(), Some("scoped-id-c-1"));
    }

    #[test]
    fn call_site_decision_runs_before_constructor_decision() {
        let order: Log = Rc::default();
        let o = order.clone();
        let (scoper, _) = scoper(none().with_decision(decision(move |_: &Element, _, next| {
            o.borrow_mut().push("constructor".to_string());
            next.call()
        })));
        let o = order.clone();
        let call_site = none().with_decision(decision(move |_: &Element, _, next| {
            o.borrow_mut().push("call-site".to_string());
            next.call()
        }));
        let el = Element::new("div").with_attr("id", "x");
        scoper.scope_own_ids(&el, &call_site).unwrap();
        assert_eq!(*order.borrow(), vec!["call-site", "constructor"]);
    }

    #[test]
    fn subtree_references_converge() {
        let (scoper, log) = scoper(none());
        let root = Element::new("section")
            .with_child(Element::new("div").with_attr("id", "x"))
            .with_child(Element::new("div").with_attr("id", "x"))
            .with_child(Element::new("button").with_attr("aria-controls", "x"));

        scoper.scope_ids(&root, &none()).unwrap();

        let values: Vec<Option<String>> = vec![
            attr(&root.children[0], "id"),
            attr(&root.children[1], "id"),
            attr(&root.children[2], "aria-controls"),
        ];
        assert!(values.iter().all(|v| v.as_deref() == Some("scoped-id-x-1")));
        let generated: Vec<String> = events(&log)
            .into_iter()
            .filter(|e| e.starts_with("id:"))
            .collect();
        assert_eq!(generated, vec!["id: x -> scoped-id-x-1"]);
    }

    #[test]
    fn subtree_skips_the_root() {
        let (scoper, _) = scoper(none());
        let root = Element::new("div")
            .with_attr("id", "root")
            .with_child(Element::new("span").with_attr("id", "child"));
        scoper.scope_ids(&root, &none()).unwrap();
        assert_eq!(attr(&root, "id").as_deref(), Some("root"));
        assert_eq!(
            attr(&root.children[0], "id").as_deref(),
            Some("scoped-id-child-1")
        );
    }

    #[test]
    fn augmented_attribute_is_scanned() {
        let (scoper, _) = scoper(none());
        let options = none().with_id_attrs(IdAttrs::augment(|mut names| {
            names.insert("data-target".to_string());
            names
        }));
        let root = Element::new("div")
            .with_child(Element::new("div").with_attr("id", "menu"))
            .with_child(Element::new("a").with_attr("data-target", "menu"));
        scoper.scope_ids(&root, &options).unwrap();
        assert_eq!(
            attr(&root.children[1], "data-target").as_deref(),
            Some("scoped-id-menu-1")
        );
    }

    #[test]
    fn augmenting_function_runs_once_per_subtree() {
        let calls = Rc::new(RefCell::new(0));
        let c = calls.clone();
        let options = none().with_id_attrs(IdAttrs::augment(move |names| {
            *c.borrow_mut() += 1;
            names
        }));
        let (scoper, _) = scoper(none());
        let root = Element::new("div")
            .with_child(Element::new("p").with_attr("id", "a"))
            .with_child(Element::new("p").with_attr("id", "b"));
        scoper.scope_ids(&root, &options).unwrap();
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn replaced_attribute_list_ignores_defaults() {
        let (scoper, _) = scoper(none().with_id_attrs(IdAttrs::replace(["headers"])));
        let td = Element::new("td")
            .with_attr("id", "cell")
            .with_attr("headers", "h1 h2");
        scoper.scope_own_ids(&td, &none()).unwrap();
        assert_eq!(attr(&td, "id").as_deref(), Some("cell"));
        assert_eq!(
            attr(&td, "headers").as_deref(),
            Some("scoped-id-h1-1 scoped-id-h2-2")
        );
    }

    #[test]
    fn shared_mapping_spans_calls() {
        let (scoper, log) = scoper(none());
        let mut ids = IdMap::new();
        let tabs = Element::new("div").with_child(Element::new("div").with_attr("id", "tab"));
        let links =
            Element::new("nav").with_child(Element::new("a").with_attr("aria-controls", "tab"));

        scoper.scope_ids_in(&tabs, &none(), &mut ids).unwrap();
        scoper.scope_ids_in(&links, &none(), &mut ids).unwrap();

        assert_eq!(
            attr(&links.children[0], "aria-controls").as_deref(),
            Some("scoped-id-tab-1")
        );
        let generated = events(&log).iter().filter(|e| e.starts_with("id:")).count();
        assert_eq!(generated, 1);
    }

    #[test]
    fn separate_calls_use_separate_mappings() {
        let (scoper, _) = scoper(none());
        let a = Element::new("div").with_attr("id", "x");
        let b = Element::new("div").with_attr("id", "x");
        scoper.scope_own_ids(&a, &none()).unwrap();
        scoper.scope_own_ids(&b, &none()).unwrap();
        assert_ne!(attr(&a, "id"), attr(&b, "id"));
    }

    #[test]
    fn call_site_prefix_overrides_constructor_prefix() {
        let (scoper, _) = scoper(none().with_prefix("widget"));
        let el = Element::new("div").with_attr("id", "x");
        scoper.scope_own_ids(&el, &none().with_prefix("tab")).unwrap();
        assert_eq!(attr(&el, "id").as_deref(), Some("tab-x-1"));
        assert_eq!(scoper.prefix().as_str(), "widget");
    }

    #[test]
    fn invalid_prefix_is_reported_and_replaced() {
        let (scoper, _) = scoper(none().with_prefix("1up"));
        assert_eq!(scoper.prefix().as_str(), "scoped-id");
        assert_eq!(scoper.diagnostics().len(), 1);
        assert_eq!(scoper.diagnostics()[0].level, MessageLevel::Warning);

        let call_site = none().with_prefix("");
        assert_eq!(call_site.messages.len(), 1);
    }

    #[test]
    fn failing_decision_aborts_but_keeps_earlier_writes() {
        let (scoper, _) = scoper(none());
        let fail_on_boom = none().with_decision(decision(|_: &Element, id, next| {
            if id.value == "boom" {
                Err(DecisionError::new("refusing boom"))
            } else {
                next.call()
            }
        }));
        let root = Element::new("div")
            .with_child(Element::new("p").with_attr("id", "ok"))
            .with_child(Element::new("p").with_attr("id", "boom"))
            .with_child(Element::new("p").with_attr("id", "later"));

        let err = scoper.scope_ids(&root, &fail_on_boom).unwrap_err();

        assert!(matches!(err, ScopeError::Decision(_)));
        assert_eq!(attr(&root.children[0], "id").as_deref(), Some("scoped-id-ok-1"));
        assert_eq!(attr(&root.children[1], "id").as_deref(), Some("boom"));
        assert_eq!(attr(&root.children[2], "id").as_deref(), Some("later"));
    }

    #[test]
    fn unsubscribed_handlers_are_silent() {
        let mut scoper = Scoper::<Element>::default().with_generator(SequentialIds::new());
        let count = Rc::new(RefCell::new(0));
        let c = count.clone();
        let sub = scoper.subscribe(EventKind::Id, move |_| *c.borrow_mut() += 1);
        assert!(scoper.unsubscribe(sub));

        let el = Element::new("div").with_attr("id", "x");
        scoper.scope_own_ids(&el, &none()).unwrap();
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn free_functions_use_random_ids() {
        let root = Element::new("div").with_child(Element::new("p").with_attr("id", "x"));
        scope_ids(&root, &none()).unwrap();
        let id = attr(&root.children[0], "id").unwrap();
        assert!(id.starts_with("scoped-id-x-"));
        assert_eq!(id.len(), "scoped-id-x-".len() + crate::token::SUFFIX_LENGTH);

        let own = Element::new("div").with_attr("id", "y");
        scope_own_ids(&own, &none()).unwrap();
        assert!(attr(&own, "id").unwrap().starts_with("scoped-id-y-"));
    }
}
