//! # Decision Functions
//!
//! For every token of every identifier attribute the engine asks a chain of
//! decision functions what to do with it. The answer is a [`Decision`]:
//!
//! - [`Decision::Include`]: rewrite the token through the identifier mapping,
//! - [`Decision::Exclude`]: drop the token from the attribute,
//! - [`Decision::Replace`]: use the given string verbatim.
//!
//! Decisions are layered, least specific first:
//!
//! 1. [`DefaultDecision`], the built-in policy,
//! 2. the decision registered when the [`Scoper`](crate::scoper::Scoper) was built,
//! 3. the decision passed with a single call.
//!
//! The most specific one runs first and may delegate to the layer below through
//! its [`DecisionNext`] handle, either unchanged (`next.call()`) or with a
//! different node or token (`next.call_with((node, id))`).

use crate::error::DecisionError;
use crate::node::Node;
use crate::pipeline::{Next, Pipeline};
use std::rc::Rc;

/// The outcome of a decision function for one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Include,
    Exclude,
    Replace(String),
}

impl From<bool> for Decision {
    fn from(include: bool) -> Self {
        if include {
            Decision::Include
        } else {
            Decision::Exclude
        }
    }
}

pub type Verdict = Result<Decision, DecisionError>;

/// A candidate token: the attribute it was found in and its raw value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Id {
    pub name: String,
    pub value: String,
}

impl Id {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

pub type DynDecide<N> = dyn Decide<N>;

/// Handle to the less specific decisions below the current one.
pub type DecisionNext<'p, 'n, N> = Next<'p, DynDecide<N>, (&'n N, Id), Verdict>;

pub trait Decide<N> {
    fn decide<'n>(&self, node: &'n N, id: &Id, next: &DecisionNext<'_, 'n, N>) -> Verdict;
}

impl<N, F> Decide<N> for F
where
    F: for<'n, 'i, 'x, 'p> Fn(&'n N, &'i Id, &'x DecisionNext<'p, 'n, N>) -> Verdict,
{
    fn decide<'n>(&self, node: &'n N, id: &Id, next: &DecisionNext<'_, 'n, N>) -> Verdict {
        self(node, id, next)
    }
}

/// Wrap a closure as a shareable decision function.
///
/// ```
/// use idscope::decision::{decision, Decision};
/// use idscope::node::Element;
///
/// // never rewrite ids that are already namespaced
/// let keep_namespaced = decision(|_: &Element, id, next| {
///     if id.value.starts_with("app-") {
///         Ok(Decision::Exclude)
///     } else {
///         next.call()
///     }
/// });
/// # let _ = keep_namespaced;
/// ```
pub fn decision<N, F>(f: F) -> Rc<DynDecide<N>>
where
    N: 'static,
    F: for<'n, 'i, 'x, 'p> Fn(&'n N, &'i Id, &'x DecisionNext<'p, 'n, N>) -> Verdict + 'static,
{
    Rc::new(f)
}

/// The built-in policy: `for` only names another element when it sits on a
/// label, every other attribute is always an identifier reference.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultDecision;

impl<N: Node> Decide<N> for DefaultDecision {
    fn decide<'n>(&self, node: &'n N, id: &Id, _next: &DecisionNext<'_, 'n, N>) -> Verdict {
        if id.name == "for" {
            return Ok(node.is_label().into());
        }
        Ok(Decision::Include)
    }
}

pub(crate) type DecisionPipeline<'n, N> = Pipeline<DynDecide<N>, (&'n N, Id), Verdict>;

fn invoke<'n, N>(
    current: &DynDecide<N>,
    next: &DecisionNext<'_, 'n, N>,
    (node, id): (&'n N, Id),
) -> Verdict {
    current.decide(node, &id, next)
}

/// One pipeline per node rewrite; an exhausted chain includes the token.
pub(crate) fn pipeline<'n, N>() -> DecisionPipeline<'n, N> {
    Pipeline::new(invoke, Ok(Decision::Include))
}
