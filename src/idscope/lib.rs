//! # idscope Architecture
//!
//! idscope rewrites identifier attributes (`id`, `for`, `aria-controls`, ...)
//! inside a tree of elements so the ids become unique on the page, while every
//! reference between nodes keeps pointing at the right target. The typical use
//! is embedding the same markup fragment several times without id collisions.
//!
//! ```text
//! <div id="panel">                 <div id="scoped-id-panel-Xk2...">
//! <button aria-controls="panel">   <button aria-controls="scoped-id-panel-Xk2...">
//! ```
//!
//! It is a library first; the `idscope` binary is a thin client working on JSON
//! serialized trees.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs)                                     │
//! │  - Reads/writes documents, prints messages and events       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Config + request -> configured Scoper -> CmdResult       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engine (scoper.rs)                                         │
//! │  - Subtree orchestration and per-node rewriting             │
//! │  - Decision chain (decision.rs on pipeline.rs)              │
//! │  - Id mapping (scope.rs), generation (token.rs)             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Node Model (node.rs)                                       │
//! │  - Node / Tree traits, in-memory Element                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use idscope::node::{Element, Node};
//! use idscope::scoper::{ScopeOptions, Scoper};
//!
//! let fragment = Element::new("div")
//!     .with_child(Element::new("div").with_attr("id", "panel"))
//!     .with_child(Element::new("button").with_attr("aria-controls", "panel"));
//!
//! let scoper: Scoper<Element> = Scoper::default();
//! scoper.scope_ids(&fragment, &ScopeOptions::new()).unwrap();
//!
//! let id = fragment.children[0].attribute("id").unwrap();
//! assert!(id.starts_with("scoped-id-panel-"));
//! assert_eq!(fragment.children[1].attribute("aria-controls"), Some(id));
//! ```
//!
//! ## Module Overview
//!
//! - [`scoper`]: the engine and its options
//! - [`decision`]: include / exclude / replace decisions and the default policy
//! - [`pipeline`]: generic delegating pipeline the decisions run on
//! - [`attrs`]: which attributes are scanned
//! - [`scope`]: the original -> replacement mapping
//! - [`token`]: replacement generation and prefixes
//! - [`events`]: per-id and per-node notifications
//! - [`node`]: node traits and the bundled `Element`
//! - [`api`]: facade for UI clients
//! - [`config`]: configuration file
//! - [`error`]: error types

pub mod api;
pub mod attrs;
pub mod config;
pub mod decision;
pub mod error;
pub mod events;
mod json;
pub mod message;
pub mod node;
pub mod pipeline;
pub mod scope;
pub mod scoper;
pub mod token;

pub use scoper::{scope_ids, scope_own_ids, ScopeOptions, Scoper};
