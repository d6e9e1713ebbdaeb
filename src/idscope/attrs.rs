//! # Identifier Attributes
//!
//! Which attributes are scanned for identifiers. Callers either keep the base
//! list, replace it, or transform a copy of it:
//!
//! ```
//! use idscope::attrs::{default_id_attrs, resolve, IdAttrs};
//!
//! let base = default_id_attrs();
//! let extra = IdAttrs::augment(|mut names| {
//!     names.insert("data-target".to_string());
//!     names
//! });
//! let names = resolve(&extra, &base);
//! assert!(names.contains("data-target"));
//! assert!(names.contains("id"));
//! ```

use indexmap::IndexSet;
use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

/// Attributes holding identifiers or identifier references.
///
/// See <https://www.w3.org/TR/wai-aria/> for the ARIA relationship attributes.
pub const DEFAULT_ID_ATTRS: &[&str] = &[
    "id",
    "aria-activedescendant",
    "aria-controls",
    "aria-describedby",
    "aria-details",
    "aria-errormessage",
    "aria-flowto",
    "aria-labelledby",
    "aria-owns",
    "for",
];

pub type AttrNames = IndexSet<String>;

pub fn default_id_attrs() -> AttrNames {
    DEFAULT_ID_ATTRS.iter().map(|s| s.to_string()).collect()
}

pub type Augment = Rc<dyn Fn(AttrNames) -> AttrNames>;

#[derive(Clone, Default)]
pub enum IdAttrs {
    /// Use the base list unchanged.
    #[default]
    Inherit,
    /// Use exactly these names.
    Replace(AttrNames),
    /// Derive the names from a copy of the base list.
    Augment(Augment),
}

impl IdAttrs {
    pub fn replace<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        IdAttrs::Replace(names.into_iter().map(Into::into).collect())
    }

    pub fn augment<F>(f: F) -> Self
    where
        F: Fn(AttrNames) -> AttrNames + 'static,
    {
        IdAttrs::Augment(Rc::new(f))
    }

    /// Append `names` to the base list.
    pub fn extend<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let extra: Vec<String> = names.into_iter().map(Into::into).collect();
        Self::augment(move |mut base| {
            base.extend(extra.iter().cloned());
            base
        })
    }
}

impl fmt::Debug for IdAttrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdAttrs::Inherit => f.write_str("Inherit"),
            IdAttrs::Replace(names) => f.debug_tuple("Replace").field(names).finish(),
            IdAttrs::Augment(_) => f.write_str("Augment(..)"),
        }
    }
}

/// The effective attribute names for `caller` on top of `base`.
///
/// The augmenting function only ever sees a clone, so shared defaults cannot
/// be mutated through it.
pub fn resolve<'a>(caller: &'a IdAttrs, base: &'a AttrNames) -> Cow<'a, AttrNames> {
    match caller {
        IdAttrs::Inherit => Cow::Borrowed(base),
        IdAttrs::Replace(names) => Cow::Borrowed(names),
        IdAttrs::Augment(f) => Cow::Owned(f(base.clone())),
    }
}
