//! Class policy: which detections get a metric size.
//!
//! The geometry never looks at label strings itself. Callers inject a
//! [`ClassPolicy`]; any `Fn(&str) -> bool` works, and [`MeasurableClasses`]
//! covers the common case of a fixed label set.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Decides whether a class label is a measurable category.
pub trait ClassPolicy {
    /// Returns `true` if width/height/area should be estimated for `label`.
    fn is_measurable(&self, label: &str) -> bool;
}

impl<F> ClassPolicy for F
where
    F: Fn(&str) -> bool,
{
    fn is_measurable(&self, label: &str) -> bool {
        self(label)
    }
}

/// A fixed set of measurable labels, matched exactly.
///
/// # Example
///
/// ```
/// use object_sizing::{ClassPolicy, MeasurableClasses};
///
/// let policy = MeasurableClasses::new(["stone", "rocks"]);
/// assert!(policy.is_measurable("stone"));
/// assert!(!policy.is_measurable("person"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeasurableClasses(BTreeSet<String>);

impl MeasurableClasses {
    /// Creates a policy from labels.
    #[must_use]
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(labels.into_iter().map(Into::into).collect())
    }

    /// Rock-like and structural classes of a construction-site detector.
    #[must_use]
    pub fn rocks() -> Self {
        Self::new(["rocks", "stone", "cement"])
    }

    /// Adds a label.
    pub fn insert(&mut self, label: impl Into<String>) {
        self.0.insert(label.into());
    }

    /// Number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no label is measurable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the labels in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl ClassPolicy for MeasurableClasses {
    fn is_measurable(&self, label: &str) -> bool {
        self.0.contains(label)
    }
}

impl<S: Into<String>> FromIterator<S> for MeasurableClasses {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
