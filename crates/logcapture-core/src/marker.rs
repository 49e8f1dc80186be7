//! Named tags attached to log calls
//!
//! A marker is an opaque label with optional child references, in the manner of
//! a basic facade marker. Markers never influence level enablement.
//! Two markers are equal when their names are equal; references are ignored.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Named tag with optional references to other markers
#[derive(Clone)]
pub struct Marker {
    name: Arc<str>,
    references: Vec<Marker>,
}

impl Marker {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            references: Vec::new(),
        }
    }

    /// Return this marker with `reference` added as a child
    #[must_use]
    pub fn with_reference(mut self, reference: Marker) -> Self {
        self.add(reference);
        self
    }

    /// Add `reference` as a child unless it is already present
    pub fn add(&mut self, reference: Marker) {
        if !self.references.contains(&reference) {
            self.references.push(reference);
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn references(&self) -> &[Marker] {
        &self.references
    }

    /// True if this marker is `name` or references a marker that is
    pub fn contains(&self, name: &str) -> bool {
        &*self.name == name || self.references.iter().any(|r| r.contains(name))
    }
}

impl PartialEq for Marker {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Marker {}

impl Hash for Marker {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Marker({})", self)
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.references.is_empty() {
            f.write_str(" [ ")?;
            for (i, reference) in self.references.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", reference)?;
            }
            f.write_str(" ]")?;
        }
        Ok(())
    }
}
