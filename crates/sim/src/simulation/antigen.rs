//! Reference sequences the search targets.

use std::sync::Arc;

use crate::base::Sequence;

/// An immutable reference sequence ("antigen").
///
/// The name is shared with every antibody scored against it, so it is held as
/// an `Arc<str>` and handed out by cheap clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Antigen {
    name: Arc<str>,
    host: String,
    sequence: Sequence,
}

impl Antigen {
    /// Create a new antigen.
    pub fn new(name: impl Into<Arc<str>>, host: impl Into<String>, sequence: Sequence) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            sequence,
        }
    }

    /// Record name, used as the memory key.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shared handle to the name.
    #[inline]
    pub fn name_handle(&self) -> Arc<str> {
        Arc::clone(&self.name)
    }

    /// Free-form host label.
    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[inline]
    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// Sequence length, gaps included.
    #[inline]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}
