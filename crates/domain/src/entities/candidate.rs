//! Candidate entity - one staff member eligible for the drawing.

use serde::{Deserialize, Serialize};

use crate::value_objects::{CandidateName, GroupTag};
use crate::CandidateId;

/// A roster entry. Immutable once loaded for the duration of a session.
///
/// # Example
///
/// ```
/// use luckywheel_domain::{Candidate, CandidateId, CandidateName, GroupTag};
///
/// let candidate = Candidate::new(
///     CandidateId::new("staff-001").unwrap(),
///     CandidateName::new("Malee Srisuk").unwrap(),
/// )
/// .with_group(GroupTag::new("Group 2").unwrap());
///
/// assert_eq!(candidate.name().as_str(), "Malee Srisuk");
/// assert_eq!(candidate.groups().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    id: CandidateId,
    name: CandidateName,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    groups: Vec<GroupTag>,
}

impl Candidate {
    pub fn new(id: CandidateId, name: CandidateName) -> Self {
        Self {
            id,
            name,
            groups: Vec::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> &CandidateId {
        &self.id
    }

    #[inline]
    pub fn name(&self) -> &CandidateName {
        &self.name
    }

    #[inline]
    pub fn groups(&self) -> &[GroupTag] {
        &self.groups
    }

    pub fn in_group(&self, tag: &GroupTag) -> bool {
        self.groups.contains(tag)
    }

    /// Add a grouping tag. Duplicate tags are ignored.
    pub fn with_group(mut self, tag: GroupTag) -> Self {
        if !self.groups.contains(&tag) {
            self.groups.push(tag);
        }
        self
    }

    pub fn with_groups(self, tags: impl IntoIterator<Item = GroupTag>) -> Self {
        tags.into_iter().fold(self, Candidate::with_group)
    }
}
