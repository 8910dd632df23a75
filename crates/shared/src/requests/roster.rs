use serde::{Deserialize, Serialize};

use luckywheel_domain::{Candidate, CandidateId, CandidateName, DomainError, GroupTag, Roster};

/// A roster entry on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateData {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub groups: Vec<String>,
}

/// Replace the roster the wheel draws from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadRosterRequest {
    pub candidates: Vec<CandidateData>,
}

impl From<&Candidate> for CandidateData {
    fn from(candidate: &Candidate) -> Self {
        Self {
            id: candidate.id().to_string(),
            name: candidate.name().to_string(),
            groups: candidate.groups().iter().map(ToString::to_string).collect(),
        }
    }
}

impl TryFrom<CandidateData> for Candidate {
    type Error = DomainError;

    fn try_from(data: CandidateData) -> Result<Self, Self::Error> {
        let groups = data
            .groups
            .into_iter()
            .map(GroupTag::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Candidate::new(CandidateId::new(data.id)?, CandidateName::new(data.name)?)
            .with_groups(groups))
    }
}

impl LoadRosterRequest {
    /// Validate every entry and build the roster.
    pub fn into_roster(self) -> Result<Roster, DomainError> {
        let candidates = self
            .candidates
            .into_iter()
            .map(Candidate::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Roster::new(candidates)
    }
}
