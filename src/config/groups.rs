//! Validation group configuration
//!
//! The default table is the instrument's six attention-check constructs.

use serde::Deserialize;
use std::collections::HashSet;

use super::error::ValidationError;
use crate::domain::foundation::{GroupId, QuestionId};
use crate::domain::screening::{PolicyKind, ValidationGroup, VALIDATION_GROUP_COUNT};

/// One validation group as written in configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GroupConfig {
    pub id: u8,

    /// Questions phrased in the construct's direction
    #[serde(default)]
    pub positive: Vec<String>,

    /// Questions phrased against it
    #[serde(default)]
    pub negative: Vec<String>,

    pub policy: PolicyKind,
}

impl GroupConfig {
    fn new(id: u8, positive: &[&str], negative: &[&str], policy: PolicyKind) -> Self {
        Self {
            id,
            positive: positive.iter().map(|q| q.to_string()).collect(),
            negative: negative.iter().map(|q| q.to_string()).collect(),
            policy,
        }
    }

    /// Builds the domain group, checking ids and the policy's shape.
    pub fn build(&self) -> Result<ValidationGroup, ValidationError> {
        let id = GroupId::new(self.id).map_err(|_| ValidationError::GroupIdOutOfRange(self.id))?;

        let questions = |names: &[String]| {
            names
                .iter()
                .map(|name| {
                    QuestionId::new(name.as_str()).map_err(|e| ValidationError::InvalidQuestion {
                        group: self.id,
                        reason: e.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()
        };

        ValidationGroup::new(id, questions(&self.positive)?, questions(&self.negative)?, self.policy)
            .map_err(|e| ValidationError::InvalidGroup {
                group: self.id,
                reason: e.to_string(),
            })
    }
}

/// The instrument's group table.
pub fn default_groups() -> Vec<GroupConfig> {
    vec![
        GroupConfig::new(1, &["Q3.8_1"], &["Q3.10_1"], PolicyKind::SimpleOpposite),
        GroupConfig::new(2, &["Q3.21_1"], &["Q3.22_1"], PolicyKind::SimpleOpposite),
        GroupConfig::new(3, &["Q3.32_1"], &["Q3.42_1"], PolicyKind::SimpleOpposite),
        GroupConfig::new(4, &["Q3.73_1"], &["Q3.83_1"], PolicyKind::SimpleOpposite),
        GroupConfig::new(
            5,
            &["Q3.164_1", "Q3.167_1"],
            &["Q3.178_1"],
            PolicyKind::AsymmetricChain,
        ),
        GroupConfig::new(6, &["Q3.63_1", "Q3.174_1"], &[], PolicyKind::SameOnly),
    ]
}

/// Builds all groups, requiring exactly six with distinct ids.
pub fn build_groups(groups: &[GroupConfig]) -> Result<Vec<ValidationGroup>, ValidationError> {
    if groups.len() != VALIDATION_GROUP_COUNT {
        return Err(ValidationError::GroupCount {
            expected: VALIDATION_GROUP_COUNT,
            actual: groups.len(),
        });
    }

    let mut seen = HashSet::new();
    groups
        .iter()
        .map(|group| {
            if !seen.insert(group.id) {
                return Err(ValidationError::DuplicateGroup(group.id));
            }
            group.build()
        })
        .collect()
}
