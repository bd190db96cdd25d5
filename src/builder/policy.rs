//! Grouping policy: which credits of a record collaborate with each other
//!
//! A policy is a list of group templates. Each template names the roles whose
//! people form one collaboration group; every pair inside a group becomes
//! one unit of edge weight.

use crate::error::{ConfigError, ConfigResult};
use crate::record::SongRecord;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A credit field of a [`SongRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Composer,
    Lyricist,
    /// The singer field taken whole, delimiter and all
    Singer,
    /// Each name of the singer field, split on the `" & "` delimiter
    Singers,
}

impl Role {
    /// People credited in this role on `record`
    pub fn members(&self, record: &SongRecord) -> Vec<String> {
        match self {
            Role::Composer => record.composer.iter().cloned().collect(),
            Role::Lyricist => record.lyricist.iter().cloned().collect(),
            Role::Singer => record.singer.iter().cloned().collect(),
            Role::Singers => record.singers(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Composer => "composer",
            Role::Lyricist => "lyricist",
            Role::Singer => "singer",
            Role::Singers => "singers",
        };
        write!(f, "{}", name)
    }
}

/// How one record is decomposed into collaboration groups
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "groups")]
pub enum GroupingPolicy {
    /// One group {composer, lyricist, singer}
    #[default]
    Triangle,
    /// Three pair groups: composer-lyricist, lyricist-singer, singer-composer
    RolePairs,
    /// One group of the co-singers listed in the singer field
    CoSingers,
    /// One group {composer, lyricist, every co-singer}
    Ensemble,
    /// Explicit group templates
    Custom(Vec<Vec<Role>>),
}

impl GroupingPolicy {
    /// The group templates this policy applies to every record
    pub fn templates(&self) -> Vec<Vec<Role>> {
        use Role::*;
        match self {
            GroupingPolicy::Triangle => vec![vec![Composer, Lyricist, Singer]],
            GroupingPolicy::RolePairs => vec![
                vec![Composer, Lyricist],
                vec![Lyricist, Singer],
                vec![Singer, Composer],
            ],
            GroupingPolicy::CoSingers => vec![vec![Singers]],
            GroupingPolicy::Ensemble => vec![vec![Composer, Lyricist, Singers]],
            GroupingPolicy::Custom(templates) => templates.clone(),
        }
    }

    /// Reject templates that are empty, ambiguous, or can never yield an edge
    pub fn validate(&self) -> ConfigResult<()> {
        let templates = self.templates();
        if templates.is_empty() {
            return Err(ConfigError::EmptyGroupingPolicy);
        }

        for (index, roles) in templates.iter().enumerate() {
            if roles.is_empty() {
                return Err(ConfigError::EmptyGroupTemplate { index });
            }

            let mut seen = HashSet::new();
            for &role in roles {
                if !seen.insert(role) {
                    return Err(ConfigError::DuplicateRole { index, role });
                }
            }

            if seen.contains(&Role::Singer) && seen.contains(&Role::Singers) {
                return Err(ConfigError::ConflictingSingerRoles { index });
            }

            if let [role] = roles.as_slice() {
                if *role != Role::Singers {
                    return Err(ConfigError::SingleRoleTemplate { index, role: *role });
                }
            }
        }

        Ok(())
    }

    /// Collaboration groups contributed by one record, one per template
    pub fn groups(&self, record: &SongRecord) -> Vec<CollaborationGroup> {
        self.templates()
            .iter()
            .map(|roles| {
                CollaborationGroup::from_names(roles.iter().flat_map(|role| role.members(record)))
            })
            .collect()
    }
}

/// Distinct people credited together under one group template
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CollaborationGroup {
    members: Vec<String>,
}

impl CollaborationGroup {
    /// Build a group, keeping the first occurrence of each name
    pub fn from_names<I>(names: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let members: IndexSet<String> = names.into_iter().collect();
        Self {
            members: members.into_iter().collect(),
        }
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Groups of fewer than two people produce no edges
    pub fn has_pairs(&self) -> bool {
        self.members.len() >= 2
    }

    /// Every unordered pair of members once
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.members.iter().enumerate().flat_map(move |(i, a)| {
            self.members[i + 1..]
                .iter()
                .map(move |b| (a.as_str(), b.as_str()))
        })
    }
}
