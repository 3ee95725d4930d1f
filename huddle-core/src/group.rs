// SPDX-License-Identifier: MIT OR Apache-2.0

//! The group document and its local invariants.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Timestamp;
use crate::identifiers::{GroupId, UserId};

/// Capacity applied to every group created by this client.
pub const DEFAULT_GROUP_CAPACITY: usize = 10;

/// Minimum group name length in characters, after trimming.
pub const NAME_MIN_LEN: usize = 2;

/// Maximum group name length in characters, after trimming.
pub const NAME_MAX_LEN: usize = 100;

/// A study group as persisted in the document store.
///
/// `members` is an ordered sequence without duplicates; the order is the
/// order in which joins committed, which is what the capacity-race
/// arbitration in the group repository relies on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub created_by: UserId,
    pub created_at: Timestamp,
    pub members: Vec<UserId>,
    pub max_size: usize,
}

impl Group {
    pub fn has_member(&self, user: &UserId) -> bool {
        self.members.contains(user)
    }

    /// Position of a member in join order, if present.
    pub fn member_position(&self, user: &UserId) -> Option<usize> {
        self.members.iter().position(|member| member == user)
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= self.max_size
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("group name has {0} characters, expected at least {1}")]
    TooShort(usize, usize),

    #[error("group name has {0} characters, expected at most {1}")]
    TooLong(usize, usize),
}

/// Validate a group name: trim surrounding whitespace and bound the length.
///
/// Returns the trimmed name that should be persisted.
pub fn validate_name(name: &str) -> Result<String, NameError> {
    let trimmed = name.trim();
    let len = trimmed.chars().count();

    if len < NAME_MIN_LEN {
        return Err(NameError::TooShort(len, NAME_MIN_LEN));
    }

    if len > NAME_MAX_LEN {
        return Err(NameError::TooLong(len, NAME_MAX_LEN));
    }

    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(members: &[&str], max_size: usize) -> Group {
        Group {
            id: GroupId::from("g1"),
            name: "Algebra Study".to_owned(),
            created_by: UserId::from(members[0]),
            created_at: 1,
            members: members.iter().map(|user| UserId::from(*user)).collect(),
            max_size,
        }
    }

    #[test]
    fn validates_name_bounds() {
        assert_eq!(
            validate_name("A"),
            Err(NameError::TooShort(1, NAME_MIN_LEN))
        );
        assert_eq!(validate_name("Ab"), Ok("Ab".to_owned()));
        assert_eq!(validate_name(&"x".repeat(100)), Ok("x".repeat(100)));
        assert_eq!(
            validate_name(&"x".repeat(101)),
            Err(NameError::TooLong(101, NAME_MAX_LEN))
        );
    }

    #[test]
    fn trims_before_validating() {
        assert_eq!(validate_name("  Algebra Study  "), Ok("Algebra Study".to_owned()));
        assert_eq!(
            validate_name("   a   "),
            Err(NameError::TooShort(1, NAME_MIN_LEN))
        );
        assert_eq!(
            validate_name("      "),
            Err(NameError::TooShort(0, NAME_MIN_LEN))
        );
    }

    #[test]
    fn counts_characters_not_bytes() {
        // Two characters, six bytes.
        assert_eq!(validate_name("äö"), Ok("äö".to_owned()));
    }

    #[test]
    fn membership_helpers() {
        let group = group(&["panda", "icebear"], 2);

        assert!(group.has_member(&UserId::from("panda")));
        assert!(!group.has_member(&UserId::from("penguin")));
        assert_eq!(group.member_position(&UserId::from("icebear")), Some(1));
        assert!(group.is_full());
        assert!(!group.is_empty());
    }
}
