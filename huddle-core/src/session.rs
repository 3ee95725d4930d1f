// SPDX-License-Identifier: MIT OR Apache-2.0

//! The study-session document: one finished stopwatch run, persisted.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Timestamp;
use crate::identifiers::{SessionId, UserId};

/// Maximum subject label length in characters, after trimming.
pub const SUBJECT_MAX_LEN: usize = 100;

/// A finished study session recorded from the stopwatch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySession {
    pub id: SessionId,
    pub user: UserId,
    pub subject: Option<String>,
    pub duration_secs: u64,
    pub recorded_at: Timestamp,
}

impl StudySession {
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubjectError {
    #[error("session subject has {0} characters, expected at most {1}")]
    TooLong(usize, usize),
}

/// Validate an optional subject label: trim it and bound the length.
///
/// A label that is empty after trimming counts as no label at all.
pub fn validate_subject(subject: &str) -> Result<Option<String>, SubjectError> {
    let trimmed = subject.trim();
    let len = trimmed.chars().count();

    if len == 0 {
        return Ok(None);
    }

    if len > SUBJECT_MAX_LEN {
        return Err(SubjectError::TooLong(len, SUBJECT_MAX_LEN));
    }

    Ok(Some(trimmed.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_subject() {
        assert_eq!(validate_subject("  Linear Algebra "), Ok(Some("Linear Algebra".to_owned())));
        assert_eq!(validate_subject("   "), Ok(None));
        assert_eq!(
            validate_subject(&"x".repeat(101)),
            Err(SubjectError::TooLong(101, SUBJECT_MAX_LEN))
        );
    }

    #[test]
    fn exposes_duration() {
        let session = StudySession {
            id: SessionId::from("s1"),
            user: UserId::from("panda"),
            subject: None,
            duration_secs: 90,
            recorded_at: 1,
        };

        assert_eq!(session.duration(), Duration::from_secs(90));
    }
}
