//! Online leaderboard port
//!
//! The game submits finished runs and reads the global top list through
//! [`LeaderboardService`]. Submissions are validated before they reach a
//! backend; failures are logged and never interrupt play.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Longest accepted player name, in characters after trimming
pub const MAX_PLAYER_NAME_LEN: usize = 50;
/// Entries returned by `top` when the caller has no preference
pub const DEFAULT_TOP_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardError {
    /// Empty or longer than `MAX_PLAYER_NAME_LEN`
    InvalidPlayerName,
    /// Scores must be positive
    InvalidScore,
    /// Levels are 1-based
    InvalidLevel,
    Unavailable(String),
}

impl fmt::Display for LeaderboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaderboardError::InvalidPlayerName => {
                write!(f, "player name must be 1-{} characters", MAX_PLAYER_NAME_LEN)
            }
            LeaderboardError::InvalidScore => write!(f, "score must be positive"),
            LeaderboardError::InvalidLevel => write!(f, "level must be positive"),
            LeaderboardError::Unavailable(reason) => write!(f, "leaderboard unavailable: {}", reason),
        }
    }
}

impl std::error::Error for LeaderboardError {}

/// A run offered to the leaderboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardSubmission {
    pub player_name: String,
    pub score: u64,
    pub level: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

impl LeaderboardSubmission {
    /// Check the submission and normalise the name
    pub fn validate(mut self) -> Result<Self, LeaderboardError> {
        let name = self.player_name.trim();
        let len = name.chars().count();
        if len == 0 || len > MAX_PLAYER_NAME_LEN {
            return Err(LeaderboardError::InvalidPlayerName);
        }
        if self.score == 0 {
            return Err(LeaderboardError::InvalidScore);
        }
        if self.level == 0 {
            return Err(LeaderboardError::InvalidLevel);
        }
        self.player_name = name.to_string();
        Ok(self)
    }
}

/// A stored leaderboard row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: u64,
    pub player_name: String,
    pub score: u64,
    pub level: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

pub trait LeaderboardService {
    /// Store a validated submission
    fn submit(&mut self, submission: LeaderboardSubmission) -> Result<LeaderboardEntry, LeaderboardError>;

    /// Best `limit` entries, highest score first
    fn top(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, LeaderboardError>;

    /// Highest-scoring entry for a user
    fn user_best(&self, user_id: u64) -> Result<Option<LeaderboardEntry>, LeaderboardError>;
}

/// Submit a run, logging instead of failing
pub fn submit_or_log<S: LeaderboardService + ?Sized>(
    service: &mut S,
    submission: LeaderboardSubmission,
) -> Option<LeaderboardEntry> {
    match service.submit(submission) {
        Ok(entry) => {
            log::info!("Leaderboard entry {} recorded ({})", entry.id, entry.score);
            Some(entry)
        }
        Err(e) => {
            log::warn!("Leaderboard submission skipped: {}", e);
            None
        }
    }
}

/// In-process reference backend
#[derive(Debug, Clone, Default)]
pub struct InMemoryLeaderboard {
    entries: Vec<LeaderboardEntry>,
    next_id: u64,
    offline: bool,
}

impl InMemoryLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that rejects every call as unavailable
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn check(&self) -> Result<(), LeaderboardError> {
        if self.offline {
            return Err(LeaderboardError::Unavailable("backend offline".to_string()));
        }
        Ok(())
    }
}

impl LeaderboardService for InMemoryLeaderboard {
    fn submit(&mut self, submission: LeaderboardSubmission) -> Result<LeaderboardEntry, LeaderboardError> {
        self.check()?;
        let submission = submission.validate()?;
        self.next_id += 1;
        let entry = LeaderboardEntry {
            id: self.next_id,
            player_name: submission.player_name,
            score: submission.score,
            level: submission.level,
            user_id: submission.user_id,
        };
        self.entries.push(entry.clone());
        Ok(entry)
    }

    fn top(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        self.check()?;
        let mut entries = self.entries.clone();
        // Stable: equal scores keep submission order
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(limit);
        Ok(entries)
    }

    fn user_best(&self, user_id: u64) -> Result<Option<LeaderboardEntry>, LeaderboardError> {
        self.check()?;
        Ok(self
            .entries
            .iter()
            .filter(|e| e.user_id == Some(user_id))
            .fold(None::<&LeaderboardEntry>, |best, e| match best {
                Some(b) if b.score >= e.score => Some(b),
                _ => Some(e),
            })
            .cloned())
    }
}
