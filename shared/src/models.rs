use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::tally::{self, Leader};

pub const ANONYMOUS: &str = "Anonymous";

#[cfg_attr(feature = "backend", derive(sqlx::Type))]
#[cfg_attr(feature = "backend", sqlx(type_name = "team", rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Red,
    Blue,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::Red, Team::Blue];

    pub const fn as_str(self) -> &'static str {
        match self {
            Team::Red => "red",
            Team::Blue => "blue",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Team {
    type Err = UnknownTeam;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Ok(Team::Red),
            "blue" => Ok(Team::Blue),
            _ => Err(UnknownTeam(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown team: {0}")]
pub struct UnknownTeam(pub String);

/// Which records a live count covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteFilter {
    All,
    Team(Team),
}

impl VoteFilter {
    pub const ALL: [VoteFilter; 3] = [
        VoteFilter::All,
        VoteFilter::Team(Team::Red),
        VoteFilter::Team(Team::Blue),
    ];

    pub fn matches(self, team: Team) -> bool {
        match self {
            VoteFilter::All => true,
            VoteFilter::Team(t) => t == team,
        }
    }
}

impl fmt::Display for VoteFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoteFilter::All => f.write_str("all"),
            VoteFilter::Team(team) => team.fmt(f),
        }
    }
}

impl FromStr for VoteFilter {
    type Err = UnknownTeam;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(VoteFilter::All)
        } else {
            s.parse().map(VoteFilter::Team)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub id: Uuid,
    pub team: Team,
    pub display_name: Option<String>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewVote {
    pub team: Team,
    pub display_name: Option<String>,
}

impl NewVote {
    pub fn new(team: Team, display_name: Option<&str>) -> Self {
        let display_name = display_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(ANONYMOUS);

        Self {
            team,
            display_name: Some(display_name.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CastVoteRequest {
    pub team: Team,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl From<CastVoteRequest> for NewVote {
    fn from(request: CastVoteRequest) -> Self {
        NewVote::new(request.team, request.display_name.as_deref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VoteReceipt {
    pub id: Uuid,
    pub team: Team,
    pub created_at: OffsetDateTime,
}

impl From<&Vote> for VoteReceipt {
    fn from(vote: &Vote) -> Self {
        Self {
            id: vote.id,
            team: vote.team,
            created_at: vote.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub nickname: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: Uuid,
    pub nickname: String,
    pub created_at: OffsetDateTime,
}

/// Three independently observed counts. `total_count` comes from its own
/// subscription and may briefly disagree with `red_count + blue_count`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TallySnapshot {
    pub red_count: u64,
    pub blue_count: u64,
    pub total_count: u64,
}

impl TallySnapshot {
    pub const fn new(red_count: u64, blue_count: u64, total_count: u64) -> Self {
        Self { red_count, blue_count, total_count }
    }

    pub fn count(&self, filter: VoteFilter) -> u64 {
        match filter {
            VoteFilter::All => self.total_count,
            VoteFilter::Team(Team::Red) => self.red_count,
            VoteFilter::Team(Team::Blue) => self.blue_count,
        }
    }

    pub fn with_count(mut self, filter: VoteFilter, count: u64) -> Self {
        match filter {
            VoteFilter::All => self.total_count = count,
            VoteFilter::Team(Team::Red) => self.red_count = count,
            VoteFilter::Team(Team::Blue) => self.blue_count = count,
        }
        self
    }

    pub fn progress(&self) -> f64 {
        tally::project(self.red_count, self.blue_count, self.total_count)
    }

    pub fn leader(&self) -> Option<Team> {
        match tally::leader(self.red_count, self.blue_count) {
            Leader::Red => Some(Team::Red),
            Leader::Blue => Some(Team::Blue),
            Leader::Tie => None,
        }
    }

    /// Records in the total that belong to neither team. Non-zero once the
    /// counts settle means a category the tally does not model.
    pub fn unclassified(&self) -> u64 {
        self.total_count
            .saturating_sub(self.red_count)
            .saturating_sub(self.blue_count)
    }

    pub fn is_consistent(&self) -> bool {
        self.red_count
            .checked_add(self.blue_count)
            .map_or(false, |classified| classified <= self.total_count)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TallyView {
    pub red_count: u64,
    pub blue_count: u64,
    pub total_count: u64,
    pub progress: f64,
    pub leader: Option<Team>,
}

impl From<TallySnapshot> for TallyView {
    fn from(snapshot: TallySnapshot) -> Self {
        Self {
            red_count: snapshot.red_count,
            blue_count: snapshot.blue_count,
            total_count: snapshot.total_count,
            progress: snapshot.progress(),
            leader: snapshot.leader(),
        }
    }
}

impl Default for TallyView {
    fn default() -> Self {
        TallySnapshot::default().into()
    }
}
