use std::sync::{Arc, Mutex};
use sqlx::PgPool;
use sqlx::postgres::PgListener;
use time::OffsetDateTime;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tracing::{debug, error, info, warn};
use uuid::Uuid;
use shared::models::*;

use crate::live::{LiveCounts, Subscription};
use crate::queries::{Queries, VOTES_CHANNEL};

const LISTENER_RETRY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Store lock poisoned")]
    LockFailed,
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

/// Append-only vote collection with live count queries.
#[rocket::async_trait]
pub trait VoteStore: Send + Sync {
    async fn append(&self, vote: NewVote) -> Result<Vote, StoreError>;

    async fn register(&self, nickname: &str) -> Result<Participant, StoreError>;

    fn live(&self) -> &LiveCounts;

    fn subscribe(&self, filter: VoteFilter) -> Subscription {
        self.live().subscribe(filter)
    }

    fn current(&self) -> TallySnapshot {
        self.live().current()
    }

    fn subscriber_count(&self) -> usize {
        self.live().subscriber_count()
    }
}

fn stamp(vote: NewVote) -> Vote {
    Vote {
        id: Uuid::new_v4(),
        team: vote.team,
        display_name: vote.display_name,
        created_at: OffsetDateTime::now_utc(),
    }
}

fn stamp_participant(nickname: &str) -> Participant {
    Participant {
        id: Uuid::new_v4(),
        nickname: nickname.to_string(),
        created_at: OffsetDateTime::now_utc(),
    }
}

/// Votes plus their running counts, kept under one lock.
#[derive(Debug, Default)]
struct Ballots {
    votes: Vec<Vote>,
    counts: TallySnapshot,
}

impl Ballots {
    fn push(&mut self, vote: Vote) -> TallySnapshot {
        self.counts = VoteFilter::ALL
            .into_iter()
            .filter(|filter| filter.matches(vote.team))
            .fold(self.counts, |counts, filter| {
                counts.with_count(filter, counts.count(filter) + 1)
            });
        self.votes.push(vote);
        self.counts
    }
}

/// Process-local store. Counts only reach subscribers of this process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    ballots: Mutex<Ballots>,
    participants: Mutex<Vec<Participant>>,
    live: LiveCounts,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn votes(&self) -> Result<Vec<Vote>, StoreError> {
        self.ballots
            .lock()
            .map(|ballots| ballots.votes.clone())
            .map_err(|_| StoreError::LockFailed)
    }

    pub fn participants(&self) -> Result<Vec<Participant>, StoreError> {
        self.participants
            .lock()
            .map(|participants| participants.clone())
            .map_err(|_| StoreError::LockFailed)
    }
}

#[rocket::async_trait]
impl VoteStore for MemoryStore {
    async fn append(&self, vote: NewVote) -> Result<Vote, StoreError> {
        let vote = stamp(vote);
        let mut ballots = self.ballots.lock().map_err(|_| StoreError::LockFailed)?;
        let counts = ballots.push(vote.clone());
        // publish before releasing the lock so appends reach the channels in order
        self.live.publish(counts);
        Ok(vote)
    }

    async fn register(&self, nickname: &str) -> Result<Participant, StoreError> {
        let participant = stamp_participant(nickname);
        self.participants
            .lock()
            .map_err(|_| StoreError::LockFailed)?
            .push(participant.clone());
        Ok(participant)
    }

    fn live(&self) -> &LiveCounts {
        &self.live
    }
}

/// PostgreSQL store. An insert trigger notifies [`VOTES_CHANNEL`]; a
/// background listener recounts and publishes, so votes written by any
/// instance reach every subscriber.
pub struct PgStore {
    pool: PgPool,
    live: Arc<LiveCounts>,
    listener: JoinHandle<()>,
}

impl PgStore {
    pub async fn connect(pool: PgPool) -> Self {
        let initial = match Queries::count_votes(&pool).await {
            Ok(counts) => counts,
            Err(e) => {
                error!("Failed to load vote counts, starting from zero: {}", e);
                TallySnapshot::default()
            }
        };
        info!(
            red = initial.red_count,
            blue = initial.blue_count,
            total = initial.total_count,
            "📊 Loaded vote counts"
        );

        let live = Arc::new(LiveCounts::new(initial));
        let listener = tokio::spawn(run_listener(pool.clone(), live.clone()));

        Self { pool, live, listener }
    }

    async fn refresh(&self) {
        match Queries::count_votes(&self.pool).await {
            Ok(counts) => self.live.publish(counts),
            Err(e) => warn!("Failed to refresh vote counts: {}", e),
        }
    }
}

impl Drop for PgStore {
    fn drop(&mut self) {
        self.listener.abort();
    }
}

async fn run_listener(pool: PgPool, live: Arc<LiveCounts>) {
    loop {
        if let Err(e) = listen_once(&pool, &live).await {
            error!("Vote listener failed, retrying in {:?}: {}", LISTENER_RETRY, e);
        }
        sleep(LISTENER_RETRY).await;
    }
}

async fn listen_once(pool: &PgPool, live: &LiveCounts) -> Result<(), sqlx::Error> {
    let mut listener = PgListener::connect_with(pool).await?;
    listener.listen(VOTES_CHANNEL).await?;
    info!("👂 Listening on {}", VOTES_CHANNEL);

    // Catch up on anything written while we were not listening.
    live.publish(Queries::count_votes(pool).await?);

    loop {
        let notification = listener.recv().await?;
        debug!(team = notification.payload(), "Vote notification");
        live.publish(Queries::count_votes(pool).await?);
    }
}

#[rocket::async_trait]
impl VoteStore for PgStore {
    async fn append(&self, vote: NewVote) -> Result<Vote, StoreError> {
        let vote = stamp(vote);
        Queries::insert_vote(&self.pool, &vote).await?;
        self.refresh().await;
        Ok(vote)
    }

    async fn register(&self, nickname: &str) -> Result<Participant, StoreError> {
        let participant = stamp_participant(nickname);
        Queries::insert_participant(&self.pool, &participant).await?;
        Ok(participant)
    }

    fn live(&self) -> &LiveCounts {
        &self.live
    }
}
