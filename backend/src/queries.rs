use sqlx::{PgPool, postgres::PgQueryResult};
use shared::models::*;

/// Channel the insert trigger notifies on.
pub const VOTES_CHANNEL: &str = "votes_changed";

pub struct Queries;

impl Queries {
    pub async fn insert_vote(pool: &PgPool, vote: &Vote) -> Result<PgQueryResult, sqlx::Error> {
        sqlx::query(
            "INSERT INTO votes (id, team, display_name, created_at)
             VALUES ($1, $2, $3, $4)"
        )
        .bind(vote.id)
        .bind(vote.team)
        .bind(&vote.display_name)
        .bind(vote.created_at)
        .execute(pool)
        .await
    }

    pub async fn insert_participant(pool: &PgPool, participant: &Participant) -> Result<PgQueryResult, sqlx::Error> {
        sqlx::query(
            "INSERT INTO participants (id, nickname, created_at)
             VALUES ($1, $2, $3)"
        )
        .bind(participant.id)
        .bind(&participant.nickname)
        .bind(participant.created_at)
        .execute(pool)
        .await
    }

    pub async fn count_votes(pool: &PgPool) -> Result<TallySnapshot, sqlx::Error> {
        let (total, red, blue) = sqlx::query_as::<_, (i64, i64, i64)>(
            "SELECT COUNT(*),
                    COUNT(*) FILTER (WHERE team = 'red'),
                    COUNT(*) FILTER (WHERE team = 'blue')
             FROM votes"
        )
        .fetch_one(pool)
        .await?;

        Ok(TallySnapshot::new(as_count(red), as_count(blue), as_count(total)))
    }
}

fn as_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}
