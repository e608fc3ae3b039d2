//! Postgres-backed user store
//!
//! Scores live in a JSONB column so the record keeps its document shape.
//! Increments rebuild that object inside a single `UPDATE ... RETURNING`,
//! so concurrent updates to the same user serialize on the row lock.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use civicsense_core::{Category, CivicScores, Level, ScoreDeltas, UserRecord};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use super::store::{StoreError, UserStore};

/// Row as stored in the `users` table
#[derive(Debug, FromRow)]
struct UserRow {
    user_id: String,
    dob: NaiveDate,
    age: i32,
    current_level: i16,
    last_level_update_date: DateTime<Utc>,
    civic_scores: Json<CivicScores>,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let corrupt = |reason: String| StoreError::Corrupt {
            user_id: row.user_id.clone(),
            reason,
        };

        let age = u32::try_from(row.age).map_err(|_| corrupt(format!("negative age {}", row.age)))?;
        let current_level =
            Level::new(i64::from(row.current_level)).map_err(|e| corrupt(e.to_string()))?;

        Ok(UserRecord {
            user_id: row.user_id,
            dob: row.dob,
            age,
            current_level,
            last_level_update_date: row.last_level_update_date,
            civic_scores: row.civic_scores.0,
        })
    }
}

fn age_column(user: &UserRecord) -> Result<i32, StoreError> {
    i32::try_from(user.age).map_err(|_| StoreError::Corrupt {
        user_id: user.user_id.clone(),
        reason: format!("age {} out of range", user.age),
    })
}

/// User store on a sqlx Postgres pool
#[derive(Clone, Debug)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: &UserRecord) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users
                (user_id, dob, age, current_level, last_level_update_date, civic_scores)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&user.user_id)
        .bind(user.dob)
        .bind(age_column(user)?)
        .bind(i16::from(user.current_level.get()))
        .bind(user.last_level_update_date)
        .bind(Json(user.civic_scores))
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(StoreError::Duplicate(user.user_id.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find(&self, user_id: &str) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, dob, age, current_level, last_level_update_date, civic_scores
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRecord::try_from).transpose()
    }

    async fn update_level(&self, user: &UserRecord) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET age = $2, current_level = $3, last_level_update_date = $4
            WHERE user_id = $1
            "#,
        )
        .bind(&user.user_id)
        .bind(age_column(user)?)
        .bind(i16::from(user.current_level.get()))
        .bind(user.last_level_update_date)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_scores(
        &self,
        user_id: &str,
        deltas: &ScoreDeltas,
    ) -> Result<Option<CivicScores>, StoreError> {
        let scores = sqlx::query_scalar::<_, Json<CivicScores>>(
            r#"
            UPDATE users
            SET civic_scores = civic_scores || jsonb_build_object(
                'hygiene',     COALESCE((civic_scores->>'hygiene')::bigint, 0) + $2,
                'empathy',     COALESCE((civic_scores->>'empathy')::bigint, 0) + $3,
                'discipline',  COALESCE((civic_scores->>'discipline')::bigint, 0) + $4,
                'environment', COALESCE((civic_scores->>'environment')::bigint, 0) + $5
            )
            WHERE user_id = $1
            RETURNING civic_scores
            "#,
        )
        .bind(user_id)
        .bind(deltas.get(Category::Hygiene))
        .bind(deltas.get(Category::Empathy))
        .bind(deltas.get(Category::Discipline))
        .bind(deltas.get(Category::Environment))
        .fetch_optional(&self.pool)
        .await?;

        Ok(scores.map(|Json(scores)| scores))
    }
}
