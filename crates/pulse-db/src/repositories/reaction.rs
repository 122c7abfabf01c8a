//! PostgreSQL implementation of ReactionRepository

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use pulse_core::entities::{
    PostSymbol, Reaction, ReactionCounts, ReactionKind, ReactionWithSymbols,
};
use pulse_core::traits::{ReactionRepository, RepoResult};
use pulse_core::value_objects::Snowflake;

use crate::models::{PostSymbolModel, ReactionCountRowModel, ReactionModel};

use super::error::map_db_error;

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn find(
        &self,
        post_id: Snowflake,
        user_id: Snowflake,
        kind: ReactionKind,
    ) -> RepoResult<Option<Reaction>> {
        let result = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT post_id, user_id, kind, created_at
            FROM reactions
            WHERE post_id = $1 AND user_id = $2 AND kind = $3
            "#,
        )
        .bind(post_id.into_inner())
        .bind(user_id.into_inner())
        .bind(kind.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Reaction::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn create(&self, reaction: &Reaction) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO reactions (post_id, user_id, kind, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (post_id, user_id, kind) DO NOTHING
            "#,
        )
        .bind(reaction.post_id.into_inner())
        .bind(reaction.user_id.into_inner())
        .bind(reaction.kind.as_str())
        .bind(reaction.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(
        &self,
        post_id: Snowflake,
        user_id: Snowflake,
        kind: ReactionKind,
    ) -> RepoResult<()> {
        sqlx::query(
            r#"
            DELETE FROM reactions WHERE post_id = $1 AND user_id = $2 AND kind = $3
            "#,
        )
        .bind(post_id.into_inner())
        .bind(user_id.into_inner())
        .bind(kind.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn counts_for_post(&self, post_id: Snowflake) -> RepoResult<ReactionCounts> {
        let rows = sqlx::query_as::<_, ReactionCountRowModel>(
            r#"
            SELECT post_id, kind, COUNT(*) AS count
            FROM reactions
            WHERE post_id = $1
            GROUP BY post_id, kind
            "#,
        )
        .bind(post_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let mut counts = ReactionCounts::default();
        for row in rows {
            if let Some(kind) = ReactionKind::parse(&row.kind) {
                counts.add(kind, row.count);
            }
        }
        Ok(counts)
    }

    #[instrument(skip(self))]
    async fn fetch_user_recent_reactions(
        &self,
        user_id: Snowflake,
        max_rows: i64,
    ) -> RepoResult<Vec<ReactionWithSymbols>> {
        let rows = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT r.post_id, r.user_id, r.kind, r.created_at
            FROM reactions r
            JOIN posts p ON p.id = r.post_id AND p.deleted_at IS NULL
            WHERE r.user_id = $1
            ORDER BY r.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id.into_inner())
        .bind(max_rows)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let post_ids: Vec<i64> = rows.iter().map(|r| r.post_id).collect();

        let mut symbols_by_post: HashMap<i64, Vec<PostSymbol>> = HashMap::new();
        if !post_ids.is_empty() {
            let symbol_rows = sqlx::query_as::<_, PostSymbolModel>(
                r#"
                SELECT post_id, ticker, kind, exchange
                FROM post_symbols
                WHERE post_id = ANY($1)
                ORDER BY post_id, ticker
                "#,
            )
            .bind(&post_ids)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

            for row in symbol_rows {
                symbols_by_post
                    .entry(row.post_id)
                    .or_default()
                    .push(PostSymbol::from(row));
            }
        }

        rows.into_iter()
            .map(|row| {
                let post_id = row.post_id;
                let reaction = Reaction::try_from(row)?;
                Ok(ReactionWithSymbols {
                    reaction,
                    // Cloned, not removed: several reactions can target the same post
                    symbols: symbols_by_post.get(&post_id).cloned().unwrap_or_default(),
                })
            })
            .collect()
    }
}
