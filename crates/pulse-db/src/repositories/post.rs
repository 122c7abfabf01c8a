//! PostgreSQL implementation of PostRepository
//!
//! Candidate queries return posts joined to denormalized author fields;
//! symbol associations and per-kind reaction counts are batch-loaded for the
//! fetched id set so the feed pipeline never issues per-post queries.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use pulse_core::entities::{
    FeedCandidate, Post, PostSymbol, PostWithSymbols, ReactionCounts, ReactionKind,
};
use pulse_core::traits::{PostRepository, RepoResult};
use pulse_core::value_objects::Snowflake;

use crate::models::{CandidateRowModel, PostModel, PostSymbolModel, ReactionCountRowModel};

use super::error::{map_db_error, post_not_found};

const CANDIDATE_COLUMNS: &str = r"
    p.id, p.author_id, p.content, p.created_at, p.reply_to, p.hidden,
    u.username AS author_username,
    u.display_name AS author_display_name,
    u.avatar AS author_avatar
";

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Batch-load symbol associations for a set of post ids
    async fn load_symbols(&self, post_ids: &[i64]) -> RepoResult<HashMap<i64, Vec<PostSymbol>>> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, PostSymbolModel>(
            r#"
            SELECT post_id, ticker, kind, exchange
            FROM post_symbols
            WHERE post_id = ANY($1)
            ORDER BY post_id, ticker
            "#,
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let mut by_post: HashMap<i64, Vec<PostSymbol>> = HashMap::new();
        for row in rows {
            by_post.entry(row.post_id).or_default().push(PostSymbol::from(row));
        }
        Ok(by_post)
    }

    /// Batch-load per-kind reaction counts for a set of post ids
    async fn load_reaction_counts(
        &self,
        post_ids: &[i64],
    ) -> RepoResult<HashMap<i64, ReactionCounts>> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, ReactionCountRowModel>(
            r#"
            SELECT post_id, kind, COUNT(*) AS count
            FROM reactions
            WHERE post_id = ANY($1)
            GROUP BY post_id, kind
            "#,
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let mut by_post: HashMap<i64, ReactionCounts> = HashMap::new();
        for row in rows {
            // Unknown kind strings are skipped rather than failing the feed
            if let Some(kind) = ReactionKind::parse(&row.kind) {
                by_post.entry(row.post_id).or_default().add(kind, row.count);
            }
        }
        Ok(by_post)
    }

    /// Attach symbols and reaction counts to candidate rows
    async fn assemble_candidates(
        &self,
        rows: Vec<CandidateRowModel>,
    ) -> RepoResult<Vec<FeedCandidate>> {
        let post_ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut symbols = self.load_symbols(&post_ids).await?;
        let mut counts = self.load_reaction_counts(&post_ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let id = row.id;
                let (post, author) = row.into_parts();
                FeedCandidate {
                    post,
                    author,
                    symbols: symbols.remove(&id).unwrap_or_default(),
                    reactions: counts.remove(&id).unwrap_or_default(),
                }
            })
            .collect())
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>> {
        let result = sqlx::query_as::<_, PostModel>(
            r#"
            SELECT id, author_id, content, created_at, reply_to, hidden, deleted_at
            FROM posts
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self))]
    async fn find_with_details(&self, id: Snowflake) -> RepoResult<Option<FeedCandidate>> {
        let query = format!(
            r#"
            SELECT {CANDIDATE_COLUMNS}
            FROM posts p
            JOIN users u ON u.id = p.author_id
            WHERE p.id = $1 AND p.deleted_at IS NULL
            "#
        );
        let row = sqlx::query_as::<_, CandidateRowModel>(&query)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        match row {
            Some(row) => Ok(self.assemble_candidates(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, post, symbols))]
    async fn create(&self, post: &Post, symbols: &[PostSymbol]) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO posts (id, author_id, content, created_at, reply_to, hidden)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(post.id.into_inner())
        .bind(post.author_id.into_inner())
        .bind(&post.content)
        .bind(post.created_at)
        .bind(post.reply_to.map(Snowflake::into_inner))
        .bind(post.hidden)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        for symbol in symbols {
            sqlx::query(
                r#"
                INSERT INTO post_symbols (post_id, ticker, kind, exchange)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (post_id, ticker) DO NOTHING
                "#,
            )
            .bind(post.id.into_inner())
            .bind(&symbol.ticker)
            .bind(symbol.kind.map(|k| k.as_str()))
            .bind(symbol.exchange.as_deref())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(post_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn fetch_following_candidates(
        &self,
        user_id: Snowflake,
        before: Option<DateTime<Utc>>,
        limit: i64,
    ) -> RepoResult<Vec<FeedCandidate>> {
        let query = format!(
            r#"
            SELECT {CANDIDATE_COLUMNS}
            FROM posts p
            JOIN users u ON u.id = p.author_id
            JOIN follows f ON f.followee_id = p.author_id AND f.follower_id = $1
            WHERE p.deleted_at IS NULL
              AND NOT p.hidden
              AND ($2::timestamptz IS NULL OR p.created_at < $2)
            ORDER BY p.created_at DESC, p.id DESC
            LIMIT $3
            "#
        );
        let rows = sqlx::query_as::<_, CandidateRowModel>(&query)
            .bind(user_id.into_inner())
            .bind(before)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        self.assemble_candidates(rows).await
    }

    #[instrument(skip(self))]
    async fn fetch_recent_candidates(
        &self,
        since: DateTime<Utc>,
        max_rows: i64,
    ) -> RepoResult<Vec<FeedCandidate>> {
        let query = format!(
            r#"
            SELECT {CANDIDATE_COLUMNS}
            FROM posts p
            JOIN users u ON u.id = p.author_id
            WHERE p.deleted_at IS NULL
              AND NOT p.hidden
              AND p.reply_to IS NULL
              AND p.created_at >= $1
            ORDER BY p.created_at DESC, p.id DESC
            LIMIT $2
            "#
        );
        let rows = sqlx::query_as::<_, CandidateRowModel>(&query)
            .bind(since)
            .bind(max_rows)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        self.assemble_candidates(rows).await
    }

    #[instrument(skip(self))]
    async fn fetch_user_recent_posts(
        &self,
        user_id: Snowflake,
        since: DateTime<Utc>,
        max_rows: i64,
    ) -> RepoResult<Vec<PostWithSymbols>> {
        let rows = sqlx::query_as::<_, PostModel>(
            r#"
            SELECT id, author_id, content, created_at, reply_to, hidden, deleted_at
            FROM posts
            WHERE author_id = $1 AND created_at >= $2 AND deleted_at IS NULL
            ORDER BY created_at DESC
            LIMIT $3
            "#,
        )
        .bind(user_id.into_inner())
        .bind(since)
        .bind(max_rows)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let post_ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut symbols = self.load_symbols(&post_ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let id = row.id;
                PostWithSymbols {
                    post: Post::from(row),
                    symbols: symbols.remove(&id).unwrap_or_default(),
                }
            })
            .collect())
    }
}
