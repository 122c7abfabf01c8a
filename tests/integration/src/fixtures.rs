//! In-memory repository fakes and fixture builders
//!
//! A single store implements all four repository traits so the whole service
//! pipeline runs against deterministic in-memory data, with the same
//! filtering and ordering semantics as the PostgreSQL implementations.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use pulse_core::entities::{
    AuthorSummary, FeedCandidate, Follow, Post, PostSymbol, PostWithSymbols, Reaction,
    ReactionCounts, ReactionKind, ReactionWithSymbols, SymbolKind, User,
};
use pulse_core::traits::{
    FollowRepository, PostRepository, ReactionRepository, RepoResult, UserRepository,
};
use pulse_core::{DomainError, Snowflake};

/// Fixed reference time all fixtures are built against
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

#[derive(Debug, Clone)]
struct StoredPost {
    post: Post,
    symbols: Vec<PostSymbol>,
    deleted: bool,
}

/// In-memory store implementing every repository trait
#[derive(Default)]
pub struct InMemoryStore {
    users: Mutex<Vec<User>>,
    posts: Mutex<Vec<StoredPost>>,
    reactions: Mutex<Vec<Reaction>>,
    follows: Mutex<Vec<Follow>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user
    pub fn add_user(&self, id: i64, username: &str) {
        let user = User::new(
            Snowflake::new(id),
            username.to_string(),
            fixed_now() - Duration::days(30),
        );
        self.users.lock().unwrap().push(user);
    }

    /// Seed a top-level post created `age` before [`fixed_now`]
    pub fn add_post(&self, id: i64, author_id: i64, age: Duration, tickers: &[&str]) {
        self.add_post_full(id, author_id, age, tickers, None, false);
    }

    /// Seed a post with full control over reply parent and hidden flag
    pub fn add_post_full(
        &self,
        id: i64,
        author_id: i64,
        age: Duration,
        tickers: &[&str],
        reply_to: Option<i64>,
        hidden: bool,
    ) {
        self.add_post_at(id, author_id, fixed_now() - age, tickers, reply_to, hidden);
    }

    /// Seed a post at an explicit creation time (HTTP-level tests build
    /// against the real clock because the server reads `Utc::now()`)
    pub fn add_post_at(
        &self,
        id: i64,
        author_id: i64,
        created_at: DateTime<Utc>,
        tickers: &[&str],
        reply_to: Option<i64>,
        hidden: bool,
    ) {
        let mut post = match reply_to {
            Some(parent) => Post::new_reply(
                Snowflake::new(id),
                Snowflake::new(author_id),
                format!("post {id}"),
                created_at,
                Snowflake::new(parent),
            ),
            None => Post::new(
                Snowflake::new(id),
                Snowflake::new(author_id),
                format!("post {id}"),
                created_at,
            ),
        };
        post.hidden = hidden;

        let symbols = tickers
            .iter()
            .map(|t| PostSymbol::new(*t, Some(SymbolKind::Stock), None))
            .collect();

        self.posts.lock().unwrap().push(StoredPost {
            post,
            symbols,
            deleted: false,
        });
    }

    /// Seed a reaction created `age` before [`fixed_now`]
    pub fn add_reaction(&self, post_id: i64, user_id: i64, kind: ReactionKind, age: Duration) {
        self.reactions.lock().unwrap().push(Reaction::new(
            Snowflake::new(post_id),
            Snowflake::new(user_id),
            kind,
            fixed_now() - age,
        ));
    }

    /// Seed a follow edge
    pub fn add_follow(&self, follower_id: i64, followee_id: i64) {
        self.follows.lock().unwrap().push(Follow::new(
            Snowflake::new(follower_id),
            Snowflake::new(followee_id),
            fixed_now() - Duration::days(10),
        ));
    }

    /// Number of stored (non-removed) reactions, for toggle assertions
    pub fn reaction_rows(&self) -> usize {
        self.reactions.lock().unwrap().len()
    }

    fn author_summary(&self, author_id: Snowflake) -> AuthorSummary {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == author_id)
            .map(User::summary)
            .unwrap_or_else(|| AuthorSummary {
                id: author_id,
                username: format!("user-{author_id}"),
                display_name: None,
                avatar: None,
            })
    }

    fn counts(&self, post_id: Snowflake) -> ReactionCounts {
        let mut counts = ReactionCounts::default();
        for reaction in self.reactions.lock().unwrap().iter() {
            if reaction.post_id == post_id {
                counts.add(reaction.kind, 1);
            }
        }
        counts
    }

    fn candidate(&self, stored: &StoredPost) -> FeedCandidate {
        FeedCandidate {
            post: stored.post.clone(),
            author: self.author_summary(stored.post.author_id),
            symbols: stored.symbols.clone(),
            reactions: self.counts(stored.post.id),
        }
    }

    /// Newest-first ordering used by every candidate query
    fn sort_newest_first(posts: &mut [StoredPost]) {
        posts.sort_by(|a, b| {
            b.post
                .created_at
                .cmp(&a.post.created_at)
                .then(b.post.id.cmp(&a.post.id))
        });
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn update(&self, user: &User) -> RepoResult<()> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(())
            }
            None => Err(DomainError::UserNotFound(user.id)),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.post.id == id && !p.deleted)
            .map(|p| p.post.clone()))
    }

    async fn find_with_details(&self, id: Snowflake) -> RepoResult<Option<FeedCandidate>> {
        let stored = {
            let posts = self.posts.lock().unwrap();
            posts.iter().find(|p| p.post.id == id && !p.deleted).cloned()
        };
        Ok(stored.map(|p| self.candidate(&p)))
    }

    async fn create(&self, post: &Post, symbols: &[PostSymbol]) -> RepoResult<()> {
        self.posts.lock().unwrap().push(StoredPost {
            post: post.clone(),
            symbols: symbols.to_vec(),
            deleted: false,
        });
        Ok(())
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut posts = self.posts.lock().unwrap();
        match posts.iter_mut().find(|p| p.post.id == id && !p.deleted) {
            Some(stored) => {
                stored.deleted = true;
                Ok(())
            }
            None => Err(DomainError::PostNotFound(id)),
        }
    }

    async fn fetch_following_candidates(
        &self,
        user_id: Snowflake,
        before: Option<DateTime<Utc>>,
        limit: i64,
    ) -> RepoResult<Vec<FeedCandidate>> {
        let followees: Vec<Snowflake> = self
            .follows
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.follower_id == user_id)
            .map(|f| f.followee_id)
            .collect();

        let mut matching: Vec<StoredPost> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| {
                !p.deleted
                    && !p.post.hidden
                    && followees.contains(&p.post.author_id)
                    && before.map_or(true, |b| p.post.created_at < b)
            })
            .cloned()
            .collect();
        Self::sort_newest_first(&mut matching);
        matching.truncate(limit as usize);

        Ok(matching.iter().map(|p| self.candidate(p)).collect())
    }

    async fn fetch_recent_candidates(
        &self,
        since: DateTime<Utc>,
        max_rows: i64,
    ) -> RepoResult<Vec<FeedCandidate>> {
        let mut matching: Vec<StoredPost> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| {
                !p.deleted && !p.post.hidden && !p.post.is_reply() && p.post.created_at >= since
            })
            .cloned()
            .collect();
        Self::sort_newest_first(&mut matching);
        matching.truncate(max_rows as usize);

        Ok(matching.iter().map(|p| self.candidate(p)).collect())
    }

    async fn fetch_user_recent_posts(
        &self,
        user_id: Snowflake,
        since: DateTime<Utc>,
        max_rows: i64,
    ) -> RepoResult<Vec<PostWithSymbols>> {
        let mut matching: Vec<StoredPost> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| !p.deleted && p.post.author_id == user_id && p.post.created_at >= since)
            .cloned()
            .collect();
        Self::sort_newest_first(&mut matching);
        matching.truncate(max_rows as usize);

        Ok(matching
            .into_iter()
            .map(|p| PostWithSymbols {
                post: p.post,
                symbols: p.symbols,
            })
            .collect())
    }
}

#[async_trait]
impl ReactionRepository for InMemoryStore {
    async fn find(
        &self,
        post_id: Snowflake,
        user_id: Snowflake,
        kind: ReactionKind,
    ) -> RepoResult<Option<Reaction>> {
        Ok(self
            .reactions
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.post_id == post_id && r.user_id == user_id && r.kind == kind)
            .cloned())
    }

    async fn create(&self, reaction: &Reaction) -> RepoResult<()> {
        let mut reactions = self.reactions.lock().unwrap();
        let exists = reactions.iter().any(|r| {
            r.post_id == reaction.post_id && r.user_id == reaction.user_id && r.kind == reaction.kind
        });
        if !exists {
            reactions.push(reaction.clone());
        }
        Ok(())
    }

    async fn delete(
        &self,
        post_id: Snowflake,
        user_id: Snowflake,
        kind: ReactionKind,
    ) -> RepoResult<()> {
        self.reactions
            .lock()
            .unwrap()
            .retain(|r| !(r.post_id == post_id && r.user_id == user_id && r.kind == kind));
        Ok(())
    }

    async fn counts_for_post(&self, post_id: Snowflake) -> RepoResult<ReactionCounts> {
        Ok(self.counts(post_id))
    }

    async fn fetch_user_recent_reactions(
        &self,
        user_id: Snowflake,
        max_rows: i64,
    ) -> RepoResult<Vec<ReactionWithSymbols>> {
        let mut matching: Vec<Reaction> = self
            .reactions
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching.truncate(max_rows as usize);

        let posts = self.posts.lock().unwrap();
        Ok(matching
            .into_iter()
            .map(|reaction| {
                let symbols = posts
                    .iter()
                    .find(|p| p.post.id == reaction.post_id && !p.deleted)
                    .map(|p| p.symbols.clone())
                    .unwrap_or_default();
                ReactionWithSymbols { reaction, symbols }
            })
            .collect())
    }
}

#[async_trait]
impl FollowRepository for InMemoryStore {
    async fn create(&self, follow: &Follow) -> RepoResult<()> {
        let mut follows = self.follows.lock().unwrap();
        let exists = follows
            .iter()
            .any(|f| f.follower_id == follow.follower_id && f.followee_id == follow.followee_id);
        if !exists {
            follows.push(*follow);
        }
        Ok(())
    }

    async fn delete(&self, follower_id: Snowflake, followee_id: Snowflake) -> RepoResult<()> {
        self.follows
            .lock()
            .unwrap()
            .retain(|f| !(f.follower_id == follower_id && f.followee_id == followee_id));
        Ok(())
    }

    async fn following_count(&self, user_id: Snowflake) -> RepoResult<i64> {
        Ok(self
            .follows
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.follower_id == user_id)
            .count() as i64)
    }

    async fn follower_count(&self, user_id: Snowflake) -> RepoResult<i64> {
        Ok(self
            .follows
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.followee_id == user_id)
            .count() as i64)
    }
}
