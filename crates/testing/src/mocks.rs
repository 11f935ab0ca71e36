//! Mock implementations for repositories and external services.
//!
//! Provides an in-memory store for testing without database dependencies.
//! It mirrors the relational behavior the services rely on: foreign keys,
//! cascading deletes, aggregate computation and listing order.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use drill_catalog_application::{
    ApplicationError, ApplicationResult, CommentRepositoryPort, DrillRepositoryPort,
    HealthCheckPort, RatingRepositoryPort,
};
use drill_catalog_domain::{
    comment::{Comment, NewComment},
    drill::{Drill, DrillStats, DrillSummary, NewDrill},
    filters::DrillFilters,
    identifiers::*,
    rating::{NewRating, Rating},
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct CatalogState {
    drills: HashMap<DrillId, Drill>,
    // Insertion order; newest last.
    comments: Vec<Comment>,
    ratings: Vec<Rating>,
    last_timestamp: Option<DateTime<Utc>>,
}

impl CatalogState {
    /// Strictly increasing creation times so ordering is deterministic
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let next = match self.last_timestamp {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_timestamp = Some(next);
        next
    }

    fn summarize(&self, drill: &Drill) -> DrillSummary {
        let comments = self
            .comments
            .iter()
            .filter(|c| c.drill_id == drill.id)
            .count();
        let scores: Vec<i32> = self
            .ratings
            .iter()
            .filter(|r| r.drill_id == drill.id)
            .map(|r| r.score.value())
            .collect();

        DrillSummary {
            drill: drill.clone(),
            stats: DrillStats::from_parts(comments, &scores),
        }
    }
}

/// In-memory catalog implementing every repository port
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    state: Arc<RwLock<CatalogState>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every storage call fail as if the database were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn drill_count(&self) -> usize {
        self.state.read().drills.len()
    }

    pub fn comment_count(&self) -> usize {
        self.state.read().comments.len()
    }

    pub fn rating_count(&self) -> usize {
        self.state.read().ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        let state = self.state.read();
        state.drills.is_empty() && state.comments.is_empty() && state.ratings.is_empty()
    }

    /// Stored drill, bypassing the ports
    pub fn drill(&self, id: DrillId) -> Option<Drill> {
        self.state.read().drills.get(&id).cloned()
    }

    pub fn clear(&self) {
        let mut state = self.state.write();
        state.drills.clear();
        state.comments.clear();
        state.ratings.clear();
    }

    fn check_available(&self) -> ApplicationResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ApplicationError::Internal(
                "connection refused".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl DrillRepositoryPort for InMemoryCatalog {
    async fn create(&self, drill: &NewDrill) -> ApplicationResult<Drill> {
        self.check_available()?;
        let mut state = self.state.write();
        let created_at = state.next_timestamp();
        let drill = drill.clone().into_drill(DrillId::new(), created_at);
        state.drills.insert(drill.id, drill.clone());
        Ok(drill)
    }

    async fn get(&self, id: DrillId) -> ApplicationResult<Option<Drill>> {
        self.check_available()?;
        Ok(self.state.read().drills.get(&id).cloned())
    }

    async fn get_with_aggregates(&self, id: DrillId) -> ApplicationResult<Option<DrillSummary>> {
        self.check_available()?;
        let state = self.state.read();
        Ok(state.drills.get(&id).map(|drill| state.summarize(drill)))
    }

    async fn list(&self, filters: &DrillFilters) -> ApplicationResult<Vec<DrillSummary>> {
        self.check_available()?;
        let state = self.state.read();
        let mut summaries: Vec<DrillSummary> = state
            .drills
            .values()
            .filter(|drill| filters.matches(drill))
            .map(|drill| state.summarize(drill))
            .collect();
        summaries.sort_by(DrillSummary::listing_order);
        Ok(summaries)
    }

    async fn update(&self, drill: &Drill) -> ApplicationResult<Drill> {
        self.check_available()?;
        let mut state = self.state.write();
        match state.drills.get_mut(&drill.id) {
            Some(stored) => {
                // Identity, author and creation time are immutable.
                let mut updated = drill.clone();
                updated.created_by_name = stored.created_by_name.clone();
                updated.created_at = stored.created_at;
                *stored = updated.clone();
                Ok(updated)
            }
            None => Err(ApplicationError::not_found(DrillId::KIND)),
        }
    }

    async fn delete(&self, id: DrillId) -> ApplicationResult<bool> {
        self.check_available()?;
        let mut state = self.state.write();
        if state.drills.remove(&id).is_none() {
            return Ok(false);
        }
        state.comments.retain(|c| c.drill_id != id);
        state.ratings.retain(|r| r.drill_id != id);
        Ok(true)
    }
}

#[async_trait]
impl CommentRepositoryPort for InMemoryCatalog {
    async fn create(&self, comment: &NewComment) -> ApplicationResult<Comment> {
        self.check_available()?;
        let mut state = self.state.write();
        if !state.drills.contains_key(&comment.drill_id) {
            return Err(ApplicationError::not_found(DrillId::KIND));
        }
        let created_at = state.next_timestamp();
        let comment = comment.clone().into_comment(CommentId::new(), created_at);
        state.comments.push(comment.clone());
        Ok(comment)
    }

    async fn get(&self, id: CommentId) -> ApplicationResult<Option<Comment>> {
        self.check_available()?;
        Ok(self
            .state
            .read()
            .comments
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn list_for_drill(&self, drill_id: DrillId) -> ApplicationResult<Vec<Comment>> {
        self.check_available()?;
        Ok(self
            .state
            .read()
            .comments
            .iter()
            .rev()
            .filter(|c| c.drill_id == drill_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: CommentId) -> ApplicationResult<bool> {
        self.check_available()?;
        let mut state = self.state.write();
        let before = state.comments.len();
        state.comments.retain(|c| c.id != id);
        Ok(state.comments.len() != before)
    }
}

#[async_trait]
impl RatingRepositoryPort for InMemoryCatalog {
    async fn create(&self, rating: &NewRating) -> ApplicationResult<Rating> {
        self.check_available()?;
        let mut state = self.state.write();
        if !state.drills.contains_key(&rating.drill_id) {
            return Err(ApplicationError::not_found(DrillId::KIND));
        }
        let created_at = state.next_timestamp();
        let rating = rating.clone().into_rating(RatingId::new(), created_at);
        state.ratings.push(rating.clone());
        Ok(rating)
    }

    async fn get(&self, id: RatingId) -> ApplicationResult<Option<Rating>> {
        self.check_available()?;
        Ok(self
            .state
            .read()
            .ratings
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn list_for_drill(&self, drill_id: DrillId) -> ApplicationResult<Vec<Rating>> {
        self.check_available()?;
        Ok(self
            .state
            .read()
            .ratings
            .iter()
            .rev()
            .filter(|r| r.drill_id == drill_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: RatingId) -> ApplicationResult<bool> {
        self.check_available()?;
        let mut state = self.state.write();
        let before = state.ratings.len();
        state.ratings.retain(|r| r.id != id);
        Ok(state.ratings.len() != before)
    }
}

#[async_trait]
impl HealthCheckPort for InMemoryCatalog {
    async fn ping(&self) -> ApplicationResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ApplicationError::ServiceUnavailable(
                "Database unreachable".to_string(),
            ));
        }
        Ok(())
    }
}
