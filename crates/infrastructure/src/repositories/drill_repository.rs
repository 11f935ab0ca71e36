//! Drill repository implementation.
//!
//! PostgreSQL-backed persistence for drills, including the aggregate listing
//! that joins comment and rating statistics.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Postgres, QueryBuilder, Row};
use tracing::{debug, instrument};
use uuid::Uuid;

use drill_catalog_application::{ApplicationResult, DrillRepositoryPort};
use drill_catalog_domain::{
    drill::{Drill, DrillStats, DrillSummary, LegacyEvaluation, NewDrill, Platform},
    filters::DrillFilters,
    identifiers::DrillId,
};

use super::escape_like;
use crate::{Error, Result};

const DRILL_COLUMNS: &str = "d.id, d.title, d.url, d.platform, d.video_id, d.levels, \
     d.fundamentals, d.drill_types, d.coach_participates, d.good_for_many_players, \
     d.min_players, d.max_players, d.notes, d.tested, d.tested_rating, d.tested_notes, \
     d.created_by_name, d.created_at";

const AGGREGATE_SELECT: &str = "SELECT d.id, d.title, d.url, d.platform, d.video_id, d.levels, \
     d.fundamentals, d.drill_types, d.coach_participates, d.good_for_many_players, \
     d.min_players, d.max_players, d.notes, d.tested, d.tested_rating, d.tested_notes, \
     d.created_by_name, d.created_at, \
     COALESCE(c.comments_count, 0) AS comments_count, \
     COALESCE(r.ratings_count, 0) AS ratings_count, \
     r.avg_rating \
     FROM drills d \
     LEFT JOIN (SELECT drill_id, COUNT(*) AS comments_count \
                FROM drill_comments GROUP BY drill_id) c ON c.drill_id = d.id \
     LEFT JOIN (SELECT drill_id, COUNT(*) AS ratings_count, AVG(score)::float8 AS avg_rating \
                FROM drill_ratings GROUP BY drill_id) r ON r.drill_id = d.id";

const LISTING_ORDER: &str = " ORDER BY (COALESCE(r.ratings_count, 0) > 0) DESC, \
     r.avg_rating DESC NULLS LAST, \
     COALESCE(r.ratings_count, 0) DESC, \
     COALESCE(c.comments_count, 0) DESC, \
     d.created_at DESC";

/// PostgreSQL implementation of the drill repository port.
pub struct PgDrillRepository {
    pool: PgPool,
}

impl PgDrillRepository {
    /// Create a new PostgreSQL drill repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a drill, letting the database assign id and timestamp.
    #[instrument(skip(self, drill), fields(url = %drill.url))]
    pub async fn insert(&self, drill: &NewDrill) -> Result<Drill> {
        let sql = format!(
            r#"
            INSERT INTO drills AS d (
                title, url, platform, video_id, levels, fundamentals, drill_types,
                coach_participates, good_for_many_players, min_players, max_players,
                notes, created_by_name
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {}
            "#,
            DRILL_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(&drill.title)
            .bind(&drill.url)
            .bind(drill.platform.as_str())
            .bind(&drill.video_id)
            .bind(&drill.levels)
            .bind(&drill.fundamentals)
            .bind(&drill.drill_types)
            .bind(drill.coach_participates)
            .bind(drill.good_for_many_players)
            .bind(drill.min_players)
            .bind(drill.max_players)
            .bind(&drill.notes)
            .bind(&drill.created_by_name)
            .fetch_one(&self.pool)
            .await?;

        let drill = row_to_drill(&row)?;
        debug!(drill_id = %drill.id, "Inserted drill");
        Ok(drill)
    }

    /// Find a drill by id.
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: DrillId) -> Result<Option<Drill>> {
        let sql = format!("SELECT {} FROM drills d WHERE d.id = $1", DRILL_COLUMNS);

        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_drill).transpose()
    }

    /// Find a drill by id along with its aggregates.
    #[instrument(skip(self))]
    pub async fn find_with_aggregates(&self, id: DrillId) -> Result<Option<DrillSummary>> {
        let sql = format!("{} WHERE d.id = $1", AGGREGATE_SELECT);

        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_summary).transpose()
    }

    /// List drills matching the filters, in listing order.
    #[instrument(skip(self))]
    pub async fn search(&self, filters: &DrillFilters) -> Result<Vec<DrillSummary>> {
        let mut builder = build_list_query(filters);

        let rows = builder.build().fetch_all(&self.pool).await?;
        debug!(count = rows.len(), "Listed drills");

        rows.iter().map(row_to_summary).collect()
    }

    /// Overwrite the mutable columns of a drill.
    #[instrument(skip(self, drill), fields(drill_id = %drill.id))]
    pub async fn save(&self, drill: &Drill) -> Result<Drill> {
        let sql = format!(
            r#"
            UPDATE drills AS d SET
                title = $2, url = $3, platform = $4, video_id = $5, levels = $6,
                fundamentals = $7, drill_types = $8, coach_participates = $9,
                good_for_many_players = $10, min_players = $11, max_players = $12,
                notes = $13
            WHERE d.id = $1
            RETURNING {}
            "#,
            DRILL_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(drill.id.as_uuid())
            .bind(&drill.title)
            .bind(&drill.url)
            .bind(drill.platform.as_str())
            .bind(&drill.video_id)
            .bind(&drill.levels)
            .bind(&drill.fundamentals)
            .bind(&drill.drill_types)
            .bind(drill.coach_participates)
            .bind(drill.good_for_many_players)
            .bind(drill.min_players)
            .bind(drill.max_players)
            .bind(&drill.notes)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => row_to_drill(&row),
            None => Err(Error::NotFound("Drill not found".to_string())),
        }
    }

    /// Delete a drill; comments and ratings go with it.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: DrillId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM drills WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl DrillRepositoryPort for PgDrillRepository {
    async fn create(&self, drill: &NewDrill) -> ApplicationResult<Drill> {
        Ok(self.insert(drill).await?)
    }

    async fn get(&self, id: DrillId) -> ApplicationResult<Option<Drill>> {
        Ok(self.find_by_id(id).await?)
    }

    async fn get_with_aggregates(&self, id: DrillId) -> ApplicationResult<Option<DrillSummary>> {
        Ok(self.find_with_aggregates(id).await?)
    }

    async fn list(&self, filters: &DrillFilters) -> ApplicationResult<Vec<DrillSummary>> {
        Ok(self.search(filters).await?)
    }

    async fn update(&self, drill: &Drill) -> ApplicationResult<Drill> {
        Ok(self.save(drill).await?)
    }

    async fn delete(&self, id: DrillId) -> ApplicationResult<bool> {
        Ok(self.remove(id).await?)
    }
}

/// Build the filtered aggregate listing.
pub(crate) fn build_list_query(filters: &DrillFilters) -> QueryBuilder<'_, Postgres> {
    let mut builder = QueryBuilder::new(AGGREGATE_SELECT);
    builder.push(" WHERE 1=1");

    if !filters.levels.is_empty() {
        builder.push(" AND d.levels && ");
        builder.push_bind(filters.levels.clone());
    }
    if !filters.fundamentals.is_empty() {
        builder.push(" AND d.fundamentals && ");
        builder.push_bind(filters.fundamentals.clone());
    }
    if !filters.drill_types.is_empty() {
        builder.push(" AND d.drill_types && ");
        builder.push_bind(filters.drill_types.clone());
    }
    if let Some(search) = &filters.search {
        let pattern = format!("%{}%", escape_like(search));
        builder.push(" AND (COALESCE(d.title, '') ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR d.url ILIKE ");
        builder.push_bind(pattern);
        builder.push(")");
    }
    if filters.coach_participates {
        builder.push(" AND d.coach_participates IS TRUE");
    }
    if filters.good_for_many_players {
        builder.push(" AND d.good_for_many_players IS TRUE");
    }

    builder.push(LISTING_ORDER);
    builder
}

/// Convert a database row to a Drill.
fn row_to_drill(row: &PgRow) -> Result<Drill> {
    let platform: String = row.try_get("platform")?;

    Ok(Drill {
        id: DrillId::from(row.try_get::<Uuid, _>("id")?),
        title: row.try_get("title")?,
        url: row.try_get("url")?,
        platform: Platform::parse(&platform),
        video_id: row.try_get("video_id")?,
        levels: row.try_get("levels")?,
        fundamentals: row.try_get("fundamentals")?,
        drill_types: row.try_get("drill_types")?,
        coach_participates: row.try_get("coach_participates")?,
        good_for_many_players: row.try_get("good_for_many_players")?,
        min_players: row.try_get("min_players")?,
        max_players: row.try_get("max_players")?,
        notes: row.try_get("notes")?,
        legacy: LegacyEvaluation {
            tested: row.try_get("tested")?,
            tested_rating: row.try_get("tested_rating")?,
            tested_notes: row.try_get("tested_notes")?,
        },
        created_by_name: row.try_get("created_by_name")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Convert an aggregate row to a DrillSummary.
fn row_to_summary(row: &PgRow) -> Result<DrillSummary> {
    Ok(DrillSummary {
        drill: row_to_drill(row)?,
        stats: DrillStats {
            comments_count: row.try_get("comments_count")?,
            ratings_count: row.try_get("ratings_count")?,
            avg_rating: row.try_get("avg_rating")?,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unfiltered_query_has_no_predicates() {
        let filters = DrillFilters::default();
        let builder = build_list_query(&filters);
        let sql = builder.sql();
        assert!(sql.contains("WHERE 1=1 ORDER BY"));
        assert!(!sql.contains("$1"));
    }

    #[test]
    fn test_filters_become_bound_predicates() {
        let filters = DrillFilters::from_query(
            Some("1,2"),
            Some("serve"),
            None,
            Some("50%"),
            Some("true"),
            None,
        );
        let builder = build_list_query(&filters);
        let sql = builder.sql();

        assert!(sql.contains("d.levels && $1"));
        assert!(sql.contains("d.fundamentals && $2"));
        assert!(!sql.contains("d.drill_types &&"));
        assert!(sql.contains("ILIKE $3"));
        assert!(sql.contains("d.url ILIKE $4"));
        assert!(sql.contains("d.coach_participates IS TRUE"));
        assert!(!sql.contains("good_for_many_players IS TRUE"));
        assert!(!sql.contains("50%"));
    }

    #[test]
    fn test_listing_order_puts_rated_first() {
        let filters = DrillFilters::default();
        let builder = build_list_query(&filters);
        let sql = builder.sql();
        let rated = sql.find("> 0) DESC").unwrap();
        let avg = sql.find("avg_rating DESC NULLS LAST").unwrap();
        let newest = sql.find("d.created_at DESC").unwrap();
        assert!(rated < avg && avg < newest);
    }
}
