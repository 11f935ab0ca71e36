//! Integration tests for the PostgreSQL repositories
//!
//! These tests require a PostgreSQL database and are marked with #[ignore].
//! Run with: TEST_DATABASE_URL=postgres://... cargo test --test repository_tests -- --ignored --test-threads=1

use drill_catalog_application::{
    ApplicationError, CommentRepositoryPort, DrillRepositoryPort, HealthCheckPort,
    RatingRepositoryPort,
};
use drill_catalog_domain::{filters::DrillFilters, identifiers::DrillId};
use drill_catalog_infrastructure::{
    schema, DatabasePool, PgCommentRepository, PgDrillRepository, PgRatingRepository,
};
use drill_catalog_testing::{
    database::TestDatabase,
    fixtures::{create_test_new_comment, create_test_new_drill, create_test_new_drill_for, create_test_new_rating},
};

struct Repos {
    db: TestDatabase,
    drills: PgDrillRepository,
    comments: PgCommentRepository,
    ratings: PgRatingRepository,
}

async fn setup() -> Repos {
    let db = TestDatabase::from_env().await.unwrap();
    schema::ensure_schema(db.pool()).await.unwrap();
    db.clean().await.unwrap();

    Repos {
        drills: PgDrillRepository::new(db.pool().clone()),
        comments: PgCommentRepository::new(db.pool().clone()),
        ratings: PgRatingRepository::new(db.pool().clone()),
        db,
    }
}

#[tokio::test]
#[ignore]
async fn test_schema_is_idempotent() {
    let repos = setup().await;
    schema::ensure_schema(repos.db.pool()).await.unwrap();
    schema::ensure_schema(repos.db.pool()).await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_drill_round_trip() {
    let repos = setup().await;
    let new_drill = create_test_new_drill();

    let created = repos.drills.insert(&new_drill).await.unwrap();
    assert_eq!(created.url, new_drill.url);
    assert_eq!(created.levels, new_drill.levels);
    assert!(!created.legacy.tested);

    let found = repos.drills.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(found, created);
}

#[tokio::test]
#[ignore]
async fn test_aggregates() {
    let repos = setup().await;
    let drill = repos.drills.insert(&create_test_new_drill()).await.unwrap();

    let summary = repos.drills.find_with_aggregates(drill.id).await.unwrap().unwrap();
    assert_eq!(summary.stats.comments_count, 0);
    assert_eq!(summary.stats.avg_rating, None);
    assert!(!summary.stats.tested());

    for _ in 0..3 {
        repos.comments.insert(&create_test_new_comment(drill.id)).await.unwrap();
    }
    repos.ratings.insert(&create_test_new_rating(drill.id, 9)).await.unwrap();
    repos.ratings.insert(&create_test_new_rating(drill.id, 5)).await.unwrap();

    let summary = repos.drills.find_with_aggregates(drill.id).await.unwrap().unwrap();
    assert_eq!(summary.stats.comments_count, 3);
    assert_eq!(summary.stats.ratings_count, 2);
    assert_eq!(summary.stats.avg_rating, Some(7.0));
    assert!(summary.stats.tested());
}

#[tokio::test]
#[ignore]
async fn test_list_filters_and_order() {
    let repos = setup().await;

    let mut beginner = create_test_new_drill_for("https://vimeo.com/1");
    beginner.levels = vec![1];
    beginner.title = Some("100% pepper".to_string());
    let beginner = repos.drills.insert(&beginner).await.unwrap();

    let mut advanced = create_test_new_drill_for("https://vimeo.com/2");
    advanced.levels = vec![3];
    advanced.coach_participates = Some(true);
    let advanced = repos.drills.insert(&advanced).await.unwrap();

    repos.ratings.insert(&create_test_new_rating(advanced.id, 6)).await.unwrap();

    let all = repos.drills.search(&DrillFilters::default()).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].drill.id, advanced.id);

    let filters = DrillFilters::from_query(Some("1,2"), None, None, None, None, None);
    let found = repos.drills.search(&filters).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].drill.id, beginner.id);

    let filters = DrillFilters::from_query(None, None, None, Some("100%"), None, None);
    assert_eq!(repos.drills.search(&filters).await.unwrap().len(), 1);

    let filters = DrillFilters::from_query(None, None, None, Some("0%p"), None, None);
    assert!(repos.drills.search(&filters).await.unwrap().is_empty());

    let filters = DrillFilters::from_query(None, None, None, None, Some("true"), None);
    let found = repos.drills.search(&filters).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].drill.id, advanced.id);
}

#[tokio::test]
#[ignore]
async fn test_delete_cascades() {
    let repos = setup().await;
    let drill = repos.drills.insert(&create_test_new_drill()).await.unwrap();
    let comment = repos.comments.insert(&create_test_new_comment(drill.id)).await.unwrap();
    let rating = repos.ratings.insert(&create_test_new_rating(drill.id, 4)).await.unwrap();

    assert!(repos.drills.remove(drill.id).await.unwrap());
    assert!(!repos.drills.remove(drill.id).await.unwrap());
    assert!(repos.comments.find_by_id(comment.id).await.unwrap().is_none());
    assert!(repos.ratings.find_by_id(rating.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore]
async fn test_child_insert_for_missing_drill() {
    let repos = setup().await;

    let err = CommentRepositoryPort::create(&repos.comments, &create_test_new_comment(DrillId::new()))
        .await
        .unwrap_err();
    assert_eq!(err, ApplicationError::NotFound("Drill not found".to_string()));

    let err = RatingRepositoryPort::create(&repos.ratings, &create_test_new_rating(DrillId::new(), 5))
        .await
        .unwrap_err();
    assert_eq!(err, ApplicationError::NotFound("Drill not found".to_string()));
}

#[tokio::test]
#[ignore]
async fn test_children_newest_first() {
    let repos = setup().await;
    let drill = DrillRepositoryPort::create(&repos.drills, &create_test_new_drill())
        .await
        .unwrap();
    let first = repos.comments.insert(&create_test_new_comment(drill.id)).await.unwrap();
    let second = repos.comments.insert(&create_test_new_comment(drill.id)).await.unwrap();

    let comments = repos.comments.find_by_drill(drill.id).await.unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].id, second.id);
    assert_eq!(comments[1].id, first.id);
}

#[tokio::test]
#[ignore]
async fn test_pool_health() {
    let repos = setup().await;
    let pool = DatabasePool::from_pool(repos.db.pool().clone());
    assert!(pool.round_trip().await.is_ok());
    assert!(pool.ping().await.is_ok());
}
