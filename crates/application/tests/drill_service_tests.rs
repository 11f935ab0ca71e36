//! Tests for the drill service
//!
//! Creation, aggregate reads, filtering, partial updates and deletes against
//! the in-memory catalog.

use drill_catalog_application::{
    validation::UpdateDrillRequest, ApplicationError, DrillService, Patch, RatingService,
};
use drill_catalog_domain::{drill::Platform, filters::DrillFilters, identifiers::DrillId};
use drill_catalog_testing::{builders::*, mocks::InMemoryCatalog};
use std::sync::Arc;

fn services() -> (
    InMemoryCatalog,
    DrillService<InMemoryCatalog>,
    RatingService<InMemoryCatalog, InMemoryCatalog>,
) {
    let catalog = InMemoryCatalog::new();
    let store = Arc::new(catalog.clone());
    (
        catalog,
        DrillService::new(Arc::clone(&store)),
        RatingService::new(Arc::clone(&store), store),
    )
}

#[tokio::test]
async fn test_create_drill_starts_untested() {
    let (_, drills, _) = services();

    let summary = drills
        .create_drill(
            CreateDrillRequestBuilder::new()
                .with_url("https://youtube.com/watch?v=abc")
                .with_author("Alice")
                .build(),
        )
        .await
        .unwrap();

    assert_eq!(summary.drill.platform, Platform::Youtube);
    assert_eq!(summary.drill.video_id.as_deref(), Some("abc"));
    assert_eq!(summary.drill.created_by_name, "Alice");
    assert_eq!(summary.stats.comments_count, 0);
    assert_eq!(summary.stats.ratings_count, 0);
    assert_eq!(summary.stats.avg_rating, None);
    assert!(!summary.stats.tested());
}

#[tokio::test]
async fn test_create_drill_validation_failure() {
    let (catalog, drills, _) = services();

    let err = drills
        .create_drill(CreateDrillRequestBuilder::new().with_url("ftp://x").build())
        .await
        .unwrap_err();

    assert_eq!(err.http_status(), 422);
    assert_eq!(catalog.drill_count(), 0);
}

#[tokio::test]
async fn test_rating_scenario() {
    let (_, drills, ratings) = services();
    let created = drills
        .create_drill(CreateDrillRequestBuilder::new().build())
        .await
        .unwrap();
    let id = created.drill.id.to_string();

    ratings.add_rating(&id, rating_request(9)).await.unwrap();
    let summary = drills.get_drill(&id).await.unwrap();
    assert_eq!(summary.stats.avg_rating, Some(9.0));
    assert!(summary.stats.tested());

    ratings.add_rating(&id, rating_request(5)).await.unwrap();
    let summary = drills.get_drill(&id).await.unwrap();
    assert_eq!(summary.stats.avg_rating, Some(7.0));
    assert_eq!(summary.stats.ratings_count, 2);

    drills.delete_drill(&id).await.unwrap();
    assert_eq!(
        drills.get_drill(&id).await.unwrap_err(),
        ApplicationError::NotFound("Drill not found".to_string())
    );
}

#[tokio::test]
async fn test_malformed_id_is_invalid_input() {
    let (_, drills, _) = services();

    for result in [
        drills.get_drill("not-a-uuid").await.map(|_| ()),
        drills.delete_drill("123").await,
        drills
            .update_drill("", UpdateDrillRequest::default())
            .await
            .map(|_| ()),
    ] {
        let err = result.unwrap_err();
        assert_eq!(err.http_status(), 400);
        assert_eq!(err.to_string(), "Invalid drill id");
    }
}

#[tokio::test]
async fn test_missing_drill_is_not_found() {
    let (_, drills, _) = services();
    let id = DrillId::new().to_string();

    assert_eq!(drills.get_drill(&id).await.unwrap_err().http_status(), 404);
    assert_eq!(drills.delete_drill(&id).await.unwrap_err().http_status(), 404);
    assert_eq!(
        drills
            .update_drill(&id, UpdateDrillRequest::default())
            .await
            .unwrap_err()
            .http_status(),
        404
    );
}

#[tokio::test]
async fn test_list_level_overlap() {
    let (_, drills, _) = services();
    for levels in [vec![1], vec![2, 3], vec![4]] {
        drills
            .create_drill(CreateDrillRequestBuilder::new().with_levels(levels).build())
            .await
            .unwrap();
    }

    let filters = DrillFilters::from_query(Some("1,2"), None, None, None, None, None);
    let listed = drills.list_drills(filters).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed
        .iter()
        .all(|s| s.drill.levels.contains(&1) || s.drill.levels.contains(&2)));

    let all = drills.list_drills(DrillFilters::default()).await.unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn test_list_orders_rated_first() {
    let (_, drills, ratings) = services();
    let mut ids = Vec::new();
    for _ in 0..3 {
        let summary = drills
            .create_drill(CreateDrillRequestBuilder::new().build())
            .await
            .unwrap();
        ids.push(summary.drill.id.to_string());
    }
    ratings.add_rating(&ids[0], rating_request(4)).await.unwrap();
    ratings.add_rating(&ids[1], rating_request(8)).await.unwrap();

    let listed: Vec<String> = drills
        .list_drills(DrillFilters::default())
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.drill.id.to_string())
        .collect();

    assert_eq!(listed, vec![ids[1].clone(), ids[0].clone(), ids[2].clone()]);
}

#[tokio::test]
async fn test_update_is_partial() {
    let (catalog, drills, _) = services();
    let created = drills
        .create_drill(
            CreateDrillRequestBuilder::new()
                .with_title("Pepper")
                .with_notes("Keep it low")
                .coach_participates(true)
                .build(),
        )
        .await
        .unwrap();
    let id = created.drill.id.to_string();

    let updated = drills
        .update_drill(
            &id,
            UpdateDrillRequest {
                title: Patch::Value("Pepper 2".to_string()),
                coach_participates: Patch::Null,
                url: Patch::Value("https://www.tiktok.com/@coach/video/123".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.drill.title.as_deref(), Some("Pepper 2"));
    assert_eq!(updated.drill.coach_participates, None);
    assert_eq!(updated.drill.notes.as_deref(), Some("Keep it low"));
    assert_eq!(updated.drill.platform, Platform::Tiktok);
    assert_eq!(updated.drill.video_id.as_deref(), Some("123"));
    assert_eq!(updated.drill.created_at, created.drill.created_at);
    assert_eq!(catalog.drill(created.drill.id).unwrap(), updated.drill);
}

#[tokio::test]
async fn test_invalid_update_leaves_drill_unchanged() {
    let (catalog, drills, _) = services();
    let created = drills
        .create_drill(CreateDrillRequestBuilder::new().build())
        .await
        .unwrap();

    let err = drills
        .update_drill(
            &created.drill.id.to_string(),
            UpdateDrillRequest {
                title: Patch::Value("Renamed".to_string()),
                url: Patch::Value("not a url".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.http_status(), 422);
    assert_eq!(catalog.drill(created.drill.id).unwrap(), created.drill);
}

#[tokio::test]
async fn test_update_body_checked_before_id() {
    let (_, drills, _) = services();
    let invalid = || UpdateDrillRequest {
        url: Patch::Null,
        ..Default::default()
    };

    for id in ["not-a-uuid".to_string(), DrillId::new().to_string()] {
        let err = drills.update_drill(&id, invalid()).await.unwrap_err();
        assert_eq!(
            err,
            ApplicationError::ValidationFailed("url: Cannot be null".to_string())
        );
    }
}

#[tokio::test]
async fn test_tag_counts_and_player_bounds_are_free_form() {
    let (catalog, drills, _) = services();
    let fundamentals: Vec<String> = (0..21).map(|i| format!("skill-{}", i)).collect();
    let fundamentals: Vec<&str> = fundamentals.iter().map(String::as_str).collect();

    let created = drills
        .create_drill(
            CreateDrillRequestBuilder::new()
                .with_fundamentals(&fundamentals)
                .with_drill_types(&["a-drill-type-name-that-is-well-over-fifty-characters-long"])
                .with_players(Some(6), Some(2))
                .build(),
        )
        .await
        .unwrap();

    let stored = catalog.drill(created.drill.id).unwrap();
    assert_eq!(stored.fundamentals.len(), 21);
    assert_eq!((stored.min_players, stored.max_players), (Some(6), Some(2)));
}

#[tokio::test]
async fn test_storage_failure_is_internal() {
    let (catalog, drills, _) = services();
    catalog.set_unavailable(true);

    let err = drills.list_drills(DrillFilters::default()).await.unwrap_err();
    assert_eq!(err.http_status(), 500);
}
