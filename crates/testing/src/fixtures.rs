//! Test fixtures for generating domain entities with realistic data.
//!
//! Names, titles and comment bodies are randomized with `fake`; everything
//! that influences behavior (urls, tags, scores) is fixed.

use chrono::Utc;
use fake::{
    faker::{lorem::en::Sentence, name::en::FirstName},
    Fake,
};
use drill_catalog_domain::{
    comment::{Comment, NewComment},
    drill::{canonicalize_url, Drill, NewDrill},
    identifiers::*,
    rating::{NewRating, Rating, Score},
};
use serde_json::{json, Value};

/// A video URL every platform detector recognizes
pub const TEST_VIDEO_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

/// A random author name that always passes validation
pub fn fake_author() -> String {
    loop {
        let name: String = FirstName().fake();
        if (2..=80).contains(&name.chars().count()) {
            return name;
        }
    }
}

/// Create an unsaved drill with default values
pub fn create_test_new_drill() -> NewDrill {
    create_test_new_drill_for(TEST_VIDEO_URL)
}

/// Create an unsaved drill pointing at `url`
///
/// Panics if `url` is not an acceptable video URL.
pub fn create_test_new_drill_for(url: &str) -> NewDrill {
    let url = canonicalize_url(url).expect("test url must be valid");
    let mut drill = NewDrill::new(&url, fake_author());
    drill.title = Some(Sentence(2..4).fake());
    drill.levels = vec![1, 2];
    drill.fundamentals = vec!["serve".to_string(), "receive".to_string()];
    drill.drill_types = vec!["warmup".to_string()];
    drill
}

/// Create a stored drill with default values
pub fn create_test_drill() -> Drill {
    create_test_new_drill().into_drill(DrillId::new(), Utc::now())
}

/// Create an unsaved comment for a drill
pub fn create_test_new_comment(drill_id: DrillId) -> NewComment {
    NewComment {
        drill_id,
        comment: Sentence(3..8).fake(),
        created_by_name: fake_author(),
    }
}

/// Create a stored comment for a drill
pub fn create_test_comment(drill_id: DrillId) -> Comment {
    create_test_new_comment(drill_id).into_comment(CommentId::new(), Utc::now())
}

/// Create an unsaved rating for a drill
///
/// Panics if `score` is outside 1..=10.
pub fn create_test_new_rating(drill_id: DrillId, score: i32) -> NewRating {
    NewRating {
        drill_id,
        score: Score::new(score).expect("test score must be in range"),
        created_by_name: fake_author(),
    }
}

/// Create a stored rating for a drill
pub fn create_test_rating(drill_id: DrillId, score: i32) -> Rating {
    create_test_new_rating(drill_id, score).into_rating(RatingId::new(), Utc::now())
}

/// JSON body for `POST /drills`
pub fn drill_payload(url: &str) -> Value {
    json!({
        "url": url,
        "title": Sentence(2..4).fake::<String>(),
        "levels": [1, 2],
        "fundamentals": ["serve"],
        "drill_types": ["warmup"],
        "created_by_name": fake_author(),
    })
}

/// JSON body for `POST /drills/{id}/comments`
pub fn comment_payload(text: &str) -> Value {
    json!({ "comment": text, "created_by_name": fake_author() })
}

/// JSON body for `POST /drills/{id}/ratings`
pub fn rating_payload(score: i32) -> Value {
    json!({ "score": score, "created_by_name": fake_author() })
}
