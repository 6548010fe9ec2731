//! Integration tests for the Flashcards API
//!
//! Tests listing, filtering, search escaping, pagination, ownership
//! scoping and CRUD against a real PostgreSQL database.

use actix_web::{test, web, App};
use chrono::{Duration, Utc};
use flashgen::routes;
use serde_json::{json, Value};

use crate::common::db::TestDb;
use crate::common::fixtures::{
    create_token, create_user, seed_flashcard, seed_flashcard_at,
};

macro_rules! flashcards_app {
    ($db:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($db.pool.clone()))
                .configure(routes::flashcards::configure),
        )
        .await
    };
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

#[actix_web::test]
async fn test_list_requires_auth() {
    let db = TestDb::new().await;
    let app = flashcards_app!(db);

    let req = test::TestRequest::get().uri("/api/flashcards").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::get()
        .uri("/api/flashcards")
        .insert_header(("Authorization", "Bearer not-a-real-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Unauthorized");
}

#[actix_web::test]
async fn test_create_and_get_flashcard() {
    let db = TestDb::new().await;
    let user = create_user(&db.pool, "student@example.com").await;
    let token = create_token(&db.pool, user.id).await;
    let app = flashcards_app!(db);

    let req = test::TestRequest::post()
        .uri("/api/flashcards")
        .insert_header(bearer(&token))
        .set_json(json!({
            "sentence_en": "The cat sleeps on the windowsill",
            "translation_pl": "Kot śpi na parapecie"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["sentence_en"], "The cat sleeps on the windowsill");
    assert_eq!(created["translation_pl"], "Kot śpi na parapecie");
    assert_eq!(created["source"], "manual");
    assert_eq!(created["is_edited"], false);
    // The owner id must never appear in API responses
    assert!(created.get("user_id").is_none());

    let id = created["id"].as_str().unwrap();
    let req = test::TestRequest::get()
        .uri(&format!("/api/flashcards/{}", id))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let fetched: Value = test::read_body_json(resp).await;
    assert_eq!(fetched["id"], created["id"]);
    assert!(fetched.get("user_id").is_none());
}

#[actix_web::test]
async fn test_list_default_order_most_recent_first() {
    let db = TestDb::new().await;
    let user = create_user(&db.pool, "student@example.com").await;
    let token = create_token(&db.pool, user.id).await;

    let now = Utc::now();
    seed_flashcard_at(&db.pool, user.id, "oldest", "a", "manual", now - Duration::hours(3)).await;
    seed_flashcard_at(&db.pool, user.id, "middle", "b", "manual", now - Duration::hours(2)).await;
    seed_flashcard_at(&db.pool, user.id, "newest", "c", "manual", now - Duration::hours(1)).await;

    let app = flashcards_app!(db);

    let req = test::TestRequest::get()
        .uri("/api/flashcards")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(data[0]["sentence_en"], "newest");
    assert_eq!(data[1]["sentence_en"], "middle");
    assert_eq!(data[2]["sentence_en"], "oldest");

    assert_eq!(body["meta"]["total"], 3);
    assert_eq!(body["meta"]["limit"], 100);
    assert_eq!(body["meta"]["offset"], 0);
}

#[actix_web::test]
async fn test_list_pagination_window_and_total() {
    let db = TestDb::new().await;
    let user = create_user(&db.pool, "student@example.com").await;
    let token = create_token(&db.pool, user.id).await;

    let now = Utc::now();
    for i in 0..5 {
        seed_flashcard_at(
            &db.pool,
            user.id,
            &format!("card {}", i),
            "pl",
            "manual",
            now - Duration::minutes(i),
        )
        .await;
    }

    let app = flashcards_app!(db);

    // First page: 2 of 5, total reflects all matches
    let req = test::TestRequest::get()
        .uri("/api/flashcards?limit=2&offset=0")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["meta"]["total"], 5);
    assert_eq!(body["meta"]["limit"], 2);

    // Last partial page
    let req = test::TestRequest::get()
        .uri("/api/flashcards?limit=2&offset=4")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["meta"]["total"], 5);

    // Offset past the end still reports the true total
    let req = test::TestRequest::get()
        .uri("/api/flashcards?limit=2&offset=10")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
    assert_eq!(body["meta"]["total"], 5);
    assert_eq!(body["meta"]["offset"], 10);
}

#[actix_web::test]
async fn test_search_matches_wildcards_literally() {
    let db = TestDb::new().await;
    let user = create_user(&db.pool, "student@example.com").await;
    let token = create_token(&db.pool, user.id).await;

    seed_flashcard(&db.pool, user.id, "I am 100% sure", "pl1", "manual").await;
    seed_flashcard(&db.pool, user.id, "I am 100x sure", "pl2", "manual").await;
    seed_flashcard(&db.pool, user.id, "use snake_case here", "pl3", "manual").await;
    seed_flashcard(&db.pool, user.id, "use snakeXcase here", "pl4", "manual").await;

    let app = flashcards_app!(db);

    // '%' must not act as a wildcard ("100%25" decodes to "100%")
    let req = test::TestRequest::get()
        .uri("/api/flashcards?search=100%25")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["sentence_en"], "I am 100% sure");

    // '_' must not match an arbitrary single character
    let req = test::TestRequest::get()
        .uri("/api/flashcards?search=e_c")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["sentence_en"], "use snake_case here");
}

#[actix_web::test]
async fn test_search_is_case_insensitive_across_both_fields() {
    let db = TestDb::new().await;
    let user = create_user(&db.pool, "student@example.com").await;
    let token = create_token(&db.pool, user.id).await;

    seed_flashcard(&db.pool, user.id, "Hello World", "Witaj swiecie", "manual").await;
    seed_flashcard(&db.pool, user.id, "Goodbye", "Zegnaj", "manual").await;

    let app = flashcards_app!(db);

    // Unanchored, case-insensitive match on the English field
    let req = test::TestRequest::get()
        .uri("/api/flashcards?search=hello%20wo")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // Match on the translation field
    let req = test::TestRequest::get()
        .uri("/api/flashcards?search=witaj")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["sentence_en"], "Hello World");
}

#[actix_web::test]
async fn test_source_filter() {
    let db = TestDb::new().await;
    let user = create_user(&db.pool, "student@example.com").await;
    let token = create_token(&db.pool, user.id).await;

    seed_flashcard(&db.pool, user.id, "generated one", "pl", "ai").await;
    seed_flashcard(&db.pool, user.id, "generated two", "pl", "ai").await;
    seed_flashcard(&db.pool, user.id, "typed by hand", "pl", "manual").await;

    let app = flashcards_app!(db);

    let req = test::TestRequest::get()
        .uri("/api/flashcards?source=ai")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert!(data.iter().all(|card| card["source"] == "ai"));
    assert_eq!(body["meta"]["total"], 2);

    let req = test::TestRequest::get()
        .uri("/api/flashcards?source=manual")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_sort_by_updated_at_ascending() {
    let db = TestDb::new().await;
    let user = create_user(&db.pool, "student@example.com").await;
    let token = create_token(&db.pool, user.id).await;

    let now = Utc::now();
    seed_flashcard_at(&db.pool, user.id, "first", "a", "manual", now - Duration::hours(2)).await;
    seed_flashcard_at(&db.pool, user.id, "second", "b", "manual", now - Duration::hours(1)).await;

    let app = flashcards_app!(db);

    let req = test::TestRequest::get()
        .uri("/api/flashcards?sort=updated_at&order=asc")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data[0]["sentence_en"], "first");
    assert_eq!(data[1]["sentence_en"], "second");
}

#[actix_web::test]
async fn test_rows_are_scoped_to_their_owner() {
    let db = TestDb::new().await;
    let alice = create_user(&db.pool, "alice@example.com").await;
    let bob = create_user(&db.pool, "bob@example.com").await;
    let alice_token = create_token(&db.pool, alice.id).await;
    let bob_token = create_token(&db.pool, bob.id).await;

    let alice_card = seed_flashcard(&db.pool, alice.id, "alice card", "pl", "manual").await;
    seed_flashcard(&db.pool, bob.id, "bob card", "pl", "manual").await;

    let app = flashcards_app!(db);

    // Each owner lists only their own cards
    let req = test::TestRequest::get()
        .uri("/api/flashcards")
        .insert_header(bearer(&bob_token))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["sentence_en"], "bob card");
    assert_eq!(body["meta"]["total"], 1);

    // Cross-owner access looks like a missing row
    let req = test::TestRequest::get()
        .uri(&format!("/api/flashcards/{}", alice_card.id))
        .insert_header(bearer(&bob_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/flashcards/{}", alice_card.id))
        .insert_header(bearer(&bob_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);

    // The row is still there for its owner
    let req = test::TestRequest::get()
        .uri(&format!("/api/flashcards/{}", alice_card.id))
        .insert_header(bearer(&alice_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);
}

#[actix_web::test]
async fn test_list_rejects_out_of_range_params() {
    let db = TestDb::new().await;
    let user = create_user(&db.pool, "student@example.com").await;
    let token = create_token(&db.pool, user.id).await;
    let app = flashcards_app!(db);

    let overlong_search = format!("/api/flashcards?search={}", "a".repeat(201));
    let bad_uris = [
        "/api/flashcards?limit=0",
        "/api/flashcards?limit=501",
        "/api/flashcards?limit=abc",
        "/api/flashcards?offset=-1",
        "/api/flashcards?source=bogus",
        "/api/flashcards?sort=id",
        "/api/flashcards?order=down",
        overlong_search.as_str(),
    ];

    for uri in bad_uris {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(bearer(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400, "expected 400 for {}", uri);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Bad Request");
        assert!(body["message"].is_string());
    }
}

#[actix_web::test]
async fn test_update_marks_flashcard_as_edited() {
    let db = TestDb::new().await;
    let user = create_user(&db.pool, "student@example.com").await;
    let token = create_token(&db.pool, user.id).await;
    let card = seed_flashcard(&db.pool, user.id, "original", "oryginal", "ai").await;
    assert!(!card.is_edited);

    let app = flashcards_app!(db);

    let req = test::TestRequest::put()
        .uri(&format!("/api/flashcards/{}", card.id))
        .insert_header(bearer(&token))
        .set_json(json!({
            "sentence_en": "corrected",
            "translation_pl": "poprawione"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["sentence_en"], "corrected");
    assert_eq!(body["is_edited"], true);
    // Editing never changes how the card was originally created
    assert_eq!(body["source"], "ai");
}

#[actix_web::test]
async fn test_create_rejects_invalid_fields() {
    let db = TestDb::new().await;
    let user = create_user(&db.pool, "student@example.com").await;
    let token = create_token(&db.pool, user.id).await;
    let app = flashcards_app!(db);

    let cases = [
        json!({ "sentence_en": "", "translation_pl": "pl" }),
        json!({ "sentence_en": "   ", "translation_pl": "pl" }),
        json!({ "sentence_en": "a".repeat(201), "translation_pl": "pl" }),
        json!({ "sentence_en": "en", "translation_pl": "" }),
    ];

    for body in cases {
        let req = test::TestRequest::post()
            .uri("/api/flashcards")
            .insert_header(bearer(&token))
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }
}

#[actix_web::test]
async fn test_delete_flashcard() {
    let db = TestDb::new().await;
    let user = create_user(&db.pool, "student@example.com").await;
    let token = create_token(&db.pool, user.id).await;
    let card = seed_flashcard(&db.pool, user.id, "to be removed", "pl", "manual").await;

    let app = flashcards_app!(db);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/flashcards/{}", card.id))
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 204);

    let req = test::TestRequest::get()
        .uri(&format!("/api/flashcards/{}", card.id))
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}

#[actix_web::test]
async fn test_list_responses_never_contain_owner_id() {
    let db = TestDb::new().await;
    let user = create_user(&db.pool, "student@example.com").await;
    let token = create_token(&db.pool, user.id).await;
    seed_flashcard(&db.pool, user.id, "one", "pl", "manual").await;
    seed_flashcard(&db.pool, user.id, "two", "pl", "ai").await;

    let app = flashcards_app!(db);

    let req = test::TestRequest::get()
        .uri("/api/flashcards")
        .insert_header(bearer(&token))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;

    for card in body["data"].as_array().unwrap() {
        assert!(card.get("user_id").is_none());
    }
}
