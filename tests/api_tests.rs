//! API integration tests
//!
//! Run against a live server: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/catalog";

/// Unique suffix so reruns against the same database do not collide
fn unique(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("{}-{}", prefix, nanos)
}

async fn create_author(client: &Client, family_name: &str) -> Value {
    let response = client
        .post(format!("{}/authors", BASE_URL))
        .json(&json!({
            "first_name": "Test",
            "family_name": family_name,
            "date_of_birth": "1920-01-02"
        }))
        .send()
        .await
        .expect("Failed to create author");
    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse author")
}

async fn create_genre(client: &Client, name: &str) -> Value {
    let response = client
        .post(format!("{}/genres", BASE_URL))
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to create genre");
    assert!(response.status().is_success());
    response.json().await.expect("Failed to parse genre")
}

async fn create_book(client: &Client, author_id: i64, genre_ids: &[i64]) -> Value {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": unique("Test Book"),
            "author_id": author_id,
            "summary": "A book created by the integration tests.",
            "isbn": "978-0-00-000000-0",
            "genre_ids": genre_ids
        }))
        .send()
        .await
        .expect("Failed to create book");
    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse book")
}

async fn create_copy(client: &Client, book_id: i64, body: Value) -> Value {
    let mut body = body;
    body["book_id"] = json!(book_id);
    if body.get("imprint").is_none() {
        body["imprint"] = json!("Test Imprint, 2024");
    }
    let response = client
        .post(format!("{}/copies", BASE_URL))
        .json(&body)
        .send()
        .await
        .expect("Failed to create copy");
    assert_eq!(response.status(), 201);
    response.json().await.expect("Failed to parse copy")
}

async fn delete_ok(client: &Client, path: &str, id: i64) {
    let response = client
        .delete(format!("{}/{}/{}", BASE_URL, path, id))
        .send()
        .await
        .expect("Failed to send delete");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get("http://localhost:8080/health")
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_reports_ready_with_store_up() {
    let client = Client::new();

    let response = client
        .get("http://localhost:8080/ready")
        .send()
        .await
        .expect("Failed to send request");

    // Readiness goes through the database, so 200 means the store answered.
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_get_missing_book_is_404() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books/999999999", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_create_book_rejects_empty_title() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "   ",
            "author_id": 1,
            "summary": "s",
            "isbn": "i"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_book_details_expand_references_in_order() {
    let client = Client::new();
    let author = create_author(&client, &unique("Expand")).await;
    let g1 = create_genre(&client, &unique("Genre-A")).await;
    let g2 = create_genre(&client, &unique("Genre-B")).await;
    let author_id = author["id"].as_i64().unwrap();
    // Attach in reverse creation order; expansion must follow it.
    let genre_ids = [g2["id"].as_i64().unwrap(), g1["id"].as_i64().unwrap()];
    let book = create_book(&client, author_id, &genre_ids).await;
    let book_id = book["id"].as_i64().unwrap();

    let details: Value = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to get book")
        .json()
        .await
        .expect("Failed to parse details");

    assert_eq!(details["author"]["id"], details["book"]["author_id"]);
    let expanded: Vec<i64> = details["genres"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["id"].as_i64().unwrap())
        .collect();
    assert_eq!(expanded, genre_ids.to_vec());

    delete_ok(&client, "books", book_id).await;
    delete_ok(&client, "authors", author_id).await;
    for id in genre_ids {
        delete_ok(&client, "genres", id).await;
    }
}

#[tokio::test]
#[ignore]
async fn test_duplicate_genre_resolves_to_existing() {
    let client = Client::new();
    let name = unique("Fantasy");
    let first = create_genre(&client, &name).await;

    let before: Value = client
        .get(format!("{}/summary", BASE_URL))
        .send()
        .await
        .expect("Failed to get summary")
        .json()
        .await
        .expect("Failed to parse summary");

    let response = client
        .post(format!("{}/genres", BASE_URL))
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to send request");

    // Resolved to the existing genre, not created
    assert_eq!(response.status(), 200);
    let second: Value = response.json().await.expect("Failed to parse genre");
    assert_eq!(second["id"], first["id"]);

    let after: Value = client
        .get(format!("{}/summary", BASE_URL))
        .send()
        .await
        .expect("Failed to get summary")
        .json()
        .await
        .expect("Failed to parse summary");
    assert_eq!(after["genre_count"], before["genre_count"]);

    delete_ok(&client, "genres", first["id"].as_i64().unwrap()).await;
}

#[tokio::test]
#[ignore]
async fn test_genre_update_to_existing_name_returns_canonical() {
    let client = Client::new();
    let name_a = unique("Keep");
    let name_b = unique("Rename");
    let keep = create_genre(&client, &name_a).await;
    let rename = create_genre(&client, &name_b).await;
    let rename_id = rename["id"].as_i64().unwrap();

    let response = client
        .put(format!("{}/genres/{}", BASE_URL, rename_id))
        .json(&json!({ "name": name_a }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let canonical: Value = response.json().await.expect("Failed to parse genre");
    assert_eq!(canonical["id"], keep["id"]);

    // The write was discarded: the renamed genre keeps its own name.
    let unchanged: Value = client
        .get(format!("{}/genres/{}", BASE_URL, rename_id))
        .send()
        .await
        .expect("Failed to get genre")
        .json()
        .await
        .expect("Failed to parse details");
    assert_eq!(unchanged["genre"]["name"], json!(name_b));

    delete_ok(&client, "genres", keep["id"].as_i64().unwrap()).await;
    delete_ok(&client, "genres", rename_id).await;
}

#[tokio::test]
#[ignore]
async fn test_author_delete_blocked_by_books() {
    let client = Client::new();
    let author = create_author(&client, &unique("Blocked")).await;
    let author_id = author["id"].as_i64().unwrap();
    let book = create_book(&client, author_id, &[]).await;
    let book_id = book["id"].as_i64().unwrap();

    let response = client
        .delete(format!("{}/authors/{}", BASE_URL, author_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["outcome"], "blocked");
    let dependents = body["dependents"].as_array().unwrap();
    assert_eq!(dependents.len(), 1);
    assert_eq!(dependents[0]["id"], json!(book_id));

    // Removing the dependent unblocks the delete.
    delete_ok(&client, "books", book_id).await;
    delete_ok(&client, "authors", author_id).await;

    let response = client
        .get(format!("{}/authors/{}", BASE_URL, author_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_book_delete_blocked_by_copies_then_succeeds() {
    let client = Client::new();
    let author = create_author(&client, &unique("Copies")).await;
    let author_id = author["id"].as_i64().unwrap();
    let book = create_book(&client, author_id, &[]).await;
    let book_id = book["id"].as_i64().unwrap();
    let copy = create_copy(&client, book_id, json!({})).await;

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["dependents"][0]["id"], copy["id"]);

    delete_ok(&client, "copies", copy["id"].as_i64().unwrap()).await;
    delete_ok(&client, "books", book_id).await;

    // Deleted books are no longer retrievable.
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    delete_ok(&client, "authors", author_id).await;
}

#[tokio::test]
#[ignore]
async fn test_copy_defaults() {
    let client = Client::new();
    let author = create_author(&client, &unique("Defaults")).await;
    let author_id = author["id"].as_i64().unwrap();
    let book = create_book(&client, author_id, &[]).await;
    let book_id = book["id"].as_i64().unwrap();

    // No status, no due_back.
    let copy = create_copy(&client, book_id, json!({})).await;

    // Maintenance = 1; due_back equals the creation timestamp.
    assert_eq!(copy["status"], 1);
    assert_eq!(copy["due_back"], copy["created_at"]);

    delete_ok(&client, "copies", copy["id"].as_i64().unwrap()).await;
    delete_ok(&client, "books", book_id).await;
    delete_ok(&client, "authors", author_id).await;
}

#[tokio::test]
#[ignore]
async fn test_update_is_full_replace() {
    let client = Client::new();
    let author = create_author(&client, &unique("Replace")).await;
    let author_id = author["id"].as_i64().unwrap();

    // Omit the optional dates entirely: full replace clears them.
    let response = client
        .put(format!("{}/authors/{}", BASE_URL, author_id))
        .json(&json!({
            "first_name": "Updated",
            "family_name": author["family_name"]
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let fetched: Value = client
        .get(format!("{}/authors/{}", BASE_URL, author_id))
        .send()
        .await
        .expect("Failed to get author")
        .json()
        .await
        .expect("Failed to parse details");

    assert_eq!(fetched["author"]["first_name"], "Updated");
    assert_eq!(fetched["author"]["date_of_birth"], Value::Null);

    delete_ok(&client, "authors", author_id).await;
}

#[tokio::test]
#[ignore]
async fn test_book_update_replaces_genres() {
    let client = Client::new();
    let author = create_author(&client, &unique("Genres")).await;
    let author_id = author["id"].as_i64().unwrap();
    let g1 = create_genre(&client, &unique("Old")).await;
    let g2 = create_genre(&client, &unique("New")).await;
    let g1_id = g1["id"].as_i64().unwrap();
    let g2_id = g2["id"].as_i64().unwrap();
    let book = create_book(&client, author_id, &[g1_id]).await;
    let book_id = book["id"].as_i64().unwrap();

    let response = client
        .put(format!("{}/books/{}", BASE_URL, book_id))
        .json(&json!({
            "title": book["title"],
            "author_id": author_id,
            "summary": book["summary"],
            "isbn": book["isbn"],
            "genre_ids": [g2_id]
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let details: Value = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to get book")
        .json()
        .await
        .expect("Failed to parse details");
    assert_eq!(details["genre_ids"], json!([g2_id]));

    delete_ok(&client, "books", book_id).await;
    delete_ok(&client, "authors", author_id).await;
    delete_ok(&client, "genres", g1_id).await;
    delete_ok(&client, "genres", g2_id).await;
}

#[tokio::test]
#[ignore]
async fn test_copy_update_round_trip() {
    let client = Client::new();
    let author = create_author(&client, &unique("CopyEdit")).await;
    let author_id = author["id"].as_i64().unwrap();
    let book = create_book(&client, author_id, &[]).await;
    let book_id = book["id"].as_i64().unwrap();
    let copy = create_copy(&client, book_id, json!({})).await;
    let copy_id = copy["id"].as_i64().unwrap();

    let response = client
        .put(format!("{}/copies/{}", BASE_URL, copy_id))
        .json(&json!({
            "book_id": book_id,
            "imprint": "Second Printing, 2025",
            "status": "Loaned",
            "due_back": "2025-12-01T00:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let fetched: Value = client
        .get(format!("{}/copies/{}", BASE_URL, copy_id))
        .send()
        .await
        .expect("Failed to get copy")
        .json()
        .await
        .expect("Failed to parse details");

    assert_eq!(fetched["copy"]["imprint"], "Second Printing, 2025");
    // Loaned = 2
    assert_eq!(fetched["copy"]["status"], 2);
    assert_eq!(fetched["copy"]["due_back"], "2025-12-01T00:00:00Z");
    assert_eq!(fetched["book"]["id"], json!(book_id));

    delete_ok(&client, "copies", copy_id).await;
    delete_ok(&client, "books", book_id).await;
    delete_ok(&client, "authors", author_id).await;
}

#[tokio::test]
#[ignore]
async fn test_genre_rename_round_trip() {
    let client = Client::new();
    let genre = create_genre(&client, &unique("Before")).await;
    let genre_id = genre["id"].as_i64().unwrap();
    let renamed = unique("After");

    let response = client
        .put(format!("{}/genres/{}", BASE_URL, genre_id))
        .json(&json!({ "name": renamed }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let updated: Value = response.json().await.expect("Failed to parse genre");
    assert_eq!(updated["id"], json!(genre_id));
    assert_eq!(updated["name"], json!(renamed));

    let fetched: Value = client
        .get(format!("{}/genres/{}", BASE_URL, genre_id))
        .send()
        .await
        .expect("Failed to get genre")
        .json()
        .await
        .expect("Failed to parse details");
    assert_eq!(fetched["genre"]["name"], json!(renamed));

    delete_ok(&client, "genres", genre_id).await;
}

#[tokio::test]
#[ignore]
async fn test_summary_counts() {
    let client = Client::new();

    let before: Value = client
        .get(format!("{}/summary", BASE_URL))
        .send()
        .await
        .expect("Failed to get summary")
        .json()
        .await
        .expect("Failed to parse summary");

    // 2 authors, 4 genres, 3 books, 5 copies of which 2 Available.
    let a1 = create_author(&client, &unique("Summary-A")).await;
    let a2 = create_author(&client, &unique("Summary-B")).await;
    let a1_id = a1["id"].as_i64().unwrap();
    let a2_id = a2["id"].as_i64().unwrap();

    let mut genre_ids = Vec::new();
    for i in 0..4 {
        let genre = create_genre(&client, &unique(&format!("Summary-G{}", i))).await;
        genre_ids.push(genre["id"].as_i64().unwrap());
    }

    let mut book_ids = Vec::new();
    for author_id in [a1_id, a2_id, a1_id] {
        let book = create_book(&client, author_id, &[]).await;
        book_ids.push(book["id"].as_i64().unwrap());
    }

    let mut copy_ids = Vec::new();
    for (i, status) in ["Available", "Available", "Loaned", "Maintenance", "Reserved"]
        .iter()
        .enumerate()
    {
        let copy = create_copy(
            &client,
            book_ids[i % book_ids.len()],
            json!({ "status": status }),
        )
        .await;
        copy_ids.push(copy["id"].as_i64().unwrap());
    }

    let after: Value = client
        .get(format!("{}/summary", BASE_URL))
        .send()
        .await
        .expect("Failed to get summary")
        .json()
        .await
        .expect("Failed to parse summary");

    let delta = |field: &str| after[field].as_i64().unwrap() - before[field].as_i64().unwrap();
    assert_eq!(delta("book_count"), 3);
    assert_eq!(delta("book_copy_count"), 5);
    assert_eq!(delta("available_book_copy_count"), 2);
    assert_eq!(delta("author_count"), 2);
    assert_eq!(delta("genre_count"), 4);

    for id in copy_ids {
        delete_ok(&client, "copies", id).await;
    }
    for id in book_ids {
        delete_ok(&client, "books", id).await;
    }
    delete_ok(&client, "authors", a1_id).await;
    delete_ok(&client, "authors", a2_id).await;
    for id in genre_ids {
        delete_ok(&client, "genres", id).await;
    }
}

#[tokio::test]
#[ignore]
async fn test_authors_listed_by_family_name() {
    let client = Client::new();

    let response = client
        .get(format!("{}/authors", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let authors: Vec<Value> = response.json().await.expect("Failed to parse authors");
    let names: Vec<String> = authors
        .iter()
        .map(|a| a["family_name"].as_str().unwrap().to_string())
        .collect();
    // Byte-order collation: the list equals its own byte-wise sort.
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[tokio::test]
#[ignore]
async fn test_book_edit_form_marks_attached_genres() {
    let client = Client::new();
    let author = create_author(&client, &unique("Form")).await;
    let author_id = author["id"].as_i64().unwrap();
    let attached = create_genre(&client, &unique("Attached")).await;
    let detached = create_genre(&client, &unique("Detached")).await;
    let attached_id = attached["id"].as_i64().unwrap();
    let detached_id = detached["id"].as_i64().unwrap();
    let book = create_book(&client, author_id, &[attached_id]).await;
    let book_id = book["id"].as_i64().unwrap();

    let context: Value = client
        .get(format!("{}/books/{}/form", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to get form context")
        .json()
        .await
        .expect("Failed to parse context");

    let checked_for = |id: i64| {
        context["genres"]
            .as_array()
            .unwrap()
            .iter()
            .find(|option| option["genre"]["id"] == json!(id))
            .map(|option| option["checked"].as_bool().unwrap())
    };
    assert_eq!(checked_for(attached_id), Some(true));
    assert_eq!(checked_for(detached_id), Some(false));

    delete_ok(&client, "books", book_id).await;
    delete_ok(&client, "authors", author_id).await;
    delete_ok(&client, "genres", attached_id).await;
    delete_ok(&client, "genres", detached_id).await;
}
