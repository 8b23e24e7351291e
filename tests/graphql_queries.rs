mod common;

use common::{ids, run, run_raw, seeded_schema};
use serde_json::json;

#[tokio::test]
async fn authors_default_to_first_ten_in_id_order() {
    let schema = seeded_schema().await;
    let data = run(&schema, "{ authors { id fullName name } }").await;
    assert_eq!(ids(&data["authors"]), ["1", "2", "3", "4"]);
    assert_eq!(data["authors"][0]["fullName"], "John Doe");
    assert_eq!(data["authors"][0]["name"], "John Doe");

    let data = run(&schema, "{ authors(limit: 2) { id } }").await;
    assert_eq!(ids(&data["authors"]), ["1", "2"]);

    let data = run(&schema, "{ authors(limit: 0) { id } }").await;
    assert_eq!(data["authors"], json!([]));
}

#[tokio::test]
async fn ages_use_the_injected_clock() {
    let schema = seeded_schema().await;
    let data = run(&schema, "{ authors { age birthDate } bookById(id: \"1\") { ageInYears publishedDate } }").await;
    let ages: Vec<i64> = data["authors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["age"].as_i64().unwrap())
        .collect();
    assert_eq!(ages, [55, 50, 44, 39]);
    assert_eq!(data["authors"][0]["birthDate"], "1970-01-01T00:00:00");
    assert_eq!(data["bookById"]["ageInYears"], 2);
    assert_eq!(data["bookById"]["publishedDate"], "2023-01-15T00:00:00");
}

#[tokio::test]
async fn lookups_by_id_return_null_when_missing() {
    let schema = seeded_schema().await;
    let data = run(
        &schema,
        r#"{ authorById(id: "99") { id } publisherById(id: "99") { id } bookById(id: "99") { id } }"#,
    )
    .await;
    assert_eq!(data, json!({ "authorById": null, "publisherById": null, "bookById": null }));
}

#[tokio::test]
async fn malformed_read_ids_are_field_errors() {
    let schema = seeded_schema().await;
    let response = run_raw(&schema, r#"{ authorById(id: "abc") { id } }"#).await;
    assert_eq!(response["data"]["authorById"], json!(null));
    assert_eq!(response["errors"][0]["message"], "Invalid id: abc");
    assert_eq!(response["errors"][0]["extensions"]["code"], "INVALID_ID");

    let response = run_raw(&schema, r#"{ booksByAuthor(authorId: "1x") { id } }"#).await;
    assert_eq!(response["errors"][0]["extensions"]["code"], "INVALID_ID");
}

#[tokio::test]
async fn book_relations_and_computed_fields() {
    let schema = seeded_schema().await;
    let data = run(
        &schema,
        r#"{ bookById(id: "4") {
            title price displayPrice genre rating tags
            author { id lastName }
            publisher { name }
        } }"#,
    )
    .await;
    let book = &data["bookById"];
    assert_eq!(book["title"], "GraphQL in Action");
    assert_eq!(book["price"], "54.99");
    assert_eq!(book["displayPrice"], "$54.99");
    assert_eq!(book["genre"], "TECHNOLOGY");
    assert_eq!(book["rating"], 4.7);
    assert_eq!(book["tags"], json!(["API", "GraphQL", "Modern"]));
    assert_eq!(book["author"], json!({ "id": "3", "lastName": "Johnson" }));
    assert_eq!(book["publisher"]["name"], "TechBooks Publishing");
}

#[tokio::test]
async fn publisher_book_count_and_books() {
    let schema = seeded_schema().await;
    let data = run(&schema, "{ publishers { id bookCount books { id } } }").await;
    let counts: Vec<i64> = data["publishers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["bookCount"].as_i64().unwrap())
        .collect();
    assert_eq!(counts, [2, 2, 0, 1]);
    assert_eq!(ids(&data["publishers"][1]["books"]), ["2", "3"]);
}

#[tokio::test]
async fn author_books_and_books_by_author_agree() {
    let schema = seeded_schema().await;
    let data = run(
        &schema,
        r#"{ authorById(id: "3") { books { id } } booksByAuthor(authorId: "3") { id } }"#,
    )
    .await;
    assert_eq!(ids(&data["authorById"]["books"]), ["1", "4"]);
    assert_eq!(ids(&data["booksByAuthor"]), ["1", "4"]);
}

#[tokio::test]
async fn filters_are_conjunctive() {
    let schema = seeded_schema().await;

    let data = run(&schema, "{ books(filter: { genre: TECHNOLOGY }) { id } }").await;
    assert_eq!(ids(&data["books"]), ["1", "4"]);

    let data = run(&schema, r#"{ books(filter: { minPrice: "25", maxPrice: "50" }) { id } }"#).await;
    assert_eq!(ids(&data["books"]), ["1", "5"]);

    let data = run(&schema, r#"{ books(filter: { minPrice: "19.99", maxPrice: "19.99" }) { id } }"#).await;
    assert_eq!(ids(&data["books"]), ["3"]);

    let data = run(&schema, r#"{ books(filter: { title: "the" }) { id } }"#).await;
    assert_eq!(ids(&data["books"]), ["2"]);

    let data = run(&schema, r#"{ books(filter: { publishedAfter: "2023-06-10T00:00:00" }) { id } }"#).await;
    assert_eq!(ids(&data["books"]), ["3", "4", "5"]);

    let data = run(
        &schema,
        r#"{ books(filter: { genre: TECHNOLOGY, publishedAfter: "2023-06-10T00:00:00" }) { id } }"#,
    )
    .await;
    assert_eq!(ids(&data["books"]), ["4"]);
}

#[tokio::test]
async fn pagination_is_by_page() {
    let schema = seeded_schema().await;

    let data = run(&schema, "{ books(limit: 2, offset: 3) { id } }").await;
    assert_eq!(ids(&data["books"]), ["3", "4"]);

    let data = run(&schema, "{ books(limit: 10, offset: 5) { id } }").await;
    assert_eq!(ids(&data["books"]), ["1", "2", "3", "4", "5"]);

    let data = run(&schema, "{ books(limit: 2, offset: 4) { id } }").await;
    assert_eq!(ids(&data["books"]), ["5"]);

    let data = run(&schema, "{ books(limit: -1) { id } }").await;
    assert_eq!(data["books"], json!([]));
}

#[tokio::test]
async fn all_books_ignores_the_default_limit() {
    let schema = seeded_schema().await;
    for i in 0..8 {
        let input = common::book_input("Extra", &format!("isbn-{}", i), "10", "1", "1");
        run(&schema, &format!("mutation {{ createBook(input: {}) {{ success }} }}", input)).await;
    }
    let data = run(&schema, "{ allBooks { id } books { id } }").await;
    assert_eq!(data["allBooks"].as_array().unwrap().len(), 13);
    assert_eq!(data["books"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn search_lists_books_then_authors_then_publishers() {
    let schema = seeded_schema().await;
    let query = r#"{ searchBooks(query: "john") {
        __typename
        ... on Book { id }
        ... on Author { id }
        ... on Publisher { id }
    } }"#;
    let data = run(&schema, query).await;
    let hits: Vec<(String, String)> = data["searchBooks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            (
                h["__typename"].as_str().unwrap().to_string(),
                h["id"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    let expected: Vec<(String, String)> = [
        ("Book", "1"),
        ("Book", "4"),
        ("Book", "5"),
        ("Author", "1"),
        ("Author", "3"),
    ]
    .iter()
    .map(|(t, id)| (t.to_string(), id.to_string()))
    .collect();
    assert_eq!(hits, expected);
}

#[tokio::test]
async fn search_matches_publishers_by_address() {
    let schema = seeded_schema().await;
    let data = run(
        &schema,
        r#"{ searchBooks(query: "BOSTON") { __typename ... on Publisher { name } } }"#,
    )
    .await;
    assert_eq!(
        data["searchBooks"],
        json!([{ "__typename": "Publisher", "name": "Academic Press" }])
    );
}

#[tokio::test]
async fn date_time_rejects_leap_seconds() {
    let schema = seeded_schema().await;
    let response = run_raw(
        &schema,
        r#"{ books(filter: { publishedAfter: "2023-01-15T10:30:60" }) { id } }"#,
    )
    .await;
    assert!(!response["errors"].as_array().unwrap().is_empty());

    let response = run_raw(
        &schema,
        r#"mutation { createAuthor(input: { firstName: "Leap", lastName: "Second", email: "leap@x.com", birthDate: "2023-01-15T23:59:60.5" }) { success } }"#,
    )
    .await;
    assert!(!response["errors"].as_array().unwrap().is_empty());
    let data = run(&schema, "{ authors(limit: 100) { id } }").await;
    assert_eq!(data["authors"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn date_time_rejects_zoned_input() {
    let schema = seeded_schema().await;
    let response = run_raw(
        &schema,
        r#"{ books(filter: { publishedAfter: "2023-06-10T00:00:00Z" }) { id } }"#,
    )
    .await;
    assert!(!response["errors"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn payload_errors_keep_the_error_detail_type_name() {
    let schema = seeded_schema().await;
    let data = run(&schema, r#"{ __type(name: "ErrorDetail") { fields { name } } }"#).await;
    let fields: Vec<&str> = data["__type"]["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(fields, ["field", "message", "code"]);
    assert!(!schema.sdl().contains("FieldError"));
}
