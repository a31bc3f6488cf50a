//! Request tests for collections: filters, pagination and lazy iteration.

use enginn::{EnginnClient, ErrorKind, Project, Resource, ResourceIndex};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn project(server: &MockServer) -> Resource<Project> {
    EnginnClient::new("test-token", &server.uri())
        .unwrap()
        .project("abc")
}

fn page(current: u32, last: u32, names: &[&str]) -> serde_json::Value {
    let result: Vec<_> = names.iter().map(|n| json!({ "name": n })).collect();
    json!({
        "result": result,
        "pagination": { "current": current, "per": 1, "last": last, "count": last }
    })
}

#[tokio::test]
async fn test_filters_merge_without_touching_the_original() {
    let server = MockServer::start().await;
    let characters = project(&server).characters();

    let a = characters.filter([("a", 1)]);
    let ab = a.filter([("b", 2)]);

    assert_eq!(serde_json::to_value(ab.filters()).unwrap(), json!({ "a": 1, "b": 2 }));
    assert_eq!(serde_json::to_value(a.filters()).unwrap(), json!({ "a": 1 }));
    assert!(characters.filters().is_empty());
}

#[tokio::test]
async fn test_iteration_walks_pages_and_restarts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/abc/characters"))
        .and(query_param("per", "1"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(1, 2, &["Rocky"])))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/projects/abc/characters"))
        .and(query_param("per", "1"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(2, 2, &["Adrian"])))
        .expect(2)
        .mount(&server)
        .await;

    let mut characters = project(&server).characters().per(1);

    for _ in 0..2 {
        let mut names = Vec::new();
        let mut cursor = characters.iter();
        while let Some(character) = cursor.next().await {
            names.push(character.unwrap().name().map(str::to_string));
        }
        assert_eq!(names, [Some("Rocky".to_string()), Some("Adrian".to_string())]);
        assert_eq!(characters.pagination().current, 1);
    }
}

#[tokio::test]
async fn test_page_locked_fetches_exactly_one_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/abc/lines"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(2, 3, &["Yo Adrian!"])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/projects/abc/lines"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(3, 3, &["Nope"])))
        .expect(0)
        .mount(&server)
        .await;

    let mut lines = project(&server).lines().page(2);
    let all = lines.collect_all().await.unwrap();

    assert_eq!(all.len(), 1);
    assert_eq!(lines.pagination().current, 2);
    assert!(lines.is_page_locked());
}

#[tokio::test]
async fn test_page_locked_iteration_restarts_on_same_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/abc/scenes"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(2, 3, &["Training"])))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/projects/abc/scenes"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(3, 3, &["Nope"])))
        .expect(0)
        .mount(&server)
        .await;

    let mut scenes = project(&server).scenes().page(2);

    for _ in 0..2 {
        let all = scenes.collect_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name(), Some("Training"));
        assert_eq!(scenes.pagination().current, 2);
    }
}

#[tokio::test]
async fn test_filter_query_encoding() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/abc/takes"))
        .and(query_param("q[is_final_eq]", "true"))
        .and(query_param("q[line_id_in][]", "4"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [{ "id": 6, "line_id": 4, "is_final": true }],
            "pagination": { "current": 1, "per": 25, "last": 1, "count": 1 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut takes = project(&server)
        .takes()
        .filter([("is_final_eq", json!(true)), ("line_id_in", json!([4])), ("skip", json!(null))]);
    takes.fetch().await.unwrap();

    assert_eq!(takes.items().len(), 1);
    assert_eq!(takes.pagination().count, Some(1));
}

#[tokio::test]
async fn test_missing_pagination_is_a_single_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/abc/scenes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [{ "id": 1 }, { "id": 2 }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let scenes = project(&server).scenes().collect_all().await.unwrap();
    assert_eq!(scenes.len(), 2);
}

#[tokio::test]
async fn test_failed_page_is_yielded_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/abc/line_tags"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let mut tags = project(&server).line_tags();
    let mut cursor = tags.iter();

    let first = cursor.next().await.unwrap();
    assert_eq!(first.unwrap_err().kind(), Some(ErrorKind::ServerError));
    assert!(cursor.next().await.is_none());
}

#[tokio::test]
async fn test_fetch_quietly_records_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/abc/dictionary_entries"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let mut entries: ResourceIndex<_> = project(&server).dictionary_entries();
    assert!(!entries.fetch_quietly().await);
    assert_eq!(entries.errors().len(), 1);
    assert_eq!(entries.errors()[0].kind(), Some(ErrorKind::Forbidden));

    entries.clear_errors();
    assert!(entries.errors().is_empty());
}
