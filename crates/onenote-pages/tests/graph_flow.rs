use onenote_pages::auth::StaticToken;
use onenote_pages::config::GraphSettings;
use onenote_pages::dates::{consecutive_days, parse_start_date};
use onenote_pages::{OneNoteClient, PageCreationResult, PageError, PageOutcome};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-token";

async fn client_for(server: &MockServer) -> OneNoteClient {
    OneNoteClient::authenticate(&GraphSettings::new(server.uri()), &StaticToken::new(TOKEN))
        .await
        .expect("static token should authenticate")
}

async fn mount_notebooks(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/me/onenote/notebooks"))
        .and(query_param("$select", "id,displayName"))
        .and(header("Authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [
                { "id": "abc", "displayName": "Work" },
                { "id": "def", "displayName": "Journal" }
            ]
        })))
        .mount(server)
        .await;
}

async fn mount_page(server: &MockServer, section_id: &str, title: &str, status: u16) {
    let response = if status == 201 {
        ResponseTemplate::new(201).set_body_json(json!({ "id": format!("page-{}", title) }))
    } else {
        ResponseTemplate::new(status).set_body_json(json!({
            "error": { "code": "20102", "message": "The specified resource ID does not exist." }
        }))
    };

    Mock::given(method("POST"))
        .and(path(format!("/me/onenote/sections/{}/pages", section_id)))
        .and(header("Content-Type", "application/xhtml+xml"))
        .and(body_string_contains(format!("<title>{}</title>", title)))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_empty_token_fails_authentication() {
    let server = MockServer::start().await;
    let result =
        OneNoteClient::authenticate(&GraphSettings::new(server.uri()), &StaticToken::new("")).await;

    assert!(matches!(result, Err(PageError::AuthenticationFailed(_))));
}

#[tokio::test]
async fn test_list_notebooks() {
    let server = MockServer::start().await;
    mount_notebooks(&server).await;

    let notebooks = client_for(&server).await.list_notebooks().await.unwrap();
    let names: Vec<&str> = notebooks.iter().map(|n| n.display_name.as_str()).collect();
    assert_eq!(names, vec!["Work", "Journal"]);
}

#[tokio::test]
async fn test_find_notebook_id() {
    let server = MockServer::start().await;
    mount_notebooks(&server).await;
    let client = client_for(&server).await;

    assert_eq!(client.find_notebook_id("Work").await.unwrap(), "abc");

    let missing = client.find_notebook_id("Personal").await.unwrap_err();
    assert!(missing.is_not_found());
}

#[tokio::test]
async fn test_list_notebooks_follows_next_link() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/onenote/notebooks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{ "id": "abc", "displayName": "Work" }],
            "@odata.nextLink": format!("{}/page2", server.uri())
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{ "id": "xyz", "displayName": "Archive" }]
        })))
        .mount(&server)
        .await;

    let notebooks = client_for(&server).await.list_notebooks().await.unwrap();
    let ids: Vec<&str> = notebooks.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["abc", "xyz"]);
}

#[tokio::test]
async fn test_find_section_id_by_names() {
    let server = MockServer::start().await;
    mount_notebooks(&server).await;

    Mock::given(method("GET"))
        .and(path("/me/onenote/notebooks/def/sections"))
        .and(query_param("$select", "id,displayName"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [
                { "id": "sec-1", "displayName": "Daily" },
                { "id": "sec-2", "displayName": "Daily" }
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert_eq!(
        client.find_section_id("Journal", "Daily").await.unwrap(),
        "sec-1"
    );

    let err = client.find_section_id("Journal", "Weekly").await.unwrap_err();
    assert!(matches!(err, PageError::NotFound { kind: "section", .. }));

    let err = client.find_section_id("Nope", "Daily").await.unwrap_err();
    assert!(matches!(err, PageError::NotFound { kind: "notebook", .. }));
}

#[tokio::test]
async fn test_list_all_sections() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/onenote/sections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{ "id": "sec-1", "displayName": "Daily" }]
        })))
        .mount(&server)
        .await;

    let sections = client_for(&server).await.list_all_sections().await.unwrap();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].id, "sec-1");
}

#[tokio::test]
async fn test_lookup_surfaces_remote_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/onenote/notebooks"))
        .respond_with(ResponseTemplate::new(401).set_body_string("expired"))
        .mount(&server)
        .await;

    let err = client_for(&server).await.list_notebooks().await.unwrap_err();
    match err {
        PageError::RemoteRequestFailed { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "expired");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_create_pages_stops_at_first_failure() {
    let server = MockServer::start().await;
    mount_page(&server, "sec-1", "A", 201).await;
    mount_page(&server, "sec-1", "B", 400).await;

    Mock::given(method("POST"))
        .and(body_string_contains("<title>C</title>"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let results = client.create_pages("sec-1", &["A", "B", "C"]).await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0], PageCreationResult::created("A"));
    assert_eq!(results[1].title, "B");
    match &results[1].outcome {
        PageOutcome::Failed { status, body } => {
            assert_eq!(*status, Some(400));
            assert!(body.contains("20102"));
        }
        PageOutcome::Created => panic!("B should have failed"),
    }
}

#[tokio::test]
async fn test_create_page_requires_created_status() {
    let server = MockServer::start().await;
    mount_page(&server, "sec-1", "Only", 200).await;

    let err = client_for(&server)
        .await
        .create_page("sec-1", "Only")
        .await
        .unwrap_err();
    assert!(matches!(err, PageError::RemoteRequestFailed { status: 200, .. }));
}

#[tokio::test]
async fn test_dated_titles_end_to_end() {
    let server = MockServer::start().await;
    mount_page(&server, "sec-1", "2024-Apr-08 - Monday", 201).await;
    mount_page(&server, "sec-1", "2024-Apr-09 - Tuesday", 201).await;

    let titles = consecutive_days(parse_start_date("2024-Apr-08").unwrap(), 2).unwrap();
    assert_eq!(titles, vec!["2024-Apr-08 - Monday", "2024-Apr-09 - Tuesday"]);

    let results = client_for(&server).await.create_pages("sec-1", titles.as_slice()).await;

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(PageCreationResult::is_created));
}
