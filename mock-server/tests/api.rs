use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Player};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

// --- list ---

#[tokio::test]
async fn list_players_empty() {
    let resp = app()
        .oneshot(empty_request("GET", "/api/demo/players"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["success"], true);
    assert!(body["error"].is_null());
    assert_eq!(body["data"]["players"], serde_json::json!([]));
}

// --- create ---

#[tokio::test]
async fn create_player_returns_new_player() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/demo/players",
            r#"{"name":"Fido","age":3,"breed":"Lab"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    let player: Player = serde_json::from_value(body["data"]["newPlayer"].clone()).unwrap();
    assert_eq!(player.id, 1);
    assert_eq!(player.name, "Fido");
    assert_eq!(player.age, 3);
    assert_eq!(player.status, "bench");
}

#[tokio::test]
async fn create_player_null_age_returns_400_envelope() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/demo/players",
            r#"{"name":"Fido","age":null,"breed":"Lab"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["name"], "ValidationError");
}

#[tokio::test]
async fn create_player_negative_age_returns_400() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/demo/players",
            r#"{"name":"Fido","age":-1,"breed":"Lab"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_player_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/api/demo/players", r#"{"age":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get ---

#[tokio::test]
async fn get_player_not_found() {
    let resp = app()
        .oneshot(empty_request("GET", "/api/demo/players/41"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn get_player_bad_id_returns_400() {
    let resp = app()
        .oneshot(empty_request("GET", "/api/demo/players/not-a-number"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- delete ---

#[tokio::test]
async fn delete_player_not_found() {
    let resp = app()
        .oneshot(empty_request("DELETE", "/api/demo/players/41"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full lifecycle ---

#[tokio::test]
async fn roster_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create two players in one cohort
    for body in [
        r#"{"name":"Rex","age":2,"breed":"Hound"}"#,
        r#"{"name":"Bella","age":5,"breed":"Poodle","status":"field"}"#,
    ] {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(json_request("POST", "/api/demo/players", body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    // list, ordered by id
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/api/demo/players"))
        .await
        .unwrap();
    let body = body_json(resp).await;
    let players: Vec<Player> = serde_json::from_value(body["data"]["players"].clone()).unwrap();
    let names: Vec<_> = players.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Rex", "Bella"]);
    assert_eq!(players[1].status, "field");

    // other cohorts see nothing
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/api/other/players"))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["data"]["players"], serde_json::json!([]));

    // get one
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/api/demo/players/1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["player"]["name"], "Rex");

    // a player is not reachable through another cohort
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/api/other/players/1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", "/api/demo/players/1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["success"], true);
    assert!(body["data"].is_null());

    // delete again
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", "/api/demo/players/1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(!body_bytes(resp).await.is_empty());

    // list after delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/api/demo/players"))
        .await
        .unwrap();
    let body = body_json(resp).await;
    let players: Vec<Player> = serde_json::from_value(body["data"]["players"].clone()).unwrap();
    assert_eq!(players.len(), 1);
    assert_eq!(players[0].id, 2);
}
