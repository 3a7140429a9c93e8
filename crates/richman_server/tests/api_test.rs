//! Integration tests driving the REST surface through the real router,
//! no network involved.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use richman_rules::Ruleset;
use richman_server::api::{AppState, build_router};
use richman_server::session::{DEFAULT_IDLE_TIMEOUT, SessionStore};
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
    let store = SessionStore::new(Ruleset::festival16(), DEFAULT_IDLE_TIMEOUT);
    build_router(AppState { store })
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn create_session(app: &Router) -> String {
    let (status, body) = post(app, "/api/create-session", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    body["sessionId"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_endpoint_responds() {
    let app = app();
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
}

#[tokio::test]
async fn full_turn_cycle_over_http() {
    let app = app();
    let id = create_session(&app).await;

    let (status, body) = post(
        &app,
        "/api/init-game",
        json!({"sessionId": id, "playerCount": 2}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["currentPlayer"], 0);
    assert_eq!(body["players"].as_array().unwrap().len(), 2);
    assert_eq!(body["players"][0]["position"], 0);
    assert_eq!(body["players"][0]["visitedCells"], json!([0]));

    // The roll is random; assert the movement invariant instead of a value.
    let (status, roll) = post(&app, "/api/roll-dice", json!({"sessionId": id})).await;
    assert_eq!(status, StatusCode::OK);
    let dice = roll["dice"].as_array().unwrap();
    assert_eq!(dice.len(), 1);
    let total = roll["total"].as_u64().unwrap();
    assert!((1..=6).contains(&total));
    assert_eq!(roll["playerId"], 0);
    assert_eq!(roll["oldPosition"], 0);
    assert_eq!(roll["newPosition"].as_u64().unwrap(), total % 16);

    // Build eligibility and the build endpoint must agree.
    let (status, body) = post(&app, "/api/build-house", json!({"sessionId": id})).await;
    if roll["canBuildHouse"] == json!(true) {
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["houseCount"], 1);
        assert_eq!(body["position"], roll["newPosition"]);
    } else {
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    let (status, body) = post(&app, "/api/clear-skip", json!({"sessionId": id})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["playerId"], 0);

    let (status, body) = post(&app, "/api/next-player", json!({"sessionId": id})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currentPlayer"], 1);
    assert_eq!(body["player"]["id"], 1);

    let (status, state) = get(&app, &format!("/api/game-state?sessionId={id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["boardSize"], 16);
    assert_eq!(state["isGameStarted"], true);
    assert_eq!(state["currentPlayerIndex"], 1);
    assert_eq!(state["players"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn rest_cell_reports_special_effect_over_http() {
    let app = app();
    let id = create_session(&app).await;
    post(
        &app,
        "/api/init-game",
        json!({"sessionId": id, "playerCount": 1}),
    )
    .await;

    // Roll until someone lands on a special cell; the festival board has
    // rest cells at 4 and 12 and roll-again at 8, all reachable.
    for _ in 0..200 {
        let (status, roll) = post(&app, "/api/roll-dice", json!({"sessionId": id})).await;
        assert_eq!(status, StatusCode::OK);
        match roll["newPosition"].as_u64().unwrap() {
            4 | 12 => {
                assert_eq!(roll["specialCell"], "rest");
                assert_eq!(roll["canBuildHouse"], false);
                return;
            }
            8 => assert_eq!(roll["specialCell"], "roll-again"),
            0 => assert_eq!(roll["canBuildHouse"], false),
            _ => assert!(roll["specialCell"].is_null()),
        }
        post(&app, "/api/next-player", json!({"sessionId": id})).await;
    }
    panic!("no rest cell hit in 200 rolls");
}

#[tokio::test]
async fn sessions_are_isolated() {
    let app = app();
    let a = create_session(&app).await;
    let b = create_session(&app).await;
    assert_ne!(a, b);

    post(&app, "/api/init-game", json!({"sessionId": a, "playerCount": 2})).await;
    post(&app, "/api/init-game", json!({"sessionId": b, "playerCount": 3})).await;
    post(&app, "/api/roll-dice", json!({"sessionId": a})).await;

    let (_, state_b) = get(&app, &format!("/api/game-state?sessionId={b}")).await;
    assert_eq!(state_b["players"].as_array().unwrap().len(), 3);
    assert!(
        state_b["players"]
            .as_array()
            .unwrap()
            .iter()
            .all(|p| p["position"] == 0)
    );
}

#[tokio::test]
async fn failure_contract() {
    let app = app();

    // Deleting an unknown session is a 404.
    let (status, body) = post(&app, "/api/delete-session", json!({"sessionId": "nope"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());

    // Every other invalid-session lookup is a 400.
    let (status, _) = post(&app, "/api/roll-dice", json!({"sessionId": "nope"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = get(&app, "/api/game-state?sessionId=nope").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let id = create_session(&app).await;

    // Rolling before init fails.
    let (status, body) = post(&app, "/api/roll-dice", json!({"sessionId": id})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "game has not been started");

    // Out-of-range player counts fail.
    let (status, _) = post(
        &app,
        "/api/init-game",
        json!({"sessionId": id, "playerCount": 7}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Deleted sessions are invalid afterwards.
    let (status, _) = post(&app, "/api/delete-session", json!({"sessionId": id})).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = get(&app, &format!("/api/game-state?sessionId={id}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn board_endpoint_describes_the_variant() {
    let app = app();
    let id = create_session(&app).await;

    let (status, board) = get(&app, &format!("/api/board?sessionId={id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(board["boardSize"], 16);
    assert_eq!(board["diceCount"], 1);

    let cells = board["cells"].as_array().unwrap();
    assert_eq!(cells.len(), 16);
    assert_eq!(cells[0]["effect"], "start");
    assert_eq!(cells[4]["effect"], "rest");
    assert_eq!(cells[8]["effect"], "roll-again");
    assert_eq!(cells[8]["label"], "Roll again");
}
