// HTTP-level tests for the Battlesnake endpoints
//
// Runs the assembled Rocket instance through its local client, so routing,
// request decoding and response shape are covered without opening a socket.

mod common;

use common::{board_from_text, game_state};
use pursuit_snake::bot::Bot;
use pursuit_snake::config::Config;
use pursuit_snake::debug_logger::DebugLogger;
use pursuit_snake::handler;
use rocket::http::{ContentType, Status};
use rocket::local::asynchronous::Client;
use serde_json::Value;

async fn client() -> Client {
    let bot = Bot::new(Config::default_hardcoded(), DebugLogger::disabled());
    Client::tracked(handler::build(bot))
        .await
        .expect("valid rocket instance")
}

fn open_board_request(turn: i32) -> String {
    let board = board_from_text(
        r#"
        |  |  |  |  |  |  |  |
        |  |  |  |  |  |  |  |
        |  |  |  |  |  |F |  |
        |  |Y0|  |  |  |  |  |
        |  |Y1|  |  |  |  |  |
        |  |Y2|  |  |  |  |  |
        |  |  |  |  |  |  |  |
        "#,
    );
    serde_json::to_string(&game_state(turn, board)).unwrap()
}

#[rocket::async_test]
async fn test_index_reports_appearance() {
    let client = client().await;
    let response = client.get("/").dispatch().await;

    assert_eq!(response.status(), Status::Ok);
    let server = response.headers().get_one("Server").map(str::to_string);
    let body: Value = response.into_json().await.unwrap();

    assert_eq!(body["apiversion"], "1");
    assert_eq!(body["color"], "#00FF00");
    assert_eq!(body["head"], "default");
    assert_eq!(body["tail"], "default");
    assert_eq!(server.as_deref(), Some("battlesnake/github/pursuit-snake"));
}

#[rocket::async_test]
async fn test_start_and_end_acknowledge() {
    let client = client().await;

    for path in ["/start", "/end"] {
        let response = client
            .post(path)
            .header(ContentType::JSON)
            .body(open_board_request(0))
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok, "{}", path);
    }
}

#[rocket::async_test]
async fn test_move_returns_direction_and_shout() {
    let client = client().await;
    let response = client
        .post("/move")
        .header(ContentType::JSON)
        .body(open_board_request(5))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().await.unwrap();
    let chosen = body["move"].as_str().unwrap();
    assert!(["up", "down", "left", "right"].contains(&chosen));
    assert_ne!(chosen, "down", "down is our own neck");
    assert_eq!(body["shout"], "forage via planner");
}

#[rocket::async_test]
async fn test_malformed_move_gets_default_and_parse_shout() {
    let client = client().await;
    let response = client
        .post("/move")
        .header(ContentType::JSON)
        .body("{\"turn\": \"not a number\"")
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["move"], "up");
    assert_eq!(body["shout"], "can't parse this!");
}

#[rocket::async_test]
async fn test_move_with_invalid_board_gets_fallback() {
    let client = client().await;
    let mut state: Value = serde_json::from_str(&open_board_request(2)).unwrap();
    state["board"]["width"] = Value::from(0);

    let response = client
        .post("/move")
        .header(ContentType::JSON)
        .body(state.to_string())
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["move"], "up");
    assert_eq!(body["shout"], "can't parse this!");
}

#[rocket::async_test]
async fn test_move_with_oversized_board_gets_fallback() {
    let client = client().await;
    let mut state: Value = serde_json::from_str(&open_board_request(2)).unwrap();
    state["board"]["width"] = Value::from(100_000);
    state["board"]["height"] = Value::from(100_000);

    let response = client
        .post("/move")
        .header(ContentType::JSON)
        .body(state.to_string())
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["move"], "up");
    assert_eq!(body["shout"], "can't parse this!");
}
