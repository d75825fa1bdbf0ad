//! Tests for request dispatch, response classification and availability probing.

mod support;

use serde_json::json;
use squares::api::{ApiError, Availability, RemoteMove};
use squares_board::{BoardState, Color, GameResult, GameStatus};
use std::time::Duration;
use support::{BASE_URL, Route, scripted_client};

fn opened_board() -> BoardState {
    let mut board = BoardState::create(3, Color::White).unwrap();
    board.place(0, 0, Color::White).unwrap();
    board.switch_turn();
    board
}

/// Paused time advances to timer deadlines, allowing for millisecond rounding.
fn assert_waited(elapsed: Duration, expected_ms: u64) {
    let expected = Duration::from_millis(expected_ms);
    assert!(
        elapsed >= expected && elapsed < expected + Duration::from_millis(5),
        "waited {elapsed:?}, expected {expected:?}"
    );
}

#[tokio::test]
async fn test_next_move_posts_board_to_ruleset_endpoint() {
    let (client, transport) = scripted_client();
    transport.reply(Route::NextMove, 200, json!({"x": 1, "y": 1, "color": "b"}));

    let mv = client.next_move(&opened_board()).await.unwrap();
    assert_eq!(mv, Some(RemoteMove::new(1, 1, Some(Color::Black))));

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, "POST");
    assert_eq!(calls[0].url, format!("{BASE_URL}/standard/nextMove"));
    assert_eq!(
        calls[0].body,
        Some(json!({"size": 3, "data": "w        ", "nextPlayerColor": "b"}))
    );
}

#[tokio::test]
async fn test_next_move_uses_explicit_ruleset() {
    let (client, transport) = scripted_client();
    let client = client.with_ruleset("tournament");
    transport.reply(Route::NextMove, 200, json!({"x": 2, "y": 0}));
    transport.reply(Route::NextMove, 200, json!({"x": 0, "y": 2}));

    let mv = client.next_move(&opened_board()).await.unwrap();
    assert_eq!(mv, Some(RemoteMove::new(2, 0, None)));
    client
        .request_next_move(&opened_board(), "casual")
        .await
        .unwrap();

    let urls: Vec<String> = transport.calls().into_iter().map(|c| c.url).collect();
    assert_eq!(
        urls,
        vec![
            format!("{BASE_URL}/tournament/nextMove"),
            format!("{BASE_URL}/casual/nextMove"),
        ]
    );
}

#[tokio::test]
async fn test_next_move_message_means_no_move() {
    let (client, transport) = scripted_client();
    transport.reply(Route::NextMove, 200, json!({"message": "No moves left"}));

    let mv = client.next_move(&opened_board()).await.unwrap();
    assert_eq!(mv, None);
}

#[tokio::test]
async fn test_next_move_without_coordinates_or_message_is_malformed() {
    let (client, transport) = scripted_client();
    transport.reply(Route::NextMove, 200, json!({"x": 1}));
    transport.reply(Route::NextMove, 200, json!({"x": "1", "y": "2"}));

    for _ in 0..2 {
        let err = client.next_move(&opened_board()).await.unwrap_err();
        assert!(
            matches!(err, ApiError::MalformedResponse { .. }),
            "unexpected error: {err:?}"
        );
    }
}

#[tokio::test]
async fn test_invalid_json_is_parse_error() {
    let (client, transport) = scripted_client();
    transport.push(
        Route::NextMove,
        Ok(squares::api::HttpResponse::new(200, "<html>oops</html>")),
    );

    let err = client.next_move(&opened_board()).await.unwrap_err();
    assert!(matches!(err, ApiError::Parse { .. }));
    assert!(err.to_string().starts_with("Failed to parse response"));
}

#[tokio::test]
async fn test_server_error_text_is_surfaced() {
    let (client, transport) = scripted_client();
    transport.reply(
        Route::NextMove,
        500,
        json!({"error": "Invalid board data"}),
    );

    let err = client.next_move(&opened_board()).await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid board data");
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_error_status_without_body_text() {
    let (client, transport) = scripted_client();
    transport.push(
        Route::Status,
        Ok(squares::api::HttpResponse::new(502, "")),
    );

    let err = client.request_status(&opened_board()).await.unwrap_err();
    assert_eq!(err.to_string(), "Request failed with status: 502");
}

#[tokio::test]
async fn test_network_error_has_no_status() {
    let (client, transport) = scripted_client();
    transport.fail(Route::NextMove, "connection refused");

    let err = client.next_move(&opened_board()).await.unwrap_err();
    assert_eq!(err.status(), None);
    assert_eq!(err.to_string(), "connection refused");
}

#[tokio::test]
async fn test_status_parsing() {
    let (client, transport) = scripted_client();
    transport.reply(Route::Status, 200, json!({"status": "in progress"}));
    transport.reply(Route::Status, 200, json!({"status": "finished", "result": "W wins"}));
    transport.reply(Route::Status, 200, json!({"status": "finished", "result": "Draw"}));

    let board = opened_board();
    assert_eq!(client.request_status(&board).await.unwrap(), GameStatus::InProgress);
    assert_eq!(
        client.request_status(&board).await.unwrap(),
        GameStatus::Finished(GameResult::Winner(Color::White))
    );
    assert_eq!(
        client.request_status(&board).await.unwrap(),
        GameStatus::Finished(GameResult::Draw)
    );

    let calls = transport.calls_to(Route::Status);
    assert_eq!(calls[0].url, format!("{BASE_URL}/status"));
    assert_eq!(calls[0].method, "POST");
}

#[tokio::test]
async fn test_status_without_status_field_is_malformed() {
    let (client, transport) = scripted_client();
    transport.reply(Route::Status, 200, json!({"result": "Draw"}));

    let err = client.request_status(&opened_board()).await.unwrap_err();
    assert!(matches!(err, ApiError::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_health_accepts_message_or_status() {
    let (client, transport) = scripted_client();
    transport.reply(Route::Health, 200, json!({"message": "OK"}));
    transport.reply(Route::Health, 200, json!({"status": "OK"}));
    transport.reply(Route::Health, 200, json!({"status": "degraded"}));

    assert!(client.check_health().await.unwrap());
    assert!(client.check_health().await.unwrap());
    assert!(!client.check_health().await.unwrap());

    let calls = transport.calls();
    assert!(calls.iter().all(|c| c.method == "GET"));
    assert_eq!(calls[0].url, format!("{BASE_URL}/health"));
}

#[tokio::test(start_paused = true)]
async fn test_availability_backs_off_linearly() {
    let (client, transport) = scripted_client();
    transport.fail(Route::Health, "connection refused");
    transport.fail(Route::Health, "connection refused");
    transport.reply(Route::Health, 200, json!({"message": "OK"}));

    let availability = client.check_availability(3).await;
    assert_eq!(availability, Availability::Available { retries: 2 });

    let calls = transport.calls_to(Route::Health);
    assert_eq!(calls.len(), 3);
    assert_waited(calls[1].at - calls[0].at, 1000);
    assert_waited(calls[2].at - calls[1].at, 2000);
}

#[tokio::test(start_paused = true)]
async fn test_availability_gives_up_with_last_error() {
    let (client, transport) = scripted_client();
    for _ in 0..4 {
        transport.fail(Route::Health, "connection refused");
    }

    let availability = client.check_availability(3).await;
    assert_eq!(
        availability,
        Availability::Unavailable {
            attempts: 4,
            message: "connection refused".to_string(),
        }
    );
    assert!(!availability.is_available());

    let calls = transport.calls_to(Route::Health);
    assert_eq!(calls.len(), 4);
    assert_waited(calls[3].at - calls[0].at, 6000);
}

#[tokio::test(start_paused = true)]
async fn test_availability_unhealthy_without_error_synthesizes_message() {
    let (client, transport) = scripted_client();
    for _ in 0..3 {
        transport.reply(Route::Health, 200, json!({"status": "starting"}));
    }

    let availability = client.check_availability(2).await;
    assert_eq!(
        availability,
        Availability::Unavailable {
            attempts: 3,
            message: "API is not available after 3 attempts".to_string(),
        }
    );
}

#[tokio::test]
async fn test_zero_retries_probes_once() {
    let (client, transport) = scripted_client();
    transport.fail(Route::Health, "connection refused");

    let availability = client.check_availability(0).await;
    assert!(matches!(availability, Availability::Unavailable { attempts: 1, .. }));
    assert_eq!(transport.calls().len(), 1);
}

#[test]
fn test_base_url_trailing_slash_is_trimmed() {
    let client = squares::ApiClient::new(
        "http://localhost:8080/api/",
        support::ScriptedTransport::new(),
    );
    assert_eq!(client.base_url(), "http://localhost:8080/api");
    assert_eq!(client.ruleset(), "standard");
}
