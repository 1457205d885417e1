//! HTTP tests for the REST API: routes, bodies and status mapping.

use actix_web::{
    body,
    http::{header::ContentType, StatusCode},
    test,
    web::Data,
    App,
};
use chess_tournament_manager::{
    web,
    web::{error_response, TournamentDetails},
    InvariantViolation, TournamentError, TournamentManager,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

fn start_date() -> String {
    (Utc::now().date_naive() + Duration::days(10)).to_string()
}

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(Data::new(TournamentManager::default()))
                .configure(web::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn health_reports_ok() {
    let app = app!();
    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["ok"], true);
}

#[actix_web::test]
async fn tournament_flow_over_http() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/tournaments")
        .set_json(json!({
            "name": "City Open",
            "description": "Rapid",
            "startDate": start_date(),
            "type": "ROUND_ROBIN"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let id: Uuid = test::read_body_json(resp).await;
    let base = format!("/api/tournaments/{id}");

    for (name, rating) in [("Alice", 1900), ("Bob", 1850), ("Carol", 1700)] {
        let req = test::TestRequest::post()
            .uri(&format!("{base}/players"))
            .set_json(json!({ "playerName": name, "rating": rating }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri(&format!("{base}/players"))
        .to_request();
    let players: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(players.as_array().unwrap().len(), 3);
    assert_eq!(players[0]["name"], "Alice");
    assert!(players[0]["registeredAt"].is_string());

    let req = test::TestRequest::post()
        .uri(&format!("{base}/start"))
        .to_request();
    let details: TournamentDetails = test::call_and_read_body_json(&app, req).await;
    assert_eq!(details.id, id);
    assert_eq!(details.registered_players, 3);
    assert_eq!(details.current_round, 1);
    assert_eq!(details.total_rounds, 3);

    let req = test::TestRequest::get()
        .uri(&format!("{base}/pairings"))
        .to_request();
    let pairings: Value = test::call_and_read_body_json(&app, req).await;
    let pairings = pairings.as_array().unwrap();
    assert_eq!(pairings.len(), 2);
    assert!(pairings[0]["blackPlayer"].is_null());
    assert_eq!(pairings[1]["whitePlayerName"], "Alice");
    assert_eq!(pairings[1]["blackPlayerName"], "Bob");

    let req = test::TestRequest::get()
        .uri(&format!("{base}/pairings?round=2"))
        .to_request();
    let later: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(later, json!([]));

    let req = test::TestRequest::put()
        .uri(&format!("{base}/rounds/1/pairings/1/result"))
        .set_json(json!({ "result": "WHITE_WIN" }))
        .to_request();
    let round: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(round["number"], 1);
    assert_eq!(round["complete"], true);
    assert_eq!(round["pairings"][1]["result"], "WHITE_WIN");

    let req = test::TestRequest::put()
        .uri(&format!("{base}/rounds/1/pairings/1/result"))
        .set_json(json!({ "result": "DRAW" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let err: Value = test::read_body_json(resp).await;
    assert_eq!(err["code"], "ALREADY_RECORDED");

    let req = test::TestRequest::get()
        .uri(&format!("{base}/rounds"))
        .to_request();
    let rounds: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(rounds.as_array().unwrap().len(), 2);

    let req = test::TestRequest::get()
        .uri(&format!("{base}/standings"))
        .to_request();
    let standings: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(standings["type"], "ROUND_ROBIN");
    let entries = standings["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["score"], 1.0);

    let req = test::TestRequest::post()
        .uri(&format!("{base}/cancel"))
        .to_request();
    let details: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(details["status"], "CANCELLED");

    let req = test::TestRequest::get().uri("/api/tournaments").to_request();
    let all: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
    assert_eq!(all[0]["type"], "ROUND_ROBIN");
}

#[actix_web::test]
async fn errors_map_to_status_codes() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/tournaments")
        .set_json(json!({ "name": "Old", "startDate": "2000-01-01", "type": "ROUND_ROBIN" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: Value = test::read_body_json(resp).await;
    assert_eq!(err["code"], "VALIDATION_ERROR");
    assert_eq!(err["status"], 400);

    let req = test::TestRequest::post()
        .uri("/api/tournaments")
        .set_json(json!({ "name": "Cup", "startDate": start_date(), "type": "SINGLE_ELIMINATION" }))
        .to_request();
    let id: Uuid = test::call_and_read_body_json(&app, req).await;
    let base = format!("/api/tournaments/{id}");

    let register = |name: &str, rating: i64| {
        test::TestRequest::post()
            .uri(&format!("{base}/players"))
            .set_json(json!({ "playerName": name, "rating": rating }))
            .to_request()
    };
    let resp = test::call_service(&app, register("Dana", 2000)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let resp = test::call_service(&app, register("DANA", 2100)).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let resp = test::call_service(&app, register("Eve", 0)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri(&format!("{base}/start"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let err: Value = test::read_body_json(resp).await;
    assert_eq!(err["code"], "INSUFFICIENT_PLAYERS");

    let req = test::TestRequest::get()
        .uri(&format!("/api/tournaments/{}", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let err: Value = test::read_body_json(resp).await;
    assert_eq!(err["code"], "TOURNAMENT_NOT_FOUND");

    let req = test::TestRequest::put()
        .uri(&format!("{base}/rounds/1/pairings/0/result"))
        .set_json(json!({ "result": "WHITE_WIN" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let err: Value = test::read_body_json(resp).await;
    assert_eq!(err["code"], "INVALID_STATE");
}

#[actix_web::test]
async fn malformed_json_gets_the_error_shape() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/tournaments")
        .insert_header(ContentType::json())
        .set_payload("{\"name\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: Value = test::read_body_json(resp).await;
    assert_eq!(err["code"], "VALIDATION_ERROR");
    assert_eq!(err["status"], 400);
}

#[actix_web::test]
async fn malformed_ids_and_queries_get_the_error_shape() {
    let app = app!();
    let req = test::TestRequest::get()
        .uri("/api/tournaments/not-a-uuid")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: Value = test::read_body_json(resp).await;
    assert_eq!(err["code"], "VALIDATION_ERROR");
    assert_eq!(err["status"], 400);

    let req = test::TestRequest::post()
        .uri("/api/tournaments")
        .set_json(json!({ "name": "Blitz", "startDate": start_date(), "type": "ROUND_ROBIN" }))
        .to_request();
    let id: Uuid = test::call_and_read_body_json(&app, req).await;
    let req = test::TestRequest::get()
        .uri(&format!("/api/tournaments/{id}/pairings?round=abc"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: Value = test::read_body_json(resp).await;
    assert_eq!(err["code"], "VALIDATION_ERROR");

    let req = test::TestRequest::put()
        .uri(&format!("/api/tournaments/{id}/rounds/one/pairings/0/result"))
        .set_json(json!({ "result": "DRAW" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: Value = test::read_body_json(resp).await;
    assert_eq!(err["code"], "VALIDATION_ERROR");
}

#[actix_web::test]
async fn defects_map_to_500_without_details() {
    let player = Uuid::new_v4();
    let defect = TournamentError::from(InvariantViolation::RepeatedBye(player));
    let resp = error_response(&defect);
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = body::to_bytes(resp.into_body()).await.unwrap();
    let err: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(err["code"], "INTERNAL_ERROR");
    assert_eq!(err["status"], 500);
    let message = err["message"].as_str().unwrap();
    assert!(!message.contains(&player.to_string()));
    assert!(!message.contains("bye"));
}

#[actix_web::test]
async fn engine_errors_keep_their_message() {
    let resp = error_response(&TournamentError::NotReady(2));
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let bytes = body::to_bytes(resp.into_body()).await.unwrap();
    let err: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(err["code"], "NOT_READY");
    assert_eq!(err["message"], "round 2 is not complete yet");

    let resp = error_response(&TournamentError::Timeout);
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}
