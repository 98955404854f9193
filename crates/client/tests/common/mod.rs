use std::collections::HashMap;

use axum::extract::{Multipart, Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::{json, Value};

/// Email and bitmap ID that the mock API reports as taken.
pub const TAKEN: &str = "taken@prodbybitmap.com";
pub const TAKEN_ID: &str = "taken_id";
pub const TOKEN: &str = "test-token";
/// Code the mock API accepts for email verification.
pub const EMAIL_CODE: &str = "428193";
/// Applicants listed by the mock admin endpoint: one pending, one approved.
pub const PENDING_APPLICANT: i64 = 5;
pub const APPROVED_APPLICANT: i64 = 9;

/// Bind `router` on an ephemeral port and return its base URL.
pub async fn spawn_mock_api(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A small in-memory stand-in for the storefront API.
pub fn mock_router() -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/signup", post(signup))
        .route("/auth/email/verify", post(verify_email))
        .route("/auth/email/check", get(check_email))
        .route("/bitmap-ids", post(register_bitmap_id))
        .route("/bitmap-ids/check", get(check_bitmap_id))
        .route("/membership", post(apply_membership).delete(leave_membership))
        .route("/admin/membership", get(membership_applications))
        .route("/admin/membership/{user_id}/{decision}", post(review_membership))
        .route("/games", get(list_games).post(submit_game))
        .route("/games/{id}", get(get_game))
        .route("/images", post(upload_image))
        .route("/eula", get(eula))
        .route("/notifications", get(notifications))
        .route("/notifications/{id}/read", patch(mark_read))
        .route("/videos", get(videos))
}

pub fn game_json(id: i64, title: &str, developer: &str) -> Value {
    json!({
        "gameId": id,
        "status": "approved",
        "gameTitle": title,
        "gameDeveloper": developer,
        "gameGenre": {"ko": "액션", "en": "Action"},
        "gameImageUrls": ["p.png", "b.png", "i.png"]
    })
}

fn reason(status: StatusCode, reason: &str) -> Response {
    (status, Json(json!({ "reason": reason }))).into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] == "correct-horse" {
        Json(json!({ "accessToken": TOKEN })).into_response()
    } else {
        reason(StatusCode::UNAUTHORIZED, "auth.invalid_credentials")
    }
}

async fn signup(Json(body): Json<Value>) -> Response {
    if body.get("agreedToTerms") != Some(&json!(true)) {
        return reason(StatusCode::BAD_REQUEST, "signup.terms_required");
    }
    if body["email"] == TAKEN {
        return reason(StatusCode::CONFLICT, "email.duplicated");
    }
    StatusCode::CREATED.into_response()
}

async fn verify_email(Json(body): Json<Value>) -> Response {
    if body["code"] == EMAIL_CODE && body["email"].is_string() {
        StatusCode::NO_CONTENT.into_response()
    } else {
        reason(StatusCode::BAD_REQUEST, "email.invalid_code")
    }
}

async fn check_email(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let email = params.get("email").map(String::as_str).unwrap_or_default();
    Json(json!({ "available": email != TAKEN }))
}

async fn check_bitmap_id(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let id = params.get("bitmapId").map(String::as_str).unwrap_or_default();
    Json(json!({ "available": id != TAKEN_ID }))
}

async fn register_bitmap_id(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !authorized(&headers) {
        return reason(StatusCode::UNAUTHORIZED, "auth.required");
    }
    match body.get("bitmapId").and_then(Value::as_str) {
        Some(TAKEN_ID) => reason(StatusCode::CONFLICT, "bitmap_id.duplicated"),
        Some(_) => StatusCode::CREATED.into_response(),
        None => reason(StatusCode::BAD_REQUEST, "request.invalid_body"),
    }
}

async fn apply_membership(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !authorized(&headers) {
        return reason(StatusCode::UNAUTHORIZED, "auth.required");
    }
    if !body["message"].is_string() {
        return reason(StatusCode::BAD_REQUEST, "request.invalid_body");
    }
    StatusCode::CREATED.into_response()
}

async fn leave_membership(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return reason(StatusCode::UNAUTHORIZED, "auth.required");
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn membership_applications(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return reason(StatusCode::UNAUTHORIZED, "auth.required");
    }
    Json(json!([
        { "userId": PENDING_APPLICANT, "username": "nine", "bitmapId": "studio_9",
          "message": "함께하고 싶어요", "status": "pending",
          "appliedAt": "2025-01-15T09:30:00Z" },
        { "userId": APPROVED_APPLICANT, "username": "solo", "status": "approved" }
    ]))
    .into_response()
}

async fn review_membership(
    headers: HeaderMap,
    Path((user_id, decision)): Path<(i64, String)>,
) -> Response {
    if !authorized(&headers) {
        return reason(StatusCode::UNAUTHORIZED, "auth.required");
    }
    if decision != "approve" && decision != "reject" {
        return StatusCode::NOT_FOUND.into_response();
    }
    match user_id {
        PENDING_APPLICANT => StatusCode::NO_CONTENT.into_response(),
        APPROVED_APPLICANT => reason(StatusCode::CONFLICT, "membership.not_pending"),
        _ => reason(StatusCode::NOT_FOUND, "membership.not_found"),
    }
}

async fn list_games(headers: HeaderMap) -> Response {
    if !headers.contains_key("x-request-id") {
        return reason(StatusCode::BAD_REQUEST, "request.missing_id");
    }
    Json(json!([
        game_json(1, "액션 히어로", "Studio Nine"),
        game_json(2, "Puzzle Garden", "오산 게임즈"),
    ]))
    .into_response()
}

async fn get_game(Path(id): Path<i64>) -> Response {
    match id {
        1 => Json(game_json(1, "액션 히어로", "Studio Nine")).into_response(),
        99 => (StatusCode::OK, "not json").into_response(),
        _ => reason(StatusCode::NOT_FOUND, "game.not_found"),
    }
}

async fn submit_game(headers: HeaderMap, Json(mut body): Json<Value>) -> Response {
    if !authorized(&headers) {
        return reason(StatusCode::UNAUTHORIZED, "auth.required");
    }
    body["gameId"] = json!(42);
    body["status"] = json!("pending");
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn upload_image(headers: HeaderMap, mut multipart: Multipart) -> Response {
    if !authorized(&headers) {
        return reason(StatusCode::UNAUTHORIZED, "auth.required");
    }
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field.bytes().await.unwrap_or_default();
            return Json(json!({
                "url": format!("https://cdn.test/{}/{}/{}", content_type, bytes.len(), file_name)
            }))
            .into_response();
        }
    }
    reason(StatusCode::BAD_REQUEST, "image.missing_file")
}

async fn eula() -> Json<Value> {
    Json(json!({ "ko": "이용약관", "en": "Terms of Service" }))
}

async fn notifications(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return reason(StatusCode::UNAUTHORIZED, "auth.required");
    }
    Json(json!([
        { "id": 3, "message": "Your game was approved", "isRead": false,
          "createdAt": "2025-01-15T09:30:00Z" }
    ]))
    .into_response()
}

async fn mark_read(headers: HeaderMap, Path(id): Path<i64>) -> StatusCode {
    if !authorized(&headers) {
        StatusCode::UNAUTHORIZED
    } else if id == 3 {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn videos() -> Json<Value> {
    Json(json!([
        { "id": "dQw4w9WgXcQ", "title": "Devlog #1", "thumbnailUrl": "https://i.ytimg.com/x.jpg" }
    ]))
}
