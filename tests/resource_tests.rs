mod common;

use axum::http::StatusCode;
use common::{create_test_app, login, register, send};
use serde_json::json;

/// 注册 alice（id=1，管理员）和 bob（id=2），返回两人的 fresh 访问令牌
async fn two_users(app: &axum::Router) -> (String, String) {
    register(app, "alice", "secret").await;
    register(app, "bob", "hunter2").await;
    let (admin, _) = login(app, "alice", "secret").await;
    let (user, _) = login(app, "bob", "hunter2").await;
    (admin, user)
}

#[tokio::test]
async fn test_item_lifecycle() {
    let app = create_test_app();
    let (admin, _) = two_users(&app).await;

    let (status, json) = send(&app, "GET", "/item/chair", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({"message": "Item not found."}));

    let body = json!({"price": 15.0, "store_id": 1});
    let (status, _) = send(&app, "POST", "/item/chair", Some(&admin), Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) = send(&app, "POST", "/item/chair", Some(&admin), Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "An item with name 'chair' already exists.");

    let (status, json) = send(
        &app,
        "PUT",
        "/item/chair",
        Some(&admin),
        Some(json!({"price": 20.5, "store_id": 3})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["price"], 20.5);
    assert_eq!(json["store_id"], 1);

    let (status, json) = send(&app, "GET", "/items", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["items"].as_array().unwrap().len(), 1);

    let (status, json) = send(&app, "DELETE", "/item/chair", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Item deleted.");

    let (status, _) = send(&app, "DELETE", "/item/chair", Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_item_mutations_require_tokens() {
    let app = create_test_app();
    let body = json!({"price": 1.0, "store_id": 1});

    for method in ["POST", "PUT", "DELETE"] {
        let (status, json) = send(&app, method, "/item/lamp", None, Some(body.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method}");
        assert_eq!(json["error"], "authorization_required");
    }

    let (status, _) = send(&app, "GET", "/items", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_item_payload_is_validated() {
    let app = create_test_app();
    let (admin, _) = two_users(&app).await;

    let (status, json) = send(
        &app,
        "POST",
        "/item/lamp",
        Some(&admin),
        Some(json!({"price": 3.0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["message"].as_str().unwrap().contains("store_id"));
}

#[tokio::test]
async fn test_deletions_require_admin_claim() {
    let app = create_test_app();
    let (admin, user) = two_users(&app).await;

    let body = json!({"price": 2.0, "store_id": 1});
    let (status, _) = send(&app, "POST", "/item/cup", Some(&user), Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) = send(&app, "DELETE", "/item/cup", Some(&user), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json, json!({"message": "Admin privilege required."}));

    let (status, _) = send(&app, "DELETE", "/user/1", Some(&user), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "DELETE", "/item/cup", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_user_lookup_and_deletion() {
    let app = create_test_app();
    let (admin, user) = two_users(&app).await;

    let (status, _) = send(&app, "GET", "/user/2", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, json) = send(&app, "GET", "/user/2", Some(&user), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"id": 2, "username": "bob"}));

    let (status, json) = send(&app, "GET", "/user/99", Some(&user), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "User not found.");

    let (status, json) = send(&app, "DELETE", "/user/2", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "User deleted.");

    let (status, _) = send(&app, "GET", "/user/2", Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_store_lists_its_items() {
    let app = create_test_app();
    let (admin, _) = two_users(&app).await;

    let (status, json) = send(&app, "POST", "/store/corner", Some(&admin), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json, json!({"id": 1, "name": "corner", "items": []}));

    let (status, json) = send(&app, "POST", "/store/corner", Some(&admin), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "A store with name 'corner' already exists.");

    let body = json!({"price": 4.25, "store_id": 1});
    let (status, _) = send(&app, "POST", "/item/mug", Some(&admin), Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) = send(&app, "GET", "/store/corner", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["items"][0]["name"], "mug");

    let (status, json) = send(&app, "GET", "/stores", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["stores"].as_array().unwrap().len(), 1);

    let (status, json) = send(&app, "DELETE", "/store/corner", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Store deleted.");

    let (status, json) = send(&app, "GET", "/store/corner", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "Store not found.");
}
