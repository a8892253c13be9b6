use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use todo_server::{app, shared, List, ListMapping, Store, Todo, TodoMapping, User};
use tower::ServiceExt;

fn test_app() -> Router {
    app(shared(Store::open_in_memory().unwrap()))
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
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

/// Sends one request through a clone of `app`, so state persists across calls.
async fn send(app: &Router, request: Request<String>) -> axum::response::Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn create_lists(app: &Router, titles: &[&str]) -> Vec<ListMapping> {
    let lists: Vec<Value> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| json!({"id": format!("tmp{}", i + 1), "title": title}))
        .collect();
    let resp = send(
        app,
        json_request("POST", "/lists", &json!({ "lists": lists }).to_string()),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await
}

async fn fetch_lists(app: &Router) -> Vec<List> {
    let resp = send(app, empty_request("GET", "/lists")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    body_json(resp).await
}

async fn fetch_todos(app: &Router) -> Vec<Todo> {
    let resp = send(app, empty_request("GET", "/todos")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    body_json(resp).await
}

// --- root ---

#[tokio::test]
async fn root_returns_plain_text() {
    let resp = send(&test_app(), empty_request("GET", "/")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(!body_bytes(resp).await.is_empty());
}

// --- users ---

#[tokio::test]
async fn users_create_get_and_list() {
    let app = test_app();
    let resp = send(
        &app,
        json_request("POST", "/users", r#"{"name":"Ada","email":"ada@example.com"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let created: Value = body_json(resp).await;
    assert_eq!(created["success"], true);
    let id = created["id"].as_i64().unwrap();

    let resp = send(&app, empty_request("GET", &format!("/users/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let user: User = body_json(resp).await;
    assert_eq!(user.email, "ada@example.com");

    let resp = send(&app, empty_request("GET", "/users")).await;
    let users: Vec<User> = body_json(resp).await;
    assert_eq!(users, vec![user]);
}

#[tokio::test]
async fn duplicate_email_returns_400() {
    let app = test_app();
    let body = r#"{"name":"Ada","email":"ada@example.com"}"#;
    assert_eq!(send(&app, json_request("POST", "/users", body)).await.status(), StatusCode::OK);

    let resp = send(&app, json_request("POST", "/users", body)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: Value = body_json(resp).await;
    assert!(err["error"].is_string());
}

#[tokio::test]
async fn get_user_not_found() {
    let resp = send(&test_app(), empty_request("GET", "/users/1")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_path_id_returns_400() {
    let resp = send(&test_app(), empty_request("GET", "/users/abc")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let err: Value = body_json(resp).await;
    assert!(err["error"].is_string());
}

// --- lists ---

#[tokio::test]
async fn batch_create_on_empty_table_matches_reconciliation_shape() {
    let app = test_app();
    let resp = send(
        &app,
        json_request("POST", "/lists", r#"{"lists":[{"id":"tmp1","title":"Groceries"}]}"#),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = body_json(resp).await;
    assert_eq!(
        body,
        json!([{"tempId": "tmp1", "realId": 1, "title": "Groceries", "list_order": 1}])
    );
}

#[tokio::test]
async fn batch_create_echoes_any_numeric_temp_id() {
    let app = test_app();
    let resp = send(
        &app,
        json_request(
            "POST",
            "/lists",
            r#"{"lists":[{"id":1718000000000.5,"title":"G"},{"id":18446744073709551615,"title":"H"}]}"#,
        ),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let bytes = body_bytes(resp).await;
    let text = std::str::from_utf8(&bytes).unwrap();
    assert!(text.contains(r#""tempId":1718000000000.5"#), "{text}");
    assert!(text.contains(r#""tempId":18446744073709551615"#), "{text}");
    assert_eq!(fetch_lists(&app).await.len(), 2);
}

#[tokio::test]
async fn batch_create_assigns_consecutive_orders_after_max() {
    let app = test_app();
    create_lists(&app, &["a", "b"]).await;
    let mappings = create_lists(&app, &["c", "d", "e"]).await;

    let orders: Vec<_> = mappings.iter().map(|m| m.list_order).collect();
    assert_eq!(orders, vec![3, 4, 5]);
    let temp: Vec<_> = mappings
        .iter()
        .map(|m| serde_json::to_value(&m.temp_id).unwrap())
        .collect();
    assert_eq!(temp, vec![json!("tmp1"), json!("tmp2"), json!("tmp3")]);
    assert_eq!(fetch_lists(&app).await.len(), 5);
}

#[tokio::test]
async fn single_list_create_returns_list() {
    let app = test_app();
    let resp = send(&app, json_request("POST", "/lists", r#"{"title":"Solo"}"#)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let list: List = body_json(resp).await;
    assert_eq!(list.title, "Solo");
    assert_eq!(list.list_order, 1);
}

#[tokio::test]
async fn empty_or_malformed_list_batches_return_400() {
    let app = test_app();
    for body in [
        r#"{"lists":[]}"#,
        r#"{"lists":"nope"}"#,
        r#"{}"#,
        r#"{"lists":[{"title":""}]}"#,
        r#"not json"#,
    ] {
        let resp = send(&app, json_request("POST", "/lists", body)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body: {body}");
    }
    assert!(fetch_lists(&app).await.is_empty());
}

#[tokio::test]
async fn reorder_lists_sets_positions() {
    let app = test_app();
    create_lists(&app, &["one", "two", "three"]).await;

    let resp = send(&app, json_request("PUT", "/lists/reorder", r#"{"order":[3,1,2]}"#)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["success"], true);

    let lists = fetch_lists(&app).await;
    let by_order: Vec<_> = lists.iter().map(|l| (l.list_id, l.list_order)).collect();
    assert_eq!(by_order, vec![(3, 1), (1, 2), (2, 3)]);
}

#[tokio::test]
async fn reorder_lists_accepts_string_ids() {
    let app = test_app();
    create_lists(&app, &["one", "two"]).await;

    let resp = send(&app, json_request("PUT", "/lists/reorder", r#"{"order":["2","1"]}"#)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(fetch_lists(&app).await[0].list_id, 2);
}

#[tokio::test]
async fn reorder_lists_rejects_bad_input() {
    let app = test_app();
    create_lists(&app, &["one", "two"]).await;

    for body in [r#"{"order":[]}"#, r#"{}"#, r#"{"order":[1,1]}"#] {
        let resp = send(&app, json_request("PUT", "/lists/reorder", body)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body: {body}");
    }

    let resp = send(&app, json_request("PUT", "/lists/reorder", r#"{"order":[2,42]}"#)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let orders: Vec<_> = fetch_lists(&app).await.iter().map(|l| (l.list_id, l.list_order)).collect();
    assert_eq!(orders, vec![(1, 1), (2, 2)]);
}

#[tokio::test]
async fn patch_list_title() {
    let app = test_app();
    create_lists(&app, &["Old"]).await;

    let resp = send(&app, json_request("PATCH", "/lists/1", r#"{"title":"New"}"#)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body, json!({"list_id": 1, "title": "New"}));
    assert_eq!(fetch_lists(&app).await[0].title, "New");
}

#[tokio::test]
async fn patch_list_errors() {
    let app = test_app();
    create_lists(&app, &["Old"]).await;

    let resp = send(&app, json_request("PATCH", "/lists/1", r#"{}"#)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = send(&app, json_request("PATCH", "/lists/99", r#"{"title":"New"}"#)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(fetch_lists(&app).await[0].title, "Old");
}

#[tokio::test]
async fn delete_list_cascades_to_todos() {
    let app = test_app();
    create_lists(&app, &["a", "b"]).await;
    for (list, msgs) in [(1, vec!["x", "y", "z"]), (2, vec!["keep"])] {
        let todos: Vec<Value> = msgs.iter().map(|m| json!({"msg": m})).collect();
        let body = json!({"todos": todos, "listID": list}).to_string();
        let resp = send(&app, json_request("POST", "/todos", &body)).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = send(&app, empty_request("DELETE", "/lists/1")).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    let todos = fetch_todos(&app).await;
    assert_eq!(todos.len(), 1);
    assert!(todos.iter().all(|t| t.list_id == 2));

    let resp = send(&app, empty_request("DELETE", "/lists/1")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- todos ---

#[tokio::test]
async fn batch_create_todos_reconciles() {
    let app = test_app();
    create_lists(&app, &["Groceries"]).await;

    let resp = send(
        &app,
        json_request(
            "POST",
            "/todos",
            r#"{"listID":"1","todos":[{"todoId":"u1","msg":"Milk"},{"todoId":"u2","msg":"Eggs"}]}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let mappings: Vec<TodoMapping> = body_json(resp).await;
    assert_eq!(mappings.len(), 2);
    assert_eq!(mappings[0].todo_order, 1);
    assert_eq!(mappings[1].todo_order, 2);
    assert!(mappings.iter().all(|m| m.parent_id == 1));
    assert_ne!(mappings[0].real_id, mappings[1].real_id);

    let todos = fetch_todos(&app).await;
    assert_eq!(todos.len(), 2);
    assert!(todos.iter().all(|t| !t.is_complete));
}

#[tokio::test]
async fn create_todo_for_missing_list_returns_404_and_inserts_nothing() {
    let app = test_app();
    let resp = send(
        &app,
        json_request("POST", "/todos", r#"{"listID":7,"todos":[{"msg":"a"},{"msg":"b"}]}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(&app, json_request("POST", "/todos", r#"{"list_id":7,"msg":"a"}"#)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    assert!(fetch_todos(&app).await.is_empty());
}

#[tokio::test]
async fn create_todo_input_errors_return_400() {
    let app = test_app();
    create_lists(&app, &["a"]).await;
    for body in [
        r#"{"listID":1,"todos":[]}"#,
        r#"{"todos":[{"msg":"a"}]}"#,
        r#"{"listID":1}"#,
        r#"{"listID":1,"todos":[{"msg":" "}]}"#,
        r#"{"listID":"one","todos":[{"msg":"a"}]}"#,
    ] {
        let resp = send(&app, json_request("POST", "/todos", body)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body: {body}");
    }
}

#[tokio::test]
async fn single_todo_lifecycle() {
    let app = test_app();
    create_lists(&app, &["a"]).await;

    let resp = send(&app, json_request("POST", "/todos", r#"{"list_id":1,"msg":"Walk dog"}"#)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Todo = body_json(resp).await;
    assert_eq!(created.msg, "Walk dog");
    assert_eq!(created.todo_order, 1);
    assert!(!created.is_complete);
    let id = created.todo_id;

    let resp = send(&app, empty_request("GET", &format!("/todos/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Todo = body_json(resp).await;
    assert_eq!(fetched, created);

    // legacy toggle body
    let resp = send(
        &app,
        json_request("PATCH", &format!("/todos/{id}"), r#"{"boolValue":true}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body, json!({"todo_id": id, "isComplete": true}));

    let resp = send(
        &app,
        json_request("PATCH", &format!("/todos/{id}"), r#"{"msg":"Walk cat"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(&app, empty_request("GET", &format!("/todos/{id}"))).await;
    let fetched: Todo = body_json(resp).await;
    assert_eq!(fetched.msg, "Walk cat");
    assert!(fetched.is_complete);

    let resp = send(&app, empty_request("DELETE", &format!("/todos/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(&app, empty_request("GET", &format!("/todos/{id}"))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_todo_accepts_integer_completion_flag() {
    let app = test_app();
    create_lists(&app, &["a"]).await;
    send(&app, json_request("POST", "/todos", r#"{"list_id":1,"msg":"Milk"}"#)).await;

    let resp = send(&app, json_request("PATCH", "/todos/1", r#"{"boolValue":1}"#)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body, json!({"todo_id": 1, "isComplete": true}));
    assert!(fetch_todos(&app).await[0].is_complete);

    let resp = send(&app, json_request("PATCH", "/todos/1", r#"{"boolValue":0}"#)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(!fetch_todos(&app).await[0].is_complete);

    let resp = send(&app, json_request("PATCH", "/todos/1", r#"{"boolValue":5}"#)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(!fetch_todos(&app).await[0].is_complete);
}

#[tokio::test]
async fn patch_todo_errors_leave_rows_unchanged() {
    let app = test_app();
    create_lists(&app, &["a"]).await;
    send(&app, json_request("POST", "/todos", r#"{"list_id":1,"msg":"Milk"}"#)).await;

    let resp = send(&app, json_request("PATCH", "/todos/1", r#"{}"#)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = send(&app, json_request("PATCH", "/todos/99", r#"{"isComplete":true}"#)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(&app, empty_request("DELETE", "/todos/99")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let todos = fetch_todos(&app).await;
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].msg, "Milk");
    assert!(!todos[0].is_complete);
}

#[tokio::test]
async fn todo_order_is_per_list_and_reorderable() {
    let app = test_app();
    create_lists(&app, &["a", "b"]).await;
    send(
        &app,
        json_request("POST", "/todos", r#"{"listID":1,"todos":[{"msg":"x"},{"msg":"y"}]}"#),
    )
    .await;
    let resp = send(
        &app,
        json_request("POST", "/todos", r#"{"listID":2,"todos":[{"msg":"z"}]}"#),
    )
    .await;
    let in_b: Vec<TodoMapping> = body_json(resp).await;
    assert_eq!(in_b[0].todo_order, 1);

    let resp = send(
        &app,
        json_request("PUT", "/todos/reorder", r#"{"listID":1,"order":[2,1]}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let todos = fetch_todos(&app).await;
    let in_a: Vec<_> = todos
        .iter()
        .filter(|t| t.list_id == 1)
        .map(|t| (t.todo_id, t.todo_order))
        .collect();
    assert_eq!(in_a, vec![(2, 1), (1, 2)]);

    let resp = send(
        &app,
        json_request("PUT", "/todos/reorder", r#"{"listID":1,"order":[3]}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- data ---

#[tokio::test]
async fn all_data_returns_ordered_lists_and_todos() {
    let app = test_app();
    create_lists(&app, &["first", "second"]).await;
    send(&app, json_request("PUT", "/lists/reorder", r#"{"order":[2,1]}"#)).await;
    send(&app, json_request("POST", "/todos", r#"{"list_id":1,"msg":"m"}"#)).await;

    let resp = send(&app, empty_request("GET", "/data/all")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["lists"][0]["title"], "second");
    assert_eq!(body["lists"][1]["title"], "first");
    assert_eq!(body["todos"].as_array().unwrap().len(), 1);
}

// --- persistence ---

#[tokio::test]
async fn data_survives_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("database.db");

    let first = app_from(&path);
    create_lists(&first, &["durable"]).await;
    drop(first);

    let second = app_from(&path);
    let lists = fetch_lists(&second).await;
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].title, "durable");
}

fn app_from(path: &std::path::Path) -> Router {
    app(shared(Store::open(path).unwrap()))
}
