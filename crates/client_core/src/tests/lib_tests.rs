use super::*;

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use shared::domain::{RoundStatus, TransferMode};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct Recorded {
    queries: Arc<Mutex<Vec<(String, HashMap<String, String>)>>>,
    bodies: Arc<Mutex<Vec<(String, Value)>>>,
}

impl Recorded {
    fn query(&self, route: &str, query: HashMap<String, String>) {
        self.queries
            .lock()
            .expect("queries lock")
            .push((route.to_string(), query));
    }

    fn body(&self, route: &str, body: Value) {
        self.bodies
            .lock()
            .expect("bodies lock")
            .push((route.to_string(), body));
    }

    fn last_query(&self, route: &str) -> HashMap<String, String> {
        self.queries
            .lock()
            .expect("queries lock")
            .iter()
            .rev()
            .find(|(r, _)| r == route)
            .map(|(_, q)| q.clone())
            .expect("route was called")
    }

    fn last_body(&self, route: &str) -> Value {
        self.bodies
            .lock()
            .expect("bodies lock")
            .iter()
            .rev()
            .find(|(r, _)| r == route)
            .map(|(_, b)| b.clone())
            .expect("route received a body")
    }
}

fn agent_json() -> Value {
    json!({
        "balance": 1234.5,
        "keys": [{"public_key": "pk1", "secret_key": "sk1"}],
        "stake": "5000"
    })
}

async fn agent(
    State(rec): State<Recorded>,
    Query(q): Query<HashMap<String, String>>,
) -> Json<Value> {
    rec.query("agent", q);
    Json(json!({ "agent": agent_json(), "transaction_fee": "0.01" }))
}

async fn keys(
    State(rec): State<Recorded>,
    Query(q): Query<HashMap<String, String>>,
) -> Json<Value> {
    rec.query("keys", q);
    Json(agent_json())
}

async fn add_key(
    State(rec): State<Recorded>,
    Query(q): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    rec.query("addKey", q);
    rec.body("addKey", body);
    Json(json!({ "status": "ok" }))
}

async fn transfer(
    State(rec): State<Recorded>,
    Query(q): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    rec.query("transfer", q);
    rec.body("transfer", body);
    Json(json!({ "agent": agent_json() }))
}

async fn dag(
    State(rec): State<Recorded>,
    Query(q): Query<HashMap<String, String>>,
) -> Json<Value> {
    rec.query("dag", q);
    Json(json!({
        "dag": {
            "nodes": [
                {"id": "t1", "symbolType": "square", "meta": {"isTransaction": true}},
                {"id": "a1", "symbolType": "circle", "meta": {"txn_id": "t1"}}
            ],
            "links": [{"source": "t1", "target": "a1"}]
        },
        "round_status": 2
    }))
}

async fn transaction(
    State(rec): State<Recorded>,
    Query(q): Query<HashMap<String, String>>,
) -> Json<Value> {
    let known = q.get("txn_id").map(String::as_str) == Some("t1");
    rec.query("transaction", q);
    if known {
        Json(json!({
            "total_inputs": 10,
            "total_outputs": "9.5",
            "total_fees": "0.5",
            "stake": "3",
            "inputs": [{"public_key": "pk1", "value": 10}],
            "outputs": [],
            "parents": ["a0"]
        }))
    } else {
        Json(json!({}))
    }
}

async fn round_status(
    State(rec): State<Recorded>,
    Query(q): Query<HashMap<String, String>>,
) -> Json<Value> {
    rec.query("round_status", q);
    Json(json!({ "round_status": 3 }))
}

async fn stake_dist(
    State(rec): State<Recorded>,
    Query(q): Query<HashMap<String, String>>,
) -> Json<Value> {
    rec.query("stake_dist", q);
    Json(json!([
        {"public_key": "pk1", "stake_t": 100, "stake_p": "0.25"},
        {"public_key": "pk2", "stake_t": "300", "stake_p": 0.75}
    ]))
}

async fn spawn_server(app: Router) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

async fn spawn_ledger() -> (HttpLedgerClient, Recorded) {
    let rec = Recorded::default();
    let app = Router::new()
        .route("/agent", get(agent))
        .route("/keys", post(keys))
        .route("/addKey", post(add_key))
        .route("/transfer", post(transfer))
        .route("/dag", get(dag))
        .route("/transaction", get(transaction))
        .route("/round_status", get(round_status))
        .route("/stake_dist", get(stake_dist))
        .with_state(rec.clone());
    let url = spawn_server(app).await;
    (HttpLedgerClient::new(&url).expect("client"), rec)
}

#[tokio::test]
async fn agent_sends_port_and_normalizes_numbers() {
    let (client, rec) = spawn_ledger().await;

    let response = client.agent(5001).await.expect("agent");

    assert_eq!(response.agent.balance, "1234.5");
    assert_eq!(response.agent.stake, "5000");
    assert_eq!(response.transaction_fee, "0.01");
    assert_eq!(response.agent.keys.len(), 1);
    assert_eq!(rec.last_query("agent").get("port").map(String::as_str), Some("5001"));
}

#[tokio::test]
async fn generate_key_pair_posts_without_body() {
    let (client, rec) = spawn_ledger().await;

    let agent = client.generate_key_pair(5002).await.expect("keys");

    assert_eq!(agent.keys[0].public_key, "pk1");
    assert_eq!(rec.last_query("keys").get("port").map(String::as_str), Some("5002"));
}

#[tokio::test]
async fn add_key_posts_secret_key() {
    let (client, rec) = spawn_ledger().await;

    let response = client.add_key(5001, "deadbeef").await.expect("addKey");

    assert_eq!(response.status, json!("ok"));
    assert_eq!(rec.last_body("addKey"), json!({ "key": "deadbeef" }));
}

#[tokio::test]
async fn transfer_posts_order_fields() {
    let (client, rec) = spawn_ledger().await;
    let request = TransferRequest {
        value: "2.5".into(),
        recipient: "a".repeat(64),
        mode: TransferMode::Delegate,
        validator: "b".repeat(64),
    };

    let response = client.transfer(5003, &request).await.expect("transfer");

    assert_eq!(response.agent.balance, "1234.5");
    let body = rec.last_body("transfer");
    assert_eq!(body["value"], "2.5");
    assert_eq!(body["mode"], "delegate");
    assert_eq!(body["validator"], json!("b".repeat(64)));
    assert_eq!(
        rec.last_query("transfer").get("port").map(String::as_str),
        Some("5003")
    );
}

#[tokio::test]
async fn dag_decodes_nodes_links_and_round_status() {
    let (client, _rec) = spawn_ledger().await;

    let response = client.dag(5001).await.expect("dag");

    assert_eq!(response.dag.nodes.len(), 2);
    assert_eq!(response.dag.links[0].target, "a1");
    assert_eq!(response.round_status, RoundStatus::AgreeHash);
}

#[tokio::test]
async fn transaction_info_sends_id_and_tolerates_empty_object() {
    let (client, rec) = spawn_ledger().await;

    let info = client.transaction_info(5001, "t1").await.expect("known");
    assert_eq!(info.total_inputs, "10");
    assert_eq!(info.total_outputs, "9.5");
    assert_eq!(info.parents, vec!["a0".to_string()]);
    let query = rec.last_query("transaction");
    assert_eq!(query.get("txn_id").map(String::as_str), Some("t1"));
    assert_eq!(query.get("port").map(String::as_str), Some("5001"));

    let unknown = client.transaction_info(5001, "zz").await.expect("unknown");
    assert_eq!(unknown, TransactionInfo::default());
}

#[tokio::test]
async fn round_status_and_stake_dist_decode() {
    let (client, _rec) = spawn_ledger().await;

    let status = client.round_status(5001).await.expect("round status");
    assert_eq!(status.round_status, RoundStatus::AgreeContent);

    let dist = client.stake_dist(5001).await.expect("stake dist");
    assert_eq!(dist.len(), 2);
    assert_eq!(dist[0].stake_t, "100");
    assert_eq!(dist[1].stake_p, "0.75");
}

#[tokio::test]
async fn base_url_path_prefix_is_kept() {
    let rec = Recorded::default();
    let inner = Router::new()
        .route("/round_status", get(round_status))
        .with_state(rec.clone());
    let url = spawn_server(Router::new().nest("/api", inner)).await;
    let client = HttpLedgerClient::new(&format!("{url}/api")).expect("client");

    assert_eq!(client.base_url().path(), "/api/");
    let status = client.round_status(7).await.expect("round status");
    assert_eq!(status.round_status, RoundStatus::AgreeContent);
}

#[tokio::test]
async fn non_success_status_is_reported_with_route() {
    let app = Router::new().route(
        "/agent",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
    );
    let url = spawn_server(app).await;
    let client = HttpLedgerClient::new(&url).expect("client");

    let err = client.agent(5001).await.expect_err("status error");
    assert!(matches!(
        err,
        ClientError::Status {
            route: "agent",
            status: 503
        }
    ));
    assert_eq!(err.to_api_error().code, shared::error::ErrorCode::Status);
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let app = Router::new().route("/dag", get(|| async { "not json" }));
    let url = spawn_server(app).await;
    let client = HttpLedgerClient::new(&url).expect("client");

    let err = client.dag(5001).await.expect_err("decode error");
    assert!(matches!(err, ClientError::Decode { route: "dag", .. }));
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let client = HttpLedgerClient::with_timeout(&format!("http://{addr}"), Duration::from_secs(2))
        .expect("client");

    let err = client.stake_dist(5001).await.expect_err("transport error");
    assert!(matches!(err, ClientError::Transport { route: "stake_dist", .. }));
    assert!(err.to_api_error().is_transport());
}

#[test]
fn invalid_base_url_is_rejected() {
    assert!(matches!(
        HttpLedgerClient::new("not a url"),
        Err(ClientError::Url(_))
    ));
}
