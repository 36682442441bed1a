//! Shared utilities for integration tests.
//!
//! Both mocks bind `127.0.0.1:0`, so tests can run in parallel.

#![allow(dead_code)]

use alloy::primitives::{hex, keccak256};
use axum::{extract::State, routing::post, Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use hbar_agent::config::AgentConfig;
use hbar_agent::config::Secrets;

/// Anvil's first development key and its address.
pub const TEST_PRIVATE_KEY: &str =
    "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const TEST_SENDER: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

/// Hedera testnet.
pub const TEST_CHAIN_ID: u64 = 296;

/// How the mock node answers.
#[derive(Debug, Clone)]
pub struct NodeBehavior {
    pub chain_id: u64,
    pub nonce: u64,
    pub gas_price: u128,
    /// When set, `eth_sendRawTransaction` fails with this JSON-RPC message.
    pub reject_with: Option<String>,
}

impl Default for NodeBehavior {
    fn default() -> Self {
        Self {
            chain_id: TEST_CHAIN_ID,
            nonce: 3,
            gas_price: 1,
            reject_with: None,
        }
    }
}

#[derive(Clone)]
struct NodeState {
    behavior: NodeBehavior,
    calls: Arc<Mutex<Vec<String>>>,
    submitted: Arc<Mutex<Vec<String>>>,
}

/// Handle to a running mock JSON-RPC node.
pub struct MockNode {
    pub addr: SocketAddr,
    calls: Arc<Mutex<Vec<String>>>,
    submitted: Arc<Mutex<Vec<String>>>,
}

impl MockNode {
    pub async fn start(behavior: NodeBehavior) -> Self {
        let state = NodeState {
            behavior,
            calls: Arc::new(Mutex::new(Vec::new())),
            submitted: Arc::new(Mutex::new(Vec::new())),
        };
        let calls = state.calls.clone();
        let submitted = state.submitted.clone();

        let app = Router::new().route("/", post(rpc_handler)).with_state(state);
        let addr = serve(app).await;

        Self {
            addr,
            calls,
            submitted,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// JSON-RPC methods received, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, method: &str) -> usize {
        self.calls().iter().filter(|m| *m == method).count()
    }

    /// Raw transactions received, as 0x-prefixed hex.
    pub fn submitted(&self) -> Vec<String> {
        self.submitted.lock().unwrap().clone()
    }
}

async fn rpc_handler(State(state): State<NodeState>, Json(request): Json<Value>) -> Json<Value> {
    let id = request["id"].clone();
    let method = request["method"].as_str().unwrap_or_default().to_string();
    state.calls.lock().unwrap().push(method.clone());

    let behavior = &state.behavior;
    let result = match method.as_str() {
        "eth_chainId" => Ok(json!(format!("0x{:x}", behavior.chain_id))),
        "eth_getTransactionCount" => Ok(json!(format!("0x{:x}", behavior.nonce))),
        "eth_gasPrice" => Ok(json!(format!("0x{:x}", behavior.gas_price))),
        "eth_blockNumber" => Ok(json!("0x10")),
        "eth_sendRawTransaction" => {
            let raw = request["params"][0].as_str().unwrap_or_default().to_string();
            state.submitted.lock().unwrap().push(raw.clone());
            match &behavior.reject_with {
                Some(message) => Err(message.clone()),
                None => {
                    let bytes = hex::decode(&raw).unwrap_or_default();
                    Ok(json!(keccak256(&bytes).to_string()))
                }
            }
        }
        other => Err(format!("method {} not supported", other)),
    };

    Json(match result {
        Ok(value) => json!({ "jsonrpc": "2.0", "id": id, "result": value }),
        Err(message) => json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": { "code": -32000, "message": message },
        }),
    })
}

/// Start an OpenAI-compatible completions endpoint that always answers
/// `reply`. Returns its full URL.
pub async fn start_mock_model(reply: &'static str) -> String {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(move || async move {
            Json(json!({
                "choices": [{ "index": 0, "message": { "role": "assistant", "content": reply } }]
            }))
        }),
    );
    let addr = serve(app).await;
    format!("http://{}/v1/chat/completions", addr)
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// Config pointing at the given node and model endpoints.
pub fn test_config(rpc_url: &str, model_url: &str) -> AgentConfig {
    let mut config = AgentConfig::default();
    config.ledger.rpc_url = rpc_url.to_string();
    config.ledger.sender_address = TEST_SENDER.to_string();
    config.ledger.rpc_timeout_secs = 5;
    config.model.api_url = model_url.to_string();
    config.model.timeout_secs = 5;
    config
}

pub fn test_secrets() -> Secrets {
    Secrets {
        private_key: TEST_PRIVATE_KEY.to_string().into(),
        model_api_key: "sk-test".to_string().into(),
    }
}
