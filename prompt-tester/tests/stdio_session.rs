use std::sync::Mutex;
use std::time::Duration;

use prompt_tester::prelude::*;
use prompt_tester::protocol::JsonRpcResponse;
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, Lines};

#[derive(Debug, Default)]
struct ScriptedProvider {
    requests: Mutex<Vec<ModelRequest>>,
}

impl ModelProvider for ScriptedProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenAi
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            let turn = {
                let mut requests = self.requests.lock().expect("requests lock");
                requests.push(request.clone());
                requests.len()
            };
            Ok(ModelResponse {
                provider: ProviderId::OpenAi,
                model: request.model,
                text: format!("turn {turn}"),
                stop_reason: StopReason::EndTurn,
                usage: TokenUsage::new(10, 5),
            })
        })
    }
}

struct Client {
    input: DuplexStream,
    output: Lines<BufReader<DuplexStream>>,
    next_id: u64,
}

impl Client {
    async fn request(&mut self, method: &str, params: Value) -> JsonRpcResponse {
        self.next_id += 1;
        let line = json!({
            "jsonrpc": "2.0",
            "id": self.next_id,
            "method": method,
            "params": params,
        })
        .to_string();
        self.input
            .write_all(format!("{line}\n").as_bytes())
            .await
            .expect("request should be written");

        let reply = self
            .output
            .next_line()
            .await
            .expect("response should be readable")
            .expect("server should answer before closing");
        let response: JsonRpcResponse = serde_json::from_str(&reply).expect("response json");
        assert_eq!(response.id, json!(self.next_id));
        response
    }

    async fn call_tool(&mut self, name: &str, arguments: Value) -> (bool, Value) {
        let response = self
            .request("tools/call", json!({ "name": name, "arguments": arguments }))
            .await;
        let result = response.result.expect("tools/call result");
        let text = result["content"][0]["text"]
            .as_str()
            .expect("text content")
            .to_string();
        (
            result["isError"].as_bool().expect("isError flag"),
            serde_json::from_str(&text).expect("payload json"),
        )
    }
}

#[tokio::test]
async fn full_session_over_a_byte_stream() {
    let mut registry = ProviderRegistry::new();
    registry.register(ScriptedProvider::default());
    let server = McpServer::new(build_runtime_with(registry, Duration::from_secs(5)).dispatcher);

    let (client_input, server_input) = tokio::io::duplex(64 * 1024);
    let (server_output, client_output) = tokio::io::duplex(64 * 1024);
    let serving = tokio::spawn(async move { server.serve(server_input, server_output).await });

    let mut client = Client {
        input: client_input,
        output: BufReader::new(client_output).lines(),
        next_id: 0,
    };

    let init = client
        .request("initialize", json!({ "protocolVersion": "2024-11-05" }))
        .await;
    assert_eq!(
        init.result.expect("initialize result")["protocolVersion"],
        "2024-11-05"
    );
    client
        .input
        .write_all(b"{\"jsonrpc\":\"2.0\",\"method\":\"notifications/initialized\"}\n")
        .await
        .expect("notification should be written");

    let (is_error, providers) = client.call_tool("list_providers", json!({})).await;
    assert!(!is_error);
    assert!(providers["providers"]["openai"].is_array());

    let (is_error, started) = client
        .call_tool(
            "test_multiturn_conversation",
            json!({
                "mode": "start",
                "provider": "openai",
                "model": "gpt-4o-mini",
                "system_prompt": "Be brief.",
                "user_prompt": "Hello",
            }),
        )
        .await;
    assert!(!is_error);
    assert_eq!(started["result"]["text"], "turn 1");
    let conversation_id = started["conversation_id"]
        .as_str()
        .expect("conversation id")
        .to_string();

    let (is_error, continued) = client
        .call_tool(
            "test_multiturn_conversation",
            json!({
                "mode": "continue",
                "conversation_id": conversation_id,
                "user_prompt": "And again",
            }),
        )
        .await;
    assert!(!is_error);
    assert_eq!(continued["result"]["text"], "turn 2");

    let (is_error, history) = client
        .call_tool(
            "test_multiturn_conversation",
            json!({ "mode": "get", "conversation_id": conversation_id }),
        )
        .await;
    assert!(!is_error);
    let roles = history["messages"]
        .as_array()
        .expect("messages")
        .iter()
        .map(|message| message["role"].as_str().expect("role").to_string())
        .collect::<Vec<_>>();
    assert_eq!(roles, vec!["system", "user", "assistant", "user", "assistant"]);

    let (is_error, closed) = client
        .call_tool(
            "test_multiturn_conversation",
            json!({ "mode": "close", "conversation_id": conversation_id }),
        )
        .await;
    assert!(!is_error);
    assert_eq!(closed["closed"], true);

    let Client { input, .. } = client;
    drop(input);
    serving
        .await
        .expect("server task should not panic")
        .expect("server should stop cleanly at end of input");
}
