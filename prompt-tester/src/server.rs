//! Newline-delimited JSON-RPC server speaking MCP over a byte stream.
//!
//! Every request runs on its own task so a slow provider call never holds up
//! other requests. Responses funnel through one writer task and may leave in
//! a different order than their requests arrived.

use std::io;

use ptooling::Dispatcher;
use serde::Serialize;
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

use crate::protocol::{
    CallToolParams, CallToolResult, InitializeResult, JSONRPC_VERSION, JsonRpcError,
    JsonRpcRequest, JsonRpcResponse, ListToolsResult, PROTOCOL_VERSION, ServerCapabilities,
    ServerInfo, ToolsCapability,
};

#[derive(Clone)]
pub struct McpServer {
    dispatcher: Dispatcher,
    info: ServerInfo,
}

impl McpServer {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            info: ServerInfo::default(),
        }
    }

    pub fn with_info(mut self, info: ServerInfo) -> Self {
        self.info = info;
        self
    }

    /// Answers one input line; `None` for blank lines and notifications.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let value = match serde_json::from_str::<Value>(line) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(error = %err, "unparsable request line");
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    JsonRpcError::parse_error(format!("parse error: {err}")),
                ));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        let request = match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) if request.jsonrpc == JSONRPC_VERSION => request,
            Ok(request) => {
                return Some(JsonRpcResponse::failure(
                    id,
                    JsonRpcError::invalid_request(format!(
                        "unsupported jsonrpc version '{}'",
                        request.jsonrpc
                    )),
                ));
            }
            Err(err) => {
                return Some(JsonRpcResponse::failure(
                    id,
                    JsonRpcError::invalid_request(format!("invalid request: {err}")),
                ));
            }
        };

        self.handle_request(request).await
    }

    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id.clone() else {
            self.handle_notification(&request.method);
            return None;
        };

        let outcome = match request.method.as_str() {
            "initialize" => to_result(&InitializeResult {
                protocol_version: PROTOCOL_VERSION.to_string(),
                capabilities: ServerCapabilities {
                    tools: ToolsCapability {
                        list_changed: false,
                    },
                },
                server_info: self.info.clone(),
            }),
            "ping" => Ok(json!({})),
            "tools/list" => to_result(&ListToolsResult {
                tools: self.dispatcher.definitions(),
            }),
            "tools/call" => self.call_tool(request.params).await,
            other => Err(JsonRpcError::method_not_found(other)),
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    fn handle_notification(&self, method: &str) {
        match method {
            "notifications/initialized" => tracing::info!("client initialized"),
            other => tracing::debug!(method = other, "ignoring notification"),
        }
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params = params.ok_or_else(|| JsonRpcError::invalid_params("missing params"))?;
        let params = serde_json::from_value::<CallToolParams>(params)
            .map_err(|err| JsonRpcError::invalid_params(format!("invalid params: {err}")))?;

        let output = self.dispatcher.handle(&params.name, params.arguments).await;
        to_result(&CallToolResult::from(output))
    }

    /// Serves until `reader` reaches end of input and every in-flight request has answered.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> io::Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (responses, outgoing) = mpsc::unbounded_channel::<String>();
        let writer_task = tokio::spawn(write_responses(writer, outgoing));

        let mut lines = BufReader::new(reader).lines();
        while let Some(line) = lines.next_line().await? {
            let server = self.clone();
            let responses = responses.clone();
            tokio::spawn(async move {
                let Some(response) = server.handle_line(&line).await else {
                    return;
                };
                match serde_json::to_string(&response) {
                    Ok(encoded) => {
                        let _ = responses.send(encoded);
                    }
                    Err(err) => tracing::error!(error = %err, "failed to encode response"),
                }
            });
        }

        drop(responses);
        tracing::info!("input closed; waiting for in-flight requests");
        writer_task
            .await
            .map_err(|err| io::Error::other(format!("writer task failed: {err}")))?
    }
}

pub async fn serve_stdio(server: &McpServer) -> io::Result<()> {
    server.serve(tokio::io::stdin(), tokio::io::stdout()).await
}

async fn write_responses<W>(mut writer: W, mut outgoing: mpsc::UnboundedReceiver<String>) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(line) = outgoing.recv().await {
        writer.write_all(line.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }

    writer.shutdown().await
}

fn to_result<T>(value: &T) -> Result<Value, JsonRpcError>
where
    T: Serialize,
{
    serde_json::to_value(value)
        .map_err(|err| JsonRpcError::new(-32603, format!("failed to encode result: {err}")))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    use pprovider::{
        ModelProvider, ModelRequest, ModelResponse, ProviderError, ProviderFuture, ProviderId,
        ProviderRegistry, StopReason, TokenUsage,
    };
    use tokio::io::AsyncReadExt;

    use super::*;
    use crate::protocol::{METHOD_NOT_FOUND, PARSE_ERROR};
    use crate::runtime::build_runtime_with;

    #[derive(Debug)]
    struct SlowEcho {
        delay: Duration,
    }

    impl ModelProvider for SlowEcho {
        fn id(&self) -> ProviderId {
            ProviderId::Anthropic
        }

        fn complete<'a>(
            &'a self,
            request: ModelRequest,
        ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
            Box::pin(async move {
                tokio::time::sleep(self.delay).await;
                Ok(ModelResponse {
                    provider: ProviderId::Anthropic,
                    model: request.model,
                    text: "pong".to_string(),
                    stop_reason: StopReason::EndTurn,
                    usage: TokenUsage::new(4, 1),
                })
            })
        }
    }

    fn server(delay: Duration) -> McpServer {
        let mut registry = ProviderRegistry::new();
        registry.register(SlowEcho { delay });
        McpServer::new(build_runtime_with(registry, Duration::from_secs(5)).dispatcher)
    }

    async fn call(server: &McpServer, request: Value) -> JsonRpcResponse {
        server
            .handle_line(&request.to_string())
            .await
            .expect("request should be answered")
    }

    #[tokio::test]
    async fn initialize_reports_protocol_and_tools_capability() {
        let response = call(
            &server(Duration::ZERO),
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "initialize",
                "params": { "protocolVersion": "2024-11-05", "capabilities": {} },
            }),
        )
        .await;

        let result = response.result.expect("initialize result");
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(result["serverInfo"]["name"], "prompt-tester");
        assert!(result["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn tools_list_advertises_schemas() {
        let response = call(
            &server(Duration::ZERO),
            json!({ "jsonrpc": "2.0", "id": "a", "method": "tools/list" }),
        )
        .await;

        assert_eq!(response.id, json!("a"));
        let tools = response.result.expect("result")["tools"].clone();
        let names = tools
            .as_array()
            .expect("tools array")
            .iter()
            .map(|tool| tool["name"].as_str().expect("name").to_string())
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            vec!["list_providers", "test_comparison", "test_multiturn_conversation"]
        );
        assert_eq!(tools[1]["inputSchema"]["type"], "object");
    }

    #[tokio::test]
    async fn tools_call_wraps_payload_as_text_content() {
        let response = call(
            &server(Duration::ZERO),
            json!({
                "jsonrpc": "2.0",
                "id": 7,
                "method": "tools/call",
                "params": {
                    "name": "test_comparison",
                    "arguments": { "comparisons": [] },
                },
            }),
        )
        .await;

        let result = response.result.expect("tool errors are still results");
        assert_eq!(result["isError"], true);
        assert_eq!(result["content"][0]["type"], "text");
        let payload: Value = serde_json::from_str(
            result["content"][0]["text"].as_str().expect("text content"),
        )
        .expect("payload is json");
        assert_eq!(payload["error_kind"], "validation_error");
    }

    #[tokio::test]
    async fn protocol_errors_use_json_rpc_codes() {
        let server = server(Duration::ZERO);

        let unknown = call(
            &server,
            json!({ "jsonrpc": "2.0", "id": 2, "method": "resources/list" }),
        )
        .await;
        assert_eq!(unknown.error.expect("error").code, METHOD_NOT_FOUND);

        let garbled = server
            .handle_line("{not json")
            .await
            .expect("parse errors are answered");
        assert_eq!(garbled.id, Value::Null);
        assert_eq!(garbled.error.expect("error").code, PARSE_ERROR);

        let missing_params = call(
            &server,
            json!({ "jsonrpc": "2.0", "id": 3, "method": "tools/call" }),
        )
        .await;
        assert_eq!(missing_params.error.expect("error").code, -32602);
    }

    #[tokio::test]
    async fn notifications_and_blank_lines_get_no_response() {
        let server = server(Duration::ZERO);
        assert!(server.handle_line("   ").await.is_none());
        assert!(
            server
                .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn serve_answers_every_request_and_slow_calls_do_not_block_others() {
        let server = server(Duration::from_millis(200));
        let slow_call = json!({
            "jsonrpc": "2.0",
            "id": "slow",
            "method": "tools/call",
            "params": {
                "name": "test_comparison",
                "arguments": {
                    "comparisons": [{
                        "provider": "anthropic",
                        "model": "claude-3-5-haiku-20241022",
                        "system_prompt": "sys",
                        "user_prompt": "ping",
                    }]
                },
            },
        });
        let input = [
            slow_call.to_string(),
            json!({ "jsonrpc": "2.0", "id": "fast", "method": "ping" }).to_string(),
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#.to_string(),
        ]
        .join("\n");

        let (writer, mut client) = tokio::io::duplex(1 << 20);
        server
            .serve(input.as_bytes(), writer)
            .await
            .expect("serve should finish at end of input");

        let mut output = String::new();
        client
            .read_to_string(&mut output)
            .await
            .expect("output should be readable");

        let responses = output
            .lines()
            .map(|line| serde_json::from_str::<JsonRpcResponse>(line).expect("response json"))
            .collect::<Vec<_>>();
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].id, json!("fast"));

        let by_id = responses
            .into_iter()
            .map(|response| (response.id.to_string(), response))
            .collect::<HashMap<_, _>>();
        let slow = by_id["\"slow\""].result.clone().expect("slow result");
        assert_eq!(slow["isError"], false);
        let payload: Value =
            serde_json::from_str(slow["content"][0]["text"].as_str().expect("text"))
                .expect("payload json");
        assert_eq!(payload["results"][0]["text"], "pong");
    }

    #[test]
    fn server_is_shareable_across_tasks() {
        fn assert_send_sync<T: Send + Sync + Clone + 'static>() {}
        assert_send_sync::<McpServer>();
        let _ = Arc::new(server(Duration::ZERO));
    }
}
