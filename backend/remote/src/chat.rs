use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use futures::StreamExt;
use serde::Serialize;
use tracing::{debug, trace, warn};

use kiteforge_core::{ChatClient, EgressConfig, KiteError};

use crate::http::HttpClientCache;
use crate::sse::text_deltas;

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    stream: bool,
}

/// Chat client speaking the streaming `{message, stream: true}` protocol.
pub struct SseChatClient {
    http: Arc<HttpClientCache>,
}

impl SseChatClient {
    pub fn new(http: Arc<HttpClientCache>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ChatClient for SseChatClient {
    async fn query(
        &self,
        egress: Option<&EgressConfig>,
        endpoint_url: &str,
        prompt: &str,
    ) -> Result<String, KiteError> {
        let start = Instant::now();
        let client = self.http.client_for(egress).await?;

        debug!(endpoint = %endpoint_url, "Sending chat query");

        let response = client
            .post(endpoint_url)
            .header("Accept", "text/event-stream")
            .json(&ChatRequest {
                message: prompt,
                stream: true,
            })
            .send()
            .await
            .map_err(|e| KiteError::transport("chat query", e))?;

        // The body of an error response is still scanned for frames; it
        // usually yields nothing and the reply is simply empty.
        let status = response.status();
        if !status.is_success() {
            warn!(endpoint = %endpoint_url, status = %status, "Chat endpoint returned non-success status");
        }

        let mut deltas = Box::pin(text_deltas(response.bytes_stream()));
        let mut reply = String::new();
        while let Some(delta) = deltas.next().await {
            let delta = delta.map_err(|e| KiteError::transport("chat stream", e))?;
            trace!(delta = %delta, "Chat delta");
            reply.push_str(&delta);
        }

        debug!(
            endpoint = %endpoint_url,
            chars = reply.len(),
            latency_ms = start.elapsed().as_millis() as u64,
            "Chat reply assembled"
        );
        Ok(reply.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sse_body(parts: &[&str]) -> String {
        let mut body = String::new();
        for part in parts {
            body.push_str(&format!(
                "data: {}\n\n",
                serde_json::json!({"choices": [{"delta": {"content": part}}]})
            ));
        }
        body.push_str("data: [DONE]\n\n");
        body
    }

    #[tokio::test]
    async fn assembles_and_trims_streamed_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/main"))
            .and(header("accept", "text/event-stream"))
            .and(body_json(serde_json::json!({"message": "hi", "stream": true})))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/event-stream")
                    .set_body_string(sse_body(&["  Hello", ", ", "world  "])),
            )
            .mount(&server)
            .await;

        let client = SseChatClient::new(Arc::new(HttpClientCache::default()));
        let reply = client
            .query(None, &format!("{}/main", server.uri()), "hi")
            .await
            .unwrap();
        assert_eq!(reply, "Hello, world");
    }

    #[tokio::test]
    async fn malformed_frames_do_not_fail_the_query() {
        let server = MockServer::start().await;
        let body = format!("data: {{broken\n\n{}", sse_body(&["fine"]));
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;

        let client = SseChatClient::new(Arc::new(HttpClientCache::default()));
        let reply = client.query(None, &server.uri(), "q").await.unwrap();
        assert_eq!(reply, "fine");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_transport_error() {
        let client = SseChatClient::new(Arc::new(HttpClientCache::default()));
        let err = client
            .query(None, "http://127.0.0.1:9/main", "q")
            .await
            .unwrap_err();
        assert!(err.rotates_egress());
    }
}
