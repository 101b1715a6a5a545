//! Ollama-backed rewrite oracle.
//!
//! Talks to the `/api/generate` endpoint of a local Ollama server. Streaming
//! responses arrive as newline-delimited JSON objects, each carrying a
//! `response` fragment, until one has `done: true`.
//!
//! # Examples
//!
//! ```no_run
//! use rephrase::rewrite::{RewriteConfig, RewriteOracle, RewriteRequest};
//! use rephrase::rewrite::ollama::OllamaClient;
//!
//! # async fn example() -> rephrase::error::Result<()> {
//! let config = RewriteConfig::default();
//! let client = OllamaClient::new(&config)?;
//!
//! let request = RewriteRequest::humanize("The results were obtained by the team.", &config);
//! let rewritten = client.rewrite(&request).await?;
//! println!("{rewritten}");
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use futures::{Stream, StreamExt, stream};
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{RephraseError, Result, RewriteError};
use crate::rewrite::{ChunkStream, RewriteConfig, RewriteOracle, RewriteRequest};

/// Request body for `/api/generate`.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: u32,
}

/// One response object (the whole answer, or one streamed line).
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Client for a local Ollama server.
#[derive(Clone, Debug)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    timeout_secs: u64,
}

impl OllamaClient {
    /// Create a client for the server and timeout in `config`.
    pub fn new(config: &RewriteConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RewriteError::Transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(OllamaClient {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }

    /// Send a generate request and check the status line.
    async fn send(&self, request: &RewriteRequest, stream: bool) -> Result<reqwest::Response> {
        let body = GenerateRequest {
            model: &request.model,
            prompt: &request.prompt,
            stream,
            options: GenerateOptions {
                temperature: request.temperature,
                num_predict: request.max_tokens,
            },
        };

        debug!(
            "POST {} (model {}, stream {stream}, {} prompt bytes)",
            self.endpoint(),
            request.model,
            request.prompt.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .map_err(|e| classify(e, &self.base_url, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RewriteError::Status {
                code: status.as_u16(),
                body,
            }
            .into());
        }

        Ok(response)
    }
}

#[async_trait]
impl RewriteOracle for OllamaClient {
    async fn rewrite(&self, request: &RewriteRequest) -> Result<String> {
        let response = self.send(request, false).await?;
        let text = response
            .text()
            .await
            .map_err(|e| classify(e, &self.base_url, self.timeout_secs))?;

        let parsed: GenerateResponse = serde_json::from_str(&text).map_err(|e| {
            RewriteError::MalformedResponse(format!("Failed to parse response: {e}. Response text: {text}"))
        })?;
        if let Some(error) = parsed.error {
            return Err(RewriteError::MalformedResponse(error).into());
        }

        parsed
            .response
            .map(|text| text.trim().to_string())
            .ok_or_else(|| RewriteError::MalformedResponse("No 'response' field in reply".to_string()).into())
    }

    async fn rewrite_stream(&self, request: &RewriteRequest) -> Result<ChunkStream> {
        let response = self.send(request, true).await?;
        Ok(ndjson_chunks(
            Box::pin(response.bytes_stream()),
            self.base_url.clone(),
            self.timeout_secs,
        ))
    }

    fn name(&self) -> &'static str {
        "ollama"
    }
}

/// Map a transport error onto the rewrite error taxonomy.
fn classify(error: reqwest::Error, url: &str, timeout_secs: u64) -> RephraseError {
    let error = if error.is_timeout() {
        RewriteError::TimedOut {
            seconds: timeout_secs,
        }
    } else if error.is_connect() {
        RewriteError::ConnectionRefused {
            url: url.to_string(),
        }
    } else if error.is_decode() {
        RewriteError::MalformedResponse(error.to_string())
    } else {
        RewriteError::Transport(error.to_string())
    };
    error.into()
}

/// Parse one NDJSON line. Blank lines yield `None`.
fn parse_line(line: &[u8]) -> Result<Option<GenerateResponse>> {
    let line = String::from_utf8_lossy(line);
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let parsed: GenerateResponse = serde_json::from_str(line)
        .map_err(|e| RewriteError::MalformedResponse(format!("Bad stream line '{line}': {e}")))?;
    if let Some(error) = parsed.error {
        return Err(RewriteError::MalformedResponse(error).into());
    }
    Ok(Some(parsed))
}

struct LineReader<S> {
    bytes: S,
    buffer: Vec<u8>,
    exhausted: bool,
    done: bool,
    url: String,
    timeout_secs: u64,
}

impl<S> LineReader<S> {
    fn next_line(&mut self) -> Option<Vec<u8>> {
        let end = self.buffer.iter().position(|&b| b == b'\n')?;
        let line: Vec<u8> = self.buffer.drain(..=end).collect();
        Some(line)
    }
}

/// Turn a byte stream of NDJSON lines into text chunks, ending at `done`.
fn ndjson_chunks<S, B>(bytes: S, url: String, timeout_secs: u64) -> ChunkStream
where
    S: Stream<Item = reqwest::Result<B>> + Unpin + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
{
    let reader = LineReader {
        bytes,
        buffer: Vec::new(),
        exhausted: false,
        done: false,
        url,
        timeout_secs,
    };

    Box::pin(stream::unfold(reader, |mut reader| async move {
        loop {
            if reader.done {
                return None;
            }

            if let Some(line) = reader.next_line() {
                match parse_line(&line) {
                    Ok(None) => continue,
                    Ok(Some(chunk)) => {
                        reader.done = chunk.done;
                        match chunk.response {
                            Some(text) if !text.is_empty() => return Some((Ok(text), reader)),
                            _ => continue,
                        }
                    }
                    Err(e) => {
                        reader.done = true;
                        return Some((Err(e), reader));
                    }
                }
            }

            if reader.exhausted {
                // Out of bytes without a `done` line: the generation was cut off.
                reader.done = true;
                let error = RewriteError::MalformedResponse(format!(
                    "Stream from {} ended before the final chunk",
                    reader.url
                ));
                return Some((Err(error.into()), reader));
            }

            match reader.bytes.next().await {
                Some(Ok(bytes)) => reader.buffer.extend_from_slice(bytes.as_ref()),
                Some(Err(e)) => {
                    reader.done = true;
                    let error = classify(e, &reader.url, reader.timeout_secs);
                    return Some((Err(error), reader));
                }
                None => {
                    // Flush a final line that lacks its newline.
                    reader.exhausted = true;
                    if !reader.buffer.is_empty() {
                        reader.buffer.push(b'\n');
                    }
                }
            }
        }
    }))
}
