//! TCP transport
//!
//! Each accepted connection gets its own task reading NDJSON requests.
//! Requests on one connection are answered in order. A line longer than
//! `max_line_bytes` is answered with an invalid-request error and the
//! connection is closed.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{watch, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, error, info, info_span, warn, Instrument};

use studex_core::errors::{ExError, ExErrorKind};
use studex_core_types::correlation::{RequestContext, TraceId};

use crate::config::ServerSettings;
use crate::handlers::{correlate, Handlers};
use crate::protocol::{error_codes, JsonRpcError, JsonRpcRequest, JsonRpcResponse};

pub struct Server {
    listener: TcpListener,
    handlers: Handlers,
    connections: Arc<Semaphore>,
    limits: ConnectionLimits,
}

#[derive(Debug, Clone, Copy)]
struct ConnectionLimits {
    request_timeout: Duration,
    max_line_bytes: usize,
}

impl Server {
    /// Bind the listener. Port 0 picks a free port; see [`Server::local_addr`].
    pub async fn bind(settings: &ServerSettings, handlers: Handlers) -> Result<Self> {
        let listener = TcpListener::bind(&settings.bind_addr)
            .await
            .with_context(|| format!("failed to bind {}", settings.bind_addr))?;

        Ok(Self {
            listener,
            handlers,
            connections: Arc::new(Semaphore::new(settings.max_connections)),
            limits: ConnectionLimits {
                request_timeout: settings.request_timeout(),
                max_line_bytes: settings.max_line_bytes,
            },
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until `shutdown` resolves, then wait for open connections to
    /// finish their in-flight request.
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let addr = self.local_addr()?;
        info!(%addr, "studex server listening");

        let (stop_tx, stop_rx) = watch::channel(false);
        let mut tasks = JoinSet::new();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                accepted = self.listener.accept() => {
                    let (stream, peer) = match accepted {
                        Ok(pair) => pair,
                        Err(e) => {
                            warn!(error = %e, "accept failed");
                            continue;
                        }
                    };

                    let Ok(permit) = Arc::clone(&self.connections).try_acquire_owned() else {
                        warn!(%peer, "connection limit reached");
                        tasks.spawn(reject_busy(stream));
                        continue;
                    };

                    let handlers = self.handlers.clone();
                    let limits = self.limits;
                    let stop_rx = stop_rx.clone();
                    tasks.spawn(async move {
                        if let Err(e) = serve_connection(stream, peer, handlers, limits, stop_rx).await {
                            debug!(%peer, error = %e, "connection closed with error");
                        }
                        drop(permit);
                    });
                }
                _ = &mut shutdown => {
                    info!("shutdown requested");
                    break;
                }
            }

            // reap finished connections
            while let Some(joined) = tasks.try_join_next() {
                if let Err(e) = joined {
                    error!(error = %e, "connection task failed");
                }
            }
        }

        let _ = stop_tx.send(true);
        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                error!(error = %e, "connection task failed");
            }
        }
        info!("studex server stopped");
        Ok(())
    }
}

async fn reject_busy(mut stream: TcpStream) {
    let response = JsonRpcResponse::error(None, error_codes::SERVER_BUSY, "Server busy");
    let _ = write_response(&mut stream, &response).await;
    let _ = stream.shutdown().await;
}

/// One read from the connection
enum Frame {
    Line(Vec<u8>),
    TooLong,
    Eof,
}

/// Read up to and including the next newline, never buffering more than
/// `max_len + 1` bytes
async fn read_frame<R>(reader: &mut R, buf: &mut Vec<u8>, max_len: usize) -> std::io::Result<Frame>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    // room for the line plus its newline
    let limit = max_len as u64 + 1;
    let n = (&mut *reader).take(limit).read_until(b'\n', buf).await?;
    if n == 0 {
        return Ok(Frame::Eof);
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    } else if buf.len() > max_len {
        return Ok(Frame::TooLong);
    }
    Ok(Frame::Line(std::mem::take(buf)))
}

async fn serve_connection(
    stream: TcpStream,
    peer: SocketAddr,
    handlers: Handlers,
    limits: ConnectionLimits,
    mut stop_rx: watch::Receiver<bool>,
) -> Result<()> {
    let trace_id = TraceId::new();
    let span = info_span!("connection", %peer, trace_id = %trace_id);

    async move {
        debug!("connection opened");
        let (reader, mut writer) = stream.into_split();
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();

        loop {
            let frame = tokio::select! {
                frame = read_frame(&mut reader, &mut buf, limits.max_line_bytes) => frame?,
                _ = stop_rx.changed() => break,
            };

            let line = match frame {
                Frame::Line(bytes) => bytes,
                Frame::Eof => break,
                Frame::TooLong => {
                    warn!(max_line_bytes = limits.max_line_bytes, "request line too long");
                    let response = JsonRpcResponse::error(
                        None,
                        error_codes::INVALID_REQUEST,
                        format!("Request line exceeds {} bytes", limits.max_line_bytes),
                    );
                    write_response(&mut writer, &response).await?;
                    writer.shutdown().await?;
                    break;
                }
            };

            let line = String::from_utf8_lossy(&line);
            if line.trim().is_empty() {
                continue;
            }

            let ctx = RequestContext::child_of(&trace_id).with_peer(peer.to_string());
            let span = info_span!(
                "request",
                request_id = %ctx.request_id,
                peer = ctx.peer.as_deref().unwrap_or("-"),
            );
            let response = handle_request(&handlers, &line, &ctx, limits.request_timeout)
                .instrument(span)
                .await;

            if let Some(response) = response {
                write_response(&mut writer, &response).await?;
            }
        }

        debug!("connection closed");
        Ok::<(), anyhow::Error>(())
    }
    .instrument(span)
    .await
}

async fn handle_request(
    handlers: &Handlers,
    line: &str,
    ctx: &RequestContext,
    request_timeout: Duration,
) -> Option<JsonRpcResponse> {
    let start = Instant::now();
    match tokio::time::timeout(request_timeout, handlers.handle_line(line, ctx)).await {
        Ok(response) => {
            debug!(duration_ms = start.elapsed().as_millis() as u64, "request handled");
            response
        }
        Err(_) => {
            warn!(
                timeout_ms = request_timeout.as_millis() as u64,
                "request timed out"
            );
            // Only a parsed request can time out; notifications stay silent
            let request = serde_json::from_str::<JsonRpcRequest>(line).ok()?;
            let id = request.id?;
            let err = correlate(
                ExError::new(ExErrorKind::Timeout)
                    .with_op(request.method)
                    .with_message("Request timed out"),
                ctx,
            );
            Some(JsonRpcResponse::from_error(
                Some(id),
                JsonRpcError::from_ex_error(&err),
            ))
        }
    }
}

async fn write_response<W>(writer: &mut W, response: &JsonRpcResponse) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut payload = serde_json::to_vec(response)?;
    payload.push(b'\n');
    writer.write_all(&payload).await?;
    writer.flush().await?;
    Ok(())
}
