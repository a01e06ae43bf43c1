use std::time::Duration;

use bytes::{BufMut, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};

use crate::config::DEFAULT_READ_TIMEOUT_MS;
use crate::device::{ActuatorCommand, DeviceSnapshot};
use crate::http::parser::{expected_request_len, parse_http_request};
use crate::http::request::Request;
use crate::http::writer::ResponseWriter;
use crate::router::Router;

/// One client connection, served exactly once and then closed.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    limit: usize,
    read_timeout: Duration,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter, ActuatorCommand),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// `limit` caps how many bytes of the request are ever read.
    pub fn new(stream: S, limit: usize) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(limit),
            limit,
            read_timeout: Duration::from_millis(DEFAULT_READ_TIMEOUT_MS),
            state: ConnectionState::Reading,
        }
    }

    /// Bounds the time spent waiting for request bytes.
    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    /// Reads one request, routes it and writes the response.
    ///
    /// Returns the command the handler asked for, or `NoChange` if the peer
    /// hung up without sending anything. A write failure is an error and
    /// the command is discarded with it.
    pub async fn serve(
        &mut self,
        router: &Router,
        snapshot: &DeviceSnapshot,
    ) -> anyhow::Result<ActuatorCommand> {
        let mut outcome = ActuatorCommand::NoChange;

        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    match self.read_request().await? {
                        Some(req) => {
                            self.state = ConnectionState::Processing(req);
                        }
                        None => {
                            tracing::debug!("Peer closed before sending a request");
                            self.state = ConnectionState::Closed;
                        }
                    }
                }

                ConnectionState::Processing(req) => {
                    let (response, command) = router.dispatch(req, snapshot);
                    tracing::debug!(
                        method = %req.method,
                        path = %req.path,
                        status = response.status.as_u16(),
                        ?command,
                        "Request handled"
                    );

                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Writing(writer, command);
                }

                ConnectionState::Writing(writer, command) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    outcome = *command;
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(outcome)
    }

    /// Fills the fixed-size buffer until the request looks complete, the
    /// buffer is full, the peer stops sending, or the read timeout expires.
    ///
    /// Complete means the header terminator arrived, plus `Content-Length`
    /// body bytes when the client declared one. The declared length only
    /// decides when to stop reading; the body handed to the parser is
    /// whatever was buffered. On timeout the buffered bytes are parsed the
    /// same way, so a stalled client cannot hold up the accept loop.
    ///
    /// Returns `None` only when nothing at all was received.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<Request>> {
        let filled = tokio::time::timeout(self.read_timeout, self.fill_buffer()).await;
        match filled {
            Ok(res) => res?,
            Err(_) => tracing::debug!(
                buffered = self.buffer.len(),
                "Read timed out, parsing what we have"
            ),
        }

        if self.buffer.is_empty() {
            return Ok(None);
        }

        let raw = self.buffer.split().freeze();
        Ok(Some(parse_http_request(&raw)))
    }

    async fn fill_buffer(&mut self) -> anyhow::Result<()> {
        loop {
            if let Some(expected) = expected_request_len(&self.buffer) {
                if self.buffer.len() >= expected {
                    return Ok(());
                }
            }

            let room = self.limit.saturating_sub(self.buffer.len());
            if room == 0 {
                tracing::debug!(limit = self.limit, "Read buffer full, parsing what we have");
                return Ok(());
            }

            let n = self
                .stream
                .read_buf(&mut (&mut self.buffer).limit(room))
                .await?;

            if n == 0 {
                return Ok(());
            }
        }
    }
}
