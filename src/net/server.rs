//! Core HTTP server implementation.
//!
//! This module implements the low-level HTTP server runtime.
//! It is responsible only for networking concerns such as:
//! - accepting TCP connections,
//! - reading raw bytes from the network,
//! - writing raw bytes back to the client.
//!
//! Higher-level HTTP semantics—such as request parsing, validation,
//! and response generation—are delegated to the `http` and `handler`
//! namespaces.
//!
//! The server is fully asynchronous and leverages the `async-std` crate
//! to provide non-blocking I/O and concurrent client handling: one task
//! per accepted connection, no state shared between tasks.
//!
//! ## Request handling flow
//!
//! The lifecycle of a client connection is as follows:
//!
//! 1. Accept a TCP connection
//! 2. Read raw data from the stream, bounded by the configured read timeout
//! 3. Incrementally parse the data into an [`HttpRequest`]
//!    (delegated to [`http::parser::RequestParser`](crate::http::parser::RequestParser))
//! 4. Validate the request once the head is complete
//!    (delegated to [`http::validator::Validator`](crate::http::validator::Validator))
//! 5. Generate an [`HttpResponse`]
//!    (delegated to [`handler::handle_request`](crate::handler::handle_request))
//! 6. Serialize and write the response back to the client
//!
//! Parse and validation errors are mapped to HTTP error responses; I/O
//! errors and timeouts drop the connection. Each connection serves a single
//! request and is then closed.

use crate::config::config;
use crate::handler;
use crate::http::parser::{ParseError, ParseEvent, RequestParser};
use crate::http::request::HttpRequest;
use crate::http::response::HttpResponse;
use crate::http::validator::{Validator, ValidatorError};
use async_std::future::timeout;
use async_std::net::{TcpListener, TcpStream};
use async_std::prelude::*;
use async_std::task;
use std::net::SocketAddr;
use tracing::{debug, info, warn};

pub struct Server {
    listener: TcpListener,
}

/// Errors that can occur while reading and parsing an HTTP request from the
/// stream, used to interrupt the flow and select the appropriate response.
enum ReadError {
    Io(std::io::Error),
    ConnectionClosed,
    TimedOut,
    Parse(ParseError),
    Validator(ValidatorError),
}

impl Server {
    /// Binds the listening socket to the configured address and port.
    ///
    /// A bind failure (port in use, insufficient privileges) is fatal and
    /// propagates to the caller; there is no retry.
    pub async fn bind() -> std::io::Result<Server> {
        let listener = TcpListener::bind((config().address, config().port)).await?;
        Ok(Server { listener })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Runs indefinitely, accepting incoming TCP connections and spawning a
    /// new asynchronous task for each client.
    pub async fn run(&self) -> std::io::Result<()> {
        info!(address = %self.local_addr()?, "listening");

        while let Ok((stream, addr)) = self.listener.accept().await {
            debug!(peer = %addr, "accepted connection");
            task::spawn(Self::handle_client(stream));
        }

        Ok(())
    }

    /// Reads and incrementally parses an HTTP request from the TCP stream.
    ///
    /// Bytes are parsed as they become available. Once the head is read the
    /// request is validated; any declared body is then drained so the
    /// connection is quiescent before the response is written.
    async fn read_request(stream: &mut TcpStream) -> Result<HttpRequest, ReadError> {
        let mut parser = RequestParser::new();
        let mut req = HttpRequest::new();
        let mut buffer = vec![0; config().buffer_size];
        let mut event = ParseEvent::NeedMore;

        loop {
            match event {
                ParseEvent::NeedMore => {
                    let n = match timeout(config().read_timeout, stream.read(&mut buffer)).await {
                        Err(_) => return Err(ReadError::TimedOut),
                        Ok(Ok(0)) => return Err(ReadError::ConnectionClosed),
                        Ok(Ok(n)) => n,
                        Ok(Err(e)) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                        Ok(Err(e)) => return Err(ReadError::Io(e)),
                    };

                    event = parser
                        .feed(&buffer[..n], &mut req)
                        .map_err(ReadError::Parse)?;
                }
                ParseEvent::HeadersDone => {
                    // The head is complete. Validate before draining the body.
                    Validator::validate_request(&req).map_err(ReadError::Validator)?;

                    // Continue with any bytes the parser already buffered.
                    event = parser.feed(&[], &mut req).map_err(ReadError::Parse)?;
                }
                ParseEvent::Done => break,
            }
        }

        Ok(req)
    }

    /// Writes the given `HttpResponse` back to the TCP stream, bounded by
    /// the configured write timeout.
    async fn write_response(
        stream: &mut TcpStream,
        response: &HttpResponse,
    ) -> std::io::Result<()> {
        let write = async {
            stream.write_all(response.build_head().as_bytes()).await?;
            stream.write_all(&response.body).await?;
            stream.flush().await
        };

        timeout(config().write_timeout, write)
            .await
            .map_err(|_| std::io::Error::from(std::io::ErrorKind::TimedOut))?
    }

    /// Handles a single client connection.
    /// Reads the HTTP request, processes it via the handler, and writes back
    /// the response.
    async fn handle_client(mut stream: TcpStream) -> std::io::Result<()> {
        let response = match Self::read_request(&mut stream).await {
            Ok(req) => {
                info!(
                    method = req.method.as_str(),
                    path = %req.path,
                    headers = req.headers.len(),
                    "request"
                );
                handler::handle_request(&req)
            }
            Err(ReadError::Io(err)) => {
                warn!(%err, "I/O error while reading request");
                return Ok(());
            }
            Err(ReadError::ConnectionClosed) => return Ok(()),
            Err(ReadError::TimedOut) => {
                debug!("closing connection: read timed out");
                return Ok(());
            }
            Err(ReadError::Parse(err)) => handler::handle_error(err.into_http_status()),
            Err(ReadError::Validator(err)) => handler::handle_error(err.into_http_status()),
        };

        Self::write_response(&mut stream, &response).await
    }
}
