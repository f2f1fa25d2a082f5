use crate::config::config;
use crate::http::request::HttpRequest;
use crate::http::status::HttpStatus;
use crate::http::*;

/// Parse failures, mapped to HTTP statuses at the server boundary.
#[derive(PartialEq, Debug)]
pub enum ParseError {
    // 400 Bad Request
    Malformed,

    // 413 Payload Too Large
    PayloadTooLarge,

    // 414 URI Too Long
    UriTooLong,

    // 431 Request Header Fields Too Large
    HeadersTooLarge,
}

impl ParseError {
    pub fn into_http_status(self) -> HttpStatus {
        match self {
            ParseError::Malformed => HttpStatus::BadRequest,
            ParseError::PayloadTooLarge => HttpStatus::PayloadTooLarge,
            ParseError::UriTooLong => HttpStatus::UriTooLong,
            ParseError::HeadersTooLarge => HttpStatus::HeaderFieldsTooLarge,
        }
    }
}

/// Progress reported by [`RequestParser::feed`].
#[derive(PartialEq, Debug)]
pub enum ParseEvent {
    /// More bytes are needed to make progress.
    NeedMore,
    /// The head is fully parsed; the request can be validated.
    /// Any declared body still has to be drained.
    HeadersDone,
    /// The request is complete.
    Done,
}

#[derive(PartialEq, PartialOrd)]
enum ParserState {
    RequestLine,
    Headers,
    Body,
    Done,
}

/// Incremental push parser for a request.
///
/// Bytes are fed in as the socket produces them; the parser buffers what it
/// cannot consume yet and advances a request-line → headers → body state
/// machine. The body, when one is declared via `Content-Length`, is counted
/// and discarded rather than stored: this server only consumes headers, the
/// drain just leaves the connection quiescent before the response.
pub struct RequestParser {
    buf: Vec<u8>,
    state: ParserState,
    body_remaining: usize,
}

impl RequestParser {
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            state: ParserState::RequestLine,
            body_remaining: 0,
        }
    }

    fn parse_request_line(&mut self, req: &mut HttpRequest) -> Result<bool, ParseError> {
        // Look for end of request line \r\n
        let line_end = match find_crlf(&self.buf) {
            Some(i) => i,
            None => return Ok(false),
        };

        // Request line: METHOD PATH HTTP/VERSION
        let line = &self.buf[..line_end];
        let parts: Vec<&[u8]> = line.split(|&b| b == b' ').collect();
        if parts.len() != 3 {
            return Err(ParseError::Malformed);
        }

        if parts[0].len() > HTTP_METHOD_MAX_LEN {
            return Err(ParseError::Malformed);
        }

        let method = std::str::from_utf8(parts[0]).unwrap_or("").to_uppercase();
        let method = match http_method_from_str(&method) {
            HttpMethod::Unknown => return Err(ParseError::Malformed),
            m => m,
        };

        let path = std::str::from_utf8(parts[1]).unwrap_or("");
        if path.is_empty() {
            return Err(ParseError::Malformed);
        }
        if path.len() > config().max_path_size {
            return Err(ParseError::UriTooLong);
        }

        let version = std::str::from_utf8(parts[2]).unwrap_or("");
        let http_version = version
            .strip_prefix("HTTP/")
            .and_then(|v| v.split_once('.'))
            .and_then(|(maj, min)| Some((maj.parse::<u8>().ok()?, min.parse::<u8>().ok()?)))
            .ok_or(ParseError::Malformed)?;

        req.method = method;
        req.path = path.to_string();
        req.http_version = http_version;

        // Successfully parsed request line
        // Update parser state and remove the parsed line from the buffer
        self.buf.drain(..line_end + 2);
        self.state = ParserState::Headers;
        Ok(true)
    }

    fn parse_headers(&mut self, req: &mut HttpRequest) -> Result<bool, ParseError> {
        // Empty line right away: a head with no headers at all
        if self.buf.starts_with(b"\r\n") {
            self.buf.drain(..2);
            return self.begin_body(req).map(|_| true);
        }

        // Look for end of headers \r\n\r\n
        let block_end = match find_double_crlf(&self.buf) {
            Some(i) => i,
            None => return Ok(false),
        };

        if block_end > config().max_header_size {
            return Err(ParseError::HeadersTooLarge);
        }

        // Parse headers line by line; every header is captured, since the
        // whole set is the response payload.
        let block = &self.buf[..block_end];
        for line in block.split(|&b| b == b'\n') {
            let line = line.strip_suffix(b"\r").unwrap_or(line);
            if line.is_empty() {
                continue;
            }

            let colon = match line.iter().position(|&b| b == b':') {
                Some(i) => i,
                None => return Err(ParseError::Malformed),
            };

            let name = std::str::from_utf8(&line[..colon]).unwrap_or("").trim();
            let value = std::str::from_utf8(&line[colon + 1..]).unwrap_or("").trim();
            if name.is_empty() {
                return Err(ParseError::Malformed);
            }

            req.headers.append(name, value);
        }

        // Successfully parsed headers
        // Remove the block and its terminating \r\n\r\n from the buffer
        self.buf.drain(..block_end + 4);
        self.begin_body(req).map(|_| true)
    }

    /// Decides how much body must be drained once the head is complete.
    fn begin_body(&mut self, req: &HttpRequest) -> Result<(), ParseError> {
        self.body_remaining = match req.headers.get("content-length") {
            Some(v) => {
                let n = v.parse::<usize>().map_err(|_| ParseError::Malformed)?;
                if n > config().max_body_size {
                    return Err(ParseError::PayloadTooLarge);
                }
                n
            }
            None => 0,
        };

        self.state = ParserState::Body;
        Ok(())
    }

    fn drain_body(&mut self) -> ParseEvent {
        let consumed = self.body_remaining.min(self.buf.len());
        self.buf.drain(..consumed);
        self.body_remaining -= consumed;

        if self.body_remaining > 0 {
            return ParseEvent::NeedMore;
        }

        self.state = ParserState::Done;
        ParseEvent::Done
    }

    pub fn feed(&mut self, bytes: &[u8], req: &mut HttpRequest) -> Result<ParseEvent, ParseError> {
        self.buf.extend_from_slice(bytes);

        // Cap the head while it is still accumulating, so an endless
        // request line or header block cannot grow the buffer unboundedly.
        if self.state < ParserState::Body && self.buf.len() > config().max_header_size {
            return Err(ParseError::HeadersTooLarge);
        }

        // Iteratively parse based on the current state while data is available
        loop {
            match self.state {
                ParserState::RequestLine => {
                    if !self.parse_request_line(req)? {
                        return Ok(ParseEvent::NeedMore);
                    }
                }
                ParserState::Headers => {
                    if !self.parse_headers(req)? {
                        return Ok(ParseEvent::NeedMore);
                    }

                    // Pause here: the caller validates the request before
                    // the body is drained.
                    return Ok(ParseEvent::HeadersDone);
                }
                ParserState::Body => return Ok(self.drain_body()),
                ParserState::Done => return Ok(ParseEvent::Done),
            }
        }
    }
}

/// Position of the first `\r\n` in `buf`.
fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\r\n")
}

/// Position of the first `\r\n\r\n` in `buf`.
fn find_double_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}
