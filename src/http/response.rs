use crate::http::headers::HttpHeaders;
use crate::http::status::HttpStatus;

/// Response headers this server emits.
/// Acts as a safe wrapper around [`HttpHeaders::set_raw`], keeping the
/// exact-case names in one place.
pub enum ResponseHeader {
    ContentLength,
    ContentType,
    Connection,
    Server,
    Date,
}

pub struct HttpResponse {
    pub status: HttpStatus,
    pub headers: HttpHeaders,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new() -> Self {
        Self {
            status: HttpStatus::Ok,
            headers: HttpHeaders::new(),
            body: Vec::new(),
        }
    }

    pub fn set_header(&mut self, h: ResponseHeader, value: &str) {
        let name = match h {
            ResponseHeader::ContentType => "Content-Type",
            ResponseHeader::ContentLength => "Content-Length",
            ResponseHeader::Connection => "Connection",
            ResponseHeader::Server => "Server",
            ResponseHeader::Date => "Date",
        };

        self.headers.set_raw(name, value);
    }

    /// Serializes the response head:
    ///
    /// ```text
    /// HTTP/1.1 <status> <reason>\r\n
    /// <header_name>: <header_value>\r\n
    /// ...
    /// \r\n
    /// ```
    ///
    /// The body is written separately by the server.
    pub fn build_head(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\n{}\r\n",
            self.status as usize,
            self.status.reason(),
            self.headers.stringify(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_contains_status_line_and_headers() {
        let mut res = HttpResponse::new();
        res.set_header(ResponseHeader::ContentType, "application/json");
        res.set_header(ResponseHeader::ContentLength, "2");

        let head = res.build_head();
        assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(head.contains("Content-Type: application/json\r\n"));
        assert!(head.contains("Content-Length: 2\r\n"));
        assert!(head.ends_with("\r\n\r\n"));
    }

    #[test]
    fn error_status_line_carries_reason() {
        let mut res = HttpResponse::new();
        res.status = HttpStatus::HttpVersionNotSupported;

        assert!(
            res.build_head()
                .starts_with("HTTP/1.1 505 HTTP Version Not Supported\r\n")
        );
    }
}
