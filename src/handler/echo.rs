//! The echo responder.
//!
//! The one handler this server has: the response body is the JSON
//! serialization of the request's own header set, exactly as captured by the
//! parser (names lowercased, first-appearance order, values verbatim).

use tracing::error;

use crate::handler::responses;
use crate::http::request::HttpRequest;
use crate::http::response::{HttpResponse, ResponseHeader};
use crate::http::status::HttpStatus;

pub fn respond(req: &HttpRequest) -> HttpResponse {
    let body = match serde_json::to_vec(&req.headers) {
        Ok(body) => body,
        // Unreachable for a map of strings, but the handler must not panic.
        Err(err) => {
            error!(%err, "failed to serialize request headers");
            return responses::error(HttpStatus::InternalServerError);
        }
    };

    let mut res = HttpResponse::new();
    res.set_header(ResponseHeader::ContentType, "application/json");
    res.set_header(ResponseHeader::ContentLength, &body.len().to_string());
    res.body = body;
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn request_with(headers: &[(&str, &str)]) -> HttpRequest {
        let mut req = HttpRequest::new();
        for (name, value) in headers {
            req.headers.append(name, value);
        }
        req
    }

    #[test]
    fn reflects_headers_as_json() {
        let req = request_with(&[("Host", "localhost:8080"), ("X-Test", "abc")]);
        let res = respond(&req);

        assert_eq!(res.status, HttpStatus::Ok);
        assert_eq!(
            res.headers.get("Content-Type"),
            Some(&"application/json".to_string())
        );

        let body = String::from_utf8(res.body.clone()).unwrap();
        assert!(body.contains(r#""x-test":"abc""#));

        let parsed: Value = serde_json::from_slice(&res.body).unwrap();
        assert_eq!(parsed["host"], "localhost:8080");
        assert_eq!(parsed["x-test"], "abc");
        assert_eq!(parsed.as_object().unwrap().len(), 2);
    }

    #[test]
    fn host_only_request_echoes_exactly_one_header() {
        let req = request_with(&[("Host", "localhost")]);
        let res = respond(&req);

        let parsed: Value = serde_json::from_slice(&res.body).unwrap();
        let obj = parsed.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(obj["host"], "localhost");
    }

    #[test]
    fn content_length_matches_body() {
        let req = request_with(&[("Host", "a"), ("Accept", "*/*")]);
        let res = respond(&req);

        assert_eq!(
            res.headers.get("Content-Length"),
            Some(&res.body.len().to_string())
        );
    }

    #[test]
    fn value_case_is_preserved() {
        let req = request_with(&[("X-Mixed", "CaseSensitiveValue")]);
        let res = respond(&req);

        let body = String::from_utf8(res.body).unwrap();
        assert!(body.contains(r#""x-mixed":"CaseSensitiveValue""#));
    }
}
