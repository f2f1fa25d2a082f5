use crate::http::response::{HttpResponse, ResponseHeader};
use crate::http::status::HttpStatus;

/// Builds the response for a failed request.
///
/// The service speaks JSON on every path, so errors carry a small JSON body
/// with the reason phrase instead of an empty one.
pub fn error(status: HttpStatus) -> HttpResponse {
    let mut res = HttpResponse::new();
    res.status = status;

    let body = format!("{{\"error\":\"{}\"}}", status.reason()).into_bytes();
    res.set_header(ResponseHeader::ContentType, "application/json");
    res.set_header(ResponseHeader::ContentLength, &body.len().to_string());

    res.body = body;
    res
}
