mod echo;
mod middleware;
mod responses;

use crate::http::request::HttpRequest;
use crate::http::response::HttpResponse;
use crate::http::status::HttpStatus;

/// Produces the response for a fully parsed, validated request.
///
/// There is no routing: every request, whatever its method or path, is
/// answered by the echo responder.
pub fn handle_request(req: &HttpRequest) -> HttpResponse {
    let mut res = echo::respond(req);
    middleware::apply(&mut res);
    res
}

pub fn handle_error(err: HttpStatus) -> HttpResponse {
    let mut res = responses::error(err);
    middleware::apply(&mut res);
    res
}
