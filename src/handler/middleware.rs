//! Response post-processing applied to every reply, success or error.
//!
//! Stamps the headers that do not depend on the request: `Server`, `Date`
//! and `Connection`. The body is never touched; the echo contract is that
//! the client reads back exactly the JSON the handler produced.

use std::time::SystemTime;

use crate::config::config;
use crate::http::response::{HttpResponse, ResponseHeader};

pub fn apply(res: &mut HttpResponse) {
    res.set_header(ResponseHeader::Server, &config().server_name);
    res.set_header(ResponseHeader::Date, &httpdate::fmt_http_date(SystemTime::now()));

    // One request per connection
    res.set_header(ResponseHeader::Connection, "close");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::init_test_config;

    #[test]
    fn stamps_common_headers() {
        init_test_config();

        let mut res = HttpResponse::new();
        apply(&mut res);

        assert_eq!(res.headers.get("Server"), Some(&config().server_name));
        assert_eq!(res.headers.get("Connection"), Some(&"close".to_string()));

        // RFC 7231 IMF-fixdate, e.g. "Sun, 06 Nov 1994 08:49:37 GMT"
        let date = res.headers.get("Date").expect("Date header set");
        assert!(date.ends_with(" GMT"));
        assert!(httpdate::parse_http_date(date).is_ok());
    }
}
