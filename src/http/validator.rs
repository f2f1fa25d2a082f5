use crate::config::config;
use crate::http::HttpVersion;
use crate::http::request::HttpRequest;
use crate::http::status::HttpStatus;

pub enum ValidatorError {
    Error,
    HttpVersionNotSupported,
    MissingHost,
}

impl ValidatorError {
    pub fn into_http_status(self) -> HttpStatus {
        match self {
            ValidatorError::Error => HttpStatus::BadRequest,
            ValidatorError::HttpVersionNotSupported => HttpStatus::HttpVersionNotSupported,
            ValidatorError::MissingHost => HttpStatus::BadRequest,
        }
    }
}

pub struct Validator;

impl Validator {
    fn validate_http_version(v: (u8, u8)) -> Result<HttpVersion, ValidatorError> {
        match HttpVersion::is_valid(v) {
            Ok(http_v) => {
                if http_v <= config().http_version {
                    Ok(http_v)
                } else {
                    Err(ValidatorError::HttpVersionNotSupported)
                }
            }
            Err(_) => Err(ValidatorError::Error),
        }
    }

    /// Validates a fully parsed head, before any body is drained.
    ///
    /// Deliberately permissive beyond the version and `Host` checks: any
    /// method with any well-formed header set is answered, headers echoed
    /// back as-is.
    pub fn validate_request(req: &HttpRequest) -> Result<(), ValidatorError> {
        let version = Self::validate_http_version(req.http_version)?;

        // Host is mandatory from HTTP/1.1 on; earlier versions may omit it.
        if version >= HttpVersion::V1_1 && req.headers.get("host").is_none() {
            return Err(ValidatorError::MissingHost);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::init_test_config;
    use crate::http::HttpMethod;

    fn request(version: (u8, u8), host: Option<&str>) -> HttpRequest {
        let mut req = HttpRequest::new();
        req.method = HttpMethod::Get;
        req.path = "/".to_string();
        req.http_version = version;
        if let Some(host) = host {
            req.headers.append("Host", host);
        }
        req
    }

    #[test]
    fn accepts_http_1_1_with_host() {
        init_test_config();
        assert!(Validator::validate_request(&request((1, 1), Some("localhost"))).is_ok());
    }

    #[test]
    fn accepts_http_1_0_without_host() {
        init_test_config();
        assert!(Validator::validate_request(&request((1, 0), None)).is_ok());
    }

    #[test]
    fn rejects_http_1_1_without_host() {
        init_test_config();
        let err = Validator::validate_request(&request((1, 1), None)).unwrap_err();
        assert_eq!(err.into_http_status(), HttpStatus::BadRequest);
    }

    #[test]
    fn rejects_versions_above_the_configured_max() {
        init_test_config();
        let err = Validator::validate_request(&request((2, 0), Some("localhost"))).unwrap_err();
        assert_eq!(err.into_http_status(), HttpStatus::HttpVersionNotSupported);
    }

    #[test]
    fn rejects_unknown_versions() {
        init_test_config();
        let err = Validator::validate_request(&request((1, 7), Some("localhost"))).unwrap_err();
        assert_eq!(err.into_http_status(), HttpStatus::BadRequest);
    }
}
