//! HTTP headers abstraction for [`HttpRequest`](crate::http::request::HttpRequest) and
//! [`HttpResponse`](crate::http::response::HttpResponse)
//!
//! Headers are stored in an ordered map so that a request's header set can be
//! reflected back in the order the client sent it.
//!
//! The two directions have different insertion rules:
//! - [`HttpHeaders::append`] is the request path: names are lowercased,
//!   value case is preserved, and a repeated name is joined onto the existing
//!   entry with `", "` at its original position.
//! - [`HttpHeaders::set_raw`] is the response path: names keep their exact
//!   case and a repeated set replaces the previous value.
//!
//! The map serializes with `serde` into a JSON object, one member per header,
//! in insertion order. This is the response body of the echo handler.

use indexmap::IndexMap;
use serde::ser::{Serialize, Serializer};

#[derive(Debug)]
pub struct HttpHeaders {
    headers: IndexMap<String, String>,
}

impl HttpHeaders {
    pub fn new() -> Self {
        Self {
            headers: IndexMap::new(),
        }
    }

    /// Records a header received on the wire.
    ///
    /// The name is lowercased; the value is kept verbatim. If the name was
    /// already recorded, the new value is appended to the existing one,
    /// separated by `", "`.
    pub fn append(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        match self.headers.get_mut(&name) {
            Some(existing) => {
                existing.push_str(", ");
                existing.push_str(value);
            }
            None => {
                self.headers.insert(name, value.to_string());
            }
        }
    }

    /// Sets a header with its exact name, replacing any previous value.
    pub fn set_raw(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_string(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&String> {
        self.headers.get(name)
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.headers.iter()
    }

    /// Serializes the headers into their wire form, one `name: value` line
    /// per entry, each terminated by CRLF.
    pub fn stringify(&self) -> String {
        let mut result = String::new();
        for (name, value) in &self.headers {
            result.push_str(&format!("{}: {}\r\n", name, value));
        }
        result
    }
}

impl Serialize for HttpHeaders {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_lowercases_names_and_keeps_value_case() {
        let mut headers = HttpHeaders::new();
        headers.append("X-Test", "AbC");

        assert_eq!(headers.get("x-test"), Some(&"AbC".to_string()));
        assert_eq!(headers.get("X-Test"), None);
    }

    #[test]
    fn append_preserves_insertion_order() {
        let mut headers = HttpHeaders::new();
        headers.append("Host", "localhost");
        headers.append("Accept", "*/*");
        headers.append("X-Test", "abc");

        let names: Vec<&String> = headers.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["host", "accept", "x-test"]);
    }

    #[test]
    fn repeated_name_joins_in_place() {
        let mut headers = HttpHeaders::new();
        headers.append("Host", "localhost");
        headers.append("X-Tag", "a");
        headers.append("Accept", "*/*");
        headers.append("x-tag", "b");

        assert_eq!(headers.get("x-tag"), Some(&"a, b".to_string()));
        let names: Vec<&String> = headers.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["host", "x-tag", "accept"]);
    }

    #[test]
    fn set_raw_keeps_case_and_replaces() {
        let mut headers = HttpHeaders::new();
        headers.set_raw("Content-Type", "text/plain");
        headers.set_raw("Content-Type", "application/json");

        assert_eq!(headers.len(), 1);
        assert_eq!(
            headers.get("Content-Type"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn stringify_produces_crlf_lines() {
        let mut headers = HttpHeaders::new();
        headers.set_raw("Content-Type", "application/json");
        headers.set_raw("Content-Length", "2");

        assert_eq!(
            headers.stringify(),
            "Content-Type: application/json\r\nContent-Length: 2\r\n"
        );
    }

    #[test]
    fn serializes_to_ordered_json_object() {
        let mut headers = HttpHeaders::new();
        headers.append("Host", "localhost:8080");
        headers.append("X-Test", "abc");

        let json = serde_json::to_string(&headers).unwrap();
        assert_eq!(json, r#"{"host":"localhost:8080","x-test":"abc"}"#);
    }
}
