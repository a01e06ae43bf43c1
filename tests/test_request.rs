use sensorlink::http::request::{Method, Request, RequestBuilder};
use std::collections::HashMap;

#[test]
fn test_request_header_retrieval_is_case_insensitive() {
    let mut headers = HashMap::new();
    headers.insert("host".to_string(), "sensor.local".to_string());
    headers.insert("content-type".to_string(), "application/json".to_string());

    let req = Request {
        method: Method::GET,
        path: "/".to_string(),
        version: "HTTP/1.1".to_string(),
        headers,
        body: vec![],
    };

    assert_eq!(req.header("Host"), Some("sensor.local"));
    assert_eq!(req.header("CONTENT-TYPE"), Some("application/json"));
    assert_eq!(req.content_type(), Some("application/json"));
    assert_eq!(req.header("Missing"), None);
}

#[test]
fn test_request_builder_lowercases_header_keys() {
    let req = RequestBuilder::new()
        .method(Method::POST)
        .path("/led")
        .header("Content-Type", "text/plain")
        .body("1")
        .build()
        .unwrap();

    assert!(req.headers.contains_key("content-type"));
    assert_eq!(req.content_type(), Some("text/plain"));
    assert_eq!(req.version, "HTTP/1.1");
    assert_eq!(req.body, b"1".to_vec());
}

#[test]
fn test_request_builder_requires_method_and_path() {
    assert!(RequestBuilder::new().path("/").build().is_err());
    assert!(RequestBuilder::new().method(Method::GET).build().is_err());
}

#[test]
fn test_request_method_from_string() {
    assert_eq!(Method::from_str("GET"), Some(Method::GET));
    assert_eq!(Method::from_str("POST"), Some(Method::POST));
    assert_eq!(Method::from_str("INVALID"), None);
    assert_eq!(Method::from_str("get"), None); // Case-sensitive
}

#[test]
fn test_request_method_from_token_keeps_unknown() {
    assert_eq!(Method::from_token("DELETE"), Method::DELETE);
    assert_eq!(Method::from_token("get"), Method::Other("get".to_string()));
    assert_eq!(Method::from_token("get").as_str(), "get");
    assert_eq!(Method::PATCH.to_string(), "PATCH");
}
