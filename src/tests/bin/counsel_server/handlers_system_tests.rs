use axum::http::{HeaderMap, HeaderValue};

use super::*;

fn headers(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(value).expect("header value"),
    );
    headers
}

#[test]
fn bearer_token_is_extracted() {
    assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")), Some("abc.def.ghi"));
    assert_eq!(bearer_token(&headers("Bearer  abc ")), Some("abc"));
}

#[test]
fn non_bearer_or_empty_authorization_is_ignored() {
    assert_eq!(bearer_token(&HeaderMap::new()), None);
    assert_eq!(bearer_token(&headers("Basic dXNlcjpwdw==")), None);
    assert_eq!(bearer_token(&headers("bearer abc")), None);
    assert_eq!(bearer_token(&headers("Bearer ")), None);
}
