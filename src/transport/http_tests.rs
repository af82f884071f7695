//! Tests for the request and response value types.

use std::sync::Arc;
use std::time::Duration;

use http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use url::Url;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

fn base() -> Url {
    Url::parse("https://api.ai-agent-mesh.com/v3/agents").unwrap()
}

fn reply(status: StatusCode, body: &[u8]) -> HttpResponse {
    HttpResponse::new(status, HeaderMap::new(), body.to_vec())
}

fn reply_with_retry_after(value: &'static str) -> HttpResponse {
    let mut headers = HeaderMap::new();
    headers.insert(header::RETRY_AFTER, HeaderValue::from_static(value));
    HttpResponse::new(StatusCode::TOO_MANY_REQUESTS, headers, Vec::new())
}

mod request_builder {
    use super::*;

    #[test]
    fn starts_bare() {
        let req = HttpRequest::new(Method::PATCH, base());

        assert_eq!(req.method, Method::PATCH);
        assert_eq!(req.url.path(), "/v3/agents");
        assert!(req.headers.is_empty());
        assert_eq!(req.body, None);
        assert_eq!(req.timeout, None);
    }

    #[test]
    fn shorthand_constructors() {
        assert_eq!(HttpRequest::get(base()).method, Method::GET);
        assert_eq!(HttpRequest::post(base()).method, Method::POST);
    }

    #[test]
    fn body_and_timeout() {
        let req = HttpRequest::post(base())
            .with_body(br#"{"name":"bot"}"#.to_vec())
            .with_timeout(Duration::from_secs(5));

        assert_eq!(req.body.as_deref(), Some(br#"{"name":"bot"}"#.as_slice()));
        assert_eq!(req.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn repeated_header_keeps_both_values() {
        let req = HttpRequest::get(base())
            .with_header(header::ACCEPT, HeaderValue::from_static("text/plain"))
            .with_header(header::ACCEPT, HeaderValue::from_static("application/json"));

        let values: Vec<_> = req.headers.get_all(header::ACCEPT).iter().collect();
        assert_eq!(values, ["text/plain", "application/json"]);
    }

    #[test]
    fn header_map_replaces_earlier_headers() {
        let mut map = HeaderMap::new();
        map.insert(header::USER_AGENT, HeaderValue::from_static("mesh-sdk"));

        let req = HttpRequest::get(base())
            .with_header(header::ACCEPT, HeaderValue::from_static("*/*"))
            .with_headers(map);

        assert!(!req.headers.contains_key(header::ACCEPT));
        assert_eq!(req.headers[header::USER_AGENT], "mesh-sdk");
    }
}

mod response {
    use super::*;

    #[test]
    fn success_means_2xx() {
        assert!(reply(StatusCode::CREATED, b"").is_success());
        assert!(reply(StatusCode::NO_CONTENT, b"").is_success());
        assert!(!reply(StatusCode::NOT_MODIFIED, b"").is_success());
        assert!(!reply(StatusCode::CONFLICT, b"").is_success());
    }

    #[test]
    fn text_views_of_the_body() {
        let valid = reply(StatusCode::OK, b"ok");
        let invalid = reply(StatusCode::OK, &[b'o', 0xff]);

        assert_eq!(valid.body_text(), Some("ok"));
        assert_eq!(invalid.body_text(), None);
        assert_eq!(invalid.body_text_lossy(), "o\u{fffd}");
    }

    #[test]
    fn retry_after_in_seconds() {
        assert_eq!(
            reply_with_retry_after(" 12 ").retry_after(),
            Some(Duration::from_secs(12))
        );
    }

    #[test]
    fn retry_after_date_or_missing_is_none() {
        assert_eq!(
            reply_with_retry_after("Fri, 31 Dec 1999 23:59:59 GMT").retry_after(),
            None
        );
        assert_eq!(
            reply(StatusCode::TOO_MANY_REQUESTS, b"").retry_after(),
            None
        );
    }
}

mod client_trait {
    use super::*;

    struct Always(StatusCode);

    impl HttpClient for Always {
        async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
            Ok(reply(self.0, b""))
        }
    }

    #[tokio::test]
    async fn shared_client_forwards_requests() {
        let shared = Arc::new(Always(StatusCode::ACCEPTED));

        let response = shared.request(HttpRequest::get(base())).await.unwrap();

        assert_eq!(response.status, StatusCode::ACCEPTED);
    }

    #[test]
    fn only_bad_urls_are_final() {
        let reset = HttpError::Connection(Box::new(std::io::Error::other("reset")));

        assert!(HttpError::Timeout.is_retryable());
        assert!(reset.is_retryable());
        assert!(!HttpError::InvalidUrl("no host".to_string()).is_retryable());
    }
}
