//! Tests for single-attempt `Transport` delivery.

use super::test_fixtures::{MockClient, connection_refused, status, test_url};
use super::{HttpError, PushError, RESP_CODE_PARTIAL_SUCCESS, Temporary, Transport};
use std::sync::Arc;
use std::time::Duration;

const BODY: &[u8] = br#"{"token":["abc"]}"#;

fn transport(client: Arc<MockClient>) -> Transport<Arc<MockClient>> {
    Transport::new(client, test_url(), Duration::from_secs(7))
}

mod request_shape {
    use super::*;

    #[tokio::test]
    async fn posts_body_to_endpoint_with_headers_and_timeout() {
        let client = Arc::new(MockClient::replying("80000000"));

        transport(client.clone()).send(BODY, "secret").await.unwrap();

        let requests = client.captured_requests();
        assert_eq!(requests.len(), 1);
        let req = &requests[0];
        assert_eq!(req.url, test_url());
        assert_eq!(req.body, BODY);
        assert_eq!(req.timeout, Some(Duration::from_secs(7)));
        assert_eq!(
            req.headers.get(http::header::AUTHORIZATION).unwrap(),
            "Bearer secret"
        );
        assert_eq!(
            req.headers.get(http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[tokio::test]
    async fn authorization_header_is_marked_sensitive() {
        let client = Arc::new(MockClient::replying("80000000"));

        transport(client.clone()).send(BODY, "secret").await.unwrap();

        let requests = client.captured_requests();
        let auth = requests[0].headers.get(http::header::AUTHORIZATION).unwrap();
        assert!(auth.is_sensitive());
    }

    #[tokio::test]
    async fn empty_token_is_rejected_before_any_request() {
        let client = Arc::new(MockClient::new(vec![]));

        let result = transport(client.clone()).send(BODY, "").await;

        assert!(matches!(result, Err(PushError::InvalidAccessToken(_))));
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn token_with_control_characters_is_rejected() {
        let client = Arc::new(MockClient::new(vec![]));

        let result = transport(client.clone()).send(BODY, "bad\ntoken").await;

        assert!(matches!(result, Err(PushError::InvalidAccessToken(_))));
        assert_eq!(client.calls(), 0);
    }
}

mod outcomes {
    use super::*;

    #[tokio::test]
    async fn ok_status_returns_parsed_reply() {
        let client = Arc::new(MockClient::replying("80000000"));

        let response = transport(client).send(BODY, "t").await.unwrap();

        assert_eq!(response.code, "80000000");
        assert_eq!(response.message, "ok");
        assert_eq!(response.request_id, "r1");
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn service_error_code_inside_ok_is_not_an_error() {
        let client = Arc::new(MockClient::replying("80300007"));

        let response = transport(client).send(BODY, "t").await.unwrap();

        assert_eq!(response.code, "80300007");
        assert!(response.service_error().is_some());
    }

    #[tokio::test]
    async fn partial_success_is_returned_as_reply() {
        let client = Arc::new(MockClient::replying(RESP_CODE_PARTIAL_SUCCESS));

        let response = transport(client).send(BODY, "t").await.unwrap();

        assert!(response.is_partial_success());
        assert!(response.service_error().is_none());
    }

    #[tokio::test]
    async fn malformed_ok_body_is_a_permanent_parse_error() {
        let client = Arc::new(MockClient::new(vec![Ok(status(200, "<html>oops</html>"))]));

        let err = transport(client).send(BODY, "t").await.unwrap_err();

        assert!(matches!(err, PushError::ResponseParse(_)));
        assert!(!err.is_temporary());
    }

    #[tokio::test]
    async fn server_error_is_temporary_and_keeps_diagnostics() {
        let client = Arc::new(MockClient::new(vec![Ok(status(503, "try later"))]));

        let err = transport(client).send(BODY, "t").await.unwrap_err();

        assert!(err.is_temporary());
        assert!(!err.is_timeout());
        assert_eq!(err.status(), Some(http::StatusCode::SERVICE_UNAVAILABLE));
        let text = err.to_string();
        assert!(text.contains("503"), "{text}");
        assert!(text.contains("try later"), "{text}");
    }

    #[tokio::test]
    async fn client_error_is_permanent() {
        let client = Arc::new(MockClient::new(vec![Ok(status(401, "unauthorized"))]));

        let err = transport(client).send(BODY, "t").await.unwrap_err();

        assert!(matches!(err, PushError::Client { .. }));
        assert!(!err.is_temporary());
        assert_eq!(err.status(), Some(http::StatusCode::UNAUTHORIZED));
    }

    #[tokio::test]
    async fn non_ok_success_status_is_a_client_error() {
        let client = Arc::new(MockClient::new(vec![Ok(status(204, ""))]));

        let err = transport(client).send(BODY, "t").await.unwrap_err();

        assert!(matches!(err, PushError::Client { .. }));
    }

    #[tokio::test]
    async fn connection_failure_is_temporary_timeout() {
        let client = Arc::new(MockClient::new(vec![Err(connection_refused())]));

        let err = transport(client).send(BODY, "t").await.unwrap_err();

        assert!(matches!(err, PushError::Connection(HttpError::Connection(_))));
        assert!(err.is_temporary());
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn request_timeout_is_temporary_timeout() {
        let client = Arc::new(MockClient::new(vec![Err(HttpError::Timeout)]));

        let err = transport(client).send(BODY, "t").await.unwrap_err();

        assert!(matches!(err, PushError::Connection(HttpError::Timeout)));
        assert!(err.is_temporary());
        assert!(err.is_timeout());
    }
}

mod accessors {
    use super::*;

    #[test]
    fn exposes_endpoint_and_timeout() {
        let transport = transport(Arc::new(MockClient::new(vec![])));

        assert_eq!(transport.endpoint(), &test_url());
        assert_eq!(transport.timeout(), Duration::from_secs(7));
    }

    #[test]
    fn transport_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Transport<Arc<MockClient>>>();
    }
}
