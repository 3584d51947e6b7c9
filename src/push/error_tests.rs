//! Tests for error classification and service result codes.

use super::{
    HttpError, PushError, RESP_CODE_PARTIAL_SUCCESS, RESP_CODE_SUCCESS, Response, ServiceError,
    Temporary,
};
use crate::message::MessageError;

fn parse_error() -> serde_json::Error {
    serde_json::from_str::<Response>("not json").unwrap_err()
}

mod temporary_classification {
    use super::*;

    #[test]
    fn connection_errors_are_temporary_timeouts() {
        for err in [
            PushError::Connection(HttpError::Timeout),
            PushError::Connection(HttpError::Connection("reset".into())),
        ] {
            assert!(err.is_temporary(), "{err}");
            assert!(err.is_timeout(), "{err}");
        }
    }

    #[test]
    fn server_errors_are_temporary_but_not_timeouts() {
        let err = PushError::Server {
            status: http::StatusCode::BAD_GATEWAY,
            body: String::new(),
        };

        assert!(err.is_temporary());
        assert!(!err.is_timeout());
    }

    #[test]
    fn everything_else_is_permanent() {
        let permanent = [
            PushError::InvalidAppId,
            PushError::InvalidTimeout,
            PushError::InvalidEndpoint {
                url: "x".to_string(),
                reason: "y".to_string(),
            },
            PushError::InvalidAccessToken("empty".to_string()),
            PushError::InvalidMessage(MessageError::Missing),
            PushError::Serialization(parse_error()),
            PushError::ResponseParse(parse_error()),
            PushError::Client {
                status: http::StatusCode::UNAUTHORIZED,
                body: String::new(),
            },
        ];

        for err in permanent {
            assert!(!err.is_temporary(), "{err} should be permanent");
            assert!(!err.is_timeout(), "{err} should not be a timeout");
        }
    }

    #[test]
    fn http_errors_are_temporary() {
        assert!(HttpError::Timeout.is_temporary());
        assert!(HttpError::Connection("refused".into()).is_timeout());
    }
}

mod conversions {
    use super::*;

    #[test]
    fn message_error_converts_with_context() {
        let err: PushError = MessageError::InvalidTarget.into();

        assert!(matches!(err, PushError::InvalidMessage(MessageError::InvalidTarget)));
        assert_eq!(
            err.to_string(),
            "invalid msg: topic is invalid or registration ids are not set"
        );
    }

    #[test]
    fn http_error_converts_to_connection() {
        let err: PushError = HttpError::Timeout.into();

        assert!(matches!(err, PushError::Connection(HttpError::Timeout)));
        assert_eq!(err.to_string(), "Request timed out");
    }

    #[test]
    fn status_is_exposed_only_for_http_status_errors() {
        let server = PushError::Server {
            status: http::StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        };

        assert_eq!(server.status(), Some(http::StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(PushError::InvalidAppId.status(), None);
    }

    #[test]
    fn status_errors_render_code_and_body() {
        let err = PushError::Client {
            status: http::StatusCode::FORBIDDEN,
            body: "denied".to_string(),
        };

        assert_eq!(err.to_string(), "403 Forbidden error: denied");
    }
}

mod service_codes {
    use super::*;

    #[test]
    fn known_codes_map_to_typed_errors() {
        let cases = [
            ("80200001", ServiceError::OAuth),
            ("80200003", ServiceError::TokenExpired),
            ("80100003", ServiceError::InvalidMessage),
            ("80300008", ServiceError::MessageTooBig),
            ("80300002", ServiceError::CannotSend),
            ("80300007", ServiceError::InvalidToken),
        ];

        for (code, expected) in cases {
            let mapped = ServiceError::from_code(code);
            assert_eq!(mapped, expected);
            assert_eq!(mapped.code(), code);
        }
    }

    #[test]
    fn unmapped_code_is_unknown_and_keeps_code() {
        let mapped = ServiceError::from_code("81000001");

        assert_eq!(mapped, ServiceError::Unknown("81000001".to_string()));
        assert_eq!(mapped.code(), "81000001");
        assert!(mapped.to_string().contains("81000001"));
    }

    #[test]
    fn success_and_partial_success_have_no_service_error() {
        let full = Response {
            code: RESP_CODE_SUCCESS.to_string(),
            ..Response::default()
        };
        let partial = Response {
            code: RESP_CODE_PARTIAL_SUCCESS.to_string(),
            ..Response::default()
        };

        assert!(full.is_success());
        assert!(!full.is_partial_success());
        assert_eq!(full.service_error(), None);

        assert!(partial.is_partial_success());
        assert!(!partial.is_success());
        assert_eq!(partial.service_error(), None);
    }

    #[test]
    fn failure_code_is_classified() {
        let response = Response {
            code: "80300007".to_string(),
            message: "Invalid token".to_string(),
            request_id: "abc".to_string(),
        };

        assert_eq!(response.service_error(), Some(ServiceError::InvalidToken));
    }

    #[test]
    fn response_decodes_wire_field_names() {
        let response: Response =
            serde_json::from_str(r#"{"code":"80000000","msg":"Success","request_id":"r-9"}"#)
                .unwrap();

        assert_eq!(response.code, "80000000");
        assert_eq!(response.message, "Success");
        assert_eq!(response.request_id, "r-9");
    }
}
