//! Unit tests for the protocol types
//!
//! These verify envelope serialization, the status-code mapping, and the
//! success/failure invariants on results.

#[cfg(test)]
mod tests {
    use crate::*;
    use serde_json::json;

    #[test]
    fn test_request_creation() {
        let req = Request::new("GetInputMute")
            .with_id("abc-123")
            .with_field("inputName", json!("Mic"));
        assert_eq!(req.request_type, "GetInputMute");
        assert_eq!(req.request_id.as_deref(), Some("abc-123"));
        assert_eq!(req.request_data["inputName"], json!("Mic"));
    }

    #[test]
    fn test_request_deserialization_defaults() {
        // requestId and requestData are both optional on the wire
        let req: Request = serde_json::from_value(json!({"requestType": "GetVersion"})).unwrap();
        assert_eq!(req.request_type, "GetVersion");
        assert!(req.request_id.is_none());
        assert!(req.request_data.is_empty());
    }

    #[test]
    fn test_request_serialization_roundtrip() {
        let req = Request::new("SetInputMute")
            .with_id("1")
            .with_field("inputName", json!("Mic"))
            .with_field("inputMuted", json!(true));
        let serialized = serde_json::to_value(&req).unwrap();
        assert_eq!(serialized["requestType"], "SetInputMute");
        let deserialized: Request = serde_json::from_value(serialized).unwrap();
        assert_eq!(req, deserialized);
    }

    #[test]
    fn test_status_code_roundtrip() {
        let statuses = [
            RequestStatus::Success,
            RequestStatus::UnknownRequestType,
            RequestStatus::MissingRequestField,
            RequestStatus::InvalidRequestFieldType,
            RequestStatus::RequestFieldOutOfRange,
            RequestStatus::RequestFieldEmpty,
            RequestStatus::TooManyRequestFields,
            RequestStatus::ResourceNotFound,
            RequestStatus::ResourceAlreadyExists,
            RequestStatus::InvalidResourceType,
            RequestStatus::InvalidResourceState,
            RequestStatus::ResourceCreationFailed,
            RequestStatus::InvalidInputKind,
            RequestStatus::InvalidRequestField,
            RequestStatus::NotAScene,
            RequestStatus::RequestProcessingFailed,
        ];
        for status in statuses {
            assert_eq!(RequestStatus::try_from(status.code()), Ok(status));
        }
    }

    #[test]
    fn test_status_unknown_code_rejected() {
        assert!(RequestStatus::try_from(9999u16).is_err());
    }

    #[test]
    fn test_success_subset() {
        assert!(RequestStatus::Success.is_success());
        assert!(!RequestStatus::ResourceNotFound.is_success());
        assert!(!RequestStatus::RequestProcessingFailed.is_success());
    }

    #[test]
    fn test_result_success_invariant() {
        let mut data = RequestData::new();
        data.insert("inputMuted".into(), json!(true));
        let result = RequestResult::success_with_data(data);
        assert!(result.is_success());
        assert_eq!(result.status, RequestStatus::Success);
        assert!(result.comment.is_none());
    }

    #[test]
    fn test_error_result_gets_canonical_comment() {
        let response = RequestResponse::from_result(
            "GetInputMute",
            Some("9".into()),
            RequestResult::error(RequestStatus::ResourceNotFound),
        );
        assert!(!response.is_success());
        assert_eq!(response.request_status.code, 600);
        assert_eq!(
            response.request_status.comment.as_deref(),
            Some(RequestStatus::ResourceNotFound.default_comment())
        );
        assert!(response.response_data.is_none());
    }

    #[test]
    fn test_handler_comment_overrides_canonical() {
        let response = RequestResponse::from_result(
            "SetInputVolume",
            None,
            RequestResult::error_with_comment(
                RequestStatus::TooManyRequestFields,
                "You may only specify one volume field.",
            ),
        );
        assert_eq!(
            response.request_status.comment.as_deref(),
            Some("You may only specify one volume field.")
        );
    }

    #[test]
    fn test_error_response_drops_payload() {
        let mut data = RequestData::new();
        data.insert("leak".into(), json!(1));
        let result = RequestResult {
            status: RequestStatus::InvalidRequestField,
            comment: None,
            response_data: Some(data),
        };
        let response = RequestResponse::from_result("X", None, result);
        assert!(response.response_data.is_none());
    }

    #[test]
    fn test_response_envelope_serialization() {
        let response = RequestResponse::from_result(
            "GetVersion",
            Some("id-1".into()),
            RequestResult::success(),
        )
        .with_processing_time(1.25);

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["requestType"], "GetVersion");
        assert_eq!(value["requestId"], "id-1");
        assert_eq!(value["requestStatus"]["result"], true);
        assert_eq!(value["requestStatus"]["code"], 100);
        assert_eq!(value["processingTimeMs"], 1.25);
        // success without payload serializes no responseData at all
        assert!(value.get("responseData").is_none());
    }

    #[test]
    fn test_execution_type_wire_values() {
        assert_eq!(
            BatchExecutionType::try_from(-1),
            Ok(BatchExecutionType::Sequential)
        );
        assert_eq!(
            BatchExecutionType::try_from(0),
            Ok(BatchExecutionType::Sequential)
        );
        assert_eq!(
            BatchExecutionType::try_from(1),
            Ok(BatchExecutionType::SequentialBlocking)
        );
        assert_eq!(
            BatchExecutionType::try_from(2),
            Ok(BatchExecutionType::Parallel)
        );
        assert!(BatchExecutionType::try_from(3).is_err());
    }

    #[test]
    fn test_batch_deserialization_defaults() {
        let batch: RequestBatch = serde_json::from_value(json!({
            "requests": [{"requestType": "GetVersion"}]
        }))
        .unwrap();
        assert_eq!(batch.requests.len(), 1);
        assert!(!batch.halt_on_failure);
        assert_eq!(batch.execution_type, BatchExecutionType::Sequential);
    }

    #[test]
    fn test_batch_roundtrip() {
        let batch = RequestBatch::new(vec![
            Request::new("GetVersion"),
            Request::new("GetInputList"),
        ])
        .halt_on_failure(true)
        .execution_type(BatchExecutionType::Parallel);

        let serialized = serde_json::to_value(&batch).unwrap();
        assert_eq!(serialized["executionType"], 2);
        let deserialized: RequestBatch = serde_json::from_value(serialized).unwrap();
        assert_eq!(batch, deserialized);
    }
}
