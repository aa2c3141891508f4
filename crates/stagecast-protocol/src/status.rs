//! Request status taxonomy
//!
//! Every request outcome carries exactly one code from the closed enumeration
//! below. Handlers never invent ad hoc codes; anything unexpected is reported
//! as [`RequestStatus::RequestProcessingFailed`] by the dispatcher.
//!
//! Codes are grouped by hundreds on the wire: 1xx success, 2xx envelope-level,
//! 3xx missing data, 4xx invalid data, 6xx resource lookup, 7xx processing.

use serde::{Deserialize, Serialize};

/// Status code attached to every request result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(into = "u16", try_from = "u16")]
pub enum RequestStatus {
    /// The request completed successfully.
    Success,

    // -- Structural ---------------------------------------------------------
    /// The request type is not recognized by the handler table.
    UnknownRequestType,
    /// A required request field is missing.
    MissingRequestField,
    /// A request field has the wrong JSON type.
    InvalidRequestFieldType,
    /// A numeric request field is outside its allowed range.
    RequestFieldOutOfRange,
    /// A string or object request field is empty where a value is required.
    RequestFieldEmpty,
    /// Mutually exclusive request fields were given together.
    TooManyRequestFields,

    // -- Resource -----------------------------------------------------------
    /// The named resource does not exist.
    ResourceNotFound,
    /// A resource with that name already exists.
    ResourceAlreadyExists,
    /// The named resource exists but is of the wrong kind for this request.
    InvalidResourceType,
    /// The resource exists but is in a state that forbids the operation.
    InvalidResourceState,
    /// The host failed to create the requested resource.
    ResourceCreationFailed,

    // -- Domain -------------------------------------------------------------
    /// The given input kind is not registered with the host.
    InvalidInputKind,
    /// A field is structurally valid but semantically wrong (e.g. an unknown
    /// enum string).
    InvalidRequestField,
    /// The resolved source is a group where a true scene is required.
    NotAScene,

    // -- Processing ---------------------------------------------------------
    /// An internal operation failed unexpectedly. Always logged; treated as a
    /// bug surface, not a client error.
    RequestProcessingFailed,
}

impl RequestStatus {
    /// Numeric code used on the wire.
    pub fn code(self) -> u16 {
        match self {
            RequestStatus::Success => 100,
            RequestStatus::UnknownRequestType => 204,
            RequestStatus::MissingRequestField => 300,
            RequestStatus::InvalidRequestField => 400,
            RequestStatus::InvalidRequestFieldType => 401,
            RequestStatus::RequestFieldOutOfRange => 402,
            RequestStatus::RequestFieldEmpty => 403,
            RequestStatus::TooManyRequestFields => 404,
            RequestStatus::ResourceNotFound => 600,
            RequestStatus::ResourceAlreadyExists => 601,
            RequestStatus::InvalidResourceType => 602,
            RequestStatus::InvalidResourceState => 604,
            RequestStatus::InvalidInputKind => 605,
            RequestStatus::NotAScene => 608,
            RequestStatus::ResourceCreationFailed => 700,
            RequestStatus::RequestProcessingFailed => 702,
        }
    }

    /// True only for the success subset of the taxonomy.
    pub fn is_success(self) -> bool {
        matches!(self, RequestStatus::Success)
    }

    /// Canonical human-readable comment for this status.
    ///
    /// Used when a handler reports an error without a more specific
    /// explanation.
    pub fn default_comment(self) -> &'static str {
        match self {
            RequestStatus::Success => "",
            RequestStatus::UnknownRequestType => "The request type is not recognized.",
            RequestStatus::MissingRequestField => "A required request field is missing.",
            RequestStatus::InvalidRequestFieldType => "A request field has the wrong type.",
            RequestStatus::RequestFieldOutOfRange => "A request field is out of range.",
            RequestStatus::RequestFieldEmpty => "A request field is empty and cannot be.",
            RequestStatus::TooManyRequestFields => "Too many request fields were provided.",
            RequestStatus::ResourceNotFound => "No resource was found by that name.",
            RequestStatus::ResourceAlreadyExists => "A resource already exists by that name.",
            RequestStatus::InvalidResourceType => "The resource is of an invalid type.",
            RequestStatus::InvalidResourceState => "The resource is in an invalid state.",
            RequestStatus::InvalidInputKind => "The input kind is not supported by the host.",
            RequestStatus::InvalidRequestField => "A request field has an invalid value.",
            RequestStatus::NotAScene => "The resource is a group, not a scene.",
            RequestStatus::ResourceCreationFailed => "The host failed to create the resource.",
            RequestStatus::RequestProcessingFailed => {
                "An internal error occurred while processing the request."
            }
        }
    }
}

impl From<RequestStatus> for u16 {
    fn from(status: RequestStatus) -> u16 {
        status.code()
    }
}

impl TryFrom<u16> for RequestStatus {
    type Error = String;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            100 => Ok(RequestStatus::Success),
            204 => Ok(RequestStatus::UnknownRequestType),
            300 => Ok(RequestStatus::MissingRequestField),
            400 => Ok(RequestStatus::InvalidRequestField),
            401 => Ok(RequestStatus::InvalidRequestFieldType),
            402 => Ok(RequestStatus::RequestFieldOutOfRange),
            403 => Ok(RequestStatus::RequestFieldEmpty),
            404 => Ok(RequestStatus::TooManyRequestFields),
            600 => Ok(RequestStatus::ResourceNotFound),
            601 => Ok(RequestStatus::ResourceAlreadyExists),
            602 => Ok(RequestStatus::InvalidResourceType),
            604 => Ok(RequestStatus::InvalidResourceState),
            605 => Ok(RequestStatus::InvalidInputKind),
            608 => Ok(RequestStatus::NotAScene),
            700 => Ok(RequestStatus::ResourceCreationFailed),
            702 => Ok(RequestStatus::RequestProcessingFailed),
            other => Err(format!("unknown request status code: {other}")),
        }
    }
}
