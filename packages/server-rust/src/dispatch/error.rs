//! Error taxonomy for handlers, dispatch and registration.

use bytes::Bytes;
use dmrp_core::{HResult, SyntaxId, WireError};

// ---------------------------------------------------------------------------
// Handler-level errors
// ---------------------------------------------------------------------------

/// Failure reported by a handler method.
#[derive(Debug, thiserror::Error)]
pub enum OperationError {
    #[error("operation not implemented")]
    NotImplemented,
    #[error("operation returned {0}")]
    Status(HResult),
    #[error("operation cancelled")]
    Cancelled,
    #[error("operation failed: {0}")]
    Failed(#[from] anyhow::Error),
}

impl OperationError {
    /// Status code a transport would put on the wire for this error.
    #[must_use]
    pub fn hresult(&self) -> HResult {
        match self {
            Self::NotImplemented => HResult::E_NOTIMPL,
            Self::Status(status) => *status,
            Self::Cancelled => HResult::E_ABORT,
            Self::Failed(_) => HResult::E_FAIL,
        }
    }
}

/// A handler error, optionally accompanied by a response.
///
/// The response is still encoded and returned with the error, so status
/// fields inside it reach the caller even when the call fails.
#[derive(Debug)]
pub struct Fault<T> {
    pub response: Option<T>,
    pub error: OperationError,
}

impl<T> Fault<T> {
    #[must_use]
    pub fn new(error: OperationError) -> Self {
        Self {
            response: None,
            error,
        }
    }

    #[must_use]
    pub fn with_response(response: T, error: OperationError) -> Self {
        Self {
            response: Some(response),
            error,
        }
    }

    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fault<U> {
        Fault {
            response: self.response.map(f),
            error: self.error,
        }
    }

    /// Like [`Fault::map`], dropping the response when `f` returns `None`.
    #[must_use]
    pub fn filter_map<U>(self, f: impl FnOnce(T) -> Option<U>) -> Fault<U> {
        Fault {
            response: self.response.and_then(f),
            error: self.error,
        }
    }
}

impl<T> From<OperationError> for Fault<T> {
    fn from(error: OperationError) -> Self {
        Self::new(error)
    }
}

impl<T> From<anyhow::Error> for Fault<T> {
    fn from(error: anyhow::Error) -> Self {
        Self::new(OperationError::Failed(error))
    }
}

/// Return type of every handler method.
pub type OpResult<T> = Result<T, Fault<T>>;

// ---------------------------------------------------------------------------
// Dispatch-level errors
// ---------------------------------------------------------------------------

/// Why a call produced an error instead of (or alongside) a response.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("malformed {interface} request for opnum {opnum}: {source}")]
    Malformed {
        interface: &'static str,
        opnum: u32,
        source: WireError,
    },
    #[error("failed to encode {interface} response for opnum {opnum}: {source}")]
    Encode {
        interface: &'static str,
        opnum: u32,
        source: WireError,
    },
    #[error("{interface}::{operation} (opnum {opnum}): {source}")]
    Operation {
        interface: &'static str,
        operation: &'static str,
        opnum: u32,
        source: OperationError,
    },
    #[error("no server registered for {syntax}")]
    UnknownInterface { syntax: SyntaxId },
    #[error("call timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
    #[error("server overloaded, try again later")]
    Overloaded,
}

impl DispatchError {
    /// The handler's error, when the failure came from the handler.
    #[must_use]
    pub fn operation_error(&self) -> Option<&OperationError> {
        match self {
            Self::Operation { source, .. } => Some(source),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_not_implemented(&self) -> bool {
        matches!(self.operation_error(), Some(OperationError::NotImplemented))
    }
}

/// A failed call: the error plus any response bytes encoded alongside it.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct CallFault {
    pub payload: Option<Bytes>,
    #[source]
    pub error: DispatchError,
}

impl CallFault {
    #[must_use]
    pub fn with_payload(payload: Option<Bytes>, error: DispatchError) -> Self {
        Self { payload, error }
    }
}

impl From<DispatchError> for CallFault {
    fn from(error: DispatchError) -> Self {
        Self {
            payload: None,
            error,
        }
    }
}

// ---------------------------------------------------------------------------
// Definition and registration errors
// ---------------------------------------------------------------------------

/// An interface definition violates the composition rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("{interface}: opnum {opnum} declared twice")]
    DuplicateOpnum { interface: &'static str, opnum: u32 },
    #[error("{interface}: opnum {opnum} is neither an operation nor reserved")]
    Gap { interface: &'static str, opnum: u32 },
    #[error("{interface}: opnum {opnum} falls inside the base range [0, {base_end})")]
    OverlapsBase {
        interface: &'static str,
        opnum: u32,
        base_end: u32,
    },
    #[error("{interface}: base interface chain does not terminate")]
    BaseCycle { interface: &'static str },
}

/// Binding a server to a router failed.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("a server is already registered for {syntax}")]
    AlreadyRegistered { syntax: SyntaxId },
    #[error("invalid interface definition: {0}")]
    InvalidTable(#[from] TableError),
}
