//! # Peer Shim Adapter
//!
//! Translates between the peer's raw invocation (byte-string arguments in,
//! status/message/payload out) and the chaincode's envelope API.
//!
//! ## Status mapping
//!
//! | Outcome | Peer status | Payload |
//! |---------|-------------|---------|
//! | success envelope | 200 | envelope JSON |
//! | arity / validation / auth / routing error | envelope status | envelope JSON |
//! | encoding or store failure | 500 | empty (transaction aborted) |
//! | envelope not serializable | 500 | fixed fallback JSON |

use crate::codec::{encode_envelope, ENVELOPE_FALLBACK};
use crate::domain::envelope::Envelope;
use crate::ports::inbound::ChaincodeApi;
use std::sync::Arc;
use tracing::{error, warn};

/// Peer status for a successful call.
pub const OK: i32 = 200;
/// Peer status that aborts the transaction.
pub const ERROR: i32 = 500;

/// Message returned by `init`.
pub const INIT_MESSAGE: &str = "Chaincode Successfully initialized";

/// Response handed back to the peer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PeerResponse {
    /// Peer-level status.
    pub status: i32,
    /// Error message, empty on success.
    pub message: String,
    /// Response body.
    pub payload: Vec<u8>,
}

impl PeerResponse {
    /// Successful response carrying `payload`.
    #[must_use]
    pub fn success(payload: Vec<u8>) -> Self {
        Self {
            status: OK,
            message: String::new(),
            payload,
        }
    }

    /// Transaction-aborting error.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ERROR,
            message: message.into(),
            payload: Vec::new(),
        }
    }

    /// Returns true if the peer treats this as an endorsed result.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == OK
    }
}

/// Split raw invocation arguments into function name and parameters.
///
/// An empty argument list yields an empty function name, which the
/// dispatcher then rejects as unknown.
#[must_use]
pub fn function_and_parameters(raw_args: &[Vec<u8>]) -> (String, Vec<String>) {
    let mut strings = raw_args
        .iter()
        .map(|arg| String::from_utf8_lossy(arg).into_owned());
    let function = strings.next().unwrap_or_default();
    (function, strings.collect())
}

/// Peer-facing wrapper around a [`ChaincodeApi`].
pub struct ShimHandler<C: ChaincodeApi> {
    chaincode: Arc<C>,
}

impl<C: ChaincodeApi> ShimHandler<C> {
    /// Wrap a chaincode.
    pub fn new(chaincode: Arc<C>) -> Self {
        Self { chaincode }
    }

    /// Handle chaincode instantiation.
    pub async fn init(&self) -> PeerResponse {
        match self.chaincode.init().await {
            Ok(()) => PeerResponse::success(INIT_MESSAGE.as_bytes().to_vec()),
            Err(err) => PeerResponse::error(err.to_string()),
        }
    }

    /// Handle one transaction proposal.
    pub async fn invoke(&self, raw_args: &[Vec<u8>]) -> PeerResponse {
        let (function, args) = function_and_parameters(raw_args);

        match self.chaincode.try_invoke(&function, &args).await {
            Ok(envelope) => match encode_envelope(&envelope) {
                Ok(payload) => PeerResponse::success(payload),
                Err(err) => {
                    error!(error = %err, "Failed to encode response envelope");
                    fallback_response(err.to_string())
                }
            },
            Err(err) if err.is_fatal() => {
                warn!(function = %function, error = %err, "Aborting transaction");
                PeerResponse::error(err.to_string())
            }
            Err(err) => envelope_error_response(&Envelope::from_error(&err)),
        }
    }
}

fn envelope_error_response(envelope: &Envelope) -> PeerResponse {
    match encode_envelope(envelope) {
        Ok(payload) => PeerResponse {
            status: envelope.status,
            message: envelope.message.clone(),
            payload,
        },
        Err(err) => {
            error!(error = %err, "Failed to encode error envelope");
            fallback_response(envelope.message.clone())
        }
    }
}

/// Response for an envelope that could not be serialized.
fn fallback_response(message: String) -> PeerResponse {
    PeerResponse {
        status: ERROR,
        message,
        payload: ENVELOPE_FALLBACK.to_vec(),
    }
}
