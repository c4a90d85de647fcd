//! Error taxonomy: server error names and embedded error messages mapped to kinds.
//!
//! Server errors form a small hierarchy used only for caller-side branching:
//!
//! ```text
//! Standard
//! ├── Handler
//! │   ├── UnknownBlock, UnknownAccount, UnknownAccessKey, UnknownChunk,
//! │   ├── UnknownEpoch, UnknownReceipt, NoContractCode, InvalidAccount,
//! │   └── GarbageCollectedBlock, NotSyncedYet, InvalidTransaction, Timeout
//! ├── RequestValidation
//! │   └── Parse
//! └── Internal
//! ```

use std::fmt;

use regex::Regex;

// ─── ServerErrorKind ──────────────────────────────────────────────────────────

/// Classified kind of an error object returned by the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerErrorKind {
    /// Fallback for any name not in the binding table.
    Standard,

    Handler,
    UnknownBlock,
    UnknownAccount,
    UnknownAccessKey,
    UnknownChunk,
    UnknownEpoch,
    UnknownReceipt,
    NoContractCode,
    InvalidAccount,
    GarbageCollectedBlock,
    NotSyncedYet,
    InvalidTransaction,
    Timeout,

    RequestValidation,
    Parse,

    Internal,
}

/// Error name → kind bindings. Anything else classifies as `Standard`.
const SERVER_ERROR_BINDINGS: &[(&str, ServerErrorKind)] = &[
    ("HANDLER_ERROR", ServerErrorKind::Handler),
    ("UNKNOWN_BLOCK", ServerErrorKind::UnknownBlock),
    ("UNKNOWN_ACCOUNT", ServerErrorKind::UnknownAccount),
    ("UNKNOWN_ACCESS_KEY", ServerErrorKind::UnknownAccessKey),
    ("UNKNOWN_CHUNK", ServerErrorKind::UnknownChunk),
    ("UNKNOWN_EPOCH", ServerErrorKind::UnknownEpoch),
    ("UNKNOWN_RECEIPT", ServerErrorKind::UnknownReceipt),
    ("NO_CONTRACT_CODE", ServerErrorKind::NoContractCode),
    ("INVALID_ACCOUNT", ServerErrorKind::InvalidAccount),
    ("GARBAGE_COLLECTED_BLOCK", ServerErrorKind::GarbageCollectedBlock),
    ("NOT_SYNCED_YET", ServerErrorKind::NotSyncedYet),
    ("INVALID_TRANSACTION", ServerErrorKind::InvalidTransaction),
    ("TIMEOUT_ERROR", ServerErrorKind::Timeout),
    ("REQUEST_VALIDATION_ERROR", ServerErrorKind::RequestValidation),
    ("PARSE_ERROR", ServerErrorKind::Parse),
    ("INTERNAL_ERROR", ServerErrorKind::Internal),
];

/// Map a server error name to its kind. Never fails.
pub fn classify(name: &str) -> ServerErrorKind {
    SERVER_ERROR_BINDINGS
        .iter()
        .find(|(bound, _)| *bound == name)
        .map(|(_, kind)| *kind)
        .unwrap_or(ServerErrorKind::Standard)
}

impl ServerErrorKind {
    /// The enclosing category, `None` for the root `Standard` kind.
    pub fn parent(self) -> Option<Self> {
        match self {
            Self::Standard => None,
            Self::Handler | Self::RequestValidation | Self::Internal => Some(Self::Standard),
            Self::Parse => Some(Self::RequestValidation),
            Self::UnknownBlock
            | Self::UnknownAccount
            | Self::UnknownAccessKey
            | Self::UnknownChunk
            | Self::UnknownEpoch
            | Self::UnknownReceipt
            | Self::NoContractCode
            | Self::InvalidAccount
            | Self::GarbageCollectedBlock
            | Self::NotSyncedYet
            | Self::InvalidTransaction
            | Self::Timeout => Some(Self::Handler),
        }
    }

    /// Returns `true` if `self` is `other` or one of its narrowings.
    pub fn is_a(self, other: Self) -> bool {
        let mut current = Some(self);
        while let Some(kind) = current {
            if kind == other {
                return true;
            }
            current = kind.parent();
        }
        false
    }

    pub fn is_handler_error(self) -> bool {
        self.is_a(Self::Handler)
    }

    pub fn is_request_validation_error(self) -> bool {
        self.is_a(Self::RequestValidation)
    }
}

impl fmt::Display for ServerErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Standard => "standard error",
            Self::Handler => "handler error",
            Self::UnknownBlock => "unknown block",
            Self::UnknownAccount => "unknown account",
            Self::UnknownAccessKey => "unknown access key",
            Self::UnknownChunk => "unknown chunk",
            Self::UnknownEpoch => "unknown epoch",
            Self::UnknownReceipt => "unknown receipt",
            Self::NoContractCode => "no contract code",
            Self::InvalidAccount => "invalid account",
            Self::GarbageCollectedBlock => "garbage collected block",
            Self::NotSyncedYet => "node not synced yet",
            Self::InvalidTransaction => "invalid transaction",
            Self::Timeout => "timeout",
            Self::RequestValidation => "request validation error",
            Self::Parse => "parse error",
            Self::Internal => "internal error",
        };
        f.write_str(name)
    }
}

// ─── DomainErrorKind ──────────────────────────────────────────────────────────

/// Business errors the node reports inside an otherwise successful `result`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainErrorKind {
    AccessKeyDoesNotExist,
    AccountDoesNotExist,
    ContractCodeDoesNotExist,
    MethodNotFound,
}

impl fmt::Display for DomainErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AccessKeyDoesNotExist => "access key does not exist",
            Self::AccountDoesNotExist => "account does not exist",
            Self::ContractCodeDoesNotExist => "contract code does not exist",
            Self::MethodNotFound => "contract method not found",
        };
        f.write_str(name)
    }
}

/// Message patterns for NEAR `query` results, in match order.
pub const STANDARD_MESSAGE_PATTERNS: &[(&str, DomainErrorKind)] = &[
    (
        r"^access key .*? does not exist while viewing$",
        DomainErrorKind::AccessKeyDoesNotExist,
    ),
    (
        r"^account .*? does not exist while viewing$",
        DomainErrorKind::AccountDoesNotExist,
    ),
    (r"CodeDoesNotExist", DomainErrorKind::ContractCodeDoesNotExist),
    (r"MethodResolveError|MethodNotFound", DomainErrorKind::MethodNotFound),
];

// ─── MessageClassifier ────────────────────────────────────────────────────────

/// Ordered, immutable table of message patterns. The first match wins.
#[derive(Debug, Clone)]
pub struct MessageClassifier {
    patterns: Vec<(Regex, DomainErrorKind)>,
}

impl MessageClassifier {
    /// Compile a pattern table. Order is preserved.
    pub fn new(patterns: &[(&str, DomainErrorKind)]) -> Result<Self, regex::Error> {
        let patterns = patterns
            .iter()
            .map(|(pattern, kind)| Ok((Regex::new(pattern)?, *kind)))
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { patterns })
    }

    /// The classifier for [`STANDARD_MESSAGE_PATTERNS`].
    pub fn standard() -> Result<Self, regex::Error> {
        Self::new(STANDARD_MESSAGE_PATTERNS)
    }

    /// A classifier that never matches.
    pub fn empty() -> Self {
        Self { patterns: Vec::new() }
    }

    pub fn classify(&self, message: &str) -> Option<DomainErrorKind> {
        self.patterns
            .iter()
            .find(|(re, _)| re.is_match(message))
            .map(|(_, kind)| *kind)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
