use crate::catalog::SlotKind;
use crate::schema::{Feed, Friends, Home, Likes, Me, Photos, Videos};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The aggregate result of one batch request.
///
/// Every entity slot is optional. A successful request only guarantees that
/// the batch response was readable; any individual slot may still be absent
/// because its sub-request failed or its body did not decode. The reasons are
/// kept in `diagnostics`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Profile {
    #[serde(rename = "ID")]
    pub id: String,
    pub token: String,
    pub me: Option<Me>,
    pub friends: Option<Friends>,
    pub likes: Option<Likes>,
    pub feed: Option<Feed>,
    pub home: Option<Home>,
    pub photos: Option<Photos>,
    pub videos: Option<Videos>,

    /// Per-position failures found while reconciling (not serialized).
    #[serde(skip)]
    pub diagnostics: Vec<Diagnostic>,
}

impl Profile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the slot for `kind` holds a decoded entity.
    pub fn is_populated(&self, kind: SlotKind) -> bool {
        match kind {
            SlotKind::Me => self.me.is_some(),
            SlotKind::Reference => false,
            SlotKind::Friends => self.friends.is_some(),
            SlotKind::Likes => self.likes.is_some(),
            SlotKind::Feed => self.feed.is_some(),
            SlotKind::Home => self.home.is_some(),
            SlotKind::Photos => self.photos.is_some(),
            SlotKind::Videos => self.videos.is_some(),
        }
    }

    /// Labels of the populated slots, in a stable order.
    pub fn populated_slots(&self) -> Vec<&'static str> {
        SlotKind::ENTITIES
            .iter()
            .filter(|kind| self.is_populated(**kind))
            .map(|kind| kind.label())
            .collect()
    }
}

/// A sub-response that did not make it into the profile.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    /// Index of the element in the batch response.
    pub position: usize,
    /// Label of the slot the element was assigned to.
    pub slot: &'static str,
    pub kind: DiagnosticKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DiagnosticKind {
    /// `code` was missing or not 200.
    Status { code: Option<u16> },
    /// The element was not a JSON object (the API sends `null` for
    /// sub-requests it did not run).
    NotAnObject,
    /// `body` was missing or not a string.
    MissingBody,
    /// `body` did not decode into the slot's entity.
    Decode { error: String, payload: String },
    /// The element echoed a `name` other than the one its position was
    /// requested with.
    NameMismatch {
        expected: Option<String>,
        found: String,
    },
}

impl DiagnosticKind {
    /// Short reason used as a metric tag.
    pub fn reason(&self) -> &'static str {
        match self {
            DiagnosticKind::Status { .. } => "status",
            DiagnosticKind::NotAnObject => "not_an_object",
            DiagnosticKind::MissingBody => "missing_body",
            DiagnosticKind::Decode { .. } => "decode",
            DiagnosticKind::NameMismatch { .. } => "name_mismatch",
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "position {} ({}): ", self.position, self.slot)?;
        match &self.kind {
            DiagnosticKind::Status { code: Some(code) } => write!(f, "response code {code}"),
            DiagnosticKind::Status { code: None } => f.write_str("response code missing"),
            DiagnosticKind::NotAnObject => f.write_str("sub-response is not an object"),
            DiagnosticKind::MissingBody => f.write_str("body missing"),
            DiagnosticKind::Decode { error, .. } => write!(f, "{error}"),
            DiagnosticKind::NameMismatch {
                expected: Some(expected),
                found,
            } => write!(f, "expected sub-response {expected}, got {found}"),
            DiagnosticKind::NameMismatch {
                expected: None,
                found,
            } => write!(f, "unexpected named sub-response {found}"),
        }
    }
}
