//! Batch query templates.
//!
//! A template is an ordered list of [`Slot`]s. Each slot pairs the
//! sub-request sent to the API with the entity its response decodes into, so
//! the order of requests and the order of decoders are one list and cannot
//! drift apart.
//!
//! Sub-requests may reference the output of an earlier named sub-request
//! with the API's JSONPath placeholder syntax, e.g.
//! `?ids={result=get-friends:$.data.*.id}`. The placeholders are resolved
//! server-side; here they are only carried through verbatim.

use crate::errors::{DecodeError, GraphError, Result};
use crate::profile::Profile;
use crate::schema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fields requested for the token owner and for each friend.
const USER_FIELDS: &str = "picture.type(large),id,birthday,email,gender,last_name,first_name,link,locale,location,name,timezone,username";

/// Fields requested for each liked page.
const PAGE_FIELDS: &str = "id,picture.type(large),category,link,name,username,website,location";

/// HTTP methods a sub-request can use.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

/// One operation inside a batch, in the API's wire format.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct SubRequest {
    pub method: HttpMethod,
    pub relative_url: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
}

impl SubRequest {
    pub fn get(relative_url: impl Into<String>) -> Self {
        SubRequest {
            method: HttpMethod::Get,
            relative_url: relative_url.into(),
            name: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// The entity a template position decodes into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotKind {
    Me,
    /// Intermediate sub-request that only feeds ids to a later one. Its
    /// response is never decoded and its failures are not reported.
    Reference,
    Friends,
    Likes,
    Feed,
    Home,
    Photos,
    Videos,
}

impl SlotKind {
    /// Every kind that fills a profile slot.
    pub const ENTITIES: [SlotKind; 7] = [
        SlotKind::Me,
        SlotKind::Friends,
        SlotKind::Likes,
        SlotKind::Feed,
        SlotKind::Home,
        SlotKind::Photos,
        SlotKind::Videos,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            SlotKind::Me => "me",
            SlotKind::Reference => "reference",
            SlotKind::Friends => "friends",
            SlotKind::Likes => "likes",
            SlotKind::Feed => "feed",
            SlotKind::Home => "home",
            SlotKind::Photos => "photos",
            SlotKind::Videos => "videos",
        }
    }

    pub const fn is_reference(&self) -> bool {
        matches!(self, SlotKind::Reference)
    }

    /// Decodes `body` and stores the entity in the matching profile slot.
    ///
    /// Returns `Ok(false)` for reference slots, which hold nothing. On error
    /// the profile is left untouched.
    pub fn decode_into(
        &self,
        body: &str,
        profile: &mut Profile,
    ) -> Result<bool, DecodeError> {
        match self {
            SlotKind::Reference => return Ok(false),
            SlotKind::Me => profile.me = Some(schema::decode(body)?),
            SlotKind::Friends => profile.friends = Some(schema::decode(body)?),
            SlotKind::Likes => profile.likes = Some(schema::decode(body)?),
            SlotKind::Feed => profile.feed = Some(schema::decode(body)?),
            SlotKind::Home => profile.home = Some(schema::decode(body)?),
            SlotKind::Photos => profile.photos = Some(schema::decode(body)?),
            SlotKind::Videos => profile.videos = Some(schema::decode(body)?),
        }
        Ok(true)
    }
}

/// A sub-request paired with the entity its response decodes into.
#[derive(Clone, Debug, PartialEq)]
pub struct Slot {
    pub request: SubRequest,
    pub kind: SlotKind,
}

impl Slot {
    pub fn new(request: SubRequest, kind: SlotKind) -> Self {
        Slot { request, kind }
    }
}

/// An ordered batch of sub-requests. Position is the correlation key
/// between the request and the response array.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchTemplate {
    slots: Vec<Slot>,
}

impl BatchTemplate {
    pub fn new(slots: Vec<Slot>) -> Self {
        BatchTemplate { slots }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, position: usize) -> Option<&Slot> {
        self.slots.get(position)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Position of the sub-request carrying `name`, if any.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.request.name.as_deref() == Some(name))
    }

    /// Serializes the sub-requests into the value of the `batch` form field.
    pub fn to_batch_param(&self) -> Result<String> {
        let requests: Vec<&SubRequest> = self.slots.iter().map(|slot| &slot.request).collect();
        serde_json::to_string(&requests).map_err(GraphError::Serialization)
    }
}

/// Result-set sizes for the list queries of the profile template.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub struct ResultLimits {
    pub likes: u32,
    pub friends: u32,
    pub feed: u32,
    pub home: u32,
    pub photos: u32,
    pub videos: u32,
}

impl ResultLimits {
    pub const FULL: ResultLimits = ResultLimits {
        likes: 10,
        friends: 500,
        feed: 10,
        home: 10,
        photos: 10,
        videos: 10,
    };

    pub const LITE: ResultLimits = ResultLimits {
        likes: 1,
        friends: 200,
        feed: 1,
        home: 1,
        photos: 1,
        videos: 1,
    };
}

/// Builds the profile template: the owner's summary, two named reference
/// queries, the friend and page lookups that consume them, then the
/// timelines and media.
pub fn profile_template(limits: &ResultLimits) -> BatchTemplate {
    BatchTemplate::new(vec![
        Slot::new(
            SubRequest::get(format!("me?fields={USER_FIELDS}")),
            SlotKind::Me,
        ),
        Slot::new(
            SubRequest::get(format!("me/likes?limit={}", limits.likes)).named("get-likes"),
            SlotKind::Reference,
        ),
        Slot::new(
            SubRequest::get(format!("me/friends?limit={}", limits.friends)).named("get-friends"),
            SlotKind::Reference,
        ),
        Slot::new(
            SubRequest::get(format!(
                "?ids={{result=get-friends:$.data.*.id}}&fields={USER_FIELDS}"
            )),
            SlotKind::Friends,
        ),
        Slot::new(
            SubRequest::get(format!(
                "?ids={{result=get-likes:$.data.*.id}}&fields={PAGE_FIELDS}"
            )),
            SlotKind::Likes,
        ),
        Slot::new(
            SubRequest::get(format!("me/feed?limit={}", limits.feed)),
            SlotKind::Feed,
        ),
        Slot::new(
            SubRequest::get(format!("me/home?limit={}", limits.home)),
            SlotKind::Home,
        ),
        Slot::new(
            SubRequest::get(format!("me/photos?limit={}", limits.photos)),
            SlotKind::Photos,
        ),
        Slot::new(
            SubRequest::get(format!("me/videos?limit={}", limits.videos)),
            SlotKind::Videos,
        ),
    ])
}

/// Registry of named batch templates.
///
/// Built once at startup and shared read-only; it has no interior
/// mutability, so concurrent lookups need no locking.
#[derive(Clone, Debug)]
pub struct Catalog {
    templates: HashMap<String, BatchTemplate>,
}

impl Catalog {
    pub const FULL: &'static str = "full";
    pub const LITE: &'static str = "lite";

    /// Catalog holding the `full` and `lite` presets.
    pub fn builtin() -> Self {
        Catalog {
            templates: HashMap::from([
                (Self::FULL.to_string(), profile_template(&ResultLimits::FULL)),
                (Self::LITE.to_string(), profile_template(&ResultLimits::LITE)),
            ]),
        }
    }

    /// Adds a preset using the profile template shape.
    ///
    /// An existing key, built-in ones included, is replaced. Configured
    /// presets are checked by `Config::validate` before they get here, so
    /// only code can override `full` or `lite`.
    pub fn with_preset(mut self, key: impl Into<String>, limits: ResultLimits) -> Self {
        self.templates.insert(key.into(), profile_template(&limits));
        self
    }

    pub fn lookup(&self, key: &str) -> Result<&BatchTemplate> {
        self.templates
            .get(key)
            .ok_or_else(|| GraphError::CatalogKeyNotFound(key.to_string()))
    }

    /// Registered keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
