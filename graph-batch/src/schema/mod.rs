//! Typed schemas for the entities returned inside a batch response.
//!
//! The graph API is loose about its own documentation: fields go missing,
//! come back as `null`, or switch between string and number encodings.
//! Every field here is therefore optional, collections tolerate `null`, and
//! unstable scalars use [`StringOrNumber`](crate::value::StringOrNumber).
//!
//! Decoding is whole-or-nothing. [`decode`] either returns a complete entity
//! or a [`DecodeError`]; the reconciler decides what to do with the error.

mod common;
mod friends;
mod likes;
mod me;
mod media;
mod timeline;

pub use common::{
    Action, Application, Author, CursorPaging, Cursors, Image, LikeList, Location, NamedRef,
    Paging, Picture, PictureData, Place, Privacy, Tag, Tags,
};
pub use friends::{Friend, Friends};
pub use likes::{Cover, Likes, Page};
pub use me::{Education, Me, Work};
pub use media::{Photo, Photos, Video, Videos};
pub use timeline::{Feed, Home, Post, StoryTag, StoryTags};

use crate::errors::DecodeError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// An entity that can be decoded from a sub-response body.
pub trait Entity: DeserializeOwned {
    /// Name used in diagnostics.
    const NAME: &'static str;
}

/// Decodes a sub-response body into its entity.
pub fn decode<T: Entity>(body: &str) -> Result<T, DecodeError> {
    serde_json::from_str(body).map_err(|source| DecodeError {
        entity: T::NAME,
        source,
    })
}

/// Treats an explicit `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
