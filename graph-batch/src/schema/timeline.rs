use super::common::{Action, Application, Author, LikeList, Paging, Privacy};
use super::{Entity, null_as_default};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Posts on the token owner's own wall.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Feed {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<Post>,
    pub paging: Option<Paging>,
}

impl Entity for Feed {
    const NAME: &'static str = "feed";
}

/// Posts from the token owner's news feed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Home {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<Post>,
    pub paging: Option<Paging>,
}

impl Entity for Home {
    const NAME: &'static str = "home";
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Option<String>,
    pub from: Option<Author>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status_type: Option<String>,
    pub message: Option<String>,
    pub story: Option<String>,
    pub story_tags: Option<StoryTags>,
    pub name: Option<String>,
    pub caption: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub picture: Option<String>,
    pub icon: Option<String>,
    pub created_time: Option<String>,
    pub updated_time: Option<String>,
    pub privacy: Option<Privacy>,
    pub application: Option<Application>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub actions: Vec<Action>,
    pub likes: Option<LikeList>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StoryTag {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub offset: Option<i64>,
    pub length: Option<i64>,
}

/// Story tags come keyed by their character offset in older responses and
/// as a flat list in newer ones.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoryTags {
    ByOffset(BTreeMap<String, Vec<StoryTag>>),
    List(Vec<StoryTag>),
}

impl StoryTags {
    /// All tags regardless of the encoding used.
    pub fn tags(&self) -> Vec<&StoryTag> {
        match self {
            StoryTags::ByOffset(by_offset) => by_offset.values().flatten().collect(),
            StoryTags::List(list) => list.iter().collect(),
        }
    }
}
