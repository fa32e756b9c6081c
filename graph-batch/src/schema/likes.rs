use super::Entity;
use super::common::{Location, Picture};
use crate::value::StringOrNumber;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Liked pages keyed by page id, as returned by an `?ids=` lookup.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Likes(pub BTreeMap<String, Page>);

impl Likes {
    pub fn get(&self, id: &str) -> Option<&Page> {
        self.0.get(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Page)> {
        self.0.iter()
    }
}

impl Entity for Likes {
    const NAME: &'static str = "likes";
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cover {
    /// Observed both as a string and as a number.
    pub cover_id: Option<StringOrNumber>,
    pub offset_x: Option<i64>,
    pub offset_y: Option<i64>,
    pub source: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: Option<String>,
    pub name: Option<String>,
    pub username: Option<String>,
    pub category: Option<String>,
    pub about: Option<String>,
    pub link: Option<String>,
    pub website: Option<String>,
    pub can_post: Option<bool>,
    pub is_published: Option<bool>,
    pub is_community_page: Option<bool>,
    pub checkins: Option<i64>,
    pub talking_about_count: Option<i64>,
    pub were_here_count: Option<i64>,
    /// Like count. Observed both as a string and as a number.
    pub likes: Option<StringOrNumber>,
    pub cover: Option<Cover>,
    pub picture: Option<Picture>,
    pub location: Option<Location>,

    // Category specific fields.
    pub mission: Option<String>,
    pub company_overview: Option<String>,
    pub founded: Option<String>,
    pub awards: Option<String>,
    pub network: Option<String>,
    pub plot_outline: Option<String>,
    pub release_date: Option<String>,
    pub description: Option<String>,
    pub directed_by: Option<String>,
    pub genre: Option<String>,
    pub schedule: Option<String>,
    pub season: Option<String>,
    pub starring: Option<String>,
    pub written_by: Option<String>,
}
