use super::common::{Author, CursorPaging, Image, LikeList, Place, Tags};
use super::{Entity, null_as_default};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Photos {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<Photo>,
    pub paging: Option<CursorPaging>,
}

impl Entity for Photos {
    const NAME: &'static str = "photos";
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: Option<String>,
    pub from: Option<Author>,
    pub height: Option<u32>,
    pub width: Option<u32>,
    pub icon: Option<String>,
    pub link: Option<String>,
    pub picture: Option<String>,
    pub source: Option<String>,
    pub created_time: Option<String>,
    pub updated_time: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<Image>,
    pub likes: Option<LikeList>,
    pub place: Option<Place>,
    pub tags: Option<Tags>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Videos {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<Video>,
    pub paging: Option<CursorPaging>,
}

impl Entity for Videos {
    const NAME: &'static str = "videos";
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: Option<String>,
    pub from: Option<Author>,
    pub picture: Option<String>,
    pub source: Option<String>,
    pub created_time: Option<String>,
    pub updated_time: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<Image>,
    pub likes: Option<LikeList>,
    pub tags: Option<Tags>,
}
