use super::common::{NamedRef, Picture};
use super::{Entity, null_as_default};
use serde::{Deserialize, Serialize};

/// Profile summary of the token owner.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Me {
    pub id: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub name: Option<String>,
    pub username: Option<String>,
    pub birthday: Option<String>,
    pub gender: Option<String>,
    pub link: Option<String>,
    pub locale: Option<String>,
    /// Hours from UTC. Some regions use fractional offsets.
    pub timezone: Option<f64>,
    pub updated_time: Option<String>,
    pub verified: Option<bool>,
    pub picture: Option<Picture>,
    pub hometown: Option<NamedRef>,
    pub location: Option<NamedRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub education: Vec<Education>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub work: Vec<Work>,
}

impl Entity for Me {
    const NAME: &'static str = "me";
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub school: Option<NamedRef>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Work {
    pub employer: Option<NamedRef>,
}
