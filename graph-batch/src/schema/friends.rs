use super::Entity;
use super::common::Picture;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Friends keyed by user id, as returned by an `?ids=` lookup.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Friends(pub BTreeMap<String, Friend>);

impl Friends {
    pub fn get(&self, id: &str) -> Option<&Friend> {
        self.0.get(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Friend)> {
        self.0.iter()
    }
}

impl Entity for Friends {
    const NAME: &'static str = "friends";
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Friend {
    pub id: Option<String>,
    pub bio: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub link: Option<String>,
    pub locale: Option<String>,
    pub birthday: Option<String>,
    pub updated_time: Option<String>,
    pub timezone: Option<f64>,
    pub picture: Option<Picture>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::decode;

    #[test]
    fn test_decode_friends_map() {
        let body = r#"{
            "200": {"id": "200", "name": "Grace", "picture": {"data": {"url": "https://cdn.example/g.jpg"}}},
            "300": {"id": "300", "name": "Alan", "picture": null}
        }"#;

        let friends: Friends = decode(body).unwrap();
        assert_eq!(friends.len(), 2);
        assert_eq!(friends.get("200").unwrap().name.as_deref(), Some("Grace"));
        assert!(friends.get("300").unwrap().picture.is_none());
    }

    #[test]
    fn test_decode_friends_list_is_rejected() {
        // A list is the shape of `me/friends`, not of the ids lookup.
        let err = decode::<Friends>(r#"{"data": [{"id": "1"}]}"#).unwrap_err();
        assert_eq!(err.entity, "friends");
    }
}
