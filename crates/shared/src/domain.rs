use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(UserId);
id_newtype!(HomeId);
id_newtype!(RoomId);

/// Objects are keyed by server-generated UUID strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub String);

impl ObjectId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Home {
    pub id: HomeId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub home_id: HomeId,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ObjectKind {
    #[default]
    Furniture,
    Electronics,
    Appliances,
    Decorations,
    Tools,
    Other,
    /// A category the object service knows about but this client does not.
    Unknown(String),
}

impl ObjectKind {
    pub const SELECTABLE: [ObjectKind; 6] = [
        ObjectKind::Furniture,
        ObjectKind::Electronics,
        ObjectKind::Appliances,
        ObjectKind::Decorations,
        ObjectKind::Tools,
        ObjectKind::Other,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Furniture => "Furniture",
            Self::Electronics => "Electronics",
            Self::Appliances => "Appliances",
            Self::Decorations => "Decorations",
            Self::Tools => "Tools",
            Self::Other => "Other",
            Self::Unknown(raw) => raw,
        }
    }

    pub fn parse(raw: &str) -> Self {
        Self::SELECTABLE
            .iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(raw.trim()))
            .cloned()
            .unwrap_or_else(|| Self::Unknown(raw.to_string()))
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ObjectKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ObjectKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// A reservable item in a room.
///
/// The object service sends `isReserved` and `reservedBy` as two loose
/// fields (with `""` for "nobody"). They are folded into a single
/// `reservation` here so the pair can never disagree: an object counts as
/// reserved only when the service also names who holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ObjectWire", into = "ObjectWire")]
pub struct Object {
    pub id: ObjectId,
    pub name: String,
    pub kind: ObjectKind,
    pub room_id: String,
    pub reservation: Option<Reservation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    /// Raw `reservedBy` value: the reserving user's id as a string.
    pub reserved_by: String,
}

impl Reservation {
    pub fn reserved_by_user(&self) -> Option<UserId> {
        self.reserved_by.trim().parse::<u64>().ok().map(UserId)
    }
}

impl Object {
    pub fn is_reserved(&self) -> bool {
        self.reservation.is_some()
    }

    pub fn reserved_by(&self) -> Option<&str> {
        self.reservation
            .as_ref()
            .map(|reservation| reservation.reserved_by.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ObjectWire {
    id: ObjectId,
    name: String,
    #[serde(rename = "type", default)]
    kind: ObjectKind,
    #[serde(rename = "room_id", alias = "roomId", default)]
    room_id: String,
    #[serde(rename = "isReserved", default)]
    is_reserved: bool,
    #[serde(rename = "reservedBy", default, skip_serializing_if = "Option::is_none")]
    reserved_by: Option<String>,
}

impl From<ObjectWire> for Object {
    fn from(wire: ObjectWire) -> Self {
        let reserved_by = wire.reserved_by.filter(|by| !by.trim().is_empty());
        let reservation = match (wire.is_reserved, reserved_by) {
            (true, Some(reserved_by)) => Some(Reservation { reserved_by }),
            (true, None) => {
                warn!(object_id = %wire.id, "reserved object has no holder; treating as free");
                None
            }
            (false, _) => None,
        };
        Self {
            id: wire.id,
            name: wire.name,
            kind: wire.kind,
            room_id: wire.room_id,
            reservation,
        }
    }
}

impl From<Object> for ObjectWire {
    fn from(object: Object) -> Self {
        let is_reserved = object.reservation.is_some();
        Self {
            id: object.id,
            name: object.name,
            kind: object.kind,
            room_id: object.room_id,
            is_reserved,
            reserved_by: object.reservation.map(|r| r.reserved_by),
        }
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
