//! Delivery targets.
//!
//! Host applications hand over users in whatever shape they have: a single
//! identifier, a list of identifiers, or a collection object that can list
//! its ids. All three collapse to an ordered `Vec<String>` of uids.

/// A value that carries a user identifier.
pub trait Identified {
    /// The user identifier sent as uid.
    fn uid(&self) -> String;
}

/// A collection that can list the identifiers of its members.
pub trait UidSource: Send + Sync {
    /// Identifiers in collection order.
    fn ids(&self) -> Vec<String>;
}

/// Target users of a delivery.
pub enum Recipients<'a> {
    /// One user.
    One(String),
    /// Several users, in order.
    Many(Vec<String>),
    /// A collection exposing its ids.
    Source(&'a dyn UidSource),
}

impl<'a> Recipients<'a> {
    /// Collects the uids of identifier-bearing values.
    pub fn from_users<I, T>(users: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Identified,
    {
        Recipients::Many(users.into_iter().map(|u| u.uid()).collect())
    }

    /// Normalizes to a flat ordered list of uids.
    pub fn into_uids(self) -> Vec<String> {
        match self {
            Recipients::One(uid) => vec![uid],
            Recipients::Many(uids) => uids,
            Recipients::Source(source) => source.ids(),
        }
    }
}

impl std::fmt::Debug for Recipients<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recipients::One(uid) => f.debug_tuple("One").field(uid).finish(),
            Recipients::Many(uids) => f.debug_tuple("Many").field(uids).finish(),
            Recipients::Source(_) => f.write_str("Source(..)"),
        }
    }
}

impl From<&str> for Recipients<'_> {
    fn from(uid: &str) -> Self {
        Recipients::One(uid.into())
    }
}

impl From<String> for Recipients<'_> {
    fn from(uid: String) -> Self {
        Recipients::One(uid)
    }
}

impl From<u64> for Recipients<'_> {
    fn from(uid: u64) -> Self {
        Recipients::One(uid.to_string())
    }
}

impl From<Vec<String>> for Recipients<'_> {
    fn from(uids: Vec<String>) -> Self {
        Recipients::Many(uids)
    }
}

impl From<Vec<&str>> for Recipients<'_> {
    fn from(uids: Vec<&str>) -> Self {
        Recipients::Many(uids.into_iter().map(Into::into).collect())
    }
}

impl From<&[&str]> for Recipients<'_> {
    fn from(uids: &[&str]) -> Self {
        Recipients::Many(uids.iter().map(|u| u.to_string()).collect())
    }
}

impl From<Vec<u64>> for Recipients<'_> {
    fn from(uids: Vec<u64>) -> Self {
        Recipients::Many(uids.into_iter().map(|u| u.to_string()).collect())
    }
}

impl<'a, S: UidSource> From<&'a S> for Recipients<'a> {
    fn from(source: &'a S) -> Self {
        Recipients::Source(source)
    }
}
