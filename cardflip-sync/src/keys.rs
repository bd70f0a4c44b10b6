use cardflip_core::TopicId;
use std::fmt;

/// Resource family a cache key belongs to; the unit of invalidation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    Cards,
    Topics,
}

/// Identifies one cacheable read result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Cards,
    Topics,
    Topic(TopicId),
}

impl CacheKey {
    pub fn resource(&self) -> Resource {
        match self {
            CacheKey::Cards => Resource::Cards,
            CacheKey::Topics | CacheKey::Topic(_) => Resource::Topics,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Cards => write!(f, "flashcards"),
            CacheKey::Topics => write!(f, "topics"),
            CacheKey::Topic(id) => write!(f, "topic:{id}"),
        }
    }
}

/// Cross-resource invalidation edges, as data rather than call-site
/// knowledge: deleting from the collection on the left can change the
/// collection on the right.
pub const DELETE_DEPENDENTS: &[(Resource, Resource)] = &[(Resource::Topics, Resource::Cards)];

pub fn delete_dependents(resource: Resource) -> impl Iterator<Item = Resource> {
    DELETE_DEPENDENTS
        .iter()
        .filter(move |(from, _)| *from == resource)
        .map(|(_, to)| *to)
}
