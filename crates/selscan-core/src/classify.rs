use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Component;

/// Classification bucket for atomic selector components. Universal and
/// pseudo nodes have no bucket of their own; they only reach the `all`
/// accumulation (or nothing at all, for pseudo identities).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Ids,
    Classes,
    Attributes,
    Types,
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bucket::Ids => write!(f, "ids"),
            Bucket::Classes => write!(f, "classes"),
            Bucket::Attributes => write!(f, "attributes"),
            Bucket::Types => write!(f, "types"),
        }
    }
}

/// Total classification over the component kinds. `None` means the kind
/// has no dedicated bucket.
pub fn bucket_for(component: &Component) -> Option<Bucket> {
    match component {
        Component::Id(_) => Some(Bucket::Ids),
        Component::Class(_) => Some(Bucket::Classes),
        Component::Attribute(_) => Some(Bucket::Attributes),
        Component::Type(_) => Some(Bucket::Types),
        Component::Universal
        | Component::PseudoClass { .. }
        | Component::PseudoElement(_)
        | Component::Combinator(_)
        | Component::Comment(_) => None,
    }
}
