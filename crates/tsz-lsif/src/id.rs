//! Id generation for graph elements (§4.1).
//!
//! Ids are either monotonic integers or 128-bit UUIDs; the choice is fixed for
//! the whole run by `IdMode` and never mixed within one emitted stream.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::{Serialize, Serializer};
use uuid::Uuid;

/// How element ids are generated for a run. Fixed at start, per §4.1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IdMode {
    #[default]
    Monotonic,
    Uuid,
}

/// An element id, either a monotonic integer or a UUID.
///
/// Serializes as a bare number or string so the wire shape matches whichever
/// `IdMode` produced it, matching the LSIF convention that ids are either
/// integers or strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementId {
    Int(u64),
    Uuid(Uuid),
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementId::Int(n) => write!(f, "{n}"),
            ElementId::Uuid(u) => write!(f, "{u}"),
        }
    }
}

impl Serialize for ElementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ElementId::Int(n) => serializer.serialize_u64(*n),
            ElementId::Uuid(u) => serializer.serialize_str(&u.to_string()),
        }
    }
}

struct ElementIdVisitor;

impl<'de> Visitor<'de> for ElementIdVisitor {
    type Value = ElementId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or a UUID string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(ElementId::Int(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(ElementId::Int(v as u64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Uuid::parse_str(v)
            .map(ElementId::Uuid)
            .map_err(|_| de::Error::custom("not a valid UUID string"))
    }
}

impl<'de> Deserialize<'de> for ElementId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ElementIdVisitor)
    }
}

/// Process-wide id generator. Entered only from the single driver thread
/// (§5); the counter is an `AtomicU64` rather than a plain `Cell` so the
/// type stays `Sync`.
pub struct IdGenerator {
    mode: IdMode,
    next: AtomicU64,
}

impl IdGenerator {
    pub fn new(mode: IdMode) -> Self {
        Self {
            mode,
            next: AtomicU64::new(1),
        }
    }

    pub fn mode(&self) -> IdMode {
        self.mode
    }

    pub fn fresh(&self) -> ElementId {
        match self.mode {
            IdMode::Monotonic => ElementId::Int(self.next.fetch_add(1, Ordering::Relaxed)),
            IdMode::Uuid => ElementId::Uuid(Uuid::new_v4()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monotonic_ids_increase() {
        let gen = IdGenerator::new(IdMode::Monotonic);
        let a = gen.fresh();
        let b = gen.fresh();
        assert_ne!(a, b);
        if let (ElementId::Int(a), ElementId::Int(b)) = (a, b) {
            assert!(b > a);
        } else {
            panic!("expected monotonic ints");
        }
    }

    #[test]
    fn uuid_ids_are_unique() {
        let gen = IdGenerator::new(IdMode::Uuid);
        let a = gen.fresh();
        let b = gen.fresh();
        assert_ne!(a, b);
    }
}
