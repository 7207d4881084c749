use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for shape ids.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Stable identity of a committed shape.
///
/// Ids survive removal of other shapes from the store, so tools hold an id
/// across a gesture instead of a raw index. Internally a `Spur`: 4 bytes,
/// `Copy`, O(1) equality and hashing.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId(Spur);

impl ShapeId {
    /// Intern a string as a ShapeId, or return the existing one.
    pub fn intern(s: &str) -> Self {
        ShapeId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Generate a fresh id with a kind prefix (e.g. `rectangle_4`, `text_9`).
    ///
    /// Names already interned (for instance ids loaded from a saved canvas)
    /// are skipped.
    pub fn with_prefix(prefix: &str) -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        loop {
            let name = format!("{prefix}_{}", COUNTER.fetch_add(1, Ordering::Relaxed));
            if INTERNER.get(&name).is_none() {
                return Self::intern(&name);
            }
        }
    }
}

impl fmt::Debug for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ShapeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ShapeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ShapeId::intern(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_stable() {
        let a = ShapeId::intern("line_42");
        let b = ShapeId::intern("line_42");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "line_42");
    }

    #[test]
    fn prefixed_ids_are_unique() {
        let a = ShapeId::with_prefix("circle");
        let b = ShapeId::with_prefix("circle");
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("circle_"));
    }

    #[test]
    fn prefixed_ids_skip_loaded_names() {
        let taken: Vec<ShapeId> = (0..64).map(|n| ShapeId::intern(&format!("pin_{n}"))).collect();
        let fresh = ShapeId::with_prefix("pin");
        assert!(!taken.contains(&fresh));
    }
}
