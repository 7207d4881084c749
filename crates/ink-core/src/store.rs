//! The committed shape store.
//!
//! Shapes are kept in insertion order, which is also paint order (z-order):
//! the last shape is topmost. Callers address shapes by [`ShapeId`], never by
//! position, because positions shift whenever a shape is removed.

use crate::id::ShapeId;
use crate::model::Shape;
use serde::{Deserialize, Serialize, Serializer};

/// Serializes as a bare array of shapes. Deserializing goes through
/// [`ShapeStore::push`] and fails on invalid shapes or duplicate ids.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "Vec<Shape>")]
pub struct ShapeStore {
    shapes: Vec<Shape>,
}

impl Serialize for ShapeStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.shapes.serialize(serializer)
    }
}

impl TryFrom<Vec<Shape>> for ShapeStore {
    type Error = String;

    fn try_from(shapes: Vec<Shape>) -> Result<Self, Self::Error> {
        let mut store = ShapeStore::new();
        for shape in shapes {
            store.push(shape)?;
        }
        Ok(store)
    }
}

impl ShapeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Append a shape on top of the stack.
    ///
    /// # Errors
    /// Rejects shapes that violate the committed-shape invariants or reuse
    /// an id already present in the store.
    pub fn push(&mut self, shape: Shape) -> Result<ShapeId, String> {
        shape.validate()?;
        if self.contains(shape.id) {
            return Err(format!("duplicate shape id {}", shape.id));
        }
        let id = shape.id;
        self.shapes.push(shape);
        Ok(id)
    }

    /// Insert a shape at a z-position, clamped to the top of the stack.
    ///
    /// # Errors
    /// Same conditions as [`ShapeStore::push`].
    pub fn insert(&mut self, z: usize, shape: Shape) -> Result<ShapeId, String> {
        shape.validate()?;
        if self.contains(shape.id) {
            return Err(format!("duplicate shape id {}", shape.id));
        }
        let id = shape.id;
        self.shapes.insert(z.min(self.shapes.len()), shape);
        Ok(id)
    }

    /// Remove a shape by id, returning it with its former z-position.
    pub fn remove(&mut self, id: ShapeId) -> Option<(usize, Shape)> {
        let z = self.z_index(id)?;
        Some((z, self.shapes.remove(z)))
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id == id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.z_index(id).is_some()
    }

    /// Current paint position of a shape (0 = bottom).
    pub fn z_index(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id == id)
    }

    /// Shapes bottom to top (paint order).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Shape> {
        self.shapes.iter()
    }

    /// Shapes top to bottom (hit-test order).
    pub fn iter_topmost(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().rev()
    }

    pub fn as_slice(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }
}
