//! Cooperative move animation.
//!
//! The host drives frames by calling [`MoveAnimation::step`] with a
//! monotonic timestamp (e.g. from `requestAnimationFrame`). Each frame moves
//! the shape by `(target − current) × progress`, so the motion eases out and
//! lands exactly on the target once progress reaches 1.

use ink_core::{ShapeId, ShapeStore};

/// Outcome of one animation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStep {
    Running,
    Finished,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct MoveAnimation {
    id: ShapeId,
    /// Target position for anchor 1.
    target: (f32, f32),
    /// Set on the first frame.
    start_ms: Option<f64>,
    duration_ms: f64,
    cancelled: bool,
}

impl MoveAnimation {
    pub fn new(id: ShapeId, target: (f32, f32), duration_ms: f64) -> Self {
        Self {
            id,
            target,
            start_ms: None,
            duration_ms,
            cancelled: false,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn target(&self) -> (f32, f32) {
        self.target
    }

    /// Stop at the next frame, leaving the shape where it is.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Advance one frame.
    pub fn step(&mut self, now_ms: f64, store: &mut ShapeStore) -> AnimationStep {
        if self.cancelled {
            return AnimationStep::Cancelled;
        }
        let Some(shape) = store.get_mut(self.id) else {
            log::debug!("animation target {} is gone", self.id);
            self.cancelled = true;
            return AnimationStep::Cancelled;
        };

        let start = *self.start_ms.get_or_insert(now_ms);
        let progress = if self.duration_ms > 0.0 {
            ((now_ms - start) / self.duration_ms).max(0.0) as f32
        } else {
            1.0
        };

        if progress >= 1.0 {
            shape.translate(self.target.0 - shape.x1, self.target.1 - shape.y1);
            return AnimationStep::Finished;
        }
        let dx = (self.target.0 - shape.x1) * progress;
        let dy = (self.target.1 - shape.y1) * progress;
        shape.translate(dx, dy);
        AnimationStep::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ink_core::{DrawStyle, Shape, ShapeKind};
    use pretty_assertions::assert_eq;

    fn store_with_rect() -> (ShapeStore, ShapeId) {
        let mut store = ShapeStore::new();
        let mut rect = Shape::new(ShapeKind::Rectangle, 0.0, 0.0, &DrawStyle::default());
        rect.set_anchor2(10.0, 10.0);
        let id = store.push(rect).unwrap();
        (store, id)
    }

    #[test]
    fn frames_ease_toward_target_then_snap() {
        let (mut store, id) = store_with_rect();
        let mut anim = MoveAnimation::new(id, (100.0, 0.0), 100.0);

        assert_eq!(anim.step(1000.0, &mut store), AnimationStep::Running);
        assert_eq!(store.get(id).unwrap().x1, 0.0);

        assert_eq!(anim.step(1050.0, &mut store), AnimationStep::Running);
        assert_eq!(store.get(id).unwrap().x1, 50.0);

        assert_eq!(anim.step(1100.0, &mut store), AnimationStep::Finished);
        let s = store.get(id).unwrap();
        assert_eq!((s.x1, s.y1, s.x2, s.y2), (100.0, 0.0, 110.0, 10.0));
    }

    #[test]
    fn cancel_freezes_position() {
        let (mut store, id) = store_with_rect();
        let mut anim = MoveAnimation::new(id, (100.0, 100.0), 100.0);
        anim.step(0.0, &mut store);
        anim.step(50.0, &mut store);
        let before = store.get(id).unwrap().anchor1();

        anim.cancel();
        assert_eq!(anim.step(200.0, &mut store), AnimationStep::Cancelled);
        assert_eq!(store.get(id).unwrap().anchor1(), before);
    }

    #[test]
    fn removed_shape_cancels() {
        let (mut store, id) = store_with_rect();
        let mut anim = MoveAnimation::new(id, (5.0, 5.0), 100.0);
        store.remove(id);
        assert_eq!(anim.step(0.0, &mut store), AnimationStep::Cancelled);
        assert!(anim.is_cancelled());
    }

    #[test]
    fn zero_duration_lands_immediately() {
        let (mut store, id) = store_with_rect();
        let mut anim = MoveAnimation::new(id, (-3.0, 7.0), 0.0);
        assert_eq!(anim.step(0.0, &mut store), AnimationStep::Finished);
        assert_eq!(store.get(id).unwrap().anchor1(), (-3.0, 7.0));
    }

    #[test]
    fn timestamp_before_first_frame_holds_position() {
        let (mut store, id) = store_with_rect();
        let mut anim = MoveAnimation::new(id, (100.0, 0.0), 100.0);
        anim.step(1000.0, &mut store);

        assert_eq!(anim.step(900.0, &mut store), AnimationStep::Running);
        assert_eq!(store.get(id).unwrap().anchor1(), (0.0, 0.0));
    }
}
