use crate::{
    animation::clock::AnimationClock,
    face::controls::KnotEdit,
    geometry::knot::{Knot, KnotId},
};

/// State that survives from one frame to the next.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceState {
    pub knots: [Knot; 2],
    pub clock: AnimationClock,
}

impl FaceState {
    pub fn new(knots: [Knot; 2], clock: AnimationClock) -> Self {
        Self { knots, clock }
    }

    pub fn knot(&self, id: KnotId) -> Knot {
        self.knots[id.index()]
    }

    pub fn apply(&mut self, edit: KnotEdit) {
        self.knots[edit.id.index()] = edit.knot;
    }
}
