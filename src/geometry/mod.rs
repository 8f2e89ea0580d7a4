pub mod eye_frame;
pub mod knot;
