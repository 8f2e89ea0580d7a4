pub mod clock;
pub mod interp;
pub mod schedule;
