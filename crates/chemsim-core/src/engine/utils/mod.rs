//! Small helpers shared by the tick tasks.

pub mod sampling;
