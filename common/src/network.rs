pub mod block;
pub mod model;
pub mod range;
pub mod target;
