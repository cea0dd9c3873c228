pub mod model;
pub mod name;
pub mod record;
