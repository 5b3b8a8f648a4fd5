pub mod builtin;
pub mod model;
