pub mod decode;
pub mod manifest;
pub mod resolver;
pub mod store;
