//! Entity construction from raw payload fragments

mod entity_builder;

pub use entity_builder::EntityBuilder;
