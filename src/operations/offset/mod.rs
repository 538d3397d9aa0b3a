mod corridor_builder;

pub use corridor_builder::CorridorBuilder;
