//! Operations on routes and corridors. Each operation is a struct built
//! with `new` and run with `execute`.

pub mod compare;
pub mod modification;
pub mod offset;
pub mod query;
pub mod smooth;
