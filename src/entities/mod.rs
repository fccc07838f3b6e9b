//! Entity module - Contains the SeaORM entity definitions for the database.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod split;

pub use split::{Entity as Split, Model as SplitModel};
