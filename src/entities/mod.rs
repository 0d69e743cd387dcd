//! Sea-ORM entities, one per table.
//!
//! The Postgres `search_vector` columns are generated and database-managed;
//! they are deliberately not mapped here.

pub mod clients;
pub mod fosters;
pub mod pets;
pub mod users;
