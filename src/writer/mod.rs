pub mod row;
pub mod schema_gen;
pub mod sqlite;

pub use row::*;
pub use schema_gen::*;
pub use sqlite::*;
