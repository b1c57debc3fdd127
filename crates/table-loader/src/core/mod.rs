//! Core building blocks: the column model, the SQL value scalar, and the
//! capability traits the loader consumes.

pub mod column;
pub mod traits;
pub mod value;

pub use column::{resolve_columns, Column, ColumnSpec};
pub use traits::{DatabaseHandle, PreparedStatement, SqlTypeTag};
pub use value::SqlValue;
