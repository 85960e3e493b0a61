pub mod columns;
pub mod row;
