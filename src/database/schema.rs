// SQL schema applied at startup; see migrations/ for the files.

pub const INITIAL_SCHEMA: &str = include_str!("../../migrations/001_initial_schema.sql");
