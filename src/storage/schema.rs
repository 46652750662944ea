//! Database schema definitions

/// SQL to create the users table
pub const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    age INTEGER NOT NULL,
    profession TEXT NOT NULL,
    friendly BOOLEAN NOT NULL
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_users_name ON users(name)",
];

/// Exact-match lookup; columns are listed in the order `row_to_user` decodes them
pub const SELECT_USERS_BY_NAME: &str =
    "SELECT id, name, age, profession, friendly FROM users WHERE name = ?1";

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_USERS_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
