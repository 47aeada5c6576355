//! Embedded SQL migrations

/// One migration: stable id plus its SQL text
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub id: &'static str,
    pub sql: &'static str,
}

/// All embedded migrations, in application order
pub fn get_migrations() -> Vec<Migration> {
    vec![
        Migration {
            id: "001_students",
            sql: include_str!("../../migrations/001_students.sql"),
        },
        Migration {
            id: "002_roster_imports",
            sql: include_str!("../../migrations/002_roster_imports.sql"),
        },
    ]
}
