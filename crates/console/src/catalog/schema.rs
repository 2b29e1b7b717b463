//! The schema diagram: two tables and the relation between them.

use serde::Serialize;

/// A column as drawn in the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: &'static str,
    pub sql_type: &'static str,
    /// Key and default annotations, e.g. `PK, AI` or `UNIQUE`.
    pub extra: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Table {
    pub name: &'static str,
    pub columns: &'static [Column],
}

/// A foreign-key edge between two tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Relation {
    pub from_table: &'static str,
    pub from_column: &'static str,
    pub to_table: &'static str,
    pub to_column: &'static str,
}

/// Everything the schema screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SchemaDiagram {
    pub tables: &'static [Table],
    pub relations: &'static [Relation],
    pub note: &'static str,
}

const fn column(name: &'static str, sql_type: &'static str, extra: &'static str) -> Column {
    Column {
        name,
        sql_type,
        extra,
    }
}

const USERS: [Column; 7] = [
    column("id", "INT", "PK, AI"),
    column("name", "VARCHAR(100)", ""),
    column("email", "VARCHAR(100)", "UNIQUE"),
    column("password", "VARCHAR(255)", ""),
    column("role_id", "INT", "FK"),
    column("is_active", "BOOLEAN", "DEFAULT TRUE"),
    column("created_at", "TIMESTAMP", ""),
];

const ROLES: [Column; 2] = [
    column("id", "INT", "PK, AI"),
    column("name", "VARCHAR(50)", "UNIQUE"),
];

pub const DIAGRAM: SchemaDiagram = SchemaDiagram {
    tables: &[
        Table {
            name: "users",
            columns: &USERS,
        },
        Table {
            name: "roles",
            columns: &ROLES,
        },
    ],
    relations: &[Relation {
        from_table: "users",
        from_column: "role_id",
        to_table: "roles",
        to_column: "id",
    }],
    note: "The database implements a Soft Delete mechanism via the is_active flag. \
           When a user is deleted in the application, the backend updates this flag to FALSE \
           instead of removing the row, preserving referential integrity and audit trails. \
           Role-Based Access Control (RBAC) is enforced using a many-to-one relationship \
           between users and roles.",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relations_point_at_real_columns() {
        for relation in DIAGRAM.relations {
            let has = |table: &str, column: &str| {
                DIAGRAM
                    .tables
                    .iter()
                    .filter(|t| t.name == table)
                    .flat_map(|t| t.columns)
                    .any(|c| c.name == column)
            };
            assert!(has(relation.from_table, relation.from_column));
            assert!(has(relation.to_table, relation.to_column));
        }
    }

    #[test]
    fn test_email_is_unique() {
        let email = USERS.iter().find(|c| c.name == "email").expect("email column");
        assert_eq!(email.extra, "UNIQUE");
    }
}
