//! Explicit persistence mapping metadata.
//!
//! The entity types in `gradebook-models` carry no mapping annotations.
//! Table and column names, lengths, nullability, key generation, the
//! secondary-table join, the collection table, embedded-field flattening,
//! and fetch strategy are all declared here and consumed by the repository.
//! The migrations carry the matching DDL. Fields absent from this
//! descriptor (gender) are not persisted.

/// How primary key values are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyGeneration {
    /// Database identity column; the key exists only after insert.
    Identity,
}

/// When associated data is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fetch {
    Eager,
    Lazy,
}

/// One entity field mapped to one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    /// Field path on the entity. Embedded values use a dotted path.
    pub field: &'static str,
    pub column: &'static str,
    pub nullable: bool,
    /// Maximum persisted length for text columns.
    pub length: Option<u16>,
}

/// The mapping of an entity to its main table.
#[derive(Debug, Clone, Copy)]
pub struct TableMapping {
    pub table: &'static str,
    pub primary_key: &'static str,
    pub key_generation: KeyGeneration,
    /// Data columns in declaration order, primary key excluded.
    pub columns: &'static [ColumnMapping],
}

impl TableMapping {
    /// Looks up the mapping for an entity field path.
    pub fn column_for(&self, field: &str) -> Option<&ColumnMapping> {
        self.columns.iter().find(|c| c.field == field)
    }

    /// The comma-separated column list for SELECT statements, primary key
    /// first.
    pub fn select_list(&self) -> String {
        let mut list = vec![self.primary_key];
        list.extend(self.columns.iter().map(|c| c.column));
        list.join(", ")
    }

    /// The comma-separated data-column list for INSERT statements. The
    /// identity key is never written.
    pub fn insert_list(&self) -> String {
        self.columns
            .iter()
            .map(|c| c.column)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `$1, $2, ...` placeholders matching [`insert_list`](Self::insert_list).
    pub fn insert_placeholders(&self) -> String {
        (1..=self.columns.len())
            .map(|i| format!("${}", i))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `col = $n` assignments for UPDATE statements, one per data column,
    /// numbered from `$1`.
    pub fn update_assignments(&self) -> String {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{} = ${}", c.column, i + 1))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A second table joined 1:1 to the main record by shared key, holding
/// columns split out of the main row.
#[derive(Debug, Clone, Copy)]
pub struct SecondaryTableMapping {
    pub table: &'static str,
    /// Join column carrying the owner's primary key.
    pub join_column: &'static str,
    pub column: ColumnMapping,
    pub fetch: Fetch,
}

/// A collection of scalar values in its own table, keyed by the owner's id
/// plus a discriminating key column.
#[derive(Debug, Clone, Copy)]
pub struct CollectionTableMapping {
    pub table: &'static str,
    pub join_column: &'static str,
    pub key_column: &'static str,
    pub value_column: &'static str,
}

/// A to-many or to-one association to another entity table.
#[derive(Debug, Clone, Copy)]
pub struct RelationMapping {
    pub table: &'static str,
    /// Column on the related table referencing the owner.
    pub join_column: &'static str,
    /// Whether deleting the owner deletes the related rows. Enforced by the
    /// repository, not by implicit mapping metadata.
    pub cascade_delete: bool,
    pub order_by: Option<&'static str>,
    pub fetch: Fetch,
}

/// Student main table: flattened embedded address, 35-character name
/// columns, identity key.
pub const STUDENTS: TableMapping = TableMapping {
    table: "students",
    primary_key: "id",
    key_generation: KeyGeneration::Identity,
    columns: &[
        ColumnMapping {
            field: "last_name",
            column: "last_name",
            nullable: true,
            length: Some(35),
        },
        ColumnMapping {
            field: "first_name",
            column: "first_name",
            nullable: false,
            length: Some(35),
        },
        ColumnMapping {
            field: "birth_date",
            column: "birth_date",
            nullable: false,
            length: None,
        },
        ColumnMapping {
            field: "phone_number",
            column: "phone_number",
            nullable: true,
            length: None,
        },
        ColumnMapping {
            field: "address.street",
            column: "street",
            nullable: true,
            length: None,
        },
        ColumnMapping {
            field: "address.postal_code",
            column: "postal_code",
            nullable: true,
            length: None,
        },
        ColumnMapping {
            field: "address.city",
            column: "city",
            nullable: true,
            length: None,
        },
    ],
};

/// Secondary table for the student picture, joined on the student id and
/// loaded only on demand.
pub const PICTURES: SecondaryTableMapping = SecondaryTableMapping {
    table: "pictures",
    join_column: "student_id",
    column: ColumnMapping {
        field: "picture",
        column: "picture",
        nullable: false,
        length: None,
    },
    fetch: Fetch::Lazy,
};

/// Owned grade rows: cascade-deleted with the student, descending
/// discipline order, lazily loaded.
pub const GRADES: RelationMapping = RelationMapping {
    table: "grades",
    join_column: "student_id",
    cascade_delete: true,
    order_by: Some("discipline DESC"),
    fetch: Fetch::Lazy,
};

/// Collection table for the denormalized grade map, keyed by
/// (student id, discipline).
pub const ALTERNATIVE_GRADES: CollectionTableMapping = CollectionTableMapping {
    table: "student_grades",
    join_column: "student_id",
    key_column: "discipline",
    value_column: "grade",
};

/// Badge association: owned by the badge side, never cascade-deleted.
pub const BADGES: RelationMapping = RelationMapping {
    table: "badges",
    join_column: "student_id",
    cascade_delete: false,
    order_by: None,
    fetch: Fetch::Eager,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_columns_are_bounded_to_35() {
        let last = STUDENTS.column_for("last_name").unwrap();
        assert!(last.nullable);
        assert_eq!(last.length, Some(35));

        let first = STUDENTS.column_for("first_name").unwrap();
        assert!(!first.nullable);
        assert_eq!(first.length, Some(35));
    }

    #[test]
    fn test_birth_date_is_mandatory() {
        let birth = STUDENTS.column_for("birth_date").unwrap();
        assert!(!birth.nullable);
    }

    #[test]
    fn test_gender_is_unmapped() {
        assert!(STUDENTS.column_for("gender").is_none());
    }

    #[test]
    fn test_address_is_flattened_into_the_main_table() {
        for field in ["address.street", "address.postal_code", "address.city"] {
            assert!(STUDENTS.column_for(field).is_some(), "missing {}", field);
        }
    }

    #[test]
    fn test_key_is_identity_generated() {
        assert_eq!(STUDENTS.key_generation, KeyGeneration::Identity);
        assert_eq!(STUDENTS.primary_key, "id");
    }

    #[test]
    fn test_select_list_orders_columns_as_declared() {
        assert_eq!(
            STUDENTS.select_list(),
            "id, last_name, first_name, birth_date, phone_number, street, postal_code, city"
        );
    }

    #[test]
    fn test_insert_placeholders_match_columns() {
        assert_eq!(STUDENTS.insert_placeholders(), "$1, $2, $3, $4, $5, $6, $7");
        assert_eq!(
            STUDENTS.insert_list().split(", ").count(),
            STUDENTS.columns.len()
        );
    }

    #[test]
    fn test_update_assignments_number_from_one() {
        let assignments = STUDENTS.update_assignments();
        assert!(assignments.starts_with("last_name = $1"));
        assert!(assignments.ends_with("city = $7"));
    }

    #[test]
    fn test_picture_lives_in_a_lazy_secondary_table() {
        assert_eq!(PICTURES.table, "pictures");
        assert_eq!(PICTURES.fetch, Fetch::Lazy);
        assert!(!PICTURES.column.nullable);
    }

    #[test]
    fn test_grades_cascade_and_descend() {
        assert!(GRADES.cascade_delete);
        assert_eq!(GRADES.order_by, Some("discipline DESC"));
        assert_eq!(GRADES.fetch, Fetch::Lazy);
    }

    #[test]
    fn test_badges_do_not_cascade() {
        assert!(!BADGES.cascade_delete);
    }

    #[test]
    fn test_collection_table_keys() {
        assert_eq!(ALTERNATIVE_GRADES.table, "student_grades");
        assert_eq!(ALTERNATIVE_GRADES.key_column, "discipline");
        assert_eq!(ALTERNATIVE_GRADES.value_column, "grade");
    }
}
