//! End-to-end statement construction scenarios, from described schema and
//! raw filter input down to the generated SQL and parameter list.

use sportdb_admin::{
    ColumnSchema, FilterCriterion, FilterInput, FilterSet, KeyRole, RowKey, TableSchema, Value,
    sql,
};

fn sportangebot() -> TableSchema {
    TableSchema::new("Sportangebot")
        .with_column(
            ColumnSchema::new("angebot_id", "int(11)", false)
                .with_key_role(KeyRole::Primary)
                .with_extra("auto_increment"),
        )
        .with_column(ColumnSchema::new("angebot_name", "varchar(100)", false))
        .with_column(ColumnSchema::new("status", "enum('aktiv','inaktiv')", false))
}

#[test]
fn status_filter_with_limit_matches_expected_sql() {
    let schema = sportangebot();
    let criteria = FilterSet::from_inputs(
        &schema,
        vec![(
            "status".to_string(),
            FilterInput::Selection(vec![Value::Text("aktiv".into())]),
        )],
    )
    .unwrap();

    let stmt = sql::build_select("Sportangebot", &criteria, Some(50));
    assert_eq!(
        stmt.sql,
        "SELECT * FROM `Sportangebot` WHERE `status` IN (?) LIMIT 50"
    );
    assert_eq!(stmt.params, vec![Value::Text("aktiv".into())]);
}

#[test]
fn active_empty_filter_differs_from_inactive_filter() {
    let schema = sportangebot();

    let inactive = FilterSet::from_inputs(&schema, vec![]).unwrap();
    let unconstrained = sql::build_select("Sportangebot", &inactive, None);
    assert_eq!(unconstrained.sql, "SELECT * FROM `Sportangebot`");

    let active_empty = FilterSet::from_inputs(
        &schema,
        vec![("status".to_string(), FilterInput::Selection(vec![]))],
    )
    .unwrap();
    let excluded = sql::build_select("Sportangebot", &active_empty, None);
    assert_eq!(excluded.sql, "SELECT * FROM `Sportangebot` WHERE 1 = 0");
    assert_ne!(unconstrained.sql, excluded.sql);
}

#[test]
fn inverted_range_is_built_not_rejected() {
    let schema = sportangebot();
    let criteria = FilterSet::from_inputs(
        &schema,
        vec![(
            "angebot_id".to_string(),
            FilterInput::Range {
                low: Value::Int(100),
                high: Value::Int(1),
            },
        )],
    )
    .unwrap();

    let stmt = sql::build_select("Sportangebot", &criteria, None);
    // BETWEEN 100 AND 1 matches nothing; the statement itself is valid.
    assert_eq!(
        stmt.sql,
        "SELECT * FROM `Sportangebot` WHERE `angebot_id` BETWEEN ? AND ?"
    );
    assert_eq!(stmt.params, vec![Value::Int(100), Value::Int(1)]);
}

#[test]
fn insert_then_select_by_key_addresses_the_same_row() {
    let schema = sportangebot();
    let values = vec![
        ("angebot_id".to_string(), Value::from(12u32)),
        ("angebot_name".to_string(), Value::Text("Judo".into())),
        ("status".to_string(), Value::Text("aktiv".into())),
    ];
    let insert = sql::build_insert(&schema.table_name, &values).unwrap();
    assert_eq!(
        insert.sql,
        "INSERT INTO `Sportangebot` (`angebot_id`, `angebot_name`, `status`) VALUES (?, ?, ?)"
    );
    // The fixed-width input arrived normalized.
    assert_eq!(insert.params[0], Value::Int(12));

    let key = RowKey::from_raw(&schema, &["12"]).unwrap();
    let select = sql::build_select_by_key(&schema.table_name, key.columns(), key.values()).unwrap();
    assert_eq!(
        select.sql,
        "SELECT * FROM `Sportangebot` WHERE `angebot_id` = ?"
    );
    assert_eq!(select.params, vec![Value::Int(12)]);
}

#[test]
fn composite_key_delete_is_stable_across_repeats() {
    let pk_cols = vec!["angebot_id".to_string(), "termin".to_string()];
    let pk_vals = vec![Value::Int(7), Value::Text("2026-04-01 10:00:00".into())];

    let first = sql::build_delete("Veranstaltung", &pk_cols, &pk_vals).unwrap();
    let second = sql::build_delete("Veranstaltung", &pk_cols, &pk_vals).unwrap();
    // Identical statements: re-issuing simply affects zero rows the second
    // time, which is not an error.
    assert_eq!(first, second);
    assert_eq!(
        first.sql,
        "DELETE FROM `Veranstaltung` WHERE `angebot_id` = ? AND `termin` = ?"
    );
}

#[test]
fn table_without_primary_key_refuses_row_addressing() {
    let schema = TableSchema::new("Protokoll")
        .with_column(ColumnSchema::new("nachricht", "varchar(200)", true));
    assert!(RowKey::from_raw(&schema, &["1"]).is_err());
}

#[test]
fn criteria_order_drives_parameter_order() {
    let mut criteria = FilterSet::new();
    criteria.insert(
        "a",
        FilterCriterion::Range {
            low: Value::Int(1),
            high: Value::Int(2),
        },
    );
    criteria.insert(
        "b",
        FilterCriterion::OneOf(vec![Value::Int(3), Value::Int(4)]),
    );
    let stmt = sql::build_select("T", &criteria, None);
    assert_eq!(
        stmt.params,
        vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::Int(4)]
    );
}
