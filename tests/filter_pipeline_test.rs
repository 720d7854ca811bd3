//! From loaded snapshot to offered widgets to generated SQL — the filter
//! sidebar's full data path, without a live database.

use sportdb_admin::{
    ColumnSchema, FilterInput, FilterSet, InputSpec, KeyRole, QueryResult, TableSchema,
    TableSnapshot, Value, sql,
};

fn schema() -> TableSchema {
    TableSchema::new("Teilnahme")
        .with_column(
            ColumnSchema::new("mitglied_id", "int(11)", false).with_key_role(KeyRole::Primary),
        )
        .with_column(
            ColumnSchema::new("angebot_id", "int(11)", false).with_key_role(KeyRole::Primary),
        )
        .with_column(ColumnSchema::new("beitrag", "decimal(6,2)", false))
        .with_column(ColumnSchema::new("beitritt", "date", false))
        .with_column(ColumnSchema::new("status", "enum('aktiv','inaktiv')", false))
}

fn snapshot() -> TableSnapshot {
    let mut data = QueryResult::new(vec![
        "mitglied_id".into(),
        "angebot_id".into(),
        "beitrag".into(),
        "beitritt".into(),
        "status".into(),
    ]);
    let date = |d: &str| {
        Value::Date(chrono::NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap())
    };
    data.push_row(vec![
        Value::Int(1),
        Value::Int(10),
        Value::Decimal("25.00".into()),
        date("2025-10-01"),
        Value::Text("aktiv".into()),
    ]);
    data.push_row(vec![
        Value::Int(2),
        Value::Int(10),
        Value::Decimal("30.00".into()),
        date("2025-11-15"),
        Value::Text("inaktiv".into()),
    ]);
    TableSnapshot::new(schema(), data)
}

#[test]
fn offered_widgets_follow_domains() {
    let snap = snapshot();
    assert_eq!(
        snap.offered_filter("mitglied_id"),
        Some(InputSpec::IntegerField)
    );
    assert_eq!(
        snap.offered_filter("beitrag"),
        Some(InputSpec::DecimalField)
    );
    assert_eq!(snap.offered_filter("beitritt"), Some(InputSpec::DatePicker));
    assert_eq!(
        snap.offered_filter("status"),
        Some(InputSpec::MultiSelect {
            options: vec!["aktiv".into(), "inaktiv".into()]
        })
    );
}

#[test]
fn single_valued_numeric_column_offers_nothing() {
    let snap = snapshot();
    // angebot_id is 10 in every loaded row.
    assert_eq!(snap.offered_filter("angebot_id"), None);
}

#[test]
fn collected_inputs_become_a_conjunctive_select() {
    let snap = snapshot();
    let date = |d: &str| {
        Value::Date(chrono::NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap())
    };
    let criteria = FilterSet::from_inputs(
        &snap.schema,
        vec![
            (
                "status".to_string(),
                FilterInput::Selection(vec![Value::Text("aktiv".into())]),
            ),
            (
                "beitritt".to_string(),
                FilterInput::Range {
                    low: date("2025-10-01"),
                    high: date("2025-12-31"),
                },
            ),
        ],
    )
    .unwrap();

    let stmt = sql::build_select("Teilnahme", &criteria, Some(200));
    // Schema order: beitritt before status.
    assert_eq!(
        stmt.sql,
        "SELECT * FROM `Teilnahme` WHERE `beitritt` BETWEEN ? AND ? \
         AND `status` IN (?) LIMIT 200"
    );
    assert_eq!(stmt.params.len(), 3);
    assert_eq!(stmt.params[2], Value::Text("aktiv".into()));
}

#[test]
fn unknown_filter_column_never_reaches_sql() {
    let snap = snapshot();
    let result = FilterSet::from_inputs(
        &snap.schema,
        vec![("geheim".to_string(), FilterInput::Selection(vec![]))],
    );
    assert!(result.is_err());
}
