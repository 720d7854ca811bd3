//! MySQL result cell decoding.
//!
//! Converts raw row cells into portable [`Value`]s by the reported column
//! type. DECIMAL columns are read as their literal text to preserve
//! precision; integer columns are tried width by width because the driver
//! decodes each MySQL integer type strictly.

use crate::models::Value;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sqlx::mysql::{MySqlRow, MySqlTypeInfo, MySqlValueRef};
use sqlx::{Column, Decode, Row, Type, TypeInfo};

/// Wrapper reading DECIMAL/NUMERIC columns as their exact string form.
#[derive(Debug)]
struct RawDecimal(String);

impl Type<sqlx::MySql> for RawDecimal {
    fn type_info() -> MySqlTypeInfo {
        <String as Type<sqlx::MySql>>::type_info()
    }

    fn compatible(ty: &MySqlTypeInfo) -> bool {
        let name = ty.name().to_lowercase();
        name.contains("decimal") || name.contains("numeric")
    }
}

impl<'r> Decode<'r, sqlx::MySql> for RawDecimal {
    fn decode(value: MySqlValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as Decode<sqlx::MySql>>::decode(value)?;
        Ok(RawDecimal(s.to_string()))
    }
}

/// Decode one cell of a row into a [`Value`].
pub fn decode_cell(row: &MySqlRow, idx: usize) -> Value {
    let type_name = row.columns()[idx].type_info().name().to_uppercase();

    if type_name.contains("DECIMAL") || type_name.contains("NUMERIC") {
        return decode_decimal(row, idx);
    }
    if type_name == "BOOLEAN" {
        return decode_boolean(row, idx);
    }
    if type_name.contains("INT") {
        return decode_integer(row, idx);
    }
    if type_name.contains("FLOAT") || type_name.contains("DOUBLE") {
        return decode_float(row, idx);
    }
    if type_name == "DATE" {
        return decode_date(row, idx);
    }
    if type_name.contains("DATETIME") || type_name.contains("TIMESTAMP") {
        return decode_datetime(row, idx);
    }
    decode_text(row, idx)
}

fn decode_decimal(row: &MySqlRow, idx: usize) -> Value {
    match row.try_get::<Option<RawDecimal>, _>(idx) {
        Ok(Some(v)) => Value::Decimal(v.0),
        Ok(None) => Value::Null,
        Err(e) => {
            tracing::error!("Failed to decode DECIMAL: {:?}", e);
            Value::Null
        }
    }
}

fn decode_integer(row: &MySqlRow, idx: usize) -> Value {
    // Signed widths first, then unsigned.
    if let Ok(Some(v)) = row.try_get::<Option<i8>, _>(idx) {
        return Value::from(v);
    }
    if let Ok(Some(v)) = row.try_get::<Option<i16>, _>(idx) {
        return Value::from(v);
    }
    if let Ok(Some(v)) = row.try_get::<Option<i32>, _>(idx) {
        return Value::from(v);
    }
    if let Ok(Some(v)) = row.try_get::<Option<i64>, _>(idx) {
        return Value::from(v);
    }
    if let Ok(Some(v)) = row.try_get::<Option<u8>, _>(idx) {
        return Value::from(v);
    }
    if let Ok(Some(v)) = row.try_get::<Option<u16>, _>(idx) {
        return Value::from(v);
    }
    if let Ok(Some(v)) = row.try_get::<Option<u32>, _>(idx) {
        return Value::from(v);
    }
    if let Ok(Some(v)) = row.try_get::<Option<u64>, _>(idx) {
        return Value::from(v);
    }
    Value::Null
}

fn decode_boolean(row: &MySqlRow, idx: usize) -> Value {
    if let Ok(Some(v)) = row.try_get::<Option<bool>, _>(idx) {
        return Value::Bool(v);
    }
    if let Ok(Some(v)) = row.try_get::<Option<i8>, _>(idx) {
        return Value::Bool(v != 0);
    }
    Value::Null
}

fn decode_float(row: &MySqlRow, idx: usize) -> Value {
    if let Ok(Some(v)) = row.try_get::<Option<f64>, _>(idx) {
        return Value::Float(v);
    }
    if let Ok(Some(v)) = row.try_get::<Option<f32>, _>(idx) {
        return Value::from(v);
    }
    Value::Null
}

fn decode_date(row: &MySqlRow, idx: usize) -> Value {
    match row.try_get::<Option<NaiveDate>, _>(idx) {
        Ok(Some(v)) => Value::Date(v),
        _ => Value::Null,
    }
}

fn decode_datetime(row: &MySqlRow, idx: usize) -> Value {
    if let Ok(Some(v)) = row.try_get::<Option<NaiveDateTime>, _>(idx) {
        return Value::DateTime(v);
    }
    // TIMESTAMP columns decode as timezone-aware values.
    if let Ok(Some(v)) = row.try_get::<Option<DateTime<Utc>>, _>(idx) {
        return Value::DateTime(v.naive_utc());
    }
    Value::Null
}

fn decode_text(row: &MySqlRow, idx: usize) -> Value {
    if let Ok(Some(v)) = row.try_get::<Option<String>, _>(idx) {
        return Value::Text(v);
    }
    if let Ok(Some(bytes)) = row.try_get::<Option<Vec<u8>>, _>(idx) {
        return match String::from_utf8(bytes) {
            Ok(s) => Value::Text(s),
            Err(e) => Value::Text(STANDARD.encode(e.into_bytes())),
        };
    }
    Value::Null
}
