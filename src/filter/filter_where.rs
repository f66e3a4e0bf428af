use serde_json::{Map, Value};

use super::error::FilterError;
use super::filter::Filter;
use super::types::FilterWhereInfo;

/// Translates a where object into a SQL predicate over the JSONB `body` column.
///
/// Only field equality is supported: `{ field: value }` or
/// `{ field: { "$eq": value } }`, all conditions joined with AND.
pub struct FilterWhere {
    param_values: Vec<Value>,
    param_index: usize,
}

impl FilterWhere {
    pub fn new(starting_param_index: usize) -> Self {
        Self {
            param_values: vec![],
            param_index: starting_param_index,
        }
    }

    /// Parameters are numbered from `starting_param_index + 1`.
    pub fn generate(where_data: &Value, starting_param_index: usize) -> Result<(String, Vec<Value>), FilterError> {
        let mut filter_where = Self::new(starting_param_index);
        let mut sql_conditions = vec![];
        for condition in Self::conditions(where_data)? {
            sql_conditions.push(filter_where.build_sql_condition(&condition)?);
        }

        let sql = if sql_conditions.is_empty() {
            "TRUE".to_string()
        } else {
            sql_conditions.join(" AND ")
        };
        Ok((sql, filter_where.param_values))
    }

    pub fn validate(where_data: &Value) -> Result<(), FilterError> {
        Self::conditions(where_data).map(|_| ())
    }

    /// JSONB expression for a top-level document field
    pub fn column_expr(field: &str) -> Result<String, FilterError> {
        Filter::validate_field_name(field)?;
        Ok(format!("body -> '{}'", field))
    }

    /// Flatten a where object into one equality per field
    pub fn conditions(where_data: &Value) -> Result<Vec<FilterWhereInfo>, FilterError> {
        let obj = match where_data {
            Value::Null => return Ok(vec![]),
            Value::Object(obj) => obj,
            _ => return Err(FilterError::InvalidWhereClause("WHERE must be an object".to_string())),
        };

        obj.iter()
            .map(|(field, value)| {
                if field.starts_with('$') {
                    return Err(FilterError::UnsupportedOperator(field.clone()));
                }
                Filter::validate_field_name(field)?;
                Ok(FilterWhereInfo {
                    column: field.clone(),
                    data: Self::equality_operand(value)?,
                })
            })
            .collect()
    }

    fn equality_operand(value: &Value) -> Result<Value, FilterError> {
        match value {
            Value::Object(obj) if obj.keys().any(|k| k.starts_with('$')) => single_eq(obj),
            other => Ok(other.clone()),
        }
    }

    fn build_sql_condition(&mut self, condition: &FilterWhereInfo) -> Result<String, FilterError> {
        let column = Self::column_expr(&condition.column)?;
        if condition.data.is_null() {
            Ok(format!("({0} IS NULL OR {0} = 'null'::jsonb)", column))
        } else {
            Ok(format!("{} = {}", column, self.param(condition.data.clone())))
        }
    }

    fn param(&mut self, value: Value) -> String {
        self.param_values.push(value);
        self.param_index += 1;
        format!("${}", self.param_index)
    }
}

fn single_eq(obj: &Map<String, Value>) -> Result<Value, FilterError> {
    let mut entries = obj.iter();
    match (entries.next(), entries.next()) {
        (Some((op, value)), None) if op == "$eq" => Ok(value.clone()),
        (Some((op, _)), None) => Err(FilterError::UnsupportedOperator(op.clone())),
        _ => Err(FilterError::InvalidWhereClause(
            "Operator objects take a single $eq".to_string(),
        )),
    }
}
