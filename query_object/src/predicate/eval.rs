//! In-memory evaluation of conditions
//!
//! Rows are JSON objects keyed by column name. A qualified column `m.age` is
//! looked up as `"m.age"` first and then as `"age"`; a missing key reads as
//! NULL. Evaluation follows SQL three-valued logic and a row is selected only
//! when its condition is definitely true.
//!
//! Aggregates and subqueries need the database and are rejected with
//! [`QueryError::Unsupported`].
//!
//! Text ordering (`<`, `>`, `BETWEEN`) compares strings by Unicode code point,
//! not by the database collation, so it agrees with PostgreSQL only under the
//! `C` collation or for ASCII text of one letter case. Equality, `LIKE`,
//! numeric and NULL handling do not depend on collation.

use crate::errors::QueryError;
use crate::predicate::condition::{CompareOperator, Condition, LogicalOperator};
use crate::query_builder::case::{CaseExpr, CaseWhen};
use crate::query_builder::expr::{ArithmeticOperator, ColumnPath, Expr, SqlType};
use serde::Serialize;
use serde_json::{Number, Value};
use std::cmp::Ordering;

/// SQL truth value: `None` is UNKNOWN
type Truth = Option<bool>;

impl Condition {
    /// True when `row` is selected by this condition
    pub fn evaluate(&self, row: &Value) -> Result<bool, QueryError> {
        Ok(self.truth(row)? == Some(true))
    }

    fn truth(&self, row: &Value) -> Result<Truth, QueryError> {
        match self {
            Condition::Compare {
                left,
                operator,
                right,
            } => {
                // a literal NULL operand renders as IS [NOT] NULL
                if let Expr::Value(Value::Null) = right {
                    let is_null = eval_expr(left, row)?.is_null();
                    match operator {
                        CompareOperator::Eq => return Ok(Some(is_null)),
                        CompareOperator::Ne => return Ok(Some(!is_null)),
                        _ => {}
                    }
                }
                let left = eval_expr(left, row)?;
                let right = eval_expr(right, row)?;
                compare(&left, *operator, &right)
            }
            Condition::Between { expr, low, high } => {
                let value = eval_expr(expr, row)?;
                let low = eval_expr(low, row)?;
                let high = eval_expr(high, row)?;
                let above = compare(&value, CompareOperator::Gte, &low)?;
                let below = compare(&value, CompareOperator::Lte, &high)?;
                Ok(and3([above, below]))
            }
            Condition::InList {
                expr,
                values,
                negated,
            } => {
                let value = eval_expr(expr, row)?;
                let mut matches = Vec::with_capacity(values.len());
                for candidate in values {
                    let candidate = eval_expr(candidate, row)?;
                    matches.push(compare(&value, CompareOperator::Eq, &candidate)?);
                }
                let found = or3(matches);
                Ok(if *negated { found.map(|b| !b) } else { found })
            }
            Condition::InSubquery { .. } => Err(QueryError::unsupported(
                "IN (subquery) requires the database",
            )),
            Condition::IsNull { expr, negated } => {
                let is_null = eval_expr(expr, row)?.is_null();
                Ok(Some(is_null != *negated))
            }
            Condition::Group {
                operator,
                conditions,
            } => {
                let mut values = Vec::with_capacity(conditions.len());
                for condition in conditions {
                    values.push(condition.truth(row)?);
                }
                Ok(match operator {
                    LogicalOperator::And => and3(values),
                    LogicalOperator::Or => or3(values),
                })
            }
            Condition::Not(inner) => Ok(inner.truth(row)?.map(|b| !b)),
            Condition::Constant(value) => Ok(Some(*value)),
        }
    }
}

/// Rows selected by `condition`; an absent condition selects every row
pub fn filter_rows<'a>(
    condition: Option<&Condition>,
    rows: &'a [Value],
) -> Result<Vec<&'a Value>, QueryError> {
    let Some(condition) = condition else {
        return Ok(rows.iter().collect());
    };

    let mut selected = Vec::new();
    for row in rows {
        if condition.evaluate(row)? {
            selected.push(row);
        }
    }
    Ok(selected)
}

/// Typed counterpart of [`filter_rows`]; each record is serialized to a JSON
/// object first, so column names follow the record's serde field names
pub fn filter_records<'a, T: Serialize>(
    condition: Option<&Condition>,
    records: &'a [T],
) -> Result<Vec<&'a T>, QueryError> {
    let Some(condition) = condition else {
        return Ok(records.iter().collect());
    };

    let mut selected = Vec::new();
    for record in records {
        let row = serde_json::to_value(record)?;
        if condition.evaluate(&row)? {
            selected.push(record);
        }
    }
    Ok(selected)
}

fn and3<I: IntoIterator<Item = Truth>>(values: I) -> Truth {
    let mut unknown = false;
    for value in values {
        match value {
            Some(false) => return Some(false),
            None => unknown = true,
            Some(true) => {}
        }
    }
    if unknown { None } else { Some(true) }
}

fn or3<I: IntoIterator<Item = Truth>>(values: I) -> Truth {
    let mut unknown = false;
    for value in values {
        match value {
            Some(true) => return Some(true),
            None => unknown = true,
            Some(false) => {}
        }
    }
    if unknown { None } else { Some(false) }
}

fn lookup(column: &ColumnPath, row: &Value) -> Value {
    if let Some(qualifier) = &column.qualifier {
        if let Some(value) = row.get(format!("{}.{}", qualifier, column.name)) {
            return value.clone();
        }
    }
    row.get(&column.name).cloned().unwrap_or(Value::Null)
}

fn eval_expr(expr: &Expr, row: &Value) -> Result<Value, QueryError> {
    match expr {
        Expr::Column(column) => Ok(lookup(column, row)),
        Expr::Value(value) => Ok(value.clone()),
        Expr::Binary {
            left,
            operator,
            right,
        } => {
            let left = eval_expr(left, row)?;
            let right = eval_expr(right, row)?;
            arithmetic(&left, *operator, &right)
        }
        Expr::Concat(parts) => {
            let mut text = String::new();
            for part in parts {
                match eval_expr(part, row)? {
                    Value::Null => return Ok(Value::Null),
                    value => text.push_str(&as_text(&value)),
                }
            }
            Ok(Value::String(text))
        }
        Expr::Cast { expr, sql_type } => {
            let value = eval_expr(expr, row)?;
            cast(value, *sql_type)
        }
        Expr::Function { name, args } => eval_function(name, args, row),
        Expr::Case(case) => eval_case(case, row),
        Expr::Aggregate { .. } => Err(QueryError::unsupported(
            "aggregates require the database",
        )),
        Expr::Subquery(_) => Err(QueryError::unsupported(
            "subqueries require the database",
        )),
    }
}

fn eval_function(name: &str, args: &[Expr], row: &Value) -> Result<Value, QueryError> {
    let lowered = name.to_ascii_lowercase();
    match (lowered.as_str(), args) {
        ("lower", [arg]) => Ok(map_text(eval_expr(arg, row)?, |s| s.to_lowercase())),
        ("upper", [arg]) => Ok(map_text(eval_expr(arg, row)?, |s| s.to_uppercase())),
        _ => Err(QueryError::unsupported(format!(
            "function {}({} args)",
            name,
            args.len()
        ))),
    }
}

fn eval_case(case: &CaseExpr, row: &Value) -> Result<Value, QueryError> {
    let operand = match &case.operand {
        Some(operand) => Some(eval_expr(operand, row)?),
        None => None,
    };

    for branch in &case.branches {
        let matched = match (&branch.when, &operand) {
            (CaseWhen::Value(when), Some(operand)) => {
                let when = eval_expr(when, row)?;
                compare(operand, CompareOperator::Eq, &when)?
            }
            (CaseWhen::Condition(condition), None) => condition.truth(row)?,
            _ => {
                return Err(QueryError::invalid_query(
                    "CASE branch does not match the CASE form",
                ))
            }
        };
        if matched == Some(true) {
            return eval_expr(&branch.then, row);
        }
    }

    match &case.otherwise {
        Some(otherwise) => eval_expr(otherwise, row),
        None => Ok(Value::Null),
    }
}

fn map_text(value: Value, f: impl Fn(&str) -> String) -> Value {
    match value {
        Value::String(s) => Value::String(f(&s)),
        other => other,
    }
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn cast(value: Value, sql_type: SqlType) -> Result<Value, QueryError> {
    if value.is_null() {
        return Ok(Value::Null);
    }
    match sql_type {
        SqlType::Text => Ok(Value::String(as_text(&value))),
        SqlType::Integer | SqlType::BigInt => match &value {
            Value::Number(n) if n.is_i64() => Ok(value),
            Value::Number(n) => Ok(n
                .as_f64()
                .map(|f| Value::from(f.trunc() as i64))
                .unwrap_or(Value::Null)),
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| QueryError::invalid_query(format!("cannot cast '{}' to integer", s))),
            other => Err(QueryError::unsupported(format!("cast {} to integer", other))),
        },
        SqlType::Double | SqlType::Numeric => match &value {
            Value::Number(n) => Ok(n.as_f64().map(Value::from).unwrap_or(Value::Null)),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map(Value::from)
                .map_err(|_| QueryError::invalid_query(format!("cannot cast '{}' to number", s))),
            other => Err(QueryError::unsupported(format!("cast {} to number", other))),
        },
        SqlType::Timestamptz => match &value {
            Value::String(s) => chrono::DateTime::parse_from_rfc3339(s.trim())
                .map(|dt| {
                    Value::String(
                        dt.with_timezone(&chrono::Utc)
                            .to_rfc3339_opts(chrono::SecondsFormat::Micros, true),
                    )
                })
                .map_err(|_| QueryError::invalid_query(format!("cannot cast '{}' to timestamptz", s))),
            other => Err(QueryError::unsupported(format!("cast {} to timestamptz", other))),
        },
        SqlType::Uuid => match &value {
            Value::String(s) => uuid::Uuid::parse_str(s.trim())
                .map(|id| Value::String(id.hyphenated().to_string()))
                .map_err(|_| QueryError::invalid_query(format!("cannot cast '{}' to uuid", s))),
            other => Err(QueryError::unsupported(format!("cast {} to uuid", other))),
        },
    }
}

fn arithmetic(left: &Value, operator: ArithmeticOperator, right: &Value) -> Result<Value, QueryError> {
    let (left, right) = match (left, right) {
        (Value::Null, _) | (_, Value::Null) => return Ok(Value::Null),
        (Value::Number(l), Value::Number(r)) => (l, r),
        (l, r) => {
            return Err(QueryError::unsupported(format!(
                "arithmetic on {} and {}",
                l, r
            )))
        }
    };

    if let (Some(l), Some(r)) = (left.as_i64(), right.as_i64()) {
        let result = match operator {
            ArithmeticOperator::Add => l.checked_add(r),
            ArithmeticOperator::Subtract => l.checked_sub(r),
            ArithmeticOperator::Multiply => l.checked_mul(r),
            ArithmeticOperator::Divide => {
                if r == 0 {
                    return Err(QueryError::invalid_query("division by zero"));
                }
                l.checked_div(r)
            }
        };
        return result
            .map(Value::from)
            .ok_or_else(|| QueryError::invalid_query("integer overflow"));
    }

    let (l, r) = (as_f64(left), as_f64(right));
    let result = match operator {
        ArithmeticOperator::Add => l + r,
        ArithmeticOperator::Subtract => l - r,
        ArithmeticOperator::Multiply => l * r,
        ArithmeticOperator::Divide => {
            if r == 0.0 {
                return Err(QueryError::invalid_query("division by zero"));
            }
            l / r
        }
    };
    Ok(Number::from_f64(result).map(Value::Number).unwrap_or(Value::Null))
}

fn as_f64(n: &Number) -> f64 {
    n.as_f64().unwrap_or(f64::NAN)
}

fn order_values(left: &Value, right: &Value) -> Result<Ordering, QueryError> {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => match (l.as_i64(), r.as_i64()) {
            (Some(l), Some(r)) => Ok(l.cmp(&r)),
            _ => as_f64(l)
                .partial_cmp(&as_f64(r))
                .ok_or_else(|| QueryError::unsupported("NaN comparison")),
        },
        (Value::String(l), Value::String(r)) => Ok(l.cmp(r)),
        (Value::Bool(l), Value::Bool(r)) => Ok(l.cmp(r)),
        (l, r) => Err(QueryError::unsupported(format!(
            "cannot compare {} with {}",
            l, r
        ))),
    }
}

fn compare(left: &Value, operator: CompareOperator, right: &Value) -> Result<Truth, QueryError> {
    if left.is_null() || right.is_null() {
        return Ok(None);
    }

    let result = match operator {
        CompareOperator::Eq => order_values(left, right)? == Ordering::Equal,
        CompareOperator::Ne => order_values(left, right)? != Ordering::Equal,
        CompareOperator::Gt => order_values(left, right)? == Ordering::Greater,
        CompareOperator::Gte => order_values(left, right)? != Ordering::Less,
        CompareOperator::Lt => order_values(left, right)? == Ordering::Less,
        CompareOperator::Lte => order_values(left, right)? != Ordering::Greater,
        CompareOperator::Like => like_match(&as_text(left), &as_text(right)),
        CompareOperator::ILike => {
            like_match(&as_text(left).to_lowercase(), &as_text(right).to_lowercase())
        }
    };
    Ok(Some(result))
}

#[derive(Clone, Copy, PartialEq)]
enum LikeToken {
    AnyRun,
    AnyChar,
    Literal(char),
}

fn like_tokens(pattern: &str) -> Vec<LikeToken> {
    let mut tokens = Vec::new();
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        tokens.push(match c {
            '%' => LikeToken::AnyRun,
            '_' => LikeToken::AnyChar,
            // a trailing backslash matches itself
            '\\' => LikeToken::Literal(chars.next().unwrap_or('\\')),
            c => LikeToken::Literal(c),
        });
    }
    tokens
}

/// SQL LIKE: `%` matches any run, `_` matches one character, `\` escapes
///
/// Greedy matching that backtracks only to the most recent `%`, so the cost
/// is bounded by text length times pattern length.
fn like_match(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.chars().collect();
    let pattern = like_tokens(pattern);

    let (mut t, mut p) = (0, 0);
    // (pattern index after the last `%`, text index it was tried at)
    let mut retry: Option<(usize, usize)> = None;
    while t < text.len() {
        match pattern.get(p) {
            Some(LikeToken::AnyRun) => {
                p += 1;
                retry = Some((p, t));
            }
            Some(LikeToken::AnyChar) => {
                p += 1;
                t += 1;
            }
            Some(LikeToken::Literal(c)) if *c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match retry {
                Some((after_run, tried_at)) => {
                    p = after_run;
                    t = tried_at + 1;
                    retry = Some((after_run, t));
                }
                None => return false,
            },
        }
    }
    pattern[p..].iter().all(|token| *token == LikeToken::AnyRun)
}
