//! Binding JSON parameter values to sqlx queries

use serde_json::Value;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::{Query, QueryAs, QueryScalar};
use sqlx::Postgres;

/// Bind one `serde_json::Value` with the closest PostgreSQL type
///
/// Strings always bind as `TEXT`; timestamps and UUIDs carry an explicit
/// `CAST` in the rendered SQL (see `Expr::timestamp` and `Expr::uuid`).
/// Integers bind as `INT4` when they fit and `INT8` otherwise.
macro_rules! bind_json_param {
    ($query:expr, $param:expr) => {
        match $param {
            serde_json::Value::String(s) => $query.bind(s),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    if i >= i32::MIN as i64 && i <= i32::MAX as i64 {
                        $query.bind(i as i32)
                    } else {
                        $query.bind(i)
                    }
                } else if let Some(f) = n.as_f64() {
                    $query.bind(f)
                } else {
                    $query.bind(n.to_string())
                }
            }
            serde_json::Value::Bool(b) => $query.bind(b),
            serde_json::Value::Null => $query.bind(Option::<String>::None),
            other => $query.bind(other.to_string()),
        }
    };
}

pub(crate) fn bind_all_as<'q, T>(
    mut query: QueryAs<'q, Postgres, T, PgArguments>,
    params: &[Value],
) -> QueryAs<'q, Postgres, T, PgArguments>
where
    T: for<'r> sqlx::FromRow<'r, PgRow>,
{
    for param in params {
        query = bind_json_param!(query, param.clone());
    }
    query
}

pub(crate) fn bind_all_scalar<'q, T>(
    mut query: QueryScalar<'q, Postgres, T, PgArguments>,
    params: &[Value],
) -> QueryScalar<'q, Postgres, T, PgArguments> {
    for param in params {
        query = bind_json_param!(query, param.clone());
    }
    query
}

pub(crate) fn bind_all<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &[Value],
) -> Query<'q, Postgres, PgArguments> {
    for param in params {
        query = bind_json_param!(query, param.clone());
    }
    query
}
