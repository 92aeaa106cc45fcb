//! Generic, filter-based data access for aggregate row types.
//!
//! One repository implementation serves every aggregate table. Entities
//! declare their table, column list and value bindings through the [`Entity`]
//! trait; queries are assembled with `sqlx::QueryBuilder` from validated
//! column names and bound values only. All methods run on a caller-supplied
//! connection so a service can group several repository calls into a single
//! transaction; no method commits.

use sqlx::{
    postgres::{PgConnection, PgRow},
    Postgres, QueryBuilder,
};
use uuid::Uuid;

use crate::{helpers::sets_equal, models::ProtocolType, Error, Result};

/// A value bindable into a query, covering every column type in the schema.
#[derive(Debug, Clone)]
pub enum SqlValue {
    Uuid(Uuid),
    Text(String),
    OptText(Option<String>),
    Timestamp(chrono::DateTime<chrono::Utc>),
    OptTimestamp(Option<chrono::DateTime<chrono::Utc>>),
    Date(chrono::NaiveDate),
    Protocol(ProtocolType),
}

impl From<Uuid> for SqlValue {
    fn from(value: Uuid) -> Self {
        SqlValue::Uuid(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<Option<String>> for SqlValue {
    fn from(value: Option<String>) -> Self {
        SqlValue::OptText(value)
    }
}

impl From<chrono::DateTime<chrono::Utc>> for SqlValue {
    fn from(value: chrono::DateTime<chrono::Utc>) -> Self {
        SqlValue::Timestamp(value)
    }
}

impl From<chrono::NaiveDate> for SqlValue {
    fn from(value: chrono::NaiveDate) -> Self {
        SqlValue::Date(value)
    }
}

impl From<ProtocolType> for SqlValue {
    fn from(value: ProtocolType) -> Self {
        SqlValue::Protocol(value)
    }
}

fn push_value(builder: &mut QueryBuilder<'_, Postgres>, value: &SqlValue) {
    match value {
        SqlValue::Uuid(v) => builder.push_bind(*v),
        SqlValue::Text(v) => builder.push_bind(v.clone()),
        SqlValue::OptText(v) => builder.push_bind(v.clone()),
        SqlValue::Timestamp(v) => builder.push_bind(*v),
        SqlValue::OptTimestamp(v) => builder.push_bind(*v),
        SqlValue::Date(v) => builder.push_bind(*v),
        SqlValue::Protocol(v) => builder.push_bind(*v),
    };
}

/// An equality filter on a single column.
#[derive(Debug, Clone)]
pub struct Filter {
    pub column: &'static str,
    pub value: SqlValue,
}

impl Filter {
    pub fn eq(column: &'static str, value: impl Into<SqlValue>) -> Self {
        Filter {
            column,
            value: value.into(),
        }
    }
}

/// Binding between a row type and its table, used by [`Repository`].
pub trait Entity: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin {
    const TABLE: &'static str;
    /// All columns, `id` first; [`Entity::values`] binds in the same order.
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> Uuid;
    fn values(&self) -> Vec<SqlValue>;

    /// Text value of a column, for set-equality checks on bulk lookups.
    /// Returns `None` for non-text columns.
    fn column_text(&self, column: &str) -> Option<&str>;
}

/// Generic repository over a single [`Entity`] type.
///
/// Usage: `Repository::<Vendor>::get(&mut *tx, &[Filter::eq("id", id)])`.
pub struct Repository<T>(std::marker::PhantomData<T>);

impl<T: Entity> Repository<T> {
    fn ensure_known_columns(filters: &[Filter]) -> Result<()> {
        for filter in filters {
            if !T::COLUMNS.contains(&filter.column) {
                return Err(Error::UnknownColumn {
                    table: T::TABLE,
                    column: filter.column,
                });
            }
        }
        Ok(())
    }

    fn push_where(builder: &mut QueryBuilder<'_, Postgres>, filters: &[Filter]) {
        if filters.is_empty() {
            return;
        }
        builder.push(" WHERE ");
        for (i, filter) in filters.iter().enumerate() {
            if i > 0 {
                builder.push(" AND ");
            }
            builder.push(filter.column);
            builder.push(" = ");
            push_value(builder, &filter.value);
        }
    }

    pub async fn get(conn: &mut PgConnection, filters: &[Filter]) -> Result<Option<T>> {
        Self::ensure_known_columns(filters)?;

        let mut builder = QueryBuilder::new(format!("SELECT * FROM {}", T::TABLE));
        Self::push_where(&mut builder, filters);

        let row = builder
            .build_query_as::<T>()
            .fetch_optional(conn)
            .await
            .map_err(Error::Database)?;

        Ok(row)
    }

    pub async fn get_or_fail(conn: &mut PgConnection, filters: &[Filter]) -> Result<T> {
        Self::get(conn, filters)
            .await?
            .ok_or(Error::EntryNotFound { table: T::TABLE })
    }

    /// Filtered listing, newest first.
    pub async fn get_many(
        conn: &mut PgConnection,
        limit: Option<i64>,
        offset: Option<i64>,
        filters: &[Filter],
    ) -> Result<Vec<T>> {
        Self::ensure_known_columns(filters)?;

        let mut builder = QueryBuilder::new(format!("SELECT * FROM {}", T::TABLE));
        Self::push_where(&mut builder, filters);
        builder.push(" ORDER BY created_at DESC");
        if let Some(limit) = limit {
            builder.push(" LIMIT ");
            builder.push_bind(limit);
        }
        if let Some(offset) = offset {
            builder.push(" OFFSET ");
            builder.push_bind(offset);
        }

        let rows = builder
            .build_query_as::<T>()
            .fetch_all(conn)
            .await
            .map_err(Error::Database)?;

        Ok(rows)
    }

    pub async fn count(conn: &mut PgConnection, filters: &[Filter]) -> Result<i64> {
        Self::ensure_known_columns(filters)?;

        let mut builder = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", T::TABLE));
        Self::push_where(&mut builder, filters);

        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(conn)
            .await
            .map_err(Error::Database)?;

        Ok(count)
    }

    /// All rows whose `column` matches any of `values` (OR semantics).
    pub async fn get_by_property(
        conn: &mut PgConnection,
        column: &'static str,
        values: &[String],
    ) -> Result<Vec<T>> {
        if !T::COLUMNS.contains(&column) {
            return Err(Error::UnknownColumn {
                table: T::TABLE,
                column,
            });
        }

        let mut builder = QueryBuilder::new(format!("SELECT * FROM {} WHERE ", T::TABLE));
        builder.push(column);
        builder.push(" = ANY(");
        builder.push_bind(values.to_vec());
        builder.push(")");

        let rows = builder
            .build_query_as::<T>()
            .fetch_all(conn)
            .await
            .map_err(Error::Database)?;

        Ok(rows)
    }

    /// Like [`Repository::get_by_property`], but fails unless the returned
    /// rows cover exactly the requested values as a set. This is how "every
    /// referenced name must exist" is enforced without a separate validation
    /// pass.
    pub async fn get_by_property_exact(
        conn: &mut PgConnection,
        column: &'static str,
        values: &[String],
    ) -> Result<Vec<T>> {
        let rows = Self::get_by_property(conn, column, values).await?;

        let found: Vec<String> = rows
            .iter()
            .filter_map(|row| row.column_text(column))
            .map(str::to_string)
            .collect();

        if !sets_equal(&found, values) {
            return Err(Error::EntryNotFound { table: T::TABLE });
        }

        Ok(rows)
    }

    pub async fn create(conn: &mut PgConnection, entity: &T) -> Result<()> {
        let mut builder = QueryBuilder::new(format!(
            "INSERT INTO {} ({}) VALUES (",
            T::TABLE,
            T::COLUMNS.join(", ")
        ));
        let values = entity.values();
        debug_assert_eq!(values.len(), T::COLUMNS.len());
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                builder.push(", ");
            }
            push_value(&mut builder, value);
        }
        builder.push(")");

        builder.build().execute(conn).await.map_err(Error::Database)?;
        Ok(())
    }

    pub async fn update(conn: &mut PgConnection, entity: &T) -> Result<()> {
        let mut builder = QueryBuilder::new(format!("UPDATE {} SET ", T::TABLE));
        let values = entity.values();
        let mut first = true;
        for (column, value) in T::COLUMNS.iter().zip(values.iter()) {
            if *column == "id" {
                continue;
            }
            if !first {
                builder.push(", ");
            }
            first = false;
            builder.push(*column);
            builder.push(" = ");
            push_value(&mut builder, value);
        }
        builder.push(" WHERE id = ");
        builder.push_bind(entity.id());

        builder.build().execute(conn).await.map_err(Error::Database)?;
        Ok(())
    }

    pub async fn delete(conn: &mut PgConnection, entity: &T) -> Result<()> {
        let mut builder = QueryBuilder::new(format!("DELETE FROM {} WHERE id = ", T::TABLE));
        builder.push_bind(entity.id());

        builder.build().execute(conn).await.map_err(Error::Database)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Vendor;

    #[test]
    fn unknown_filter_column_is_rejected() {
        let filters = [Filter::eq("no_such_column", "x")];
        let err = Repository::<Vendor>::ensure_known_columns(&filters).unwrap_err();
        match err {
            Error::UnknownColumn { table, column } => {
                assert_eq!(table, "vendors");
                assert_eq!(column, "no_such_column");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn known_filter_columns_pass() {
        let filters = [
            Filter::eq("kvk_number", "12345678"),
            Filter::eq("trade_name", "Acme"),
        ];
        assert!(Repository::<Vendor>::ensure_known_columns(&filters).is_ok());
    }
}
