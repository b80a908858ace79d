//! Table models built from catalog descriptors.
//!
//! The builder never talks to a database. Table and column metadata arrive
//! either as [`TableDescriptor`] values (deserialized from whatever produced
//! them) or from a type implementing [`TableMeta`], and a [`Model`] binds a
//! column source to those columns.
//!
//! [`columns_query`] renders the `information_schema.columns` query a
//! catalog producer can run, and [`group_columns`] folds its rows into
//! descriptors.

use crate::error::{QbError, QbResult};
use crate::qb::{Column, Expr, ExprOps, SelectStmt, Source, select, table_in, tuple};
use heck::ToUpperCamelCase;
use serde::{Deserialize, Serialize};

/// Static table metadata, usually implemented by generated code.
pub trait TableMeta {
    /// The database table name.
    fn table_name() -> &'static str;

    /// The database schema name (defaults to "public").
    fn schema_name() -> &'static str {
        "public"
    }

    /// List of column names in this table.
    fn columns() -> &'static [&'static str];
}

/// A column as reported by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub name: String,
    #[serde(default)]
    pub data_type: String,
    #[serde(default)]
    pub nullable: bool,
}

impl ColumnDescriptor {
    /// A column with no type information.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: String::new(),
            nullable: false,
        }
    }

    /// Accessor name for generated code: `owner_id` becomes `OwnerId`.
    pub fn member_name(&self) -> String {
        self.name.to_upper_camel_case()
    }
}

/// A table as reported by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescriptor {
    #[serde(default = "default_schema")]
    pub schema: String,
    pub name: String,
    #[serde(default)]
    pub columns: Vec<ColumnDescriptor>,
}

fn default_schema() -> String {
    "public".to_string()
}

impl TableDescriptor {
    /// An empty table descriptor; add columns with [`TableDescriptor::column`].
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Append a column.
    pub fn column(mut self, column: ColumnDescriptor) -> Self {
        self.columns.push(column);
        self
    }

    /// `schema.table`
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.schema, self.name)
    }
}

/// A column source together with its known columns.
///
/// # Example
/// ```
/// use pgqb::catalog::{ColumnDescriptor, Model, TableDescriptor};
/// use pgqb::prelude::*;
///
/// let desc = TableDescriptor::new("public", "Restaurant")
///     .column(ColumnDescriptor::new("Name"))
///     .column(ColumnDescriptor::new("OwnerId"));
/// let a = Model::from_descriptor(&desc);
/// let b = a.alias("RestaurantB");
///
/// let cond = a.column("OwnerId").unwrap().eq(b.column("OwnerId").unwrap());
/// assert_eq!(
///     cond.to_sql().unwrap(),
///     r#""Restaurant"."OwnerId" = "RestaurantB"."OwnerId""#
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Model {
    source: Source,
    columns: Vec<String>,
}

impl Model {
    /// A model over `source` with the given column names.
    pub fn new<I, S>(source: Source, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            source,
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// A model for a catalog table, qualified by its schema.
    pub fn from_descriptor(desc: &TableDescriptor) -> Self {
        Self::new(
            table_in(desc.schema.clone(), desc.name.clone()),
            desc.columns.iter().map(|c| c.name.clone()),
        )
    }

    /// A model for a type carrying static [`TableMeta`].
    pub fn of<T: TableMeta>() -> Self {
        Self::new(
            table_in(T::schema_name(), T::table_name()),
            T::columns().iter().copied(),
        )
    }

    /// The source every column is qualified by.
    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Column names in declaration order.
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Whether `name` is one of this model's columns.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// A column of this model, qualified by its current source.
    pub fn column(&self, name: &str) -> QbResult<Column> {
        if !self.has_column(name) {
            return Err(QbError::unknown_column(self.source.name(), name));
        }
        Ok(self.source.column(name))
    }

    /// Every column, in declaration order.
    pub fn all_columns(&self) -> Vec<Column> {
        self.columns.iter().map(|c| self.source.column(c.as_str())).collect()
    }

    /// The same model under `alias`; every column is rebound to the alias.
    pub fn alias(&self, alias: impl Into<String>) -> Self {
        Self {
            source: self.source.alias(alias),
            columns: self.columns.clone(),
        }
    }

    /// `"source".*`
    pub fn star(&self) -> Expr {
        self.source.star()
    }
}

impl From<&Model> for crate::qb::TableExpr {
    fn from(model: &Model) -> Self {
        model.source.clone().into()
    }
}

/// A row of the `information_schema.columns` query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogColumn {
    pub table_schema: String,
    pub table_name: String,
    pub column_name: String,
    pub data_type: String,
    pub is_nullable: bool,
}

/// Schemas skipped by [`columns_query`] unless the caller passes its own list.
pub const SYSTEM_SCHEMAS: &[&str] = &["pg_catalog", "information_schema"];

/// The catalog query producing [`CatalogColumn`] rows for every table outside
/// `exclude_schemas`.
pub fn columns_query(exclude_schemas: &[&str]) -> SelectStmt {
    let columns = table_in("information_schema", "columns");
    let stmt = select([
        columns.column("table_schema"),
        columns.column("table_name"),
        columns.column("column_name"),
        columns.column("data_type"),
    ])
    .select([columns.column("is_nullable").eq("YES").alias("is_nullable")]);
    let stmt = if exclude_schemas.is_empty() {
        stmt
    } else {
        stmt.where_(columns.column("table_schema").not_in(tuple(exclude_schemas)))
    };
    stmt.order_by([
        columns.column("table_schema"),
        columns.column("table_name"),
        columns.column("ordinal_position"),
    ])
}

/// Fold catalog rows into one descriptor per table, keeping first-seen table
/// order and row order within each table.
pub fn group_columns(rows: impl IntoIterator<Item = CatalogColumn>) -> Vec<TableDescriptor> {
    let mut tables: Vec<TableDescriptor> = Vec::new();
    for row in rows {
        let column = ColumnDescriptor {
            name: row.column_name,
            data_type: row.data_type,
            nullable: row.is_nullable,
        };
        match tables
            .iter_mut()
            .find(|t| t.schema == row.table_schema && t.name == row.table_name)
        {
            Some(table) => table.columns.push(column),
            None => tables.push(TableDescriptor {
                schema: row.table_schema,
                name: row.table_name,
                columns: vec![column],
            }),
        }
    }
    tables
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qb::SqlStatement;

    struct Restaurant;

    impl TableMeta for Restaurant {
        fn table_name() -> &'static str {
            "Restaurant"
        }

        fn columns() -> &'static [&'static str] {
            &["Id", "Name", "OwnerId", "NumCustomer"]
        }
    }

    #[test]
    fn member_names_are_camel_case() {
        assert_eq!(ColumnDescriptor::new("owner_id").member_name(), "OwnerId");
        assert_eq!(ColumnDescriptor::new("name").member_name(), "Name");
        assert_eq!(ColumnDescriptor::new("NumCustomer").member_name(), "NumCustomer");
    }

    #[test]
    fn model_from_meta() {
        let m = Model::of::<Restaurant>();
        assert_eq!(m.source().schema(), Some("public"));
        assert_eq!(m.column_names().len(), 4);
        assert!(m.column("Name").is_ok());
        assert_eq!(
            m.column("Missing").unwrap_err(),
            QbError::unknown_column("Restaurant", "Missing")
        );
    }

    #[test]
    fn alias_rebinds_columns() {
        let a = Model::of::<Restaurant>();
        let b = a.alias("RestaurantB");
        let e = a
            .column("NumCustomer")
            .unwrap()
            .add(b.column("NumCustomer").unwrap())
            .gt(50);
        assert_eq!(
            e.to_sql().unwrap(),
            r#"("Restaurant"."NumCustomer" + "RestaurantB"."NumCustomer") > 50"#
        );
        assert!(b.all_columns().iter().all(|c| c.source().name() == "RestaurantB"));
    }

    #[test]
    fn descriptors_deserialize_with_defaults() {
        let desc: TableDescriptor =
            serde_json::from_str(r#"{"name":"school","columns":[{"name":"city","data_type":"text"}]}"#)
                .unwrap();
        assert_eq!(desc.qualified_name(), "public.school");
        assert!(!desc.columns[0].nullable);
    }

    #[test]
    fn catalog_query() {
        let sql = columns_query(SYSTEM_SCHEMAS).to_sql().unwrap();
        assert_eq!(
            sql,
            concat!(
                r#"SELECT "columns"."table_schema", "columns"."table_name", "columns"."column_name", "#,
                r#""columns"."data_type", "columns"."is_nullable" = 'YES' "is_nullable" "#,
                r#"FROM "information_schema"."columns" "#,
                r#"WHERE "columns"."table_schema" NOT IN ('pg_catalog', 'information_schema') "#,
                r#"ORDER BY "columns"."table_schema" ASC, "columns"."table_name" ASC, "columns"."ordinal_position" ASC"#
            )
        );
    }

    #[test]
    fn rows_group_by_table() {
        let row = |schema: &str, table: &str, column: &str| CatalogColumn {
            table_schema: schema.to_string(),
            table_name: table.to_string(),
            column_name: column.to_string(),
            data_type: "text".to_string(),
            is_nullable: true,
        };
        let tables = group_columns([
            row("public", "a", "x"),
            row("public", "b", "y"),
            row("public", "a", "z"),
            row("other", "a", "w"),
        ]);
        let names: Vec<String> = tables.iter().map(TableDescriptor::qualified_name).collect();
        assert_eq!(names, vec!["public.a", "public.b", "other.a"]);
        assert_eq!(tables[0].columns.len(), 2);
        assert_eq!(tables[0].columns[1].name, "z");
    }
}
