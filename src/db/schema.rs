//! Schema descriptor for IntelliSQL.
//!
//! Describes the single queryable table. The descriptor is fixed for the
//! process lifetime: it feeds the translation prompt and the bootstrap DDL,
//! and is never validated against the live store.

/// Static description of the queryable table.
#[derive(Debug, Clone)]
pub struct SchemaDescriptor {
    /// Table name.
    pub table: String,

    /// Columns in declaration order.
    pub columns: Vec<SchemaColumn>,
}

impl SchemaDescriptor {
    /// Creates a descriptor with the given table name and no columns.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
        }
    }

    /// The built-in `customers` table every IntelliSQL store carries.
    pub fn customers() -> Self {
        Self {
            table: "customers".to_string(),
            columns: vec![
                SchemaColumn::new("id", "INTEGER").primary_key(),
                SchemaColumn::new("name", "TEXT"),
                SchemaColumn::new("city", "TEXT"),
                SchemaColumn::new("purchase_amount", "INTEGER"),
            ],
        }
    }

    /// Adds a column to the descriptor.
    pub fn with_column(mut self, column: SchemaColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Formats the descriptor for inclusion in the translation prompt.
    ///
    /// Produces the compact `table(col1, col2, ...)` form the prompt
    /// template expects.
    pub fn format_for_prompt(&self) -> String {
        let names = self
            .columns
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({})", self.table, names)
    }

    /// Renders the idempotent DDL statement that creates the table.
    pub fn create_table_sql(&self) -> String {
        let column_defs = self
            .columns
            .iter()
            .map(SchemaColumn::definition)
            .collect::<Vec<_>>()
            .join(",\n    ");
        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
            self.table, column_defs
        )
    }
}

impl Default for SchemaDescriptor {
    fn default() -> Self {
        Self::customers()
    }
}

/// A column in the schema descriptor.
#[derive(Debug, Clone)]
pub struct SchemaColumn {
    /// Column name.
    pub name: String,

    /// SQLite type affinity (e.g. "INTEGER", "TEXT").
    pub sql_type: String,

    /// Whether this column is the primary key.
    pub is_primary_key: bool,
}

impl SchemaColumn {
    /// Creates a new column with the given name and SQLite type.
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            is_primary_key: false,
        }
    }

    /// Marks the column as the primary key.
    pub fn primary_key(self) -> Self {
        Self {
            is_primary_key: true,
            ..self
        }
    }

    fn definition(&self) -> String {
        if self.is_primary_key {
            format!("{} {} PRIMARY KEY", self.name, self.sql_type)
        } else {
            format!("{} {}", self.name, self.sql_type)
        }
    }
}
