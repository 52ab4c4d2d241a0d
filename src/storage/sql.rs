//! Compilation of deferred queries into PostgreSQL statements
//!
//! Only three things ever reach the SQL text: identifiers that were checked
//! when the table was described, field names taken from an element type's
//! field table, and integers. Caller input never does.

use anyhow::{Result, bail};
use std::collections::HashMap;

use crate::core::field::is_plain_field_name;
use crate::core::{Query, QueryOp};

/// A table that paged queries can be compiled against
#[derive(Debug, Clone)]
pub struct SqlTable {
    name: String,
    stable_key: Option<String>,
    columns: HashMap<&'static str, String>,
}

fn quote(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

fn check_identifier(identifier: &str, what: &str) -> Result<()> {
    if !is_plain_field_name(identifier) {
        bail!("Invalid SQL {} name '{}'", what, identifier);
    }
    Ok(())
}

impl SqlTable {
    /// Describe a table, optionally schema-qualified (`schema.table`)
    pub fn new(name: &str) -> Result<Self> {
        let parts: Vec<&str> = name.split('.').collect();
        if parts.len() > 2 {
            bail!("Invalid SQL table name '{}'", name);
        }
        for part in &parts {
            check_identifier(part, "table")?;
        }

        Ok(Self {
            name: parts.iter().map(|p| quote(p)).collect::<Vec<_>>().join("."),
            stable_key: None,
            columns: HashMap::new(),
        })
    }

    /// Column used to keep a repeatable order when no sort field is requested
    ///
    /// Without one, pages of an unsorted query follow whatever order the
    /// database returns, which may change between evaluations.
    pub fn stable_key(mut self, column: &str) -> Result<Self> {
        check_identifier(column, "column")?;
        self.stable_key = Some(column.to_string());
        Ok(self)
    }

    /// Store sort field `field` in a column with a different name
    pub fn map_column(mut self, field: &'static str, column: &str) -> Result<Self> {
        check_identifier(column, "column")?;
        self.columns.insert(field, column.to_string());
        Ok(self)
    }

    fn column(&self, field: &'static str) -> String {
        quote(self.columns.get(field).map_or(field, String::as_str))
    }

    /// `SELECT COUNT(*)` over the whole table
    pub fn count_sql(&self) -> String {
        format!("SELECT COUNT(*) FROM {}", self.name)
    }

    /// `SELECT EXISTS (...)` over the query
    pub fn exists_sql(&self, query: &Query) -> String {
        format!("SELECT EXISTS ({})", self.select_sql(query))
    }

    /// `SELECT *` evaluating the query
    ///
    /// Skips and takes fold into one `LIMIT`/`OFFSET` pair. A field ordering
    /// that follows a window orders the window itself, so the statement so
    /// far becomes a subquery.
    pub fn select_sql(&self, query: &Query) -> String {
        let mut select = Select::new(format!("SELECT * FROM {}", self.name));
        let mut nesting = 0;

        for op in query.ops() {
            match op {
                QueryOp::OrderBy(spec) => {
                    if select.windowed() {
                        let inner = select.finish();
                        select = Select::new(format!("SELECT * FROM ({}) AS w{}", inner, nesting));
                        nesting += 1;
                    }
                    let column = self.column(spec.field);
                    let mut order = format!("{} {}", column, spec.direction.as_sql());
                    // ties fall back to the stable key so pages do not overlap
                    if let Some(key) = self.stable_key.as_deref().map(quote) {
                        if key != column {
                            order.push_str(&format!(", {} ASC", key));
                        }
                    }
                    select.order = Some(order);
                }
                QueryOp::OrderStable => {
                    // a constant sort key keeps any existing order
                    if select.order.is_none() && !select.windowed() {
                        select.order = self.stable_key.as_deref().map(|key| format!("{} ASC", quote(key)));
                    }
                }
                QueryOp::Skip(n) => {
                    select.offset = select.offset.saturating_add(*n);
                    select.limit = select.limit.map(|limit| limit.saturating_sub(*n));
                }
                QueryOp::Take(n) => {
                    select.limit = Some(select.limit.map_or(*n, |limit| limit.min(*n)));
                }
            }
        }

        select.finish()
    }
}

/// LIMIT and OFFSET are bigint in PostgreSQL
fn to_bigint(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

struct Select {
    from: String,
    order: Option<String>,
    offset: usize,
    limit: Option<usize>,
}

impl Select {
    fn new(from: String) -> Self {
        Self {
            from,
            order: None,
            offset: 0,
            limit: None,
        }
    }

    fn windowed(&self) -> bool {
        self.offset > 0 || self.limit.is_some()
    }

    fn finish(self) -> String {
        let mut sql = self.from;
        if let Some(order) = self.order {
            sql.push_str(" ORDER BY ");
            sql.push_str(&order);
        }
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", to_bigint(limit)));
        }
        if self.offset > 0 {
            sql.push_str(&format!(" OFFSET {}", to_bigint(self.offset)));
        }
        sql
    }
}
