//! Query-string filters to parameterized SQL predicates.
//!
//! Columns are always compile-time constants supplied by the report
//! adapters. User input only ever reaches SQLite as a bound argument.

use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::sql_types::{Integer, Text};
use diesel::sqlite::Sqlite;

/// A bound argument matching one `?` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterArg {
    Int(i32),
    Text(String),
}

/// A conjunctive SQL predicate with its positional arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    clauses: Vec<String>,
    args: Vec<FilterArg>,
}

impl Predicate {
    /// Clauses joined with `AND`, suitable for a `WHERE`.
    #[must_use]
    pub fn sql(&self) -> String {
        if self.clauses.is_empty() {
            return "1 = 1".to_string();
        }
        self.clauses.join(" AND ")
    }

    #[must_use]
    pub fn args(&self) -> &[FilterArg] {
        &self.args
    }

    /// Bind the arguments onto a boxed raw query, in placeholder order.
    ///
    /// Placeholders that come after the predicate in the SQL text must be
    /// bound by the caller afterwards.
    pub fn bind<'f>(
        &self,
        mut query: BoxedSqlQuery<'f, Sqlite, SqlQuery>,
    ) -> BoxedSqlQuery<'f, Sqlite, SqlQuery> {
        for arg in &self.args {
            query = match arg {
                FilterArg::Int(value) => query.bind::<Integer, _>(*value),
                FilterArg::Text(value) => query.bind::<Text, _>(value.clone()),
            };
        }
        query
    }
}

/// Builds a [`Predicate`] from optional raw filter values.
///
/// Clause order follows call order. Blank values are ignored.
#[derive(Debug, Default)]
pub struct FilterBuilder {
    clauses: Vec<String>,
    args: Vec<FilterArg>,
}

impl FilterBuilder {
    /// Start with mandatory clauses, typically the soft-delete guards.
    #[must_use]
    pub fn new(base: &[&'static str]) -> Self {
        Self {
            clauses: base.iter().map(|clause| (*clause).to_string()).collect(),
            args: Vec::new(),
        }
    }

    /// Exact integer match. Values that are not integers are dropped.
    #[must_use]
    pub fn int_eq(mut self, column: &'static str, raw: Option<&str>) -> Self {
        if let Some(value) = present(raw).and_then(|value| value.parse::<i32>().ok()) {
            self.clauses.push(format!("{column} = ?"));
            self.args.push(FilterArg::Int(value));
        }
        self
    }

    /// Case-insensitive substring match, folding non-ASCII letters too.
    ///
    /// Relies on the `fold_case` function every pooled connection registers.
    #[must_use]
    pub fn contains(mut self, column: &'static str, raw: Option<&str>) -> Self {
        if let Some(value) = present(raw) {
            self.clauses
                .push(format!("fold_case({column}) LIKE ? ESCAPE '\\'"));
            self.args.push(FilterArg::Text(format!(
                "%{}%",
                escape_like(&value.to_lowercase())
            )));
        }
        self
    }

    #[must_use]
    pub fn build(self) -> Predicate {
        Predicate {
            clauses: self.clauses,
            args: self.args,
        }
    }
}

/// Trimmed value, or `None` when missing or blank.
fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

/// Escape `LIKE` metacharacters so the value matches literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
