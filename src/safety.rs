//! Statement classification for the read-only access policy.
//!
//! Parses SQL with the SQLite dialect and decides whether a statement can
//! modify the store. Statements that fail to parse are treated as mutating,
//! so the policy errs on the side of rejection.

use crate::error::{IntelliError, Result};
use sqlparser::ast::{Query, Select, SetExpr, Statement, TableFactor, TableWithJoins};
use sqlparser::dialect::SQLiteDialect;
use sqlparser::parser::Parser;

/// Rejects the statement unless every part of it is read-only.
pub fn ensure_read_only(sql: &str) -> Result<()> {
    if is_read_only(sql) {
        return Ok(());
    }

    let keyword = sql
        .trim()
        .split_whitespace()
        .next()
        .map(|w| w.to_uppercase())
        .unwrap_or_else(|| "empty".to_string());
    Err(IntelliError::execution(format!(
        "read-only mode: {keyword} statements are not permitted"
    )))
}

/// Returns true when the SQL consists solely of read-only statements.
///
/// Read-only means SELECT/VALUES queries (including set operations,
/// subqueries, and CTEs, all of which are inspected recursively) and plain
/// EXPLAIN. Everything else, including SQL that does not parse, counts as
/// mutating.
pub fn is_read_only(sql: &str) -> bool {
    match Parser::parse_sql(&SQLiteDialect {}, sql) {
        Ok(statements) if !statements.is_empty() => {
            statements.iter().all(statement_is_read_only)
        }
        _ => false,
    }
}

fn statement_is_read_only(statement: &Statement) -> bool {
    match statement {
        // Queries may hide mutations inside CTEs, so recurse
        Statement::Query(query) => query_is_read_only(query),
        Statement::Explain {
            analyze, statement, ..
        } => {
            // Plain EXPLAIN only shows the plan; ANALYZE runs the statement
            if *analyze {
                statement_is_read_only(statement)
            } else {
                true
            }
        }
        _ => false,
    }
}

fn query_is_read_only(query: &Query) -> bool {
    if let Some(with) = &query.with {
        if !with
            .cte_tables
            .iter()
            .all(|cte| query_is_read_only(&cte.query))
        {
            return false;
        }
    }

    set_expr_is_read_only(&query.body)
}

fn set_expr_is_read_only(set_expr: &SetExpr) -> bool {
    match set_expr {
        SetExpr::Delete(_) | SetExpr::Update(_) | SetExpr::Insert(_) | SetExpr::Merge(_) => false,
        SetExpr::Query(query) => query_is_read_only(query),
        SetExpr::Select(select) => select_is_read_only(select),
        SetExpr::SetOperation { left, right, .. } => {
            set_expr_is_read_only(left) && set_expr_is_read_only(right)
        }
        SetExpr::Values(_) | SetExpr::Table(_) => true,
    }
}

fn select_is_read_only(select: &Select) -> bool {
    select.from.iter().all(table_with_joins_is_read_only)
}

fn table_with_joins_is_read_only(twj: &TableWithJoins) -> bool {
    table_factor_is_read_only(&twj.relation)
        && twj
            .joins
            .iter()
            .all(|join| table_factor_is_read_only(&join.relation))
}

fn table_factor_is_read_only(factor: &TableFactor) -> bool {
    match factor {
        TableFactor::Derived { subquery, .. } => query_is_read_only(subquery),
        TableFactor::NestedJoin {
            table_with_joins, ..
        } => table_with_joins_is_read_only(table_with_joins),
        _ => true,
    }
}
