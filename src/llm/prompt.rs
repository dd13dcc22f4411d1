//! Prompt construction for LLM requests.
//!
//! Builds the translation prompt with database schema context.

use crate::db::SchemaDescriptor;

/// Prompt template for the English-to-SQL translator.
const PROMPT_TEMPLATE: &str = r#"You are an expert in converting English questions into SQL queries. Generate a single SQLite query that answers the user's question.

DATABASE SCHEMA:
{schema}

INSTRUCTIONS:
- Generate only valid SQLite SQL
- Use the exact table and column names from the schema
- Return ONLY the SQL query, with no explanation, no markdown, and no backticks

QUESTION:
{question}"#;

/// Builds the translation prompt for a question against the given schema.
pub fn build_prompt(question: &str, schema: &SchemaDescriptor) -> String {
    PROMPT_TEMPLATE
        .replace("{schema}", &schema.format_for_prompt())
        .replace("{question}", question)
}
