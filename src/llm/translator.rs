//! English-to-SQL translation.
//!
//! Composes prompt construction, the LLM request, and SQL extraction
//! into a single step.

use tracing::debug;

use crate::db::SchemaDescriptor;
use crate::error::Result;
use crate::llm::{build_prompt, extract_sql, LlmClient};

/// Translates natural-language questions into SQL statements.
pub struct Translator {
    client: Box<dyn LlmClient>,
    schema: SchemaDescriptor,
}

impl Translator {
    /// Creates a translator that prompts against the given schema.
    pub fn new(client: Box<dyn LlmClient>, schema: SchemaDescriptor) -> Self {
        Self { client, schema }
    }

    /// Returns the provider name of the underlying client.
    pub fn provider_name(&self) -> &str {
        self.client.provider_name()
    }

    /// Translates a question into a SQL statement.
    ///
    /// The model response may arrive fenced or bare; either way the
    /// result is the extracted SQL text. No validation happens here,
    /// the statement is judged by the database when executed.
    pub async fn translate(&self, question: &str) -> Result<String> {
        let prompt = build_prompt(question, &self.schema);
        let response = self.client.complete(&prompt).await?;
        let sql = extract_sql(&response)?;
        debug!("Translated question into SQL: {}", sql);
        Ok(sql)
    }
}
