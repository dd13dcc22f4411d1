//! Query pipeline orchestration.
//!
//! The unified question-to-answer pipeline used by both the REPL and
//! one-shot modes. It owns translation, execution, and the session
//! history log, so every execution mode behaves identically.

use std::time::Instant;

use tracing::{info, warn};

use crate::db::{QueryExecutor, QueryResult};
use crate::error::Result;
use crate::history::{HistoryLog, InteractionRecord};
use crate::llm::Translator;

/// Outcome of a successfully answered question.
#[derive(Debug)]
pub struct QuestionOutcome {
    /// The question as asked.
    pub question: String,
    /// The SQL the model produced.
    pub sql: String,
    /// The execution result.
    pub result: QueryResult,
}

/// The question-to-result pipeline.
///
/// History recording is asymmetric: executed statements are logged
/// whether they succeed or fail (failures with a row count of zero),
/// while questions that never produce SQL leave no trace.
pub struct QueryPipeline {
    translator: Translator,
    executor: QueryExecutor,
    history: HistoryLog,
}

impl QueryPipeline {
    /// Creates a pipeline with an empty history log.
    pub fn new(translator: Translator, executor: QueryExecutor) -> Self {
        Self {
            translator,
            executor,
            history: HistoryLog::new(),
        }
    }

    /// Translates a question into SQL without executing it.
    pub async fn translate(&self, question: &str) -> Result<String> {
        self.translator.translate(question).await
    }

    /// Executes SQL on behalf of a question and records the interaction.
    ///
    /// A failed execution is still recorded, with a row count of zero,
    /// before the error is returned.
    pub async fn execute_and_record(&mut self, question: &str, sql: &str) -> Result<QueryResult> {
        match self.executor.execute(sql).await {
            Ok(result) => {
                self.history
                    .record(InteractionRecord::new(question, sql, result.row_count));
                Ok(result)
            }
            Err(e) => {
                warn!("Query execution failed: {}", e);
                self.history.record(InteractionRecord::new(question, sql, 0));
                Err(e)
            }
        }
    }

    /// Answers a question end to end: translate, execute, record.
    pub async fn submit_question(&mut self, question: &str) -> Result<QuestionOutcome> {
        let start = Instant::now();
        let sql = self.translate(question).await?;
        let result = self.execute_and_record(question, &sql).await?;

        info!(
            rows = result.row_count,
            duration_ms = start.elapsed().as_millis() as u64,
            "Answered question"
        );

        Ok(QuestionOutcome {
            question: question.to_string(),
            sql,
            result,
        })
    }

    /// Returns the session history, oldest first.
    pub fn history(&self) -> &[InteractionRecord] {
        self.history.list()
    }

    /// Clears the session history.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Returns the provider name of the underlying LLM client.
    pub fn provider_name(&self) -> &str {
        self.translator.provider_name()
    }
}
