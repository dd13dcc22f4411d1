//! Mock LLM client for testing.
//!
//! Provides deterministic responses based on input patterns.

use async_trait::async_trait;

use crate::error::Result;
use crate::llm::LlmClient;

/// Mock LLM client that returns canned responses based on input patterns.
///
/// Used for unit testing without making real API calls.
#[derive(Debug, Clone, Default)]
pub struct MockLlmClient {
    /// Custom response mappings (pattern -> response).
    custom_responses: Vec<(String, String)>,
}

impl MockLlmClient {
    /// Creates a new mock client with default responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a custom response mapping.
    ///
    /// When the prompt contains `pattern`, the mock will return `response`.
    pub fn with_response(
        mut self,
        pattern: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        self.custom_responses
            .push((pattern.into(), response.into()));
        self
    }

    /// Generates a mock response based on the prompt.
    fn mock_response(&self, prompt: &str) -> String {
        let prompt_lower = prompt.to_lowercase();

        // Check custom responses first
        for (pattern, response) in &self.custom_responses {
            if prompt_lower.contains(&pattern.to_lowercase()) {
                return response.clone();
            }
        }

        // Default pattern matching for the demo customers table
        if prompt_lower.contains("kadapa") {
            return "```sql\nSELECT name, city FROM customers WHERE city = 'Kadapa';\n```"
                .to_string();
        }

        if prompt_lower.contains("how many") || prompt_lower.contains("count") {
            return "SELECT COUNT(*) FROM customers;".to_string();
        }

        if prompt_lower.contains("highest") && prompt_lower.contains("purchase") {
            return "SELECT name, purchase_amount FROM customers ORDER BY purchase_amount DESC LIMIT 1;"
                .to_string();
        }

        if prompt_lower.contains("all customers") || prompt_lower.contains("everyone") {
            return "SELECT * FROM customers;".to_string();
        }

        "I don't understand that question. Could you please rephrase it?".to_string()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        Ok(self.mock_response(prompt))
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
