//! SQL extraction from LLM responses.
//!
//! Models are instructed to return bare SQL, but they frequently wrap the
//! statement in markdown code fences anyway. This module strips a single
//! fenced block when present and rejects responses it cannot interpret as
//! one SQL statement.

use crate::error::{IntelliError, Result};

/// Extracts a single SQL statement from an LLM response.
///
/// Accepts either bare SQL or SQL wrapped in one fenced code block
/// (with or without a language tag). Returns an extraction error for
/// empty responses, unterminated fences, and responses containing more
/// than one code block.
///
/// Applying this to its own output is a no-op: extracted SQL contains
/// no fences, so a second pass returns it unchanged.
pub fn extract_sql(response: &str) -> Result<String> {
    let trimmed = response.trim();
    if trimmed.is_empty() {
        return Err(IntelliError::extraction("model returned an empty response"));
    }

    let blocks = fenced_blocks(trimmed)?;
    match blocks.len() {
        0 => Ok(trimmed.to_string()),
        1 => {
            let sql = blocks[0].trim();
            if sql.is_empty() {
                return Err(IntelliError::extraction("fenced code block is empty"));
            }
            Ok(sql.to_string())
        }
        n => Err(IntelliError::extraction(format!(
            "expected one SQL statement but found {} fenced code blocks",
            n
        ))),
    }
}

/// Collects the interior text of every fenced code block in the response.
///
/// A line whose trimmed form starts with ``` toggles fence state; the
/// opening fence may carry a language tag (```sql). Returns an error if
/// a fence is opened but never closed.
fn fenced_blocks(text: &str) -> Result<Vec<String>> {
    let mut blocks = Vec::new();
    let mut current: Option<Vec<&str>> = None;

    for line in text.lines() {
        if line.trim_start().starts_with("```") {
            match current.take() {
                Some(lines) => blocks.push(lines.join("\n")),
                None => current = Some(Vec::new()),
            }
        } else if let Some(lines) = current.as_mut() {
            lines.push(line);
        }
    }

    if current.is_some() {
        return Err(IntelliError::extraction(
            "unterminated code fence in response",
        ));
    }

    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_sql_passes_through() {
        let sql = extract_sql("SELECT * FROM customers;").unwrap();
        assert_eq!(sql, "SELECT * FROM customers;");
    }

    #[test]
    fn test_bare_sql_is_trimmed() {
        let sql = extract_sql("  SELECT name FROM customers  \n").unwrap();
        assert_eq!(sql, "SELECT name FROM customers");
    }

    #[test]
    fn test_extracts_sql_tagged_block() {
        let response = "```sql\nSELECT * FROM customers;\n```";
        let sql = extract_sql(response).unwrap();
        assert_eq!(sql, "SELECT * FROM customers;");
    }

    #[test]
    fn test_extracts_untagged_block() {
        let response = "```\nSELECT COUNT(*) FROM customers;\n```";
        let sql = extract_sql(response).unwrap();
        assert_eq!(sql, "SELECT COUNT(*) FROM customers;");
    }

    #[test]
    fn test_extracts_block_surrounded_by_prose() {
        let response = r#"Here is the query you asked for:

```sql
SELECT name FROM customers WHERE city = 'Kadapa';
```

Let me know if you need anything else."#;

        let sql = extract_sql(response).unwrap();
        assert_eq!(sql, "SELECT name FROM customers WHERE city = 'Kadapa';");
    }

    #[test]
    fn test_multiline_sql_preserved() {
        let response = "```sql\nSELECT name,\n       city\nFROM customers;\n```";
        let sql = extract_sql(response).unwrap();
        assert_eq!(sql, "SELECT name,\n       city\nFROM customers;");
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let response = "```sql\nSELECT * FROM customers;\n```";
        let once = extract_sql(response).unwrap();
        let twice = extract_sql(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_response_is_error() {
        let err = extract_sql("").unwrap_err();
        assert_eq!(err.category(), "Extraction Error");
        assert!(err.to_string().contains("empty response"));
    }

    #[test]
    fn test_whitespace_only_response_is_error() {
        let err = extract_sql("   \n\t  ").unwrap_err();
        assert_eq!(err.category(), "Extraction Error");
    }

    #[test]
    fn test_unterminated_fence_is_error() {
        let err = extract_sql("```sql\nSELECT * FROM customers;").unwrap_err();
        assert!(err.to_string().contains("unterminated"));
    }

    #[test]
    fn test_multiple_blocks_is_error() {
        let response = "```sql\nSELECT 1;\n```\nor maybe\n```sql\nSELECT 2;\n```";
        let err = extract_sql(response).unwrap_err();
        assert!(err.to_string().contains("2 fenced code blocks"));
    }

    #[test]
    fn test_empty_block_is_error() {
        let err = extract_sql("```sql\n```").unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_indented_fence_is_recognized() {
        let response = "  ```sql\nSELECT 1;\n  ```";
        let sql = extract_sql(response).unwrap();
        assert_eq!(sql, "SELECT 1;");
    }
}
