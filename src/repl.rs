//! Interactive read-eval-print loop.
//!
//! Reads questions from stdin, shows the generated SQL, and renders the
//! results. Recognizes a handful of commands; every other line is sent
//! through the translation pipeline.

use std::io::Write;

use crossterm::style::Stylize;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::error::{IntelliError, Result};
use crate::pipeline::QueryPipeline;
use crate::render;

/// Maximum SQL preview length in history listings.
const SQL_PREVIEW_LEN: usize = 60;

/// Commands recognized by the REPL. Everything else is a question.
#[derive(Debug, PartialEq, Eq)]
enum ReplCommand {
    Question(String),
    History,
    Clear,
    Exit,
    Empty,
}

/// Parses one input line into a command.
fn parse_command(line: &str) -> ReplCommand {
    let trimmed = line.trim();
    match trimmed.to_lowercase().as_str() {
        "" => ReplCommand::Empty,
        "exit" | "quit" => ReplCommand::Exit,
        "history" => ReplCommand::History,
        "clear" => ReplCommand::Clear,
        _ => ReplCommand::Question(trimmed.to_string()),
    }
}

/// Runs the interactive loop until the user exits or stdin closes.
pub async fn run(pipeline: &mut QueryPipeline) -> Result<()> {
    print_banner(pipeline.provider_name());

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("{} ", "intellisql>".cyan().bold());
        std::io::stdout().flush().ok();

        let line = lines
            .next_line()
            .await
            .map_err(|e| IntelliError::internal(format!("Failed to read input: {}", e)))?;

        let Some(line) = line else {
            break;
        };

        match parse_command(&line) {
            ReplCommand::Empty => continue,
            ReplCommand::Exit => break,
            ReplCommand::History => print_history(pipeline),
            ReplCommand::Clear => {
                pipeline.clear_history();
                println!("{} History cleared.", "✓".green());
            }
            ReplCommand::Question(question) => answer_question(pipeline, &question).await,
        }
    }

    println!("Goodbye.");
    Ok(())
}

/// Answers one question, printing the SQL before running it.
async fn answer_question(pipeline: &mut QueryPipeline, question: &str) {
    let sql = match pipeline.translate(question).await {
        Ok(sql) => sql,
        Err(e) => {
            println!("{} {}", "✗".red(), e);
            return;
        }
    };

    println!("{} {}", "sql>".dark_grey(), sql.clone().dark_grey());

    match pipeline.execute_and_record(question, &sql).await {
        Ok(result) => println!("{}", render::render_table(&result)),
        Err(e) => println!("{} {}", "✗".red(), e),
    }
}

/// Prints the session history, oldest first.
fn print_history(pipeline: &QueryPipeline) {
    let entries = pipeline.history();
    if entries.is_empty() {
        println!("No history entries yet.");
        return;
    }

    println!("Session history:");
    for entry in entries {
        let row_label = if entry.row_count == 1 { "row" } else { "rows" };
        println!(
            "  [{}] {} ({} {})",
            entry.timestamp.format("%H:%M:%S"),
            entry.question,
            entry.row_count,
            row_label
        );
        println!("      {}", preview(&entry.sql, SQL_PREVIEW_LEN));
    }
}

/// Shortens SQL to a single preview line.
fn preview(sql: &str, max_len: usize) -> String {
    let flattened = sql.replace('\n', " ");
    if flattened.len() <= max_len {
        flattened
    } else {
        let cut: String = flattened.chars().take(max_len).collect();
        format!("{}...", cut)
    }
}

fn print_banner(provider: &str) {
    println!("{}", "IntelliSQL".bold());
    println!("Ask questions about your data in plain English.");
    println!(
        "Provider: {}. Commands: history, clear, exit.",
        provider
    );
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exit_commands() {
        assert_eq!(parse_command("exit"), ReplCommand::Exit);
        assert_eq!(parse_command("quit"), ReplCommand::Exit);
        assert_eq!(parse_command("  EXIT  "), ReplCommand::Exit);
    }

    #[test]
    fn test_parse_history_and_clear() {
        assert_eq!(parse_command("history"), ReplCommand::History);
        assert_eq!(parse_command("Clear"), ReplCommand::Clear);
    }

    #[test]
    fn test_blank_line_is_empty() {
        assert_eq!(parse_command(""), ReplCommand::Empty);
        assert_eq!(parse_command("   "), ReplCommand::Empty);
    }

    #[test]
    fn test_everything_else_is_a_question() {
        assert_eq!(
            parse_command("How many customers are there?"),
            ReplCommand::Question("How many customers are there?".to_string())
        );
        // Only the bare word is a command
        assert_eq!(
            parse_command("history of purchases"),
            ReplCommand::Question("history of purchases".to_string())
        );
    }

    #[test]
    fn test_question_is_trimmed_but_not_lowercased() {
        assert_eq!(
            parse_command("  Who lives in Kadapa?  "),
            ReplCommand::Question("Who lives in Kadapa?".to_string())
        );
    }

    #[test]
    fn test_preview_shortens_and_flattens() {
        assert_eq!(preview("SELECT 1;", 60), "SELECT 1;");
        assert_eq!(preview("SELECT\n1;", 60), "SELECT 1;");

        let long = "SELECT ".repeat(20);
        let shortened = preview(&long, 60);
        assert!(shortened.ends_with("..."));
        assert_eq!(shortened.len(), 63);
    }
}
