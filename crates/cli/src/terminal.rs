//! Terminal implementations of the host interaction traits.

use async_trait::async_trait;
use ddlaunch_core::interfaces::UserInteraction;
use ddlaunch_core::types::PickItem;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Notifications on stdout/stderr and a numbered stdin picker.
pub struct TerminalUi;

#[async_trait]
impl UserInteraction for TerminalUi {
    fn notify_info(&self, message: &str) {
        println!("{message}");
    }

    fn notify_warn(&self, message: &str) {
        eprintln!("warning: {message}");
    }

    fn notify_error(&self, message: &str) {
        eprintln!("error: {message}");
    }

    async fn pick_project(&self, items: Vec<PickItem>) -> Option<String> {
        println!("Pick the OpenEdge project to start DataDigger for:");
        for (index, item) in items.iter().enumerate() {
            if item.description.is_empty() {
                println!("  {}. {}", index + 1, item.label);
            } else {
                println!("  {}. {}  ({})", index + 1, item.label, item.description);
            }
        }
        print!("Project number (empty cancels): ");
        let _ = std::io::stdout().flush();

        let mut line = String::new();
        let mut reader = BufReader::new(tokio::io::stdin());
        match reader.read_line(&mut line).await {
            Ok(0) | Err(_) => return None,
            Ok(_) => {}
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.parse::<usize>() {
            Ok(number) if (1..=items.len()).contains(&number) => {
                Some(items[number - 1].label.clone())
            }
            _ => {
                eprintln!("warning: '{trimmed}' is not a listed project number");
                None
            }
        }
    }
}
