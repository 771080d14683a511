use anyhow::Result;

use crate::cli::{HistoryCommands, OutputFormat};
use crate::history::SearchHistory;
use crate::output::output_list;

pub fn handle_history(action: Option<&HistoryCommands>, format: OutputFormat) -> Result<()> {
    match action {
        None | Some(HistoryCommands::Show) => {
            let history = SearchHistory::load()?;
            if history.is_empty() {
                match format {
                    OutputFormat::Json => println!("[]"),
                    OutputFormat::Text => println!("No recent searches"),
                }
                return Ok(());
            }
            output_list(&history.entries, format);
            Ok(())
        }
        Some(HistoryCommands::Clear) => {
            SearchHistory::clear()?;
            match format {
                OutputFormat::Json => {
                    println!(r#"{{"success": true, "message": "Search history cleared"}}"#);
                }
                OutputFormat::Text => {
                    println!("Search history cleared");
                }
            }
            Ok(())
        }
    }
}
