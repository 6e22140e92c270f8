pub mod chat;
pub mod headers;
pub mod send;

use hookchat_core::{ChatMessage, FileReference};

use crate::OutputFormat;

/// Print an assistant message and the files it cites.
pub fn print_message(message: &ChatMessage, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(message)?);
        }
        OutputFormat::Text => {
            println!("{}", message.content);
            print_files(&message.files);
        }
    }
    Ok(())
}

fn print_files(files: &[FileReference]) {
    if files.is_empty() {
        return;
    }
    println!();
    println!("Referenced files:");
    for (i, file) in files.iter().enumerate() {
        if file.source.is_empty() {
            println!("  [{}] {}", i + 1, file.name);
        } else {
            println!("  [{}] {} ({})", i + 1, file.name, file.source);
        }
        if !file.snippet.is_empty() {
            println!("      {}", file.snippet);
        }
    }
}
