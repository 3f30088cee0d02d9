use std::path::PathBuf;

use tabled::Table;

use crate::{error, extractor, info, utils, warning};

/// Extracts mentions from a local file, or from stdin when no file is given.
pub async fn extract(file: Option<PathBuf>) {
    let text = match file {
        Some(path) => match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) => error!("Cannot read {}. Err: {}", path.display(), e),
        },
        None => match std::io::read_to_string(std::io::stdin()) {
            Ok(text) => text,
            Err(e) => error!("Cannot read stdin. Err: {}", e),
        },
    };

    let mentions = extractor::extract(&text);
    if mentions.is_empty() {
        warning!("No album or track mentions found.");
        return;
    }

    info!("Found {} mentions", mentions.len());
    println!("{}", Table::new(utils::mention_table_rows(&mentions)));
}
