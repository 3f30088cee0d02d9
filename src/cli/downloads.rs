use tabled::Table;

use crate::{
    downloader, error, info, success,
    types::DownloadTableRow,
    utils,
};

pub async fn list_downloads() {
    let downloads = match downloader::list().await {
        Ok(d) => d,
        Err(e) => error!("Cannot list downloads. Err: {}", e),
    };

    if downloads.is_empty() {
        info!("No downloads yet.");
        return;
    }

    let rows: Vec<DownloadTableRow> = downloads
        .into_iter()
        .map(|d| DownloadTableRow {
            filename: d.filename,
            size: utils::format_bytes(d.size),
        })
        .collect();

    println!("{}", Table::new(rows));
}

pub async fn delete_download(filename: String) {
    match downloader::delete(&filename).await {
        Ok(()) => success!("Deleted {}", filename),
        Err(e) => error!("{}", e),
    }
}
