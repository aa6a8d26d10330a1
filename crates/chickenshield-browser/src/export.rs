//! Dashboard PDF export.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::cdp::{CdpClient, CdpError};

/// `ChickenShield_Report_<YYYY-MM-DD>.pdf`
pub fn report_filename(date: NaiveDate) -> String {
    format!("ChickenShield_Report_{}.pdf", date.format("%Y-%m-%d"))
}

/// Open `url` in a new tab, print it to a single-page PDF in `output_dir`
/// and close the tab. Returns the written path.
pub async fn export_report(client: &CdpClient, url: &str, output_dir: &Path) -> Result<PathBuf, CdpError> {
    let session = client.new_page(None).await?;
    let target_id = session.target_id().to_string();

    let printed = async {
        session.navigate(url).await?;
        session.print_single_page().await
    }
    .await;

    if let Err(e) = client.close_page(&target_id).await {
        warn!("Failed to close export tab {}: {}", target_id, e);
    }
    client.release_session(session.session_id()).await;

    let pdf = printed?;
    tokio::fs::create_dir_all(output_dir).await?;
    let path = output_dir.join(report_filename(Local::now().date_naive()));
    tokio::fs::write(&path, &pdf).await?;

    info!("Exported {} bytes to {}", pdf.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_filename() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(report_filename(date), "ChickenShield_Report_2024-03-07.pdf");
    }
}
