//! Feed importer (C11): downloads and parses the URLhaus recent-CSV and
//! OpenPhish line-delimited feeds, inserting indicators into a
//! [`ThreatIntelStore`] in batches of 1 000.

use crate::error::{Result, StoreError};
use crate::models::{Indicator, IndicatorKind};
use crate::normalize::registrable_domain;
use crate::store::ThreatIntelStore;
use futures_util::StreamExt;
use mailsentry_mime::is_ipv4_literal;
use std::time::Duration;

const URLHAUS_URL: &str = "https://urlhaus.abuse.ch/downloads/csv_recent/";
const OPENPHISH_URL: &str = "https://openphish.com/feed.txt";
const BATCH_SIZE: usize = 1_000;
const PROGRESS_EVERY: usize = 10_000;
const FEED_TIMEOUT: Duration = Duration::from_secs(30);
const CHUNK_HINT: usize = 8 * 1024;

/// Which external feed to pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedSource {
    Urlhaus,
    OpenPhish,
}

impl FeedSource {
    fn url(self) -> &'static str {
        match self {
            FeedSource::Urlhaus => URLHAUS_URL,
            FeedSource::OpenPhish => OPENPHISH_URL,
        }
    }
}

/// Outcome of one import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub rows_seen: usize,
    pub indicators_inserted: usize,
}

/// Downloads `source` over HTTPS with a 30 s connect/read timeout,
/// reading the body in ~8 KiB chunks (§4.5, §5).
pub async fn download_feed(source: FeedSource) -> Result<Vec<u8>> {
    let client = reqwest::Client::builder().timeout(FEED_TIMEOUT).build()?;
    let response = client.get(source.url()).send().await?;
    let mut stream = response.bytes_stream();
    let mut buffer = Vec::with_capacity(CHUNK_HINT * 4);
    while let Some(chunk) = stream.next().await {
        buffer.extend_from_slice(&chunk?);
    }
    Ok(buffer)
}

fn host_of(raw_url: &str) -> Option<String> {
    url::Url::parse(raw_url).ok()?.host_str().map(str::to_ascii_lowercase)
}

fn indicator_for_host(host: &str, threat_type: &str, source: &str, date_added: &str) -> Indicator {
    if is_ipv4_literal(host) {
        Indicator {
            key: host.to_string(),
            kind: IndicatorKind::Ip,
            threat_type: threat_type.to_string(),
            source: source.to_string(),
            date_added: date_added.to_string(),
        }
    } else {
        Indicator {
            key: registrable_domain(host),
            kind: IndicatorKind::Domain,
            threat_type: threat_type.to_string(),
            source: source.to_string(),
            date_added: date_added.to_string(),
        }
    }
}

/// Flushes `pending` to `store` in one transaction via
/// [`ThreatIntelStore::insert_batch`] and clears it. Called every
/// [`BATCH_SIZE`] rows and once more at the end of each importer (§4.5).
fn flush_batch(store: &ThreatIntelStore, pending: &mut Vec<Indicator>) -> Result<()> {
    if pending.is_empty() {
        return Ok(());
    }
    store.insert_batch(pending)?;
    pending.clear();
    Ok(())
}

/// Parses URLhaus's recent-CSV export and inserts its indicators (§4.5):
/// `#`-prefixed comment/header lines are skipped; columns are fixed
/// `(id, dateadded, url, url_status, last_online, threat, tags,
/// urlhaus_link, reporter)`.
pub fn import_urlhaus_csv(bytes: &[u8], store: &ThreatIntelStore) -> Result<ImportStats> {
    let text = String::from_utf8_lossy(bytes);
    let data_lines: Vec<&str> = text.lines().filter(|l| !l.trim_start().starts_with('#') && !l.trim().is_empty()).collect();

    let mut stats = ImportStats::default();
    let mut pending = Vec::with_capacity(BATCH_SIZE);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data_lines.join("\n").as_bytes());

    for record in reader.records() {
        let record = record.map_err(|e| StoreError::FeedParse(e.to_string()))?;
        stats.rows_seen += 1;

        let dateadded = record.get(1).unwrap_or("").trim_matches('"');
        let raw_url = record.get(2).unwrap_or("").trim_matches('"');
        let threat = record.get(5).unwrap_or("").trim_matches('"');
        let threat_type = if threat.is_empty() { "malicious" } else { threat };

        if let Some(host) = host_of(raw_url) {
            pending.push(indicator_for_host(&host, threat_type, "URLhaus", dateadded));
            stats.indicators_inserted += 1;
        }

        if pending.len() >= BATCH_SIZE {
            flush_batch(store, &mut pending)?;
        }
        if stats.rows_seen % PROGRESS_EVERY == 0 {
            tracing::info!(rows = stats.rows_seen, "URLhaus import progress");
        }
    }

    flush_batch(store, &mut pending)?;
    store.clear_cache();
    Ok(stats)
}

/// Parses OpenPhish's line-delimited feed (one URL per non-empty line)
/// and inserts its domain indicators (§4.5). IP hosts are ignored —
/// OpenPhish rows with no resolvable, non-IP host are skipped.
pub fn import_openphish_lines(bytes: &[u8], store: &ThreatIntelStore) -> Result<ImportStats> {
    let text = String::from_utf8_lossy(bytes);
    let date_added = chrono::Utc::now().format("%Y-%m-%d").to_string();

    let mut stats = ImportStats::default();
    let mut pending = Vec::with_capacity(BATCH_SIZE);
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        stats.rows_seen += 1;

        if let Some(host) = host_of(line) {
            if !is_ipv4_literal(&host) {
                pending.push(indicator_for_host(&host, "phishing", "OpenPhish", &date_added));
                stats.indicators_inserted += 1;
            }
        }

        if pending.len() >= BATCH_SIZE {
            flush_batch(store, &mut pending)?;
        }
        if stats.rows_seen % PROGRESS_EVERY == 0 {
            tracing::info!(rows = stats.rows_seen, "OpenPhish import progress");
        }
    }

    flush_batch(store, &mut pending)?;
    store.clear_cache();
    Ok(stats)
}

/// Downloads and imports `source` in one call.
pub async fn update_from_download(source: FeedSource, store: &ThreatIntelStore) -> Result<ImportStats> {
    let bytes = download_feed(source).await?;
    match source {
        FeedSource::Urlhaus => import_urlhaus_csv(&bytes, store),
        FeedSource::OpenPhish => import_openphish_lines(&bytes, store),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn imports_urlhaus_csv_skipping_comments() {
        let csv = "# Generated\n# id,dateadded,url,url_status,last_online,threat,tags,urlhaus_link,reporter\n1,\"2024-01-01\",\"http://sberbank-secure.tk/verify\",\"online\",\"2024-01-01\",\"malware_download\",\"exe\",\"http://urlhaus/1\",\"abuse\"\n";
        let store = ThreatIntelStore::temporary().unwrap();
        let stats = import_urlhaus_csv(csv.as_bytes(), &store).unwrap();
        assert_eq!(stats.rows_seen, 1);
        assert_eq!(stats.indicators_inserted, 1);
        let hit = store.check_domain("sberbank-secure.tk").unwrap().unwrap();
        assert_eq!(hit.source, "URLhaus");
        assert_eq!(hit.threat_type, "malware_download");
    }

    #[test]
    fn missing_threat_defaults_to_malicious() {
        let csv = "1,\"2024-01-01\",\"http://evil.test/a\",\"online\",\"\",\"\",\"\",\"http://urlhaus/1\",\"abuse\"\n";
        let store = ThreatIntelStore::temporary().unwrap();
        import_urlhaus_csv(csv.as_bytes(), &store).unwrap();
        let hit = store.check_domain("evil.test").unwrap().unwrap();
        assert_eq!(hit.threat_type, "malicious");
    }

    #[test]
    fn imports_openphish_lines_ignoring_ip_hosts() {
        let lines = "http://phish.example.com/login\n\nhttp://203.0.113.5/x\n";
        let store = ThreatIntelStore::temporary().unwrap();
        let stats = import_openphish_lines(lines.as_bytes(), &store).unwrap();
        assert_eq!(stats.rows_seen, 2);
        assert_eq!(stats.indicators_inserted, 1);
        let hit = store.check_domain("phish.example.com").unwrap().unwrap();
        assert_eq!(hit.source, "OpenPhish");
        assert!(store.check_ip("203.0.113.5").unwrap().is_none());
    }

    #[test]
    fn reimporting_same_feed_is_idempotent() {
        let csv = "1,\"2024-01-01\",\"http://evil.test/a\",\"online\",\"\",\"malware\",\"\",\"http://urlhaus/1\",\"abuse\"\n";
        let store = ThreatIntelStore::temporary().unwrap();
        import_urlhaus_csv(csv.as_bytes(), &store).unwrap();
        import_urlhaus_csv(csv.as_bytes(), &store).unwrap();
        assert_eq!(store.count(IndicatorKind::Domain).unwrap(), 1);
    }
}
