//! The persistent threat-intelligence store (§4.4): a SQLite-backed
//! indicator set fronted by a bounded LRU, guarded by a single exclusive
//! lock — an explicitly sanctioned simplification (§5) since lookups are
//! sub-millisecond once the cache is warm.

use crate::cache::{IndicatorHit, ReputationCache};
use crate::error::Result;
use crate::models::{Indicator, IndicatorKind, TIReputation};
use crate::normalize::registrable_domain;
use parking_lot::Mutex;
use rusqlite::{params, Connection};
use std::path::Path;

struct Inner {
    conn: Connection,
    cache: ReputationCache,
}

/// The process-wide, long-lived threat-intelligence store. Opens a
/// SQLite database (file-backed or in-memory) and owns the bounded LRU
/// layered in front of it.
pub struct ThreatIntelStore {
    inner: Mutex<Inner>,
}

fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS malicious_domains (
            key TEXT UNIQUE NOT NULL,
            threat_type TEXT NOT NULL,
            date_added TEXT NOT NULL,
            source TEXT NOT NULL
         );
         CREATE INDEX IF NOT EXISTS idx_malicious_domains_key ON malicious_domains(key);
         CREATE TABLE IF NOT EXISTS malicious_ips (
            key TEXT UNIQUE NOT NULL,
            threat_type TEXT NOT NULL,
            date_added TEXT NOT NULL,
            source TEXT NOT NULL
         );
         CREATE INDEX IF NOT EXISTS idx_malicious_ips_key ON malicious_ips(key);",
    )
}

impl ThreatIntelStore {
    /// Opens or creates a store at `path` on disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        create_schema(&conn)?;
        Ok(Self {
            inner: Mutex::new(Inner {
                conn,
                cache: ReputationCache::default(),
            }),
        })
    }

    /// Opens an in-memory store, for tests and short-lived processes.
    pub fn temporary() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        create_schema(&conn)?;
        Ok(Self {
            inner: Mutex::new(Inner {
                conn,
                cache: ReputationCache::default(),
            }),
        })
    }

    /// Opens (or creates) a store with a non-default cache capacity.
    pub fn open_with_capacity<P: AsRef<Path>>(path: P, cache_capacity: usize) -> Result<Self> {
        let conn = Connection::open(path)?;
        create_schema(&conn)?;
        Ok(Self {
            inner: Mutex::new(Inner {
                conn,
                cache: ReputationCache::with_capacity(cache_capacity),
            }),
        })
    }

    /// Inserts one indicator, idempotently (insert-or-ignore on the
    /// `key` unique constraint).
    pub fn insert_indicator(&self, indicator: &Indicator) -> Result<()> {
        let inner = self.inner.lock();
        let table = indicator.kind.table();
        inner.conn.execute(
            &format!(
                "INSERT OR IGNORE INTO {table} (key, threat_type, date_added, source) VALUES (?1, ?2, ?3, ?4)"
            ),
            params![indicator.key, indicator.threat_type, indicator.date_added, indicator.source],
        )?;
        Ok(())
    }

    /// Inserts a batch of indicators inside a single transaction.
    pub fn insert_batch(&self, indicators: &[Indicator]) -> Result<()> {
        let mut inner = self.inner.lock();
        let tx = inner.conn.transaction()?;
        for indicator in indicators {
            let table = indicator.kind.table();
            tx.execute(
                &format!(
                    "INSERT OR IGNORE INTO {table} (key, threat_type, date_added, source) VALUES (?1, ?2, ?3, ?4)"
                ),
                params![indicator.key, indicator.threat_type, indicator.date_added, indicator.source],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Single-domain reputation lookup, LRU-cached.
    pub fn check_domain(&self, domain: &str) -> Result<Option<IndicatorHit>> {
        let normalized = registrable_domain(domain);
        let cache_key = format!("domain:{normalized}");
        let mut inner = self.inner.lock();
        if let Some(hit) = inner.cache.get(&cache_key) {
            return Ok(hit);
        }
        let hit = query_one(&inner.conn, "malicious_domains", &normalized)?;
        inner.cache.put(cache_key, hit.clone());
        Ok(hit)
    }

    /// Single-IP reputation lookup, LRU-cached. IPs are compared as-is
    /// (no normalisation).
    pub fn check_ip(&self, ip: &str) -> Result<Option<IndicatorHit>> {
        let cache_key = format!("ip:{ip}");
        let mut inner = self.inner.lock();
        if let Some(hit) = inner.cache.get(&cache_key) {
            return Ok(hit);
        }
        let hit = query_one(&inner.conn, "malicious_ips", ip)?;
        inner.cache.put(cache_key, hit.clone());
        Ok(hit)
    }

    /// Batch reputation check (§4.4): one `IN (...)` query per kind,
    /// plus per-entry cache promotion/insertion.
    pub fn check_reputation(&self, domains: &[String], ips: &[String]) -> Result<TIReputation> {
        // Distinct subdomains of one malicious root (e.g. `sub1.evil.tk`,
        // `sub2.evil.tk`) normalize to the same registrable domain; dedupe
        // here so `malicious_domains` lists each unique indicator once,
        // matching the rule engine's "per unique malicious domain" weight.
        let mut seen = std::collections::HashSet::new();
        let normalized_domains: Vec<String> = domains
            .iter()
            .map(|d| registrable_domain(d))
            .filter(|d| seen.insert(d.clone()))
            .collect();

        let mut inner = self.inner.lock();

        let mut domain_hits: Vec<(String, IndicatorHit)> = Vec::new();
        let mut uncached_domains = Vec::new();
        for domain in &normalized_domains {
            let cache_key = format!("domain:{domain}");
            match inner.cache.get(&cache_key) {
                Some(Some(hit)) => domain_hits.push((domain.clone(), hit)),
                Some(None) => {}
                None => uncached_domains.push(domain.clone()),
            }
        }
        if !uncached_domains.is_empty() {
            let fresh = query_many(&inner.conn, "malicious_domains", &uncached_domains)?;
            for domain in &uncached_domains {
                let cache_key = format!("domain:{domain}");
                let hit = fresh.get(domain).cloned();
                inner.cache.put(cache_key, hit.clone());
                if let Some(hit) = hit {
                    domain_hits.push((domain.clone(), hit));
                }
            }
        }

        let mut ip_hits: Vec<(String, IndicatorHit)> = Vec::new();
        let mut uncached_ips = Vec::new();
        for ip in ips {
            let cache_key = format!("ip:{ip}");
            match inner.cache.get(&cache_key) {
                Some(Some(hit)) => ip_hits.push((ip.clone(), hit)),
                Some(None) => {}
                None => uncached_ips.push(ip.clone()),
            }
        }
        if !uncached_ips.is_empty() {
            let fresh = query_many(&inner.conn, "malicious_ips", &uncached_ips)?;
            for ip in &uncached_ips {
                let cache_key = format!("ip:{ip}");
                let hit = fresh.get(ip).cloned();
                inner.cache.put(cache_key, hit.clone());
                if let Some(hit) = hit {
                    ip_hits.push((ip.clone(), hit));
                }
            }
        }

        let domain_in_urlhaus = domain_hits.iter().any(|(_, h)| h.source.to_ascii_lowercase().contains("urlhaus"));
        let domain_in_openphish = domain_hits.iter().any(|(_, h)| h.source.to_ascii_lowercase().contains("openphish"));
        let ip_in_blacklist = !ip_hits.is_empty();

        Ok(TIReputation {
            malicious_domains: domain_hits.into_iter().map(|(k, _)| k).collect(),
            malicious_ips: ip_hits.into_iter().map(|(k, _)| k).collect(),
            domain_in_urlhaus,
            domain_in_openphish,
            ip_in_blacklist,
        })
    }

    /// Clears the LRU. Called after every feed ingestion so the cache
    /// never holds a stale negative for a newly inserted indicator (§8
    /// cache-coherence property).
    pub fn clear_cache(&self) {
        self.inner.lock().cache.clear();
    }

    pub fn cache_len(&self) -> usize {
        self.inner.lock().cache.len()
    }

    /// Number of distinct indicators of `kind` currently stored.
    pub fn count(&self, kind: IndicatorKind) -> Result<usize> {
        let inner = self.inner.lock();
        let table = kind.table();
        let count: i64 = inner
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn query_one(conn: &Connection, table: &str, key: &str) -> rusqlite::Result<Option<IndicatorHit>> {
    conn.query_row(
        &format!("SELECT threat_type, source FROM {table} WHERE key = ?1"),
        params![key],
        |row| {
            Ok(IndicatorHit {
                threat_type: row.get(0)?,
                source: row.get(1)?,
            })
        },
    )
    .map(Some)
    .or_else(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => Ok(None),
        other => Err(other),
    })
}

fn query_many(
    conn: &Connection,
    table: &str,
    keys: &[String],
) -> rusqlite::Result<std::collections::HashMap<String, IndicatorHit>> {
    let mut out = std::collections::HashMap::new();
    if keys.is_empty() {
        return Ok(out);
    }
    let placeholders = std::iter::repeat("?").take(keys.len()).collect::<Vec<_>>().join(",");
    let sql = format!("SELECT key, threat_type, source FROM {table} WHERE key IN ({placeholders})");
    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = keys.iter().map(|k| k as &dyn rusqlite::ToSql).collect();
    let mut rows = stmt.query(params.as_slice())?;
    while let Some(row) = rows.next()? {
        let key: String = row.get(0)?;
        out.insert(
            key,
            IndicatorHit {
                threat_type: row.get(1)?,
                source: row.get(2)?,
            },
        );
    }
    Ok(out)
}

impl std::fmt::Debug for ThreatIntelStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreatIntelStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indicator(key: &str, kind: IndicatorKind, source: &str) -> Indicator {
        Indicator {
            key: key.to_string(),
            kind,
            threat_type: "phishing".to_string(),
            source: source.to_string(),
            date_added: "2024-01-01".to_string(),
        }
    }

    #[test]
    fn insert_then_check_domain_hits() {
        let store = ThreatIntelStore::temporary().unwrap();
        store
            .insert_indicator(&indicator("sberbank-secure.tk", IndicatorKind::Domain, "URLhaus"))
            .unwrap();

        let hit = store.check_domain("sberbank-secure.tk").unwrap().unwrap();
        assert_eq!(hit.source, "URLhaus");
    }

    #[test]
    fn reimport_is_idempotent() {
        let store = ThreatIntelStore::temporary().unwrap();
        let ind = indicator("evil.test", IndicatorKind::Domain, "URLhaus");
        store.insert_indicator(&ind).unwrap();
        store.insert_indicator(&ind).unwrap();
        assert_eq!(store.count(IndicatorKind::Domain).unwrap(), 1);
    }

    #[test]
    fn check_reputation_batches_domains_and_ips() {
        let store = ThreatIntelStore::temporary().unwrap();
        store
            .insert_indicator(&indicator("sberbank-secure.tk", IndicatorKind::Domain, "URLhaus"))
            .unwrap();
        store
            .insert_indicator(&indicator("1.2.3.4", IndicatorKind::Ip, "OpenPhish"))
            .unwrap();

        let rep = store
            .check_reputation(&["sberbank-secure.tk".to_string(), "clean.test".to_string()], &["1.2.3.4".to_string()])
            .unwrap();

        assert_eq!(rep.malicious_domains, vec!["sberbank-secure.tk".to_string()]);
        assert!(rep.domain_in_urlhaus);
        assert!(!rep.domain_in_openphish);
        assert!(rep.ip_in_blacklist);
    }

    #[test]
    fn check_reputation_dedupes_subdomains_of_one_malicious_root() {
        let store = ThreatIntelStore::temporary().unwrap();
        store
            .insert_indicator(&indicator("evil.tk", IndicatorKind::Domain, "URLhaus"))
            .unwrap();

        let rep = store
            .check_reputation(&["sub1.evil.tk".to_string(), "sub2.evil.tk".to_string()], &[])
            .unwrap();

        assert_eq!(rep.malicious_domains, vec!["evil.tk".to_string()]);
    }

    #[test]
    fn cache_is_cleared_and_repopulated_after_insert() {
        let store = ThreatIntelStore::temporary().unwrap();
        assert!(store.check_domain("new.test").unwrap().is_none());
        assert_eq!(store.cache_len(), 1);

        store
            .insert_indicator(&indicator("new.test", IndicatorKind::Domain, "URLhaus"))
            .unwrap();
        store.clear_cache();

        let hit = store.check_domain("new.test").unwrap();
        assert!(hit.is_some(), "cache must not serve a stale negative after ingest");
    }
}
