//! Scan results: findings the service reports for a domain.
//!
//! Results are read-only and always scoped to one domain, so the collection
//! handle is created per domain: `client.results(domain).find(filter)`.

use serde::{Deserialize, Serialize};

use crate::client::NimbusecClient;
use crate::resource::{Collection, Resource};
use crate::timestamp::Timestamp;

/// One finding for a domain.
///
/// Which of the detail fields are filled depends on the category: a
/// blacklist hit carries `threatname` and `reason`, a changed file carries
/// the file metadata and a `diff`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanResult {
    /// Unique identifier, assigned by the service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// `pending`, `acknowledged`, `falsepositive` or `removed`.
    pub status: String,
    /// What happened, e.g. `added file`.
    pub event: String,
    /// Kind of finding, e.g. `webshell` or `blacklist`.
    pub category: String,
    /// 1 (medium) to 3 (severe).
    pub severity: i32,
    /// Likelihood that the finding is critical.
    pub probability: f64,
    /// Whether the file can be deleted without losing user data.
    pub safe_to_delete: bool,
    /// First occurrence.
    pub create_date: Timestamp,
    /// Last occurrence.
    pub last_date: Timestamp,

    /// Name of the threat: the signature name for malware, the list name for
    /// blacklist hits.
    pub threatname: String,
    /// Affected file path or URL.
    pub resource: String,
    /// MD5 digest of the affected file.
    pub md5: String,
    /// Size of the affected file in bytes.
    pub filesize: i64,
    /// Owning user of the affected file.
    pub owner: String,
    /// Owning group of the affected file.
    pub group: String,
    /// Unix permission bits as a decimal integer.
    pub permission: i64,
    /// Content change between two scans.
    pub diff: String,
    /// Why the domain or URL is blacklisted.
    pub reason: String,
}

impl Resource for ScanResult {
    const KIND: &'static str = "result";
    type Id = i64;

    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl NimbusecClient {
    /// Returns a handle on the scan results of `domain`.
    ///
    /// Only the read operations apply: `get(id)` and `find(filter)`.
    pub fn results(&self, domain: i64) -> Collection<'_, ScanResult> {
        Collection::new(self, format!("/v2/domain/{domain}/result"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_result() {
        let result: ScanResult = serde_json::from_value(json!({
            "id": 11,
            "status": "pending",
            "event": "added file",
            "category": "webshell",
            "severity": 3,
            "probability": 0.97,
            "safeToDelete": true,
            "createDate": 1_500_000_000_123_i64,
            "lastDate": 1_500_000_100_000_i64,
            "threatname": "PHP.Shell",
            "resource": "/var/www/shell.php",
            "filesize": 2048,
            "permission": 420
        }))
        .unwrap();

        assert_eq!(result.id, Some(11));
        assert_eq!(result.category, "webshell");
        assert_eq!(result.severity, 3);
        assert!(result.safe_to_delete);
        assert_eq!(result.create_date.as_millis(), 1_500_000_000_000);
        assert_eq!(result.permission, 420);
        assert!(result.diff.is_empty());
    }

    #[test]
    fn test_distinct_wire_names() {
        let value = serde_json::to_value(ScanResult {
            status: "acknowledged".to_string(),
            event: "changed file".to_string(),
            category: "defacement".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(value["status"], json!("acknowledged"));
        assert_eq!(value["event"], json!("changed file"));
        assert_eq!(value["category"], json!("defacement"));
        assert_eq!(value["safeToDelete"], json!(false));
    }
}
