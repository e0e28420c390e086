use chrono::{DateTime, NaiveDate, Utc};

use super::record::{Platform, Record};

/// The aggregated feed produced by one run
#[derive(Debug, Clone)]
pub struct Digest {
    /// Reference date the run was made for
    pub date: NaiveDate,
    /// When this digest was generated
    pub generated_at: DateTime<Utc>,
    /// Records in output order
    pub records: Vec<Record>,
}

/// Record counts per platform
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DigestStats {
    pub microblog: usize,
    pub forum: usize,
    pub feed: usize,
    pub repository: usize,
}

impl DigestStats {
    pub fn total(&self) -> usize {
        self.microblog + self.forum + self.feed + self.repository
    }

    pub fn count(&self, platform: Platform) -> usize {
        match platform {
            Platform::Microblog => self.microblog,
            Platform::Forum => self.forum,
            Platform::Feed => self.feed,
            Platform::Repository => self.repository,
        }
    }
}

impl Digest {
    /// Compute per-platform counts
    pub fn stats(&self) -> DigestStats {
        let mut stats = DigestStats::default();
        for record in &self.records {
            match record.platform {
                Platform::Microblog => stats.microblog += 1,
                Platform::Forum => stats.forum += 1,
                Platform::Feed => stats.feed += 1,
                Platform::Repository => stats.repository += 1,
            }
        }
        stats
    }

    /// Check if the digest holds any record
    pub fn has_activity(&self) -> bool {
        !self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(platform: Platform) -> Record {
        Record {
            platform,
            source: "src".to_string(),
            title: "title".to_string(),
            url: "https://example.com".to_string(),
            summary: String::new(),
            published: None,
        }
    }

    #[test]
    fn test_digest_stats_empty() {
        let digest = Digest {
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            generated_at: Utc::now(),
            records: vec![],
        };

        let stats = digest.stats();
        assert_eq!(stats, DigestStats::default());
        assert_eq!(stats.total(), 0);
        assert!(!digest.has_activity());
    }

    #[test]
    fn test_digest_stats_with_data() {
        let digest = Digest {
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            generated_at: Utc::now(),
            records: vec![
                record(Platform::Microblog),
                record(Platform::Forum),
                record(Platform::Forum),
                record(Platform::Feed),
                record(Platform::Repository),
                record(Platform::Repository),
                record(Platform::Repository),
            ],
        };

        let stats = digest.stats();
        assert_eq!(stats.microblog, 1);
        assert_eq!(stats.forum, 2);
        assert_eq!(stats.feed, 1);
        assert_eq!(stats.count(Platform::Repository), 3);
        assert_eq!(stats.total(), 7);
        assert!(digest.has_activity());
    }
}
