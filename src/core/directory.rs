use crate::domain::model::RefereeDirectory;
use crate::domain::ports::RefereeSource;
use crate::domain::services::normalize::referee_key;
use std::time::Duration;

/// Reads registry pages from 1 upward until one holds no records at all.
///
/// A page whose records were all rejected still counts as a page. A failed
/// page ends pagination too, but the directory is then marked as truncated so
/// the report can say it may be missing referees. The result is sorted by
/// name key, ready for [`crate::domain::services::find_match`].
pub async fn load_directory<R: RefereeSource>(
    source: &R,
    page_delay: Duration,
) -> RefereeDirectory {
    let mut directory = RefereeDirectory::default();
    let mut page = 1;

    loop {
        match source.fetch_page(page).await {
            Ok(registry_page) if registry_page.is_last() => {
                tracing::debug!("Registry page {} is empty, directory complete", page);
                break;
            }
            Ok(registry_page) => {
                tracing::info!(
                    "Processed registry page {} ({} referees of {} records)",
                    page,
                    registry_page.referees.len(),
                    registry_page.raw_len
                );
                directory.referees.extend(registry_page.referees);
                directory.pages_read = page;
            }
            Err(e) => {
                tracing::warn!("Stopping at registry page {}: {}", page, e);
                directory.truncated_by = Some(e.to_string());
                break;
            }
        }

        page += 1;
        if !page_delay.is_zero() {
            tokio::time::sleep(page_delay).await;
        }
    }

    directory.referees.sort_by_cached_key(referee_key);
    directory
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::registry::HttpRegistry;
    use crate::domain::model::{QualificationSet, RefereeRecord, RegistryPage};
    use crate::utils::error::{CheckError, Result};
    use httpmock::prelude::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Serves fixed pages, then either an empty page or a failure. A page
    /// entry of `None` stands for a record the decoder rejected.
    struct ScriptedSource {
        pages: Vec<Vec<Option<&'static str>>>,
        fail_after: bool,
        calls: AtomicU32,
    }

    impl ScriptedSource {
        fn new(pages: Vec<Vec<Option<&'static str>>>, fail_after: bool) -> Self {
            Self {
                pages,
                fail_after,
                calls: AtomicU32::new(0),
            }
        }
    }

    impl RefereeSource for ScriptedSource {
        async fn fetch_page(&self, page: u32) -> Result<RegistryPage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.pages.get(page as usize - 1) {
                Some(records) => Ok(RegistryPage {
                    referees: records
                        .iter()
                        .flatten()
                        .map(|n| RefereeRecord::new(n.to_string(), QualificationSet::none()))
                        .collect(),
                    raw_len: records.len(),
                }),
                None if self.fail_after => Err(CheckError::FetchError {
                    page,
                    status: 500,
                    reason: "Internal Server Error".to_string(),
                }),
                None => Ok(RegistryPage::default()),
            }
        }
    }

    #[tokio::test]
    async fn test_reads_until_empty_page_and_sorts() {
        let source = ScriptedSource::new(
            vec![vec![Some("ZED ZULU"), Some("JANE DOE")], vec![Some("ADA LOVELACE")]],
            false,
        );

        let directory = load_directory(&source, Duration::ZERO).await;

        assert!(directory.is_complete());
        assert_eq!(directory.pages_read, 2);
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
        let names: Vec<&str> = directory.referees.iter().map(|r| r.record.name()).collect();
        assert_eq!(names, vec!["ADA LOVELACE", "JANE DOE", "ZED ZULU"]);
    }

    #[tokio::test]
    async fn test_page_of_rejected_records_does_not_end_pagination() {
        let source = ScriptedSource::new(vec![vec![None, None], vec![Some("JANE DOE")]], false);

        let directory = load_directory(&source, Duration::ZERO).await;

        assert!(directory.is_complete());
        assert_eq!(directory.pages_read, 2);
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
        assert_eq!(directory.referees.len(), 1);
        assert_eq!(directory.referees[0].record.name(), "JANE DOE");
    }

    #[tokio::test]
    async fn test_failed_page_marks_directory_truncated() {
        let source = ScriptedSource::new(vec![vec![Some("JANE DOE")]], true);

        let directory = load_directory(&source, Duration::ZERO).await;

        assert!(!directory.is_complete());
        assert_eq!(directory.referees.len(), 1);
        assert!(directory
            .truncated_by
            .as_deref()
            .is_some_and(|reason| reason.contains("500")));
    }

    #[tokio::test]
    async fn test_empty_first_page() {
        let source = ScriptedSource::new(vec![], false);

        let directory = load_directory(&source, Duration::ZERO).await;

        assert!(directory.is_complete());
        assert!(directory.referees.is_empty());
        assert_eq!(directory.pages_read, 0);
    }

    #[tokio::test]
    async fn test_http_pages_with_non_referee_and_malformed_records() {
        let server = MockServer::start();
        let page_one = server.mock(|when, then| {
            when.method(GET).path("/referees").query_param("page", "1");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"data": [
                    {"type": "team", "attributes": {"name": "Sheffield Squids"}}
                ]}));
        });
        let page_two = server.mock(|when, then| {
            when.method(GET).path("/referees").query_param("page", "2");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"data": [
                    {"type": "team", "attributes": null},
                    {
                        "type": "referee",
                        "attributes": {"first_name": "Jane", "last_name": "Doe"},
                        "relationships": {"certifications": {"data": [
                            {"type": "certification", "id": "3"}
                        ]}}
                    }
                ]}));
        });
        let page_three = server.mock(|when, then| {
            when.method(GET).path("/referees").query_param("page", "3");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"data": []}));
        });

        let registry = HttpRegistry::new(&server.url("/referees"), "referee-check-tests").unwrap();
        let directory = load_directory(&registry, Duration::ZERO).await;

        page_one.assert();
        page_two.assert();
        page_three.assert();
        assert!(directory.is_complete());
        assert_eq!(directory.referees.len(), 1);
        assert_eq!(directory.referees[0].record.name(), "JANE DOE");
    }
}
