use tracing::{info, warn};

use crate::{
    archive::{ArchiveRequest, ArchiveSource},
    error::RetrieveError,
    parser::{self, ParsedFeed, RowPolicy},
    store::DataStore,
};

/// Download, persist, read back and parse one date range.
///
/// A failed download leaves the previously stored payload untouched.
pub async fn retrieve(
    source: &dyn ArchiveSource,
    store: &DataStore,
    request: &ArchiveRequest,
    policy: RowPolicy,
) -> Result<ParsedFeed, RetrieveError> {
    let payload = source.fetch(request).await?;
    store.save_raw(&payload)?;

    let stored = store.load_raw()?;
    let feed = parser::parse(&stored, policy)?;

    if !feed.rejected.is_empty() {
        warn!(count = feed.rejected.len(), "Rows rejected while parsing");
    }
    info!(
        days = feed.observations.len(),
        path = %store.path().display(),
        "Observations loaded"
    );

    Ok(feed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FetchError, ParseError};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct CannedSource {
        response: Result<String, u16>,
        seen: Mutex<Vec<ArchiveRequest>>,
    }

    impl CannedSource {
        fn ok(body: &str) -> Self {
            Self {
                response: Ok(body.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn status(code: u16) -> Self {
            Self {
                response: Err(code),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ArchiveSource for CannedSource {
        async fn fetch(&self, request: &ArchiveRequest) -> Result<String, FetchError> {
            self.seen.lock().unwrap().push(*request);
            match &self.response {
                Ok(body) => Ok(body.clone()),
                Err(status) => Err(FetchError::Remote {
                    status: *status,
                    body: "{\"error\":true}".into(),
                }),
            }
        }
    }

    const PAYLOAD: &str = "latitude,longitude\n43.6,3.8\n\ntime,tmin,tmax,precip,hum\n\
2025-01-01,5,10,0,80\n2025-01-02,2,8,1.5,90\n2025-01-03,,,,\n";

    fn request() -> ArchiveRequest {
        let d = |day| NaiveDate::from_ymd_opt(2025, 1, day).unwrap();
        ArchiveRequest::new(None, d(1), d(3))
    }

    #[tokio::test]
    async fn stores_then_parses_payload() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::new(dir.path().join("feed.csv"));
        let source = CannedSource::ok(PAYLOAD);

        let feed = retrieve(&source, &store, &request(), RowPolicy::Skip).await.unwrap();

        assert_eq!(feed.observations.len(), 2);
        assert_eq!(feed.rejected.len(), 1);
        assert_eq!(store.load_raw().unwrap(), PAYLOAD);
        assert_eq!(source.seen.lock().unwrap().as_slice(), &[request()]);
    }

    #[tokio::test]
    async fn abort_policy_fails_the_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::new(dir.path().join("feed.csv"));

        let err = retrieve(&CannedSource::ok(PAYLOAD), &store, &request(), RowPolicy::Abort)
            .await
            .unwrap_err();

        assert!(matches!(err, RetrieveError::Parse(ParseError::Row { line: 7, .. })));
    }

    #[tokio::test]
    async fn remote_error_keeps_previous_payload() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::new(dir.path().join("feed.csv"));
        store.save_raw("previous").unwrap();

        let err = retrieve(&CannedSource::status(400), &store, &request(), RowPolicy::Skip)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RetrieveError::Fetch(FetchError::Remote { status: 400, .. })
        ));
        assert_eq!(store.load_raw().unwrap(), "previous");
    }
}
