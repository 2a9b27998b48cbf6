//! Calendar feed endpoint: selects sermon records per request parameters and
//! serves them as a downloadable/subscribable iCalendar document.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{ApiError, ApiResult};
use crate::ics;
use crate::repository::{PgFeedRepository, SermonFeedRepository, SermonFilter};
use shared_types::Sermon;

/// Query parameters accepted by the feed endpoint.
#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    #[serde(rename = "sermonId")]
    pub sermon_id: Option<Uuid>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub token: Option<String>,
}

/// Determine the set of sermons a feed request covers.
///
/// A `sermonId` fetches exactly that record and ignores every other filter.
/// Otherwise the inclusive date range restricts results, and a feed token,
/// when supplied, scopes them to the church the token resolves to. A token
/// that resolves to no church fails the whole request rather than producing
/// an empty calendar.
pub async fn resolve_sermons<R>(repo: &mut R, params: &FeedQuery) -> Result<Vec<Sermon>, ApiError>
where
    R: SermonFeedRepository,
{
    if let Some(sermon_id) = params.sermon_id {
        return Ok(repo.sermon_by_id(sermon_id).await?.into_iter().collect());
    }

    let mut filter = SermonFilter {
        church_id: None,
        from: params.from,
        to: params.to,
    };

    if let Some(token) = params.token.as_deref() {
        match repo.church_id_for_feed_token(token).await? {
            Some(church) => filter.church_id = Some(church),
            None => return Err(ApiError::UnknownFeedToken),
        }
    }

    Ok(repo.sermons_by_filter(filter).await?)
}

pub async fn sermon_feed(
    State(pool): State<DbPool>,
    Query(params): Query<FeedQuery>,
) -> ApiResult<Response> {
    let mut conn = pool.get().await?;
    let mut repo = PgFeedRepository::new(&mut conn);
    let sermons = resolve_sermons(&mut repo, &params).await?;

    let calendar = ics::encode_calendar(&sermons, Utc::now())?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/calendar; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"sermons.ics\"",
            ),
        ],
        calendar,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use chrono::TimeZone;
    use std::cmp::Ordering;
    use std::collections::HashMap;

    struct InMemoryRepository {
        sermons: Vec<Sermon>,
        feed_tokens: HashMap<String, Uuid>,
    }

    impl SermonFeedRepository for InMemoryRepository {
        async fn sermon_by_id(&mut self, id: Uuid) -> Result<Option<Sermon>, StoreError> {
            Ok(self.sermons.iter().find(|s| s.id == id).cloned())
        }

        async fn sermons_by_filter(
            &mut self,
            filter: SermonFilter,
        ) -> Result<Vec<Sermon>, StoreError> {
            let mut rows: Vec<Sermon> = self
                .sermons
                .iter()
                .filter(|s| {
                    if let Some(church) = filter.church_id {
                        if s.church_id != Some(church) {
                            return false;
                        }
                    }
                    if filter.from.is_some() || filter.to.is_some() {
                        let Some(date) = s.date else { return false };
                        if filter.from.is_some_and(|from| date < from) {
                            return false;
                        }
                        if filter.to.is_some_and(|to| date > to) {
                            return false;
                        }
                    }
                    true
                })
                .cloned()
                .collect();

            rows.sort_by(|a, b| match (a.date, b.date) {
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            });

            Ok(rows)
        }

        async fn church_id_for_feed_token(
            &mut self,
            token: &str,
        ) -> Result<Option<Uuid>, StoreError> {
            Ok(self.feed_tokens.get(token).copied())
        }
    }

    fn sermon(id_byte: u8, date: Option<NaiveDate>, church_id: Option<Uuid>) -> Sermon {
        Sermon {
            id: Uuid::from_bytes([id_byte; 16]),
            church_id,
            series_id: None,
            title: Some(format!("Sermon {}", id_byte)),
            theme: None,
            date,
            start_time: None,
            end_time: None,
            location: None,
            passages: None,
            notes: None,
            setlist: None,
            is_series_item: false,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn query(
        sermon_id: Option<Uuid>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        token: Option<&str>,
    ) -> FeedQuery {
        FeedQuery {
            sermon_id,
            from,
            to,
            token: token.map(String::from),
        }
    }

    #[tokio::test]
    async fn date_range_is_inclusive_and_ascending() {
        let mut repo = InMemoryRepository {
            sermons: vec![
                sermon(3, Some(date(2024, 12, 31)), None),
                sermon(1, Some(date(2024, 1, 1)), None),
                sermon(2, Some(date(2024, 6, 15)), None),
            ],
            feed_tokens: HashMap::new(),
        };

        let params = query(None, Some(date(2024, 1, 1)), Some(date(2024, 6, 30)), None);
        let result = resolve_sermons(&mut repo, &params).await.unwrap();

        let ids: Vec<Uuid> = result.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![Uuid::from_bytes([1; 16]), Uuid::from_bytes([2; 16])]);
    }

    #[tokio::test]
    async fn token_scopes_results_to_one_church() {
        let church_a = Uuid::from_bytes([0xaa; 16]);
        let church_b = Uuid::from_bytes([0xbb; 16]);
        let mut tokens = HashMap::new();
        tokens.insert("token-a".to_string(), church_a);
        tokens.insert("token-b".to_string(), church_b);

        let mut repo = InMemoryRepository {
            sermons: vec![
                sermon(1, Some(date(2024, 3, 1)), Some(church_a)),
                sermon(2, Some(date(2024, 3, 8)), Some(church_b)),
            ],
            feed_tokens: tokens,
        };

        let params = query(None, None, None, Some("token-a"));
        let result = resolve_sermons(&mut repo, &params).await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].church_id, Some(church_a));
    }

    #[tokio::test]
    async fn unknown_token_is_an_error_not_an_empty_calendar() {
        let mut repo = InMemoryRepository {
            sermons: vec![sermon(1, Some(date(2024, 3, 1)), None)],
            feed_tokens: HashMap::new(),
        };

        let params = query(None, None, None, Some("no-such-token"));
        let err = resolve_sermons(&mut repo, &params).await.unwrap_err();

        assert!(matches!(err, ApiError::UnknownFeedToken));
    }

    #[tokio::test]
    async fn sermon_id_ignores_all_other_filters() {
        let target = sermon(7, Some(date(2024, 9, 1)), None);
        let mut repo = InMemoryRepository {
            sermons: vec![target.clone(), sermon(8, Some(date(2024, 9, 8)), None)],
            feed_tokens: HashMap::new(),
        };

        // Range excludes the target and the token is unknown; both must be
        // ignored on the single-record path.
        let params = query(
            Some(target.id),
            Some(date(2030, 1, 1)),
            None,
            Some("no-such-token"),
        );
        let result = resolve_sermons(&mut repo, &params).await.unwrap();

        assert_eq!(result, vec![target]);
    }

    #[tokio::test]
    async fn missing_sermon_id_yields_empty_set() {
        let mut repo = InMemoryRepository {
            sermons: vec![],
            feed_tokens: HashMap::new(),
        };

        let params = query(Some(Uuid::from_bytes([9; 16])), None, None, None);
        let result = resolve_sermons(&mut repo, &params).await.unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn undated_sermons_sort_last_in_open_queries() {
        let mut repo = InMemoryRepository {
            sermons: vec![
                sermon(1, None, None),
                sermon(2, Some(date(2024, 5, 5)), None),
            ],
            feed_tokens: HashMap::new(),
        };

        let params = query(None, None, None, None);
        let result = resolve_sermons(&mut repo, &params).await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].id, Uuid::from_bytes([2; 16]));
        assert_eq!(result[1].id, Uuid::from_bytes([1; 16]));
    }
}
