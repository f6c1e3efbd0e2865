//! Discovery service
//!
//! Lists profiles the requester has not yet acted on, nearest first.

use chrono::Utc;
use dating_core::ranking::rank;
use dating_core::{CandidateFilter, DomainError, UserId};
use tracing::{debug, instrument};

use crate::dto::{DiscoverQuery, DiscoveryResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Discovery service
pub struct DiscoveryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DiscoveryService<'a> {
    /// Create a new DiscoveryService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Ranked candidates for `requester`
    #[instrument(skip(self, query), fields(requester = %requester))]
    pub async fn discover(
        &self,
        requester: UserId,
        query: DiscoverQuery,
    ) -> ServiceResult<Vec<DiscoveryResponse>> {
        let me = self
            .ctx
            .user_store()
            .find_by_id(requester)
            .await?
            .ok_or(DomainError::UserNotFound(requester))?;

        let today = Utc::now().date_naive();
        let filter = CandidateFilter {
            gender: query.gender(),
            birth_dates: query
                .age_range()
                .and_then(|range| range.birth_date_window(today)),
        };

        let candidates = self
            .ctx
            .user_store()
            .find_candidates(requester, &filter)
            .await?;
        let ranked = rank(me.location, candidates);

        debug!(count = ranked.len(), ?filter, "Discovery candidates ranked");

        Ok(ranked.into_iter().map(DiscoveryResponse::from).collect())
    }
}
