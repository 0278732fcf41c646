//! Ads platform operations: campaign listing and per-campaign insights.

use std::future::Future;

use adsync_core::{Campaign, InsightRecord};

use crate::client::ComposioClient;
use crate::error::ActionError;
use crate::types::{
    extract_list, CampaignFilter, GetCampaignsInput, GetInsightsInput, InsightsQuery,
    CAMPAIGN_FIELDS, GET_CAMPAIGNS, GET_INSIGHTS, INSIGHT_FIELDS,
};

/// Read side of the pipeline.
pub trait AdsSource {
    /// Lists campaigns matching `filter`. An empty list is a valid answer.
    fn fetch_campaigns(
        &self,
        filter: &CampaignFilter,
    ) -> impl Future<Output = Result<Vec<Campaign>, ActionError>> + Send;

    /// Lists insight records for one campaign. No data is an empty list.
    fn fetch_insights(
        &self,
        query: &InsightsQuery,
    ) -> impl Future<Output = Result<Vec<InsightRecord>, ActionError>> + Send;
}

impl AdsSource for ComposioClient {
    async fn fetch_campaigns(&self, filter: &CampaignFilter) -> Result<Vec<Campaign>, ActionError> {
        let input = GetCampaignsInput {
            fields: CAMPAIGN_FIELDS,
            limit: filter.limit,
            effective_status: &filter.effective_status,
        };
        let data = self
            .execute(GET_CAMPAIGNS, &self.ads_entity_id, &input)
            .await?;
        extract_list(data, GET_CAMPAIGNS)
    }

    async fn fetch_insights(
        &self,
        query: &InsightsQuery,
    ) -> Result<Vec<InsightRecord>, ActionError> {
        let input = GetInsightsInput {
            campaign_id: &query.campaign_id,
            level: "campaign",
            fields: INSIGHT_FIELDS,
            time_range: query.window,
            breakdowns: &query.breakdowns,
            time_increment: 1,
        };
        let data = self
            .execute(GET_INSIGHTS, &self.ads_entity_id, &input)
            .await?;
        extract_list(
            data,
            &format!("{GET_INSIGHTS}(campaign_id={})", query.campaign_id),
        )
    }
}
