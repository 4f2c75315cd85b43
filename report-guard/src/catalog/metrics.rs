//! Metric and sort-key vocabularies shared by catalog reports.

pub const ALL_VIDEO_METRICS: &[&str] = &[
    "views",
    "redViews",
    "comments",
    "likes",
    "dislikes",
    "videosAddedToPlaylists",
    "videosRemovedFromPlaylists",
    "shares",
    "estimatedMinutesWatched",
    "estimatedRedMinutesWatched",
    "averageViewDuration",
    "averageViewPercentage",
    "annotationClickThroughRate",
    "annotationCloseRate",
    "annotationImpressions",
    "annotationClickableImpressions",
    "annotationClosableImpressions",
    "annotationClicks",
    "annotationCloses",
    "cardClickRate",
    "cardTeaserClickRate",
    "cardImpressions",
    "cardTeaserImpressions",
    "cardClicks",
    "cardTeaserClicks",
    "subscribersGained",
    "subscribersLost",
    "estimatedRevenue",
    "estimatedAdRevenue",
    "grossRevenue",
    "estimatedRedPartnerRevenue",
    "monetizedPlaybacks",
    "playbackBasedCpm",
    "adImpressions",
    "cpm",
];

/// Metrics available when filtering or grouping by US state.
pub const ALL_PROVINCE_METRICS: &[&str] = &[
    "views",
    "redViews",
    "estimatedMinutesWatched",
    "estimatedRedMinutesWatched",
    "averageViewDuration",
    "averageViewPercentage",
    "annotationClickThroughRate",
    "annotationCloseRate",
    "annotationImpressions",
    "annotationClickableImpressions",
    "annotationClosableImpressions",
    "annotationClicks",
    "annotationCloses",
    "cardClickRate",
    "cardTeaserClickRate",
    "cardImpressions",
    "cardTeaserImpressions",
    "cardClicks",
    "cardTeaserClicks",
];

pub const SUBSCRIPTION_METRICS: &[&str] = &[
    "views",
    "redViews",
    "likes",
    "dislikes",
    "videosAddedToPlaylists",
    "videosRemovedFromPlaylists",
    "shares",
    "estimatedMinutesWatched",
    "estimatedRedMinutesWatched",
    "averageViewDuration",
    "averageViewPercentage",
    "annotationClickThroughRate",
    "annotationCloseRate",
    "annotationImpressions",
    "annotationClickableImpressions",
    "annotationClosableImpressions",
    "annotationClicks",
    "annotationCloses",
    "cardClickRate",
    "cardTeaserClickRate",
    "cardImpressions",
    "cardTeaserImpressions",
    "cardClicks",
    "cardTeaserClicks",
];

/// Subscription metrics without engagement counts, for US state breakdowns.
pub const LESSER_SUBSCRIPTION_METRICS: &[&str] = &[
    "views",
    "redViews",
    "estimatedMinutesWatched",
    "estimatedRedMinutesWatched",
    "averageViewDuration",
    "averageViewPercentage",
    "annotationClickThroughRate",
    "annotationCloseRate",
    "annotationImpressions",
    "annotationClickableImpressions",
    "annotationClosableImpressions",
    "annotationClicks",
    "annotationCloses",
    "cardClickRate",
    "cardTeaserClickRate",
    "cardImpressions",
    "cardTeaserImpressions",
    "cardClicks",
    "cardTeaserClicks",
];

pub const LIVE_PLAYBACK_DETAIL_METRICS: &[&str] = &[
    "views",
    "redViews",
    "estimatedMinutesWatched",
    "estimatedRedMinutesWatched",
    "averageViewDuration",
];

pub const VIEW_PERCENTAGE_PLAYBACK_DETAIL_METRICS: &[&str] = &[
    "views",
    "redViews",
    "estimatedMinutesWatched",
    "estimatedRedMinutesWatched",
    "averageViewDuration",
    "averageViewPercentage",
];

pub const LOCATION_AND_TRAFFIC_METRICS: &[&str] = &[
    "views",
    "redViews",
    "estimatedMinutesWatched",
    "estimatedRedMinutesWatched",
    "averageViewDuration",
    "averageViewPercentage",
];

pub const LOCATION_AND_TRAFFIC_SORT_OPTIONS: &[&str] = &["views", "estimatedMinutesWatched"];

pub const TOP_VIDEOS_SORT_OPTIONS: &[&str] = &[
    "views",
    "redViews",
    "estimatedMinutesWatched",
    "estimatedRedMinutesWatched",
    "subscribersGained",
    "subscribersLost",
];

/// Top-videos sort keys plus revenue, for the regional ranking.
pub const TOP_VIDEOS_EXTRA_SORT_OPTIONS: &[&str] = &[
    "views",
    "redViews",
    "estimatedMinutesWatched",
    "estimatedRedMinutesWatched",
    "subscribersGained",
    "subscribersLost",
    "estimatedRevenue",
    "estimatedAdRevenue",
    "estimatedRedPartnerRevenue",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn subset(small: &[&str], large: &[&str]) -> bool {
        let large: BTreeSet<_> = large.iter().collect();
        small.iter().all(|m| large.contains(m))
    }

    #[test]
    fn test_vocabularies_have_no_duplicates() {
        for list in [
            ALL_VIDEO_METRICS,
            ALL_PROVINCE_METRICS,
            SUBSCRIPTION_METRICS,
            LESSER_SUBSCRIPTION_METRICS,
            LIVE_PLAYBACK_DETAIL_METRICS,
            VIEW_PERCENTAGE_PLAYBACK_DETAIL_METRICS,
            LOCATION_AND_TRAFFIC_METRICS,
            LOCATION_AND_TRAFFIC_SORT_OPTIONS,
            TOP_VIDEOS_SORT_OPTIONS,
            TOP_VIDEOS_EXTRA_SORT_OPTIONS,
        ] {
            let unique: BTreeSet<_> = list.iter().collect();
            assert_eq!(unique.len(), list.len());
        }
    }

    #[test]
    fn test_narrower_vocabularies_nest() {
        assert!(subset(ALL_PROVINCE_METRICS, ALL_VIDEO_METRICS));
        assert!(subset(SUBSCRIPTION_METRICS, ALL_VIDEO_METRICS));
        assert!(subset(LESSER_SUBSCRIPTION_METRICS, SUBSCRIPTION_METRICS));
        assert!(subset(LIVE_PLAYBACK_DETAIL_METRICS, VIEW_PERCENTAGE_PLAYBACK_DETAIL_METRICS));
        assert!(subset(LOCATION_AND_TRAFFIC_SORT_OPTIONS, LOCATION_AND_TRAFFIC_METRICS));
        assert!(subset(TOP_VIDEOS_SORT_OPTIONS, TOP_VIDEOS_EXTRA_SORT_OPTIONS));
    }
}
