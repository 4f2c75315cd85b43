//! Report definitions, one per [`ReportId`].

use super::metrics::*;
use super::ReportId;
use crate::constraints::{FieldGroup, FieldSpec, Metrics, SortOptions};
use crate::core::{ReportRequest, ReportType, SupplementaryRule};
use crate::prelude::*;

const GEOGRAPHY: [&str; 3] = ["country", "continent", "subContinent"];
const GEOGRAPHY_WITH_PROVINCE: [&str; 4] = ["country", "province", "continent", "subContinent"];
const CONTENT: [&str; 2] = ["video", "group"];
const DAY_OR_MONTH: [&str; 2] = ["day", "month"];

const TOP_VIDEOS_LIMIT: u32 = 200;
const DETAIL_LIMIT: u32 = 25;

fn us_only() -> [FieldSpec; 1] {
    [FieldSpec::restricted("country", "US")]
}

/// Audience retention reads one video at a time.
fn single_video(request: &ReportRequest) -> Result<()> {
    match request.filters.get("video") {
        Some(value) if value.contains(',') => {
            Err(ReportError::unsupported_value("video", value.clone(), None))
        }
        _ => Ok(()),
    }
}

const SINGLE_VIDEO: SupplementaryRule = SupplementaryRule::new(
    "single_video",
    "the video filter names exactly one video",
    single_video,
);

pub(super) fn define(id: ReportId) -> ReportType {
    use ReportId::*;

    let builder = ReportType::builder(id, name(id));
    let builder = match id {
        BasicUserActivity => builder
            .filters(
                FieldGroup::filters()
                    .zero_or_one(GEOGRAPHY)
                    .zero_or_one(CONTENT)
                    .build(),
            )
            .metrics(Metrics::new(ALL_VIDEO_METRICS.iter().copied())),

        BasicUserActivityUS => builder
            .filters(
                FieldGroup::filters()
                    .required(["province"])
                    .zero_or_one(CONTENT)
                    .build(),
            )
            .metrics(Metrics::new(ALL_PROVINCE_METRICS.iter().copied())),

        TimeBasedActivity => builder
            .dimensions(FieldGroup::dimensions().exactly_one(DAY_OR_MONTH).build())
            .filters(
                FieldGroup::filters()
                    .zero_or_one(GEOGRAPHY)
                    .zero_or_one(CONTENT)
                    .build(),
            )
            .metrics(Metrics::new(ALL_VIDEO_METRICS.iter().copied())),

        TimeBasedActivityUS => builder
            .dimensions(FieldGroup::dimensions().exactly_one(DAY_OR_MONTH).build())
            .filters(
                FieldGroup::filters()
                    .zero_or_one(["province"])
                    .zero_or_one(CONTENT)
                    .build(),
            )
            .metrics(Metrics::new(ALL_PROVINCE_METRICS.iter().copied())),

        GeographyBasedActivity => builder
            .dimensions(FieldGroup::dimensions().required(["country"]).build())
            .filters(
                FieldGroup::filters()
                    .zero_or_one(["continent", "subContinent"])
                    .zero_or_one(CONTENT)
                    .build(),
            )
            .metrics(Metrics::new(ALL_VIDEO_METRICS.iter().copied())),

        GeographyBasedActivityUS => builder
            .dimensions(FieldGroup::dimensions().required(["province"]).build())
            .filters(
                FieldGroup::filters()
                    .zero_or_one(us_only())
                    .zero_or_one(CONTENT)
                    .build(),
            )
            .metrics(Metrics::new(ALL_PROVINCE_METRICS.iter().copied())),

        PlaybackDetailsSubscribedStatus => builder
            .dimensions(
                FieldGroup::dimensions()
                    .optional(["subscribedStatus"])
                    .zero_or_one(DAY_OR_MONTH)
                    .build(),
            )
            .filters(
                FieldGroup::filters()
                    .zero_or_one(GEOGRAPHY)
                    .zero_or_one(CONTENT)
                    .optional(["subscribedStatus"])
                    .build(),
            )
            .metrics(Metrics::new(SUBSCRIPTION_METRICS.iter().copied())),

        PlaybackDetailsSubscribedStatusUS => builder
            .dimensions(
                FieldGroup::dimensions()
                    .optional(["subscribedStatus"])
                    .zero_or_one(DAY_OR_MONTH)
                    .build(),
            )
            .filters(
                FieldGroup::filters()
                    .zero_or_one(CONTENT)
                    .zero_or_more(["province", "subscribedStatus"])
                    .build(),
            )
            .metrics(Metrics::new(LESSER_SUBSCRIPTION_METRICS.iter().copied())),

        PlaybackDetailsLiveTimeBased => builder
            .dimensions(
                FieldGroup::dimensions()
                    .zero_or_more(["liveOrOnDemand", "subscribedStatus", "youtubeProduct"])
                    .zero_or_one(DAY_OR_MONTH)
                    .build(),
            )
            .filters(
                FieldGroup::filters()
                    .zero_or_one(GEOGRAPHY_WITH_PROVINCE)
                    .zero_or_one(CONTENT)
                    .zero_or_more(["liveOrOnDemand", "subscribedStatus", "youtubeProduct"])
                    .build(),
            )
            .metrics(Metrics::new(LIVE_PLAYBACK_DETAIL_METRICS.iter().copied())),

        PlaybackDetailsViewPercentageTimeBased => builder
            .dimensions(
                FieldGroup::dimensions()
                    .zero_or_more(["subscribedStatus", "youtubeProduct"])
                    .zero_or_one(DAY_OR_MONTH)
                    .build(),
            )
            .filters(
                FieldGroup::filters()
                    .zero_or_one(GEOGRAPHY_WITH_PROVINCE)
                    .zero_or_one(CONTENT)
                    .zero_or_more(["subscribedStatus", "youtubeProduct"])
                    .build(),
            )
            .metrics(Metrics::new(
                VIEW_PERCENTAGE_PLAYBACK_DETAIL_METRICS.iter().copied(),
            )),

        PlaybackDetailsLiveGeographyBased => builder
            .dimensions(
                FieldGroup::dimensions()
                    .required(["country"])
                    .zero_or_more(["liveOrOnDemand", "subscribedStatus", "youtubeProduct"])
                    .build(),
            )
            .filters(
                FieldGroup::filters()
                    .zero_or_one(["continent", "subContinent"])
                    .zero_or_one(CONTENT)
                    .zero_or_more(["liveOrOnDemand", "subscribedStatus", "youtubeProduct"])
                    .build(),
            )
            .metrics(Metrics::new(LIVE_PLAYBACK_DETAIL_METRICS.iter().copied())),

        PlaybackDetailsViewPercentageGeographyBased => builder
            .dimensions(
                FieldGroup::dimensions()
                    .required(["country"])
                    .zero_or_more(["subscribedStatus", "youtubeProduct"])
                    .build(),
            )
            .filters(
                FieldGroup::filters()
                    .zero_or_one(["continent", "subContinent"])
                    .zero_or_one(CONTENT)
                    .zero_or_more(["subscribedStatus", "youtubeProduct"])
                    .build(),
            )
            .metrics(Metrics::new(
                VIEW_PERCENTAGE_PLAYBACK_DETAIL_METRICS.iter().copied(),
            )),

        PlaybackDetailsLiveGeographyBasedUS => builder
            .dimensions(
                FieldGroup::dimensions()
                    .required(["province"])
                    .zero_or_more(["liveOrOnDemand", "subscribedStatus", "youtubeProduct"])
                    .build(),
            )
            .filters(
                FieldGroup::filters()
                    .zero_or_one(us_only())
                    .zero_or_one(CONTENT)
                    .zero_or_more(["liveOrOnDemand", "subscribedStatus", "youtubeProduct"])
                    .build(),
            )
            .metrics(Metrics::new(LIVE_PLAYBACK_DETAIL_METRICS.iter().copied())),

        PlaybackDetailsViewPercentageGeographyBasedUS => builder
            .dimensions(
                FieldGroup::dimensions()
                    .required(["province"])
                    .zero_or_more(["subscribedStatus", "youtubeProduct"])
                    .build(),
            )
            .filters(
                FieldGroup::filters()
                    .zero_or_one(us_only())
                    .zero_or_one(CONTENT)
                    .zero_or_more(["subscribedStatus", "youtubeProduct"])
                    .build(),
            )
            .metrics(Metrics::new(
                VIEW_PERCENTAGE_PLAYBACK_DETAIL_METRICS.iter().copied(),
            )),

        PlaybackLocation => builder
            .dimensions(
                FieldGroup::dimensions()
                    .required(["insightPlaybackLocationType"])
                    .zero_or_more(["day", "liveOrOnDemand", "subscribedStatus"])
                    .build(),
            )
            .filters(
                FieldGroup::filters()
                    .zero_or_one(GEOGRAPHY_WITH_PROVINCE)
                    .zero_or_one(CONTENT)
                    .zero_or_more(["liveOrOnDemand", "subscribedStatus"])
                    .build(),
            )
            .metrics(Metrics::new(LOCATION_AND_TRAFFIC_METRICS.iter().copied())),

        PlaybackLocationDetail => builder
            .dimensions(
                FieldGroup::dimensions()
                    .required(["insightPlaybackLocationDetail"])
                    .build(),
            )
            .filters(
                FieldGroup::filters()
                    .required([FieldSpec::restricted(
                        "insightPlaybackLocationType",
                        "EMBEDDED",
                    )])
                    .zero_or_one(GEOGRAPHY_WITH_PROVINCE)
                    .zero_or_one(CONTENT)
                    .zero_or_more(["liveOrOnDemand", "subscribedStatus"])
                    .build(),
            )
            .metrics(Metrics::new(LOCATION_AND_TRAFFIC_METRICS.iter().copied()))
            .sort_options(
                SortOptions::new(LOCATION_AND_TRAFFIC_SORT_OPTIONS.iter().copied())
                    .descending_only(),
            )
            .detailed(DETAIL_LIMIT),

        TrafficSource => builder
            .dimensions(
                FieldGroup::dimensions()
                    .required(["insightTrafficSourceType"])
                    .zero_or_more(["day", "liveOrOnDemand", "subscribedStatus"])
                    .build(),
            )
            .filters(
                FieldGroup::filters()
                    .zero_or_one(GEOGRAPHY_WITH_PROVINCE)
                    .zero_or_one(CONTENT)
                    .zero_or_more(["liveOrOnDemand", "subscribedStatus"])
                    .build(),
            )
            .metrics(Metrics::new(LOCATION_AND_TRAFFIC_METRICS.iter().copied())),

        TrafficSourceDetail => builder
            .dimensions(
                FieldGroup::dimensions()
                    .required(["insightTrafficSourceDetail"])
                    .build(),
            )
            .filters(
                FieldGroup::filters()
                    .required(["insightTrafficSourceType"])
                    .zero_or_one(GEOGRAPHY_WITH_PROVINCE)
                    .zero_or_one(CONTENT)
                    .zero_or_more(["liveOrOnDemand", "subscribedStatus"])
                    .build(),
            )
            .metrics(Metrics::new(LOCATION_AND_TRAFFIC_METRICS.iter().copied()))
            .sort_options(
                SortOptions::new(LOCATION_AND_TRAFFIC_SORT_OPTIONS.iter().copied())
                    .descending_only(),
            )
            .detailed(DETAIL_LIMIT),

        DeviceType => builder
            .dimensions(
                FieldGroup::dimensions()
                    .required(["deviceType"])
                    .zero_or_more(["day", "liveOrOnDemand", "subscribedStatus", "youtubeProduct"])
                    .build(),
            )
            .filters(
                FieldGroup::filters()
                    .zero_or_one(GEOGRAPHY_WITH_PROVINCE)
                    .zero_or_one(CONTENT)
                    .zero_or_more([
                        "operatingSystem",
                        "liveOrOnDemand",
                        "subscribedStatus",
                        "youtubeProduct",
                    ])
                    .build(),
            )
            .metrics(Metrics::new(LOCATION_AND_TRAFFIC_METRICS.iter().copied())),

        OperatingSystem => builder
            .dimensions(
                FieldGroup::dimensions()
                    .required(["operatingSystem"])
                    .zero_or_more(["day", "liveOrOnDemand", "subscribedStatus", "youtubeProduct"])
                    .build(),
            )
            .filters(
                FieldGroup::filters()
                    .zero_or_one(GEOGRAPHY_WITH_PROVINCE)
                    .zero_or_one(CONTENT)
                    .zero_or_more([
                        "deviceType",
                        "liveOrOnDemand",
                        "subscribedStatus",
                        "youtubeProduct",
                    ])
                    .build(),
            )
            .metrics(Metrics::new(LOCATION_AND_TRAFFIC_METRICS.iter().copied())),

        DeviceTypeAndOperatingSystem => builder
            .dimensions(
                FieldGroup::dimensions()
                    .required(["deviceType", "operatingSystem"])
                    .zero_or_more(["day", "liveOrOnDemand", "subscribedStatus", "youtubeProduct"])
                    .build(),
            )
            .filters(
                FieldGroup::filters()
                    .zero_or_one(GEOGRAPHY_WITH_PROVINCE)
                    .zero_or_one(CONTENT)
                    .zero_or_more(["liveOrOnDemand", "subscribedStatus", "youtubeProduct"])
                    .build(),
            )
            .metrics(Metrics::new(LOCATION_AND_TRAFFIC_METRICS.iter().copied())),

        ViewerDemographics => builder
            .dimensions(
                FieldGroup::dimensions()
                    .one_or_more(["ageGroup", "gender"])
                    .zero_or_more(["liveOrOnDemand", "subscribedStatus"])
                    .build(),
            )
            .filters(
                FieldGroup::filters()
                    .zero_or_one(GEOGRAPHY_WITH_PROVINCE)
                    .zero_or_one(CONTENT)
                    .zero_or_more([
                        "deviceType",
                        "liveOrOnDemand",
                        "subscribedStatus",
                        "youtubeProduct",
                    ])
                    .build(),
            )
            .metrics(Metrics::new(["viewerPercentage"])),

        EngagementAndContentSharing => builder
            .dimensions(
                FieldGroup::dimensions()
                    .required(["sharingService"])
                    .optional(["subscribedStatus"])
                    .build(),
            )
            .filters(
                FieldGroup::filters()
                    .zero_or_one(GEOGRAPHY)
                    .zero_or_one(CONTENT)
                    .optional(["subscribedStatus"])
                    .build(),
            )
            .metrics(Metrics::new(["viewerPercentage"])),

        AudienceRetention => builder
            .dimensions(
                FieldGroup::dimensions()
                    .required(["elapsedVideoTimeRatio"])
                    .build(),
            )
            .filters(
                FieldGroup::filters()
                    .required(["video"])
                    .zero_or_more(["audienceType", "subscribedStatus", "youtubeProduct"])
                    .build(),
            )
            .metrics(Metrics::new(["audienceWatchRatio", "relativeRetentionPerformance"]))
            .supplementary(SINGLE_VIDEO),

        TopVideosRegional => builder
            .dimensions(FieldGroup::dimensions().required(["video"]).build())
            .filters(FieldGroup::filters().zero_or_one(GEOGRAPHY).build())
            .metrics(Metrics::new(ALL_VIDEO_METRICS.iter().copied()))
            .sort_options(
                SortOptions::new(TOP_VIDEOS_EXTRA_SORT_OPTIONS.iter().copied()).descending_only(),
            )
            .detailed(TOP_VIDEOS_LIMIT),

        TopVideosUS => builder
            .dimensions(FieldGroup::dimensions().required(["video"]).build())
            .filters(
                FieldGroup::filters()
                    .required(["province"])
                    .optional(["subscribedStatus"])
                    .build(),
            )
            .metrics(Metrics::new(ALL_PROVINCE_METRICS.iter().copied()))
            .sort_options(
                SortOptions::new(TOP_VIDEOS_SORT_OPTIONS.iter().copied()).descending_only(),
            )
            .detailed(TOP_VIDEOS_LIMIT),

        TopVideosSubscribed => builder
            .dimensions(FieldGroup::dimensions().required(["video"]).build())
            .filters(
                FieldGroup::filters()
                    .optional(["subscribedStatus"])
                    .zero_or_one(GEOGRAPHY)
                    .build(),
            )
            .metrics(Metrics::new(SUBSCRIPTION_METRICS.iter().copied()))
            .sort_options(
                SortOptions::new(TOP_VIDEOS_SORT_OPTIONS.iter().copied()).descending_only(),
            )
            .detailed(TOP_VIDEOS_LIMIT),

        TopVideosYouTubeProduct => builder
            .dimensions(FieldGroup::dimensions().required(["video"]).build())
            .filters(
                FieldGroup::filters()
                    .zero_or_one(GEOGRAPHY_WITH_PROVINCE)
                    .zero_or_more(["subscribedStatus", "youtubeProduct"])
                    .build(),
            )
            .metrics(Metrics::new(
                VIEW_PERCENTAGE_PLAYBACK_DETAIL_METRICS.iter().copied(),
            ))
            .sort_options(
                SortOptions::new(TOP_VIDEOS_SORT_OPTIONS.iter().copied()).descending_only(),
            )
            .detailed(TOP_VIDEOS_LIMIT),

        TopVideosPlaybackDetail => builder
            .dimensions(FieldGroup::dimensions().required(["video"]).build())
            .filters(
                FieldGroup::filters()
                    .zero_or_one(GEOGRAPHY_WITH_PROVINCE)
                    .zero_or_more(["liveOrOnDemand", "subscribedStatus", "youtubeProduct"])
                    .build(),
            )
            .metrics(Metrics::new(
                VIEW_PERCENTAGE_PLAYBACK_DETAIL_METRICS.iter().copied(),
            ))
            .sort_options(
                SortOptions::new(TOP_VIDEOS_SORT_OPTIONS.iter().copied()).descending_only(),
            )
            .detailed(TOP_VIDEOS_LIMIT),
    };
    builder.build()
}

fn name(id: ReportId) -> &'static str {
    use ReportId::*;

    match id {
        BasicUserActivity => "Basic user activity",
        BasicUserActivityUS => "Basic user activity (US)",
        TimeBasedActivity => "Time-based activity",
        TimeBasedActivityUS => "Time-based activity (US)",
        GeographyBasedActivity => "Geography-based activity",
        GeographyBasedActivityUS => "Geography-based activity (US)",
        PlaybackDetailsSubscribedStatus => "User activity by subscribed status",
        PlaybackDetailsSubscribedStatusUS => "User activity by subscribed status (US)",
        PlaybackDetailsLiveTimeBased => "Time-based playback details (live)",
        PlaybackDetailsViewPercentageTimeBased => "Time-based playback details (view percentage)",
        PlaybackDetailsLiveGeographyBased => "Geography-based playback details (live)",
        PlaybackDetailsViewPercentageGeographyBased => {
            "Geography-based playback details (view percentage)"
        }
        PlaybackDetailsLiveGeographyBasedUS => "Geography-based playback details (live, US)",
        PlaybackDetailsViewPercentageGeographyBasedUS => {
            "Geography-based playback details (view percentage, US)"
        }
        PlaybackLocation => "Playback locations",
        PlaybackLocationDetail => "Playback locations (detailed)",
        TrafficSource => "Traffic sources",
        TrafficSourceDetail => "Traffic sources (detailed)",
        DeviceType => "Device types",
        OperatingSystem => "Operating systems",
        DeviceTypeAndOperatingSystem => "Device types and operating systems",
        ViewerDemographics => "Viewer demographics",
        EngagementAndContentSharing => "Engagement and content sharing",
        AudienceRetention => "Audience retention",
        TopVideosRegional => "Top videos by region",
        TopVideosUS => "Top videos by state",
        TopVideosSubscribed => "Top videos by subscription status",
        TopVideosYouTubeProduct => "Top videos by YouTube product",
        TopVideosPlaybackDetail => "Top videos by playback detail",
    }
}
