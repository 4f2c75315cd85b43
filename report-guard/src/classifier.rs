//! Selects the catalog report a request is attempting to match.
//!
//! Classification is a flat, priority-ordered table of `(predicate, report)`
//! rules evaluated top to bottom. The first predicate that matches wins, so
//! earlier rules deliberately shadow later ones: a request with both
//! `sharingService` and `day` dimensions is classified as engagement, not
//! time-based activity.
//!
//! The final rule always matches, which makes classification total. A request
//! that lands on an unsuitable report is rejected afterwards by
//! [`ReportType::validate`](crate::core::ReportType::validate).
//!
//! ```rust
//! use report_guard::catalog::ReportId;
//! use report_guard::classifier;
//! use std::collections::BTreeSet;
//!
//! let dimensions = BTreeSet::from(["video"]);
//! let filters = BTreeSet::from(["province"]);
//! let metrics = BTreeSet::from(["views"]);
//!
//! let decision = classifier::decide(&dimensions, &filters, &metrics);
//! assert_eq!(decision.report, ReportId::TopVideosUS);
//! assert_eq!(decision.name, "top_videos_us");
//! ```

use crate::catalog::ReportId;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use tracing::trace;

/// The classification inputs: requested dimensions, filter keys and metrics.
#[derive(Debug, Clone, Copy)]
pub struct Signals<'a> {
    dimensions: &'a BTreeSet<&'a str>,
    filters: &'a BTreeSet<&'a str>,
    metrics: &'a BTreeSet<&'a str>,
}

impl<'a> Signals<'a> {
    pub fn new(
        dimensions: &'a BTreeSet<&'a str>,
        filters: &'a BTreeSet<&'a str>,
        metrics: &'a BTreeSet<&'a str>,
    ) -> Self {
        Self {
            dimensions,
            filters,
            metrics,
        }
    }

    pub fn dimension(&self, name: &str) -> bool {
        self.dimensions.contains(name)
    }

    pub fn filter(&self, name: &str) -> bool {
        self.filters.contains(name)
    }

    pub fn metric(&self, name: &str) -> bool {
        self.metrics.contains(name)
    }

    /// Present as either a dimension or a filter key.
    pub fn anywhere(&self, name: &str) -> bool {
        self.dimension(name) || self.filter(name)
    }

    fn live(&self) -> bool {
        self.anywhere("liveOrOnDemand")
    }

    fn subscription_or_product(&self) -> bool {
        self.anywhere("subscribedStatus") || self.anywhere("youtubeProduct")
    }
}

/// One entry of the classification table.
#[derive(Clone, Copy)]
pub struct Rule {
    name: &'static str,
    applies: fn(&Signals<'_>) -> bool,
    report: ReportId,
}

impl Rule {
    const fn new(name: &'static str, applies: fn(&Signals<'_>) -> bool, report: ReportId) -> Self {
        Self {
            name,
            applies,
            report,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn report(&self) -> ReportId {
        self.report
    }

    /// Returns true if this rule's predicate matches.
    pub fn applies(&self, signals: &Signals<'_>) -> bool {
        (self.applies)(signals)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("report", &self.report)
            .finish()
    }
}

/// The outcome of classification: the winning rule and its report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub name: &'static str,
    pub report: ReportId,
}

impl From<&Rule> for Decision {
    fn from(rule: &Rule) -> Self {
        Self {
            name: rule.name,
            report: rule.report,
        }
    }
}

static RULES: [Rule; 29] = [
    // Dimensions that only one report accepts.
    Rule::new(
        "engagement",
        |s| s.dimension("sharingService"),
        ReportId::EngagementAndContentSharing,
    ),
    Rule::new(
        "audience_retention",
        |s| s.dimension("elapsedVideoTimeRatio"),
        ReportId::AudienceRetention,
    ),
    Rule::new(
        "playback_location",
        |s| s.dimension("insightPlaybackLocationType"),
        ReportId::PlaybackLocation,
    ),
    Rule::new(
        "playback_location_detail",
        |s| s.dimension("insightPlaybackLocationDetail"),
        ReportId::PlaybackLocationDetail,
    ),
    Rule::new(
        "traffic_source",
        |s| s.dimension("insightTrafficSourceType"),
        ReportId::TrafficSource,
    ),
    Rule::new(
        "traffic_source_detail",
        |s| s.dimension("insightTrafficSourceDetail"),
        ReportId::TrafficSourceDetail,
    ),
    Rule::new(
        "demographics",
        |s| s.dimension("ageGroup") || s.dimension("gender"),
        ReportId::ViewerDemographics,
    ),
    Rule::new(
        "device_type_and_os",
        |s| s.dimension("deviceType") && s.dimension("operatingSystem"),
        ReportId::DeviceTypeAndOperatingSystem,
    ),
    Rule::new(
        "device_type",
        |s| s.dimension("deviceType"),
        ReportId::DeviceType,
    ),
    Rule::new(
        "operating_system",
        |s| s.dimension("operatingSystem"),
        ReportId::OperatingSystem,
    ),
    // Top videos.
    Rule::new(
        "top_videos_us",
        |s| s.dimension("video") && s.filter("province"),
        ReportId::TopVideosUS,
    ),
    Rule::new(
        "top_videos_regional",
        |s| s.dimension("video") && !s.filter("subscribedStatus"),
        ReportId::TopVideosRegional,
    ),
    Rule::new(
        "top_videos_subscribed",
        |s| s.dimension("video") && !s.filter("youtubeProduct"),
        ReportId::TopVideosSubscribed,
    ),
    Rule::new(
        "top_videos_youtube_product",
        |s| s.dimension("video") && s.metric("averageViewPercentage"),
        ReportId::TopVideosYouTubeProduct,
    ),
    Rule::new(
        "top_videos_playback_detail",
        |s| s.dimension("video"),
        ReportId::TopVideosPlaybackDetail,
    ),
    // Geography.
    Rule::new(
        "geography_live",
        |s| s.dimension("country") && s.live(),
        ReportId::PlaybackDetailsLiveGeographyBased,
    ),
    Rule::new(
        "geography_view_percentage",
        |s| s.dimension("country") && s.subscription_or_product(),
        ReportId::PlaybackDetailsViewPercentageGeographyBased,
    ),
    Rule::new(
        "geography",
        |s| s.dimension("country"),
        ReportId::GeographyBasedActivity,
    ),
    Rule::new(
        "geography_live_us",
        |s| s.dimension("province") && s.live(),
        ReportId::PlaybackDetailsLiveGeographyBasedUS,
    ),
    Rule::new(
        "geography_view_percentage_us",
        |s| s.dimension("province") && s.subscription_or_product(),
        ReportId::PlaybackDetailsViewPercentageGeographyBasedUS,
    ),
    Rule::new(
        "geography_us",
        |s| s.dimension("province"),
        ReportId::GeographyBasedActivityUS,
    ),
    // Playback details over time.
    Rule::new(
        "product_live",
        |s| s.anywhere("youtubeProduct") && s.live(),
        ReportId::PlaybackDetailsLiveTimeBased,
    ),
    Rule::new(
        "product_view_percentage",
        |s| s.anywhere("youtubeProduct"),
        ReportId::PlaybackDetailsViewPercentageTimeBased,
    ),
    Rule::new(
        "live",
        |s| s.live(),
        ReportId::PlaybackDetailsLiveTimeBased,
    ),
    Rule::new(
        "subscribed_status_us",
        |s| s.dimension("subscribedStatus") && s.filter("province"),
        ReportId::PlaybackDetailsSubscribedStatusUS,
    ),
    Rule::new(
        "subscribed_status",
        |s| s.dimension("subscribedStatus"),
        ReportId::PlaybackDetailsSubscribedStatus,
    ),
    // Time-based and basic activity.
    Rule::new(
        "time_based_us",
        |s| (s.dimension("day") || s.dimension("month")) && s.filter("province"),
        ReportId::TimeBasedActivityUS,
    ),
    Rule::new(
        "time_based",
        |s| s.dimension("day") || s.dimension("month"),
        ReportId::TimeBasedActivity,
    ),
    Rule::new(
        "basic_us",
        |s| s.filter("province"),
        ReportId::BasicUserActivityUS,
    ),
];

const FALLBACK: Decision = Decision {
    name: "basic",
    report: ReportId::BasicUserActivity,
};

/// Returns the classification table in priority order.
///
/// The implicit final rule, `basic`, matches everything the table does not.
pub fn rules() -> &'static [Rule] {
    &RULES
}

/// Classifies a request and names the rule that decided it.
pub fn decide(
    dimensions: &BTreeSet<&str>,
    filters: &BTreeSet<&str>,
    metrics: &BTreeSet<&str>,
) -> Decision {
    let signals = Signals::new(dimensions, filters, metrics);
    let decision = RULES
        .iter()
        .find(|rule| rule.applies(&signals))
        .map(Decision::from)
        .unwrap_or(FALLBACK);

    trace!(rule = decision.name, report = %decision.report, "classified request");
    decision
}

/// Classifies a request.
pub fn determine(
    dimensions: &BTreeSet<&str>,
    filters: &BTreeSet<&str>,
    metrics: &BTreeSet<&str>,
) -> ReportId {
    decide(dimensions, filters, metrics).report
}

/// Lists every rule whose predicate matches, in priority order.
///
/// The first entry, or the fallback when the list is empty, is what
/// [`decide`] picks. Later entries are the rules it shadows.
pub fn matching_rules(
    dimensions: &BTreeSet<&str>,
    filters: &BTreeSet<&str>,
    metrics: &BTreeSet<&str>,
) -> Vec<&'static Rule> {
    let signals = Signals::new(dimensions, filters, metrics);
    RULES.iter().filter(|rule| rule.applies(&signals)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(dimensions: &[&str], filters: &[&str], metrics: &[&str]) -> ReportId {
        determine(
            &dimensions.iter().copied().collect(),
            &filters.iter().copied().collect(),
            &metrics.iter().copied().collect(),
        )
    }

    #[test]
    fn test_empty_request_falls_back_to_basic() {
        assert_eq!(classify(&[], &[], &[]), ReportId::BasicUserActivity);
        assert_eq!(classify(&[], &["province"], &[]), ReportId::BasicUserActivityUS);

        let empty = BTreeSet::new();
        assert_eq!(decide(&empty, &empty, &empty), FALLBACK);
    }

    #[test]
    fn test_unique_dimensions_shadow_everything_else() {
        assert_eq!(
            classify(&["sharingService", "day", "country"], &["province"], &[]),
            ReportId::EngagementAndContentSharing
        );
        assert_eq!(
            classify(&["elapsedVideoTimeRatio", "video"], &[], &[]),
            ReportId::AudienceRetention
        );
        assert_eq!(
            classify(&["gender", "deviceType"], &[], &[]),
            ReportId::ViewerDemographics
        );
    }

    #[test]
    fn test_device_and_os() {
        assert_eq!(
            classify(&["deviceType", "operatingSystem"], &[], &[]),
            ReportId::DeviceTypeAndOperatingSystem
        );
        assert_eq!(classify(&["deviceType"], &[], &[]), ReportId::DeviceType);
        assert_eq!(
            classify(&["operatingSystem"], &[], &[]),
            ReportId::OperatingSystem
        );
    }

    #[test]
    fn test_top_videos_branch() {
        assert_eq!(classify(&["video"], &["province"], &[]), ReportId::TopVideosUS);
        assert_eq!(classify(&["video"], &[], &[]), ReportId::TopVideosRegional);
        assert_eq!(
            classify(&["video"], &["subscribedStatus"], &[]),
            ReportId::TopVideosSubscribed
        );
        assert_eq!(
            classify(
                &["video"],
                &["subscribedStatus", "youtubeProduct"],
                &["averageViewPercentage"]
            ),
            ReportId::TopVideosYouTubeProduct
        );
        assert_eq!(
            classify(&["video"], &["subscribedStatus", "youtubeProduct"], &["views"]),
            ReportId::TopVideosPlaybackDetail
        );
    }

    #[test]
    fn test_geography_branches() {
        assert_eq!(classify(&["country"], &[], &[]), ReportId::GeographyBasedActivity);
        assert_eq!(
            classify(&["country"], &["liveOrOnDemand", "youtubeProduct"], &[]),
            ReportId::PlaybackDetailsLiveGeographyBased
        );
        assert_eq!(
            classify(&["country", "subscribedStatus"], &[], &[]),
            ReportId::PlaybackDetailsViewPercentageGeographyBased
        );
        assert_eq!(classify(&["province"], &[], &[]), ReportId::GeographyBasedActivityUS);
        assert_eq!(
            classify(&["province", "liveOrOnDemand"], &[], &[]),
            ReportId::PlaybackDetailsLiveGeographyBasedUS
        );
        assert_eq!(
            classify(&["province"], &["youtubeProduct"], &[]),
            ReportId::PlaybackDetailsViewPercentageGeographyBasedUS
        );
    }

    #[test]
    fn test_time_based_branches() {
        assert_eq!(
            classify(&["day"], &["youtubeProduct"], &[]),
            ReportId::PlaybackDetailsViewPercentageTimeBased
        );
        assert_eq!(
            classify(&["youtubeProduct", "liveOrOnDemand"], &[], &[]),
            ReportId::PlaybackDetailsLiveTimeBased
        );
        assert_eq!(
            classify(&["month"], &["liveOrOnDemand"], &[]),
            ReportId::PlaybackDetailsLiveTimeBased
        );
        assert_eq!(
            classify(&["subscribedStatus"], &["province"], &[]),
            ReportId::PlaybackDetailsSubscribedStatusUS
        );
        assert_eq!(
            classify(&["subscribedStatus", "day"], &[], &[]),
            ReportId::PlaybackDetailsSubscribedStatus
        );
        assert_eq!(classify(&["day"], &["province"], &[]), ReportId::TimeBasedActivityUS);
        assert_eq!(classify(&["month"], &[], &[]), ReportId::TimeBasedActivity);
    }

    #[test]
    fn test_matching_rules_lists_shadowed_rules() {
        let dimensions = BTreeSet::from(["country", "day"]);
        let empty = BTreeSet::new();
        let names: Vec<_> = matching_rules(&dimensions, &empty, &empty)
            .iter()
            .map(|r| r.name())
            .collect();
        assert_eq!(names, vec!["geography", "time_based"]);
    }

    #[test]
    fn test_rule_names_are_unique() {
        let names: BTreeSet<_> = rules().iter().map(Rule::name).collect();
        assert_eq!(names.len(), rules().len());
        assert!(!names.contains(FALLBACK.name));
    }
}
