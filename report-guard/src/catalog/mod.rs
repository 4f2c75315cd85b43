//! The fixed catalog of report types.
//!
//! The catalog is built once, on first use, into a process-wide registry and
//! is never mutated afterwards, so lookups need no locking.
//!
//! ```rust
//! use report_guard::catalog::{ReportCatalog, ReportId};
//!
//! let catalog = ReportCatalog::global();
//! assert_eq!(catalog.len(), ReportId::ALL.len());
//!
//! let report = catalog.get(ReportId::AudienceRetention);
//! assert_eq!(report.name(), "Audience retention");
//! assert!(report.supplementary().is_some());
//! ```

pub mod metrics;
mod reports;

use crate::core::ReportType;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one catalog report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportId {
    BasicUserActivity,
    BasicUserActivityUS,
    TimeBasedActivity,
    TimeBasedActivityUS,
    GeographyBasedActivity,
    GeographyBasedActivityUS,
    PlaybackDetailsSubscribedStatus,
    PlaybackDetailsSubscribedStatusUS,
    PlaybackDetailsLiveTimeBased,
    PlaybackDetailsViewPercentageTimeBased,
    PlaybackDetailsLiveGeographyBased,
    PlaybackDetailsViewPercentageGeographyBased,
    PlaybackDetailsLiveGeographyBasedUS,
    PlaybackDetailsViewPercentageGeographyBasedUS,
    PlaybackLocation,
    PlaybackLocationDetail,
    TrafficSource,
    TrafficSourceDetail,
    DeviceType,
    OperatingSystem,
    DeviceTypeAndOperatingSystem,
    ViewerDemographics,
    EngagementAndContentSharing,
    AudienceRetention,
    TopVideosRegional,
    TopVideosUS,
    TopVideosSubscribed,
    TopVideosYouTubeProduct,
    TopVideosPlaybackDetail,
}

impl ReportId {
    /// Every report, in catalog order.
    pub const ALL: [ReportId; 29] = [
        ReportId::BasicUserActivity,
        ReportId::BasicUserActivityUS,
        ReportId::TimeBasedActivity,
        ReportId::TimeBasedActivityUS,
        ReportId::GeographyBasedActivity,
        ReportId::GeographyBasedActivityUS,
        ReportId::PlaybackDetailsSubscribedStatus,
        ReportId::PlaybackDetailsSubscribedStatusUS,
        ReportId::PlaybackDetailsLiveTimeBased,
        ReportId::PlaybackDetailsViewPercentageTimeBased,
        ReportId::PlaybackDetailsLiveGeographyBased,
        ReportId::PlaybackDetailsViewPercentageGeographyBased,
        ReportId::PlaybackDetailsLiveGeographyBasedUS,
        ReportId::PlaybackDetailsViewPercentageGeographyBasedUS,
        ReportId::PlaybackLocation,
        ReportId::PlaybackLocationDetail,
        ReportId::TrafficSource,
        ReportId::TrafficSourceDetail,
        ReportId::DeviceType,
        ReportId::OperatingSystem,
        ReportId::DeviceTypeAndOperatingSystem,
        ReportId::ViewerDemographics,
        ReportId::EngagementAndContentSharing,
        ReportId::AudienceRetention,
        ReportId::TopVideosRegional,
        ReportId::TopVideosUS,
        ReportId::TopVideosSubscribed,
        ReportId::TopVideosYouTubeProduct,
        ReportId::TopVideosPlaybackDetail,
    ];

    /// Position of this report in the catalog.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

static GLOBAL: Lazy<ReportCatalog> = Lazy::new(ReportCatalog::build);

/// An immutable, ordered registry of every report type.
#[derive(Debug)]
pub struct ReportCatalog {
    reports: Vec<ReportType>,
}

impl ReportCatalog {
    /// Returns the process-wide catalog, building it on first access.
    pub fn global() -> &'static ReportCatalog {
        &GLOBAL
    }

    fn build() -> Self {
        let reports: Vec<ReportType> = ReportId::ALL.iter().map(|id| reports::define(*id)).collect();
        tracing::debug!(reports = reports.len(), "report catalog built");
        Self { reports }
    }

    /// Returns the report for `id`.
    pub fn get(&self, id: ReportId) -> &ReportType {
        &self.reports[id.index()]
    }

    /// Finds a report by its display name.
    pub fn find(&self, name: &str) -> Option<&ReportType> {
        self.reports.iter().find(|r| r.name() == name)
    }

    /// Iterates reports in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &ReportType> {
        self.reports.iter()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

impl<'a> IntoIterator for &'a ReportCatalog {
    type Item = &'a ReportType;
    type IntoIter = std::slice::Iter<'a, ReportType>;

    fn into_iter(self) -> Self::IntoIter {
        self.reports.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ReportKind;
    use std::collections::BTreeSet;

    #[test]
    fn test_catalog_is_indexed_by_id() {
        let catalog = ReportCatalog::global();
        assert_eq!(catalog.len(), 29);
        for id in ReportId::ALL {
            assert_eq!(catalog.get(id).id(), id);
        }
    }

    #[test]
    fn test_names_are_unique_and_findable() {
        let catalog = ReportCatalog::global();
        let names: BTreeSet<_> = catalog.iter().map(|r| r.name()).collect();
        assert_eq!(names.len(), catalog.len());
        assert_eq!(
            catalog.find("Top videos by state").map(|r| r.id()),
            Some(ReportId::TopVideosUS)
        );
        assert!(catalog.find("Top playlists").is_none());
    }

    #[test]
    fn test_every_group_declares_each_field_once() {
        for report in ReportCatalog::global() {
            assert!(report.dimensions().has_unique_fields(), "{report}");
            assert!(report.filters().has_unique_fields(), "{report}");
        }
    }

    #[test]
    fn test_detailed_reports_are_bounded() {
        for report in ReportCatalog::global() {
            match report.kind() {
                ReportKind::Detailed => {
                    assert!(report.max_results() > 0, "{report}");
                    assert!(report.sort_options().is_descending_only(), "{report}");
                    assert!(report.sort_options().is_required(), "{report}");
                }
                ReportKind::Plain => assert_eq!(report.max_results(), 0, "{report}"),
            }
        }
    }

    #[test]
    fn test_only_audience_retention_has_supplementary_rule() {
        let with_rule: Vec<_> = ReportCatalog::global()
            .iter()
            .filter(|r| r.supplementary().is_some())
            .map(|r| r.id())
            .collect();
        assert_eq!(with_rule, vec![ReportId::AudienceRetention]);
    }

    #[test]
    fn test_sort_whitelists_default_to_metrics() {
        let catalog = ReportCatalog::global();
        let report = catalog.get(ReportId::GeographyBasedActivity);
        assert_eq!(report.sort_options().values(), report.metrics().values());
    }
}
