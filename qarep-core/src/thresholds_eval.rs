use std::fmt;

use qarep_metrics::LoadMetrics;
use strum::IntoEnumIterator as _;

use crate::thresholds::{LimitKind, ThresholdSet};

/// A supported threshold key. Variants are evaluated in declaration order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
    strum::IntoStaticStr,
)]
pub enum ThresholdCheck {
    #[strum(serialize = "max.avg.response.time.ms")]
    MaxAvgResponseTime,

    #[strum(serialize = "max.error.percentage")]
    MaxErrorPercentage,

    #[strum(serialize = "max.p95.response.time.ms")]
    MaxP95ResponseTime,

    #[strum(serialize = "max.p99.response.time.ms")]
    MaxP99ResponseTime,

    #[strum(serialize = "min.success.percentage")]
    MinSuccessPercentage,
}

impl ThresholdCheck {
    pub fn key(self) -> &'static str {
        self.into()
    }

    pub fn kind(self) -> LimitKind {
        match self {
            Self::MinSuccessPercentage => LimitKind::Min,
            _ => LimitKind::Max,
        }
    }

    pub fn observed(self, m: &LoadMetrics) -> f64 {
        match self {
            Self::MaxAvgResponseTime => m.avg_response_time,
            Self::MaxErrorPercentage => m.error_percentage,
            Self::MaxP95ResponseTime => m.p95_response_time,
            Self::MaxP99ResponseTime => m.p99_response_time,
            Self::MinSuccessPercentage => m.success_percentage(),
        }
    }

    fn subject(self) -> &'static str {
        match self {
            Self::MaxAvgResponseTime => "average response time",
            Self::MaxErrorPercentage => "error percentage",
            Self::MaxP95ResponseTime => "p95 response time",
            Self::MaxP99ResponseTime => "p99 response time",
            Self::MinSuccessPercentage => "success percentage",
        }
    }

    fn unit(self) -> &'static str {
        match self {
            Self::MaxErrorPercentage | Self::MinSuccessPercentage => "%",
            _ => "ms",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdWarning {
    pub check: ThresholdCheck,
    pub observed: f64,
    pub limit: f64,
}

impl fmt::Display for ThresholdWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let subject = self.check.subject();
        let unit = self.check.unit();
        let verb = match self.check.kind() {
            LimitKind::Max => "exceeds",
            LimitKind::Min => "is below",
        };
        write!(
            f,
            "{subject} ({:.2}{unit}) {verb} the threshold ({}{unit})",
            self.observed, self.limit
        )
    }
}

/// Evaluates every configured check against `metrics`. Checks without a
/// configured limit are skipped.
pub fn validate_thresholds(metrics: &LoadMetrics, thresholds: &ThresholdSet) -> Vec<ThresholdWarning> {
    ThresholdCheck::iter()
        .filter_map(|check| {
            let limit = thresholds.get(check.key())?;
            let observed = check.observed(metrics);
            check.kind().violated(observed, limit).then_some(ThresholdWarning {
                check,
                observed,
                limit,
            })
        })
        .collect()
}
