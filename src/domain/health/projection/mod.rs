//! Projection types: symbolic windows mapped to a query range and bucket interval.

use crate::domain::health::error::MetricError;
use crate::domain::health::model::Period;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionType {
    FiveMinutes,
    ThirtyMinutes,
    OneHour,
    ThreeHours,
    EightHours,
    TwelveHours,
    OneDay,
    ThreeDays,
    OneWeek,
}

impl ProjectionType {
    pub const ALL: [ProjectionType; 9] = [
        Self::FiveMinutes,
        Self::ThirtyMinutes,
        Self::OneHour,
        Self::ThreeHours,
        Self::EightHours,
        Self::TwelveHours,
        Self::OneDay,
        Self::ThreeDays,
        Self::OneWeek,
    ];

    pub fn from_code<S: AsRef<str>>(code: S) -> Option<Self> {
        match code.as_ref().to_uppercase().as_str() {
            "5M" | "FIVE_MINUTES" => Some(Self::FiveMinutes),
            "30M" | "THIRTY_MINUTES" => Some(Self::ThirtyMinutes),
            "1H" | "ONE_HOUR" => Some(Self::OneHour),
            "3H" | "THREE_HOURS" => Some(Self::ThreeHours),
            "8H" | "EIGHT_HOURS" => Some(Self::EightHours),
            "12H" | "TWELVE_HOURS" => Some(Self::TwelveHours),
            "1D" | "ONE_DAY" => Some(Self::OneDay),
            "3D" | "THREE_DAYS" => Some(Self::ThreeDays),
            "7D" | "ONE_WEEK" => Some(Self::OneWeek),
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Self::FiveMinutes => "5m",
            Self::ThirtyMinutes => "30m",
            Self::OneHour => "1h",
            Self::ThreeHours => "3h",
            Self::EightHours => "8h",
            Self::TwelveHours => "12h",
            Self::OneDay => "1d",
            Self::ThreeDays => "3d",
            Self::OneWeek => "7d",
        }
    }

    /// (range, interval) pair for this projection.
    pub fn periods(&self) -> (Period, Period) {
        let (range, interval) = match self {
            Self::FiveMinutes => ((5, "m"), (15, "s")),
            Self::ThirtyMinutes => ((30, "m"), (1, "m")),
            Self::OneHour => ((1, "h"), (1, "m")),
            Self::ThreeHours => ((3, "h"), (5, "m")),
            Self::EightHours => ((8, "h"), (10, "m")),
            Self::TwelveHours => ((12, "h"), (15, "m")),
            Self::OneDay => ((1, "d"), (30, "m")),
            Self::ThreeDays => ((3, "d"), (1, "h")),
            Self::OneWeek => ((7, "d"), (3, "h")),
        };

        (Period::new(range.0, range.1), Period::new(interval.0, interval.1))
    }
}

/// Resolve a projection type code into its (range, interval) pair.
pub fn resolve_period(projection_type: &str) -> Result<(Period, Period), MetricError> {
    ProjectionType::from_code(projection_type)
        .map(|p| p.periods())
        .ok_or_else(|| MetricError::UnknownProjection(projection_type.to_string()))
}
