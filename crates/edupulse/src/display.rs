use serde::Serialize;

/// Visual weight a presentation layer should give a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeVariant {
    Default,
    Secondary,
    Destructive,
    Outline,
}

impl BadgeVariant {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Secondary => "secondary",
            Self::Destructive => "destructive",
            Self::Outline => "outline",
        }
    }
}

/// Icon hint attached to factors, trends and notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    TrendingUp,
    TrendingDown,
    AlertTriangle,
    Clock,
    Bell,
}

impl Indicator {
    pub const fn label(self) -> &'static str {
        match self {
            Self::TrendingUp => "trending_up",
            Self::TrendingDown => "trending_down",
            Self::AlertTriangle => "alert_triangle",
            Self::Clock => "clock",
            Self::Bell => "bell",
        }
    }
}
