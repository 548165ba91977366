use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Review state of an applet, shown as a colored border until reviewed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ReviewStatus {
    #[default]
    Unreviewed,
    InReview,
    Reviewed,
}

impl ReviewStatus {
    /// Parse a free-text status.
    ///
    /// Matching is exact and case-sensitive: `in-review` is [`InReview`](Self::InReview),
    /// `reviewed` and `approved` are [`Reviewed`](Self::Reviewed), and anything
    /// else (including the empty string) is [`Unreviewed`](Self::Unreviewed).
    ///
    /// ```
    /// use appletdoc_applet::ReviewStatus;
    ///
    /// assert_eq!(ReviewStatus::parse("approved"), ReviewStatus::Reviewed);
    /// assert_eq!(ReviewStatus::parse("In-Review"), ReviewStatus::Unreviewed);
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match text {
            "in-review" => Self::InReview,
            "reviewed" | "approved" => Self::Reviewed,
            _ => Self::Unreviewed,
        }
    }

    /// Canonical status token.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unreviewed => "unreviewed",
            Self::InReview => "in-review",
            Self::Reviewed => "reviewed",
        }
    }

    /// CSS border value flagging this status, if any.
    #[must_use]
    pub fn border(self) -> Option<&'static str> {
        match self {
            Self::Unreviewed => Some("dotted red"),
            Self::InReview => Some("dotted yellow"),
            Self::Reviewed => None,
        }
    }
}

impl FromStr for ReviewStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
