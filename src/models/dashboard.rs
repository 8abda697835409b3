// meridian-service/src/models/dashboard.rs
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OnlineStatus {
    Online,
    Offline,
}

impl OnlineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimelineView {
    #[default]
    Hierarchy,
    Timezone,
}

// One teammate as shown on the timeline
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TeammateCard {
    pub id: u32,
    pub name: String,
    pub initial: String,
    pub role: String,
    pub role_color: String,
    pub timezone: String,
    pub timezone_display: Option<String>,
    pub abbreviation: String,
    pub utc_offset: f64,
    pub local_time: String,
    pub online: bool,
    pub status: OnlineStatus,
    pub avatar: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TimezoneGroup {
    pub name: String,
    pub utc_range: String,
    pub member_count: usize,
    pub teammates: Vec<TeammateCard>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ViewerClock {
    pub timezone: String,
    pub local_time: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TimelineResponse {
    pub viewer: ViewerClock,
    pub view: TimelineView,
    #[serde(default)]
    pub teammates: Vec<TeammateCard>,
    #[serde(default)]
    pub groups: Vec<TimezoneGroup>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub id: u32,
    pub name: String,
    pub initial: String,
    pub role: String,
    pub timezone_display: Option<String>,
    // [longitude, latitude]
    pub coordinates: [f64; 2],
    pub local_time: String,
    pub online: bool,
}
