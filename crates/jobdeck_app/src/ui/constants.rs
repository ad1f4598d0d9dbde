use comfy_table::Color;
use jobdeck_core::{HealthLane, Tone};

pub const JOB_TABLE_HEADER: [&str; 5] = ["ID", "JOB", "STATUS", "CREATED", "UPDATED"];
pub const LANE_TABLE_HEADER: [&str; 2] = ["SUBSYSTEM", "STATE"];

pub const LANE_NAMES: [&str; 4] = ["api", "database", "queue", "crawler"];

/// Badge tones map onto fixed terminal colors.
pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Success => Color::Green,
        Tone::Error => Color::Red,
        Tone::Warning => Color::Yellow,
        Tone::Neutral => Color::Grey,
    }
}

pub fn lane_label(lane: HealthLane) -> &'static str {
    match lane {
        HealthLane::Checking => "checking",
        HealthLane::Online => "online",
        HealthLane::Offline => "offline",
    }
}

pub fn lane_color(lane: HealthLane) -> Color {
    match lane {
        HealthLane::Checking => Color::Yellow,
        HealthLane::Online => Color::Green,
        HealthLane::Offline => Color::Red,
    }
}
