//! Performance profiles bounding frame count, frame rate and resize cost

use serde::{Deserialize, Serialize};
use std::fmt;

/// Delay used when a frame declares none
pub const DEFAULT_FRAME_DELAY_MS: u32 = 100;

/// Two-level resize quality hint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeQuality {
    /// Cheaper filtering, slightly softer result
    Good,
    /// Sharper filtering at higher CPU cost
    Best,
}

/// A named trade-off between visual fidelity and memory/CPU cost
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformanceProfile {
    /// Maximum number of frames kept in a render sequence
    pub max_frames: usize,
    /// Lower bound for any frame delay, in milliseconds
    pub min_frame_delay_ms: u32,
    /// Resize filter hint
    pub quality: ResizeQuality,
    /// PNG compression level (0-9)
    pub compression_level: u8,
    /// Human-readable name
    pub label: &'static str,
    /// Expected memory footprint
    pub description: &'static str,
}

impl PerformanceProfile {
    /// Clamps a declared delay to this profile's minimum.
    ///
    /// Absent delays fall back to 100ms before clamping.
    pub fn effective_delay(&self, declared_ms: Option<u32>) -> u32 {
        declared_ms
            .filter(|&d| d > 0)
            .unwrap_or(DEFAULT_FRAME_DELAY_MS)
            .max(self.min_frame_delay_ms)
    }
}

pub const LIGHT: PerformanceProfile = PerformanceProfile {
    max_frames: 15,
    min_frame_delay_ms: 80,
    quality: ResizeQuality::Good,
    compression_level: 9,
    label: "Light",
    description: "~100-150MB RAM",
};

pub const BALANCED: PerformanceProfile = PerformanceProfile {
    max_frames: 30,
    min_frame_delay_ms: 50,
    quality: ResizeQuality::Good,
    compression_level: 6,
    label: "Balanced",
    description: "~150-250MB RAM",
};

pub const PERFORMANCE: PerformanceProfile = PerformanceProfile {
    max_frames: 60,
    min_frame_delay_ms: 30,
    quality: ResizeQuality::Best,
    compression_level: 3,
    label: "Performance",
    description: "~300-500MB RAM",
};

/// Name of one of the three fixed profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    Light,
    #[default]
    Balanced,
    Performance,
}

impl ProfileKind {
    /// All profiles in menu order
    pub const ALL: [ProfileKind; 3] = [
        ProfileKind::Light,
        ProfileKind::Balanced,
        ProfileKind::Performance,
    ];

    /// Parses a profile name, falling back to `Balanced` for anything unknown
    pub fn parse_or_default(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => ProfileKind::Light,
            "performance" => ProfileKind::Performance,
            _ => ProfileKind::Balanced,
        }
    }

    /// Settings key for this profile
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileKind::Light => "light",
            ProfileKind::Balanced => "balanced",
            ProfileKind::Performance => "performance",
        }
    }

    /// The fixed profile behind this name
    pub fn profile(&self) -> &'static PerformanceProfile {
        match self {
            ProfileKind::Light => &LIGHT,
            ProfileKind::Balanced => &BALANCED,
            ProfileKind::Performance => &PERFORMANCE,
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Holds the fixed profiles and the current selection
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    selected: ProfileKind,
}

impl ProfileStore {
    /// Creates a store with the given selection
    pub fn new(selected: ProfileKind) -> Self {
        Self { selected }
    }

    /// Looks up a profile by name; unknown or empty names yield `balanced`
    pub fn get(name: &str) -> &'static PerformanceProfile {
        ProfileKind::parse_or_default(name).profile()
    }

    /// Changes the selection; already-loaded sequences are not reprocessed
    pub fn select(&mut self, kind: ProfileKind) {
        self.selected = kind;
    }

    /// Currently selected profile name
    pub fn selected(&self) -> ProfileKind {
        self.selected
    }

    /// Currently selected profile
    pub fn active(&self) -> &'static PerformanceProfile {
        self.selected.profile()
    }
}
