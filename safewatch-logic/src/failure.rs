use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::display::TrackerUiState;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, specta::Type)]
/// Why the platform couldn't produce a reading, numbered like the W3C geolocation error codes
pub enum LocationFailure {
    Unknown,
    PermissionDenied,
    PositionUnavailable,
    Timeout,
}

impl LocationFailure {
    pub const ALL: [Self; 4] = [
        Self::Unknown,
        Self::PermissionDenied,
        Self::PositionUnavailable,
        Self::Timeout,
    ];

    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            0 => Some(Self::Unknown),
            1 => Some(Self::PermissionDenied),
            2 => Some(Self::PositionUnavailable),
            3 => Some(Self::Timeout),
            _ => None,
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            Self::Unknown => 0,
            Self::PermissionDenied => 1,
            Self::PositionUnavailable => 2,
            Self::Timeout => 3,
        }
    }

    pub fn status_message(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "User denied the request for Geolocation.",
            Self::PositionUnavailable => "Location information is unavailable.",
            Self::Timeout => "The request to get user location timed out.",
            Self::Unknown => "An unknown error occurred.",
        }
    }

    /// Write the status line for a raw failure code. Returns whether the code was recognized,
    /// unrecognized codes leave the status alone.
    pub fn report(code: u16, ui: &mut TrackerUiState) -> bool {
        if let Some(failure) = Self::from_code(code) {
            ui.set_status(failure.status_message());
            true
        } else {
            false
        }
    }
}

impl Display for LocationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.status_message())
    }
}
