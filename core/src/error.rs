use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Invalid coordinate '{0}': expected degrees with N, E, S or W appended")]
    Coordinate(String),
    #[error("Invalid offset '{0}': expected MM, HH:MM or HH:MM:SS with optional sign")]
    Offset(String),
    #[error("Twilight angle must be between -90 and +90 degrees (-ve = below horizon), got {0}")]
    TwilightAngle(f64),
    #[error("Unknown twilight '{0}'")]
    Twilight(String),
}
