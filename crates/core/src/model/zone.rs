use chrono_tz::Tz;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ZoneError {
    #[error("empty timezone identifier")]
    Empty,
    #[error("unknown timezone identifier: {0:?}")]
    Unknown(String),
}

/// Parse an IANA identifier such as `"Europe/Berlin"`.
pub fn parse_zone(id: &str) -> Result<Tz, ZoneError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ZoneError::Empty);
    }
    id.parse::<Tz>()
        .map_err(|_| ZoneError::Unknown(id.to_owned()))
}

/// A zone ready for conversion, remembering whether it was substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedZone {
    tz: Tz,
    fallback: bool,
}

impl ResolvedZone {
    pub fn tz(&self) -> Tz {
        self.tz
    }

    /// True when the requested identifier was unusable and UTC stands in.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }
}

/// Resolve a column's zone, substituting UTC for anything unrecognized.
///
/// An unknown identifier degrades the column rather than failing the render
/// pass.
pub fn resolve_zone(id: &str) -> ResolvedZone {
    match parse_zone(id) {
        Ok(tz) => ResolvedZone {
            tz,
            fallback: false,
        },
        Err(e) => {
            log::debug!("{e}; rendering column as UTC");
            ResolvedZone {
                tz: Tz::UTC,
                fallback: true,
            }
        }
    }
}
