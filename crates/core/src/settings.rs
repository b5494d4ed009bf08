use serde::{Deserialize, Serialize};
use tzclock_protocol::SharedStr;

/// User configuration handed to the view by the application root.
///
/// Storing it is the host's business; the view only ever receives a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Zone identifiers, left to right.
    pub timezones: Vec<SharedStr>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timezones: vec![SharedStr::from("UTC")],
        }
    }
}

impl Settings {
    pub fn new<I, S>(timezones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SharedStr>,
    {
        Self {
            timezones: timezones.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse the comma-separated form, e.g. `"Europe/Berlin,UTC"`.
    ///
    /// Blank entries are skipped; identifiers are not validated here since
    /// unknown zones still render (as UTC).
    pub fn from_csv(list: &str) -> Self {
        Self::new(list.split(',').map(str::trim).filter(|s| !s.is_empty()))
    }

    pub fn to_csv(&self) -> String {
        self.timezones
            .iter()
            .map(SharedStr::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_utc() {
        assert_eq!(Settings::default().to_csv(), "UTC");
    }

    #[test]
    fn csv_roundtrip_skips_blanks() {
        let s = Settings::from_csv(" Europe/Berlin, ,America/Asuncion,,UTC ");
        assert_eq!(s.timezones, vec!["Europe/Berlin", "America/Asuncion", "UTC"]);
        assert_eq!(Settings::from_csv(&s.to_csv()), s);
        assert!(Settings::from_csv("").timezones.is_empty());
    }

    #[test]
    fn json_shape() {
        let s = Settings::new(["Asia/Tokyo", "UTC"]);
        let json = serde_json::to_string(&s).expect("serialize");
        assert_eq!(json, r#"{"timezones":["Asia/Tokyo","UTC"]}"#);
        let back: Settings = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, s);
    }
}
