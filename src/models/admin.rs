//! County and municipality catalogues and user selection parsing.

use serde::{Deserialize, Serialize};

/// Administrative unit type served by the kommuneinfo API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminKind {
    County,
    Municipality,
}

impl AdminKind {
    /// Path segment of the kommuneinfo API
    pub fn path_segment(&self) -> &'static str {
        match self {
            AdminKind::County => "fylker",
            AdminKind::Municipality => "kommuner",
        }
    }

    /// Norwegian display noun used in fallback labels
    pub fn noun(&self) -> &'static str {
        match self {
            AdminKind::County => "Fylke",
            AdminKind::Municipality => "Kommune",
        }
    }
}

/// One entry of a county or municipality list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUnit {
    pub number: String,
    pub name: String,
}

impl AdminUnit {
    pub fn new(number: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            name: name.into(),
        }
    }

    /// Combo-style display text: "Oslo (0301)"
    pub fn display(&self) -> String {
        format!("{} ({})", self.name, self.number)
    }
}

/// A resolved county or municipality choice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSelection {
    pub number: String,
    pub name: Option<String>,
}

impl AdminSelection {
    /// Resolve free-form user input against a loaded catalogue.
    ///
    /// Accepts "Oslo (0301)", "0301", "0301 Oslo" and plain names. A leading
    /// number is accepted even when the catalogue is empty or lacks it.
    pub fn resolve(input: &str, units: &[AdminUnit]) -> Option<Self> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }

        // "Name (number)"
        if let Some(stripped) = text.strip_suffix(')') {
            if let Some((name, number)) = stripped.rsplit_once('(') {
                let number = number.trim();
                if !number.is_empty() {
                    let name = name.trim();
                    return Some(Self {
                        number: number.to_string(),
                        name: (!name.is_empty()).then(|| name.to_string()),
                    });
                }
            }
        }

        // Leading number, optionally followed by a name
        let digits: String = text.chars().take_while(|c| c.is_ascii_digit()).collect();
        if !digits.is_empty() {
            let rest = text[digits.len()..].trim();
            let name = if rest.is_empty() {
                units
                    .iter()
                    .find(|unit| unit.number == digits)
                    .map(|unit| unit.name.clone())
            } else {
                Some(rest.to_string())
            };
            return Some(Self {
                number: digits,
                name,
            });
        }

        let lowered = text.to_lowercase();
        units
            .iter()
            .find(|unit| unit.name.to_lowercase() == lowered)
            .map(|unit| Self {
                number: unit.number.clone(),
                name: Some(unit.name.clone()),
            })
    }

    /// Label for a boundary hit: the name, or "Fylke 50" style fallback
    pub fn label(&self, kind: AdminKind) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{} {}", kind.noun(), self.number),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units() -> Vec<AdminUnit> {
        vec![
            AdminUnit::new("0301", "Oslo"),
            AdminUnit::new("5001", "Trondheim"),
        ]
    }

    #[test]
    fn test_resolve_display_text() {
        let selection = AdminSelection::resolve("Oslo (0301)", &units()).unwrap();
        assert_eq!(selection.number, "0301");
        assert_eq!(selection.name.as_deref(), Some("Oslo"));
    }

    #[test]
    fn test_resolve_number_uses_catalogue_name() {
        let selection = AdminSelection::resolve("5001", &units()).unwrap();
        assert_eq!(selection.name.as_deref(), Some("Trondheim"));
    }

    #[test]
    fn test_resolve_number_with_name() {
        let selection = AdminSelection::resolve("0301 Oslo", &[]).unwrap();
        assert_eq!(selection.number, "0301");
        assert_eq!(selection.name.as_deref(), Some("Oslo"));
    }

    #[test]
    fn test_resolve_name_case_insensitive() {
        let selection = AdminSelection::resolve("trondheim", &units()).unwrap();
        assert_eq!(selection.number, "5001");
    }

    #[test]
    fn test_resolve_unknown_name() {
        assert!(AdminSelection::resolve("Atlantis", &units()).is_none());
        assert!(AdminSelection::resolve("   ", &units()).is_none());
    }

    #[test]
    fn test_fallback_label() {
        let selection = AdminSelection {
            number: "50".to_string(),
            name: None,
        };
        assert_eq!(selection.label(AdminKind::County), "Fylke 50");
        assert_eq!(AdminUnit::new("0301", "Oslo").display(), "Oslo (0301)");
    }
}
