use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactCategory {
    Emergency,
    Flood,
    Utilities,
    Medical,
}

impl std::fmt::Display for ContactCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContactCategory::Emergency => write!(f, "emergency"),
            ContactCategory::Flood => write!(f, "flood"),
            ContactCategory::Utilities => write!(f, "utilities"),
            ContactCategory::Medical => write!(f, "medical"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmergencyContact {
    pub id: u8,
    pub name: &'static str,
    pub phone: &'static str,
    pub description: &'static str,
    pub category: ContactCategory,
}

/// Emergency services for Kochi, Kerala.
pub const EMERGENCY_CONTACTS: [EmergencyContact; 8] = [
    EmergencyContact {
        id: 1,
        name: "Kerala State Disaster Management Authority (KSDMA)",
        phone: "1077",
        description: "State emergency hotline for disaster response",
        category: ContactCategory::Emergency,
    },
    EmergencyContact {
        id: 2,
        name: "Kochi City Control Room",
        phone: "0484-2351554",
        description: "For reporting flooding or requesting immediate assistance in Kochi",
        category: ContactCategory::Flood,
    },
    EmergencyContact {
        id: 3,
        name: "Kerala Fire & Rescue Services (Kochi)",
        phone: "101",
        description: "Fire and rescue services for flood emergencies",
        category: ContactCategory::Emergency,
    },
    EmergencyContact {
        id: 4,
        name: "Ernakulam District Emergency Operations Center",
        phone: "0484-2423513",
        description: "District-level coordination for flood response",
        category: ContactCategory::Flood,
    },
    EmergencyContact {
        id: 5,
        name: "Kochi Police Control Room",
        phone: "0484-2366100",
        description: "Police emergency services during floods",
        category: ContactCategory::Emergency,
    },
    EmergencyContact {
        id: 6,
        name: "KSEB (Kerala State Electricity Board)",
        phone: "1912",
        description: "For power outages during floods",
        category: ContactCategory::Utilities,
    },
    EmergencyContact {
        id: 7,
        name: "Kerala Water Authority (KWA)",
        phone: "0484-2360800",
        description: "Water supply issues during floods",
        category: ContactCategory::Utilities,
    },
    EmergencyContact {
        id: 8,
        name: "Ambulance Services",
        phone: "108",
        description: "Medical emergencies during floods",
        category: ContactCategory::Medical,
    },
];

pub const DEFAULT_HELP_MESSAGE: &str = "I need assistance due to flooding at my location.";

pub fn contacts_in(category: Option<ContactCategory>) -> Vec<&'static EmergencyContact> {
    EMERGENCY_CONTACTS
        .iter()
        .filter(|c| category.map_or(true, |wanted| c.category == wanted))
        .collect()
}

/// A position fix as reported by the user's device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    /// Metres.
    pub accuracy: Option<f64>,
}

impl Position {
    /// `9.931200, 76.267300 (±15m)`
    pub fn describe(&self) -> String {
        let accuracy = match self.accuracy {
            Some(a) => format!("{}", a.round() as i64),
            None => "?".to_string(),
        };
        format!(
            "{:.6}, {:.6} (±{}m)",
            self.latitude, self.longitude, accuracy
        )
    }
}

/// Text of an SOS signal.
pub fn sos_message(position: Option<&Position>) -> String {
    match position {
        Some(p) => format!(
            "SOS: flood emergency. Immediate assistance required at {}.",
            p.describe()
        ),
        None => "SOS: flood emergency. Immediate assistance required; location unavailable."
            .to_string(),
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum MessageError {
    #[error("please fill in {0} before sending")]
    Missing(&'static str),
}

/// Compose a help message to a personal contact. All fields are required.
pub fn help_message(
    contact_name: &str,
    contact_phone: &str,
    message: &str,
    position: Option<&Position>,
) -> Result<String, MessageError> {
    let name = contact_name.trim();
    let phone = contact_phone.trim();
    let message = message.trim();

    if name.is_empty() {
        return Err(MessageError::Missing("the contact name"));
    }
    if phone.is_empty() {
        return Err(MessageError::Missing("the contact phone"));
    }
    if message.is_empty() {
        return Err(MessageError::Missing("a message"));
    }

    let location = position
        .map(|p| format!(" My location: {}.", p.describe()))
        .unwrap_or_default();

    Ok(format!("To {} ({}): {}{}", name, phone, message, location))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_filter() {
        assert_eq!(contacts_in(None).len(), 8);
        let utilities: Vec<&str> = contacts_in(Some(ContactCategory::Utilities))
            .iter()
            .map(|c| c.phone)
            .collect();
        assert_eq!(utilities, ["1912", "0484-2360800"]);
        assert_eq!(contacts_in(Some(ContactCategory::Medical))[0].phone, "108");
    }

    #[test]
    fn test_position_describe() {
        let p = Position {
            latitude: 9.9312,
            longitude: 76.2673,
            accuracy: Some(14.6),
        };
        assert_eq!(p.describe(), "9.931200, 76.267300 (±15m)");

        let unknown = Position { accuracy: None, ..p };
        assert!(unknown.describe().ends_with("(±?m)"));
    }

    #[test]
    fn test_sos_without_location() {
        assert!(sos_message(None).contains("location unavailable"));
    }

    #[test]
    fn test_help_message_requires_fields() {
        assert_eq!(
            help_message("", "123", "help", None),
            Err(MessageError::Missing("the contact name"))
        );
        assert_eq!(
            help_message("Ravi", " ", "help", None),
            Err(MessageError::Missing("the contact phone"))
        );
        let msg = help_message("Ravi", "98470 12345", DEFAULT_HELP_MESSAGE, None).unwrap();
        assert_eq!(
            msg,
            "To Ravi (98470 12345): I need assistance due to flooding at my location."
        );
    }
}
