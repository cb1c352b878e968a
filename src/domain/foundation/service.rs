//! Service catalog value object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A bookable service.
///
/// The catalog currently holds a single entry; the type exists so bookings,
/// menus, and replies all render from one place rather than loose strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCode {
    Haircut,
}

impl ServiceCode {
    /// Resolves a service from its menu number.
    pub fn from_menu_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(ServiceCode::Haircut),
            _ => None,
        }
    }

    /// Human-readable service name.
    pub fn name(&self) -> &'static str {
        match self {
            ServiceCode::Haircut => "Haircut",
        }
    }

    /// Appointment duration in minutes.
    pub fn duration_minutes(&self) -> u32 {
        match self {
            ServiceCode::Haircut => 30,
        }
    }

    /// Price in whole dollars.
    pub fn price_usd(&self) -> u32 {
        match self {
            ServiceCode::Haircut => 20,
        }
    }

    /// Resolves a service from its stored name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Haircut" => Some(ServiceCode::Haircut),
            _ => None,
        }
    }
}

impl fmt::Display for ServiceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_choice_one_is_haircut() {
        assert_eq!(ServiceCode::from_menu_choice("1"), Some(ServiceCode::Haircut));
        assert_eq!(ServiceCode::from_menu_choice(" 1 "), Some(ServiceCode::Haircut));
        assert_eq!(ServiceCode::from_menu_choice("2"), None);
    }

    #[test]
    fn name_round_trips() {
        let svc = ServiceCode::Haircut;
        assert_eq!(ServiceCode::from_name(svc.name()), Some(svc));
    }
}
