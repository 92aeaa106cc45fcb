//! [`Entity`] bindings tying each aggregate row type to its table.

use uuid::Uuid;

use super::repository::{Entity, SqlValue};
use crate::models::{
    Application, ApplicationVersion, HealthcareProvider, Protocol, ProtocolVersion, Role,
    SystemType, Vendor,
};

impl Entity for Vendor {
    const TABLE: &'static str = "vendors";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "kvk_number",
        "trade_name",
        "statutory_name",
        "created_at",
        "modified_at",
    ];

    fn id(&self) -> Uuid {
        self.id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.kvk_number.clone().into(),
            self.trade_name.clone().into(),
            self.statutory_name.clone().into(),
            self.created_at.into(),
            self.modified_at.into(),
        ]
    }

    fn column_text(&self, column: &str) -> Option<&str> {
        match column {
            "kvk_number" => Some(&self.kvk_number),
            "trade_name" => Some(&self.trade_name),
            "statutory_name" => Some(&self.statutory_name),
            _ => None,
        }
    }
}

impl Entity for Application {
    const TABLE: &'static str = "applications";
    const COLUMNS: &'static [&'static str] =
        &["id", "name", "vendor_id", "created_at", "modified_at"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.name.clone().into(),
            self.vendor_id.into(),
            self.created_at.into(),
            self.modified_at.into(),
        ]
    }

    fn column_text(&self, column: &str) -> Option<&str> {
        match column {
            "name" => Some(&self.name),
            _ => None,
        }
    }
}

impl Entity for ApplicationVersion {
    const TABLE: &'static str = "application_versions";
    const COLUMNS: &'static [&'static str] =
        &["id", "version", "application_id", "created_at", "modified_at"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.version.clone().into(),
            self.application_id.into(),
            self.created_at.into(),
            self.modified_at.into(),
        ]
    }

    fn column_text(&self, column: &str) -> Option<&str> {
        match column {
            "version" => Some(&self.version),
            _ => None,
        }
    }
}

impl Entity for Role {
    const TABLE: &'static str = "roles";
    const COLUMNS: &'static [&'static str] =
        &["id", "name", "description", "created_at", "modified_at"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.name.clone().into(),
            self.description.clone().into(),
            self.created_at.into(),
            self.modified_at.into(),
        ]
    }

    fn column_text(&self, column: &str) -> Option<&str> {
        match column {
            "name" => Some(&self.name),
            "description" => self.description.as_deref(),
            _ => None,
        }
    }
}

impl Entity for SystemType {
    const TABLE: &'static str = "system_types";
    const COLUMNS: &'static [&'static str] =
        &["id", "name", "description", "created_at", "modified_at"];

    fn id(&self) -> Uuid {
        self.id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.name.clone().into(),
            self.description.clone().into(),
            self.created_at.into(),
            self.modified_at.into(),
        ]
    }

    fn column_text(&self, column: &str) -> Option<&str> {
        match column {
            "name" => Some(&self.name),
            "description" => self.description.as_deref(),
            _ => None,
        }
    }
}

impl Entity for Protocol {
    const TABLE: &'static str = "protocols";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "protocol_type",
        "name",
        "description",
        "created_at",
        "modified_at",
    ];

    fn id(&self) -> Uuid {
        self.id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.protocol_type.into(),
            self.name.clone().into(),
            self.description.clone().into(),
            self.created_at.into(),
            self.modified_at.into(),
        ]
    }

    fn column_text(&self, column: &str) -> Option<&str> {
        match column {
            "name" => Some(&self.name),
            "description" => self.description.as_deref(),
            _ => None,
        }
    }
}

impl Entity for ProtocolVersion {
    const TABLE: &'static str = "protocol_versions";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "version",
        "description",
        "protocol_id",
        "created_at",
        "modified_at",
    ];

    fn id(&self) -> Uuid {
        self.id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.version.clone().into(),
            self.description.clone().into(),
            self.protocol_id.into(),
            self.created_at.into(),
            self.modified_at.into(),
        ]
    }

    fn column_text(&self, column: &str) -> Option<&str> {
        match column {
            "version" => Some(&self.version),
            "description" => self.description.as_deref(),
            _ => None,
        }
    }
}

impl Entity for HealthcareProvider {
    const TABLE: &'static str = "healthcare_providers";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "ura_code",
        "agb_code",
        "trade_name",
        "statutory_name",
        "created_at",
        "modified_at",
    ];

    fn id(&self) -> Uuid {
        self.id
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.into(),
            self.ura_code.clone().into(),
            self.agb_code.clone().into(),
            self.trade_name.clone().into(),
            self.statutory_name.clone().into(),
            self.created_at.into(),
            self.modified_at.into(),
        ]
    }

    fn column_text(&self, column: &str) -> Option<&str> {
        match column {
            "ura_code" => Some(&self.ura_code),
            "agb_code" => Some(&self.agb_code),
            "trade_name" => Some(&self.trade_name),
            "statutory_name" => Some(&self.statutory_name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory;

    #[test]
    fn values_align_with_columns() {
        let vendor = factory::new_vendor("12345678", "Acme", "Acme BV");
        assert_eq!(vendor.values().len(), Vendor::COLUMNS.len());

        let role = factory::new_role("Viewer", None);
        assert_eq!(role.values().len(), Role::COLUMNS.len());
    }

    #[test]
    fn column_text_exposes_lookup_columns() {
        let role = factory::new_role("Viewer", Some("read only"));
        assert_eq!(role.column_text("name"), Some("Viewer"));
        assert_eq!(role.column_text("description"), Some("read only"));
        assert_eq!(role.column_text("id"), None);
    }
}
