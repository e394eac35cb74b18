//! Canonical order schema: field names, source header mapping, per-stage field policy

use super::error::ReportError;
use super::types::Table;

/// Canonical column names used after normalization
pub mod fields {
    pub const STATUS: &str = "ESTADO";
    pub const CREATION_DATE: &str = "FECHA DE CREACION";
    pub const RESPONSIBLE: &str = "RESPONSABLE";
    pub const CUSTOMER_NAME: &str = "NOMBRE DEL CLIENTE";
    pub const OFFER: &str = "OFERTA";
    pub const SUBSCRIPTION: &str = "SUSCRIPCION";
    pub const INTERACTION: &str = "INTERACCION";
    pub const CATEGORY: &str = "CATEGORIA";
    pub const COMMERCIAL_MODEL: &str = "MODELO COMERCIAL";
    pub const EXECUTIVE: &str = "EJECUTIVO";
    pub const ACTIVATION_DATE: &str = "FECHA DE ACTIVACION";
    /// Derived during enrichment
    pub const DAYS_OPEN: &str = "DIAS ABIERTA";
}

/// Known order status values
pub mod status {
    pub const COMPLETED: &str = "Completed";
    pub const IN_PROGRESS: &str = "InProgress";
}

/// Known order category values
pub mod category {
    pub const SALES_ORDER: &str = "SalesOrder";
    pub const DEACTIVATION: &str = "Deactivation";
}

/// Source header -> canonical name
pub const RENAMES: &[(&str, &str)] = &[
    ("Order Status", fields::STATUS),
    ("Order Creation Date", fields::CREATION_DATE),
    ("Responsible", fields::RESPONSIBLE),
    ("Nombre Cliente", fields::CUSTOMER_NAME),
    ("Main Offer", fields::OFFER),
    ("Subscription", fields::SUBSCRIPTION),
    ("Interaction", fields::INTERACTION),
    ("Order Category", fields::CATEGORY),
    ("Modelo Comercial", fields::COMMERCIAL_MODEL),
    ("Ejecutivo", fields::EXECUTIVE),
    ("Fecha Activación", fields::ACTIVATION_DATE),
];

/// Source columns that never reach the report
pub const DROPPED_COLUMNS: &[&str] = &[
    "Order ID",
    "Party Role ID",
    "Mail Contacto Técnico",
    "Instalation Address",
    "Nombre Elemento",
    "Monto",
    "Moneda",
    "Tipo de Precio",
    "Delta",
    "Fecha Agendamiento",
    "Motivo Reprogramación",
    "Motivo",
    "Segmento",
    "Fecha Cancelación",
    "Current Phase",
];

/// Columns kept in the open deactivations sheet, in output order
pub const DEACTIVATION_COLUMNS: &[&str] = &[
    fields::STATUS,
    fields::CATEGORY,
    fields::CREATION_DATE,
    fields::OFFER,
    fields::SUBSCRIPTION,
    fields::RESPONSIBLE,
    fields::CUSTOMER_NAME,
    fields::INTERACTION,
    fields::COMMERCIAL_MODEL,
    fields::DAYS_OPEN,
];

/// Canonical name for a (trimmed) source header
pub fn canonical_name(header: &str) -> &str {
    RENAMES
        .iter()
        .find(|(source, _)| *source == header)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(header)
}

/// Which fields a pipeline stage needs and which it can do without
#[derive(Debug, Clone, Copy)]
pub struct FieldPolicy {
    pub stage: &'static str,
    /// Missing any of these aborts the run
    pub required: &'static [&'static str],
    /// The stage skips the step touching these when they are absent
    pub tolerated: &'static [&'static str],
}

impl FieldPolicy {
    /// Fail with the first required field missing from `table`
    pub fn check(&self, table: &Table) -> Result<(), ReportError> {
        for &field in self.required {
            if !table.has_column(field) {
                return Err(ReportError::MissingRequiredField {
                    stage: self.stage,
                    field,
                });
            }
        }

        for &field in self.tolerated {
            if !table.has_column(field) {
                log::debug!("{}: optional field '{}' not present", self.stage, field);
            }
        }

        Ok(())
    }
}

/// Validate every stage's policy against the normalized table
///
/// Derived fields (days open) are not checked; they are produced by the
/// enrich stage itself.
pub fn validate(table: &Table, policies: &[FieldPolicy]) -> Result<(), ReportError> {
    policies.iter().try_for_each(|policy| policy.check(table))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_name_lookup() {
        assert_eq!(canonical_name("Order Status"), fields::STATUS);
        assert_eq!(canonical_name("Fecha Activación"), fields::ACTIVATION_DATE);
        assert_eq!(canonical_name("Something Else"), "Something Else");
        assert_eq!(canonical_name(fields::STATUS), fields::STATUS);
    }

    #[test]
    fn test_policy_reports_missing_required_field() {
        let policy = FieldPolicy {
            stage: "segment",
            required: &[fields::STATUS, fields::CATEGORY],
            tolerated: &[fields::INTERACTION],
        };

        let table = Table::new([fields::STATUS]);
        let err = policy.check(&table).unwrap_err();
        assert_eq!(
            err,
            ReportError::MissingRequiredField {
                stage: "segment",
                field: fields::CATEGORY,
            }
        );

        let table = Table::new([fields::STATUS, fields::CATEGORY]);
        assert!(policy.check(&table).is_ok());
    }
}
