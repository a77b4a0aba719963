//! Card-settlement statement extraction.
//!
//! The statement template prints header values a fixed number of lines
//! below their labels and totals further down still, so the primary
//! rules are positional lookups at configured offsets, with anchored
//! regexes as fallbacks for texts where the layout collapsed.

use crate::models::config::SettlementConfig;
use crate::models::record::{DocumentClass, DocumentRecord};
use crate::text::{monetary_match, value_below};

use super::patterns::*;
use super::{amount_hit, non_empty};

const SCHEMA: &[(&str, &str)] = &[
    ("Archivo_PDF", ""),
    ("FECHA_DE_EMISION", ""),
    ("PAGADOR", ""),
    ("Nro_DE_CUIT", ""),
    ("Razon_Social", ""),
    ("Establecimiento", ""),
    ("Total_Presentado", "0.00"),
    ("Total_Descuento", "0.00"),
    ("Saldo", "0.00"),
    ("IVA_21", "0.00"),
    ("Retencion_IB", "0.00"),
    ("Percepcion_AFIP", "0.00"),
    ("Logo_Marca", "No reconocido"),
];

/// Card brands the statements carry, checked in order. First hit wins.
const CARD_BRANDS: &[(&[&str], &str)] = &[
    (&["VISA"], "VISA"),
    (&["MASTERCARD", "MASTER CARD"], "MASTERCARD"),
    (&["CABAL"], "CABAL"),
    (&["AMERICAN EXPRESS", "AMEX"], "AMERICAN EXPRESS"),
];

/// Extract a card-settlement statement into its fixed schema.
pub fn extract(text: &str, source_name: &str, config: &SettlementConfig) -> DocumentRecord {
    let mut record =
        DocumentRecord::with_defaults(source_name, DocumentClass::CardSettlement, SCHEMA);
    record.set("Archivo_PDF", source_name);

    let header = config.header_offset;
    let totals = config.totals_offset;

    record.set(
        "FECHA_DE_EMISION",
        non_empty(value_below("FECHA DE EMISION", text, header))
            .or_else(|| non_empty(value_below("Fecha de Emisión", text, 1)))
            .unwrap_or_default(),
    );

    record.set(
        "PAGADOR",
        non_empty(value_below("PAGADOR", text, header))
            .or_else(|| non_empty(value_below("Pagador", text, 1)))
            .unwrap_or_default(),
    );

    record.set(
        "Nro_DE_CUIT",
        non_empty(value_below("Nº DE CUIT", text, header))
            .or_else(|| non_empty(value_below("CUIT", text, 1)))
            .unwrap_or_default(),
    );

    record.set(
        "Razon_Social",
        value_below("Razón Social", text, 1),
    );
    record.set("Establecimiento", value_below("Establecimiento", text, 1));

    record.set(
        "Total_Presentado",
        amount_hit(value_below("TOTAL PRESENTADO $", text, totals))
            .or_else(|| amount_hit(value_below("TOTAL PRESENTADO $", text, 1)))
            .or_else(|| amount_hit(value_below("TOTAL PRESENTADO $", text, 2)))
            .unwrap_or_else(|| monetary_match(&TOTAL_PRESENTADO, text)),
    );

    record.set(
        "Total_Descuento",
        amount_hit(value_below("TOTAL DESCUENTO $", text, totals))
            .or_else(|| amount_hit(value_below("TOTAL DESCUENTO", text, totals)))
            .or_else(|| amount_hit(value_below("TOTAL DESCUENTO $", text, 1)))
            .or_else(|| amount_hit(value_below("TOTAL DESCUENTO", text, 1)))
            .unwrap_or_else(|| monetary_match(&TOTAL_DESCUENTO, text)),
    );

    record.set(
        "Saldo",
        amount_hit(value_below("SALDO $", text, totals))
            .or_else(|| amount_hit(value_below("SALDO $", text, 1)))
            .or_else(|| amount_hit(value_below("SALDO", text, totals)))
            .unwrap_or_else(|| monetary_match(&SALDO, text)),
    );

    record.set("IVA_21", monetary_match(&SETTLEMENT_IVA_21, text));
    record.set("Retencion_IB", monetary_match(&RETENCION_IB, text));
    record.set("Percepcion_AFIP", monetary_match(&PERCEPCION_AFIP, text));

    record.set("Logo_Marca", detect_card_brand(text));

    record
}

/// Canonical card brand from the statement text, `"No reconocido"`
/// when no known brand appears.
pub fn detect_card_brand(text: &str) -> &'static str {
    let upper = text.to_uppercase();
    for (needles, brand) in CARD_BRANDS {
        if needles.iter().any(|n| upper.contains(n)) {
            return brand;
        }
    }
    "No reconocido"
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a statement where every header value sits `header` lines
    /// below its label and every total `totals` lines below.
    fn sample_statement(config: &SettlementConfig) -> String {
        let mut lines: Vec<String> = Vec::new();
        let mut place = |label: &str, value: &str, offset: usize, lines: &mut Vec<String>| {
            let at = lines.len();
            lines.push(label.to_string());
            while lines.len() < at + offset {
                lines.push(String::new());
            }
            lines.push(value.to_string());
        };

        place(
            "FECHA DE EMISION",
            "10/02/2024",
            config.header_offset,
            &mut lines,
        );
        place("PAGADOR", "TARJETAS DEL SUR S.A.", config.header_offset, &mut lines);
        place("Nº DE CUIT", "30500010912", config.header_offset, &mut lines);
        place(
            "TOTAL PRESENTADO $",
            "1.500.000,00",
            config.totals_offset,
            &mut lines,
        );
        place(
            "TOTAL DESCUENTO $",
            "45.000,00",
            config.totals_offset,
            &mut lines,
        );
        place("SALDO $", "1.455.000,00", config.totals_offset, &mut lines);
        lines.push("LIQUIDACION VISA".to_string());
        lines.push("IVA 21,00 % $ 9.450,00".to_string());
        lines.join("\n")
    }

    #[test]
    fn test_positional_extraction_at_configured_offsets() {
        let config = SettlementConfig::default();
        let text = sample_statement(&config);
        let record = extract(&text, "liq_visa.pdf", &config);

        assert_eq!(record.get("FECHA_DE_EMISION"), "10/02/2024");
        assert_eq!(record.get("PAGADOR"), "TARJETAS DEL SUR S.A.");
        assert_eq!(record.get("Nro_DE_CUIT"), "30500010912");
        assert_eq!(record.get("Total_Presentado"), "1500000.00");
        assert_eq!(record.get("Total_Descuento"), "45000.00");
        assert_eq!(record.get("Saldo"), "1455000.00");
        assert_eq!(record.get("IVA_21"), "9450.00");
        assert_eq!(record.get("Logo_Marca"), "VISA");
    }

    #[test]
    fn test_regex_fallback_when_layout_collapses() {
        let config = SettlementConfig::default();
        let text = "TOTAL PRESENTADO $ 2.000,00\nTOTAL DESCUENTO $ 100,00\nSALDO $ 1.900,00";
        let record = extract(text, "flat.pdf", &config);

        assert_eq!(record.get("Total_Presentado"), "2000.00");
        assert_eq!(record.get("Total_Descuento"), "100.00");
        assert_eq!(record.get("Saldo"), "1900.00");
    }

    #[test]
    fn test_unknown_brand() {
        assert_eq!(detect_card_brand("LIQUIDACION NARANJA"), "No reconocido");
        assert_eq!(detect_card_brand("pago con master card"), "MASTERCARD");
        assert_eq!(detect_card_brand("AMEX corporate"), "AMERICAN EXPRESS");
    }

    #[test]
    fn test_empty_text_keeps_defaults() {
        let config = SettlementConfig::default();
        let record = extract("", "empty.pdf", &config);
        assert_eq!(record.get("Total_Presentado"), "0.00");
        assert_eq!(record.get("Logo_Marca"), "No reconocido");
    }
}
