//! Generic electronic-invoice extraction (factura / nota de crédito).

use regex::Regex;

use crate::models::record::{DocumentClass, DocumentRecord};
use crate::text::locale::normalize_amount;
use crate::text::{first_match, first_match_or};

use super::patterns::*;

/// Field schema with defaults, in output column order.
const SCHEMA: &[(&str, &str)] = &[
    ("Archivo_PDF", ""),
    ("Tipo_Comprobante", "DESCONOCIDO"),
    ("Fecha_Emision", ""),
    ("Razon_Social_Emisor", ""),
    ("CUIT_Emisor", ""),
    ("Punto_de_Venta", ""),
    ("Comp_Nro", ""),
    ("CUIT_Cliente", ""),
    ("Razon_Social_Cliente", ""),
    ("Importe_Neto_Gravado", "0.00"),
    ("IVA_27", "0.00"),
    ("IVA_21", "0.00"),
    ("IVA_10_5", "0.00"),
    ("IVA_5", "0.00"),
    ("IVA_2_5", "0.00"),
    ("IVA_0", "0.00"),
    ("Importe_Otros_Tributos", "0.00"),
    ("Importe_Total", "0.00"),
    ("CAE", ""),
    ("CAE_Vencimiento", ""),
];

/// Extract a generic invoice into its fixed schema. Best-effort: every
/// miss keeps the schema default.
pub fn extract(text: &str, source_name: &str) -> DocumentRecord {
    let mut record =
        DocumentRecord::with_defaults(source_name, DocumentClass::GenericInvoice, SCHEMA);

    record.set("Archivo_PDF", source_name);
    record.set("Tipo_Comprobante", comprobante_type(text));

    let fecha = first_match(&FECHA_EMISION, text)
        .or_else(|| first_match(&ANY_DATE, text))
        .unwrap_or_default();
    record.set("Fecha_Emision", fecha);

    record.set(
        "Razon_Social_Emisor",
        first_match_or(&RAZON_SOCIAL_EMISOR, text, ""),
    );

    let cuit_emisor = first_match_or(&CUIT, text, "");
    record.set("CUIT_Emisor", cuit_emisor.clone());

    if let Some(caps) = PUNTO_VENTA_COMP.captures(text) {
        record.set("Punto_de_Venta", caps[1].trim());
        record.set("Comp_Nro", caps[2].trim());
    }

    let (cuit_cliente, razon_cliente) = extract_counterparty(text, &cuit_emisor);
    record.set("CUIT_Cliente", cuit_cliente);
    record.set("Razon_Social_Cliente", razon_cliente);

    record.set(
        "Importe_Neto_Gravado",
        monetary(&IMPORTE_NETO_GRAVADO, text),
    );
    for (field, re) in VAT_BUCKETS.iter() {
        record.set(field, monetary(re, text));
    }
    record.set(
        "Importe_Otros_Tributos",
        monetary(&IMPORTE_OTROS_TRIBUTOS, text),
    );
    record.set("Importe_Total", monetary(&IMPORTE_TOTAL, text));

    record.set("CAE", first_match_or(&CAE, text, ""));
    record.set("CAE_Vencimiento", first_match_or(&CAE_VENCIMIENTO, text, ""));

    record
}

fn monetary(re: &Regex, text: &str) -> String {
    match first_match(re, text) {
        Some(v) => normalize_amount(&v),
        None => "0.00".to_string(),
    }
}

/// Credit notes mention themselves explicitly; anything else carrying
/// "FACTURA" is an invoice.
fn comprobante_type(text: &str) -> &'static str {
    let upper = text.to_uppercase();
    if upper.contains("NOTA DE CRÉDITO") || upper.contains("NOTA DE CREDITO") {
        "NOTA DE CREDITO"
    } else if upper.contains("FACTURA") {
        "FACTURA"
    } else {
        "DESCONOCIDO"
    }
}

/// Counterparty CUIT and name: the layout prints the issuer CUIT, then
/// the client CUIT followed by the client name. Falls back to the
/// second distinct 11-digit token in the document.
fn extract_counterparty(text: &str, cuit_emisor: &str) -> (String, String) {
    if !cuit_emisor.is_empty() {
        let adjacent = Regex::new(&format!(
            r"\b{}\b\s*\n\s*(\d{{11}})\s+([A-Z0-9ÁÉÍÓÚÑ .,&]+)",
            regex::escape(cuit_emisor)
        ));
        if let Some(caps) = adjacent.ok().and_then(|re| re.captures(text)) {
            return (caps[1].trim().to_string(), caps[2].trim().to_string());
        }
    }

    let cuits: Vec<String> = CUIT
        .captures_iter(text)
        .map(|c| c[1].to_string())
        .collect();
    let Some(segundo) = cuits.get(1) else {
        return (String::new(), String::new());
    };

    let razon = CUIT_CON_NOMBRE
        .captures_iter(text)
        .find(|caps| &caps[1] == segundo.as_str())
        .map(|caps| caps[2].trim().to_string())
        .unwrap_or_default();
    (segundo.clone(), razon)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
ORIGINAL
FACTURA
A
\n JULIO GRATTINADO S.A. \n
Punto de Venta: 00002    Comp. Nro: 00000407
Fecha de Emisión: 15/03/2024
30712345678
30587654321 SUPERMERCADO ACME S.R.L.
Importe Neto Gravado: $ 100.000,00
IVA 27%: $ 0,00
IVA 21%: $ 21.000,00
IVA 10.5%: $ 0,00
IVA 5%: $ 0,00
IVA 2.5%: $ 0,00
IVA 0%: $ 0,00
Importe Otros Tributos: $ 0,00
Importe Total: $ 121.000,00
CAE N°: 74123456789012
Fecha de Vto. de CAE: 25/03/2024
";

    #[test]
    fn test_full_invoice() {
        let record = extract(SAMPLE, "factura_0407.pdf");
        assert_eq!(record.get("Tipo_Comprobante"), "FACTURA");
        assert_eq!(record.get("Fecha_Emision"), "15/03/2024");
        assert_eq!(record.get("CUIT_Emisor"), "30712345678");
        assert_eq!(record.get("Punto_de_Venta"), "00002");
        assert_eq!(record.get("Comp_Nro"), "00000407");
        assert_eq!(record.get("CUIT_Cliente"), "30587654321");
        assert_eq!(record.get("Razon_Social_Cliente"), "SUPERMERCADO ACME S.R.L.");
        assert_eq!(record.get("Importe_Neto_Gravado"), "100000.00");
        assert_eq!(record.get("IVA_21"), "21000.00");
        assert_eq!(record.get("Importe_Total"), "121000.00");
        assert_eq!(record.get("CAE"), "74123456789012");
        assert_eq!(record.get("CAE_Vencimiento"), "25/03/2024");
    }

    #[test]
    fn test_counterparty_from_second_cuit_when_not_adjacent() {
        let text = "\
FACTURA
CUIT: 30712345678 EMISORA S.A.
Cliente
30587654321 DISTRIBUIDORA NORTE S.R.L.
";
        let record = extract(text, "f.pdf");
        assert_eq!(record.get("CUIT_Cliente"), "30587654321");
        assert_eq!(record.get("Razon_Social_Cliente"), "DISTRIBUIDORA NORTE S.R.L.");
    }

    #[test]
    fn test_credit_note_beats_factura() {
        let record = extract("NOTA DE CREDITO sobre FACTURA A", "nc.pdf");
        assert_eq!(record.get("Tipo_Comprobante"), "NOTA DE CREDITO");
    }

    #[test]
    fn test_empty_text_keeps_defaults() {
        let record = extract("", "empty.pdf");
        assert_eq!(record.get("Tipo_Comprobante"), "DESCONOCIDO");
        assert_eq!(record.get("Importe_Total"), "0.00");
        assert_eq!(record.get("CAE"), "");
    }
}
