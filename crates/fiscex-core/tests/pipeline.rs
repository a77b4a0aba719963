//! End-to-end pipeline tests: raw text in, diagnosed rows out.

use fiscex_core::extract;
use fiscex_core::ledger;
use fiscex_core::models::config::{EntityAlias, SettlementConfig};
use fiscex_core::reconcile::{
    prepare_authority_rows, prepare_internal_rows, reconcile, Diagnosis, Side,
};
use fiscex_core::{DocumentClass, LedgerFile};
use indexmap::IndexMap;
use pretty_assertions::assert_eq;

#[test]
fn invoice_text_to_record() {
    let text = "\
ORIGINAL
FACTURA
Punto de Venta: 00002    Comp. Nro: 00000407
Fecha de Emisión: 15/03/2024
Importe Total: $ 1.234,56
CAE N°: 74123456789012
";
    let record = extract::extract_auto(text, "factura.pdf", &SettlementConfig::default());

    assert_eq!(record.class, DocumentClass::GenericInvoice);
    assert_eq!(record.get("Tipo_Comprobante"), "FACTURA");
    assert_eq!(record.get("Importe_Total"), "1234.56");
    assert_eq!(record.get("CAE"), "74123456789012");
}

#[test]
fn settlement_without_brand_text() {
    let text = "LIQUIDACION\nTOTAL PRESENTADO $ 1.000,00\nSALDO $ 980,00";
    let record = extract::extract_auto(text, "liq.pdf", &SettlementConfig::default());

    assert_eq!(record.class, DocumentClass::CardSettlement);
    assert_eq!(record.get("Logo_Marca"), "No reconocido");
    assert_eq!(record.get("Total_Presentado"), "1000.00");
}

fn internal_row(invoice: &str, label: &str, total: &str, due: &str) -> IndexMap<String, String> {
    [
        ("Nro", "1"),
        ("Nro de Factura", invoice),
        ("Etiquetas", label),
        ("Total Factura", total),
        ("Fecha Vto.", due),
        ("Proveedor", "PROVEEDORA DEL SUR S.A."),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[test]
fn consolidated_ledger_reconciles_against_internal() {
    let csv = "\
Fecha de Emisión;Punto de Venta;Número Desde;Imp. Total;Denominación Emisor
15/01/2024;10;123;5000,00;PROVEEDORA DEL SUR S.A.
";
    let ledger_rows = ledger::consolidate(&[LedgerFile {
        name: "ACME_mcr_202401 recibidos.csv".to_string(),
        content: csv.to_string(),
    }]);
    let authority = prepare_authority_rows(&ledger_rows);
    assert_eq!(authority.len(), 1);
    assert_eq!(authority[0].key.key3, "00010000001235000ACME45306");

    let aliases = vec![EntityAlias {
        label: "acme".to_string(),
        legal_name: "ACME".to_string(),
    }];
    let internal = prepare_internal_rows(
        &[internal_row("10-123", "acme", "5000.49", "15/01/2024")],
        &aliases,
    );

    let (internal_result, authority_result) = reconcile(internal, authority, &[]);
    assert_eq!(internal_result[0].diagnosis, Diagnosis::Matched);
    assert_eq!(authority_result[0].diagnosis, Diagnosis::Matched);
    assert_eq!(
        authority_result[0].diagnosis.label(Side::Authority),
        "OK - Matcheado"
    );
}

#[test]
fn empty_authority_ledger_reports_all_internal_rows_missing() {
    let internal = prepare_internal_rows(
        &[
            internal_row("10-123", "acme", "5000", "15/01/2024"),
            internal_row("10-124", "acme", "900", "16/01/2024"),
        ],
        &[],
    );

    let (internal_result, authority_result) = reconcile(internal, Vec::new(), &[]);
    assert_eq!(internal_result.len(), 2);
    assert!(internal_result
        .iter()
        .all(|d| d.diagnosis == Diagnosis::MissingOrAmountMismatch));
    assert!(authority_result.is_empty());
}
