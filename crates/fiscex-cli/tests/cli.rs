//! CLI integration tests.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn fiscex() -> Command {
    Command::cargo_bin("fiscex").unwrap()
}

#[test]
fn test_help() {
    fiscex()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("consolidate"))
        .stdout(predicate::str::contains("reconcile"));
}

#[test]
fn test_process_invoice_text_to_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("factura.txt");
    fs::write(
        &input,
        "FACTURA\nFecha de Emisión: 15/03/2024\nImporte Total: $ 1.234,56\nCAE N°: 74123456789012\n",
    )
    .unwrap();

    fiscex()
        .arg("process")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Tipo_Comprobante\": \"FACTURA\""))
        .stdout(predicate::str::contains("\"Importe_Total\": \"1234.56\""));
}

#[test]
fn test_process_missing_file_fails() {
    fiscex()
        .arg("process")
        .arg("no-existe.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_consolidate_writes_standardized_csv() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("ACME_mcr_202401 recibidos.csv");
    fs::write(
        &input,
        "Fecha de Emisión;Punto de Venta;Número Desde;Imp. Total\n15/01/2024;10;123;5000,00\n",
    )
    .unwrap();
    let output = dir.path().join("salida");

    fiscex()
        .arg("consolidate")
        .arg(input.to_str().unwrap())
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let content = fs::read_to_string(output.join("comprobantes_consolidado.csv")).unwrap();
    assert!(content.contains("MC,Contribuyente"));
    assert!(content.contains("MCR,ACME"));
    // The drifted amount header landed on the canonical name.
    assert!(content.contains("Importe Total"));
}

#[test]
fn test_reconcile_end_to_end() {
    let dir = tempfile::tempdir().unwrap();

    let config = dir.path().join("config.json");
    fs::write(
        &config,
        r#"{"reconcile": {"entity_aliases": [{"label": "acme", "legal_name": "ACME"}]}}"#,
    )
    .unwrap();

    let internal = dir.path().join("interno.csv");
    fs::write(
        &internal,
        "Nro,Nro de Factura,Etiquetas,Total Factura,Fecha Vto.,Proveedor\n\
         1,10-123,acme,5000,15/01/2024,PROVEEDORA DEL SUR S.A.\n",
    )
    .unwrap();

    let authority = dir.path().join("consolidado.csv");
    fs::write(
        &authority,
        "MC,Contribuyente,Fecha de Emisión,Punto de Venta,Número Desde,Importe Total\n\
         MCR,ACME,15/01/2024,10,123,\"5000,00\"\n",
    )
    .unwrap();

    let output = dir.path().join("salida");

    fiscex()
        .arg("--config")
        .arg(&config)
        .arg("reconcile")
        .arg("--internal")
        .arg(&internal)
        .arg("--authority")
        .arg(&authority)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let interna = fs::read_to_string(output.join("conciliacion_interna.csv")).unwrap();
    assert!(interna.contains("OK - Matcheado"));
    assert!(interna.contains("Válido"));

    let autoridad = fs::read_to_string(output.join("conciliacion_autoridad.csv")).unwrap();
    assert!(autoridad.contains("OK - Matcheado"));
}
