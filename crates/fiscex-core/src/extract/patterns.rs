//! Regex tables for the document extraction strategies.
//!
//! Anchored to the labels the fixed-template sources actually print;
//! accent variants are accepted because PDF-to-text output is not
//! consistent about them.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // ---- generic invoice ----

    pub static ref FECHA_EMISION: Regex = Regex::new(
        r"(?is)Fecha\s+de\s+Emisi[oó]n:\s*.*?(\d{2}/\d{2}/\d{4})"
    ).unwrap();

    pub static ref ANY_DATE: Regex = Regex::new(
        r"\b(\d{2}/\d{2}/\d{4})\b"
    ).unwrap();

    // Issuer line: company name ending in an S.A. suffix on its own line.
    pub static ref RAZON_SOCIAL_EMISOR: Regex = Regex::new(
        r"\n\s*([A-ZÁÉÍÓÚÑ0-9 .&]+S\. ?A\.)\s*\n"
    ).unwrap();

    pub static ref CUIT: Regex = Regex::new(
        r"\b(\d{11})\b"
    ).unwrap();

    // CUIT followed on the same line by the holder's name.
    pub static ref CUIT_CON_NOMBRE: Regex = Regex::new(
        r"\b(\d{11})\b\s+([A-ZÁÉÍÓÚÑ][A-Z0-9ÁÉÍÓÚÑ .,&]*)"
    ).unwrap();

    // "Punto de Venta: 00002   Comp. Nro: 00000407"
    pub static ref PUNTO_VENTA_COMP: Regex = Regex::new(
        r"(?i)Punto\s*de\s*Venta:\s*([0-9]{1,5})\s+Comp\.\s*Nro:\s*([0-9]{1,8})"
    ).unwrap();

    pub static ref IMPORTE_NETO_GRAVADO: Regex = labeled_amount(r"Importe\s+Neto\s+Gravado:");
    pub static ref IMPORTE_OTROS_TRIBUTOS: Regex = labeled_amount(r"Importe\s+Otros\s+Tributos:");
    pub static ref IMPORTE_TOTAL: Regex = labeled_amount(r"Importe\s+Total:");

    /// VAT-rate buckets in the order they appear on the voucher.
    pub static ref VAT_BUCKETS: Vec<(&'static str, Regex)> = [
        ("IVA_27", "27"),
        ("IVA_21", "21"),
        ("IVA_10_5", r"10\.5"),
        ("IVA_5", "5"),
        ("IVA_2_5", r"2\.5"),
        ("IVA_0", "0"),
    ]
    .iter()
    .map(|(field, rate)| (*field, labeled_amount(&format!(r"IVA\s+{rate}%:"))))
    .collect();

    pub static ref CAE: Regex = Regex::new(
        r"(?i)CAE\s*N[°º]:\s*\n?\s*([0-9]+)"
    ).unwrap();

    pub static ref CAE_VENCIMIENTO: Regex = Regex::new(
        r"(?i)Fecha\s+de\s+Vto\.\s+de\s+CAE:\s*\n?\s*(\d{2}/\d{2}/\d{4})"
    ).unwrap();

    // ---- card settlement ----

    pub static ref TOTAL_PRESENTADO: Regex = Regex::new(
        r"(?i)TOTAL\s+PRESENTADO\s+\$\s*([\d.,]+)"
    ).unwrap();

    pub static ref TOTAL_DESCUENTO: Regex = Regex::new(
        r"(?i)TOTAL\s+DESCUENTO\s+\$\s*([\d.,]+)"
    ).unwrap();

    pub static ref SALDO: Regex = Regex::new(
        r"(?i)SALDO\s+\$\s*([\d.,]+)"
    ).unwrap();

    pub static ref SETTLEMENT_IVA_21: Regex = Regex::new(
        r"(?i)IVA\s+21[.,]?00\s*%?\s*\$?\s*([\d.,]+)"
    ).unwrap();

    pub static ref RETENCION_IB: Regex = Regex::new(
        r"(?i)Ret\.?\s*IB\s+CAP\.?\s*FED\.?\s*[\d.,]+\s*%?\s*\$?\s*([\d.,]+)"
    ).unwrap();

    pub static ref PERCEPCION_AFIP: Regex = Regex::new(
        r"(?i)Percep\.?/?Retenc\.?\s*AFIP\s*-?\s*DGI\s*\$?\s*([\d.,]+)"
    ).unwrap();

    // ---- tax declaration (DDJJ) ----

    pub static ref DDJJ_CUIT: Regex = Regex::new(
        r"(?i)CUIT\s+Nro:\s*(\d+)"
    ).unwrap();

    pub static ref DDJJ_RAZON_SOCIAL: Regex = Regex::new(
        r"(?i)Apellido\s+y\s+Nombre\s+o\s+Raz[oó]n\s+Social:\s*([^\n]+)"
    ).unwrap();

    pub static ref DDJJ_FECHA_PRESENTACION: Regex = Regex::new(
        r"(?i)Fecha\s+de\s+Presentaci[oó]n:\s*(\d{2}/\d{2}/\d{4})"
    ).unwrap();

    pub static ref DDJJ_HORA: Regex = Regex::new(
        r"(?i)Hora:\s*(\d{2}:\d{2})"
    ).unwrap();

    /// DDJJ monetary fields, in declaration order: output field name
    /// to the labeled-amount pattern that locates it.
    pub static ref DDJJ_AMOUNTS: Vec<(&'static str, Regex)> = [
        ("Debito_Fiscal", r"Total\s+del\s+D[eé]bito\s+Fiscal"),
        ("Credito_Fiscal", r"Total\s+del\s+Cr[eé]dito\s+Fiscal"),
        ("Ajuste_Exentos", r"Ajuste\s+Anual\s+del\s+cr[eé]dito\s+fiscal\s+por\s+operaciones\s+exentas.?"),
        ("Responsable_Exento", r"A\s+favor\s+del\s+Responsable"),
        ("Reduccion_Art12", r"cumplidores-Art\.12"),
        ("Saldo_Tecnico_Responsable_Anterior", r"Saldo\s+T[eé]cnico\s+a\s+Favor\s+del\s+Responsable\s+del\s+Per[ií]odo\s+anterior"),
        ("Traslado_Saldos", r"Saldo\s+T[eé]cnico\s+a\s+favor\s+por\s+traslado\s+de\s+saldos"),
        ("Disminucion_VPU", r"traslado\s+de\s+saldo\s+a\s+VPU"),
        ("Saldo_Tecnico_Responsable_Actual", r"Saldo\s+T[eé]cnico\s+a\s+Favor\s+del\s+Responsable\s+del\s+Per[ií]odo"),
        ("Saldo_Tecnico_Fisco_Subtotal", r"Subtotal\s+Saldo\s+T[eé]cnico\s+a\s+Favor\s+de\s+ARCA\s+del\s+Per[ií]odo"),
        ("Diferimiento_518", r"Diferimiento\s+F\.\s*518"),
        ("Bonos_Fiscales", r"Bonos\s+Fiscales.?"),
        ("Saldo_Tecnico_Fisco", r"Saldo\s+t[eé]cnico\s+a\s+favor\s+de\s+ARCA"),
        ("Libre_Disponibilidad_Anterior", r"disponibilidad\s+del\s+per[ií]odo\s+anterior"),
        ("Monto_Utilizado_Periodo", r"Total\s+del\s+monto\s+utilizado\s+del\s+per[ií]odo"),
        ("Retenciones_Percepciones_Pagos", r"Total\s+de\s+retenciones,\s+percepciones\s+y\s+pagos\s+a\s+cuenta\s+computables\s+en\s+el\s+per[ií]odo\s+neto\s+de\s+restituciones"),
        ("Libre_Disponibilidad_Traslado", r"Saldo\s+de\s+libre\s+disponibilidad\s+por\s+traslado\s+de\s+saldos"),
        ("Libre_Disponibilidad_Contribuyente", r"Saldo\s+de\s+Libre\s+Disponibilidad\s+a\s+favor\s+del\s+contribuyente\s+del\s+per[ií]odo"),
        ("Saldo_Impuesto_Fisco", r"Saldo\s+del\s+Impuesto\s+a\s+Favor\s+de\s+ARCA"),
    ]
    .iter()
    .map(|(field, label)| (*field, labeled_amount(label)))
    .collect();
}

/// Build a "Label $ value" pattern: optional currency sign, value may
/// wrap to the next line.
fn labeled_amount(label: &str) -> Regex {
    Regex::new(&format!(r"(?is){label}\s*\$?\s*(?:\n\s*)?([\d.,]+)")).unwrap()
}
