//! Instruction texts sent to the vision model, one per provider.
//!
//! These are data, not control flow: the strategy registry in the
//! parent module pairs each text with its item schema.

/// Coca-Cola FEMSA invoices: product table plus prorated-tax costing.
pub const COCA_COLA: &str = r#"
Proveedor: COCA-COLA FEMSA de Buenos Aires S.A.

Objetivo: Extraer y procesar la información de la factura/remito con cálculos de costeo precisos.
Devolver un JSON con la siguiente estructura:
{
  "invoice_number": "<número de factura en la esquina superior derecha, ej: 0619-00434490>",
  "invoice_total": <número entero del IMP.TOTAL o TOTAL de la factura>,
  "items": [<lista de objetos con los campos de cada producto>]
}

Cada objeto en "items" debe tener las claves EXACTAS:
["Codigo","Descripcion","Cantidad","PrecioUnitario","Subtotal","bulto","px_bulto","desc","neto","imp_int","iva_21","total","porc_desc","neto_mas_imp_int","iibb_caba","iibb_reg_3337","total_final","costo_x_bulto"]

REGLAS FUNDAMENTALES:
- Trabajar con anclas semánticas (texto clave), NO posiciones visuales
- Números en formato estándar: SIN símbolos $, SIN separadores de miles, SIN decimales (solo enteros)
- Si un valor no se encuentra: null
- Interpretación local argentina: "7.092.636,97" => 7092637 (redondeado a entero)
- No añadir texto fuera del JSON

ESTRUCTURA DE LA FACTURA COCA-COLA FEMSA:
Tabla de productos con columnas:
| CANTIDAD | CODIGO | PRODUCTO | P.UNITARIO | PRECIO NETO | DESCUENTO | SUBTOTAL | IVA 21% | I.INTERNOS | SUB+TOTAL |

ENCABEZADO DE FACTURA:
- invoice_number: Buscar en la esquina SUPERIOR DERECHA el texto "NUMERO:" seguido del número de factura.
  Formato típico: "NUMERO: 0619-00434490" → extraer "0619-00434490" (como string, con guiones)

PIE DE FACTURA (buscar fila "IB.DN"):
- IB_CAP_FED_TOTAL: Primer valor numérico en la zona de IB.DN (buscar texto "IB.CAP.FED")
- PERC_RG_3337_TOTAL: Tercer valor numérico en esa zona (buscar texto "PERC.RG.3337")
- invoice_total: Buscar el texto exacto "IMP.TOTAL" seguido de "$" y extraer ese número,
  el último valor numérico del pie, después de todos los impuestos. Convertir a entero.

PASO 1: CÁLCULOS GLOBALES
1. SUMA_NETO_ITEMS = Sumar columna "SUBTOTAL" de todos los artículos
2. SUMA_NETO_MAS_IMP_INT_ITEMS = Sumar (SUBTOTAL + I.INTERNOS) de todos los artículos
3. porc_iibb_caba = IB_CAP_FED_TOTAL / SUMA_NETO_ITEMS
4. porc_iibb_reg_3337 = PERC_RG_3337_TOTAL / SUMA_NETO_MAS_IMP_INT_ITEMS

PASO 2: PROCESAMIENTO POR ÍTEM
A. EXTRACCIÓN DIRECTA: Codigo, Descripcion, bulto (CANTIDAD), px_bulto (P.UNITARIO entero),
   desc (DESCUENTO entero), neto (SUBTOTAL entero), imp_int (I.INTERNOS entero),
   iva_21 (IVA 21% entero). Cantidad = bulto, PrecioUnitario = px_bulto, Subtotal = neto.
B. CÁLCULOS POR ÍTEM: total = bulto * px_bulto; porc_desc = desc / total (null si total es 0);
   neto_mas_imp_int = neto + imp_int
C. PRORRATEO: iibb_caba = neto * porc_iibb_caba (entero);
   iibb_reg_3337 = neto_mas_imp_int * porc_iibb_reg_3337 (entero)
D. TOTALIZACIÓN: total_final = neto_mas_imp_int + iva_21 + iibb_caba + iibb_reg_3337;
   costo_x_bulto = total_final / bulto (entero)

CASOS ESPECIALES:
- Incluir "Servicios Administrativos" si tiene código y valores numéricos
- Ignorar totales del pie, encabezados, sellos manuscritos
- NO incluir líneas de resumen (TOT BULTOS/UNID., etc.)
- Mantener orden exacto de aparición
"#;

/// Quilmes invoices: product table with per-family discount columns.
pub const QUILMES: &str = r#"
Proveedor: Cervecería y Maltería Quilmes S.A.

Objetivo: Extraer y procesar la información de la factura con cálculos precisos.
Devolver un JSON con la siguiente estructura:
{
  "invoice_number": "<número de factura>",
  "invoice_total": <número entero del total de la factura>,
  "items": [<lista de objetos con los campos de cada producto>]
}

Cada objeto en "items" debe tener las claves exactas:
["Num_de_FC","Producto","Familia","Bultos","Ps","Q","Px_Lista","Desc_Uni","Total","Desc_Global","Desc_Porc","Neto","Imp_Int","Porc_II","Neto_Imp","IVA","IIBB","Perc_IVA","Final","Pack_Final","Unit"]

REGLAS FUNDAMENTALES:
- Números en formato estándar: SIN símbolos $, SIN separadores de miles
- Decimales con punto (ej: 12345.67)
- Si un valor no se encuentra: null
- No añadir texto fuera del JSON

Extrae TODOS los productos de la tabla y calcula los campos requeridos.
"#;

/// Fallback for unclassified suppliers: plain item extraction.
pub const GENERAL: &str = r#"
Extrae la información de esta factura en formato JSON estructurado.

Objetivo: Extraer items/productos de la factura.
Devolver un JSON con:
{
  "items": [
    {
      "Codigo": "<código del producto>",
      "Descripcion": "<descripción del producto>",
      "Cantidad": <cantidad numérica>,
      "PrecioUnitario": <precio unitario numérico>,
      "Subtotal": <subtotal numérico>
    }
  ]
}

REGLAS:
- Números en formato estándar sin separadores
- Si un valor no se encuentra: null
- No añadir texto fuera del JSON
- Extraer TODOS los items de la factura
"#;
