//! Invoice form state and the printable invoice document.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::api::{ApiRequest, FormMode, date_part, submit_request};
use crate::error::FacturacionError;
use crate::models::{DetalleFacturacion, Facturacion, VistaEnvio};

/// `#000042`
pub fn numero_factura(id_facturacion: i32) -> String {
    format!("#{id_facturacion:06}")
}

/// `$1234.50`
pub fn formato_monto(monto: Decimal) -> String {
    format!("${:.2}", monto.round_dp(2))
}

/// Short Spanish date (`1/6/2024`). Values that are not ISO dates are returned
/// unchanged.
pub fn fecha_es(value: &str) -> String {
    match NaiveDate::parse_from_str(date_part(value), "%Y-%m-%d") {
        Ok(date) => format!("{}/{}/{}", date.day(), date.month(), date.year()),
        Err(_) => value.to_string(),
    }
}

// ============================================
// Form state
// ============================================

/// Working copy of the invoice modal.
///
/// Picking a client narrows the shipment list to that client's shipments and,
/// when there is exactly one, selects it and takes its cost as the amount.
#[derive(Debug, Clone, PartialEq)]
pub struct FacturacionForm {
    pub id_facturacion: Option<i32>,
    pub id_cliente: i32,
    pub fecha_factura: String,
    pub monto_total: Decimal,
    pub estado_pago: String,
    pub id_envio: i32,
    envios: Vec<VistaEnvio>,
}

impl FacturacionForm {
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            id_facturacion: None,
            id_cliente: 0,
            fecha_factura: today.format("%Y-%m-%d").to_string(),
            monto_total: Decimal::ZERO,
            estado_pago: "Pendiente".to_string(),
            id_envio: 0,
            envios: Vec::new(),
        }
    }

    pub fn from_record(factura: &Facturacion) -> Self {
        let estado_pago = if factura.estado_pago.is_empty() {
            "Pendiente".to_string()
        } else {
            factura.estado_pago.clone()
        };
        Self {
            id_facturacion: Some(factura.id_facturacion),
            id_cliente: factura.id_cliente,
            fecha_factura: date_part(&factura.fecha_factura).to_string(),
            monto_total: factura.monto_total,
            estado_pago,
            id_envio: factura.id_envio,
            envios: Vec::new(),
        }
    }

    pub fn mode(&self) -> FormMode {
        FormMode::for_record(self.id_facturacion.as_ref())
    }

    /// Replaces the known shipments. The current selection is kept so an
    /// invoice being edited keeps its shipment and amount.
    pub fn load_shipments(&mut self, envios: Vec<VistaEnvio>) {
        self.envios = envios;
    }

    /// Shipments of the selected client.
    pub fn client_shipments(&self) -> Vec<&VistaEnvio> {
        if self.id_cliente <= 0 {
            return Vec::new();
        }
        self.envios
            .iter()
            .filter(|envio| envio.id_cliente == self.id_cliente)
            .collect()
    }

    pub fn select_client(&mut self, id_cliente: i32) {
        self.id_cliente = id_cliente;
        self.id_envio = 0;
        self.monto_total = Decimal::ZERO;

        let only = match self.client_shipments().as_slice() {
            [only] => Some((only.id_envios, only.costo)),
            _ => None,
        };
        if let Some((id_envio, costo)) = only {
            self.id_envio = id_envio;
            self.monto_total = costo;
        }
    }

    pub fn select_shipment(&mut self, id_envio: i32) {
        self.id_envio = id_envio;
        if id_envio <= 0 {
            return;
        }
        if let Some(envio) = self.envios.iter().find(|e| e.id_envios == id_envio) {
            self.monto_total = envio.costo;
        }
    }

    pub fn validate(&self) -> Result<(), FacturacionError> {
        if self.id_cliente <= 0 {
            return Err(FacturacionError::ClienteRequerido);
        }
        if self.fecha_factura.trim().is_empty() {
            return Err(FacturacionError::FechaRequerida);
        }
        if self.monto_total <= Decimal::ZERO {
            return Err(FacturacionError::MontoInvalido);
        }
        if self.id_envio <= 0 {
            return Err(FacturacionError::EnvioRequerido);
        }
        Ok(())
    }

    pub fn to_record(&self) -> Facturacion {
        Facturacion {
            id_facturacion: self.id_facturacion.unwrap_or_default(),
            id_cliente: self.id_cliente,
            fecha_factura: self.fecha_factura.clone(),
            monto_total: self.monto_total,
            estado_pago: self.estado_pago.clone(),
            id_envio: self.id_envio,
            ..Default::default()
        }
    }

    /// Validated create or update request.
    pub fn request(&self) -> Result<ApiRequest, FacturacionError> {
        self.validate()?;
        Ok(submit_request(&self.to_record(), self.mode())?)
    }
}

// ============================================
// Printable invoice
// ============================================

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const INVOICE_STYLE: &str = r#"
    body { font-family: Arial, sans-serif; margin: 0; padding: 20px; color: #333; }
    .header { display: flex; justify-content: space-between; align-items: center; border-bottom: 3px solid #2c5aa0; padding-bottom: 20px; margin-bottom: 30px; }
    .logo { font-size: 24px; font-weight: bold; color: #2c5aa0; }
    .invoice-title { font-size: 32px; font-weight: bold; color: #2c5aa0; }
    .info-section { display: flex; justify-content: space-between; margin-bottom: 30px; }
    .info-box { width: 45%; }
    .info-box h3 { margin: 0 0 10px 0; color: #2c5aa0; border-bottom: 1px solid #ddd; padding-bottom: 5px; }
    .info-box p { margin: 5px 0; }
    .table { width: 100%; border-collapse: collapse; margin: 20px 0; }
    .table th, .table td { border: 1px solid #ddd; padding: 12px; text-align: left; }
    .table th { background-color: #2c5aa0; color: white; font-weight: bold; }
    .table tr:nth-child(even) { background-color: #f9f9f9; }
    .total-section { margin-top: 30px; text-align: right; }
    .total-box { display: inline-block; border: 2px solid #2c5aa0; padding: 20px; background-color: #f8f9fa; }
    .total-amount { font-size: 24px; font-weight: bold; color: #2c5aa0; }
    .footer { margin-top: 50px; text-align: center; color: #666; font-size: 12px; border-top: 1px solid #ddd; padding-top: 20px; }
    .status { display: inline-block; padding: 5px 15px; border-radius: 20px; font-weight: bold; text-transform: uppercase; }
    .status.pagado { background-color: #d4edda; color: #155724; }
    .status.pendiente { background-color: #fff3cd; color: #856404; }
    .status.vencido, .status.cancelado { background-color: #f8d7da; color: #721c24; }
"#;

/// Standalone HTML document for the browser's print dialog.
pub fn render_invoice_html(
    factura: &Facturacion,
    detalles: &[DetalleFacturacion],
    now: NaiveDateTime,
) -> String {
    let rows = if detalles.is_empty() {
        invoice_row("Servicio de envío", factura.monto_total)
    } else {
        detalles
            .iter()
            .map(|detalle| invoice_row(&detalle.detalle, detalle.precio))
            .collect()
    };

    let emitida = format!("{}/{}/{}", now.day(), now.month(), now.year());
    let generada = format!("{}, {}", emitida, now.format("%H:%M:%S"));

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <title>Factura {id}</title>
  <style>{style}</style>
</head>
<body>
  <div class="header">
    <div class="logo">TRANSPORTE FLORES</div>
    <div class="invoice-title">FACTURA</div>
  </div>
  <div class="info-section">
    <div class="info-box">
      <h3>Información de Factura</h3>
      <p><strong>Número:</strong> {numero}</p>
      <p><strong>Fecha:</strong> {fecha}</p>
      <p><strong>Estado:</strong> <span class="status {estado_class}">{estado}</span></p>
      <p><strong>ID Envío:</strong> #{id_envio}</p>
    </div>
    <div class="info-box">
      <h3>Información del Cliente</h3>
      <p><strong>Cliente:</strong> {cliente}</p>
      <p><strong>ID Cliente:</strong> {id_cliente}</p>
      <p><strong>Fecha de Emisión:</strong> {emitida}</p>
    </div>
  </div>
  <h3>Detalles del Servicio</h3>
  <table class="table">
    <thead>
      <tr><th>Descripción</th><th style="text-align: right;">Precio</th></tr>
    </thead>
    <tbody>{rows}</tbody>
  </table>
  <div class="total-section">
    <div class="total-box">
      <p style="margin: 0 0 10px 0;">TOTAL A PAGAR</p>
      <div class="total-amount">{total}</div>
    </div>
  </div>
  <div class="footer">
    <p>Gracias por confiar en nuestros servicios de envío</p>
    <p>Esta factura fue generada automáticamente el {generada}</p>
  </div>
</body>
</html>"#,
        id = factura.id_facturacion,
        style = INVOICE_STYLE,
        numero = numero_factura(factura.id_facturacion),
        fecha = escape_html(&fecha_es(&factura.fecha_factura)),
        estado_class = escape_html(&factura.estado_pago.to_lowercase()),
        estado = escape_html(&factura.estado_pago),
        id_envio = factura.id_envio,
        cliente = escape_html(&factura.nombre_cliente),
        id_cliente = factura.id_cliente,
        emitida = emitida,
        rows = rows,
        total = formato_monto(factura.monto_total),
        generada = generada,
    )
}

fn invoice_row(detalle: &str, precio: Decimal) -> String {
    format!(
        r#"<tr><td>{}</td><td style="text-align: right;">{}</td></tr>"#,
        escape_html(detalle),
        formato_monto(precio)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invoice_number_is_zero_padded() {
        assert_eq!(numero_factura(42), "#000042");
        assert_eq!(numero_factura(1234567), "#1234567");
    }

    #[test]
    fn amounts_have_two_decimals() {
        assert_eq!(formato_monto(Decimal::new(12345, 1)), "$1234.50");
        assert_eq!(formato_monto(Decimal::ZERO), "$0.00");
    }

    #[test]
    fn dates_use_day_month_year() {
        assert_eq!(fecha_es("2024-06-01T00:00:00"), "1/6/2024");
        assert_eq!(fecha_es("sin fecha"), "sin fecha");
    }

    #[test]
    fn printable_invoice_escapes_client_name() {
        let factura = Facturacion {
            id_facturacion: 7,
            nombre_cliente: "Fletes <Norte> & Hijos".into(),
            monto_total: Decimal::new(800, 0),
            ..Default::default()
        };
        let now = NaiveDate::from_ymd_opt(2024, 6, 2)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();

        let html = render_invoice_html(&factura, &[], now);
        assert!(html.contains("Fletes &lt;Norte&gt; &amp; Hijos"));
        assert!(html.contains("Servicio de envío"));
        assert!(html.contains("#000007"));
        assert!(html.contains("2/6/2024, 09:30:00"));
    }

    #[test]
    fn printable_invoice_lists_each_detail() {
        let factura = Facturacion {
            id_facturacion: 9,
            monto_total: Decimal::new(170050, 2),
            ..Default::default()
        };
        let detalles = [
            DetalleFacturacion {
                id_detalle_facturacion: 1,
                detalle: "Flete <Culiacán>".into(),
                precio: Decimal::new(150050, 2),
            },
            DetalleFacturacion {
                id_detalle_facturacion: 2,
                detalle: "Seguro & manejo".into(),
                precio: Decimal::new(200, 0),
            },
        ];
        let now = NaiveDate::from_ymd_opt(2024, 6, 2)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();

        let html = render_invoice_html(&factura, &detalles, now);
        assert!(html.contains("<td>Flete &lt;Culiacán&gt;</td>"));
        assert!(html.contains("<td>Seguro &amp; manejo</td>"));
        assert!(html.contains(">$1500.50</td>"));
        assert!(html.contains(">$200.00</td>"));
        assert!(html.contains("$1700.50"));
        assert!(!html.contains("Servicio de envío"));
    }
}
