mod common;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use flores_shared::invoice::FacturacionForm;
use flores_shared::{FacturacionError, Facturacion, FormMode, Method, VistaEnvio};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn envio(id_envios: i32, id_cliente: i32, costo: i64) -> VistaEnvio {
    VistaEnvio {
        id_envios,
        id_cliente,
        costo: Decimal::new(costo, 0),
        ..Default::default()
    }
}

fn shipments() -> Vec<VistaEnvio> {
    vec![envio(1, 10, 1500), envio(2, 20, 800), envio(3, 20, 950)]
}

#[test]
fn blank_form_defaults_to_today_and_pending() {
    common::init_test_logging();
    let form = FacturacionForm::blank(today());
    assert_eq!(form.fecha_factura, "2024-06-15");
    assert_eq!(form.estado_pago, "Pendiente");
    assert_eq!(form.mode(), FormMode::Create);
}

#[test]
fn single_shipment_client_is_auto_filled() {
    let mut form = FacturacionForm::blank(today());
    form.load_shipments(shipments());

    form.select_client(10);
    assert_eq!(form.id_envio, 1);
    assert_eq!(form.monto_total, Decimal::new(1500, 0));
}

#[test]
fn several_shipments_reset_selection_until_one_is_picked() {
    let mut form = FacturacionForm::blank(today());
    form.load_shipments(shipments());
    form.select_client(10);

    form.select_client(20);
    assert_eq!(form.client_shipments().len(), 2);
    assert_eq!(form.id_envio, 0);
    assert_eq!(form.monto_total, Decimal::ZERO);

    form.select_shipment(3);
    assert_eq!(form.id_envio, 3);
    assert_eq!(form.monto_total, Decimal::new(950, 0));
}

#[test]
fn no_client_means_no_shipments() {
    let mut form = FacturacionForm::blank(today());
    form.load_shipments(shipments());
    form.select_client(0);
    assert!(form.client_shipments().is_empty());
    assert_eq!(form.id_envio, 0);
}

#[test]
fn validation_reports_the_first_missing_field() {
    let mut form = FacturacionForm::blank(today());
    form.load_shipments(shipments());
    assert_eq!(form.validate(), Err(FacturacionError::ClienteRequerido));

    form.select_client(20);
    form.fecha_factura = "  ".into();
    assert_eq!(form.validate(), Err(FacturacionError::FechaRequerida));

    form.fecha_factura = "2024-06-15".into();
    assert_eq!(form.validate(), Err(FacturacionError::MontoInvalido));
    assert_eq!(
        form.validate().unwrap_err().to_string(),
        "El monto total debe ser mayor que cero"
    );

    form.monto_total = Decimal::new(100, 0);
    assert_eq!(form.validate(), Err(FacturacionError::EnvioRequerido));

    form.select_shipment(2);
    assert_eq!(form.validate(), Ok(()));
}

#[test]
fn new_invoice_posts_without_id() {
    let mut form = FacturacionForm::blank(today());
    form.load_shipments(shipments());
    form.select_client(10);

    let request = form.request().unwrap();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.path, "Facturacion/Nuevo");
    let body = request.body.unwrap();
    assert!(body.get("IdFacturacion").is_none());
    assert_eq!(body["IdEnvio"], 1);
    assert_eq!(body["FechaFactura"], "2024-06-15");
}

#[test]
fn edited_invoice_keeps_its_shipment_after_loading() {
    let factura = Facturacion {
        id_facturacion: 99,
        id_cliente: 20,
        fecha_factura: "2024-05-02T00:00:00".into(),
        monto_total: Decimal::new(800, 0),
        estado_pago: "Pagado".into(),
        id_envio: 2,
        ..Default::default()
    };
    let mut form = FacturacionForm::from_record(&factura);
    form.load_shipments(shipments());

    assert_eq!(form.id_envio, 2);
    assert_eq!(form.fecha_factura, "2024-05-02");

    let request = form.request().unwrap();
    assert_eq!(request.method, Method::Put);
    assert_eq!(request.path, "Facturacion/Editar");
    assert_eq!(request.body.unwrap()["IdFacturacion"], 99);
}

#[test]
fn invalid_form_plans_no_request() {
    let form = FacturacionForm::blank(today());
    assert_eq!(form.request(), Err(FacturacionError::ClienteRequerido));
}
