use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::table::TableRecord;

// ============================================
// Deserialization helpers
// ============================================

/// The backend sends `null` for columns it has no value for; treat those like a
/// missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn desconocido() -> String {
    "Desconocido".to_string()
}

fn null_as_desconocido<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(desconocido))
}

fn cliente_desconocido() -> String {
    "Cliente Desconocido".to_string()
}

fn null_as_cliente_desconocido<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(cliente_desconocido))
}

fn pendiente() -> String {
    "Pendiente".to_string()
}

fn null_as_pendiente<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(pendiente))
}

fn current_year() -> i32 {
    use chrono::Datelike;
    chrono::Local::now().year()
}

fn opt_to_string<T: ToString>(value: &Option<T>) -> Option<String> {
    value.as_ref().map(ToString::to_string)
}

// ============================================
// Clientes
// ============================================

pub const TIPOS_CLIENTE: [&str; 3] = ["Regular", "Premium", "VIP"];

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Cliente {
    #[serde(deserialize_with = "null_as_default")]
    pub id_clientes: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub nombre_cliente: String,
    #[serde(deserialize_with = "null_as_default")]
    pub direccion: String,
    #[serde(deserialize_with = "null_as_default")]
    pub telefono: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tipo_cliente: String,
}

impl TableRecord for Cliente {
    fn record_id(&self) -> i32 {
        self.id_clientes
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            "idClientes" => Some(self.id_clientes.to_string()),
            "nombreCliente" => Some(self.nombre_cliente.clone()),
            "direccion" => Some(self.direccion.clone()),
            "telefono" => Some(self.telefono.clone()),
            "email" => Some(self.email.clone()),
            "tipoCliente" => Some(self.tipo_cliente.clone()),
            _ => None,
        }
    }
}

// ============================================
// Unidades
// ============================================

pub const ESTADOS_UNIDAD: [&str; 3] = ["Disponible", "En Ruta", "Mantenimiento"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Unidad {
    #[serde(deserialize_with = "null_as_default")]
    pub id_unidades: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub tipo_unidad: String,
    #[serde(deserialize_with = "null_as_default")]
    pub placa: String,
    #[serde(deserialize_with = "null_as_default")]
    pub marca: String,
    #[serde(deserialize_with = "null_as_default")]
    pub modelo: String,
    #[serde(rename = "año", deserialize_with = "null_as_default")]
    pub anio: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub estado: String,
    #[serde(deserialize_with = "null_as_default")]
    pub kilometraje_actual: f64,
}

impl Default for Unidad {
    fn default() -> Self {
        Self {
            id_unidades: 0,
            tipo_unidad: String::new(),
            placa: String::new(),
            marca: String::new(),
            modelo: String::new(),
            anio: current_year(),
            estado: String::new(),
            kilometraje_actual: 0.0,
        }
    }
}

impl TableRecord for Unidad {
    fn record_id(&self) -> i32 {
        self.id_unidades
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            "idUnidades" => Some(self.id_unidades.to_string()),
            "tipoUnidad" => Some(self.tipo_unidad.clone()),
            "placa" => Some(self.placa.clone()),
            "marca" => Some(self.marca.clone()),
            "modelo" => Some(self.modelo.clone()),
            "año" => Some(self.anio.to_string()),
            "estado" => Some(self.estado.clone()),
            "kilometrajeActual" => Some(self.kilometraje_actual.to_string()),
            _ => None,
        }
    }
}

// ============================================
// Conductores
// ============================================

pub const ESTADO_ACTIVO: &str = "Activo";
pub const ESTADO_INACTIVO: &str = "Inactivo";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Conductor {
    #[serde(deserialize_with = "null_as_default")]
    pub id_conductores: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub nombre: String,
    #[serde(deserialize_with = "null_as_default")]
    pub licencia: String,
    pub fecha_ingreso: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub estado: String,
    #[serde(deserialize_with = "null_as_default")]
    pub telefono: String,
    pub id_vehiculo: Option<i32>,
}

impl Default for Conductor {
    fn default() -> Self {
        Self {
            id_conductores: 0,
            nombre: String::new(),
            licencia: String::new(),
            fecha_ingreso: None,
            estado: ESTADO_ACTIVO.to_string(),
            telefono: String::new(),
            id_vehiculo: None,
        }
    }
}

impl Conductor {
    pub fn is_active(&self) -> bool {
        self.estado == ESTADO_ACTIVO
    }

    /// The status the toggle button switches to.
    pub fn next_estado(&self) -> &'static str {
        if self.is_active() {
            ESTADO_INACTIVO
        } else {
            ESTADO_ACTIVO
        }
    }
}

impl TableRecord for Conductor {
    fn record_id(&self) -> i32 {
        self.id_conductores
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            "idConductores" => Some(self.id_conductores.to_string()),
            "nombre" => Some(self.nombre.clone()),
            "licencia" => Some(self.licencia.clone()),
            "fechaIngreso" => self.fecha_ingreso.clone(),
            "estado" => Some(self.estado.clone()),
            "telefono" => Some(self.telefono.clone()),
            "idVehiculo" => opt_to_string(&self.id_vehiculo),
            _ => None,
        }
    }
}

// ============================================
// Envíos
// ============================================

pub const ESTADOS_ENVIO: [&str; 3] = ["Pendiente", "En Camino", "Entregado"];

/// Editable shipment record, as accepted by `Envio/Nuevo` and `Envio/Editar`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Envio {
    #[serde(deserialize_with = "null_as_default")]
    pub id_envios: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub id_cliente: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub id_ruta: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub fecha_solicitud: String,
    #[serde(deserialize_with = "null_as_default")]
    pub fecha_entrega_esperada: String,
    #[serde(deserialize_with = "null_as_default")]
    pub estado: String,
    #[serde(deserialize_with = "null_as_default")]
    pub mercancia: String,
    #[serde(deserialize_with = "null_as_default")]
    pub peso_total: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub volumen_total: f64,
}

impl TableRecord for Envio {
    fn record_id(&self) -> i32 {
        self.id_envios
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            "idEnvios" => Some(self.id_envios.to_string()),
            "idCliente" => Some(self.id_cliente.to_string()),
            "idRuta" => Some(self.id_ruta.to_string()),
            "fechaSolicitud" => Some(self.fecha_solicitud.clone()),
            "fechaEntregaEsperada" => Some(self.fecha_entrega_esperada.clone()),
            "estado" => Some(self.estado.clone()),
            "mercancia" => Some(self.mercancia.clone()),
            "pesoTotal" => Some(self.peso_total.to_string()),
            "volumenTotal" => Some(self.volumen_total.to_string()),
            _ => None,
        }
    }
}

/// Read-only shipment row joined with client name, route endpoints and cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VistaEnvio {
    #[serde(deserialize_with = "null_as_default")]
    pub id_envios: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub id_cliente: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub id_ruta: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub fecha_solicitud: String,
    #[serde(deserialize_with = "null_as_default")]
    pub fecha_entrega_esperada: String,
    #[serde(deserialize_with = "null_as_default")]
    pub estado: String,
    #[serde(deserialize_with = "null_as_default")]
    pub mercancia: String,
    #[serde(deserialize_with = "null_as_default")]
    pub peso: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub volumen: f64,
    #[serde(default = "desconocido", deserialize_with = "null_as_desconocido")]
    pub cliente: String,
    #[serde(default = "desconocido", deserialize_with = "null_as_desconocido")]
    pub origen: String,
    #[serde(default = "desconocido", deserialize_with = "null_as_desconocido")]
    pub destino: String,
    #[serde(deserialize_with = "null_as_default")]
    pub costo: Decimal,
}

impl Default for VistaEnvio {
    fn default() -> Self {
        Self {
            id_envios: 0,
            id_cliente: 0,
            id_ruta: 0,
            fecha_solicitud: String::new(),
            fecha_entrega_esperada: String::new(),
            estado: String::new(),
            mercancia: String::new(),
            peso: 0.0,
            volumen: 0.0,
            cliente: desconocido(),
            origen: desconocido(),
            destino: desconocido(),
            costo: Decimal::ZERO,
        }
    }
}

impl TableRecord for VistaEnvio {
    fn record_id(&self) -> i32 {
        self.id_envios
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            "idEnvios" => Some(self.id_envios.to_string()),
            "idCliente" => Some(self.id_cliente.to_string()),
            "idRuta" => Some(self.id_ruta.to_string()),
            "fechaSolicitud" => Some(self.fecha_solicitud.clone()),
            "fechaEntregaEsperada" => Some(self.fecha_entrega_esperada.clone()),
            "estado" => Some(self.estado.clone()),
            "mercancia" => Some(self.mercancia.clone()),
            "peso" => Some(self.peso.to_string()),
            "volumen" => Some(self.volumen.to_string()),
            "cliente" => Some(self.cliente.clone()),
            "origen" => Some(self.origen.clone()),
            "destino" => Some(self.destino.clone()),
            "costo" => Some(self.costo.to_string()),
            _ => None,
        }
    }
}

// ============================================
// Mantenimientos
// ============================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Mantenimiento {
    #[serde(deserialize_with = "null_as_default")]
    pub id_mantenimientos: i32,
    pub id_unidad: Option<i32>,
    #[serde(deserialize_with = "null_as_default")]
    pub fecha_mantenimiento: String,
    #[serde(deserialize_with = "null_as_default")]
    pub fecha_siguiente_mantenimiento: String,
}

impl Mantenimiento {
    /// Applies the unit `<select>` value. The empty placeholder clears the unit,
    /// which the backend receives as `null`.
    pub fn set_unidad(&mut self, value: &str) {
        self.id_unidad = value.parse().ok();
    }
}

impl TableRecord for Mantenimiento {
    fn record_id(&self) -> i32 {
        self.id_mantenimientos
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            "idMantenimientos" => Some(self.id_mantenimientos.to_string()),
            "idUnidad" => opt_to_string(&self.id_unidad),
            "fechaMantenimiento" => Some(self.fecha_mantenimiento.clone()),
            "fechaSiguienteMantenimiento" => Some(self.fecha_siguiente_mantenimiento.clone()),
            _ => None,
        }
    }
}

// ============================================
// Facturación
// ============================================

pub const ESTADOS_PAGO: [&str; 4] = ["Pendiente", "Pagado", "Vencido", "Cancelado"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Facturacion {
    #[serde(deserialize_with = "null_as_default")]
    pub id_facturacion: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub id_cliente: i32,
    #[serde(
        default = "cliente_desconocido",
        deserialize_with = "null_as_cliente_desconocido"
    )]
    pub nombre_cliente: String,
    #[serde(deserialize_with = "null_as_default")]
    pub fecha_factura: String,
    #[serde(deserialize_with = "null_as_default")]
    pub monto_total: Decimal,
    #[serde(default = "pendiente", deserialize_with = "null_as_pendiente")]
    pub estado_pago: String,
    #[serde(deserialize_with = "null_as_default")]
    pub id_envio: i32,
}

impl Default for Facturacion {
    fn default() -> Self {
        Self {
            id_facturacion: 0,
            id_cliente: 0,
            nombre_cliente: cliente_desconocido(),
            fecha_factura: String::new(),
            monto_total: Decimal::ZERO,
            estado_pago: pendiente(),
            id_envio: 0,
        }
    }
}

impl TableRecord for Facturacion {
    fn record_id(&self) -> i32 {
        self.id_facturacion
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            "idFacturacion" => Some(self.id_facturacion.to_string()),
            "idCliente" => Some(self.id_cliente.to_string()),
            "nombreCliente" => Some(self.nombre_cliente.clone()),
            "fechaFactura" => Some(self.fecha_factura.clone()),
            "montoTotal" => Some(self.monto_total.to_string()),
            "estadoPago" => Some(self.estado_pago.clone()),
            "idEnvio" => Some(self.id_envio.to_string()),
            _ => None,
        }
    }
}

/// Line item of an invoice, from `DetalleFacturacion/PorFactura/{id}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetalleFacturacion {
    #[serde(deserialize_with = "null_as_default")]
    pub id_detalle_facturacion: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub detalle: String,
    #[serde(deserialize_with = "null_as_default")]
    pub precio: Decimal,
}

// ============================================
// Usuarios
// ============================================

pub const ROLES_USUARIO: [&str; 3] = ["Administrador", "Usuario", "Invitado"];

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Usuario {
    #[serde(deserialize_with = "null_as_default")]
    pub id_usuarios: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub nombre_usuario: String,
    #[serde(deserialize_with = "null_as_default")]
    pub rol: String,
    #[serde(rename = "contraseña", deserialize_with = "null_as_default")]
    pub contrasena: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
}

impl TableRecord for Usuario {
    fn record_id(&self) -> i32 {
        self.id_usuarios
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            "idUsuarios" => Some(self.id_usuarios.to_string()),
            "nombreUsuario" => Some(self.nombre_usuario.clone()),
            "rol" => Some(self.rol.clone()),
            "email" => Some(self.email.clone()),
            _ => None,
        }
    }
}

// ============================================
// Rutas
// ============================================

/// Body of `POST Ruta/Nuevo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NuevaRuta {
    pub origen: String,
    pub destino: String,
    pub distancia: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RutaCreada {
    pub ruta_id: i64,
}

/// Error payload returned by the route endpoint on validation failures.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct RutaRechazada {
    pub mensaje: Option<String>,
    pub errores: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn vista_envio_fills_missing_and_null_columns() {
        let vista: VistaEnvio = serde_json::from_value(json!({
            "idEnvios": 7,
            "idCliente": 3,
            "cliente": null,
            "peso": 12.5
        }))
        .unwrap();

        assert_eq!(vista.id_envios, 7);
        assert_eq!(vista.cliente, "Desconocido");
        assert_eq!(vista.origen, "Desconocido");
        assert_eq!(vista.destino, "Desconocido");
        assert_eq!(vista.costo, Decimal::ZERO);
        assert_eq!(vista.peso, 12.5);
    }

    #[test]
    fn facturacion_defaults_client_name_and_status() {
        let factura: Facturacion = serde_json::from_value(json!({
            "idFacturacion": 42,
            "montoTotal": 1500.5,
            "estadoPago": null
        }))
        .unwrap();

        assert_eq!(factura.nombre_cliente, "Cliente Desconocido");
        assert_eq!(factura.estado_pago, "Pendiente");
        assert_eq!(factura.monto_total, Decimal::new(15005, 1));
    }

    #[test]
    fn accented_field_names_round_through_json() {
        let unidad: Unidad = serde_json::from_value(json!({
            "idUnidades": 1,
            "placa": "VKT-123",
            "año": 2019
        }))
        .unwrap();
        assert_eq!(unidad.anio, 2019);

        let usuario = Usuario {
            contrasena: "secreto".into(),
            ..Default::default()
        };
        let body = serde_json::to_value(&usuario).unwrap();
        assert_eq!(body["contraseña"], "secreto");
        assert!(body.get("contrasena").is_none());
    }

    #[test]
    fn nueva_ruta_uses_pascal_case() {
        let ruta = NuevaRuta {
            origen: "Los Mochis".into(),
            destino: "Culiacán".into(),
            distancia: 210.37,
        };
        assert_eq!(
            serde_json::to_value(&ruta).unwrap(),
            json!({"Origen": "Los Mochis", "Destino": "Culiacán", "Distancia": 210.37})
        );
    }

    #[test]
    fn conductor_toggle_flips_between_states() {
        let mut conductor = Conductor::default();
        assert_eq!(conductor.next_estado(), ESTADO_INACTIVO);
        conductor.estado = ESTADO_INACTIVO.into();
        assert_eq!(conductor.next_estado(), ESTADO_ACTIVO);
    }

    #[test]
    fn password_is_not_searchable() {
        let usuario = Usuario {
            contrasena: "secreto".into(),
            ..Default::default()
        };
        assert_eq!(usuario.field("contraseña"), None);
    }

    #[test]
    fn mantenimiento_without_unit_sends_null() {
        let mut mantenimiento = Mantenimiento::default();
        mantenimiento.set_unidad("4");
        assert_eq!(mantenimiento.id_unidad, Some(4));

        mantenimiento.set_unidad("");
        assert_eq!(mantenimiento.id_unidad, None);
        let body = serde_json::to_value(&mantenimiento).unwrap();
        assert_eq!(body["idUnidad"], serde_json::Value::Null);
    }

    #[test]
    fn new_unit_defaults_to_current_year() {
        use chrono::Datelike;

        assert_eq!(Unidad::default().anio, chrono::Local::now().year());
    }
}
