//! REST endpoint catalogue and request planning.
//!
//! Paths are relative to the configured API base URL. Nothing here performs
//! I/O; the frontend's `ApiClient` executes the planned requests.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::models::{
    Cliente, Conductor, Envio, Facturacion, Mantenimiento, Unidad, Usuario, VistaEnvio,
};
use crate::table::TableRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// Whether a modal creates a new record or edits the one it was opened with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

impl FormMode {
    pub fn for_record<T>(record: Option<&T>) -> Self {
        if record.is_some() {
            FormMode::Edit
        } else {
            FormMode::Create
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            body: None,
        }
    }

    pub fn with_body(method: Method, path: impl Into<String>, body: Value) -> Self {
        Self {
            method,
            path: path.into(),
            body: Some(body),
        }
    }
}

// ============================================
// Entity traits
// ============================================

/// A collection the backend exposes under `{NAMESPACE}/Lista`.
pub trait Listed: DeserializeOwned + Clone + PartialEq + 'static {
    const NAMESPACE: &'static str;

    fn list_path() -> String {
        format!("{}/Lista", Self::NAMESPACE)
    }
}

/// A record that can be created, edited and deleted through its namespace.
pub trait Resource: Listed + Serialize + TableRecord {
    /// Last path segment of the create endpoint.
    const CREATE_ACTION: &'static str = "Nuevo";
    /// Singular noun used in confirmation messages.
    const NOUN: &'static str;
    /// Whether the noun takes feminine agreement ("creada").
    const FEMININE: bool = false;

    fn create_path() -> String {
        format!("{}/{}", Self::NAMESPACE, Self::CREATE_ACTION)
    }

    fn edit_path() -> String {
        format!("{}/Editar", Self::NAMESPACE)
    }

    fn delete_path(id: i32) -> String {
        format!("{}/Eliminar/{}", Self::NAMESPACE, id)
    }

    /// JSON sent on create/edit. Defaults to the record itself.
    fn write_body(&self, _mode: FormMode) -> Result<Value, ApiError> {
        serde_json::to_value(self).map_err(|e| ApiError::Serialize(e.to_string()))
    }
}

/// Plans the create or update call for a modal submit.
pub fn submit_request<R: Resource>(record: &R, mode: FormMode) -> Result<ApiRequest, ApiError> {
    let body = record.write_body(mode)?;
    let request = match mode {
        FormMode::Create => ApiRequest::with_body(Method::Post, R::create_path(), body),
        FormMode::Edit => ApiRequest::with_body(Method::Put, R::edit_path(), body),
    };
    Ok(request)
}

pub fn delete_request<R: Resource>(id: i32) -> ApiRequest {
    ApiRequest::delete(R::delete_path(id))
}

/// "Cliente creado", "Unidad actualizada", ...
pub fn success_message<R: Resource>(mode: FormMode) -> String {
    let verb = match (mode, R::FEMININE) {
        (FormMode::Create, false) => "creado",
        (FormMode::Create, true) => "creada",
        (FormMode::Edit, false) => "actualizado",
        (FormMode::Edit, true) => "actualizada",
    };
    format!("{} {}", R::NOUN, verb)
}

// ============================================
// Entity endpoints
// ============================================

impl Listed for Cliente {
    const NAMESPACE: &'static str = "Cliente";
}

impl Resource for Cliente {
    const NOUN: &'static str = "Cliente";
}

impl Listed for Unidad {
    const NAMESPACE: &'static str = "Unidades";
}

impl Resource for Unidad {
    const CREATE_ACTION: &'static str = "Nueva";
    const NOUN: &'static str = "Unidad";
    const FEMININE: bool = true;
}

impl Listed for Conductor {
    const NAMESPACE: &'static str = "Conductor";
}

impl Resource for Conductor {
    const NOUN: &'static str = "Conductor";

    fn write_body(&self, _mode: FormMode) -> Result<Value, ApiError> {
        let mut conductor = self.clone();
        conductor.fecha_ingreso = self
            .fecha_ingreso
            .as_deref()
            .map(date_part)
            .filter(|fecha| !fecha.is_empty())
            .map(str::to_string);
        serde_json::to_value(&conductor).map_err(|e| ApiError::Serialize(e.to_string()))
    }
}

/// `PATCH Conductor/CambiarEstado/{id}` flipping the driver to the other status.
pub fn cambiar_estado_request(conductor: &Conductor) -> ApiRequest {
    ApiRequest::with_body(
        Method::Patch,
        format!("{}/CambiarEstado/{}", Conductor::NAMESPACE, conductor.id_conductores),
        json!({ "estado": conductor.next_estado() }),
    )
}

impl Listed for Envio {
    const NAMESPACE: &'static str = "Envio";
}

impl Resource for Envio {
    const NOUN: &'static str = "Envío";
}

impl Listed for VistaEnvio {
    const NAMESPACE: &'static str = "VistaEnvio";
}

impl Listed for Mantenimiento {
    const NAMESPACE: &'static str = "Mantenimiento";
}

impl Resource for Mantenimiento {
    const NOUN: &'static str = "Mantenimiento";
}

impl Listed for Facturacion {
    const NAMESPACE: &'static str = "Facturacion";
}

impl Resource for Facturacion {
    const NOUN: &'static str = "Facturación";
    const FEMININE: bool = true;

    /// The invoice endpoints bind PascalCase properties and only accept the
    /// invoice id on edit.
    fn write_body(&self, mode: FormMode) -> Result<Value, ApiError> {
        let mut body = json!({
            "IdCliente": self.id_cliente,
            "FechaFactura": self.fecha_factura,
            "MontoTotal": self.monto_total,
            "EstadoPago": self.estado_pago,
            "IdEnvio": self.id_envio,
        });
        if mode == FormMode::Edit {
            body["IdFacturacion"] = json!(self.id_facturacion);
        }
        Ok(body)
    }
}

pub fn detalle_factura_path(id_facturacion: i32) -> String {
    format!("DetalleFacturacion/PorFactura/{id_facturacion}")
}

impl Listed for Usuario {
    const NAMESPACE: &'static str = "Usuario";
}

impl Resource for Usuario {
    const NOUN: &'static str = "Usuario";
}

pub const RUTA_NUEVA_PATH: &str = "Ruta/Nuevo";

/// Date portion of an ISO timestamp (`2024-03-01T00:00:00` -> `2024-03-01`).
pub fn date_part(value: &str) -> &str {
    value.split('T').next().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn unidades_create_under_nueva() {
        let request = submit_request(&Unidad::default(), FormMode::Create).unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "Unidades/Nueva");
    }

    #[test]
    fn conductor_sends_date_only() {
        let conductor = Conductor {
            id_conductores: 4,
            fecha_ingreso: Some("2023-05-10T00:00:00".into()),
            ..Default::default()
        };
        let request = submit_request(&conductor, FormMode::Edit).unwrap();
        let body = request.body.unwrap();
        assert_eq!(body["fechaIngreso"], "2023-05-10");
        assert_eq!(request.path, "Conductor/Editar");
    }

    #[test]
    fn conductor_blank_date_is_null() {
        let conductor = Conductor {
            fecha_ingreso: Some(String::new()),
            ..Default::default()
        };
        let body = conductor.write_body(FormMode::Create).unwrap();
        assert!(body["fechaIngreso"].is_null());
    }

    #[test]
    fn cambiar_estado_targets_the_other_status() {
        let conductor = Conductor {
            id_conductores: 9,
            estado: "Activo".into(),
            ..Default::default()
        };
        let request = cambiar_estado_request(&conductor);
        assert_eq!(request.method, Method::Patch);
        assert_eq!(request.path, "Conductor/CambiarEstado/9");
        assert_eq!(request.body, Some(json!({"estado": "Inactivo"})));
    }

    #[test]
    fn facturacion_id_only_on_edit() {
        let factura = Facturacion {
            id_facturacion: 12,
            id_cliente: 3,
            fecha_factura: "2024-06-01".into(),
            monto_total: Decimal::new(250, 0),
            id_envio: 8,
            ..Default::default()
        };

        let create = factura.write_body(FormMode::Create).unwrap();
        assert!(create.get("IdFacturacion").is_none());
        assert_eq!(create["IdCliente"], 3);
        assert_eq!(create["EstadoPago"], "Pendiente");

        let edit = factura.write_body(FormMode::Edit).unwrap();
        assert_eq!(edit["IdFacturacion"], 12);
    }

    #[test]
    fn success_messages_agree_in_gender() {
        assert_eq!(success_message::<Cliente>(FormMode::Create), "Cliente creado");
        assert_eq!(success_message::<Unidad>(FormMode::Edit), "Unidad actualizada");
        assert_eq!(
            success_message::<Facturacion>(FormMode::Create),
            "Facturación creada"
        );
    }
}
