use thiserror::Error;

/// Failure talking to the REST backend.
///
/// Every variant is shown to the user the same way; the split only matters for
/// logging.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("{}", http_message(.status, .body))]
    Http { status: u16, body: String },
    #[error("Failed to parse response: {0}")]
    Parse(String),
    #[error("Failed to serialize request: {0}")]
    Serialize(String),
}

fn http_message(status: &u16, body: &str) -> String {
    if body.trim().is_empty() {
        format!("HTTP Error: {status}")
    } else {
        body.to_string()
    }
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Network(_) => "NETWORK_ERROR",
            ApiError::Http { .. } => "HTTP_ERROR",
            ApiError::Parse(_) => "PARSE_ERROR",
            ApiError::Serialize(_) => "SERIALIZE_ERROR",
        }
    }
}

/// Validation failures of the invoice form, checked in declaration order.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FacturacionError {
    #[error("Debe seleccionar un cliente")]
    ClienteRequerido,
    #[error("Debe ingresar una fecha de factura")]
    FechaRequerida,
    #[error("El monto total debe ser mayor que cero")]
    MontoInvalido,
    #[error("Debe seleccionar un envío")]
    EnvioRequerido,
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    #[error("Primero debes trazar una ruta en el mapa")]
    NoRoute,
    #[error("Ya se está guardando la ruta")]
    AlreadySaving,
    #[error("No se pudieron obtener las coordenadas de origen y destino")]
    MissingWaypoints,
    #[error("La distancia de la ruta debe ser mayor que cero")]
    InvalidDistance,
    #[error("{}", rejected_message(.mensaje, .errores))]
    Rejected {
        mensaje: Option<String>,
        errores: Vec<String>,
    },
    #[error(transparent)]
    Api(#[from] ApiError),
}

fn rejected_message(mensaje: &Option<String>, errores: &[String]) -> String {
    let mensaje = mensaje.as_deref().unwrap_or("No se pudo guardar la ruta");
    if errores.is_empty() {
        mensaje.to_string()
    } else {
        format!("{mensaje}: {}", errores.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_shows_backend_text() {
        let err = ApiError::Http {
            status: 400,
            body: "La placa ya existe".into(),
        };
        assert_eq!(err.to_string(), "La placa ya existe");
        assert_eq!(err.code(), "HTTP_ERROR");
    }

    #[test]
    fn empty_http_body_falls_back_to_status() {
        let err = ApiError::Http {
            status: 500,
            body: String::new(),
        };
        assert_eq!(err.to_string(), "HTTP Error: 500");
    }

    #[test]
    fn rejected_route_lists_errors() {
        let err = RouteError::Rejected {
            mensaje: Some("Datos inválidos".into()),
            errores: vec!["Origen requerido".into(), "Destino requerido".into()],
        };
        assert_eq!(
            err.to_string(),
            "Datos inválidos: Origen requerido, Destino requerido"
        );
    }
}
