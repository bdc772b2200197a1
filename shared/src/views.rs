use crate::api::date_part;
use crate::models::{Envio, VistaEnvio};

/// Editable shipment behind a row of the shipment view. The joined display
/// columns (client name, route endpoints, cost) are dropped.
impl From<&VistaEnvio> for Envio {
    fn from(vista: &VistaEnvio) -> Self {
        Envio {
            id_envios: vista.id_envios,
            id_cliente: vista.id_cliente,
            id_ruta: vista.id_ruta,
            fecha_solicitud: date_part(&vista.fecha_solicitud).to_string(),
            fecha_entrega_esperada: date_part(&vista.fecha_entrega_esperada).to_string(),
            estado: vista.estado.clone(),
            mercancia: vista.mercancia.clone(),
            peso_total: vista.peso,
            volumen_total: vista.volumen,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn view_row_maps_weight_and_volume() {
        let vista = VistaEnvio {
            id_envios: 31,
            id_cliente: 5,
            id_ruta: 2,
            fecha_solicitud: "2024-02-01T00:00:00".into(),
            fecha_entrega_esperada: "2024-02-05".into(),
            estado: "En Camino".into(),
            mercancia: "Cemento".into(),
            peso: 1200.0,
            volumen: 3.5,
            cliente: "Constructora Sol".into(),
            origen: "Los Mochis".into(),
            destino: "Guasave".into(),
            costo: Decimal::new(4500, 0),
        };

        let envio = Envio::from(&vista);
        assert_eq!(envio.id_envios, 31);
        assert_eq!(envio.peso_total, 1200.0);
        assert_eq!(envio.volumen_total, 3.5);
        assert_eq!(envio.fecha_solicitud, "2024-02-01");
        assert_eq!(envio.estado, "En Camino");
    }
}
