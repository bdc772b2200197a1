pub mod clientes;
pub mod conductores;
pub mod dashboard;
pub mod envios;
pub mod facturacion;
pub mod mantenimientos;
pub mod ruta;
pub mod unidades;
pub mod usuarios;
