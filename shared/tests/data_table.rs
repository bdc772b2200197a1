mod common;

use flores_shared::api::{delete_request, submit_request};
use flores_shared::table::{filter, page_count};
use flores_shared::{
    Cliente, Envio, FormMode, Method, TableRecord, TableState, Unidad, VistaEnvio,
};

fn clientes(n: i32) -> Vec<Cliente> {
    (1..=n)
        .map(|i| Cliente {
            id_clientes: i,
            nombre_cliente: format!("Cliente {i}"),
            email: format!("contacto{i}@flores.mx"),
            tipo_cliente: if i % 3 == 0 { "VIP" } else { "Regular" }.to_string(),
            ..Default::default()
        })
        .collect()
}

#[test]
fn every_hit_contains_the_term_in_a_search_key() {
    common::init_test_logging();
    let data = clientes(30);
    let keys = ["nombreCliente", "email", "tipoCliente"];

    for term in ["vip", "CLIENTE 1", "flores", " 2 ", "nada"] {
        let needle = term.trim().to_lowercase();
        let hits = filter(&data, &keys, term);
        for hit in &hits {
            assert!(
                keys.iter().any(|key| hit
                    .field(key)
                    .unwrap_or_default()
                    .to_lowercase()
                    .contains(&needle)),
                "{term:?} matched {:?}",
                hit.nombre_cliente
            );
        }
    }
}

#[test]
fn empty_term_returns_everything() {
    let data = clientes(7);
    assert_eq!(filter(&data, &["nombreCliente"], "").len(), 7);
    assert_eq!(filter(&data, &["nombreCliente"], "   ").len(), 7);
}

#[test]
fn search_and_page_size_changes_reset_to_first_page() {
    let mut state = TableState::new(5);
    state.go_to(3, 12);
    assert_eq!(state.page, 3);

    state.set_search("cliente");
    assert_eq!(state.page, 1);

    state.go_to(2, 12);
    state.set_page_size(10);
    assert_eq!(state.page, 1);
}

#[test]
fn twelve_rows_in_pages_of_five() {
    let data = clientes(12);
    let mut state = TableState::new(5);
    assert_eq!(page_count(data.len(), state.page_size), 3);

    state.go_to(4, data.len());
    assert_eq!(state.page, 3);
    assert!(!state.can_next(data.len()));

    state.next(data.len());
    assert_eq!(state.page, 3);
    assert_eq!(state.page_slice(&data).len(), 2);

    state.prev(data.len());
    state.prev(data.len());
    state.prev(data.len());
    assert_eq!(state.page, 1);
}

#[test]
fn filtering_and_paging_compose() {
    let data = clientes(30);
    let hits = filter(&data, &["tipoCliente"], "VIP");
    assert_eq!(hits.len(), 10);

    let mut state = TableState::new(5);
    state.next(hits.len());
    let page: Vec<i32> = state
        .page_slice(&hits)
        .iter()
        .map(|c| c.record_id())
        .collect();
    assert_eq!(page, vec![18, 21, 24, 27, 30]);
}

#[test]
fn shipment_view_deletes_by_shipment_id() {
    let vista = VistaEnvio {
        id_envios: 44,
        id_cliente: 3,
        id_ruta: 9,
        ..Default::default()
    };
    let request = delete_request::<Envio>(vista.record_id());
    assert_eq!(request.method, Method::Delete);
    assert_eq!(request.path, "Envio/Eliminar/44");
}

#[test]
fn submit_creates_without_record_and_updates_with_one() {
    let nueva = Unidad {
        placa: "VKT-123".into(),
        ..Default::default()
    };
    let create = submit_request(&nueva, FormMode::for_record(None::<&Unidad>)).unwrap();
    assert_eq!(create.method, Method::Post);
    assert_eq!(create.path, "Unidades/Nueva");

    let existente = Unidad {
        id_unidades: 5,
        ..nueva
    };
    let update = submit_request(&existente, FormMode::for_record(Some(&existente))).unwrap();
    assert_eq!(update.method, Method::Put);
    assert_eq!(update.path, "Unidades/Editar");
    assert_eq!(update.body.unwrap()["idUnidades"], 5);
}

#[test]
fn client_create_posts_to_nuevo() {
    let request = submit_request(&Cliente::default(), FormMode::Create).unwrap();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.path, "Cliente/Nuevo");
}
