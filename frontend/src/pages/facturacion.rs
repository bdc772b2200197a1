// Facturación - invoices, the invoice editor and the printable invoice

use flores_shared::api::{FormMode, Resource, detalle_factura_path, success_message};
use flores_shared::invoice::{FacturacionForm, fecha_es, formato_monto, numero_factura, render_invoice_html};
use flores_shared::models::{Cliente, DetalleFacturacion, ESTADOS_PAGO, Facturacion, VistaEnvio};
use gloo::dialogs::alert;
use rust_decimal::Decimal;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::data_table::{Column, DataTable};
use crate::components::layout::PageHeader;
use crate::components::modal::{Editor, Modal, SelectField, TextField, field_setter, options};
use crate::hooks::{confirm_delete, rows, use_list};
use crate::services::ApiClient;

fn estado_badge(estado: &str) -> &'static str {
    match estado.to_lowercase().as_str() {
        "pagado" => "bg-green-100 text-green-800",
        "pendiente" => "bg-yellow-100 text-yellow-800",
        "cancelado" => "bg-gray-100 text-gray-800",
        _ => "bg-red-100 text-red-800",
    }
}

fn nombre_cliente(clientes: &[Cliente], id_cliente: i32) -> String {
    clientes
        .iter()
        .find(|cliente| cliente.id_clientes == id_cliente)
        .map(|cliente| cliente.nombre_cliente.clone())
        .unwrap_or_else(|| "Cliente desconocido".to_string())
}

/// Opens the invoice in a new window and hands it to the print dialog.
/// The window is opened before the detail fetch so popup blockers allow it.
fn print_invoice(factura: Facturacion) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let popup = match window.open_with_url_and_target("", "_blank") {
        Ok(Some(popup)) => popup,
        _ => {
            alert("No se pudo abrir la ventana de impresión");
            return;
        }
    };

    spawn_local(async move {
        let detalles = ApiClient::get::<Vec<DetalleFacturacion>>(&detalle_factura_path(factura.id_facturacion))
            .await
            .unwrap_or_else(|e| {
                log::warn!("Sin detalles para la factura {}: {}", factura.id_facturacion, e);
                Vec::new()
            });

        let html = render_invoice_html(&factura, &detalles, chrono::Local::now().naive_local());
        let Some(document) = popup.document().map(|d| d.unchecked_into::<web_sys::HtmlDocument>()) else {
            return;
        };
        if let Err(e) = document.write_1(&html) {
            log::error!("No se pudo escribir la factura: {:?}", e);
            return;
        }
        let _ = document.close();
        let _ = popup.focus();
        let _ = popup.print();
    });
}

#[function_component(FacturacionPage)]
pub fn facturacion_page() -> Html {
    let facturas = use_list::<Facturacion>();
    let clientes = use_list::<Cliente>();
    let editor = use_state(|| Editor::<Facturacion>::Closed);

    let reload = {
        let facturas = facturas.clone();
        Callback::from(move |_: ()| facturas.run())
    };

    let on_new = {
        let editor = editor.clone();
        Callback::from(move |_: ()| editor.set(Editor::New))
    };

    let on_edit = {
        let editor = editor.clone();
        Callback::from(move |factura: Facturacion| editor.set(Editor::Edit(factura)))
    };

    let on_delete = {
        let reload = reload.clone();
        Callback::from(move |id: i32| confirm_delete::<Facturacion>(id, reload.clone()))
    };

    let on_close = {
        let editor = editor.clone();
        Callback::from(move |_: ()| editor.set(Editor::Closed))
    };

    let on_saved = {
        let editor = editor.clone();
        Callback::from(move |_: ()| {
            editor.set(Editor::Closed);
            reload.emit(());
        })
    };

    let lista_clientes = rows(&clientes);
    let columns = {
        let para_nombre = lista_clientes.clone();
        let para_imprimir = lista_clientes.clone();
        vec![
            Column::with_render("idFacturacion", "# Factura", |f: Facturacion| {
                html! { <span class="font-mono">{numero_factura(f.id_facturacion)}</span> }
            }),
            Column::with_render("nombreCliente", "Cliente", move |f: Facturacion| {
                html! { {nombre_cliente(&para_nombre, f.id_cliente)} }
            }),
            Column::with_render("fechaFactura", "Fecha", |f: Facturacion| {
                html! { {fecha_es(&f.fecha_factura)} }
            }),
            Column::with_render("montoTotal", "Monto Total", |f: Facturacion| {
                html! { {formato_monto(f.monto_total)} }
            }),
            Column::with_render("estadoPago", "Estado", |f: Facturacion| {
                html! {
                    <span class={classes!("px-2", "py-1", "rounded-full", "text-xs", "font-medium", estado_badge(&f.estado_pago))}>
                        {f.estado_pago}
                    </span>
                }
            }),
            Column::with_render("idEnvio", "PDF", move |f: Facturacion| {
                let onclick = {
                    let mut factura = f.clone();
                    factura.nombre_cliente = nombre_cliente(&para_imprimir, f.id_cliente);
                    Callback::from(move |_: MouseEvent| print_invoice(factura.clone()))
                };
                html! {
                    <button {onclick} class="px-2 py-1 rounded text-xs font-medium bg-gray-700 text-white hover:bg-gray-800">
                        {"🖨️ Imprimir"}
                    </button>
                }
            }),
        ]
    };

    html! {
        <div class="p-6">
            <PageHeader title="Facturación" />
            <DataTable<Facturacion>
                data={rows(&facturas)}
                {columns}
                search_keys={vec!["idFacturacion", "nombreCliente", "estadoPago"]}
                page_size_options={vec![5, 10, 15]}
                default_page_size={5}
                loading={facturas.loading}
                {on_new}
                on_edit={Some(on_edit)}
                on_delete={Some(on_delete)}
            />
            if editor.is_open() {
                <FacturacionModal
                    factura={editor.record()}
                    clientes={lista_clientes}
                    {on_close}
                    {on_saved}
                />
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct FacturacionModalProps {
    factura: Option<Facturacion>,
    clientes: Vec<Cliente>,
    on_close: Callback<()>,
    on_saved: Callback<()>,
}

#[function_component(FacturacionModal)]
fn facturacion_modal(props: &FacturacionModalProps) -> Html {
    let form = use_state(|| match &props.factura {
        Some(factura) => FacturacionForm::from_record(factura),
        None => FacturacionForm::blank(chrono::Local::now().date_naive()),
    });
    let envios = use_list::<VistaEnvio>();
    let error = use_state(|| None::<String>);
    let busy = use_state(|| false);

    {
        let form = form.clone();
        use_effect_with(envios.data.clone(), move |data| {
            if let Some(data) = data {
                let mut next = (*form).clone();
                next.load_shipments(data.clone());
                form.set(next);
            }
            || ()
        });
    }

    let on_submit = {
        let form = form.clone();
        let error = error.clone();
        let busy = busy.clone();
        let on_saved = props.on_saved.clone();
        Callback::from(move |_: ()| {
            if *busy {
                return;
            }
            let request = match form.request() {
                Ok(request) => request,
                Err(e) => {
                    error.set(Some(e.to_string()));
                    return;
                }
            };
            let mode = form.mode();
            error.set(None);
            busy.set(true);

            let error = error.clone();
            let busy = busy.clone();
            let on_saved = on_saved.clone();
            spawn_local(async move {
                match ApiClient::execute(&request).await {
                    Ok(()) => {
                        alert(&success_message::<Facturacion>(mode));
                        on_saved.emit(());
                    }
                    Err(e) => {
                        log::error!("Error al guardar {}: {}", Facturacion::NOUN, e);
                        error.set(Some(e.to_string()));
                        busy.set(false);
                    }
                }
            });
        })
    };

    let title = match form.mode() {
        FormMode::Create => "Nueva Facturación",
        FormMode::Edit => "Editar Facturación",
    };

    let clientes: Vec<(AttrValue, AttrValue)> = props
        .clientes
        .iter()
        .map(|cliente| {
            (
                AttrValue::from(cliente.id_clientes.to_string()),
                AttrValue::from(cliente.nombre_cliente.clone()),
            )
        })
        .collect();
    let envios_cliente: Vec<(AttrValue, AttrValue)> = form
        .client_shipments()
        .into_iter()
        .map(|envio| {
            (
                AttrValue::from(envio.id_envios.to_string()),
                AttrValue::from(format!(
                    "#{} - {} ({} → {}) {}",
                    envio.id_envios,
                    envio.mercancia,
                    envio.origen,
                    envio.destino,
                    formato_monto(envio.costo)
                )),
            )
        })
        .collect();
    let id_cliente = if form.id_cliente > 0 {
        form.id_cliente.to_string()
    } else {
        String::new()
    };
    let id_envio = if form.id_envio > 0 {
        form.id_envio.to_string()
    } else {
        String::new()
    };

    html! {
        <Modal
            {title}
            on_close={props.on_close.clone()}
            {on_submit}
            busy={*busy}
            error={(*error).clone().map(AttrValue::from)}
        >
            <SelectField
                label="Cliente"
                value={id_cliente}
                options={clientes}
                placeholder="Seleccione un cliente"
                on_change={field_setter(&form, |f, v| f.select_client(v.parse().unwrap_or_default()))}
            />
            <TextField
                label="Fecha de factura"
                input_type="date"
                value={form.fecha_factura.clone()}
                on_change={field_setter(&form, |f, v| f.fecha_factura = v)}
            />
            <SelectField
                label="Envío"
                value={id_envio}
                options={envios_cliente}
                placeholder={if envios.loading { "Cargando envíos..." } else { "Seleccione un envío" }}
                on_change={field_setter(&form, |f, v| f.select_shipment(v.parse().unwrap_or_default()))}
            />
            <TextField
                label="Monto total"
                input_type="number"
                step="0.01"
                value={form.monto_total.to_string()}
                on_change={field_setter(&form, |f, v| f.monto_total = v.parse::<Decimal>().unwrap_or_default())}
            />
            <SelectField
                label="Estado de pago"
                value={form.estado_pago.clone()}
                options={options(&ESTADOS_PAGO)}
                placeholder={None::<AttrValue>}
                on_change={field_setter(&form, |f, v| f.estado_pago = v)}
            />
        </Modal>
    }
}
