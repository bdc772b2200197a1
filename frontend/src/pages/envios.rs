// Envíos - shipments, listed through the joined shipment view

use flores_shared::api::{FormMode, date_part};
use flores_shared::invoice::formato_monto;
use flores_shared::models::{Cliente, ESTADOS_ENVIO, Envio, VistaEnvio};
use yew::prelude::*;

use crate::components::data_table::{Column, DataTable};
use crate::components::layout::PageHeader;
use crate::components::modal::{Editor, Modal, SelectField, TextField, field_setter, options};
use crate::hooks::{confirm_delete, rows, submit_record, use_list};

fn estado_badge(estado: &str) -> &'static str {
    match estado {
        "Entregado" => "bg-green-100 text-green-800",
        "En Camino" => "bg-blue-100 text-blue-800",
        _ => "bg-yellow-100 text-yellow-800",
    }
}

#[function_component(EnviosPage)]
pub fn envios_page() -> Html {
    let envios = use_list::<VistaEnvio>();
    let clientes = use_list::<Cliente>();
    let editor = use_state(|| Editor::<Envio>::Closed);

    let reload = {
        let envios = envios.clone();
        Callback::from(move |_: ()| envios.run())
    };

    let on_new = {
        let editor = editor.clone();
        Callback::from(move |_: ()| editor.set(Editor::New))
    };

    let on_edit = {
        let editor = editor.clone();
        Callback::from(move |vista: VistaEnvio| editor.set(Editor::Edit(Envio::from(&vista))))
    };

    // The view row shares its id with the underlying shipment.
    let on_delete = {
        let reload = reload.clone();
        Callback::from(move |id: i32| confirm_delete::<Envio>(id, reload.clone()))
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

    let columns = vec![
        Column::new("cliente", "Cliente"),
        Column::with_render("origen", "Ruta", |envio: VistaEnvio| {
            html! { {format!("{} → {}", envio.origen, envio.destino)} }
        }),
        Column::with_render("fechaSolicitud", "Solicitud", |envio: VistaEnvio| {
            html! { {date_part(&envio.fecha_solicitud).to_string()} }
        }),
        Column::with_render("fechaEntregaEsperada", "Entrega esperada", |envio: VistaEnvio| {
            html! { {date_part(&envio.fecha_entrega_esperada).to_string()} }
        }),
        Column::with_render("estado", "Estado", |envio: VistaEnvio| {
            html! {
                <span class={classes!("px-2", "py-1", "rounded-full", "text-xs", "font-medium", estado_badge(&envio.estado))}>
                    {envio.estado}
                </span>
            }
        }),
        Column::new("mercancia", "Mercancía"),
        Column::with_render("peso", "Peso", |envio: VistaEnvio| {
            html! { {format!("{} kg", envio.peso)} }
        }),
        Column::with_render("volumen", "Volumen", |envio: VistaEnvio| {
            html! { {format!("{} m³", envio.volumen)} }
        }),
        Column::with_render("costo", "Costo", |envio: VistaEnvio| {
            html! { {formato_monto(envio.costo)} }
        }),
    ];

    html! {
        <div class="p-6">
            <PageHeader title="Envíos" />
            <DataTable<VistaEnvio>
                data={rows(&envios)}
                {columns}
                search_keys={vec!["cliente", "origen", "destino", "mercancia", "estado"]}
                loading={envios.loading}
                {on_new}
                on_edit={Some(on_edit)}
                on_delete={Some(on_delete)}
            />
            if editor.is_open() {
                <EnvioModal
                    envio={editor.record()}
                    clientes={rows(&clientes)}
                    {on_close}
                    {on_saved}
                />
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct EnvioModalProps {
    envio: Option<Envio>,
    clientes: Vec<Cliente>,
    on_close: Callback<()>,
    on_saved: Callback<()>,
}

#[function_component(EnvioModal)]
fn envio_modal(props: &EnvioModalProps) -> Html {
    let form = use_state(|| props.envio.clone().unwrap_or_default());
    let mode = FormMode::for_record(props.envio.as_ref());

    let on_submit = {
        let form = form.clone();
        let on_saved = props.on_saved.clone();
        Callback::from(move |_: ()| submit_record((*form).clone(), mode, on_saved.clone()))
    };

    let title = match mode {
        FormMode::Create => "Nuevo Envío",
        FormMode::Edit => "Editar Envío",
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
    let id_cliente = if form.id_cliente > 0 {
        form.id_cliente.to_string()
    } else {
        String::new()
    };
    let id_ruta = if form.id_ruta > 0 {
        form.id_ruta.to_string()
    } else {
        String::new()
    };

    html! {
        <Modal {title} on_close={props.on_close.clone()} {on_submit}>
            <SelectField
                label="Cliente"
                value={id_cliente}
                options={clientes}
                on_change={field_setter(&form, |e, v| e.id_cliente = v.parse().unwrap_or_default())}
            />
            <TextField
                label="Ruta"
                input_type="number"
                value={id_ruta}
                on_change={field_setter(&form, |e, v| e.id_ruta = v.parse().unwrap_or_default())}
            />
            <div class="grid grid-cols-2 gap-4">
                <TextField
                    label="Fecha de solicitud"
                    input_type="date"
                    value={date_part(&form.fecha_solicitud).to_string()}
                    on_change={field_setter(&form, |e, v| e.fecha_solicitud = v)}
                />
                <TextField
                    label="Entrega esperada"
                    input_type="date"
                    value={date_part(&form.fecha_entrega_esperada).to_string()}
                    on_change={field_setter(&form, |e, v| e.fecha_entrega_esperada = v)}
                />
            </div>
            <SelectField
                label="Estado"
                value={form.estado.clone()}
                options={options(&ESTADOS_ENVIO)}
                on_change={field_setter(&form, |e, v| e.estado = v)}
            />
            <TextField
                label="Mercancía"
                value={form.mercancia.clone()}
                on_change={field_setter(&form, |e, v| e.mercancia = v)}
            />
            <div class="grid grid-cols-2 gap-4">
                <TextField
                    label="Peso total (kg)"
                    input_type="number"
                    step="0.01"
                    value={form.peso_total.to_string()}
                    on_change={field_setter(&form, |e, v| e.peso_total = v.parse().unwrap_or_default())}
                />
                <TextField
                    label="Volumen total (m³)"
                    input_type="number"
                    step="0.01"
                    value={form.volumen_total.to_string()}
                    on_change={field_setter(&form, |e, v| e.volumen_total = v.parse().unwrap_or_default())}
                />
            </div>
        </Modal>
    }
}
