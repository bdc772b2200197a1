// Conductores - drivers, with the active/inactive toggle

use flores_shared::api::{FormMode, cambiar_estado_request, date_part};
use flores_shared::models::{Conductor, ESTADO_ACTIVO, ESTADO_INACTIVO, Unidad};
use gloo::dialogs::{alert, confirm};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::data_table::{Column, DataTable};
use crate::components::layout::PageHeader;
use crate::components::modal::{Editor, Modal, SelectField, TextField, field_setter, options};
use crate::hooks::{confirm_delete, rows, submit_record, use_list};
use crate::services::ApiClient;

/// Asks before flipping the driver's estado, then refetches.
fn toggle_estado(conductor: Conductor, on_changed: Callback<()>) {
    let mensaje = format!("¿Estás seguro de cambiar el estado a {}?", conductor.next_estado());
    if !confirm(&mensaje) {
        return;
    }
    spawn_local(async move {
        match ApiClient::execute(&cambiar_estado_request(&conductor)).await {
            Ok(()) => on_changed.emit(()),
            Err(e) => {
                log::error!(
                    "Error al cambiar el estado del conductor {}: {}",
                    conductor.id_conductores,
                    e
                );
                alert(&e.to_string());
            }
        }
    });
}

fn placa(unidades: &[Unidad], id_vehiculo: Option<i32>) -> String {
    match id_vehiculo {
        Some(id) => unidades
            .iter()
            .find(|unidad| unidad.id_unidades == id)
            .map(|unidad| unidad.placa.clone())
            .unwrap_or_else(|| format!("#{id}")),
        None => "Sin asignar".to_string(),
    }
}

#[function_component(ConductoresPage)]
pub fn conductores_page() -> Html {
    let conductores = use_list::<Conductor>();
    let unidades = use_list::<Unidad>();
    let editor = use_state(|| Editor::<Conductor>::Closed);

    let reload = {
        let conductores = conductores.clone();
        Callback::from(move |_: ()| conductores.run())
    };

    let on_new = {
        let editor = editor.clone();
        Callback::from(move |_: ()| editor.set(Editor::New))
    };

    let on_edit = {
        let editor = editor.clone();
        Callback::from(move |conductor: Conductor| editor.set(Editor::Edit(conductor)))
    };

    let on_delete = {
        let reload = reload.clone();
        Callback::from(move |id: i32| confirm_delete::<Conductor>(id, reload.clone()))
    };

    let on_close = {
        let editor = editor.clone();
        Callback::from(move |_: ()| editor.set(Editor::Closed))
    };

    let on_saved = {
        let editor = editor.clone();
        let reload = reload.clone();
        Callback::from(move |_: ()| {
            editor.set(Editor::Closed);
            reload.emit(());
        })
    };

    let vehiculos = rows(&unidades);
    let columns = vec![
        Column::new("nombre", "Nombre"),
        Column::new("licencia", "Licencia"),
        Column::with_render("estado", "Estado", move |conductor: Conductor| {
            let (label, class) = if conductor.is_active() {
                ("Desactivar", "bg-red-600 hover:bg-red-700")
            } else {
                ("Activar", "bg-green-600 hover:bg-green-700")
            };
            let onclick = {
                let reload = reload.clone();
                let conductor = conductor.clone();
                Callback::from(move |_: MouseEvent| toggle_estado(conductor.clone(), reload.clone()))
            };
            html! {
                <div class="flex items-center space-x-2">
                    <span>{conductor.estado.clone()}</span>
                    <button {onclick} class={classes!("px-2", "py-1", "rounded", "text-xs", "text-white", class)}>
                        {label}
                    </button>
                </div>
            }
        }),
        Column::new("telefono", "Teléfono"),
        Column::with_render("idVehiculo", "Vehículo", move |conductor: Conductor| {
            html! { {placa(&vehiculos, conductor.id_vehiculo)} }
        }),
    ];

    html! {
        <div class="p-6">
            <PageHeader title="Conductores" />
            <DataTable<Conductor>
                data={rows(&conductores)}
                {columns}
                search_keys={vec!["nombre", "telefono", "licencia"]}
                page_size_options={vec![5, 10, 15]}
                default_page_size={5}
                loading={conductores.loading}
                {on_new}
                on_edit={Some(on_edit)}
                on_delete={Some(on_delete)}
            />
            if editor.is_open() {
                <ConductorModal
                    conductor={editor.record()}
                    unidades={rows(&unidades)}
                    {on_close}
                    {on_saved}
                />
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ConductorModalProps {
    conductor: Option<Conductor>,
    unidades: Vec<Unidad>,
    on_close: Callback<()>,
    on_saved: Callback<()>,
}

#[function_component(ConductorModal)]
fn conductor_modal(props: &ConductorModalProps) -> Html {
    let form = use_state(|| props.conductor.clone().unwrap_or_default());
    let mode = FormMode::for_record(props.conductor.as_ref());

    let on_submit = {
        let form = form.clone();
        let on_saved = props.on_saved.clone();
        Callback::from(move |_: ()| submit_record((*form).clone(), mode, on_saved.clone()))
    };

    let title = match mode {
        FormMode::Create => "Nuevo Conductor",
        FormMode::Edit => "Editar Conductor",
    };

    let vehiculos: Vec<(AttrValue, AttrValue)> = props
        .unidades
        .iter()
        .map(|unidad| {
            (
                AttrValue::from(unidad.id_unidades.to_string()),
                AttrValue::from(format!("{} - {} {}", unidad.placa, unidad.marca, unidad.modelo)),
            )
        })
        .collect();

    html! {
        <Modal {title} on_close={props.on_close.clone()} {on_submit}>
            <TextField
                label="Nombre"
                value={form.nombre.clone()}
                on_change={field_setter(&form, |c, v| c.nombre = v)}
            />
            <TextField
                label="Licencia"
                value={form.licencia.clone()}
                on_change={field_setter(&form, |c, v| c.licencia = v)}
            />
            <TextField
                label="Fecha de ingreso"
                input_type="date"
                value={form.fecha_ingreso.as_deref().map(date_part).unwrap_or_default().to_string()}
                on_change={field_setter(&form, |c, v| c.fecha_ingreso = (!v.is_empty()).then_some(v))}
            />
            <TextField
                label="Teléfono"
                input_type="tel"
                value={form.telefono.clone()}
                on_change={field_setter(&form, |c, v| c.telefono = v)}
            />
            <SelectField
                label="Estado"
                value={form.estado.clone()}
                options={options(&[ESTADO_ACTIVO, ESTADO_INACTIVO])}
                on_change={field_setter(&form, |c, v| c.estado = v)}
            />
            <SelectField
                label="Vehículo"
                value={form.id_vehiculo.map(|id| id.to_string()).unwrap_or_default()}
                options={vehiculos}
                placeholder="Sin asignar"
                on_change={field_setter(&form, |c, v| c.id_vehiculo = v.parse().ok())}
            />
        </Modal>
    }
}
