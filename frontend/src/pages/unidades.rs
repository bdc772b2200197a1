// Unidades - fleet vehicles

use flores_shared::api::FormMode;
use flores_shared::models::{ESTADOS_UNIDAD, Unidad};
use yew::prelude::*;

use crate::components::data_table::{Column, DataTable};
use crate::components::layout::PageHeader;
use crate::components::modal::{Editor, Modal, SelectField, TextField, field_setter, options};
use crate::hooks::{confirm_delete, rows, submit_record, use_list};

fn estado_badge(estado: &str) -> &'static str {
    match estado {
        "Disponible" => "bg-green-100 text-green-800",
        "En Ruta" => "bg-blue-100 text-blue-800",
        _ => "bg-yellow-100 text-yellow-800",
    }
}

#[function_component(UnidadesPage)]
pub fn unidades_page() -> Html {
    let unidades = use_list::<Unidad>();
    let editor = use_state(|| Editor::<Unidad>::Closed);

    let reload = {
        let unidades = unidades.clone();
        Callback::from(move |_: ()| unidades.run())
    };

    let on_new = {
        let editor = editor.clone();
        Callback::from(move |_: ()| editor.set(Editor::New))
    };

    let on_edit = {
        let editor = editor.clone();
        Callback::from(move |unidad: Unidad| editor.set(Editor::Edit(unidad)))
    };

    let on_delete = {
        let reload = reload.clone();
        Callback::from(move |id: i32| confirm_delete::<Unidad>(id, reload.clone()))
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
        Column::new("tipoUnidad", "Tipo"),
        Column::new("placa", "Placa"),
        Column::new("marca", "Marca"),
        Column::new("modelo", "Modelo"),
        Column::new("año", "Año"),
        Column::with_render("estado", "Estado", |unidad: Unidad| {
            html! {
                <span class={classes!("px-2", "py-1", "rounded-full", "text-xs", "font-medium", estado_badge(&unidad.estado))}>
                    {unidad.estado}
                </span>
            }
        }),
        Column::with_render("kilometrajeActual", "Kilometraje", |unidad: Unidad| {
            html! { {format!("{} km", unidad.kilometraje_actual)} }
        }),
    ];

    html! {
        <div class="p-6">
            <PageHeader title="Unidades" />
            <DataTable<Unidad>
                data={rows(&unidades)}
                {columns}
                search_keys={vec!["placa", "marca", "modelo", "estado"]}
                loading={unidades.loading}
                {on_new}
                on_edit={Some(on_edit)}
                on_delete={Some(on_delete)}
            />
            if editor.is_open() {
                <UnidadModal unidad={editor.record()} {on_close} {on_saved} />
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct UnidadModalProps {
    unidad: Option<Unidad>,
    on_close: Callback<()>,
    on_saved: Callback<()>,
}

#[function_component(UnidadModal)]
fn unidad_modal(props: &UnidadModalProps) -> Html {
    let form = use_state(|| props.unidad.clone().unwrap_or_default());
    let mode = FormMode::for_record(props.unidad.as_ref());

    let on_submit = {
        let form = form.clone();
        let on_saved = props.on_saved.clone();
        Callback::from(move |_: ()| submit_record((*form).clone(), mode, on_saved.clone()))
    };

    let title = match mode {
        FormMode::Create => "Nueva Unidad",
        FormMode::Edit => "Editar Unidad",
    };

    html! {
        <Modal {title} on_close={props.on_close.clone()} {on_submit}>
            <TextField
                label="Tipo de unidad"
                value={form.tipo_unidad.clone()}
                on_change={field_setter(&form, |u, v| u.tipo_unidad = v)}
            />
            <TextField
                label="Placa"
                value={form.placa.clone()}
                on_change={field_setter(&form, |u, v| u.placa = v)}
            />
            <div class="grid grid-cols-2 gap-4">
                <TextField
                    label="Marca"
                    value={form.marca.clone()}
                    on_change={field_setter(&form, |u, v| u.marca = v)}
                />
                <TextField
                    label="Modelo"
                    value={form.modelo.clone()}
                    on_change={field_setter(&form, |u, v| u.modelo = v)}
                />
            </div>
            <div class="grid grid-cols-2 gap-4">
                <TextField
                    label="Año"
                    input_type="number"
                    value={form.anio.to_string()}
                    on_change={field_setter(&form, |u, v| u.anio = v.parse().unwrap_or(u.anio))}
                />
                <TextField
                    label="Kilometraje actual"
                    input_type="number"
                    step="0.1"
                    value={form.kilometraje_actual.to_string()}
                    on_change={field_setter(&form, |u, v| u.kilometraje_actual = v.parse().unwrap_or_default())}
                />
            </div>
            <SelectField
                label="Estado"
                value={form.estado.clone()}
                options={options(&ESTADOS_UNIDAD)}
                on_change={field_setter(&form, |u, v| u.estado = v)}
            />
        </Modal>
    }
}
