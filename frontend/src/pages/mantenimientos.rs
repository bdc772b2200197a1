use flores_shared::api::{FormMode, date_part};
use flores_shared::models::{Mantenimiento, Unidad};
use yew::prelude::*;

use crate::components::data_table::{Column, DataTable};
use crate::components::layout::PageHeader;
use crate::components::modal::{Editor, Modal, SelectField, TextField, field_setter};
use crate::hooks::{confirm_delete, rows, submit_record, use_list};

#[function_component(MantenimientosPage)]
pub fn mantenimientos_page() -> Html {
    let mantenimientos = use_list::<Mantenimiento>();
    let unidades = use_list::<Unidad>();
    let editor = use_state(|| Editor::<Mantenimiento>::Closed);

    let reload = {
        let mantenimientos = mantenimientos.clone();
        Callback::from(move |_: ()| mantenimientos.run())
    };

    let on_new = {
        let editor = editor.clone();
        Callback::from(move |_: ()| editor.set(Editor::New))
    };

    let on_edit = {
        let editor = editor.clone();
        Callback::from(move |mantenimiento: Mantenimiento| editor.set(Editor::Edit(mantenimiento)))
    };

    let on_delete = {
        let reload = reload.clone();
        Callback::from(move |id: i32| confirm_delete::<Mantenimiento>(id, reload.clone()))
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
        Column::new("idMantenimientos", "ID"),
        Column::new("idUnidad", "Unidad"),
        Column::with_render("fechaMantenimiento", "Fecha", |m: Mantenimiento| {
            html! { {date_part(&m.fecha_mantenimiento).to_string()} }
        }),
        Column::with_render("fechaSiguienteMantenimiento", "Próximo mantenimiento", |m: Mantenimiento| {
            html! { {date_part(&m.fecha_siguiente_mantenimiento).to_string()} }
        }),
    ];

    html! {
        <div class="p-6">
            <PageHeader title="Mantenimientos" />
            <DataTable<Mantenimiento>
                data={rows(&mantenimientos)}
                {columns}
                search_keys={vec!["idUnidad", "fechaMantenimiento", "fechaSiguienteMantenimiento"]}
                loading={mantenimientos.loading}
                {on_new}
                on_edit={Some(on_edit)}
                on_delete={Some(on_delete)}
            />
            if editor.is_open() {
                <MantenimientoModal
                    mantenimiento={editor.record()}
                    unidades={rows(&unidades)}
                    {on_close}
                    {on_saved}
                />
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct MantenimientoModalProps {
    mantenimiento: Option<Mantenimiento>,
    unidades: Vec<Unidad>,
    on_close: Callback<()>,
    on_saved: Callback<()>,
}

#[function_component(MantenimientoModal)]
fn mantenimiento_modal(props: &MantenimientoModalProps) -> Html {
    let form = use_state(|| props.mantenimiento.clone().unwrap_or_default());
    let mode = FormMode::for_record(props.mantenimiento.as_ref());

    let on_submit = {
        let form = form.clone();
        let on_saved = props.on_saved.clone();
        Callback::from(move |_: ()| submit_record((*form).clone(), mode, on_saved.clone()))
    };

    let title = match mode {
        FormMode::Create => "Nuevo Mantenimiento",
        FormMode::Edit => "Editar Mantenimiento",
    };

    let unidades: Vec<(AttrValue, AttrValue)> = props
        .unidades
        .iter()
        .map(|unidad| {
            (
                AttrValue::from(unidad.id_unidades.to_string()),
                AttrValue::from(format!("{} ({})", unidad.placa, unidad.tipo_unidad)),
            )
        })
        .collect();

    html! {
        <Modal {title} on_close={props.on_close.clone()} {on_submit}>
            // An empty selection is sent as null.
            <SelectField
                label="Unidad"
                value={form.id_unidad.map(|id| id.to_string()).unwrap_or_default()}
                options={unidades}
                on_change={field_setter(&form, |m, v| m.set_unidad(&v))}
            />
            <TextField
                label="Fecha de mantenimiento"
                input_type="date"
                value={date_part(&form.fecha_mantenimiento).to_string()}
                on_change={field_setter(&form, |m, v| m.fecha_mantenimiento = v)}
            />
            <TextField
                label="Siguiente mantenimiento"
                input_type="date"
                value={date_part(&form.fecha_siguiente_mantenimiento).to_string()}
                on_change={field_setter(&form, |m, v| m.fecha_siguiente_mantenimiento = v)}
            />
        </Modal>
    }
}
