// Clientes - customer list and editor

use flores_shared::api::FormMode;
use flores_shared::models::{Cliente, TIPOS_CLIENTE};
use yew::prelude::*;

use crate::components::data_table::{Column, DataTable};
use crate::components::layout::PageHeader;
use crate::components::modal::{Editor, Modal, SelectField, TextField, field_setter, options};
use crate::hooks::{confirm_delete, rows, submit_record, use_list};

#[function_component(ClientesPage)]
pub fn clientes_page() -> Html {
    let clientes = use_list::<Cliente>();
    let editor = use_state(|| Editor::<Cliente>::Closed);

    let reload = {
        let clientes = clientes.clone();
        Callback::from(move |_: ()| clientes.run())
    };

    let on_new = {
        let editor = editor.clone();
        Callback::from(move |_: ()| editor.set(Editor::New))
    };

    let on_edit = {
        let editor = editor.clone();
        Callback::from(move |cliente: Cliente| editor.set(Editor::Edit(cliente)))
    };

    let on_delete = {
        let reload = reload.clone();
        Callback::from(move |id: i32| confirm_delete::<Cliente>(id, reload.clone()))
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
        Column::new("nombreCliente", "Nombre"),
        Column::new("direccion", "Dirección"),
        Column::new("telefono", "Teléfono"),
        Column::new("email", "Correo"),
        Column::new("tipoCliente", "Tipo"),
    ];

    html! {
        <div class="p-6">
            <PageHeader title="Clientes" />
            <DataTable<Cliente>
                data={rows(&clientes)}
                {columns}
                search_keys={vec!["nombreCliente", "email", "telefono", "tipoCliente"]}
                loading={clientes.loading}
                {on_new}
                on_edit={Some(on_edit)}
                on_delete={Some(on_delete)}
            />
            if editor.is_open() {
                <ClienteModal cliente={editor.record()} {on_close} {on_saved} />
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ClienteModalProps {
    cliente: Option<Cliente>,
    on_close: Callback<()>,
    on_saved: Callback<()>,
}

#[function_component(ClienteModal)]
fn cliente_modal(props: &ClienteModalProps) -> Html {
    let form = use_state(|| props.cliente.clone().unwrap_or_default());
    let mode = FormMode::for_record(props.cliente.as_ref());

    let on_submit = {
        let form = form.clone();
        let on_saved = props.on_saved.clone();
        Callback::from(move |_: ()| submit_record((*form).clone(), mode, on_saved.clone()))
    };

    let title = match mode {
        FormMode::Create => "Nuevo Cliente",
        FormMode::Edit => "Editar Cliente",
    };

    html! {
        <Modal {title} on_close={props.on_close.clone()} {on_submit}>
            <TextField
                label="Nombre"
                value={form.nombre_cliente.clone()}
                on_change={field_setter(&form, |c, v| c.nombre_cliente = v)}
            />
            <TextField
                label="Dirección"
                value={form.direccion.clone()}
                on_change={field_setter(&form, |c, v| c.direccion = v)}
            />
            <TextField
                label="Teléfono"
                input_type="tel"
                value={form.telefono.clone()}
                on_change={field_setter(&form, |c, v| c.telefono = v)}
            />
            <TextField
                label="Correo"
                input_type="email"
                value={form.email.clone()}
                on_change={field_setter(&form, |c, v| c.email = v)}
            />
            <SelectField
                label="Tipo de cliente"
                value={form.tipo_cliente.clone()}
                options={options(&TIPOS_CLIENTE)}
                on_change={field_setter(&form, |c, v| c.tipo_cliente = v)}
            />
        </Modal>
    }
}
