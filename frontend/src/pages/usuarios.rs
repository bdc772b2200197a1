// Usuarios - application accounts

use flores_shared::api::FormMode;
use flores_shared::models::{ROLES_USUARIO, Usuario};
use yew::prelude::*;

use crate::components::data_table::{Column, DataTable};
use crate::components::layout::PageHeader;
use crate::components::modal::{Editor, Modal, SelectField, TextField, field_setter, options};
use crate::hooks::{confirm_delete, rows, submit_record, use_list};

#[function_component(UsuariosPage)]
pub fn usuarios_page() -> Html {
    let usuarios = use_list::<Usuario>();
    let editor = use_state(|| Editor::<Usuario>::Closed);

    let reload = {
        let usuarios = usuarios.clone();
        Callback::from(move |_: ()| usuarios.run())
    };

    let on_new = {
        let editor = editor.clone();
        Callback::from(move |_: ()| editor.set(Editor::New))
    };

    let on_edit = {
        let editor = editor.clone();
        Callback::from(move |usuario: Usuario| editor.set(Editor::Edit(usuario)))
    };

    let on_delete = {
        let reload = reload.clone();
        Callback::from(move |id: i32| confirm_delete::<Usuario>(id, reload.clone()))
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
        Column::new("nombreUsuario", "Usuario"),
        Column::new("email", "Correo"),
        Column::new("rol", "Rol"),
    ];

    html! {
        <div class="p-6">
            <PageHeader title="Usuarios" />
            <DataTable<Usuario>
                data={rows(&usuarios)}
                {columns}
                search_keys={vec!["nombreUsuario", "email", "rol"]}
                loading={usuarios.loading}
                {on_new}
                on_edit={Some(on_edit)}
                on_delete={Some(on_delete)}
            />
            if editor.is_open() {
                <UsuarioModal usuario={editor.record()} {on_close} {on_saved} />
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct UsuarioModalProps {
    usuario: Option<Usuario>,
    on_close: Callback<()>,
    on_saved: Callback<()>,
}

#[function_component(UsuarioModal)]
fn usuario_modal(props: &UsuarioModalProps) -> Html {
    let form = use_state(|| props.usuario.clone().unwrap_or_default());
    let mode = FormMode::for_record(props.usuario.as_ref());

    let on_submit = {
        let form = form.clone();
        let on_saved = props.on_saved.clone();
        Callback::from(move |_: ()| submit_record((*form).clone(), mode, on_saved.clone()))
    };

    let title = match mode {
        FormMode::Create => "Nuevo Usuario",
        FormMode::Edit => "Editar Usuario",
    };

    html! {
        <Modal {title} on_close={props.on_close.clone()} {on_submit}>
            <TextField
                label="Nombre de usuario"
                value={form.nombre_usuario.clone()}
                on_change={field_setter(&form, |u, v| u.nombre_usuario = v)}
            />
            <TextField
                label="Correo"
                input_type="email"
                value={form.email.clone()}
                on_change={field_setter(&form, |u, v| u.email = v)}
            />
            <SelectField
                label="Rol"
                value={form.rol.clone()}
                options={options(&ROLES_USUARIO)}
                on_change={field_setter(&form, |u, v| u.rol = v)}
            />
            <TextField
                label="Contraseña"
                input_type="password"
                value={form.contrasena.clone()}
                on_change={field_setter(&form, |u, v| u.contrasena = v)}
            />
        </Modal>
    }
}
