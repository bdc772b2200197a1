// Shared hooks and mutation helpers used by every list screen
use flores_shared::api::{
    FormMode, Listed, Resource, delete_request, submit_request, success_message,
};
use flores_shared::ApiError;
use gloo::dialogs::{alert, confirm};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::services::ApiClient;

/// Fetches `{Namespace}/Lista` on mount. Call `run()` on the handle to refetch.
/// Failures are logged and leave the list empty.
#[hook]
pub fn use_list<T: Listed>() -> UseAsyncHandle<Vec<T>, ApiError> {
    use_async_with_options(
        async move {
            ApiClient::list::<T>().await.map_err(|e| {
                log::error!("Error al obtener {}: {} ({})", T::NAMESPACE, e, e.code());
                e
            })
        },
        UseAsyncOptions::enable_auto(),
    )
}

/// Rows of a list handle, empty while loading or after a failure.
pub fn rows<T: Clone>(handle: &UseAsyncHandle<Vec<T>, ApiError>) -> Vec<T> {
    handle.data.clone().unwrap_or_default()
}

/// Sends the modal's record to the create or edit endpoint. On success shows
/// the confirmation and emits `on_saved`; on failure shows the backend text.
pub fn submit_record<R: Resource>(record: R, mode: FormMode, on_saved: Callback<()>) {
    spawn_local(async move {
        let result = match submit_request(&record, mode) {
            Ok(request) => ApiClient::execute(&request).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => {
                alert(&success_message::<R>(mode));
                on_saved.emit(());
            }
            Err(e) => {
                log::error!("Error al guardar {}: {}", R::NOUN, e);
                alert(&e.to_string());
            }
        }
    });
}

/// Asks for confirmation, deletes the record and emits `on_deleted`.
pub fn confirm_delete<R: Resource>(id: i32, on_deleted: Callback<()>) {
    if !confirm("¿Estás seguro? ¡No podrás revertir esto!") {
        return;
    }
    spawn_local(async move {
        match ApiClient::execute(&delete_request::<R>(id)).await {
            Ok(()) => on_deleted.emit(()),
            Err(e) => {
                log::error!("Error al eliminar {} {}: {}", R::NOUN, id, e);
                alert(&e.to_string());
            }
        }
    });
}
