use flores_shared::table::{
    DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE_OPTIONS, TableRecord, TableState, filter, page_count,
};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

/// Rows coming back with a zero or repeated id still need distinct keys.
fn row_key(index: usize, id: i32) -> String {
    format!("{index}-{id}")
}

/// One table column. Without a renderer the cell shows `TableRecord::field(key)`.
#[derive(Clone, PartialEq)]
pub struct Column<T> {
    pub key: &'static str,
    pub label: &'static str,
    pub render: Option<Callback<T, Html>>,
}

impl<T: 'static> Column<T> {
    pub fn new(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            render: None,
        }
    }

    pub fn with_render(key: &'static str, label: &'static str, render: impl Fn(T) -> Html + 'static) -> Self {
        Self {
            key,
            label,
            render: Some(Callback::from(render)),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct DataTableProps<T>
where
    T: TableRecord + Clone + PartialEq + 'static,
{
    pub data: Vec<T>,
    pub columns: Vec<Column<T>>,
    #[prop_or_default]
    pub search_keys: Vec<&'static str>,
    #[prop_or(DEFAULT_PAGE_SIZE_OPTIONS.to_vec())]
    pub page_size_options: Vec<usize>,
    #[prop_or(DEFAULT_PAGE_SIZE)]
    pub default_page_size: usize,
    #[prop_or_default]
    pub on_edit: Option<Callback<T>>,
    #[prop_or_default]
    pub on_delete: Option<Callback<i32>>,
    #[prop_or_default]
    pub on_new: Option<Callback<()>>,
    #[prop_or_default]
    pub loading: bool,
}

/// Searchable, paginated table with optional edit/delete actions per row.
#[function_component(DataTable)]
pub fn data_table<T>(props: &DataTableProps<T>) -> Html
where
    T: TableRecord + Clone + PartialEq + 'static,
{
    let state = use_state(|| TableState::new(props.default_page_size));

    let filtered = filter(&props.data, &props.search_keys, &state.search);
    let len = filtered.len();
    let current_page = state.current_page(len);
    let total_pages = page_count(len, state.page_size);
    let has_actions = props.on_edit.is_some() || props.on_delete.is_some();

    let on_search = {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*state).clone();
            next.set_search(input.value());
            state.set(next);
        })
    };

    let on_page_size = {
        let state = state.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(size) = select.value().parse::<usize>() {
                let mut next = (*state).clone();
                next.set_page_size(size);
                state.set(next);
            }
        })
    };

    let on_prev = {
        let state = state.clone();
        Callback::from(move |_| {
            let mut next = (*state).clone();
            next.prev(len);
            state.set(next);
        })
    };

    let on_next = {
        let state = state.clone();
        Callback::from(move |_| {
            let mut next = (*state).clone();
            next.next(len);
            state.set(next);
        })
    };

    let colspan = (props.columns.len() + usize::from(has_actions)).to_string();

    html! {
        <div class="rounded-lg shadow" style="background-color: var(--bg-secondary);">
            <div class="flex items-center justify-between p-4 border-b" style="border-color: var(--border-primary);">
                <input
                    type="text"
                    placeholder="Buscar..."
                    value={state.search.clone()}
                    oninput={on_search}
                    class="w-72 px-3 py-2 rounded-lg text-sm"
                    style="background-color: var(--bg-input); border: 1px solid var(--border-primary); color: var(--fg-primary);"
                />
                if let Some(on_new) = props.on_new.clone() {
                    <button
                        onclick={Callback::from(move |_| on_new.emit(()))}
                        class="px-4 py-2 rounded-lg text-sm font-medium"
                        style="background-color: var(--button-primary-bg); color: var(--button-primary-text);"
                    >
                        {"+ Nuevo"}
                    </button>
                }
            </div>

            <div class="overflow-x-auto">
                <table class="min-w-full text-sm">
                    <thead style="background-color: var(--bg-tertiary);">
                        <tr>
                            { for props.columns.iter().map(|column| html! {
                                <th class="px-4 py-3 text-left font-semibold" style="color: var(--fg-secondary);">
                                    {column.label}
                                </th>
                            })}
                            if has_actions {
                                <th class="px-4 py-3 text-center font-semibold" style="color: var(--fg-secondary);">
                                    {"Acciones"}
                                </th>
                            }
                        </tr>
                    </thead>
                    <tbody>
                        if props.loading {
                            <tr>
                                <td colspan={colspan.clone()} class="px-4 py-6 text-center" style="color: var(--fg-muted);">
                                    {"Cargando..."}
                                </td>
                            </tr>
                        } else if filtered.is_empty() {
                            <tr>
                                <td colspan={colspan.clone()} class="px-4 py-6 text-center" style="color: var(--fg-muted);">
                                    {"Sin registros"}
                                </td>
                            </tr>
                        } else {
                            { for state.page_slice(&filtered).iter().enumerate().map(|(index, row)| {
                                html! {
                                    <TableRow<T>
                                        key={row_key(index, row.record_id())}
                                        row={(*row).clone()}
                                        columns={props.columns.clone()}
                                        on_edit={props.on_edit.clone()}
                                        on_delete={props.on_delete.clone()}
                                    />
                                }
                            })}
                        }
                    </tbody>
                </table>
            </div>

            <div class="flex items-center justify-between p-4 border-t text-sm" style="border-color: var(--border-primary); color: var(--fg-secondary);">
                <div class="flex items-center space-x-2">
                    <span>{"Items por página:"}</span>
                    <select
                        onchange={on_page_size}
                        class="px-2 py-1 rounded"
                        style="background-color: var(--bg-input); border: 1px solid var(--border-primary); color: var(--fg-primary);"
                    >
                        { for props.page_size_options.iter().map(|size| html! {
                            <option value={size.to_string()} selected={*size == state.page_size}>
                                {size}
                            </option>
                        })}
                    </select>
                </div>
                <div class="flex items-center space-x-3">
                    <button
                        onclick={on_prev}
                        disabled={!state.can_prev(len)}
                        class="px-3 py-1 rounded border disabled:opacity-50"
                        style="border-color: var(--border-primary);"
                    >
                        {"Anterior"}
                    </button>
                    <span>{format!("Página {} de {}", current_page, total_pages)}</span>
                    <button
                        onclick={on_next}
                        disabled={!state.can_next(len)}
                        class="px-3 py-1 rounded border disabled:opacity-50"
                        style="border-color: var(--border-primary);"
                    >
                        {"Siguiente"}
                    </button>
                </div>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct TableRowProps<T>
where
    T: TableRecord + Clone + PartialEq + 'static,
{
    row: T,
    columns: Vec<Column<T>>,
    on_edit: Option<Callback<T>>,
    on_delete: Option<Callback<i32>>,
}

#[function_component(TableRow)]
fn table_row<T>(props: &TableRowProps<T>) -> Html
where
    T: TableRecord + Clone + PartialEq + 'static,
{
    let row = &props.row;

    html! {
        <tr class="border-t" style="border-color: var(--border-primary); color: var(--fg-primary);">
            { for props.columns.iter().map(|column| {
                let cell = match &column.render {
                    Some(render) => render.emit(row.clone()),
                    None => html! { {row.field(column.key).unwrap_or_default()} },
                };
                html! { <td class="px-4 py-3">{cell}</td> }
            })}
            if props.on_edit.is_some() || props.on_delete.is_some() {
                <td class="px-4 py-3">
                    <div class="flex justify-center space-x-2">
                        if let Some(on_edit) = props.on_edit.clone() {
                            <button
                                onclick={
                                    let row = row.clone();
                                    Callback::from(move |_| on_edit.emit(row.clone()))
                                }
                                class="px-2 py-1 rounded text-xs font-medium bg-blue-600 text-white hover:bg-blue-700"
                            >
                                {"Editar"}
                            </button>
                        }
                        if let Some(on_delete) = props.on_delete.clone() {
                            <button
                                onclick={
                                    let id = row.record_id();
                                    Callback::from(move |_| on_delete.emit(id))
                                }
                                class="px-2 py-1 rounded text-xs font-medium bg-red-600 text-white hover:bg-red-700"
                            >
                                {"Eliminar"}
                            </button>
                        }
                    </div>
                </td>
            }
        </tr>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_keys_stay_unique_for_repeated_ids() {
        let keys: Vec<String> = [0, 0, 7].iter().enumerate().map(|(i, id)| row_key(i, *id)).collect();
        assert_eq!(keys, ["0-0", "1-0", "2-7"]);
    }
}
