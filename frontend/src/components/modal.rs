// Modal shell and form inputs shared by the entity editors

use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

/// Which record, if any, the page's modal is editing.
#[derive(Clone, PartialEq)]
pub enum Editor<T> {
    Closed,
    New,
    Edit(T),
}

impl<T: Clone> Editor<T> {
    pub fn is_open(&self) -> bool {
        !matches!(self, Editor::Closed)
    }

    pub fn record(&self) -> Option<T> {
        match self {
            Editor::Edit(record) => Some(record.clone()),
            _ => None,
        }
    }
}

/// Callback that applies an input's value to the form state.
pub fn field_setter<T: Clone + 'static>(
    state: &UseStateHandle<T>,
    apply: fn(&mut T, String),
) -> Callback<String> {
    let state = state.clone();
    Callback::from(move |value: String| {
        let mut next = (*state).clone();
        apply(&mut next, value);
        state.set(next);
    })
}

pub fn options(values: &[&'static str]) -> Vec<(AttrValue, AttrValue)> {
    values
        .iter()
        .map(|value| (AttrValue::Static(value), AttrValue::Static(value)))
        .collect()
}

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub title: AttrValue,
    pub on_close: Callback<()>,
    pub on_submit: Callback<()>,
    #[prop_or_default]
    pub busy: bool,
    #[prop_or_default]
    pub error: Option<AttrValue>,
    pub children: Html,
}

#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    let on_close = props.on_close.reform(|_: MouseEvent| ());
    let on_submit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    html! {
        <div class="fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center z-50">
            <form
                onsubmit={on_submit}
                class="rounded-lg p-6 w-full max-w-lg max-h-screen overflow-y-auto"
                style="background-color: var(--bg-secondary); color: var(--fg-primary);"
            >
                <div class="flex items-center justify-between mb-4">
                    <h2 class="text-xl font-bold">{props.title.clone()}</h2>
                    <button type="button" onclick={on_close.clone()} class="text-2xl leading-none" style="color: var(--fg-muted);">
                        {"×"}
                    </button>
                </div>

                if let Some(error) = props.error.clone() {
                    <div class="mb-4 px-3 py-2 rounded bg-red-100 text-red-700 text-sm">{error}</div>
                }

                <div class="space-y-4">
                    { props.children.clone() }
                </div>

                <div class="flex justify-end space-x-2 mt-6">
                    <button
                        type="button"
                        onclick={on_close}
                        class="px-4 py-2 border rounded-md"
                        style="border-color: var(--border-primary);"
                    >
                        {"Cancelar"}
                    </button>
                    <button
                        type="submit"
                        disabled={props.busy}
                        class="px-4 py-2 rounded-md disabled:opacity-50"
                        style="background-color: var(--button-primary-bg); color: var(--button-primary-text);"
                    >
                        { if props.busy { "Guardando..." } else { "Guardar" } }
                    </button>
                </div>
            </form>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TextFieldProps {
    pub label: AttrValue,
    pub value: AttrValue,
    pub on_change: Callback<String>,
    #[prop_or(AttrValue::Static("text"))]
    pub input_type: AttrValue,
    #[prop_or_default]
    pub step: Option<AttrValue>,
}

#[function_component(TextField)]
pub fn text_field(props: &TextFieldProps) -> Html {
    let oninput = props.on_change.reform(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        input.value()
    });

    html! {
        <label class="block">
            <span class="block text-sm font-medium mb-1" style="color: var(--fg-secondary);">{props.label.clone()}</span>
            <input
                type={props.input_type.clone()}
                step={props.step.clone()}
                value={props.value.clone()}
                {oninput}
                class="w-full px-3 py-2 rounded-md text-sm"
                style="background-color: var(--bg-input); border: 1px solid var(--border-primary); color: var(--fg-primary);"
            />
        </label>
    }
}

#[derive(Properties, PartialEq)]
pub struct SelectFieldProps {
    pub label: AttrValue,
    pub value: AttrValue,
    /// `(value, label)` pairs.
    pub options: Vec<(AttrValue, AttrValue)>,
    pub on_change: Callback<String>,
    #[prop_or(Some(AttrValue::Static("Seleccione...")))]
    pub placeholder: Option<AttrValue>,
}

#[function_component(SelectField)]
pub fn select_field(props: &SelectFieldProps) -> Html {
    let onchange = props.on_change.reform(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        select.value()
    });

    html! {
        <label class="block">
            <span class="block text-sm font-medium mb-1" style="color: var(--fg-secondary);">{props.label.clone()}</span>
            <select
                {onchange}
                class="w-full px-3 py-2 rounded-md text-sm"
                style="background-color: var(--bg-input); border: 1px solid var(--border-primary); color: var(--fg-primary);"
            >
                if let Some(placeholder) = props.placeholder.clone() {
                    <option value="" selected={props.value.is_empty()}>{placeholder}</option>
                }
                { for props.options.iter().map(|(value, label)| html! {
                    <option value={value.clone()} selected={*value == props.value}>{label.clone()}</option>
                })}
            </select>
        </label>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editor_exposes_record_only_when_editing() {
        assert!(!Editor::<i32>::Closed.is_open());
        assert!(Editor::<i32>::New.is_open());
        assert_eq!(Editor::<i32>::New.record(), None);
        assert_eq!(Editor::Edit(7).record(), Some(7));
    }

    #[test]
    fn options_use_value_as_label() {
        let opts = options(&["Regular", "VIP"]);
        assert_eq!(opts.len(), 2);
        assert_eq!(opts[1].0, opts[1].1);
        assert_eq!(opts[1].0.as_str(), "VIP");
    }
}
