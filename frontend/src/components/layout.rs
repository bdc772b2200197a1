use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Dashboard,
    #[at("/clientes")]
    Clientes,
    #[at("/unidades")]
    Unidades,
    #[at("/conductores")]
    Conductores,
    #[at("/envios")]
    Envios,
    #[at("/mantenimientos")]
    Mantenimientos,
    #[at("/facturacion")]
    Facturacion,
    #[at("/usuarios")]
    Usuarios,
    #[at("/rutas")]
    Rutas,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    pub fn label(&self) -> &'static str {
        match self {
            Route::Dashboard => "Inicio",
            Route::Clientes => "Clientes",
            Route::Unidades => "Unidades",
            Route::Conductores => "Conductores",
            Route::Envios => "Envíos",
            Route::Mantenimientos => "Mantenimientos",
            Route::Facturacion => "Facturación",
            Route::Usuarios => "Usuarios",
            Route::Rutas => "Rutas",
            Route::NotFound => "No encontrado",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Route::Dashboard => "🏠",
            Route::Clientes => "👥",
            Route::Unidades => "🚚",
            Route::Conductores => "🧑‍✈️",
            Route::Envios => "📦",
            Route::Mantenimientos => "🔧",
            Route::Facturacion => "🧾",
            Route::Usuarios => "🔐",
            Route::Rutas => "🗺️",
            Route::NotFound => "❓",
        }
    }

    /// Screens listed in the sidebar and on the dashboard, in menu order.
    pub fn menu() -> [Route; 9] {
        [
            Route::Dashboard,
            Route::Clientes,
            Route::Unidades,
            Route::Conductores,
            Route::Envios,
            Route::Mantenimientos,
            Route::Facturacion,
            Route::Usuarios,
            Route::Rutas,
        ]
    }
}

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Html,
}

/// Collapsible sidebar plus the admin header.
#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    let current_route = use_route::<Route>().unwrap_or(Route::Dashboard);
    let sidebar_collapsed = use_state(|| false);

    let toggle_sidebar = {
        let sidebar_collapsed = sidebar_collapsed.clone();
        Callback::from(move |_| sidebar_collapsed.set(!*sidebar_collapsed))
    };

    let sidebar_width = if *sidebar_collapsed { "w-16" } else { "w-64" };

    html! {
        <div class="min-h-screen flex" style="background-color: var(--bg-primary);">
            <aside
                class={format!("flex-shrink-0 transition-all duration-200 {}", sidebar_width)}
                style="background-color: var(--sidebar-bg); color: var(--sidebar-fg);"
            >
                <div class="h-full flex flex-col">
                    <div class="flex items-center justify-between p-4 border-b" style="border-color: var(--sidebar-border);">
                        if !*sidebar_collapsed {
                            <span class="text-lg font-semibold whitespace-nowrap">{"🚚 Transporte Flores"}</span>
                        }
                        <button onclick={toggle_sidebar} class="p-1 rounded hover:opacity-75">
                            { if *sidebar_collapsed { "»" } else { "«" } }
                        </button>
                    </div>

                    <nav class="flex-1 overflow-y-auto py-4 space-y-1 px-2">
                        { for Route::menu().into_iter().map(|route| html! {
                            <SidebarLink
                                route={route}
                                collapsed={*sidebar_collapsed}
                                current={current_route.clone()}
                            />
                        })}
                    </nav>
                </div>
            </aside>

            <div class="flex-1 flex flex-col min-w-0">
                <header class="sticky top-0 z-40 h-14 flex items-center px-6 shadow-sm" style="background-color: var(--bg-secondary);">
                    <h1 class="text-lg font-semibold" style="color: var(--fg-primary);">{"Panel de Administración"}</h1>
                </header>
                <main class="flex-1 overflow-auto">
                    { props.children.clone() }
                </main>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct SidebarLinkProps {
    route: Route,
    collapsed: bool,
    current: Route,
}

#[function_component(SidebarLink)]
fn sidebar_link(props: &SidebarLinkProps) -> Html {
    let classes = if props.route == props.current {
        "flex items-center px-3 py-2 rounded-lg bg-blue-600 text-white"
    } else {
        "flex items-center px-3 py-2 rounded-lg hover:bg-gray-700"
    };

    html! {
        <Link<Route> to={props.route.clone()} classes={classes}>
            <span class="w-6 text-center">{props.route.icon()}</span>
            if !props.collapsed {
                <span class="ml-3">{props.route.label()}</span>
            }
        </Link<Route>>
    }
}

#[derive(Properties, PartialEq)]
pub struct PageHeaderProps {
    pub title: AttrValue,
}

/// Screen title with a way back to the dashboard.
#[function_component(PageHeader)]
pub fn page_header(props: &PageHeaderProps) -> Html {
    html! {
        <div class="flex items-center justify-between mb-4">
            <h2 class="text-2xl font-bold" style="color: var(--fg-primary);">{props.title.clone()}</h2>
            <Link<Route> to={Route::Dashboard}
                classes="px-3 py-2 rounded-lg text-sm bg-gray-500 text-white hover:bg-gray-600">
                {"Inicio"}
            </Link<Route>>
        </div>
    }
}
