use yew::prelude::*;
use yew_router::prelude::*;

mod components;
mod config;
mod hooks;
mod map;
mod pages;
mod services;

use components::layout::{Layout, Route};
use pages::{
    clientes::ClientesPage,
    conductores::ConductoresPage,
    dashboard::DashboardPage,
    envios::EnviosPage,
    facturacion::FacturacionPage,
    mantenimientos::MantenimientosPage,
    ruta::RutaPage,
    unidades::UnidadesPage,
    usuarios::UsuariosPage,
};

fn switch(routes: Route) -> Html {
    match routes {
        Route::Dashboard => html! { <DashboardPage /> },
        Route::Clientes => html! { <ClientesPage /> },
        Route::Unidades => html! { <UnidadesPage /> },
        Route::Conductores => html! { <ConductoresPage /> },
        Route::Envios => html! { <EnviosPage /> },
        Route::Mantenimientos => html! { <MantenimientosPage /> },
        Route::Facturacion => html! { <FacturacionPage /> },
        Route::Usuarios => html! { <UsuariosPage /> },
        Route::Rutas => html! { <RutaPage /> },
        Route::NotFound => html! {
            <div class="min-h-full flex items-center justify-center py-24">
                <div class="text-center">
                    <h1 class="text-6xl font-bold" style="color: var(--fg-primary);">{"404"}</h1>
                    <p class="text-xl mt-4" style="color: var(--fg-muted);">{"Página no encontrada"}</p>
                    <Link<Route> to={Route::Dashboard} classes="inline-block mt-6 px-4 py-2 rounded-lg bg-blue-600 text-white">
                        {"Volver al inicio"}
                    </Link<Route>>
                </div>
            </div>
        },
    }
}

#[function_component(App)]
fn app() -> Html {
    html! {
        <BrowserRouter>
            <Layout>
                <Switch<Route> render={switch} />
            </Layout>
        </BrowserRouter>
    }
}

/// Appends a stylesheet link to `<head>`.
fn load_stylesheet(href: &str) {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let (Some(head), Ok(link)) = (document.head(), document.create_element("link")) else {
        return;
    };
    let attached = link
        .set_attribute("href", href)
        .and_then(|_| link.set_attribute("rel", "stylesheet"))
        .and_then(|_| head.append_child(&link).map(|_| ()));
    if let Err(e) = attached {
        log::warn!("No se pudo cargar {href}: {:?}", e);
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());

    // Load Tailwind CSS
    load_stylesheet("https://cdn.jsdelivr.net/npm/tailwindcss@2.2.19/dist/tailwind.min.css");
    // Load Inter
    load_stylesheet("https://fonts.googleapis.com/css2?family=Inter:wght@300;400;500;600;700&display=swap");
    load_stylesheet("/static/flores.css");

    log::info!("Transporte Flores {}", env!("CARGO_PKG_VERSION"));
    yew::Renderer::<App>::new().render();
}
