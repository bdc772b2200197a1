use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::layout::Route;

fn description(route: &Route) -> &'static str {
    match route {
        Route::Clientes => "Cartera de clientes y su tipo",
        Route::Unidades => "Flota, estado y kilometraje",
        Route::Conductores => "Licencias, vehículos y estado",
        Route::Envios => "Mercancía, rutas y entregas",
        Route::Mantenimientos => "Servicio de las unidades",
        Route::Facturacion => "Facturas y estado de pago",
        Route::Usuarios => "Cuentas y roles",
        Route::Rutas => "Calcular y guardar rutas en el mapa",
        Route::Dashboard | Route::NotFound => "",
    }
}

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    html! {
        <div class="p-6 space-y-6">
            <div>
                <h1 class="text-2xl font-bold" style="color: var(--fg-primary);">{"Transporte Flores"}</h1>
                <p style="color: var(--fg-muted);">{"Seleccione un módulo para comenzar"}</p>
            </div>

            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4">
                { for Route::menu().into_iter().filter(|route| *route != Route::Dashboard).map(|route| html! {
                    <Link<Route> to={route.clone()} classes="block rounded-lg shadow p-5 hover:shadow-lg transition-shadow">
                        <div style="background-color: var(--bg-secondary);" class="rounded-lg p-1">
                            <div class="text-3xl mb-2">{route.icon()}</div>
                            <h3 class="text-lg font-semibold" style="color: var(--fg-primary);">{route.label()}</h3>
                            <p class="text-sm" style="color: var(--fg-muted);">{description(&route)}</p>
                        </div>
                    </Link<Route>>
                })}
            </div>
        </div>
    }
}
