use yew::prelude::*;
use yew_router::prelude::*;

mod api_client;
mod components;
pub mod common;
pub mod hooks;
pub mod settings;

use crate::common::toast::ToastProvider;
use components::home::HomePage;
use components::layout::Layout;

#[derive(Debug, Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    log::debug!("Routing to: {:?}", routes);
    match routes {
        Route::Home => {
            html! { <Layout title="Chapelco Weather"><HomePage /></Layout> }
        }
        Route::NotFound => {
            // Any unmatched path goes back to the dashboard.
            log::debug!("Unmatched path, redirecting to /");
            html! { <Redirect<Route> to={Route::Home} /> }
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <ToastProvider>
            <BrowserRouter>
                <Switch<Route> render={switch} />
            </BrowserRouter>
        </ToastProvider>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    settings::init_settings();

    let settings = settings::get_settings();
    wasm_logger::init(wasm_logger::Config::new(settings.log_level));

    log::info!("=== Chapelco Weather Dashboard Starting ===");
    log::debug!("API base URL: {}", settings.api_base_url());
    log::debug!("History window: {} records", settings.history_points);

    yew::Renderer::<App>::new().render();
}
