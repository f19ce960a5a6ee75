use yew::prelude::*;

use super::charts::ChartsPanel;
use super::current::CurrentConditions;

/// The dashboard root: current readings on top, history charts below.
#[function_component(HomePage)]
pub fn home_page() -> Html {
    html! {
        <>
            <CurrentConditions />
            <div class="card bg-base-100 shadow mt-6">
                <div class="card-body">
                    <h2 class="card-title">{"Past Readings"}</h2>
                    <ChartsPanel />
                </div>
            </div>
        </>
    }
}
