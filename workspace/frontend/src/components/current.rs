use yew::prelude::*;

use common::{WeatherField, WeatherRecord};

use crate::api_client::get_current_weather;
use crate::common::fetch_hook::use_fetch_with_refetch;
use crate::common::fetch_render::FetchRender;

/// Current conditions from the station, one stat card per field.
#[function_component(CurrentConditions)]
pub fn current_conditions() -> Html {
    let (fetch_state, refetch) = use_fetch_with_refetch(get_current_weather);

    let render = Callback::from(|record: WeatherRecord| {
        html! {
            <>
                <div class="text-sm text-gray-500 mb-2">
                    {format!("Observed {}", record.datetime.format("%Y-%m-%d %H:%M UTC"))}
                </div>
                <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                    { for WeatherField::ALL.iter().map(|&field| {
                        html! {
                            <div class="stats shadow bg-base-100">
                                <div class="stat">
                                    <div class="stat-title">{field.display_name()}</div>
                                    <div class="stat-value text-primary">
                                        {format!("{:.1} {}", record.value(field), field.unit())}
                                    </div>
                                </div>
                            </div>
                        }
                    }) }
                </div>
            </>
        }
    });

    let on_retry = {
        let refetch = refetch.clone();
        Callback::from(move |_| refetch.emit(()))
    };

    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title">{"Current Conditions"}</h2>
                <FetchRender<WeatherRecord>
                    state={(*fetch_state).clone()}
                    render={render}
                    on_retry={Some(on_retry)}
                />
            </div>
        </div>
    }
}
