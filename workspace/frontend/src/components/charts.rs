use yew::prelude::*;

use common::{ChartConfig, WeatherField};

use super::chart_modal::ChartModal;
use crate::api_client::get_past_field_lists;
use crate::common::error::ErrorDisplay;
use crate::common::fetch_hook::use_fetch_with_refetch;
use crate::hooks::FetchState;
use crate::settings;

/// Button grid over the fetched history plus the chart modal.
///
/// Clicking a button is the chart trigger: it parses the field token, builds
/// a fresh [`ChartConfig`] from the held history, and opens the modal.
/// Unknown tokens and a not-yet-loaded history are silent no-ops.
#[function_component(ChartsPanel)]
pub fn charts_panel() -> Html {
    let history_points = settings::get_settings().history_points;
    let (fetch_state, refetch) = use_fetch_with_refetch(move || get_past_field_lists(history_points));

    let chart: UseStateHandle<Option<ChartConfig>> = use_state(|| None);

    let on_select = {
        let fetch_state = fetch_state.clone();
        let chart = chart.clone();
        Callback::from(move |token: String| {
            let Ok(field) = token.parse::<WeatherField>() else {
                log::debug!("Ignoring unrecognized field token: {}", token);
                return;
            };
            let Some(lists) = fetch_state.data() else {
                log::debug!("Chart requested before history loaded, ignoring");
                return;
            };
            match ChartConfig::for_field(field, lists) {
                Some(config) => chart.set(Some(config)),
                None => log::debug!("History carries no series for {}, ignoring", field),
            }
        })
    };

    let on_close = {
        let chart = chart.clone();
        Callback::from(move |_| chart.set(None))
    };

    html! {
        <>
            <div class="flex flex-wrap gap-2">
                { for WeatherField::ALL.iter().map(|&field| {
                    let on_select = on_select.clone();
                    let token = field.code().to_string();
                    html! {
                        <button
                            class="btn btn-outline btn-sm"
                            disabled={!fetch_state.is_success()}
                            onclick={Callback::from(move |_| on_select.emit(token.clone()))}
                        >
                            {field.display_name()}
                        </button>
                    }
                }) }
            </div>

            {match &*fetch_state {
                FetchState::Loading => html! {
                    <div class="flex items-center gap-2 mt-4 text-sm text-gray-500">
                        <span class="loading loading-spinner loading-sm"></span>
                        {"Loading history..."}
                    </div>
                },
                FetchState::Error(error) => {
                    let refetch = refetch.clone();
                    html! {
                        <ErrorDisplay
                            message={error.clone()}
                            on_retry={Some(Callback::from(move |_| refetch.emit(())))}
                        />
                    }
                }
                _ => html! {},
            }}

            {if let Some(config) = &*chart {
                html! { <ChartModal config={config.clone()} on_close={on_close} /> }
            } else {
                html! {}
            }}
        </>
    }
}
