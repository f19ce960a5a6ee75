use plotly::common::{Mode, Title};
use plotly::layout::Axis;
use plotly::{Layout, Scatter};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;
use yew::prelude::*;

use common::{ChartConfig, ZERO_LINE_COLOR};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly)]
    fn newPlot(div_id: &str, data: JsValue, layout: JsValue);
}

const CHART_DIV_ID: &str = "weather-chart";

#[derive(Properties, PartialEq)]
pub struct Props {
    pub config: ChartConfig,
    pub on_close: Callback<()>,
}

/// Modal hosting the history chart. Re-rendering with a new config
/// reconfigures the plot in place; the modal itself stays open.
#[function_component(ChartModal)]
pub fn chart_modal(props: &Props) -> Html {
    let container_ref = use_node_ref();
    let config = props.config.clone();

    use_effect_with(
        (container_ref.clone(), config),
        move |(container_ref, config)| {
            if let Some(element) = container_ref.cast::<HtmlElement>() {
                element.set_id(CHART_DIV_ID);

                let trace = Scatter::new(
                    config.x_categories.clone(),
                    config.series.values.clone(),
                )
                .mode(Mode::Lines)
                .name(&config.series.name);

                let layout = Layout::new()
                    .title(Title::with_text(&config.title))
                    .x_axis(
                        Axis::new()
                            .title(Title::with_text(&config.x_label))
                            .tick_angle(config.label_rotation_deg as f64)
                            .dtick(config.label_step as f64),
                    )
                    .y_axis(
                        Axis::new()
                            .title(Title::with_text(&config.y_label))
                            .zero_line(config.zero_line)
                            .zero_line_color(ZERO_LINE_COLOR)
                            .zero_line_width(1),
                    )
                    .height(450);

                let trace_json = serde_json::to_string(&trace).unwrap();
                let trace_js = js_sys::JSON::parse(&trace_json).unwrap();

                let data_js = js_sys::Array::new();
                data_js.push(&trace_js);

                let layout_json = serde_json::to_string(&layout).unwrap();
                let layout_js = js_sys::JSON::parse(&layout_json).unwrap();

                newPlot(CHART_DIV_ID, data_js.into(), layout_js);
            }
            || ()
        },
    );

    let on_close = props.on_close.clone();

    html! {
        <div class="modal modal-open">
            <div class="modal-box max-w-4xl">
                <div ref={container_ref} style="width:100%; height:450px;"></div>
                <div class="modal-action">
                    <button
                        class="btn"
                        onclick={Callback::from(move |_| on_close.emit(()))}
                    >
                        {"Close"}
                    </button>
                </div>
            </div>
        </div>
    }
}
