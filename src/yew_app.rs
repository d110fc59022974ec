use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, HtmlInputElement, KeyboardEvent, MouseEvent, Node};
use yew::prelude::*;

use crate::app_router::{self, InitConfig};
use crate::clipboard;
use crate::gallery_runtime::ScanRuntime;
use pages_gallery_core::{
    CopyFeedback, GalleryState, ModalState, ScanPhase, Tile, TileStatus, Vocabulary,
};

pub const APP_ROOT_ID: &str = "gallery-root";
const NAMING_EXAMPLE_COUNT: usize = 3;

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub init: InitConfig,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let refresh = use_force_update();
    let gallery = {
        let context = props.init.context.clone();
        use_mut_ref(move || GalleryState::new(context))
    };
    let config = {
        let gallery_config = props.init.gallery.clone();
        use_memo((), move |_| gallery_config)
    };
    let modal = use_state(ModalState::default);

    let runtime = {
        let refresh = refresh.clone();
        ScanRuntime::new(
            gallery.clone(),
            config.clone(),
            Rc::new(move || refresh.force_update()),
        )
    };

    {
        let runtime = runtime.clone();
        use_effect_with((), move |_| {
            runtime.start();
            || ()
        });
    }

    let on_tile_click = {
        let gallery = gallery.clone();
        let modal = modal.clone();
        Callback::from(move |index: usize| {
            let state = gallery.borrow();
            let Some(tile) = state.tile(index) else {
                return;
            };
            let mut next = (*modal).clone();
            if next.open_for(tile, state.context()) {
                modal.set(next);
            }
        })
    };

    let on_tile_status = {
        let gallery = gallery.clone();
        let refresh = refresh.clone();
        Callback::from(move |(index, status): (usize, TileStatus)| {
            if gallery.borrow_mut().set_tile_status(index, status) {
                refresh.force_update();
            }
        })
    };

    let on_close = {
        let modal = modal.clone();
        Callback::from(move |()| {
            let mut next = (*modal).clone();
            next.close();
            modal.set(next);
        })
    };

    let on_rescan = {
        let runtime = runtime.clone();
        let modal = modal.clone();
        Callback::from(move |_: MouseEvent| {
            modal.set(ModalState::default());
            runtime.start();
        })
    };

    let state = gallery.borrow();
    let phase = state.phase();
    let vocabulary = &config.vocabulary;
    let scanning = matches!(phase, ScanPhase::Scanning { .. });

    let status_line = match phase {
        ScanPhase::Idle => String::new(),
        ScanPhase::Scanning { completed, total } => format!("Checked {completed} of {total} names"),
        ScanPhase::Ready => format!("{} images", state.tiles().len()),
        ScanPhase::Empty => "No images found".to_string(),
    };

    let message = if state.tiles().is_empty() {
        match phase {
            ScanPhase::Empty => empty_message(vocabulary),
            ScanPhase::Idle | ScanPhase::Scanning { .. } => html! {
                <div class="empty-message">{"Looking for images..."}</div>
            },
            ScanPhase::Ready => html! {},
        }
    } else {
        html! {}
    };

    let tiles: Html = state
        .tiles()
        .iter()
        .enumerate()
        .map(|(index, tile)| {
            let label = vocabulary.display_name(&tile.image.filename).to_string();
            html! {
                <TileView
                    key={tile.image.path.clone()}
                    index={index}
                    tile={tile.clone()}
                    label={label}
                    on_click={on_tile_click.clone()}
                    on_status={on_tile_status.clone()}
                />
            }
        })
        .collect();

    html! {
        <>
            <div class="toolbar">
                <span class="scan-status">{status_line}</span>
                <button class="rescan-button" onclick={on_rescan} disabled={scanning}>
                    {"Rescan"}
                </button>
            </div>
            <div id="gallery" class="gallery">
                {message}
                {tiles}
            </div>
            <UrlModal
                modal={(*modal).clone()}
                feedback_ms={config.copy_feedback_ms}
                on_close={on_close}
            />
        </>
    }
}

fn empty_message(vocabulary: &Vocabulary) -> Html {
    let ext = vocabulary
        .extensions
        .first()
        .map(String::as_str)
        .unwrap_or("jpg");
    let examples = vocabulary.naming_examples(NAMING_EXAMPLE_COUNT);
    html! {
        <div class="empty-message">
            <strong>{"No images found in your repository."}</strong>
            <p>{"For automatic detection, name your images using the pattern:"}</p>
            <ul>
                <li><code>{format!("{}description.{ext}", vocabulary.prefix)}</code></li>
                { for examples.iter().map(|name| html! { <li><code>{name.clone()}</code></li> }) }
                <li>{"etc."}</li>
            </ul>
            <p>{"Then upload them next to this page, not in a subfolder."}</p>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct TileProps {
    index: usize,
    tile: Tile,
    label: AttrValue,
    on_click: Callback<usize>,
    on_status: Callback<(usize, TileStatus)>,
}

#[function_component(TileView)]
fn tile_view(props: &TileProps) -> Html {
    let index = props.index;
    let onclick = {
        let on_click = props.on_click.clone();
        Callback::from(move |_: MouseEvent| on_click.emit(index))
    };
    let onload = {
        let on_status = props.on_status.clone();
        Callback::from(move |_: Event| on_status.emit((index, TileStatus::Loaded)))
    };
    let onerror = {
        let on_status = props.on_status.clone();
        Callback::from(move |_: Event| on_status.emit((index, TileStatus::Failed)))
    };
    let status = match props.tile.status {
        TileStatus::Loading => "loading",
        TileStatus::Loaded => "loaded",
        TileStatus::Failed => "failed",
    };
    html! {
        <div
            class={classes!("gallery-item", (props.tile.status == TileStatus::Failed).then_some("failed"))}
            data-status={status}
            {onclick}
        >
            <img src={props.tile.image.path.clone()} alt={props.label.clone()} {onload} {onerror} />
            <div class="filename">{props.label.clone()}</div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub(crate) struct UrlModalProps {
    pub(crate) modal: ModalState,
    pub(crate) feedback_ms: u32,
    pub(crate) on_close: Callback<()>,
}

#[function_component(UrlModal)]
pub(crate) fn url_modal(props: &UrlModalProps) -> Html {
    let refresh = use_force_update();
    let feedback = use_mut_ref(CopyFeedback::default);
    let revert_timer = use_mut_ref(|| None::<Timeout>);
    let input_ref = use_node_ref();
    let backdrop_ref = use_node_ref();

    let close = {
        let feedback = feedback.clone();
        let revert_timer = revert_timer.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |()| {
            revert_timer.borrow_mut().take();
            feedback.borrow_mut().reset();
            on_close.emit(());
        })
    };

    {
        let close = close.clone();
        use_effect_with(props.modal.open, move |open| {
            let listener = if *open {
                web_sys::window()
                    .and_then(|window| window.document())
                    .map(|document| {
                        EventListener::new(&document, "keydown", move |event| {
                            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                                return;
                            };
                            if event.key() == "Escape" {
                                close.emit(());
                            }
                        })
                    })
            } else {
                None
            };
            move || drop(listener)
        });
    }

    if !props.modal.open {
        return html! {};
    }

    let on_copy = {
        let feedback = feedback.clone();
        let revert_timer = revert_timer.clone();
        let input_ref = input_ref.clone();
        let refresh = refresh.clone();
        let url = props.modal.url.clone();
        let feedback_ms = props.feedback_ms;
        Callback::from(move |_: MouseEvent| {
            let Some(input) = input_ref.cast::<HtmlInputElement>() else {
                return;
            };
            let feedback = feedback.clone();
            let revert_timer = revert_timer.clone();
            let refresh = refresh.clone();
            let url = url.clone();
            spawn_local(async move {
                let generation = match clipboard::copy_text(&input, &url).await {
                    Ok(()) => feedback.borrow_mut().succeed(),
                    Err(err) => {
                        gloo::console::warn!(err.to_string());
                        feedback.borrow_mut().fail()
                    }
                };
                refresh.force_update();
                let timer = {
                    let feedback = feedback.clone();
                    let refresh = refresh.clone();
                    Timeout::new(feedback_ms, move || {
                        if feedback.borrow_mut().revert(generation) {
                            refresh.force_update();
                        }
                    })
                };
                // Replacing the handle cancels the previous revert.
                *revert_timer.borrow_mut() = Some(timer);
            });
        })
    };

    let on_backdrop = {
        let backdrop_ref = backdrop_ref.clone();
        let close = close.clone();
        Callback::from(move |event: MouseEvent| {
            let Some(backdrop) = backdrop_ref.get() else {
                return;
            };
            let target = event.target().and_then(|target| target.dyn_into::<Node>().ok());
            if backdrop.is_same_node(target.as_ref()) {
                close.emit(());
            }
        })
    };

    let on_close_click = {
        let close = close.clone();
        Callback::from(move |_: MouseEvent| close.emit(()))
    };

    let current = *feedback.borrow();
    html! {
        <div id="urlModal" class="modal" ref={backdrop_ref} onclick={on_backdrop}>
            <div class="modal-content">
                <button class="close-button" aria-label="Close" onclick={on_close_click}>
                    {"\u{00d7}"}
                </button>
                <img
                    id="previewImage"
                    src={props.modal.preview_src.clone()}
                    alt={props.modal.caption.clone()}
                />
                <div class="url-row">
                    <input
                        id="imageUrl"
                        ref={input_ref}
                        type="text"
                        readonly={true}
                        value={props.modal.url.clone()}
                    />
                    <button
                        id="copyButton"
                        class={classes!("copy-button", current.highlighted().then_some("copied"))}
                        onclick={on_copy}
                    >
                        {current.label()}
                    </button>
                </div>
            </div>
        </div>
    }
}

pub fn mount(root: Element, init: InitConfig) -> AppHandle<App> {
    yew::Renderer::<App>::with_root_and_props(root, AppProps { init }).render()
}

pub fn run() {
    console_error_panic_hook::set_once();
    let init = app_router::load_init_config();
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let root = document
        .get_element_by_id(APP_ROOT_ID)
        .or_else(|| document.body().map(Element::from));
    let Some(root) = root else {
        gloo::console::warn!("no element to mount the gallery into");
        return;
    };
    let _app_handle = mount(root, init);
}
