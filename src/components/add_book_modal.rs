use std::rc::Rc;

use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::FetchClient;
use crate::config::Config;
use crate::dom;
use crate::error::ClientError;
use crate::loader::upload_book;
use crate::types::NewBook;

const FILE_PLACEHOLDER: &str = "Choose a cover image...";

#[derive(Properties, PartialEq)]
pub struct AddBookModalProps {
    pub config: Rc<Config>,
    pub on_close: Callback<()>,
}

#[function_component(AddBookModal)]
pub fn add_book_modal(props: &AddBookModalProps) -> Html {
    let title = use_state(String::new);
    let description = use_state(String::new);
    let image = use_state(|| None::<web_sys::File>);
    let submitting = use_state(|| false);

    let on_title = {
        let title = title.clone();
        Callback::from(move |event: InputEvent| {
            let target = event.target_unchecked_into::<HtmlInputElement>();
            title.set(target.value());
        })
    };

    let on_description = {
        let description = description.clone();
        Callback::from(move |event: InputEvent| {
            let target = event.target_unchecked_into::<HtmlTextAreaElement>();
            description.set(target.value());
        })
    };

    let on_file_change = {
        let image = image.clone();
        Callback::from(move |event: Event| {
            let target = event.target_unchecked_into::<HtmlInputElement>();
            let file_obj = target.files().and_then(|list| list.get(0));
            image.set(file_obj);
        })
    };

    let on_submit = {
        let api = FetchClient::new(&props.config.api_base);
        let title = title.clone();
        let description = description.clone();
        let image = image.clone();
        let submitting = submitting.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if *submitting {
                return;
            }
            let book = NewBook {
                title: (*title).clone(),
                description: (*description).clone(),
                image: (*image).clone(),
            };
            let api = api.clone();
            let submitting = submitting.clone();
            let on_close = on_close.clone();
            submitting.set(true);

            spawn_local(async move {
                match upload_book(&api, &book).await {
                    Ok(()) => {
                        log::info!("uploaded book \"{}\"", book.title);
                        dom::alert("Book uploaded!");
                        on_close.emit(());
                        dom::reload();
                    }
                    Err(ClientError::InvalidInput(msg)) => {
                        dom::alert(&format!("Upload failed: {}", msg));
                        submitting.set(false);
                    }
                    Err(e) => {
                        log::error!("book upload failed: {}", e);
                        dom::alert("Upload failed");
                        submitting.set(false);
                    }
                }
            });
        })
    };

    let on_close = props.on_close.reform(|_: MouseEvent| ());
    let file_label = (*image)
        .as_ref()
        .map(|file| file.name())
        .unwrap_or_else(|| FILE_PLACEHOLDER.to_string());

    html! {
        <div id="addbook-modal" class="modal">
            <div class="modal-content">
                <button id="close-addbook" class="modal-close" onclick={on_close}>{ "×" }</button>
                <h3>{ "Add a book" }</h3>
                <form id="addBookForm" onsubmit={on_submit}>
                    <input
                        id="bookTitle"
                        type="text"
                        placeholder="Title"
                        required=true
                        value={(*title).clone()}
                        oninput={on_title}
                    />
                    <textarea
                        id="bookDescription"
                        rows=4
                        placeholder="Description"
                        value={(*description).clone()}
                        oninput={on_description}
                    />
                    <label class="file-picker">
                        <input id="bookImage" type="file" accept="image/*" onchange={on_file_change} />
                        <span id="file-name">{ file_label }</span>
                    </label>
                    <button type="submit" class="pill" disabled={*submitting}>
                        { if *submitting { "Uploading..." } else { "Upload" } }
                    </button>
                </form>
            </div>
        </div>
    }
}
