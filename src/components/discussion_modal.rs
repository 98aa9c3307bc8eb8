use web_sys::HtmlTextAreaElement;
use yew::prelude::*;

use crate::discussion::DiscussionState;

#[derive(Properties, PartialEq)]
pub struct DiscussionModalProps {
    pub state: DiscussionState,
    pub on_send: Callback<String>,
    pub on_close: Callback<()>,
}

/// Comment thread for one book. Mounted only while open, so the draft is
/// dropped whenever the modal closes.
#[function_component(DiscussionModal)]
pub fn discussion_modal(props: &DiscussionModalProps) -> Html {
    let draft = use_state(String::new);

    let on_input = {
        let draft = draft.clone();
        Callback::from(move |event: InputEvent| {
            let target = event.target_unchecked_into::<HtmlTextAreaElement>();
            draft.set(target.value());
        })
    };

    let on_send = {
        let draft = draft.clone();
        let on_send = props.on_send.clone();
        Callback::from(move |_: MouseEvent| on_send.emit((*draft).clone()))
    };

    let on_close = props.on_close.reform(|_: MouseEvent| ());

    let thread = match &props.state {
        DiscussionState::Closed => html! {},
        DiscussionState::Loading { .. } => html! { { "Loading..." } },
        DiscussionState::Loaded { comments, .. } if comments.is_empty() => html! {
            <div style="padding:8px; color:#888;">{ "No comments yet." }</div>
        },
        DiscussionState::Loaded { comments, .. } => comments
            .iter()
            .map(|comment| {
                html! {
                    <div style="padding:8px; border-bottom:1px solid #eee;">
                        <strong>{ comment.display_name.clone() }</strong>
                        <div style="font-size:13px">{ comment.content.clone() }</div>
                    </div>
                }
            })
            .collect::<Html>(),
        DiscussionState::Failed { message, .. } => html! {
            <div style="padding:8px; color:#721c24;">{ message.clone() }</div>
        },
    };

    html! {
        <div id="discussion-modal" class="modal">
            <div class="modal-content">
                <button id="close-discussion" class="modal-close" onclick={on_close}>{ "×" }</button>
                <h3 id="discussion-title">{ props.state.header().unwrap_or_default() }</h3>
                <div id="discussion-list">{ thread }</div>
                <textarea
                    id="discussion-input"
                    rows=3
                    placeholder="Write a comment..."
                    value={(*draft).clone()}
                    oninput={on_input}
                />
                <button id="send-discussion" class="pill" onclick={on_send}>{ "Send" }</button>
            </div>
        </div>
    }
}
