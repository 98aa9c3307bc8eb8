use std::rc::Rc;

use yew::prelude::*;

use crate::config::Config;
use crate::dom;
use crate::session::Session;
use crate::storage::TokenStore;

#[derive(Properties, PartialEq)]
pub struct SessionControlsProps {
    pub config: Rc<Config>,
    pub session: Rc<Session>,
    pub on_add_book: Callback<()>,
}

/// Login/logout buttons plus the admin-only upload entry point.
#[function_component(SessionControls)]
pub fn session_controls(props: &SessionControlsProps) -> Html {
    let on_logout = {
        let store = TokenStore::new(&props.config.token_key);
        Callback::from(move |_: MouseEvent| {
            if let Err(e) = store.clear() {
                log::error!("logout could not clear the stored token: {}", e);
            }
            dom::reload();
        })
    };

    let login = match props.session.label() {
        None => {
            let auth_page = props.config.auth_page.clone();
            let on_login = Callback::from(move |_: MouseEvent| dom::navigate(&auth_page));
            html! {
                <button id="btn-login" class="pill" style="display:inline-block;" onclick={on_login}>
                    { "Log in" }
                </button>
            }
        }
        Some(label) => html! {
            <button id="btn-login" class="pill" style="display:inline-block; cursor:default;">
                { label.to_string() }
            </button>
        },
    };

    let logout_style = if props.session.is_authenticated() {
        "display:inline-block;"
    } else {
        "display:none;"
    };

    let admin = if props.session.is_admin() {
        let on_add_book = props.on_add_book.reform(|_: MouseEvent| ());
        html! {
            <button id="btn-addbook" class="pill" onclick={on_add_book}>{ "+ Add Book" }</button>
        }
    } else {
        html! {}
    };

    html! {
        <div class="session-controls">
            { login }
            <button id="btn-logout" class="pill" style={logout_style} onclick={on_logout}>
                { "Log out" }
            </button>
            <div id="admin-controls">{ admin }</div>
        </div>
    }
}
