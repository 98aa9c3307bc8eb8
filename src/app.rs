use std::rc::Rc;

use yew::prelude::*;

use crate::components::{AddBookModal, BooksPage, Header, IndexPage};
use crate::config::Config;
use crate::pages::Page;
use crate::session::Session;

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: Rc<Config>,
    pub session: Rc<Session>,
    /// `None` for pages without a page-specific initializer.
    pub page: Option<Page>,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let add_book_open = use_state(|| false);

    let on_add_book = {
        let add_book_open = add_book_open.clone();
        Callback::from(move |_: ()| add_book_open.set(true))
    };

    let on_close_add_book = {
        let add_book_open = add_book_open.clone();
        Callback::from(move |_: ()| add_book_open.set(false))
    };

    let body = match props.page {
        Some(Page::Index) => html! { <IndexPage config={props.config.clone()} /> },
        Some(Page::Books) => html! {
            <BooksPage config={props.config.clone()} session={props.session.clone()} />
        },
        None => html! {},
    };

    html! {
        <>
            <Header
                config={props.config.clone()}
                session={props.session.clone()}
                on_add_book={on_add_book}
            />
            <main class="page">{ body }</main>
            { if *add_book_open {
                html! { <AddBookModal config={props.config.clone()} on_close={on_close_add_book} /> }
            } else {
                html! {}
            }}
        </>
    }
}
