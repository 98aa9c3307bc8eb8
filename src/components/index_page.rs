use std::rc::Rc;

use yew::prelude::*;

use crate::config::Config;
use crate::dom;

#[derive(Properties, PartialEq)]
pub struct IndexPageProps {
    pub config: Rc<Config>,
}

#[function_component(IndexPage)]
pub fn index_page(props: &IndexPageProps) -> Html {
    let on_featured = {
        let books_page = props.config.books_page.clone();
        Callback::from(move |_: MouseEvent| dom::navigate(&books_page))
    };

    html! {
        <section class="hero">
            <h1>{ "Find your next book" }</h1>
            <p>{ "Browse the catalog and join the discussion." }</p>
            <button id="btn-featured" class="pill" onclick={on_featured}>{ "Browse books" }</button>
        </section>
    }
}
