use std::rc::Rc;

use yew::prelude::*;

use crate::components::SessionControls;
use crate::config::Config;
use crate::dom;
use crate::session::Session;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub config: Rc<Config>,
    pub session: Rc<Session>,
    pub on_add_book: Callback<()>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let menu_open = use_state(|| false);

    let on_menu_toggle = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };

    // Contact lives in the page footer
    let on_contact = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            dom::smooth_scroll_to("contact");
            if *menu_open {
                menu_open.set(false);
            }
        })
    };

    html! {
        <header class="site-header">
            <a class="brand" href="index.html">{ "Booksite" }</a>
            <button id="menu-toggle" class="menu-toggle" onclick={on_menu_toggle}>{ "☰" }</button>
            <nav id="nav" class={classes!("nav", (*menu_open).then_some("show"))}>
                <a href="index.html">{ "Home" }</a>
                <a href={props.config.books_page.clone()}>{ "Books" }</a>
                <a id="nav-contact" href="#contact" onclick={on_contact}>{ "Contact" }</a>
            </nav>
            <SessionControls
                config={props.config.clone()}
                session={props.session.clone()}
                on_add_book={props.on_add_book.clone()}
            />
        </header>
    }
}
