use std::rc::Rc;

use web_sys::Element;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::FetchClient;
use crate::components::DiscussionModal;
use crate::config::Config;
use crate::discussion::{failure_prompt, BookRef, DiscussionAction, DiscussionClient, DiscussionState};
use crate::dom;
use crate::lazy::{LazyImageLoader, LAZY_CLASS};
use crate::loader::{BookListLoader, LoadOutcome};
use crate::session::Session;

#[derive(Properties, PartialEq)]
pub struct BooksPageProps {
    pub config: Rc<Config>,
    pub session: Rc<Session>,
}

type Loader = BookListLoader<FetchClient>;

fn report(outcome: crate::error::Result<LoadOutcome>, list_error: &UseStateHandle<Option<String>>) {
    match outcome {
        Ok(LoadOutcome::Appended { count, has_more }) => {
            log::debug!("appended {} books (more: {})", count, has_more);
            list_error.set(None);
        }
        Ok(outcome) => log::debug!("book page not applied: {:?}", outcome),
        Err(e) => {
            log::error!("failed to load books: {}", e);
            list_error.set(Some(format!("Could not load books: {}", e)));
        }
    }
}

#[function_component(BooksPage)]
pub fn books_page(props: &BooksPageProps) -> Html {
    let loader = {
        let config = props.config.clone();
        use_memo((), move |_| {
            Loader::new(
                Rc::new(FetchClient::new(&config.api_base)),
                config.page_size,
                config.image_resolver(),
            )
        })
    };
    let comments = {
        let loader = loader.clone();
        use_memo((), move |_| DiscussionClient::new(loader.api().clone()))
    };
    let redraw = use_force_update();
    let list_error = use_state(|| None::<String>);
    let discussion = use_reducer(|| DiscussionState::Closed);
    let list_ref = use_node_ref();
    let lazy = use_mut_ref(|| None::<LazyImageLoader>);
    let opens = use_mut_ref(|| 0u64);

    let load_more = {
        let loader = loader.clone();
        let redraw = redraw.clone();
        let list_error = list_error.clone();
        Callback::from(move |_: ()| {
            let Some(ticket) = loader.start() else {
                log::debug!("load more ignored: fetch outstanding or list exhausted");
                return;
            };
            // Show the disabled "Loading..." button while the page is in flight
            redraw.force_update();

            let loader = loader.clone();
            let task_redraw = redraw.clone();
            let list_error = list_error.clone();
            spawn_local(async move {
                let outcome = loader.fetch(ticket).await;
                report(outcome, &list_error);
                task_redraw.force_update();
            });
        })
    };

    // First page on mount
    {
        let load_more = load_more.clone();
        use_effect_with((), move |_| {
            load_more.emit(());
            || ()
        });
    }

    let (generation, rendered) = {
        let feed = loader.feed();
        (feed.generation(), feed.cards().len())
    };

    // Newly rendered covers become observable once they are in the DOM
    {
        let list_ref = list_ref.clone();
        let lazy = lazy.clone();
        use_effect_with((generation, rendered), move |_| {
            if let Some(root) = list_ref.cast::<Element>() {
                let mut slot = lazy.borrow_mut();
                if slot.is_none() {
                    match LazyImageLoader::new() {
                        Ok(observer) => *slot = Some(observer),
                        Err(e) => log::error!("lazy images disabled: {}", e),
                    }
                }
                if let Some(observer) = slot.as_ref() {
                    match observer.scan(&root) {
                        Ok(pending) => log::debug!("{} covers waiting for the viewport", pending),
                        Err(e) => log::warn!("lazy image scan failed: {}", e),
                    }
                }
            }
            || ()
        });
    }

    let open_discussion = {
        let discussion = discussion.clone();
        let comments = comments.clone();
        let opens = opens.clone();
        Callback::from(move |book: BookRef| {
            let book_id = book.id;
            let ticket = {
                let mut opens = opens.borrow_mut();
                *opens += 1;
                *opens
            };
            discussion.dispatch(DiscussionAction::Open { book, ticket });
            let discussion = discussion.clone();
            let comments = comments.clone();
            spawn_local(async move {
                let result = comments.fetch(book_id).await;
                if let Err(e) = &result {
                    log::warn!("comments for book {} failed to load: {}", book_id, e);
                }
                discussion.dispatch(DiscussionAction::Resolve { ticket, result });
            });
        })
    };

    let close_discussion = {
        let discussion = discussion.clone();
        Callback::from(move |_: ()| discussion.dispatch(DiscussionAction::Close))
    };

    let send_comment = {
        let discussion = discussion.clone();
        let comments = comments.clone();
        let loader = loader.clone();
        let session = props.session.clone();
        let redraw = redraw.clone();
        let list_error = list_error.clone();
        Callback::from(move |text: String| {
            let Some(book) = discussion.book().cloned() else {
                return;
            };
            let discussion = discussion.clone();
            let comments = comments.clone();
            let loader = loader.clone();
            let session = session.clone();
            let redraw = redraw.clone();
            let list_error = list_error.clone();
            spawn_local(async move {
                match comments.send(book.id, &text, session.bearer_token()).await {
                    Ok(()) => {
                        log::info!("comment posted on book {}", book.id);
                        discussion.dispatch(DiscussionAction::Close);
                        let outcome = loader.reload().await;
                        report(outcome, &list_error);
                        redraw.force_update();
                    }
                    Err(e) => {
                        log::warn!("comment on book {} not posted: {}", book.id, e);
                        dom::alert(&failure_prompt(&e));
                    }
                }
            });
        })
    };

    let feed = loader.feed();
    let cards = feed
        .cards()
        .iter()
        .enumerate()
        .map(|(index, card)| {
            let book = BookRef { id: card.id, title: card.title.clone() };
            let on_discuss = open_discussion.reform(move |_: MouseEvent| book.clone());
            html! {
                <div class="book-item" key={format!("{}-{}", generation, index)}>
                    <img class={LAZY_CLASS} data-src={card.image_url.clone()} alt={card.title.clone()} />
                    <div class="book-meta">
                        <h3>{ card.title.clone() }</h3>
                        <p>{ card.description.clone() }</p>
                        <button class="pill" onclick={on_discuss}>{ "Discussion" }</button>
                    </div>
                </div>
            }
        })
        .collect::<Html>();

    let load_more_style = if feed.has_more() { "" } else { "display:none;" };
    let on_load_more = load_more.reform(|_: MouseEvent| ());

    html! {
        <section class="books">
            <div id="books-list" class="books-list" ref={list_ref}>
                { cards }
            </div>
            { match &*list_error {
                Some(msg) => html! { <div class="load-error" style="color:#721c24; padding:0.5em 0;">{ msg.clone() }</div> },
                None => html! {},
            }}
            <button
                id="load-more"
                class="pill"
                style={load_more_style}
                disabled={feed.is_loading()}
                onclick={on_load_more}
            >
                { if feed.is_loading() { "Loading..." } else { "Load more" } }
            </button>
            { if discussion.is_open() {
                html! {
                    <DiscussionModal
                        state={(*discussion).clone()}
                        on_send={send_comment}
                        on_close={close_discussion}
                    />
                }
            } else {
                html! {}
            }}
        </section>
    }
}
