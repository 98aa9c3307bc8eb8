//! Paginated book list.
//!
//! `BookFeed` is the bookkeeping: which page comes next, what has been
//! rendered, and whether a fetch is outstanding. Every fetch is tagged with
//! the feed generation it was started under; `reset` bumps the generation so
//! a page that lands after a reload is dropped instead of appended.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::api::BookApi;
use crate::error::{ClientError, Result};
use crate::types::{Book, BookCard, NewBook, PageRequest};

pub const UPLOADS_PREFIX: &str = "/uploads/";

/// Turns a backend `imagePath` into an absolute URL.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageResolver {
    asset_base: String,
}

impl ImageResolver {
    pub fn new(asset_base: &str) -> Self {
        Self {
            asset_base: asset_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn resolve(&self, image_path: &str) -> String {
        if image_path.starts_with(UPLOADS_PREFIX) {
            format!("{}{}", self.asset_base, image_path)
        } else {
            format!("{}{}{}", self.asset_base, UPLOADS_PREFIX, image_path)
        }
    }

    pub fn card(&self, book: Book) -> BookCard {
        BookCard {
            image_url: self.resolve(&book.image_path),
            id: book.id,
            title: book.title,
            description: book.description,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PageCursor {
    page: u32,
    size: u32,
    exhausted: bool,
}

impl PageCursor {
    pub fn new(size: u32) -> Self {
        Self { page: 0, size, exhausted: false }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn request(&self) -> Option<PageRequest> {
        if self.exhausted {
            None
        } else {
            Some(PageRequest { page: self.page, size: self.size })
        }
    }

    /// Record a successful fetch that returned `returned` items.
    pub fn advance(&mut self, returned: usize) {
        self.page += 1;
        if returned < self.size as usize {
            self.exhausted = true;
        }
    }
}

/// Proof that a fetch was started under a given generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageTicket {
    generation: u64,
    request: PageRequest,
}

impl PageTicket {
    pub fn request(&self) -> PageRequest {
        self.request
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BookFeed {
    cursor: PageCursor,
    cards: Vec<BookCard>,
    generation: u64,
    in_flight: Option<PageTicket>,
}

impl BookFeed {
    pub fn new(page_size: u32) -> Self {
        Self {
            cursor: PageCursor::new(page_size),
            cards: Vec::new(),
            generation: 0,
            in_flight: None,
        }
    }

    pub fn cards(&self) -> &[BookCard] {
        &self.cards
    }

    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether the "load more" control should be offered.
    pub fn has_more(&self) -> bool {
        !self.cursor.is_exhausted()
    }

    /// Claim the next page. `None` while a fetch is outstanding or once the
    /// list is exhausted.
    pub fn begin(&mut self) -> Option<PageTicket> {
        if self.in_flight.is_some() {
            return None;
        }
        let request = self.cursor.request()?;
        let ticket = PageTicket { generation: self.generation, request };
        self.in_flight = Some(ticket);
        Some(ticket)
    }

    /// Append a fetched page. Returns the number of cards added, or `None`
    /// when the ticket belongs to an older generation.
    pub fn complete(&mut self, ticket: PageTicket, books: Vec<Book>, images: &ImageResolver) -> Option<usize> {
        if ticket.generation != self.generation {
            return None;
        }
        self.in_flight = None;
        let count = books.len();
        self.cursor.advance(count);
        self.cards.extend(books.into_iter().map(|b| images.card(b)));
        Some(count)
    }

    pub fn fail(&mut self, ticket: PageTicket) {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
        }
    }

    pub fn reset(&mut self) {
        self.generation += 1;
        self.cursor = PageCursor::new(self.cursor.size());
        self.cards.clear();
        self.in_flight = None;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Appended { count: usize, has_more: bool },
    /// Another fetch was outstanding or the list was exhausted.
    Skipped,
    /// The list was reset while this page was in flight.
    Stale,
}

pub struct BookListLoader<A: BookApi> {
    api: Rc<A>,
    feed: Rc<RefCell<BookFeed>>,
    images: ImageResolver,
}

impl<A: BookApi> Clone for BookListLoader<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            feed: self.feed.clone(),
            images: self.images.clone(),
        }
    }
}

impl<A: BookApi> BookListLoader<A> {
    pub fn new(api: Rc<A>, page_size: u32, images: ImageResolver) -> Self {
        Self {
            api,
            feed: Rc::new(RefCell::new(BookFeed::new(page_size))),
            images,
        }
    }

    pub fn api(&self) -> &Rc<A> {
        &self.api
    }

    pub fn feed(&self) -> Ref<'_, BookFeed> {
        self.feed.borrow()
    }

    /// Claim the next page without waiting on the network, so the caller can
    /// render the loading state before the fetch runs.
    pub fn start(&self) -> Option<PageTicket> {
        self.feed.borrow_mut().begin()
    }

    pub async fn load(&self) -> Result<LoadOutcome> {
        match self.start() {
            Some(ticket) => self.fetch(ticket).await,
            None => Ok(LoadOutcome::Skipped),
        }
    }

    /// Fetch the page claimed by `ticket` and fold it into the feed.
    pub async fn fetch(&self, ticket: PageTicket) -> Result<LoadOutcome> {
        match self.api.list_books(ticket.request()).await {
            Ok(books) => {
                let mut feed = self.feed.borrow_mut();
                match feed.complete(ticket, books, &self.images) {
                    Some(count) => Ok(LoadOutcome::Appended { count, has_more: feed.has_more() }),
                    None => Ok(LoadOutcome::Stale),
                }
            }
            Err(e) => {
                self.feed.borrow_mut().fail(ticket);
                Err(e)
            }
        }
    }

    /// Start the list over from page zero.
    pub async fn reload(&self) -> Result<LoadOutcome> {
        self.feed.borrow_mut().reset();
        self.load().await
    }
}

pub async fn upload_book<A: BookApi + ?Sized>(api: &A, book: &NewBook) -> Result<()> {
    if book.image.is_none() {
        return Err(ClientError::InvalidInput("choose a cover image".to_string()));
    }
    api.upload_book(book).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{book, ApiCall, MockApi};
    use futures::executor::block_on;

    const ASSETS: &str = "https://assets.test:8080";

    fn loader(api: &Rc<MockApi>) -> BookListLoader<MockApi> {
        BookListLoader::new(api.clone(), 10, ImageResolver::new(ASSETS))
    }

    #[test]
    fn test_image_resolution() {
        let images = ImageResolver::new(ASSETS);
        assert_eq!(images.resolve("cover.png"), "https://assets.test:8080/uploads/cover.png");
        assert_eq!(images.resolve("/uploads/cover.png"), "https://assets.test:8080/uploads/cover.png");
        assert_eq!(images.resolve("/static/cover.png"), "https://assets.test:8080/uploads//static/cover.png");
    }

    #[test]
    fn test_cursor_advances_and_exhausts() {
        let mut cursor = PageCursor::new(10);
        assert_eq!(cursor.request(), Some(PageRequest { page: 0, size: 10 }));
        cursor.advance(10);
        assert_eq!(cursor.request(), Some(PageRequest { page: 1, size: 10 }));
        cursor.advance(4);
        assert_eq!(cursor.page(), 2);
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.request(), None);
    }

    #[test]
    fn test_load_more_hidden_after_short_page() {
        let api = Rc::new(MockApi::new());
        api.push_books((0..10).map(book).collect());
        api.push_books((10..13).map(book).collect());
        let loader = loader(&api);

        let first = block_on(loader.load()).unwrap();
        assert_eq!(first, LoadOutcome::Appended { count: 10, has_more: true });
        assert!(loader.feed().has_more());

        let second = block_on(loader.load()).unwrap();
        assert_eq!(second, LoadOutcome::Appended { count: 3, has_more: false });
        assert!(!loader.feed().has_more());
        assert_eq!(loader.feed().cards().len(), 13);

        assert_eq!(block_on(loader.load()).unwrap(), LoadOutcome::Skipped);
        assert_eq!(
            api.calls(),
            vec![
                ApiCall::ListBooks(PageRequest { page: 0, size: 10 }),
                ApiCall::ListBooks(PageRequest { page: 1, size: 10 }),
            ]
        );
    }

    #[test]
    fn test_cards_carry_resolved_images() {
        let api = Rc::new(MockApi::new());
        let mut b = book(1);
        b.image_path = "/uploads/one.jpg".to_string();
        api.push_books(vec![b]);
        let loader = loader(&api);

        block_on(loader.load()).unwrap();
        let feed = loader.feed();
        assert_eq!(feed.cards()[0].image_url, "https://assets.test:8080/uploads/one.jpg");
        assert_eq!(feed.cards()[0].title, "Book 1");
    }

    #[test]
    fn test_failed_fetch_keeps_cursor() {
        let api = Rc::new(MockApi::new());
        api.push_books_error(ClientError::Status(502));
        api.push_books((0..10).map(book).collect());
        let loader = loader(&api);

        assert_eq!(block_on(loader.load()), Err(ClientError::Status(502)));
        assert_eq!(loader.feed().cursor().page(), 0);
        assert!(!loader.feed().is_loading());

        block_on(loader.load()).unwrap();
        assert_eq!(loader.feed().cursor().page(), 1);
    }

    #[test]
    fn test_concurrent_begin_is_refused() {
        let mut feed = BookFeed::new(10);
        let ticket = feed.begin().unwrap();
        assert!(feed.begin().is_none());
        feed.complete(ticket, vec![book(1)], &ImageResolver::new(ASSETS));
        assert!(!feed.is_loading());
    }

    #[test]
    fn test_loading_state_visible_before_fetch_runs() {
        let api = Rc::new(MockApi::new());
        api.push_books((0..10).map(book).collect());
        let loader = loader(&api);

        let ticket = loader.start().unwrap();
        assert!(loader.feed().is_loading());
        assert!(loader.start().is_none());
        assert_eq!(block_on(loader.load()).unwrap(), LoadOutcome::Skipped);
        assert!(api.calls().is_empty());

        let outcome = block_on(loader.fetch(ticket)).unwrap();
        assert_eq!(outcome, LoadOutcome::Appended { count: 10, has_more: true });
        assert!(!loader.feed().is_loading());
        assert_eq!(api.calls(), vec![ApiCall::ListBooks(PageRequest { page: 0, size: 10 })]);
    }

    #[test]
    fn test_page_landing_after_reset_is_dropped() {
        let images = ImageResolver::new(ASSETS);
        let mut feed = BookFeed::new(10);
        let ticket = feed.begin().unwrap();

        feed.reset();
        let fresh = feed.begin().unwrap();
        assert_eq!(fresh.request().page, 0);

        assert_eq!(feed.complete(ticket, (0..10).map(book).collect(), &images), None);
        assert!(feed.cards().is_empty());
        assert!(feed.is_loading());

        assert_eq!(feed.complete(fresh, vec![book(99)], &images), Some(1));
        assert_eq!(feed.cards().len(), 1);
        assert_eq!(feed.generation(), 1);
    }

    #[test]
    fn test_reload_starts_from_first_page() {
        let api = Rc::new(MockApi::new());
        api.push_books((0..10).map(book).collect());
        api.push_books((0..2).map(book).collect());
        let loader = loader(&api);

        block_on(loader.load()).unwrap();
        let outcome = block_on(loader.reload()).unwrap();
        assert_eq!(outcome, LoadOutcome::Appended { count: 2, has_more: false });
        assert_eq!(loader.feed().cards().len(), 2);
        assert_eq!(api.calls()[1], ApiCall::ListBooks(PageRequest { page: 0, size: 10 }));
    }

    #[test]
    fn test_upload_without_image_makes_no_request() {
        let api = MockApi::new();
        let form = NewBook {
            title: "Dune".to_string(),
            description: "Spice".to_string(),
            image: None,
        };
        let err = block_on(upload_book(&api, &form)).unwrap_err();
        assert!(matches!(err, ClientError::InvalidInput(_)));
        assert!(api.calls().is_empty());
    }
}
