mod add_book_modal;
mod books_page;
mod discussion_modal;
mod header;
mod index_page;
mod session_controls;

pub use add_book_modal::AddBookModal;
pub use books_page::BooksPage;
pub use discussion_modal::DiscussionModal;
pub use header::Header;
pub use index_page::IndexPage;
pub use session_controls::SessionControls;
