use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;

use crate::api::BookApi;
use crate::error::{ClientError, Result};
use crate::types::{Book, Comment, NewBook, NewComment, PageRequest};

#[derive(Clone, Debug, PartialEq)]
pub enum ApiCall {
    ListBooks(PageRequest),
    UploadBook { title: String },
    ListComments(i64),
    PostComment { comment: NewComment, token: String },
}

/// Scripted `BookApi` that records every request it receives.
#[derive(Default)]
pub struct MockApi {
    calls: RefCell<Vec<ApiCall>>,
    books: RefCell<VecDeque<Result<Vec<Book>>>>,
    comments: RefCell<VecDeque<Result<Vec<Comment>>>>,
    posts: RefCell<VecDeque<Result<()>>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_books(&self, books: Vec<Book>) {
        self.books.borrow_mut().push_back(Ok(books));
    }

    pub fn push_books_error(&self, err: ClientError) {
        self.books.borrow_mut().push_back(Err(err));
    }

    pub fn push_comments(&self, comments: Vec<Comment>) {
        self.comments.borrow_mut().push_back(Ok(comments));
    }

    pub fn push_post_result(&self, result: Result<()>) {
        self.posts.borrow_mut().push_back(result);
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.borrow().clone()
    }
}

fn exhausted() -> ClientError {
    ClientError::Transport("mock has no scripted response".to_string())
}

#[async_trait(?Send)]
impl BookApi for MockApi {
    async fn list_books(&self, request: PageRequest) -> Result<Vec<Book>> {
        self.calls.borrow_mut().push(ApiCall::ListBooks(request));
        self.books.borrow_mut().pop_front().unwrap_or_else(|| Err(exhausted()))
    }

    async fn upload_book(&self, book: &NewBook) -> Result<()> {
        self.calls.borrow_mut().push(ApiCall::UploadBook { title: book.title.clone() });
        Ok(())
    }

    async fn list_comments(&self, book_id: i64) -> Result<Vec<Comment>> {
        self.calls.borrow_mut().push(ApiCall::ListComments(book_id));
        self.comments.borrow_mut().pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn post_comment(&self, comment: &NewComment, token: &str) -> Result<()> {
        self.calls.borrow_mut().push(ApiCall::PostComment {
            comment: comment.clone(),
            token: token.to_string(),
        });
        self.posts.borrow_mut().pop_front().unwrap_or(Ok(()))
    }
}

pub fn book(id: i64) -> Book {
    Book {
        id,
        title: format!("Book {}", id),
        description: format!("About book {}", id),
        image_path: format!("{}.jpg", id),
    }
}

pub fn comment(author: &str, content: &str) -> Comment {
    Comment {
        display_name: author.to_string(),
        content: content.to_string(),
    }
}
