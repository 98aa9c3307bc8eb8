use async_trait::async_trait;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Request, RequestInit, RequestMode, Response};

use crate::error::{ClientError, Result};
use crate::types::{Book, Comment, NewBook, NewComment, PageRequest};

/// HTTP surface of the book backend.
#[async_trait(?Send)]
pub trait BookApi {
    async fn list_books(&self, request: PageRequest) -> Result<Vec<Book>>;
    async fn upload_book(&self, book: &NewBook) -> Result<()>;
    async fn list_comments(&self, book_id: i64) -> Result<Vec<Comment>>;
    async fn post_comment(&self, comment: &NewComment, token: &str) -> Result<()>;
}

pub fn books_url(api_base: &str, request: PageRequest) -> String {
    format!("{}/books?page={}&size={}", api_base, request.page, request.size)
}

pub fn upload_url(api_base: &str) -> String {
    format!("{}/books/upload", api_base)
}

pub fn comments_url(api_base: &str, book_id: i64) -> String {
    format!("{}/comments?bookId={}", api_base, book_id)
}

pub fn post_comment_url(api_base: &str) -> String {
    format!("{}/comments", api_base)
}

/// `BookApi` over the browser Fetch API.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchClient {
    api_base: String,
}

impl FetchClient {
    pub fn new(api_base: &str) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    fn build_request(method: &str, url: &str, body: Option<&JsValue>) -> Result<Request> {
        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);
        if let Some(body) = body {
            opts.set_body(body);
        }
        Request::new_with_str_and_init(url, &opts)
            .map_err(|e| ClientError::Transport(format!("request creation failed: {:?}", e)))
    }

    async fn send(request: &Request) -> Result<Response> {
        let window = crate::dom::window()?;
        let resp_value = JsFuture::from(window.fetch_with_request(request))
            .await
            .map_err(|e| ClientError::Transport(format!("fetch {} failed: {:?}", request.url(), e)))?;
        let resp: Response = resp_value
            .dyn_into()
            .map_err(|_| ClientError::Transport("response is not a Response".to_string()))?;
        if resp.ok() {
            Ok(resp)
        } else {
            Err(ClientError::from_status(resp.status()))
        }
    }

    async fn read_json<T: DeserializeOwned>(resp: &Response) -> Result<T> {
        let promise = resp
            .json()
            .map_err(|e| ClientError::Transport(format!("json() failed: {:?}", e)))?;
        let value = JsFuture::from(promise)
            .await
            .map_err(|e| ClientError::Decode(format!("body is not JSON: {:?}", e)))?;
        serde_wasm_bindgen::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[async_trait(?Send)]
impl BookApi for FetchClient {
    async fn list_books(&self, request: PageRequest) -> Result<Vec<Book>> {
        let url = books_url(&self.api_base, request);
        let req = Self::build_request("GET", &url, None)?;
        let resp = Self::send(&req).await?;
        Self::read_json(&resp).await
    }

    async fn upload_book(&self, book: &NewBook) -> Result<()> {
        let image = book
            .image
            .as_ref()
            .ok_or_else(|| ClientError::InvalidInput("no image selected".to_string()))?;

        let form = FormData::new()
            .map_err(|e| ClientError::Platform(format!("FormData unavailable: {:?}", e)))?;
        let append_err = |e: JsValue| ClientError::Platform(format!("form append failed: {:?}", e));
        form.append_with_str("title", &book.title).map_err(append_err)?;
        form.append_with_str("description", &book.description).map_err(append_err)?;
        form.append_with_blob_and_filename("image", image, &image.name())
            .map_err(append_err)?;

        let body = JsValue::from(form);
        let req = Self::build_request("POST", &upload_url(&self.api_base), Some(&body))?;
        Self::send(&req).await?;
        Ok(())
    }

    async fn list_comments(&self, book_id: i64) -> Result<Vec<Comment>> {
        let req = Self::build_request("GET", &comments_url(&self.api_base, book_id), None)?;
        let resp = Self::send(&req).await?;
        Self::read_json(&resp).await
    }

    async fn post_comment(&self, comment: &NewComment, token: &str) -> Result<()> {
        let body = serde_json::to_string(comment)
            .map_err(|e| ClientError::Decode(format!("failed to encode comment: {}", e)))?;
        let req = Self::build_request(
            "POST",
            &post_comment_url(&self.api_base),
            Some(&JsValue::from_str(&body)),
        )?;
        let headers = req.headers();
        headers
            .set("Content-Type", "application/json")
            .and_then(|_| headers.set("Authorization", &format!("Bearer {}", token)))
            .map_err(|e| ClientError::Transport(format!("setting headers failed: {:?}", e)))?;
        Self::send(&req).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://books.test/api";

    #[test]
    fn test_books_url_carries_cursor() {
        let url = books_url(BASE, PageRequest { page: 3, size: 10 });
        assert_eq!(url, "https://books.test/api/books?page=3&size=10");
    }

    #[test]
    fn test_comment_urls() {
        assert_eq!(comments_url(BASE, 42), "https://books.test/api/comments?bookId=42");
        assert_eq!(post_comment_url(BASE), "https://books.test/api/comments");
        assert_eq!(upload_url(BASE), "https://books.test/api/books/upload");
    }
}
