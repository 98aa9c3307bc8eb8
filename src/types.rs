use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_path: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default)]
    pub display_name: String,
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub book_id: i64,
    pub content: String,
}

/// Form fields for the admin upload.
#[derive(Clone, Debug)]
pub struct NewBook {
    pub title: String,
    pub description: String,
    pub image: Option<web_sys::File>,
}

/// A rendered list entry with its cover URL already resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct BookCard {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image_url: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_from_backend_json() {
        let raw = r#"[{"id":7,"title":"Dune","description":"Spice","imagePath":"dune.jpg"},
                      {"id":8,"title":"Emma"}]"#;
        let books: Vec<Book> = serde_json::from_str(raw).unwrap();
        assert_eq!(books[0].image_path, "dune.jpg");
        assert_eq!(books[1].description, "");
    }

    #[test]
    fn test_new_comment_wire_shape() {
        let body = serde_json::to_value(NewComment { book_id: 42, content: "hi".into() }).unwrap();
        assert_eq!(body, serde_json::json!({ "bookId": 42, "content": "hi" }));
    }
}
