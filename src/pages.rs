#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Index,
    Books,
}

pub struct PageDescriptor {
    pub page: Page,
    /// Final URL path segments that select this page.
    pub segments: &'static [&'static str],
}

pub const PAGES: &[PageDescriptor] = &[
    PageDescriptor {
        page: Page::Index,
        segments: &["index.html", ""],
    },
    PageDescriptor {
        page: Page::Books,
        segments: &["books.html"],
    },
];

pub fn final_segment(pathname: &str) -> &str {
    pathname.rsplit('/').next().unwrap_or("")
}

impl Page {
    pub fn from_path(pathname: &str) -> Option<Page> {
        let segment = final_segment(pathname);
        PAGES
            .iter()
            .find(|d| d.segments.iter().any(|s| *s == segment))
            .map(|d| d.page)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Page::Index => "index",
            Page::Books => "books",
        }
    }
}
