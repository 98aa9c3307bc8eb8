use std::rc::Rc;

use yew::Reducible;

use crate::api::BookApi;
use crate::error::{ClientError, Result};
use crate::types::{Comment, NewComment};

pub const EMPTY_COMMENT_PROMPT: &str = "Write something";
pub const LOGIN_PROMPT: &str = "Please log in to comment";

#[derive(Clone, Debug, PartialEq)]
pub struct BookRef {
    pub id: i64,
    pub title: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DiscussionState {
    Closed,
    /// `ticket` identifies this particular open; a fetch started for an
    /// earlier open of the same book carries a different one.
    Loading { book: BookRef, ticket: u64 },
    Loaded { book: BookRef, comments: Vec<Comment> },
    Failed { book: BookRef, message: String },
}

impl DiscussionState {
    pub fn book(&self) -> Option<&BookRef> {
        match self {
            DiscussionState::Closed => None,
            DiscussionState::Loading { book, .. }
            | DiscussionState::Loaded { book, .. }
            | DiscussionState::Failed { book, .. } => Some(book),
        }
    }

    pub fn is_open(&self) -> bool {
        self.book().is_some()
    }

    pub fn header(&self) -> Option<String> {
        self.book().map(|b| format!("Discussion - {}", b.title))
    }

    /// Fold a comments fetch into the state. The result is ignored unless
    /// the modal is still loading for the open that started the fetch.
    pub fn resolve(&self, ticket: u64, result: Result<Vec<Comment>>) -> Option<DiscussionState> {
        let DiscussionState::Loading { book, ticket: current } = self else {
            return None;
        };
        if *current != ticket {
            return None;
        }
        let book = book.clone();
        Some(match result {
            Ok(comments) => DiscussionState::Loaded { book, comments },
            Err(e) => DiscussionState::Failed {
                book,
                message: format!("Could not load comments: {}", e),
            },
        })
    }
}

pub enum DiscussionAction {
    Open { book: BookRef, ticket: u64 },
    Resolve { ticket: u64, result: Result<Vec<Comment>> },
    Close,
}

impl Reducible for DiscussionState {
    type Action = DiscussionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            DiscussionAction::Open { book, ticket } => Rc::new(DiscussionState::Loading { book, ticket }),
            DiscussionAction::Close => Rc::new(DiscussionState::Closed),
            DiscussionAction::Resolve { ticket, result } => match self.resolve(ticket, result) {
                Some(next) => Rc::new(next),
                None => self,
            },
        }
    }
}

/// Message to show after a failed post, by cause.
pub fn failure_prompt(err: &ClientError) -> String {
    match err {
        ClientError::InvalidInput(_) => EMPTY_COMMENT_PROMPT.to_string(),
        ClientError::Unauthorized(_) => LOGIN_PROMPT.to_string(),
        ClientError::Status(status) => format!("Could not post comment: server responded with {}", status),
        ClientError::Transport(_) => "Could not reach the server, comment not posted".to_string(),
        other => format!("Could not post comment: {}", other),
    }
}

pub struct DiscussionClient<A: BookApi> {
    api: Rc<A>,
}

impl<A: BookApi> Clone for DiscussionClient<A> {
    fn clone(&self) -> Self {
        Self { api: self.api.clone() }
    }
}

impl<A: BookApi> DiscussionClient<A> {
    pub fn new(api: Rc<A>) -> Self {
        Self { api }
    }

    /// State to show immediately when the modal opens.
    pub fn opening(book: BookRef, ticket: u64) -> DiscussionState {
        DiscussionState::Loading { book, ticket }
    }

    pub async fn fetch(&self, book_id: i64) -> Result<Vec<Comment>> {
        self.api.list_comments(book_id).await
    }

    /// Open the modal for `book` and load its thread.
    pub async fn open(&self, book: BookRef, ticket: u64) -> DiscussionState {
        let id = book.id;
        let loading = Self::opening(book, ticket);
        let result = self.fetch(id).await;
        loading.resolve(ticket, result).unwrap_or(loading)
    }

    pub async fn send(&self, book_id: i64, text: &str, token: &str) -> Result<()> {
        let content = text.trim();
        if content.is_empty() {
            return Err(ClientError::InvalidInput("comment is empty".to_string()));
        }
        let comment = NewComment {
            book_id,
            content: content.to_string(),
        };
        self.api.post_comment(&comment, token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{comment, ApiCall, MockApi};
    use futures::executor::block_on;

    fn dune() -> BookRef {
        BookRef { id: 42, title: "Dune".to_string() }
    }

    #[test]
    fn test_open_sets_header_and_fetches_once() {
        let api = Rc::new(MockApi::new());
        api.push_comments(vec![comment("Paul", "Fear is the mind-killer")]);
        let client = DiscussionClient::new(api.clone());

        let loading = DiscussionClient::<MockApi>::opening(dune(), 1);
        assert_eq!(loading.header().as_deref(), Some("Discussion - Dune"));

        let state = block_on(client.open(dune(), 1));
        assert_eq!(state.header().as_deref(), Some("Discussion - Dune"));
        assert_eq!(api.calls(), vec![ApiCall::ListComments(42)]);
        match state {
            DiscussionState::Loaded { comments, .. } => {
                assert_eq!(comments.len(), 1);
                assert_eq!(comments[0].display_name, "Paul");
            }
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[test]
    fn test_empty_comment_makes_no_request() {
        let api = Rc::new(MockApi::new());
        let client = DiscussionClient::new(api.clone());

        for text in ["", "   ", "\n\t"] {
            let err = block_on(client.send(42, text, "tok")).unwrap_err();
            assert_eq!(failure_prompt(&err), EMPTY_COMMENT_PROMPT);
        }
        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_send_posts_with_bearer_token() {
        let api = Rc::new(MockApi::new());
        let client = DiscussionClient::new(api.clone());

        block_on(client.send(42, " great read ", "abc.def.ghi")).unwrap();
        assert_eq!(
            api.calls(),
            vec![ApiCall::PostComment {
                comment: NewComment { book_id: 42, content: "great read".to_string() },
                token: "abc.def.ghi".to_string(),
            }]
        );
    }

    #[test]
    fn test_failure_prompts_distinguish_causes() {
        let api = Rc::new(MockApi::new());
        api.push_post_result(Err(ClientError::Unauthorized(401)));
        api.push_post_result(Err(ClientError::Status(500)));
        let client = DiscussionClient::new(api);

        let auth = block_on(client.send(1, "hi", "")).unwrap_err();
        assert_eq!(failure_prompt(&auth), LOGIN_PROMPT);

        let server = block_on(client.send(1, "hi", "tok")).unwrap_err();
        assert_ne!(failure_prompt(&server), LOGIN_PROMPT);
        assert!(failure_prompt(&server).contains("500"));
    }

    #[test]
    fn test_reducer_lifecycle() {
        let state = Rc::new(DiscussionState::Closed);
        let state = state.reduce(DiscussionAction::Open { book: dune(), ticket: 1 });
        assert_eq!(*state, DiscussionState::Loading { book: dune(), ticket: 1 });

        let loaded = state.reduce(DiscussionAction::Resolve {
            ticket: 1,
            result: Ok(vec![comment("Jessica", "Bene Gesserit")]),
        });
        assert!(matches!(&*loaded, DiscussionState::Loaded { comments, .. } if comments.len() == 1));

        let unchanged = loaded.clone().reduce(DiscussionAction::Resolve { ticket: 1, result: Ok(vec![]) });
        assert!(Rc::ptr_eq(&loaded, &unchanged));

        let closed = unchanged.reduce(DiscussionAction::Close);
        assert!(!closed.is_open());
        assert_eq!(closed.header(), None);
    }

    #[test]
    fn test_late_result_is_ignored() {
        let closed = DiscussionState::Closed;
        assert_eq!(closed.resolve(1, Ok(vec![])), None);

        let other = DiscussionState::Loading { book: BookRef { id: 7, title: "Emma".into() }, ticket: 2 };
        assert_eq!(other.resolve(1, Ok(vec![])), None);

        let failed = DiscussionState::Loading { book: dune(), ticket: 3 }
            .resolve(3, Err(ClientError::Status(500)))
            .unwrap();
        assert!(matches!(failed, DiscussionState::Failed { .. }));
        assert_eq!(failed.header().as_deref(), Some("Discussion - Dune"));
    }

    #[test]
    fn test_reopening_same_book_drops_earlier_fetch() {
        let state = Rc::new(DiscussionState::Closed)
            .reduce(DiscussionAction::Open { book: dune(), ticket: 1 })
            .reduce(DiscussionAction::Close)
            .reduce(DiscussionAction::Open { book: dune(), ticket: 2 });

        let stale = state.clone().reduce(DiscussionAction::Resolve {
            ticket: 1,
            result: Ok(vec![comment("Old", "stale thread")]),
        });
        assert!(Rc::ptr_eq(&state, &stale));
        assert_eq!(*stale, DiscussionState::Loading { book: dune(), ticket: 2 });

        let fresh = stale.reduce(DiscussionAction::Resolve {
            ticket: 2,
            result: Ok(vec![comment("New", "current thread")]),
        });
        match &*fresh {
            DiscussionState::Loaded { comments, .. } => assert_eq!(comments[0].display_name, "New"),
            other => panic!("unexpected state {:?}", other),
        }
    }
}
