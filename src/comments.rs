/// A single entry in a video's comment thread.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: String,
    pub author: String,
    pub avatar: String,
    pub text: String,
    pub time: String,
    pub likes: i64,
    /// Whether the current viewer has liked this comment.
    pub liked: bool,
}

/// Supplies the seed comments shown when a video opens. Threads are
/// per-overlay and never persisted, so the source only has to produce the
/// initial fixture state.
pub trait CommentSource: Send + Sync {
    fn seed(&self, video_id: &str) -> Vec<Comment>;
}

#[derive(Default)]
pub struct FixtureCommentSource;

impl CommentSource for FixtureCommentSource {
    fn seed(&self, _video_id: &str) -> Vec<Comment> {
        vec![
            Comment {
                id: "seed-1".into(),
                author: "Alex M.".into(),
                avatar: String::new(),
                text: "Great video! Really useful information.".into(),
                time: "2 hours ago".into(),
                likes: 42,
                liked: false,
            },
            Comment {
                id: "seed-2".into(),
                author: "Maria K.".into(),
                avatar: String::new(),
                text: "Thanks for the content, waiting for the next one!".into(),
                time: "5 hours ago".into(),
                likes: 28,
                liked: false,
            },
        ]
    }
}

/// Ordered comment thread for one open video view, newest first. Created
/// fresh each time a video opens and dropped with the view.
#[derive(Debug, Clone)]
pub struct CommentThread {
    comments: Vec<Comment>,
    next_local_id: u64,
}

impl CommentThread {
    pub fn seeded(source: &dyn CommentSource, video_id: &str) -> Self {
        Self {
            comments: source.seed(video_id),
            next_local_id: 1,
        }
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    /// Prepends a new comment and returns it. Callers validate that the text
    /// is non-blank before posting.
    pub fn post(&mut self, author: &str, text: &str) -> &Comment {
        let comment = Comment {
            id: format!("local-{}", self.next_local_id),
            author: author.to_string(),
            avatar: String::new(),
            text: text.trim().to_string(),
            time: "just now".into(),
            likes: 0,
            liked: false,
        };
        self.next_local_id += 1;
        self.comments.insert(0, comment);
        &self.comments[0]
    }

    /// Removes the first comment with the given id. Returns whether anything
    /// was removed; the relative order of the rest is untouched.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.comments.iter().position(|comment| comment.id == id) {
            Some(index) => {
                self.comments.remove(index);
                true
            }
            None => false,
        }
    }

    /// Toggles the viewer's like on a comment, returning the new like count.
    pub fn toggle_like(&mut self, id: &str) -> Option<i64> {
        let comment = self.comments.iter_mut().find(|comment| comment.id == id)?;
        if comment.liked {
            comment.liked = false;
            comment.likes -= 1;
        } else {
            comment.liked = true;
            comment.likes += 1;
        }
        Some(comment.likes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EmptySource;

    impl CommentSource for EmptySource {
        fn seed(&self, _video_id: &str) -> Vec<Comment> {
            Vec::new()
        }
    }

    #[test]
    fn seeded_thread_carries_fixtures() {
        let thread = CommentThread::seeded(&FixtureCommentSource, "1");
        assert_eq!(thread.len(), 2);
        assert_eq!(thread.comments()[0].author, "Alex M.");
    }

    #[test]
    fn post_prepends() {
        let mut thread = CommentThread::seeded(&FixtureCommentSource, "1");
        thread.post("you", "hello");
        assert_eq!(thread.comments()[0].text, "hello");
        assert_eq!(thread.comments()[0].author, "you");
        assert_eq!(thread.len(), 3);
    }

    #[test]
    fn remove_deletes_exactly_one_and_keeps_order() {
        let mut thread = CommentThread::seeded(&EmptySource, "1");
        thread.post("a", "first");
        thread.post("b", "second");
        thread.post("c", "third");

        let middle = thread.comments()[1].id.clone();
        assert!(thread.remove(&middle));
        assert_eq!(thread.len(), 2);
        assert_eq!(thread.comments()[0].text, "third");
        assert_eq!(thread.comments()[1].text, "first");

        assert!(!thread.remove("missing"));
        assert_eq!(thread.len(), 2);
    }

    #[test]
    fn toggle_like_is_symmetric() {
        let mut thread = CommentThread::seeded(&FixtureCommentSource, "1");
        let id = thread.comments()[0].id.clone();
        assert_eq!(thread.toggle_like(&id), Some(43));
        assert_eq!(thread.toggle_like(&id), Some(42));
        assert_eq!(thread.toggle_like("missing"), None);
    }
}
