use std::collections::HashSet;
use std::sync::Arc;

use crate::catalog::{CatalogService, ChannelSummary, VideoRecord};
use crate::comments::{CommentSource, CommentThread};
use crate::notify::{Notice, Notify};
use crate::session;

/// Sidebar-selectable top-level areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Home,
    Videos,
    Subscriptions,
    History,
    Favorites,
    Profile,
    Upload,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Home,
        Section::Videos,
        Section::Subscriptions,
        Section::History,
        Section::Favorites,
        Section::Profile,
        Section::Upload,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::Videos => "Videos",
            Section::Subscriptions => "Subscriptions",
            Section::History => "History",
            Section::Favorites => "Favorites",
            Section::Profile => "Profile",
            Section::Upload => "Upload",
        }
    }
}

/// State of an open video view: the record, its recommendations and a fresh
/// comment thread, plus the viewer's own toggles.
pub struct VideoView {
    pub video: VideoRecord,
    pub recommended: Vec<VideoRecord>,
    pub comments: CommentThread,
    pub liked: bool,
    pub subscribed: bool,
}

impl VideoView {
    /// Like count including the viewer's own like. The catalog record itself
    /// is never mutated.
    pub fn like_count(&self) -> i64 {
        self.video.likes + i64::from(self.liked)
    }
}

pub struct ChannelView {
    pub channel: ChannelSummary,
    pub videos: Vec<VideoRecord>,
    pub subscribed: bool,
}

/// The single full-screen view covering the base section, if any. Exactly
/// one variant can be active; opening another replaces the whole value, so
/// stacking is unrepresentable.
pub enum Overlay {
    Auth,
    Video(VideoView),
    Channel(ChannelView),
}

/// Single source of truth for who is signed in and what is on screen. All
/// cross-view transitions go through it; the UI reads the current state each
/// frame and calls the operations below in response to input.
pub struct Controller {
    catalog: Arc<dyn CatalogService>,
    comment_source: Arc<dyn CommentSource>,
    notifier: Arc<dyn Notify>,
    session: session::Manager,
    section: Section,
    overlay: Option<Overlay>,
    history: Vec<String>,
    favorites: HashSet<String>,
    subscriptions: HashSet<String>,
    recommended_limit: usize,
}

impl Controller {
    pub fn new(
        catalog: Arc<dyn CatalogService>,
        comment_source: Arc<dyn CommentSource>,
        notifier: Arc<dyn Notify>,
        session: session::Manager,
        recommended_limit: usize,
    ) -> Self {
        Self {
            catalog,
            comment_source,
            notifier,
            session,
            section: Section::Home,
            overlay: None,
            history: Vec::new(),
            favorites: HashSet::new(),
            subscriptions: HashSet::new(),
            recommended_limit,
        }
    }

    /// Restores the persisted session. Runs once, before the first render:
    /// with a remembered user the bare feed shows, without one the auth
    /// overlay does.
    pub fn initialize(&mut self) {
        self.session.restore();
        if !self.session.is_authenticated() {
            self.overlay = Some(Overlay::Auth);
        }
    }

    pub fn current_user(&self) -> Option<String> {
        self.session.current()
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn is_favorite(&self, video_id: &str) -> bool {
        self.favorites.contains(video_id)
    }

    pub fn is_subscribed(&self, channel_id: &str) -> bool {
        self.subscriptions.contains(channel_id)
    }

    /// Signs the user in. Blank names are rejected with a notice and leave
    /// the state untouched; success dismisses an active auth overlay.
    pub fn login(&mut self, name: &str) -> bool {
        match self.session.login(name) {
            Ok(name) => {
                if matches!(self.overlay, Some(Overlay::Auth)) {
                    self.overlay = None;
                }
                self.notifier.notify(Notice::success(format!("Welcome, {name}!")));
                true
            }
            Err(err) => {
                self.notifier.notify(Notice::error(err.to_string()));
                false
            }
        }
    }

    /// Clears the session, erases the remembered user and surfaces the auth
    /// overlay: there is no browsing while signed out.
    pub fn logout(&mut self) {
        self.session.logout();
        self.overlay = Some(Overlay::Auth);
        self.notifier.notify(Notice::info("Signed out."));
    }

    /// Switches the sidebar section. Never touches the overlay.
    pub fn select_section(&mut self, section: Section) {
        self.section = section;
    }

    /// Opens a video as the active overlay, replacing whatever was there in
    /// one assignment, so no bare-page frame is ever observable in between.
    /// Also works as the channel-to-video transition.
    pub fn open_video(&mut self, video: &VideoRecord) {
        if !self.require_user("watch videos") {
            return;
        }
        let recommended = self
            .catalog
            .recommended(&video.id, self.recommended_limit)
            .unwrap_or_default();
        let comments = CommentThread::seeded(self.comment_source.as_ref(), &video.id);
        self.record_watch(&video.id);
        self.overlay = Some(Overlay::Video(VideoView {
            video: video.clone(),
            recommended,
            comments,
            liked: false,
            subscribed: self.subscriptions.contains(&video.channel_id),
        }));
    }

    /// Opens a channel page as the active overlay. Also works as the
    /// video-to-channel transition; replacement is a single assignment.
    pub fn open_channel(&mut self, channel_id: &str) {
        if !self.require_user("browse channels") {
            return;
        }
        let summary = match self.catalog.channel_summary(channel_id) {
            Ok(Some(summary)) => summary,
            Ok(None) => {
                self.notifier
                    .notify(Notice::error(format!("Unknown channel: {channel_id}")));
                return;
            }
            Err(err) => {
                self.notifier.notify(Notice::error(err.to_string()));
                return;
            }
        };
        let videos = self.catalog.channel_videos(channel_id).unwrap_or_default();
        let subscribed = self.subscriptions.contains(channel_id);
        self.overlay = Some(Overlay::Channel(ChannelView {
            channel: summary,
            videos,
            subscribed,
        }));
    }

    /// Dismisses the active overlay. Signed out, the auth overlay comes
    /// right back: dismissing it without logging in is not a valid state.
    pub fn close_overlay(&mut self) {
        self.overlay = None;
        if !self.session.is_authenticated() {
            self.overlay = Some(Overlay::Auth);
        }
    }

    /// The records backing the active section, for the grid the UI renders.
    pub fn section_videos(&self) -> Vec<VideoRecord> {
        let all = self.catalog.list_videos().unwrap_or_default();
        match self.section {
            Section::Home | Section::Videos => all,
            Section::Subscriptions => all
                .into_iter()
                .filter(|video| self.subscriptions.contains(&video.channel_id))
                .collect(),
            Section::History => self
                .history
                .iter()
                .filter_map(|id| all.iter().find(|video| &video.id == id).cloned())
                .collect(),
            Section::Favorites => all
                .into_iter()
                .filter(|video| self.favorites.contains(&video.id))
                .collect(),
            Section::Profile | Section::Upload => Vec::new(),
        }
    }

    pub fn toggle_favorite(&mut self, video_id: &str) {
        if !self.favorites.remove(video_id) {
            self.favorites.insert(video_id.to_string());
        }
    }

    /// Flips the viewer's like on the open video view. No-op without one.
    pub fn toggle_like(&mut self) {
        if let Some(Overlay::Video(view)) = self.overlay.as_mut() {
            view.liked = !view.liked;
        }
    }

    /// Flips the subscription to the channel behind the open video or
    /// channel view.
    pub fn toggle_subscription(&mut self) {
        let channel_id = match self.overlay.as_ref() {
            Some(Overlay::Video(view)) => view.video.channel_id.clone(),
            Some(Overlay::Channel(view)) => view.channel.id.clone(),
            _ => return,
        };
        let subscribed = if self.subscriptions.remove(&channel_id) {
            false
        } else {
            self.subscriptions.insert(channel_id);
            true
        };
        match self.overlay.as_mut() {
            Some(Overlay::Video(view)) => view.subscribed = subscribed,
            Some(Overlay::Channel(view)) => view.subscribed = subscribed,
            _ => {}
        }
    }

    /// Posts a comment to the open video view as the current user. Blank
    /// text is a validation error reported as a notice.
    pub fn post_comment(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            self.notifier
                .notify(Notice::error("Comment text required."));
            return false;
        }
        let author = match self.session.current() {
            Some(name) => name,
            None => {
                self.notifier.notify(Notice::error("Sign in to comment."));
                return false;
            }
        };
        match self.overlay.as_mut() {
            Some(Overlay::Video(view)) => {
                view.comments.post(&author, text);
                true
            }
            _ => false,
        }
    }

    pub fn remove_comment(&mut self, id: &str) -> bool {
        match self.overlay.as_mut() {
            Some(Overlay::Video(view)) => view.comments.remove(id),
            _ => false,
        }
    }

    pub fn like_comment(&mut self, id: &str) {
        if let Some(Overlay::Video(view)) = self.overlay.as_mut() {
            view.comments.toggle_like(id);
        }
    }

    fn require_user(&self, action: &str) -> bool {
        if self.session.is_authenticated() {
            return true;
        }
        self.notifier
            .notify(Notice::error(format!("Sign in to {action}.")));
        false
    }

    fn record_watch(&mut self, video_id: &str) {
        self.history.retain(|id| id != video_id);
        self.history.insert(0, video_id.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MockCatalogService;
    use crate::comments::FixtureCommentSource;
    use crate::notify::{NoticeKind, Recorder};
    use crate::storage;
    use std::path::Path;
    use tempfile::tempdir;

    fn sample(id: &str, channel_id: &str) -> VideoRecord {
        VideoRecord {
            id: id.into(),
            title: format!("Video {id}"),
            thumbnail: String::new(),
            channel: format!("Channel {channel_id}"),
            channel_id: channel_id.into(),
            channel_avatar: String::new(),
            views: "1K".into(),
            upload_time: "today".into(),
            duration: "1:00".into(),
            likes: 10,
            dislikes: 1,
            description: String::new(),
        }
    }

    fn catalog() -> Arc<MockCatalogService> {
        Arc::new(MockCatalogService::with_videos(
            vec![sample("1", "a"), sample("2", "a"), sample("3", "b")],
            false,
        ))
    }

    fn controller_at(path: &Path, recorder: Arc<Recorder>) -> Controller {
        let store = storage::Store::open(storage::Options {
            path: Some(path.to_path_buf()),
        })
        .map(Arc::new)
        .ok();
        Controller::new(
            catalog(),
            Arc::new(FixtureCommentSource),
            recorder,
            session::Manager::new(store),
            5,
        )
    }

    fn memory_controller() -> (Controller, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::new());
        let controller = Controller::new(
            catalog(),
            Arc::new(FixtureCommentSource),
            recorder.clone(),
            session::Manager::new(None),
            5,
        );
        (controller, recorder)
    }

    fn logged_in() -> (Controller, Arc<Recorder>) {
        let (mut controller, recorder) = memory_controller();
        controller.initialize();
        controller.login("alice");
        (controller, recorder)
    }

    #[test]
    fn fresh_process_without_user_shows_auth() {
        let (mut controller, _) = memory_controller();
        controller.initialize();
        assert!(matches!(controller.overlay(), Some(Overlay::Auth)));
        assert_eq!(controller.current_user(), None);
    }

    #[test]
    fn login_restores_across_processes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.db");

        let recorder = Arc::new(Recorder::new());
        let mut first = controller_at(&path, recorder.clone());
        first.initialize();
        first.login("alice");
        drop(first);

        let mut second = controller_at(&path, recorder);
        second.initialize();
        assert_eq!(second.current_user(), Some("alice".to_string()));
        assert!(second.overlay().is_none());
    }

    #[test]
    fn logout_clears_user_and_persisted_slot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.db");

        let recorder = Arc::new(Recorder::new());
        let mut controller = controller_at(&path, recorder);
        controller.initialize();
        controller.login("alice");
        controller.logout();

        assert_eq!(controller.current_user(), None);
        assert!(matches!(controller.overlay(), Some(Overlay::Auth)));

        let store = storage::Store::open(storage::Options { path: Some(path) }).unwrap();
        assert_eq!(store.get_user().unwrap(), None);
    }

    #[test]
    fn failed_login_leaves_auth_open_and_notifies() {
        let (mut controller, recorder) = memory_controller();
        controller.initialize();

        assert!(!controller.login("   "));
        assert!(matches!(controller.overlay(), Some(Overlay::Auth)));
        assert_eq!(recorder.last().unwrap().kind, NoticeKind::Error);

        assert!(controller.login("bob"));
        assert_eq!(controller.current_user(), Some("bob".to_string()));
        assert!(controller.overlay().is_none());
    }

    #[test]
    fn overlay_reflects_only_the_most_recent_open() {
        let (mut controller, _) = logged_in();

        let video = sample("1", "a");
        controller.open_video(&video);
        assert!(matches!(controller.overlay(), Some(Overlay::Video(_))));

        controller.open_channel("b");
        match controller.overlay() {
            Some(Overlay::Channel(view)) => assert_eq!(view.channel.id, "b"),
            other => panic!("expected channel overlay, got {}", overlay_name(other)),
        }

        controller.open_video(&sample("2", "a"));
        match controller.overlay() {
            Some(Overlay::Video(view)) => assert_eq!(view.video.id, "2"),
            other => panic!("expected video overlay, got {}", overlay_name(other)),
        }
    }

    fn overlay_name(overlay: Option<&Overlay>) -> &'static str {
        match overlay {
            None => "none",
            Some(Overlay::Auth) => "auth",
            Some(Overlay::Video(_)) => "video",
            Some(Overlay::Channel(_)) => "channel",
        }
    }

    #[test]
    fn channel_overlay_filters_by_channel_id_in_order() {
        let (mut controller, _) = logged_in();

        controller.open_channel("a");
        match controller.overlay() {
            Some(Overlay::Channel(view)) => {
                assert_eq!(view.videos.len(), 2);
                assert_eq!(view.videos[0].id, "1");
                assert_eq!(view.videos[1].id, "2");
                assert_eq!(view.channel.video_count, 2);
            }
            other => panic!("expected channel overlay, got {}", overlay_name(other)),
        }
    }

    #[test]
    fn unknown_channel_is_rejected_with_notice() {
        let (mut controller, recorder) = logged_in();
        controller.open_channel("missing");
        assert!(controller.overlay().is_none());
        assert_eq!(recorder.last().unwrap().kind, NoticeKind::Error);
    }

    #[test]
    fn opening_while_signed_out_is_rejected() {
        let (mut controller, recorder) = memory_controller();
        controller.initialize();

        controller.open_video(&sample("1", "a"));
        assert!(matches!(controller.overlay(), Some(Overlay::Auth)));
        assert_eq!(recorder.last().unwrap().kind, NoticeKind::Error);

        controller.open_channel("a");
        assert!(matches!(controller.overlay(), Some(Overlay::Auth)));
    }

    #[test]
    fn close_overlay_reopens_auth_when_signed_out() {
        let (mut controller, _) = memory_controller();
        controller.initialize();
        controller.close_overlay();
        assert!(matches!(controller.overlay(), Some(Overlay::Auth)));
    }

    #[test]
    fn close_overlay_returns_to_bare_section_when_signed_in() {
        let (mut controller, _) = logged_in();
        controller.open_video(&sample("1", "a"));
        controller.close_overlay();
        assert!(controller.overlay().is_none());
    }

    #[test]
    fn select_section_never_touches_the_overlay() {
        let (mut controller, _) = logged_in();
        controller.open_video(&sample("1", "a"));
        controller.select_section(Section::Favorites);
        assert_eq!(controller.section(), Section::Favorites);
        assert!(matches!(controller.overlay(), Some(Overlay::Video(_))));
    }

    #[test]
    fn comments_prepend_and_remove_one() {
        let (mut controller, _) = logged_in();
        controller.open_video(&sample("1", "a"));

        assert!(controller.post_comment("hello"));
        let (first_id, first_text, len) = match controller.overlay() {
            Some(Overlay::Video(view)) => (
                view.comments.comments()[0].id.clone(),
                view.comments.comments()[0].text.clone(),
                view.comments.len(),
            ),
            other => panic!("expected video overlay, got {}", overlay_name(other)),
        };
        assert_eq!(first_text, "hello");
        assert_eq!(len, 3);

        assert!(controller.remove_comment(&first_id));
        match controller.overlay() {
            Some(Overlay::Video(view)) => {
                assert_eq!(view.comments.len(), 2);
                assert_eq!(view.comments.comments()[0].author, "Alex M.");
            }
            other => panic!("expected video overlay, got {}", overlay_name(other)),
        }
    }

    #[test]
    fn blank_comment_is_rejected_with_notice() {
        let (mut controller, recorder) = logged_in();
        controller.open_video(&sample("1", "a"));
        assert!(!controller.post_comment("   "));
        assert_eq!(recorder.last().unwrap().kind, NoticeKind::Error);
        match controller.overlay() {
            Some(Overlay::Video(view)) => assert_eq!(view.comments.len(), 2),
            other => panic!("expected video overlay, got {}", overlay_name(other)),
        }
    }

    #[test]
    fn comment_thread_reseeds_on_reopen() {
        let (mut controller, _) = logged_in();
        let video = sample("1", "a");

        controller.open_video(&video);
        controller.post_comment("hello");
        controller.close_overlay();

        controller.open_video(&video);
        match controller.overlay() {
            Some(Overlay::Video(view)) => assert_eq!(view.comments.len(), 2),
            other => panic!("expected video overlay, got {}", overlay_name(other)),
        }
    }

    #[test]
    fn history_is_newest_first_and_deduplicated() {
        let (mut controller, _) = logged_in();
        controller.open_video(&sample("1", "a"));
        controller.open_video(&sample("3", "b"));
        controller.open_video(&sample("1", "a"));
        controller.close_overlay();

        controller.select_section(Section::History);
        let history = controller.section_videos();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, "1");
        assert_eq!(history[1].id, "3");
    }

    #[test]
    fn subscriptions_drive_the_subscriptions_section() {
        let (mut controller, _) = logged_in();
        controller.open_channel("a");
        controller.toggle_subscription();
        controller.close_overlay();

        controller.select_section(Section::Subscriptions);
        let videos = controller.section_videos();
        assert_eq!(videos.len(), 2);
        assert!(videos.iter().all(|video| video.channel_id == "a"));

        controller.open_channel("a");
        controller.toggle_subscription();
        controller.close_overlay();
        assert!(controller.section_videos().is_empty());
    }

    #[test]
    fn like_toggle_adjusts_displayed_count_only() {
        let (mut controller, _) = logged_in();
        controller.open_video(&sample("1", "a"));
        controller.toggle_like();
        match controller.overlay() {
            Some(Overlay::Video(view)) => {
                assert!(view.liked);
                assert_eq!(view.like_count(), 11);
                assert_eq!(view.video.likes, 10);
            }
            other => panic!("expected video overlay, got {}", overlay_name(other)),
        }
        controller.toggle_like();
        match controller.overlay() {
            Some(Overlay::Video(view)) => assert_eq!(view.like_count(), 10),
            other => panic!("expected video overlay, got {}", overlay_name(other)),
        }
    }

    #[test]
    fn favorites_section_lists_toggled_videos() {
        let (mut controller, _) = logged_in();
        controller.toggle_favorite("2");
        controller.select_section(Section::Favorites);
        let favorites = controller.section_videos();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].id, "2");

        controller.toggle_favorite("2");
        assert!(controller.section_videos().is_empty());
    }

    #[test]
    fn repeated_login_is_idempotent() {
        let (mut controller, _) = logged_in();
        assert!(controller.login("alice"));
        assert_eq!(controller.current_user(), Some("alice".to_string()));
        assert!(controller.overlay().is_none());
    }
}
