use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use once_cell::sync::Lazy;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap,
};
use ratatui::{Frame, Terminal};
use regex::Regex;
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

use crate::catalog::{self, VideoRecord};
use crate::controller::{Controller, Overlay, Section, VideoView};
use crate::notify::{Notice, NoticeKind, Notifications};

const SIDEBAR_WIDTH: u16 = 24;
const RECOMMENDED_WIDTH: u16 = 38;
const WATCH_LINK_BASE: &str = "https://vidstream.example/watch";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("compile email regex"));

fn valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

struct Palette {
    bg: Color,
    panel_bg: Color,
    selected_bg: Color,
    border_idle: Color,
    border_focused: Color,
    text_primary: Color,
    text_secondary: Color,
    accent: Color,
    success: Color,
    error: Color,
}

impl Palette {
    fn dark() -> Self {
        Self {
            bg: Color::Rgb(24, 24, 32),
            panel_bg: Color::Rgb(30, 30, 42),
            selected_bg: Color::Rgb(62, 64, 84),
            border_idle: Color::Rgb(52, 54, 70),
            border_focused: Color::Rgb(235, 111, 146),
            text_primary: Color::Rgb(224, 222, 244),
            text_secondary: Color::Rgb(144, 140, 170),
            accent: Color::Rgb(235, 111, 146),
            success: Color::Rgb(156, 207, 216),
            error: Color::Rgb(235, 111, 146),
        }
    }

    fn plain() -> Self {
        Self {
            bg: Color::Reset,
            panel_bg: Color::Reset,
            selected_bg: Color::DarkGray,
            border_idle: Color::DarkGray,
            border_focused: Color::Magenta,
            text_primary: Color::Reset,
            text_secondary: Color::Gray,
            accent: Color::Magenta,
            success: Color::Green,
            error: Color::Red,
        }
    }

    fn for_theme(theme: &str) -> Self {
        match theme {
            "plain" => Self::plain(),
            _ => Self::dark(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Pane {
    Sidebar,
    Grid,
}

impl Pane {
    fn next(self) -> Self {
        match self {
            Pane::Sidebar => Pane::Grid,
            Pane::Grid => Pane::Sidebar,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Default)]
enum AuthMode {
    #[default]
    Login,
    Register,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum AuthField {
    Username,
    Email,
    Password,
    Submit,
    SwitchMode,
}

impl AuthField {
    fn next(self, mode: AuthMode) -> Self {
        match self {
            AuthField::Username => AuthField::Email,
            AuthField::Email => AuthField::Password,
            AuthField::Password => AuthField::Submit,
            AuthField::Submit => AuthField::SwitchMode,
            AuthField::SwitchMode => match mode {
                AuthMode::Login => AuthField::Email,
                AuthMode::Register => AuthField::Username,
            },
        }
    }

    fn previous(self, mode: AuthMode) -> Self {
        match self {
            AuthField::Username => AuthField::SwitchMode,
            AuthField::Email => match mode {
                AuthMode::Login => AuthField::SwitchMode,
                AuthMode::Register => AuthField::Username,
            },
            AuthField::Password => AuthField::Email,
            AuthField::Submit => AuthField::Password,
            AuthField::SwitchMode => AuthField::Submit,
        }
    }

    fn title(self) -> &'static str {
        match self {
            AuthField::Username => "Username",
            AuthField::Email => "Email",
            AuthField::Password => "Password",
            AuthField::Submit => "Submit",
            AuthField::SwitchMode => "Switch mode",
        }
    }
}

struct AuthForm {
    mode: AuthMode,
    active: AuthField,
    username: String,
    email: String,
    password: String,
}

impl Default for AuthForm {
    fn default() -> Self {
        Self {
            mode: AuthMode::Login,
            active: AuthField::Email,
            username: String::new(),
            email: String::new(),
            password: String::new(),
        }
    }
}

impl AuthForm {
    fn switch_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        if self.mode == AuthMode::Login && self.active == AuthField::Username {
            self.active = AuthField::Email;
        }
    }

    fn focus_next(&mut self) {
        self.active = self.active.next(self.mode);
    }

    fn focus_previous(&mut self) {
        self.active = self.active.previous(self.mode);
    }

    fn active_value_mut(&mut self) -> Option<&mut String> {
        match self.active {
            AuthField::Username => Some(&mut self.username),
            AuthField::Email => Some(&mut self.email),
            AuthField::Password => Some(&mut self.password),
            AuthField::Submit | AuthField::SwitchMode => None,
        }
    }

    fn insert_char(&mut self, ch: char) {
        if let Some(value) = self.active_value_mut() {
            value.push(ch);
        }
    }

    fn backspace(&mut self) {
        if let Some(value) = self.active_value_mut() {
            value.pop();
        }
    }

    fn display_value(&self, field: AuthField) -> String {
        let raw = match field {
            AuthField::Username => &self.username,
            AuthField::Email => &self.email,
            AuthField::Password => {
                return "*".repeat(self.password.chars().count());
            }
            AuthField::Submit | AuthField::SwitchMode => return String::new(),
        };
        raw.clone()
    }

    /// Checks the form and returns the display name to sign in with: the
    /// register username, or the email's local part on login.
    fn validate(&self) -> Result<String, String> {
        let email = self.email.trim();
        let password = self.password.trim();
        let username = self.username.trim();

        let complete = match self.mode {
            AuthMode::Login => !email.is_empty() && !password.is_empty(),
            AuthMode::Register => {
                !username.is_empty() && !email.is_empty() && !password.is_empty()
            }
        };
        if !complete {
            return Err("Fill in every field.".to_string());
        }
        if !valid_email(email) {
            return Err("Enter a valid email address.".to_string());
        }

        let name = match self.mode {
            AuthMode::Login => email.split('@').next().unwrap_or(email),
            AuthMode::Register => username,
        };
        Ok(name.to_string())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Default)]
enum UploadField {
    #[default]
    File,
    Title,
    Description,
    Submit,
}

impl UploadField {
    fn next(self) -> Self {
        match self {
            UploadField::File => UploadField::Title,
            UploadField::Title => UploadField::Description,
            UploadField::Description => UploadField::Submit,
            UploadField::Submit => UploadField::File,
        }
    }

    fn previous(self) -> Self {
        match self {
            UploadField::File => UploadField::Submit,
            UploadField::Title => UploadField::File,
            UploadField::Description => UploadField::Title,
            UploadField::Submit => UploadField::Description,
        }
    }

    fn title(self) -> &'static str {
        match self {
            UploadField::File => "Video file",
            UploadField::Title => "Title",
            UploadField::Description => "Description",
            UploadField::Submit => "Upload",
        }
    }
}

#[derive(Default)]
struct UploadForm {
    active: UploadField,
    file_name: String,
    title: String,
    description: String,
}

impl UploadForm {
    fn focus_next(&mut self) {
        self.active = self.active.next();
    }

    fn focus_previous(&mut self) {
        self.active = self.active.previous();
    }

    fn active_value_mut(&mut self) -> Option<&mut String> {
        match self.active {
            UploadField::File => Some(&mut self.file_name),
            UploadField::Title => Some(&mut self.title),
            UploadField::Description => Some(&mut self.description),
            UploadField::Submit => None,
        }
    }

    fn insert_char(&mut self, ch: char) {
        if let Some(value) = self.active_value_mut() {
            value.push(ch);
        }
    }

    fn backspace(&mut self) {
        if let Some(value) = self.active_value_mut() {
            value.pop();
        }
    }

    fn display_value(&self, field: UploadField) -> &str {
        match field {
            UploadField::File => &self.file_name,
            UploadField::Title => &self.title,
            UploadField::Description => &self.description,
            UploadField::Submit => "",
        }
    }

    /// A file and a title are required; returns the file name to report.
    fn validate(&self) -> Result<String, String> {
        if self.file_name.trim().is_empty() || self.title.trim().is_empty() {
            return Err("Add a video file and a title.".to_string());
        }
        Ok(self.file_name.trim().to_string())
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Default)]
enum VideoFocus {
    #[default]
    Comments,
    Composer,
    Recommended,
}

pub struct Options {
    pub controller: Controller,
    pub notifications: Notifications,
    pub toast_ttl: Duration,
    pub theme: String,
    pub config_path: String,
}

pub struct Model {
    controller: Controller,
    notifications: Notifications,
    palette: Palette,
    toast_ttl: Duration,
    focus: Pane,
    nav_index: usize,
    grid_index: usize,
    search: String,
    search_active: bool,
    auth_form: AuthForm,
    upload_form: UploadForm,
    composer: String,
    video_focus: VideoFocus,
    comment_index: usize,
    recommended_index: usize,
    channel_index: usize,
    active_notice: Option<(Notice, Instant)>,
    config_path: String,
    needs_redraw: bool,
}

impl Model {
    pub fn new(opts: Options) -> Self {
        let palette = Palette::for_theme(&opts.theme);
        Self {
            controller: opts.controller,
            notifications: opts.notifications,
            palette,
            toast_ttl: opts.toast_ttl,
            focus: Pane::Grid,
            nav_index: 0,
            grid_index: 0,
            search: String::new(),
            search_active: false,
            auth_form: AuthForm::default(),
            upload_form: UploadForm::default(),
            composer: String::new(),
            video_focus: VideoFocus::default(),
            comment_index: 0,
            recommended_index: 0,
            channel_index: 0,
            active_notice: None,
            config_path: opts.config_path,
            needs_redraw: true,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        enable_raw_mode()?;
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = self.event_loop(&mut terminal);

        disable_raw_mode()?;
        terminal.backend_mut().execute(LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let mut last_tick = Instant::now();
        let tick_rate = Duration::from_millis(120);

        loop {
            if self.poll_notices() {
                self.mark_dirty();
            }

            if self.needs_redraw {
                terminal.draw(|frame| self.draw(frame))?;
                self.needs_redraw = false;
            }

            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_millis(16));

            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        match self.handle_key(key.code) {
                            Ok(true) => break,
                            Ok(false) => {}
                            Err(err) => {
                                self.show_notice(Notice::error(format!("Error: {err}")));
                            }
                        }
                    }
                }
            }

            if last_tick.elapsed() >= tick_rate {
                last_tick = Instant::now();
                if self.expire_notice() {
                    self.mark_dirty();
                }
            }
        }

        Ok(())
    }

    fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    fn poll_notices(&mut self) -> bool {
        let drained = self.notifications.drain();
        match drained.into_iter().last() {
            Some(notice) => {
                self.active_notice = Some((notice, Instant::now()));
                true
            }
            None => false,
        }
    }

    fn show_notice(&mut self, notice: Notice) {
        self.active_notice = Some((notice, Instant::now()));
        self.mark_dirty();
    }

    fn expire_notice(&mut self) -> bool {
        match self.active_notice.as_ref() {
            Some((_, shown_at)) if shown_at.elapsed() >= self.toast_ttl => {
                self.active_notice = None;
                true
            }
            _ => false,
        }
    }

    fn visible_videos(&self) -> Vec<VideoRecord> {
        catalog::search_videos(&self.search, &self.controller.section_videos())
    }

    fn with_video_view<T>(&self, f: impl FnOnce(&VideoView) -> T) -> Option<T> {
        match self.controller.overlay() {
            Some(Overlay::Video(view)) => Some(f(view)),
            _ => None,
        }
    }

    fn reset_video_cursors(&mut self) {
        self.composer.clear();
        self.video_focus = VideoFocus::default();
        self.comment_index = 0;
        self.recommended_index = 0;
    }

    fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        match self.controller.overlay() {
            Some(Overlay::Auth) => return self.handle_auth_key(code),
            Some(Overlay::Video(_)) => return self.handle_video_key(code),
            Some(Overlay::Channel(_)) => return self.handle_channel_key(code),
            None => {}
        }

        if self.search_active {
            return self.handle_search_key(code);
        }
        if self.controller.section() == Section::Upload && self.focus == Pane::Grid {
            return self.handle_upload_key(code);
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Char('/') => {
                self.search_active = true;
            }
            KeyCode::Char('x') => {
                self.controller.logout();
                self.auth_form = AuthForm::default();
            }
            KeyCode::Char('h') | KeyCode::Left => {
                self.focus = Pane::Sidebar;
            }
            KeyCode::Char('l') | KeyCode::Right => {
                self.focus = Pane::Grid;
            }
            KeyCode::Tab => {
                self.focus = self.focus.next();
            }
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::Char('f') => {
                if self.focus == Pane::Grid {
                    if let Some(video) = self.selected_grid_video() {
                        self.controller.toggle_favorite(&video.id);
                    }
                }
            }
            KeyCode::Char('c') => {
                if self.focus == Pane::Grid {
                    if let Some(video) = self.selected_grid_video() {
                        self.controller.open_channel(&video.channel_id);
                        self.channel_index = 0;
                    }
                }
            }
            KeyCode::Enter => self.activate_selection(),
            _ => {}
        }
        self.mark_dirty();
        Ok(false)
    }

    fn move_selection(&mut self, delta: isize) {
        match self.focus {
            Pane::Sidebar => {
                self.nav_index = step_index(self.nav_index, delta, Section::ALL.len());
            }
            Pane::Grid => {
                let len = self.visible_videos().len();
                self.grid_index = step_index(self.grid_index, delta, len);
            }
        }
    }

    fn selected_grid_video(&self) -> Option<VideoRecord> {
        let videos = self.visible_videos();
        videos.get(self.grid_index.min(videos.len().saturating_sub(1))).cloned()
    }

    fn activate_selection(&mut self) {
        match self.focus {
            Pane::Sidebar => {
                let section = Section::ALL[self.nav_index.min(Section::ALL.len() - 1)];
                self.controller.select_section(section);
                self.grid_index = 0;
                self.focus = Pane::Grid;
            }
            Pane::Grid => {
                if let Some(video) = self.selected_grid_video() {
                    self.controller.open_video(&video);
                    self.reset_video_cursors();
                }
            }
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) -> Result<bool> {
        match code {
            KeyCode::Enter => {
                self.search_active = false;
                self.grid_index = 0;
            }
            KeyCode::Esc => {
                self.search_active = false;
                self.search.clear();
                self.grid_index = 0;
            }
            KeyCode::Backspace => {
                self.search.pop();
            }
            KeyCode::Char(ch) => {
                self.search.push(ch);
            }
            _ => {}
        }
        self.mark_dirty();
        Ok(false)
    }

    fn handle_auth_key(&mut self, code: KeyCode) -> Result<bool> {
        match code {
            KeyCode::Esc => {
                // Policy: without a session this immediately reopens.
                self.controller.close_overlay();
            }
            KeyCode::Tab | KeyCode::Down => self.auth_form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.auth_form.focus_previous(),
            KeyCode::Backspace => self.auth_form.backspace(),
            KeyCode::Enter => match self.auth_form.active {
                AuthField::Submit => self.submit_auth(),
                AuthField::SwitchMode => self.auth_form.switch_mode(),
                _ => self.auth_form.focus_next(),
            },
            KeyCode::Char(ch) => self.auth_form.insert_char(ch),
            _ => {}
        }
        self.mark_dirty();
        Ok(false)
    }

    fn submit_auth(&mut self) {
        match self.auth_form.validate() {
            Ok(name) => {
                if self.controller.login(&name) {
                    self.auth_form = AuthForm::default();
                }
            }
            Err(message) => self.show_notice(Notice::error(message)),
        }
    }

    fn handle_video_key(&mut self, code: KeyCode) -> Result<bool> {
        if self.video_focus == VideoFocus::Composer {
            match code {
                KeyCode::Esc => self.video_focus = VideoFocus::Comments,
                KeyCode::Enter => {
                    let text = self.composer.clone();
                    if self.controller.post_comment(&text) {
                        self.composer.clear();
                        self.comment_index = 0;
                        self.video_focus = VideoFocus::Comments;
                    }
                }
                KeyCode::Backspace => {
                    self.composer.pop();
                }
                KeyCode::Char(ch) => self.composer.push(ch),
                _ => {}
            }
            self.mark_dirty();
            return Ok(false);
        }

        match code {
            KeyCode::Esc => {
                self.controller.close_overlay();
            }
            KeyCode::Tab => {
                self.video_focus = match self.video_focus {
                    VideoFocus::Comments => VideoFocus::Recommended,
                    _ => VideoFocus::Comments,
                };
            }
            KeyCode::Char('c') => self.video_focus = VideoFocus::Composer,
            KeyCode::Char('l') => self.controller.toggle_like(),
            KeyCode::Char('s') => self.controller.toggle_subscription(),
            KeyCode::Char('y') => self.share_current_video(),
            KeyCode::Char('o') => {
                if let Some(channel_id) = self.with_video_view(|view| view.video.channel_id.clone())
                {
                    self.controller.open_channel(&channel_id);
                    self.channel_index = 0;
                }
            }
            KeyCode::Char('j') | KeyCode::Down => self.move_video_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_video_selection(-1),
            KeyCode::Char('d') => {
                let selected = self.with_video_view(|view| {
                    view.comments
                        .comments()
                        .get(self.comment_index)
                        .map(|comment| comment.id.clone())
                });
                if let Some(Some(id)) = selected {
                    self.controller.remove_comment(&id);
                    let len = self
                        .with_video_view(|view| view.comments.len())
                        .unwrap_or(0);
                    self.comment_index = self.comment_index.min(len.saturating_sub(1));
                }
            }
            KeyCode::Char('u') => {
                let selected = self.with_video_view(|view| {
                    view.comments
                        .comments()
                        .get(self.comment_index)
                        .map(|comment| comment.id.clone())
                });
                if let Some(Some(id)) = selected {
                    self.controller.like_comment(&id);
                }
            }
            KeyCode::Enter => {
                if self.video_focus == VideoFocus::Recommended {
                    let next = self.with_video_view(|view| {
                        view.recommended.get(self.recommended_index).cloned()
                    });
                    if let Some(Some(video)) = next {
                        // Direct transition: the new view replaces this one
                        // in a single assignment.
                        self.controller.open_video(&video);
                        self.reset_video_cursors();
                    }
                }
            }
            _ => {}
        }
        self.mark_dirty();
        Ok(false)
    }

    fn move_video_selection(&mut self, delta: isize) {
        match self.video_focus {
            VideoFocus::Comments => {
                let len = self
                    .with_video_view(|view| view.comments.len())
                    .unwrap_or(0);
                self.comment_index = step_index(self.comment_index, delta, len);
            }
            VideoFocus::Recommended => {
                let len = self
                    .with_video_view(|view| view.recommended.len())
                    .unwrap_or(0);
                self.recommended_index = step_index(self.recommended_index, delta, len);
            }
            VideoFocus::Composer => {}
        }
    }

    fn share_current_video(&mut self) {
        let Some(link) =
            self.with_video_view(|view| format!("{WATCH_LINK_BASE}/{}", view.video.id))
        else {
            return;
        };
        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(link)) {
            Ok(()) => self.show_notice(Notice::success("Link copied to clipboard.")),
            Err(_) => self.show_notice(Notice::info("Clipboard unavailable.")),
        }
    }

    fn handle_channel_key(&mut self, code: KeyCode) -> Result<bool> {
        match code {
            KeyCode::Esc => {
                self.controller.close_overlay();
            }
            KeyCode::Char('s') => self.controller.toggle_subscription(),
            KeyCode::Char('j') | KeyCode::Down => {
                let len = match self.controller.overlay() {
                    Some(Overlay::Channel(view)) => view.videos.len(),
                    _ => 0,
                };
                self.channel_index = step_index(self.channel_index, 1, len);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                let len = match self.controller.overlay() {
                    Some(Overlay::Channel(view)) => view.videos.len(),
                    _ => 0,
                };
                self.channel_index = step_index(self.channel_index, -1, len);
            }
            KeyCode::Enter => {
                let video = match self.controller.overlay() {
                    Some(Overlay::Channel(view)) => view.videos.get(self.channel_index).cloned(),
                    _ => None,
                };
                if let Some(video) = video {
                    self.controller.open_video(&video);
                    self.reset_video_cursors();
                }
            }
            _ => {}
        }
        self.mark_dirty();
        Ok(false)
    }

    fn handle_upload_key(&mut self, code: KeyCode) -> Result<bool> {
        match code {
            KeyCode::Esc => {
                self.focus = Pane::Sidebar;
            }
            KeyCode::Tab | KeyCode::Down => self.upload_form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.upload_form.focus_previous(),
            KeyCode::Backspace => self.upload_form.backspace(),
            KeyCode::Enter => match self.upload_form.active {
                UploadField::Submit => self.submit_upload(),
                _ => self.upload_form.focus_next(),
            },
            KeyCode::Char(ch) => self.upload_form.insert_char(ch),
            _ => {}
        }
        self.mark_dirty();
        Ok(false)
    }

    fn submit_upload(&mut self) {
        match self.upload_form.validate() {
            Ok(file_name) => {
                self.show_notice(Notice::success(format!("{file_name} uploaded.")));
                self.upload_form.reset();
            }
            Err(message) => self.show_notice(Notice::error(message)),
        }
    }

    fn draw(&mut self, frame: &mut Frame<'_>) {
        let full = frame.size();
        frame.render_widget(
            Block::default().style(Style::default().bg(self.palette.bg)),
            full,
        );

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(full);

        self.draw_status(frame, layout[0]);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(layout[1]);

        self.draw_sidebar(frame, main_chunks[0]);
        self.draw_content(frame, main_chunks[1]);

        let footer = Paragraph::new(self.footer_text())
            .style(
                Style::default()
                    .fg(self.palette.text_secondary)
                    .bg(self.palette.panel_bg)
                    .add_modifier(Modifier::ITALIC),
            )
            .alignment(Alignment::Center);
        frame.render_widget(footer, layout[2]);

        match self.controller.overlay() {
            Some(Overlay::Auth) => self.draw_auth_overlay(frame, layout[1]),
            Some(Overlay::Video(_)) => self.draw_video_overlay(frame, layout[1]),
            Some(Overlay::Channel(_)) => self.draw_channel_overlay(frame, layout[1]),
            None => {}
        }
    }

    fn draw_status(&self, frame: &mut Frame<'_>, area: Rect) {
        let (text, color) = match self.active_notice.as_ref() {
            Some((notice, _)) => {
                let color = match notice.kind {
                    NoticeKind::Info => self.palette.text_primary,
                    NoticeKind::Success => self.palette.success,
                    NoticeKind::Error => self.palette.error,
                };
                (notice.text.clone(), color)
            }
            None => {
                let user = self
                    .controller
                    .current_user()
                    .unwrap_or_else(|| "signed out".to_string());
                (
                    format!("VidStream · {} · {}", self.controller.section().title(), user),
                    self.palette.text_secondary,
                )
            }
        };
        let status = Paragraph::new(text).style(
            Style::default()
                .fg(color)
                .bg(self.palette.selected_bg)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(status, area);
    }

    fn pane_block(&self, title: &'static str, focused: bool) -> Block<'static> {
        let border_style = if focused {
            Style::default().fg(self.palette.border_focused)
        } else {
            Style::default().fg(self.palette.border_idle)
        };
        let title_style = if focused {
            Style::default()
                .fg(self.palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.palette.text_secondary)
        };
        Block::default()
            .title(Span::styled(title, title_style))
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(self.palette.panel_bg))
            .padding(Padding::uniform(1))
    }

    fn draw_sidebar(&self, frame: &mut Frame<'_>, area: Rect) {
        let block = self.pane_block("VidStream", self.focus == Pane::Sidebar);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let items: Vec<ListItem> = Section::ALL
            .iter()
            .map(|section| {
                let active = *section == self.controller.section();
                let marker = if active { "▸ " } else { "  " };
                let style = if active {
                    Style::default()
                        .fg(self.palette.accent)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(self.palette.text_primary)
                };
                ListItem::new(Line::from(Span::styled(
                    format!("{marker}{}", section.title()),
                    style,
                )))
            })
            .collect();

        let highlight = if self.focus == Pane::Sidebar {
            Style::default().bg(self.palette.selected_bg)
        } else {
            Style::default()
        };
        let list = List::new(items).highlight_style(highlight);
        let mut state = ListState::default().with_selected(Some(self.nav_index));
        frame.render_stateful_widget(list, inner, &mut state);
    }

    fn draw_content(&self, frame: &mut Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        self.draw_header(frame, chunks[0]);

        match self.controller.section() {
            Section::Upload => self.draw_upload_form(frame, chunks[1]),
            Section::Profile => self.draw_profile(frame, chunks[1]),
            _ => self.draw_grid(frame, chunks[1]),
        }
    }

    fn draw_header(&self, frame: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.palette.border_idle))
            .style(Style::default().bg(self.palette.panel_bg));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let search_display = if self.search_active {
            format!("Search: {}▌", self.search)
        } else if self.search.is_empty() {
            "Search: (press / to search)".to_string()
        } else {
            format!("Search: {}", self.search)
        };
        let search_style = if self.search_active {
            Style::default().fg(self.palette.accent)
        } else {
            Style::default().fg(self.palette.text_secondary)
        };
        let user = self
            .controller
            .current_user()
            .unwrap_or_else(|| "signed out".to_string());

        let line = Line::from(vec![
            Span::styled(
                "▶ VidStream",
                Style::default()
                    .fg(self.palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled(search_display, search_style),
            Span::raw("   "),
            Span::styled(user, Style::default().fg(self.palette.text_primary)),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }

    fn draw_grid(&self, frame: &mut Frame<'_>, area: Rect) {
        let focused = self.focus == Pane::Grid;
        let block = self.pane_block(self.controller.section().title(), focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let videos = self.visible_videos();
        if videos.is_empty() {
            let message = Paragraph::new(self.empty_grid_message())
                .style(Style::default().fg(self.palette.text_secondary))
                .wrap(Wrap { trim: true });
            frame.render_widget(message, inner);
            return;
        }

        let items: Vec<ListItem> = videos
            .iter()
            .map(|video| {
                let marker = if self.controller.is_favorite(&video.id) {
                    "♥ "
                } else {
                    "  "
                };
                let title = Line::from(Span::styled(
                    format!("{marker}{}", video.title),
                    Style::default()
                        .fg(self.palette.text_primary)
                        .add_modifier(Modifier::BOLD),
                ));
                let meta = Line::from(Span::styled(
                    format!("  {}", format_video_meta(video)),
                    Style::default().fg(self.palette.text_secondary),
                ));
                ListItem::new(vec![title, meta])
            })
            .collect();

        let highlight = if focused {
            Style::default().bg(self.palette.selected_bg)
        } else {
            Style::default()
        };
        let list = List::new(items).highlight_style(highlight);
        let selected = self.grid_index.min(videos.len().saturating_sub(1));
        let mut state = ListState::default().with_selected(Some(selected));
        frame.render_stateful_widget(list, inner, &mut state);
    }

    fn empty_grid_message(&self) -> &'static str {
        if !self.search.trim().is_empty() {
            return "Nothing matches the search.";
        }
        match self.controller.section() {
            Section::Subscriptions => "No subscriptions yet. Subscribe to a channel to fill this section.",
            Section::History => "No watch history yet. Open a video to fill this section.",
            Section::Favorites => "No favorites yet. Press f on a video to keep it here.",
            _ => "The catalog is empty.",
        }
    }

    fn draw_profile(&self, frame: &mut Frame<'_>, area: Rect) {
        let block = self.pane_block("Profile", self.focus == Pane::Grid);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let user = self
            .controller
            .current_user()
            .unwrap_or_else(|| "signed out".to_string());
        let lines = vec![
            Line::from(Span::styled(
                user,
                Style::default()
                    .fg(self.palette.text_primary)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("Config: {}", self.config_path),
                Style::default().fg(self.palette.text_secondary),
            )),
            Line::from(Span::styled(
                "Press x to sign out.",
                Style::default().fg(self.palette.text_secondary),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn draw_upload_form(&self, frame: &mut Frame<'_>, area: Rect) {
        let block = self.pane_block("Upload", self.focus == Pane::Grid);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let editing = self.focus == Pane::Grid;
        let mut lines: Vec<Line> = Vec::new();
        for field in [
            UploadField::File,
            UploadField::Title,
            UploadField::Description,
        ] {
            let active = editing && self.upload_form.active == field;
            let label_style = if active {
                Style::default()
                    .fg(self.palette.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.palette.text_secondary)
            };
            let value = self.upload_form.display_value(field);
            let display = if value.is_empty() {
                "(not set)".to_string()
            } else {
                value.to_string()
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{:<12}", field.title()), label_style),
                Span::styled(display, Style::default().fg(self.palette.text_primary)),
            ]));
            lines.push(Line::from(""));
        }

        let submit_active = editing && self.upload_form.active == UploadField::Submit;
        let submit_style = if submit_active {
            Style::default()
                .fg(self.palette.accent)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(self.palette.text_primary)
        };
        lines.push(Line::from(Span::styled("[ Upload ]", submit_style)));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "A video file and a title are required.",
            Style::default().fg(self.palette.text_secondary),
        )));

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
    }

    fn draw_auth_overlay(&self, frame: &mut Frame<'_>, area: Rect) {
        let popup = centered_rect(area, 46, 14);
        frame.render_widget(Clear, popup);

        let title = match self.auth_form.mode {
            AuthMode::Login => "Sign in",
            AuthMode::Register => "Register",
        };
        let block = self.pane_block(title, true);
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let mut lines: Vec<Line> = Vec::new();
        let fields: &[AuthField] = match self.auth_form.mode {
            AuthMode::Login => &[AuthField::Email, AuthField::Password],
            AuthMode::Register => &[AuthField::Username, AuthField::Email, AuthField::Password],
        };
        for field in fields {
            let active = self.auth_form.active == *field;
            let label_style = if active {
                Style::default()
                    .fg(self.palette.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.palette.text_secondary)
            };
            let value = self.auth_form.display_value(*field);
            let display = if value.is_empty() && !active {
                "(not set)".to_string()
            } else if active {
                format!("{value}▌")
            } else {
                value
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{:<10}", field.title()), label_style),
                Span::styled(display, Style::default().fg(self.palette.text_primary)),
            ]));
            lines.push(Line::from(""));
        }

        let submit_active = self.auth_form.active == AuthField::Submit;
        let submit_style = if submit_active {
            Style::default()
                .fg(self.palette.accent)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(self.palette.text_primary)
        };
        let submit_label = match self.auth_form.mode {
            AuthMode::Login => "[ Sign in ]",
            AuthMode::Register => "[ Register ]",
        };
        lines.push(Line::from(Span::styled(submit_label, submit_style)));
        lines.push(Line::from(""));

        let switch_active = self.auth_form.active == AuthField::SwitchMode;
        let switch_style = if switch_active {
            Style::default()
                .fg(self.palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.palette.text_secondary)
        };
        let switch_label = match self.auth_form.mode {
            AuthMode::Login => "No account? Register",
            AuthMode::Register => "Have an account? Sign in",
        };
        lines.push(Line::from(Span::styled(switch_label, switch_style)));

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn draw_video_overlay(&self, frame: &mut Frame<'_>, area: Rect) {
        let Some(Overlay::Video(view)) = self.controller.overlay() else {
            return;
        };
        frame.render_widget(Clear, area);

        let block = self.pane_block("Now playing", true);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(RECOMMENDED_WIDTH)])
            .split(inner);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(columns[0]);

        // Player placeholder, in place of a real video surface.
        let player = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("▶  {}", view.video.duration),
                Style::default()
                    .fg(self.palette.accent)
                    .add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
        .style(Style::default().bg(self.palette.selected_bg));
        frame.render_widget(player, left[0]);

        let title_line = Line::from(Span::styled(
            view.video.title.clone(),
            Style::default()
                .fg(self.palette.text_primary)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(title_line), left[1]);

        let subscribe_label = if view.subscribed {
            "[Subscribed]"
        } else {
            "[Subscribe]"
        };
        let like_label = if view.liked { "Liked" } else { "Like" };
        let meta_line = Line::from(vec![
            Span::styled(
                view.video.channel.clone(),
                Style::default()
                    .fg(self.palette.text_primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", subscribe_label),
                Style::default().fg(if view.subscribed {
                    self.palette.success
                } else {
                    self.palette.accent
                }),
            ),
            Span::styled(
                format!(
                    "   {} views · {}   {} {} · {} dislikes",
                    view.video.views,
                    view.video.upload_time,
                    like_label,
                    view.like_count(),
                    view.video.dislikes
                ),
                Style::default().fg(self.palette.text_secondary),
            ),
        ]);
        frame.render_widget(Paragraph::new(meta_line), left[2]);

        self.draw_video_detail(frame, left[3], view);
        self.draw_recommended(frame, columns[1], view);
    }

    fn draw_video_detail(&self, frame: &mut Frame<'_>, area: Rect, view: &VideoView) {
        let width = area.width.saturating_sub(2).max(16) as usize;
        let mut lines: Vec<Line> = Vec::new();

        for piece in wrap(&view.video.description, width) {
            lines.push(Line::from(Span::styled(
                piece.into_owned(),
                Style::default().fg(self.palette.text_secondary),
            )));
        }
        lines.push(Line::from(""));

        let composer_active = self.video_focus == VideoFocus::Composer;
        let composer_style = if composer_active {
            Style::default().fg(self.palette.accent)
        } else {
            Style::default().fg(self.palette.text_secondary)
        };
        let composer_display = if composer_active {
            format!("Comment: {}▌", self.composer)
        } else if self.composer.is_empty() {
            "Comment: (press c to write)".to_string()
        } else {
            format!("Comment: {}", self.composer)
        };
        lines.push(Line::from(Span::styled(composer_display, composer_style)));
        lines.push(Line::from(""));

        lines.push(Line::from(Span::styled(
            format!("Comments ({})", view.comments.len()),
            Style::default()
                .fg(self.palette.text_primary)
                .add_modifier(Modifier::BOLD),
        )));

        let comments_focused = self.video_focus == VideoFocus::Comments;
        for (index, comment) in view.comments.comments().iter().enumerate() {
            let selected = comments_focused && index == self.comment_index;
            let base = if selected {
                Style::default()
                    .fg(self.palette.text_primary)
                    .bg(self.palette.selected_bg)
            } else {
                Style::default().fg(self.palette.text_primary)
            };
            let like_marker = if comment.liked { "▲" } else { "△" };
            lines.push(Line::from(Span::styled(
                format!(
                    "{} · {} · {} {}",
                    comment.author, comment.time, like_marker, comment.likes
                ),
                base.add_modifier(Modifier::BOLD),
            )));
            for piece in wrap(&comment.text, width.saturating_sub(2).max(8)) {
                lines.push(Line::from(Span::styled(
                    format!("  {piece}"),
                    if selected {
                        base
                    } else {
                        Style::default().fg(self.palette.text_secondary)
                    },
                )));
            }
        }

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn draw_recommended(&self, frame: &mut Frame<'_>, area: Rect, view: &VideoView) {
        let focused = self.video_focus == VideoFocus::Recommended;
        let block = self.pane_block("Recommended", focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if view.recommended.is_empty() {
            let message = Paragraph::new("Nothing else to watch.")
                .style(Style::default().fg(self.palette.text_secondary));
            frame.render_widget(message, inner);
            return;
        }

        let width = inner.width.saturating_sub(2).max(8) as usize;
        let items: Vec<ListItem> = view
            .recommended
            .iter()
            .map(|video| {
                let title = Line::from(Span::styled(
                    truncate_to_width(&video.title, width),
                    Style::default().fg(self.palette.text_primary),
                ));
                let meta = Line::from(Span::styled(
                    truncate_to_width(
                        &format!("{} · {} views", video.channel, video.views),
                        width,
                    ),
                    Style::default().fg(self.palette.text_secondary),
                ));
                ListItem::new(vec![title, meta])
            })
            .collect();

        let highlight = if focused {
            Style::default().bg(self.palette.selected_bg)
        } else {
            Style::default()
        };
        let list = List::new(items).highlight_style(highlight);
        let selected = self
            .recommended_index
            .min(view.recommended.len().saturating_sub(1));
        let mut state = ListState::default().with_selected(Some(selected));
        frame.render_stateful_widget(list, inner, &mut state);
    }

    fn draw_channel_overlay(&self, frame: &mut Frame<'_>, area: Rect) {
        let Some(Overlay::Channel(view)) = self.controller.overlay() else {
            return;
        };
        frame.render_widget(Clear, area);

        let block = self.pane_block("Channel", true);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(inner);

        // Banner strip standing in for the channel art.
        frame.render_widget(
            Paragraph::new("").style(Style::default().bg(self.palette.selected_bg)),
            chunks[0],
        );

        let subscribe_label = if view.subscribed {
            "[Subscribed]"
        } else {
            "[Subscribe]"
        };
        let header = vec![
            Line::from(Span::styled(
                view.channel.name.clone(),
                Style::default()
                    .fg(self.palette.text_primary)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled(
                    format!(
                        "@{} · {} subscribers · {} videos  ",
                        view.channel.id, view.channel.subscribers, view.channel.video_count
                    ),
                    Style::default().fg(self.palette.text_secondary),
                ),
                Span::styled(
                    subscribe_label,
                    Style::default().fg(if view.subscribed {
                        self.palette.success
                    } else {
                        self.palette.accent
                    }),
                ),
            ]),
        ];
        frame.render_widget(Paragraph::new(header), chunks[1]);

        let items: Vec<ListItem> = view
            .videos
            .iter()
            .map(|video| {
                let title = Line::from(Span::styled(
                    video.title.clone(),
                    Style::default()
                        .fg(self.palette.text_primary)
                        .add_modifier(Modifier::BOLD),
                ));
                let meta = Line::from(Span::styled(
                    format!("  {}", format_video_meta(video)),
                    Style::default().fg(self.palette.text_secondary),
                ));
                ListItem::new(vec![title, meta])
            })
            .collect();

        let list = List::new(items).highlight_style(Style::default().bg(self.palette.selected_bg));
        let selected = self.channel_index.min(view.videos.len().saturating_sub(1));
        let mut state = ListState::default().with_selected(Some(selected));
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    fn footer_text(&self) -> &'static str {
        match self.controller.overlay() {
            Some(Overlay::Auth) => "Tab fields · Enter submit · Esc dismiss",
            Some(Overlay::Video(_)) => {
                if self.video_focus == VideoFocus::Composer {
                    "Enter post · Esc leave composer"
                } else {
                    "Esc back · l like · s subscribe · c comment · u/d like/delete comment · Tab recommended · Enter play · o channel · y share"
                }
            }
            Some(Overlay::Channel(_)) => "Esc back · j/k move · Enter play · s subscribe",
            None => {
                if self.search_active {
                    "Type to search · Enter keep · Esc clear"
                } else if self.controller.section() == Section::Upload && self.focus == Pane::Grid {
                    "Tab fields · Enter submit · Esc leave form"
                } else {
                    "j/k move · h/l panes · Enter open · / search · f favorite · c channel · x sign out · q quit"
                }
            }
        }
    }
}

fn step_index(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let last = len - 1;
    let current = current.min(last);
    if delta.is_negative() {
        current.saturating_sub(delta.unsigned_abs())
    } else {
        current.saturating_add(delta as usize).min(last)
    }
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn format_video_meta(video: &VideoRecord) -> String {
    format!(
        "{} · {} views · {} · {}",
        video.channel, video.views, video.upload_time, video.duration
    )
}

fn truncate_to_width(text: &str, width: usize) -> String {
    if UnicodeWidthStr::width(text) <= width {
        return text.to_string();
    }
    let mut result = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = UnicodeWidthStr::width(ch.to_string().as_str());
        if used + ch_width + 1 > width {
            break;
        }
        result.push(ch);
        used += ch_width;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation() {
        assert!(valid_email("user@example.com"));
        assert!(!valid_email("user@example"));
        assert!(!valid_email("not an email"));
        assert!(!valid_email(""));
    }

    #[test]
    fn login_name_is_email_local_part() {
        let form = AuthForm {
            mode: AuthMode::Login,
            active: AuthField::Submit,
            username: String::new(),
            email: "bob@example.com".into(),
            password: "secret".into(),
        };
        assert_eq!(form.validate().unwrap(), "bob");
    }

    #[test]
    fn register_name_is_username() {
        let form = AuthForm {
            mode: AuthMode::Register,
            active: AuthField::Submit,
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "secret".into(),
        };
        assert_eq!(form.validate().unwrap(), "alice");
    }

    #[test]
    fn incomplete_auth_form_is_rejected() {
        let form = AuthForm {
            mode: AuthMode::Login,
            active: AuthField::Submit,
            username: String::new(),
            email: "bob@example.com".into(),
            password: String::new(),
        };
        assert!(form.validate().is_err());

        let form = AuthForm {
            mode: AuthMode::Login,
            active: AuthField::Submit,
            username: String::new(),
            email: "not-an-email".into(),
            password: "secret".into(),
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn auth_field_cycle_skips_username_on_login() {
        let mut field = AuthField::Email;
        field = field.next(AuthMode::Login);
        assert_eq!(field, AuthField::Password);
        field = field.next(AuthMode::Login);
        assert_eq!(field, AuthField::Submit);
        field = field.next(AuthMode::Login);
        assert_eq!(field, AuthField::SwitchMode);
        field = field.next(AuthMode::Login);
        assert_eq!(field, AuthField::Email);

        assert_eq!(
            AuthField::SwitchMode.next(AuthMode::Register),
            AuthField::Username
        );
    }

    #[test]
    fn upload_requires_file_and_title() {
        let mut form = UploadForm::default();
        assert!(form.validate().is_err());
        form.title = "My clip".into();
        assert!(form.validate().is_err());
        form.file_name = "clip.mp4".into();
        assert_eq!(form.validate().unwrap(), "clip.mp4");
    }

    #[test]
    fn step_index_clamps_at_both_ends() {
        assert_eq!(step_index(0, -1, 5), 0);
        assert_eq!(step_index(4, 1, 5), 4);
        assert_eq!(step_index(2, 1, 5), 3);
        assert_eq!(step_index(0, 1, 0), 0);
    }

    #[test]
    fn truncate_respects_display_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        let truncated = truncate_to_width("a rather long title", 8);
        assert!(UnicodeWidthStr::width(truncated.as_str()) <= 8);
        assert!(truncated.ends_with('…'));
    }

    #[test]
    fn video_meta_joins_display_fields() {
        let video = VideoRecord {
            id: "1".into(),
            title: "Title".into(),
            thumbnail: String::new(),
            channel: "Channel".into(),
            channel_id: "channel".into(),
            channel_avatar: String::new(),
            views: "1K".into(),
            upload_time: "today".into(),
            duration: "1:00".into(),
            likes: 1,
            dislikes: 0,
            description: String::new(),
        };
        assert_eq!(format_video_meta(&video), "Channel · 1K views · today · 1:00");
    }
}
