use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info};
use venuex_core::{
    agents, find_agent_by_id, open_link, tasks, Agent, ChatReply, ChatRequest, ChatSession,
    CliErrorDisplay, HealthStatus, SafeLink, Task, Venue, VenueFilter, VenueView, VenuexError,
    VenuexResult, EXAMPLE_QUERIES,
};

use crate::theme::{Theme, THEMES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Chat,
    Venues,
    Agents,
    Help,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Chat, Tab::Venues, Tab::Agents, Tab::Help]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Chat => "Chat",
            Tab::Venues => "Venues",
            Tab::Agents => "Agents",
            Tab::Help => "Help",
        }
    }

    pub fn index(&self) -> usize {
        Tab::all().iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn from_index(i: usize) -> Tab {
        Tab::all().get(i).copied().unwrap_or(Tab::Chat)
    }

    pub fn from_key(c: char) -> Option<Tab> {
        match c {
            '1' => Some(Tab::Chat),
            '2' => Some(Tab::Venues),
            '3' => Some(Tab::Agents),
            '4' => Some(Tab::Help),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
    Searching,
}

/// Work the event loop has to run outside the app lock.
#[derive(Debug)]
pub enum Command {
    SendChat(ChatRequest),
    CheckHealth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Booking,
    Details,
}

type LinkOpener = fn(&str) -> VenuexResult<SafeLink>;

pub struct App {
    pub running: bool,
    pub current_tab: Tab,
    pub theme_index: usize,
    pub selected_index: usize,
    pub input_mode: InputMode,
    pub status_message: Option<String>,

    pub session: ChatSession,
    /// Lines scrolled up from the bottom of the transcript.
    pub chat_scroll: u16,

    pub venues: Vec<Venue>,
    pub filter: VenueFilter,

    pub agents: Vec<Agent>,
    pub tasks: Vec<Task>,
    pub open_agent: Option<String>,

    pub backend_url: String,
    pub connected: bool,
    pub last_error: Option<String>,

    link_opener: LinkOpener,
}

impl App {
    pub fn new(session: ChatSession, venues: Vec<Venue>, backend_url: impl Into<String>) -> Self {
        Self {
            running: true,
            current_tab: Tab::Chat,
            theme_index: 0,
            selected_index: 0,
            input_mode: InputMode::Editing,
            status_message: None,

            session,
            chat_scroll: 0,

            venues,
            filter: VenueFilter::default(),

            agents: agents(),
            tasks: tasks(),
            open_agent: None,

            backend_url: backend_url.into(),
            connected: false,
            last_error: None,

            link_opener: open_link,
        }
    }

    pub fn theme(&self) -> &Theme {
        &THEMES[self.theme_index % THEMES.len()]
    }

    pub fn set_theme(&mut self, index: usize) {
        if index < THEMES.len() {
            self.theme_index = index;
        }
    }

    pub fn next_theme(&mut self) {
        self.theme_index = (self.theme_index + 1) % THEMES.len();
        self.status_message = Some(format!("Theme: {}", self.theme().name));
    }

    pub fn next_tab(&mut self) {
        let tabs = Tab::all();
        let idx = (self.current_tab.index() + 1) % tabs.len();
        self.switch_tab(Tab::from_index(idx));
    }

    pub fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let idx = if self.current_tab.index() == 0 {
            tabs.len() - 1
        } else {
            self.current_tab.index() - 1
        };
        self.switch_tab(Tab::from_index(idx));
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        self.current_tab = tab;
        self.selected_index = 0;
        self.open_agent = None;
        self.input_mode = if tab == Tab::Chat && self.session.input_focused() {
            InputMode::Editing
        } else {
            InputMode::Normal
        };
    }

    pub fn scroll_down(&mut self) {
        self.selected_index = self.selected_index.saturating_add(1);
        self.clamp_selection();
    }

    pub fn scroll_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn list_len(&self) -> usize {
        match self.current_tab {
            Tab::Chat if self.session.show_examples() => EXAMPLE_QUERIES.len(),
            Tab::Chat => self.chat_venues().len(),
            Tab::Venues => self.venue_view().shown(),
            Tab::Agents if self.open_agent.is_some() => self.tasks.len(),
            Tab::Agents => self.agents.len(),
            Tab::Help => 0,
        }
    }

    pub fn clamp_selection(&mut self) {
        let len = self.list_len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }

    pub fn venue_view(&self) -> VenueView<'_> {
        VenueView::build(&self.venues, &self.filter)
    }

    /// Venues attached to the most recent reply that carried any.
    pub fn chat_venues(&self) -> &[Venue] {
        self.session
            .transcript()
            .iter()
            .rev()
            .find(|m| m.has_venues())
            .map(|m| m.venues())
            .unwrap_or(&[])
    }

    pub fn selected_venue(&self) -> Option<&Venue> {
        match self.current_tab {
            Tab::Chat if !self.session.show_examples() => self.chat_venues().get(self.selected_index),
            Tab::Venues => self.venue_view().venues.get(self.selected_index).copied(),
            _ => None,
        }
    }

    pub fn selected_agent(&self) -> Option<&Agent> {
        self.agents.get(self.selected_index)
    }

    /// Agent shown on the details page.
    pub fn detail_agent(&self) -> VenuexResult<Agent> {
        let id = self.open_agent.as_deref().unwrap_or_default();
        find_agent_by_id(id).ok_or_else(|| VenuexError::AgentNotFound(id.to_string()))
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.running = false;
            return None;
        }

        match self.input_mode {
            InputMode::Editing => return self.handle_editing_key(key),
            InputMode::Searching => {
                self.handle_search_key(key);
                return None;
            }
            InputMode::Normal => {}
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.running = false,
            KeyCode::Tab => self.next_tab(),
            KeyCode::BackTab => self.prev_tab(),
            KeyCode::Char('t') => self.next_theme(),
            KeyCode::Char('r') => return Some(Command::CheckHealth),
            KeyCode::Char('?') => self.switch_tab(Tab::Help),
            KeyCode::Char('j') | KeyCode::Down => self.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_up(),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(tab) = Tab::from_key(c) {
                    self.switch_tab(tab);
                }
            }
            _ => self.handle_tab_key(key),
        }
        None
    }

    fn handle_editing_key(&mut self, key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Enter => return self.submit_chat(),
            KeyCode::Backspace => self.session.pop_char(),
            KeyCode::Char(c) => self.session.push_char(c),
            _ => {}
        }
        None
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.filter.search_term.clear();
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Enter => self.input_mode = InputMode::Normal,
            KeyCode::Backspace => {
                self.filter.search_term.pop();
            }
            KeyCode::Char(c) => self.filter.search_term.push(c),
            _ => return,
        }
        self.selected_index = 0;
    }

    fn handle_tab_key(&mut self, key: KeyEvent) {
        match (self.current_tab, key.code) {
            (Tab::Chat, KeyCode::Char('i')) => self.input_mode = InputMode::Editing,
            (Tab::Chat, KeyCode::Enter) if self.session.show_examples() => {
                if self.session.apply_example(self.selected_index) {
                    self.input_mode = InputMode::Editing;
                }
            }
            (Tab::Chat, KeyCode::PageUp) => self.chat_scroll = self.chat_scroll.saturating_add(5),
            (Tab::Chat, KeyCode::PageDown) => {
                self.chat_scroll = self.chat_scroll.saturating_sub(5)
            }
            (Tab::Chat | Tab::Venues, KeyCode::Enter | KeyCode::Char('o')) => {
                self.open_selected(LinkKind::Booking)
            }
            (Tab::Chat | Tab::Venues, KeyCode::Char('d')) => self.open_selected(LinkKind::Details),
            (Tab::Venues, KeyCode::Char('/')) => {
                self.input_mode = InputMode::Searching;
                self.filter.search_term.clear();
                self.selected_index = 0;
            }
            (Tab::Venues, KeyCode::Char('b')) => {
                self.filter.bookable_only = !self.filter.bookable_only;
                self.selected_index = 0;
            }
            (Tab::Venues, KeyCode::Char('s')) => {
                self.filter.sort_key = self.filter.sort_key.next();
                self.selected_index = 0;
                self.status_message = Some(self.filter.sort_key.label().to_string());
            }
            (Tab::Agents, KeyCode::Enter) if self.open_agent.is_none() => {
                if let Some(agent) = self.selected_agent() {
                    debug!(agent_id = %agent.id, "Opening agent details");
                    self.open_agent = Some(agent.id.clone());
                    self.selected_index = 0;
                }
            }
            (Tab::Agents, KeyCode::Esc) => {
                self.open_agent = None;
                self.selected_index = 0;
            }
            _ => {}
        }
    }

    /// Starts a chat request from the current input, if one may be sent.
    pub fn submit_chat(&mut self) -> Option<Command> {
        let request = self.session.begin_submit()?;
        self.input_mode = InputMode::Normal;
        self.chat_scroll = 0;
        self.selected_index = 0;
        Some(Command::SendChat(request))
    }

    pub fn finish_chat(&mut self, result: VenuexResult<ChatReply>) {
        if matches!(result, Err(ref e) if e.is_connection_error()) {
            self.connected = false;
        }
        self.session.complete(result);

        self.chat_scroll = 0;
        if self.current_tab == Tab::Chat {
            self.selected_index = 0;
            if self.session.input_focused() {
                self.input_mode = InputMode::Editing;
            }
        }
    }

    pub fn apply_health(&mut self, result: VenuexResult<HealthStatus>) {
        match result {
            Ok(health) => {
                debug!(status = %health.status, "Backend health");
                self.connected = true;
                self.last_error = None;
            }
            Err(e) => {
                self.connected = false;
                self.last_error = Some(e.to_string());
            }
        }
    }

    fn selected_link(&self, kind: LinkKind) -> Result<String, &'static str> {
        let venue = self.selected_venue().ok_or("No venue selected")?;
        match kind {
            LinkKind::Booking => Ok(venue.booking_url.clone()),
            LinkKind::Details => venue
                .venue_url
                .clone()
                .ok_or("This venue has no details page"),
        }
    }

    pub fn open_selected(&mut self, kind: LinkKind) {
        let raw = match self.selected_link(kind) {
            Ok(raw) => raw,
            Err(msg) => {
                self.status_message = Some(msg.to_string());
                return;
            }
        };

        self.status_message = Some(match (self.link_opener)(&raw) {
            Ok(link) => {
                info!(host = %link.host(), "Opened venue link");
                format!("Opened {}", link.host())
            }
            Err(e) => CliErrorDisplay::new(&e)
                .without_code()
                .without_suggestion()
                .to_string(),
        });
    }
}
