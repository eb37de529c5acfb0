/// Top-level areas reachable from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Chats,
    Models,
    Files,
    Settings,
}

impl Section {
    /// Entries shown in the sidebar navigation, in order.
    pub const NAV: [Section; 3] = [Section::Chats, Section::Models, Section::Files];

    pub fn label(&self) -> &'static str {
        match self {
            Section::Chats => "Chats",
            Section::Models => "Model Management",
            Section::Files => "File Management",
            Section::Settings => "Settings",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            Section::Chats => "Chats",
            Section::Models => "Models",
            Section::Files => "Files",
            Section::Settings => "Settings",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Section::Chats => "💬",
            Section::Models => "🧠",
            Section::Files => "📁",
            Section::Settings => "⚙",
        }
    }
}

/// Root-owned navigation state that is not encoded in the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub sidebar_open: bool,
}

impl Default for Navigation {
    fn default() -> Self {
        Self { sidebar_open: true }
    }
}

impl Navigation {
    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }
}
