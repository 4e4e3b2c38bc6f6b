//! Client navigation table.
//!
//! The single-page client mounts six views, one per top-level path. The table here is the
//! source of truth for those bindings; the API exposes it so the client and any server-side
//! rendering agree on what a location means. Locations that match no entry resolve to an
//! explicit [`Resolution::NotFound`] rather than falling back to the home view.

use serde::Serialize;

/// Views the client can mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum View {
    #[serde(rename = "HomeView")]
    Home,
    #[serde(rename = "CaregiversView")]
    Caregivers,
    #[serde(rename = "FamiliesView")]
    Families,
    #[serde(rename = "JobBoardView")]
    JobBoard,
    #[serde(rename = "AppointmentsView")]
    Appointments,
    #[serde(rename = "MessagesView")]
    Messages,
}

impl View {
    pub const ALL: [View; 6] = [
        View::Home,
        View::Caregivers,
        View::Families,
        View::JobBoard,
        View::Appointments,
        View::Messages,
    ];

    /// Component identifier the client registers for this view.
    pub const fn component(self) -> &'static str {
        match self {
            View::Home => "HomeView",
            View::Caregivers => "CaregiversView",
            View::Families => "FamiliesView",
            View::JobBoard => "JobBoardView",
            View::Appointments => "AppointmentsView",
            View::Messages => "MessagesView",
        }
    }
}

/// One row of the navigation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    pub path: &'static str,
    pub name: &'static str,
    pub view: View,
}

const ROUTES: [RouteEntry; 6] = [
    RouteEntry {
        path: "/",
        name: "home",
        view: View::Home,
    },
    RouteEntry {
        path: "/caregivers",
        name: "caregivers",
        view: View::Caregivers,
    },
    RouteEntry {
        path: "/families",
        name: "families",
        view: View::Families,
    },
    RouteEntry {
        path: "/jobs",
        name: "jobs",
        view: View::JobBoard,
    },
    RouteEntry {
        path: "/appointments",
        name: "appointments",
        view: View::Appointments,
    },
    RouteEntry {
        path: "/messages",
        name: "messages",
        view: View::Messages,
    },
];

/// Outcome of resolving a location against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Matched(RouteEntry),
    NotFound { path: String },
}

impl Resolution {
    pub fn view(&self) -> Option<View> {
        match self {
            Resolution::Matched(entry) => Some(entry.view),
            Resolution::NotFound { .. } => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Resolution::NotFound { .. })
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("history base '{base}' must not contain whitespace, '?' or '#'")]
    InvalidBase { base: String },
}

/// Navigation table mounted under a history base.
#[derive(Debug, Clone)]
pub struct RouteTable {
    base: String,
    entries: &'static [RouteEntry],
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl RouteTable {
    pub fn standard() -> Self {
        Self {
            base: "/".to_string(),
            entries: &ROUTES,
        }
    }

    /// Mounts the table under `base`, normalized to start and end with `/`.
    pub fn with_base(base: &str) -> Result<Self, NavigationError> {
        let trimmed = base.trim();
        if trimmed.is_empty()
            || trimmed.contains(|c: char| c.is_whitespace() || c == '?' || c == '#')
        {
            return Err(NavigationError::InvalidBase {
                base: base.to_string(),
            });
        }

        let mut normalized = String::with_capacity(trimmed.len() + 2);
        if !trimmed.starts_with('/') {
            normalized.push('/');
        }
        normalized.push_str(trimmed);
        if !normalized.ends_with('/') {
            normalized.push('/');
        }

        Ok(Self {
            base: normalized,
            entries: &ROUTES,
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn entries(&self) -> &[RouteEntry] {
        self.entries
    }

    pub fn by_name(&self, name: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn entry_for(&self, view: View) -> Option<&RouteEntry> {
        self.entries.iter().find(|entry| entry.view == view)
    }

    /// Absolute location of `view` including the history base.
    pub fn href(&self, view: View) -> String {
        let path = self.entry_for(view).map(|entry| entry.path).unwrap_or("/");
        format!("{}{}", self.base, path.trim_start_matches('/'))
    }

    /// Resolves a browser location (path plus optional query and fragment).
    pub fn resolve(&self, location: &str) -> Resolution {
        let raw = match location.find(|c| c == '?' || c == '#') {
            Some(index) => &location[..index],
            None => location,
        };

        let Some(relative) = self.strip_base(raw) else {
            return Resolution::NotFound {
                path: raw.to_string(),
            };
        };

        let path = normalize_path(relative);
        match self
            .entries
            .iter()
            .find(|entry| entry.path.eq_ignore_ascii_case(&path))
        {
            Some(entry) => Resolution::Matched(*entry),
            None => Resolution::NotFound { path },
        }
    }

    fn strip_base<'a>(&self, raw: &'a str) -> Option<&'a str> {
        let stem = &self.base[..self.base.len() - 1];
        if stem.is_empty() {
            return raw.starts_with('/').then_some(raw);
        }

        let head = raw.get(..stem.len())?;
        if !head.eq_ignore_ascii_case(stem) {
            return None;
        }

        let rest = &raw[stem.len()..];
        if rest.is_empty() || rest.starts_with('/') {
            Some(rest)
        } else {
            None
        }
    }
}

fn normalize_path(relative: &str) -> String {
    if relative.is_empty() || relative == "/" {
        return "/".to_string();
    }
    relative
        .strip_suffix('/')
        .unwrap_or(relative)
        .to_string()
}
