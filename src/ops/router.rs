use crate::model::task::Filter;

/// Map a navigational fragment to a filter. Unknown fragments show everything.
pub fn route(fragment: &str) -> Filter {
    fragment
        .strip_prefix("#/")
        .and_then(Filter::parse_filter)
        .unwrap_or_default()
}

/// Canonical fragment for a filter
pub fn fragment(filter: Filter) -> &'static str {
    match filter {
        Filter::All => "#/",
        Filter::Active => "#/active",
        Filter::Completed => "#/completed",
    }
}

/// Tracks the current route. The fragment itself is owned by the host
/// (browser history, CLI flag, TUI key); the router only reacts to it.
#[derive(Debug, Clone, Default)]
pub struct Router {
    filter: Filter,
}

impl Router {
    pub fn from_fragment(fragment: &str) -> Self {
        Router {
            filter: route(fragment),
        }
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Handle a fragment change and return the filter to display
    pub fn navigate(&mut self, fragment: &str) -> Filter {
        self.filter = route(fragment);
        self.filter
    }
}
