use super::paths;

/// Back-stack depth; older entries are dropped.
const MAX_HISTORY: usize = 50;

/// Explicit navigation history for the front-end.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: String,
    back: Vec<String>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(paths::HOME)
    }
}

impl Navigator {
    pub fn new(start: &str) -> Self {
        Self {
            current: start.to_string(),
            back: Vec::new(),
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    /// The location `back` would return to.
    pub fn previous(&self) -> Option<&str> {
        self.back.last().map(String::as_str)
    }

    pub fn push(&mut self, path: &str) {
        if path == self.current {
            return;
        }
        let old = std::mem::replace(&mut self.current, path.to_string());
        self.back.push(old);
        if self.back.len() > MAX_HISTORY {
            self.back.remove(0);
        }
    }

    /// Swap the current location without growing history (redirects).
    pub fn replace(&mut self, path: &str) {
        self.current = path.to_string();
    }

    /// Go back one step. Returns false when there is nowhere to go.
    pub fn back(&mut self) -> bool {
        match self.back.pop() {
            Some(path) => {
                self.current = path;
                true
            }
            None => false,
        }
    }
}
