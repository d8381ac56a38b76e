//! Navigation contract between the list controller and the routing shell

/// Fire-and-forget navigation requests
pub trait Navigator {
    fn navigate_to_detail(&mut self, id: u64);
    fn navigate_back(&mut self);
}

/// Screens the shell can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    List,
    Detail(u64),
}

/// History stack rooted at the list view
#[derive(Debug, Clone)]
pub struct Router {
    history: Vec<Route>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self {
            history: vec![Route::List],
        }
    }

    pub fn current(&self) -> Route {
        self.history.last().copied().unwrap_or(Route::List)
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }
}

impl Navigator for Router {
    fn navigate_to_detail(&mut self, id: u64) {
        log::debug!("navigate to /users/{}", id);
        self.history.push(Route::Detail(id));
    }

    fn navigate_back(&mut self) {
        if self.history.len() > 1 {
            self.history.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_from_root_is_noop() {
        let mut router = Router::new();
        router.navigate_back();
        assert_eq!(router.current(), Route::List);
        assert_eq!(router.depth(), 1);
    }

    #[test]
    fn detail_then_back() {
        let mut router = Router::new();
        router.navigate_to_detail(3);
        assert_eq!(router.current(), Route::Detail(3));
        router.navigate_back();
        assert_eq!(router.current(), Route::List);
    }
}
