use db::DBService;

pub mod error;
pub mod extract;
pub mod http;
pub mod routes;

#[cfg(test)]
pub(crate) mod test_support;

/// Shared by every handler; cloned per request. The pool sits behind a cheap
/// handle.
#[derive(Clone)]
pub struct AppState {
    db: DBService,
}

impl AppState {
    pub fn new(db: DBService) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DBService {
        &self.db
    }
}
