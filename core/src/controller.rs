use crate::dataset::Dataset;
use crate::filter::filter;
use crate::paginate::{paginate, PageWindow};
use crate::{CategoryFilter, Searchable};
use tracing::debug;

/// User-controlled inputs of one listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState<C> {
    /// Matched as a raw, case-insensitive substring. Never trimmed.
    pub search_term: String,
    pub category: CategoryFilter<C>,
    /// 1-based.
    pub current_page: usize,
}

impl<C> Default for QueryState<C> {
    fn default() -> Self {
        Self { search_term: String::new(), category: CategoryFilter::All, current_page: 1 }
    }
}

/// Whether the current query matched anything. The engine has no loading or
/// error state, so these two are exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultState {
    NoMatches,
    Matches { total: usize },
}

/// Owns the query state of one listing and keeps its filtered result and
/// current page window in sync with it.
///
/// Every transition completes synchronously: search and category edits
/// re-run the filter and return to page 1, page moves only re-slice.
pub struct QueryController<'a, R: Searchable> {
    dataset: &'a Dataset<R>,
    page_size: usize,
    state: QueryState<R::Category>,
    filtered: Vec<&'a R>,
    window: PageWindow<'a, R>,
}

impl<'a, R: Searchable> QueryController<'a, R> {
    pub fn new(dataset: &'a Dataset<R>, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let state = QueryState::default();
        let filtered = filter(dataset.records(), &state);
        let window = paginate(&filtered, page_size, state.current_page);
        Self { dataset, page_size, state, filtered, window }
    }

    pub fn state(&self) -> &QueryState<R::Category> { &self.state }
    pub fn page_size(&self) -> usize { self.page_size }
    pub fn filtered(&self) -> &[&'a R] { &self.filtered }
    pub fn window(&self) -> &PageWindow<'a, R> { &self.window }

    pub fn result_state(&self) -> ResultState {
        match self.filtered.len() {
            0 => ResultState::NoMatches,
            total => ResultState::Matches { total },
        }
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.state.search_term = term.into();
        self.state.current_page = 1;
        self.refilter();
    }

    pub fn set_category(&mut self, category: CategoryFilter<R::Category>) {
        if !self.dataset.supports_categories() {
            debug!(?category, "dataset has no categories, filter is a no-op");
        }
        self.state.category = category;
        self.state.current_page = 1;
        self.refilter();
    }

    /// Move to `page`. Targets outside `[1, total_pages]` are ignored and
    /// leave the state untouched; returns whether the move happened.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        let total_pages = self.window.total_pages;
        if page == 0 || page > total_pages {
            debug!(page, total_pages, "rejected page navigation");
            return false;
        }
        self.state.current_page = page;
        self.repaginate();
        true
    }

    pub fn next_page(&mut self) -> bool {
        if !self.window.has_next {
            return false;
        }
        self.go_to_page(self.state.current_page + 1)
    }

    pub fn previous_page(&mut self) -> bool {
        if !self.window.has_previous {
            return false;
        }
        self.go_to_page(self.state.current_page - 1)
    }

    fn refilter(&mut self) {
        self.filtered = filter(self.dataset.records(), &self.state);
        debug!(
            term = %self.state.search_term,
            category = ?self.state.category,
            matches = self.filtered.len(),
            "filtered dataset"
        );
        self.repaginate();
    }

    fn repaginate(&mut self) {
        self.window = paginate(&self.filtered, self.page_size, self.state.current_page);
    }
}
