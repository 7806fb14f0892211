//! View controller - single owner of the page state
//!
//! Every intent mutates state and re-derives the filtered listings before
//! returning, so the live results never lag behind the query and criteria.

use crate::auth::AuthFailure;
use crate::filter::{self, FilterCriteria};
use crate::listings::ListingStore;
use crate::models::{Listing, Session};
use crate::view::state::{AuthForm, AuthModal, ViewState};
use tracing::{debug, info};

/// Pixels scrolled before the scroll-to-top button appears
pub const DEFAULT_SCROLL_THRESHOLD: u32 = 400;

/// Side effects the page must carry out after an intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEffect {
    /// Bring the results grid into view
    ScrollToResults,
    /// Smooth-scroll back to the top of the page
    ScrollToTop,
}

/// What happened when a favorite was toggled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteOutcome {
    Added,
    Removed,
    /// No session; the auth modal was opened instead
    AuthRequired,
}

pub struct ViewController {
    store: ListingStore,
    state: ViewState,
    /// Results for the current query and criteria
    results: Vec<Listing>,
    /// Query and criteria last committed by search, apply or clear
    committed: (String, FilterCriteria),
    /// Results for the committed pair
    visible: Vec<Listing>,
    scroll_threshold: u32,
}

impl ViewController {
    pub fn new(store: ListingStore) -> Self {
        Self::with_scroll_threshold(store, DEFAULT_SCROLL_THRESHOLD)
    }

    pub fn with_scroll_threshold(store: ListingStore, scroll_threshold: u32) -> Self {
        let results = store.listings().to_vec();
        Self {
            visible: results.clone(),
            results,
            store,
            state: ViewState::default(),
            committed: (String::new(), FilterCriteria::default()),
            scroll_threshold,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn store(&self) -> &ListingStore {
        &self.store
    }

    /// Listings matching the current query and criteria
    pub fn results(&self) -> &[Listing] {
        &self.results
    }

    /// Listings matching the last committed query and criteria
    pub fn visible(&self) -> &[Listing] {
        &self.visible
    }

    pub fn session(&self) -> Option<&Session> {
        self.state.session.as_ref()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Listings and filtering
    // ─────────────────────────────────────────────────────────────────────

    /// Replace the working set of listings
    pub fn set_listings(&mut self, store: ListingStore) {
        info!("Loaded {} listings into view", store.len());
        self.store = store;
        self.recompute();
        self.recompute_visible();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.query = query.into();
        self.recompute();
    }

    /// Search submitted from the header, hero or a quick-category button
    pub fn submit_search(&mut self, query: impl Into<String>) -> ViewEffect {
        self.set_query(query);
        self.commit();
        ViewEffect::ScrollToResults
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.state.criteria = criteria;
        self.recompute();
    }

    /// Edit the staged criteria in place
    pub fn update_criteria(&mut self, edit: impl FnOnce(&mut FilterCriteria)) {
        edit(&mut self.state.criteria);
        self.recompute();
    }

    pub fn apply_filters(&mut self) -> ViewEffect {
        self.commit();
        ViewEffect::ScrollToResults
    }

    /// Reset query and criteria, showing every listing again
    pub fn clear_filters(&mut self) {
        self.state.query.clear();
        self.state.criteria = FilterCriteria::default();
        self.recompute();
        self.commit();
    }

    fn commit(&mut self) {
        self.committed = (self.state.query.clone(), self.state.criteria.clone());
        self.visible = self.results.clone();
        info!(
            "Showing {} of {} listings ({} active filters)",
            self.visible.len(),
            self.store.len(),
            self.state.criteria.active_count()
        );
    }

    fn recompute(&mut self) {
        self.results = filter::apply(self.store.listings(), &self.state.query, &self.state.criteria);
        debug!("{} listings match current filters", self.results.len());
    }

    fn recompute_visible(&mut self) {
        let (query, criteria) = &self.committed;
        self.visible = filter::apply(self.store.listings(), query, criteria);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Favorites and session
    // ─────────────────────────────────────────────────────────────────────

    pub fn toggle_favorite(&mut self, id: &str) -> FavoriteOutcome {
        if self.state.session.is_none() {
            debug!("Favorite on {} needs a session, opening sign-in", id);
            self.open_auth_modal(AuthForm::SignIn);
            return FavoriteOutcome::AuthRequired;
        }

        if self.state.favorites.remove(id) {
            FavoriteOutcome::Removed
        } else {
            self.state.favorites.insert(id.to_string());
            FavoriteOutcome::Added
        }
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.state.favorites.contains(id)
    }

    pub fn set_session(&mut self, session: Option<Session>) {
        match &session {
            Some(session) => {
                info!("Signed in as {}", session.user.display_name());
                self.state.auth_modal = AuthModal::Closed;
            }
            None if self.state.session.is_some() => info!("Signed out"),
            None => {}
        }
        self.state.session = session;
    }

    /// Mark an auth request as started; refuses to overlap requests
    pub fn begin_auth_request(&mut self) -> Result<(), AuthFailure> {
        if self.state.auth_in_flight {
            return Err(AuthFailure::RequestInFlight);
        }
        self.state.auth_in_flight = true;
        Ok(())
    }

    pub fn finish_auth_request(&mut self) {
        self.state.auth_in_flight = false;
    }

    // ─────────────────────────────────────────────────────────────────────
    // Modal, panel and scroll
    // ─────────────────────────────────────────────────────────────────────

    pub fn open_auth_modal(&mut self, form: AuthForm) {
        self.state.auth_modal = AuthModal::Open(form);
    }

    pub fn close_auth_modal(&mut self) {
        self.state.auth_modal = AuthModal::Closed;
    }

    /// Flip between sign-in and register while the modal is open
    pub fn switch_auth_form(&mut self) {
        if let AuthModal::Open(form) = self.state.auth_modal {
            self.state.auth_modal = AuthModal::Open(form.toggled());
        }
    }

    pub fn toggle_filter_panel(&mut self) {
        self.state.filter_panel_open = !self.state.filter_panel_open;
    }

    pub fn set_scroll_offset(&mut self, offset: u32) {
        self.state.scroll_offset = offset;
        self.state.show_scroll_top = offset > self.scroll_threshold;
    }

    pub fn scroll_to_top(&mut self) -> ViewEffect {
        self.set_scroll_offset(0);
        ViewEffect::ScrollToTop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::StaticListings;
    use crate::models::{Category, User};

    fn controller() -> ViewController {
        ViewController::new(ListingStore::new(StaticListings::listings()).unwrap())
    }

    fn session() -> Session {
        Session {
            access_token: "token".to_string(),
            refresh_token: None,
            user: User {
                id: "u1".to_string(),
                email: "amal@example.com".to_string(),
                name: Some("Amal".to_string()),
            },
        }
    }

    fn ids(listings: &[Listing]) -> Vec<&str> {
        listings.iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn test_starts_with_every_listing() {
        let view = controller();
        assert_eq!(view.results().len(), 6);
        assert_eq!(view.visible().len(), 6);
    }

    #[test]
    fn test_results_follow_staged_criteria_immediately() {
        let mut view = controller();
        view.update_criteria(|c| c.toggle_category(Category::Villa));
        assert_eq!(ids(view.results()), vec!["2", "5"]);
        // Nothing committed yet
        assert_eq!(view.visible().len(), 6);

        assert_eq!(view.apply_filters(), ViewEffect::ScrollToResults);
        assert_eq!(ids(view.visible()), vec!["2", "5"]);
    }

    #[test]
    fn test_submit_search_commits_query() {
        let mut view = controller();
        assert_eq!(view.submit_search("Marina"), ViewEffect::ScrollToResults);
        assert_eq!(view.state().query, "Marina");
        assert_eq!(ids(view.visible()), vec!["1"]);
    }

    #[test]
    fn test_clear_then_apply_restores_everything() {
        let mut view = controller();
        view.set_query("villa");
        view.update_criteria(|c| {
            c.set_min_price("20000000");
            c.select_bedrooms("Studio");
        });
        view.apply_filters();
        assert!(view.visible().is_empty());

        view.clear_filters();
        view.apply_filters();
        assert_eq!(view.visible(), StaticListings::listings().as_slice());
        assert!(view.state().criteria.is_empty());
        assert!(view.state().query.is_empty());
    }

    #[test]
    fn test_set_listings_rederives_both_sets() {
        let mut view = controller();
        view.set_criteria(FilterCriteria {
            bedrooms: Some(crate::filter::BedroomFilter::FivePlus),
            ..Default::default()
        });
        view.apply_filters();

        let fewer: Vec<_> = StaticListings::listings().into_iter().take(3).collect();
        view.set_listings(ListingStore::new(fewer).unwrap());
        assert_eq!(ids(view.results()), vec!["2"]);
        assert_eq!(ids(view.visible()), vec!["2"]);
    }

    #[test]
    fn test_favorite_without_session_opens_modal() {
        let mut view = controller();
        assert_eq!(view.toggle_favorite("1"), FavoriteOutcome::AuthRequired);
        assert!(view.state().favorites.is_empty());
        assert_eq!(view.state().auth_modal, AuthModal::Open(AuthForm::SignIn));
    }

    #[test]
    fn test_favorite_toggles_with_session() {
        let mut view = controller();
        view.set_session(Some(session()));

        assert_eq!(view.toggle_favorite("3"), FavoriteOutcome::Added);
        assert!(view.is_favorite("3"));
        assert_eq!(view.toggle_favorite("3"), FavoriteOutcome::Removed);
        assert!(!view.is_favorite("3"));
    }

    #[test]
    fn test_session_closes_modal() {
        let mut view = controller();
        view.open_auth_modal(AuthForm::Register);
        view.switch_auth_form();
        assert_eq!(view.state().auth_modal, AuthModal::Open(AuthForm::SignIn));

        view.set_session(Some(session()));
        assert!(!view.state().auth_modal.is_open());
        assert!(view.state().is_authenticated());

        view.set_session(None);
        assert!(view.session().is_none());
    }

    #[test]
    fn test_switch_form_ignored_when_closed() {
        let mut view = controller();
        view.switch_auth_form();
        assert_eq!(view.state().auth_modal, AuthModal::Closed);
    }

    #[test]
    fn test_auth_requests_do_not_overlap() {
        let mut view = controller();
        view.begin_auth_request().unwrap();
        assert_eq!(view.begin_auth_request(), Err(AuthFailure::RequestInFlight));

        view.finish_auth_request();
        assert!(view.begin_auth_request().is_ok());
    }

    #[test]
    fn test_scroll_threshold() {
        let mut view = controller();
        view.set_scroll_offset(400);
        assert!(!view.state().show_scroll_top);
        view.set_scroll_offset(401);
        assert!(view.state().show_scroll_top);

        assert_eq!(view.scroll_to_top(), ViewEffect::ScrollToTop);
        assert!(!view.state().show_scroll_top);
    }

    #[test]
    fn test_filter_panel_toggle() {
        let mut view = controller();
        view.toggle_filter_panel();
        assert!(view.state().filter_panel_open);
        view.toggle_filter_panel();
        assert!(!view.state().filter_panel_open);
    }
}
