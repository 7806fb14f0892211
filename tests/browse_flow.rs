use estate_scout::auth::MemoryIdentity;
use estate_scout::filter::{self, FilterCriteria};
use estate_scout::listings::{ListingSource, StaticListings};
use estate_scout::models::Category;
use estate_scout::view::{AuthForm, AuthModal, FavoriteOutcome};
use estate_scout::{AppConfig, AppContext};
use std::sync::Arc;

fn ids(listings: &[estate_scout::models::Listing]) -> Vec<&str> {
    listings.iter().map(|l| l.id.as_str()).collect()
}

async fn offline_app(identity: Arc<MemoryIdentity>) -> estate_scout::App {
    AppContext::new(AppConfig::default(), Arc::new(StaticListings::new()), identity)
        .bootstrap()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_browse_filter_and_clear() {
    let mut app = offline_app(Arc::new(MemoryIdentity::new())).await;

    app.view.update_criteria(|c| c.toggle_category(Category::Villa));
    app.view.apply_filters();
    assert_eq!(ids(app.view.visible()), vec!["2", "5"]);

    app.view.submit_search("palm");
    assert_eq!(ids(app.view.visible()), vec!["5"]);

    app.view.clear_filters();
    app.view.apply_filters();
    assert_eq!(app.view.visible(), StaticListings::listings().as_slice());
}

#[tokio::test]
async fn test_favorite_requires_sign_in_then_sticks() {
    let identity = Arc::new(MemoryIdentity::new().with_account("lina@example.com", "pa55word", "Lina"));
    let mut app = offline_app(identity).await;

    assert_eq!(app.view.toggle_favorite("4"), FavoriteOutcome::AuthRequired);
    assert_eq!(app.view.state().auth_modal, AuthModal::Open(AuthForm::SignIn));
    assert!(app.view.state().favorites.is_empty());

    app.login("lina@example.com", "pa55word").await.unwrap();
    assert_eq!(app.view.state().auth_modal, AuthModal::Closed);
    assert_eq!(app.view.toggle_favorite("4"), FavoriteOutcome::Added);
    assert!(app.view.is_favorite("4"));

    app.shutdown();
}

#[tokio::test]
async fn test_engine_properties_over_fixture() {
    let listings = StaticListings::new().list_all_listings().await.unwrap();

    let mut criteria = FilterCriteria::new();
    criteria.select_bedrooms("5+");
    assert_eq!(ids(&filter::apply(&listings, "", &criteria)), vec!["2", "5"]);

    let once = filter::apply(&listings, "dubai", &criteria);
    assert_eq!(filter::apply(&once, "dubai", &criteria), once);
    assert_eq!(filter::apply(&listings, "", &FilterCriteria::new()), listings);
}
