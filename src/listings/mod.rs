pub mod fixture;
pub mod store;
pub mod supabase;
pub mod traits;

pub use fixture::StaticListings;
pub use store::{ListingStore, StoreError};
pub use supabase::SupabaseListings;
pub use traits::ListingSource;
