pub mod error;
pub mod gateway;
pub mod memory;
pub mod supabase;
pub mod traits;

pub use error::AuthFailure;
pub use gateway::AuthGateway;
pub use memory::MemoryIdentity;
pub use supabase::SupabaseAuth;
pub use traits::{IdentityProvider, Subscription};
