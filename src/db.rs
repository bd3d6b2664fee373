pub mod account_repo;
pub use account_repo::{AccountRepository, PgAccountRepository};
pub mod complaint_repo;
pub use complaint_repo::{ComplaintRepository, PgComplaintRepository};
pub mod memory;
pub use memory::{MemoryAccountRepository, MemoryComplaintRepository};
