pub mod cid;
pub mod init;
pub mod name;
pub mod put;
pub mod resolve;
pub mod version;

pub use cid::ResolveCid;
pub use init::Init;
pub use name::Name;
pub use put::Put;
pub use resolve::Resolve;
pub use version::Version;
