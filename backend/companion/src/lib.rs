pub mod nina;
pub mod registry;
pub mod traits;
pub mod yara;

pub use nina::Nina;
pub use registry::CompanionRegistry;
pub use traits::{CompanionBot, Persona};
pub use yara::Yara;
