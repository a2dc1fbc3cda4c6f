pub mod config;
pub mod error;
pub mod io;
pub mod matcher;
pub mod mutator;
pub mod paths;
pub mod section;
pub mod status;
pub mod summary;
pub mod ticket;
pub mod title;
pub mod types;

pub use error::{MdtError, Result};
pub use matcher::{find_sections, resolve_section};
pub use mutator::mutate_section;
pub use section::{list_sections, Outline, Section};
pub use status::validate_status_transition;
pub use summary::ticket_summary;
pub use title::{transform_for_display, TitleExtractor};
pub use types::{SectionOperation, Status};
