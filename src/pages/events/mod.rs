//! Event screens: listing, creation wizard, and edit form

pub mod create;
pub mod edit;
pub mod list;

pub use create::CreateEventPage;
pub use edit::EditEventPage;
pub use list::AllEventsPage;
