pub mod document;
pub mod page;
pub mod wizard;

pub use document::{
    color_for, format_last_sync, result_badge, Document, DocumentStatus, ResultBadge, StatusColor,
};
pub use page::{PAGE_SIZE, PageState};
pub use wizard::{SourceType, SubmitAction, WizardDraft, WizardError, WizardStep};
