use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The three datasource kinds offered by step 0 of the add-document wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceType {
    Text,
    WebPage,
    File,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Text => "text",
            SourceType::WebPage => "webPage",
            SourceType::File => "file",
        }
    }
}

impl std::str::FromStr for SourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(SourceType::Text),
            "webPage" => Ok(SourceType::WebPage),
            "file" => Ok(SourceType::File),
            other => Err(format!("unknown datasource type: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardStep {
    ChooseType,
    Configure,
}

impl Default for WizardStep {
    fn default() -> Self {
        WizardStep::ChooseType
    }
}

/// Draft state of the add-document wizard, held in the session.
///
/// Fields deliberately survive closing the modal and successful submits:
/// reopening shows the previous values. Only the step indicator rewinds to
/// the type chooser on open. See DESIGN.md for the rationale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WizardDraft {
    pub open: bool,
    pub active_step: WizardStep,
    pub document_type: Option<SourceType>,
    pub document_name: String,
    pub web_page_url: String,
    pub text_source: String,
    pub text: String,
    pub file_name: Option<String>,
}

/// Validation outcome: the one backend call this draft asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAction {
    AddText {
        doc_name: String,
        source: String,
        text: String,
    },
    AddUrl {
        doc_name: String,
        url: String,
    },
    UploadFile {
        doc_name: String,
        file_name: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("Please input the name")]
    MissingName,
    #[error("Please input the Web Page URL")]
    MissingUrl,
    #[error("Please select a file")]
    MissingFile,
    #[error("Please input the text")]
    MissingText,
}

impl WizardDraft {
    /// Show the modal. The draft itself is not reset; only the step rewinds
    /// to the chooser.
    pub fn open(&mut self) {
        self.open = true;
        self.active_step = WizardStep::ChooseType;
    }

    /// Hide the modal, keeping the draft.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Step 0's only action: pick a type and move to configuration.
    pub fn choose(&mut self, source_type: SourceType) {
        self.document_type = Some(source_type);
        self.active_step = WizardStep::Configure;
    }

    pub fn set_name(&mut self, name: &str) {
        self.document_name = name.to_string();
    }

    pub fn set_url(&mut self, url: &str) {
        self.web_page_url = url.to_string();
    }

    pub fn set_source(&mut self, source: &str) {
        self.text_source = source.to_string();
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// Record a selected file; the name field defaults to the file's name
    /// when the user has not typed one.
    pub fn attach_file(&mut self, file_name: &str) {
        self.file_name = Some(file_name.to_string());
        if self.document_name.is_empty() {
            self.document_name = file_name.to_string();
        }
    }

    /// Clearing the selection resets both the file handle and the name.
    pub fn clear_file(&mut self) {
        self.file_name = None;
        self.document_name.clear();
    }

    /// Ordered validation: the name first, then the field the chosen type
    /// requires. An unset type falls through to the text branch, matching
    /// the chooser's default.
    pub fn validate(&self) -> Result<SubmitAction, WizardError> {
        if self.document_name.is_empty() {
            return Err(WizardError::MissingName);
        }

        match self.document_type {
            Some(SourceType::WebPage) => {
                if self.web_page_url.is_empty() {
                    return Err(WizardError::MissingUrl);
                }
                Ok(SubmitAction::AddUrl {
                    doc_name: self.document_name.clone(),
                    url: self.web_page_url.clone(),
                })
            }
            Some(SourceType::File) => {
                let file_name = self.file_name.clone().ok_or(WizardError::MissingFile)?;
                Ok(SubmitAction::UploadFile {
                    doc_name: self.document_name.clone(),
                    file_name,
                })
            }
            Some(SourceType::Text) | None => {
                if self.text.is_empty() {
                    return Err(WizardError::MissingText);
                }
                Ok(SubmitAction::AddText {
                    doc_name: self.document_name.clone(),
                    source: self.text_source.clone(),
                    text: self.text.clone(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_rewinds_step_but_keeps_fields() {
        let mut draft = WizardDraft::default();
        draft.open();
        draft.choose(SourceType::Text);
        draft.set_name("doc1");
        draft.set_text("hello");
        draft.close();

        draft.open();
        assert!(draft.open);
        assert_eq!(draft.active_step, WizardStep::ChooseType);
        assert_eq!(draft.document_name, "doc1");
        assert_eq!(draft.text, "hello");
        assert_eq!(draft.document_type, Some(SourceType::Text));
    }

    #[test]
    fn choose_moves_to_configure() {
        let mut draft = WizardDraft::default();
        draft.open();
        draft.choose(SourceType::WebPage);
        assert_eq!(draft.active_step, WizardStep::Configure);
        assert_eq!(draft.document_type, Some(SourceType::WebPage));
    }

    #[test]
    fn empty_name_blocks_every_type() {
        for source_type in [SourceType::Text, SourceType::WebPage, SourceType::File] {
            let mut draft = WizardDraft::default();
            draft.choose(source_type);
            draft.set_url("http://example.com");
            draft.set_text("body");
            draft.attach_file("a.pdf");
            draft.clear_file();
            assert_eq!(draft.validate(), Err(WizardError::MissingName));
        }
    }

    #[test]
    fn name_is_checked_before_type_specific_fields() {
        let mut draft = WizardDraft::default();
        draft.choose(SourceType::WebPage);
        // Both the name and the URL are missing; the name wins.
        assert_eq!(draft.validate(), Err(WizardError::MissingName));
    }

    #[test]
    fn web_page_requires_url() {
        let mut draft = WizardDraft::default();
        draft.choose(SourceType::WebPage);
        draft.set_name("doc1");
        assert_eq!(draft.validate(), Err(WizardError::MissingUrl));

        draft.set_url("http://example.com/page");
        assert_eq!(
            draft.validate(),
            Ok(SubmitAction::AddUrl {
                doc_name: "doc1".to_string(),
                url: "http://example.com/page".to_string(),
            })
        );
    }

    #[test]
    fn file_requires_selection() {
        let mut draft = WizardDraft::default();
        draft.choose(SourceType::File);
        draft.set_name("doc1");
        assert_eq!(draft.validate(), Err(WizardError::MissingFile));

        draft.attach_file("report.pdf");
        assert_eq!(
            draft.validate(),
            Ok(SubmitAction::UploadFile {
                doc_name: "doc1".to_string(),
                file_name: "report.pdf".to_string(),
            })
        );
    }

    #[test]
    fn text_requires_body_and_carries_optional_source() {
        let mut draft = WizardDraft::default();
        draft.choose(SourceType::Text);
        draft.set_name("doc1");
        assert_eq!(draft.validate(), Err(WizardError::MissingText));

        draft.set_text("hello");
        assert_eq!(
            draft.validate(),
            Ok(SubmitAction::AddText {
                doc_name: "doc1".to_string(),
                source: String::new(),
                text: "hello".to_string(),
            })
        );
    }

    #[test]
    fn unset_type_behaves_as_text() {
        let mut draft = WizardDraft::default();
        draft.set_name("doc1");
        assert_eq!(draft.validate(), Err(WizardError::MissingText));
    }

    #[test]
    fn attaching_a_file_defaults_the_empty_name() {
        let mut draft = WizardDraft::default();
        draft.choose(SourceType::File);
        draft.attach_file("report.pdf");
        assert_eq!(draft.document_name, "report.pdf");
        assert_eq!(draft.file_name.as_deref(), Some("report.pdf"));
    }

    #[test]
    fn attaching_a_file_keeps_a_typed_name() {
        let mut draft = WizardDraft::default();
        draft.choose(SourceType::File);
        draft.set_name("quarterly");
        draft.attach_file("report.pdf");
        assert_eq!(draft.document_name, "quarterly");
    }

    #[test]
    fn clearing_the_file_resets_handle_and_name() {
        let mut draft = WizardDraft::default();
        draft.choose(SourceType::File);
        draft.attach_file("report.pdf");
        draft.clear_file();
        assert_eq!(draft.file_name, None);
        assert_eq!(draft.document_name, "");
    }

    #[test]
    fn source_type_parses_its_wire_names() {
        assert_eq!("text".parse(), Ok(SourceType::Text));
        assert_eq!("webPage".parse(), Ok(SourceType::WebPage));
        assert_eq!("file".parse(), Ok(SourceType::File));
        assert!("pdf".parse::<SourceType>().is_err());
    }
}
