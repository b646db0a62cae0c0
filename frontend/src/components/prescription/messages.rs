use common::model::{ApplyMode, ImageBlob};
use common::uploads::UploadTicket;
use common::StoreError;

pub enum Msg {
    SetPatientName(String),
    SetHistoryNumber(String),
    SetIssueDate(String),
    SelectDoctor(String),
    UpdateContent(String),
    SetTemplateName(String),
    SaveTemplate,
    ApplyTemplate(String, ApplyMode),
    DeleteTemplate(String),
    LogoSelected(web_sys::File),
    SignatureSelected(web_sys::File),
    ImageRead {
        ticket: UploadTicket,
        result: Result<ImageBlob, StoreError>,
    },
    ClearLogo,
    ClearSignature,
    ResetAll,
    ExportTemplates,
    Print,
}
