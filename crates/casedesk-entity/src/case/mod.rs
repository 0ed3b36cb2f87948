//! Case-record aggregate and its embedded sub-entities.

pub mod actor;
pub mod attachment;
pub mod comment;
pub mod draft;
pub mod model;
pub mod status;

pub use actor::{ActorRef, NormalizedActor};
pub use attachment::{Attachment, AttachmentDraft, StorageRef, StoredObject};
pub use comment::{Comment, CommentDraft};
pub use draft::{CaseChanges, CaseDraft, CaseUpdate};
pub use model::CaseRecord;
pub use status::CaseStatus;
