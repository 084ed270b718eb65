//! Collaborators of the placement workflows: kindergarten directory lookups
//! and the submission service that receives finished placements and requests.

mod directory;
mod error;
mod submission;

pub use directory::{Kindergarten, KindergartenDirectory, MemoryDirectory};
pub use error::{StoreError, SubmissionError};
pub use submission::{Confirmation, MemorySubmissions, SubmissionService, Submitted};
